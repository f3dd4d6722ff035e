//! Application state
//!
//! One [`UserState`] lives in the runtime's store for the whole session.

/// A post in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
	pub id: u64,
	pub author: String,
	pub time: String,
	pub content: String,
}

/// Session state shared by every page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
	pub username: Option<String>,
	pub email: String,
	pub bio: String,
	pub logged_in: bool,
	pub posts: Vec<Post>,
}

impl UserState {
	/// State with a couple of posts so the feed is not empty on first load.
	pub fn with_sample_posts() -> Self {
		Self {
			posts: vec![
				Post {
					id: 1,
					author: "mosaic".to_string(),
					time: "5 minutes ago".to_string(),
					content: "Welcome to the feed.".to_string(),
				},
				Post {
					id: 2,
					author: "mosaic".to_string(),
					time: "1 hour ago".to_string(),
					content: "Log in to write your own posts.".to_string(),
				},
			],
			..Self::default()
		}
	}

	/// Marks the session as logged in as `username`.
	pub fn log_in(&mut self, username: impl Into<String>) {
		self.username = Some(username.into());
		self.logged_in = true;
	}

	/// Clears the session.
	pub fn log_out(&mut self) {
		self.username = None;
		self.email.clear();
		self.bio.clear();
		self.logged_in = false;
	}

	/// Prepends a post by the current user. Returns `false` when nobody is
	/// logged in.
	pub fn add_post(&mut self, content: impl Into<String>) -> bool {
		let Some(author) = self.username.clone() else {
			return false;
		};
		let id = self.posts.iter().map(|post| post.id).max().unwrap_or(0) + 1;
		self.posts.insert(
			0,
			Post {
				id,
				author,
				time: "just now".to_string(),
				content: content.into(),
			},
		);
		true
	}
}
