//! Page views
//!
//! Each page reads the state it is given and returns a fresh [`View`]. The
//! interactive parts carry `data-submit` / `data-click` declarations that the
//! handlers in [`crate::handlers`] answer to.

use mosaic::{View, h};

use crate::routes::{HOME_PAGE, LOGIN_PAGE, PROFILE_PAGE};
use crate::state::{Post, UserState};

fn layout(state: &UserState, main: View) -> View {
	h(
		"div",
		[("class", "bg-gray-100 min-h-screen flex justify-center")],
		[h(
			"div",
			[("class", "max-w-md w-full")],
			[header(), navigation(state.logged_in), main, footer()],
		)],
	)
}

fn header() -> View {
	h(
		"header",
		[("class", "bg-blue-600 text-white p-4 sticky top-0")],
		[h("h1", [("class", "text-2xl font-bold")], [View::text("Mosaic Feed")])],
	)
}

fn nav_link(href: &str, label: &str) -> View {
	h(
		"li",
		[("class", "nav-item")],
		[h(
			"a",
			[("href", href), ("data-click", "navigate")],
			[View::text(label)],
		)],
	)
}

fn navigation(logged_in: bool) -> View {
	let links = if logged_in {
		vec![
			nav_link(HOME_PAGE, "Home"),
			nav_link(PROFILE_PAGE, "Profile"),
			h(
				"li",
				[("class", "nav-item")],
				[h(
					"a",
					[("href", "#"), ("id", "logout"), ("data-click", "logout")],
					[View::text("Log out")],
				)],
			),
		]
	} else {
		vec![nav_link(HOME_PAGE, "Home"), nav_link(LOGIN_PAGE, "Log in")]
	};
	h(
		"nav",
		[("class", "bg-white shadow-md p-2 sticky top-14")],
		[h("ul", [("class", "flex justify-around")], links)],
	)
}

fn footer() -> View {
	h(
		"footer",
		[("class", "bg-gray-200 p-4 text-center")],
		[View::text("© 2026 Mosaic. All rights reserved.")],
	)
}

fn post_form() -> View {
	h(
		"div",
		[("class", "mb-4 bg-white rounded-lg shadow p-4")],
		[h(
			"form",
			[("id", "post-form"), ("data-submit", "post-submit")],
			[
				h(
					"textarea",
					[
						("id", "post-content"),
						("placeholder", "What's on your mind?"),
						("class", "w-full p-2 border rounded"),
					],
					[],
				),
				h(
					"button",
					[
						("id", "post-submit"),
						("type", "submit"),
						("class", "mt-2 bg-blue-600 text-white px-4 py-2 rounded"),
					],
					[View::text("Post")],
				),
			],
		)],
	)
}

fn post_item(post: &Post) -> View {
	View::element("div")
		.attr("class", "bg-white rounded-lg shadow p-4")
		.attr("data-post-id", post.id.to_string())
		.child(h(
			"div",
			[("class", "flex items-center mb-2")],
			[
				h("p", [("class", "font-bold")], [View::text(post.author.as_str())]),
				h("p", [("class", "text-sm text-gray-500")], [View::text(post.time.as_str())]),
			],
		))
		.child(h("p", [("class", "post-content")], [View::text(post.content.as_str())]))
		.into_view()
}

/// Feed with the post form for logged-in users.
pub fn home_page(state: &UserState) -> View {
	let form = state.logged_in.then(post_form);
	let posts = View::element("div")
		.attr("id", "posts-container")
		.attr("class", "space-y-4")
		.children(state.posts.iter().map(post_item))
		.into_view();
	layout(
		state,
		View::element("main")
			.attr("class", "p-4")
			.child(form)
			.child(posts)
			.into_view(),
	)
}

/// Login form.
pub fn login_page(_state: &UserState) -> View {
	h(
		"main",
		[("class", "bg-gray-100 flex items-center justify-center min-h-screen")],
		[h(
			"div",
			[("class", "bg-white p-8 rounded-lg shadow-md w-full max-w-md")],
			[
				h("h1", [("class", "text-2xl font-bold text-center mb-8")], [View::text("Mosaic Feed")]),
				h(
					"form",
					[("id", "login-form"), ("data-submit", "login-submit")],
					[
						h(
							"input",
							[
								("type", "text"),
								("id", "username"),
								("placeholder", "Username"),
								("class", "w-full p-2 border rounded"),
							],
							[],
						),
						h(
							"button",
							[("type", "submit"), ("class", "w-full bg-blue-600 text-white p-2 rounded")],
							[View::text("Log in")],
						),
					],
				),
			],
		)],
	)
}

/// Profile editor, pre-filled from the session.
pub fn profile_page(state: &UserState) -> View {
	let username = state.username.clone().unwrap_or_default();
	let form = h(
		"form",
		[("id", "profile-form"), ("data-submit", "profile-submit")],
		[
			h("label", [("for", "username")], [View::text("Username")]),
			h("input", [("type", "text"), ("id", "username"), ("value", username.as_str())], []),
			h("label", [("for", "email")], [View::text("Email")]),
			h("input", [("type", "email"), ("id", "email"), ("value", state.email.as_str())], []),
			h("label", [("for", "bio")], [View::text("Bio")]),
			h("textarea", [("id", "bio"), ("rows", "4")], [View::text(state.bio.as_str())]),
			h(
				"button",
				[("type", "submit"), ("class", "w-full bg-blue-600 text-white p-2 rounded")],
				[View::text("Update profile")],
			),
		],
	);
	layout(
		state,
		h(
			"main",
			[("class", "p-4")],
			[h(
				"div",
				[("class", "bg-white p-8 rounded-lg shadow-md")],
				[h("h2", [("class", "text-2xl font-bold mb-4")], [View::text("Profile")]), form],
			)],
		),
	)
}

/// Fallback for unregistered paths.
pub fn not_found_page(_state: &UserState) -> View {
	h(
		"main",
		[("class", "bg-gray-100 flex items-center justify-center min-h-screen")],
		[h(
			"div",
			[("class", "bg-white p-8 rounded-lg shadow-md text-center")],
			[
				h("h1", [("class", "text-4xl font-bold mb-4")], [View::text("404")]),
				h("p", [("class", "text-xl mb-8")], [View::text("Page not found")]),
				h(
					"a",
					[("href", HOME_PAGE), ("data-click", "navigate")],
					[View::text("Back to home")],
				),
			],
		)],
	)
}
