//! Paths and route guards

use crate::state::UserState;

pub const HOME_PAGE: &str = "/";
pub const LOGIN_PAGE: &str = "/login";
pub const PROFILE_PAGE: &str = "/profile";

/// Logged-in users have no business on the login page.
pub fn login_guard(state: &UserState, path: &str) -> String {
	if state.logged_in {
		HOME_PAGE.to_string()
	} else {
		path.to_string()
	}
}

/// The profile page needs a session.
pub fn profile_guard(state: &UserState, path: &str) -> String {
	if state.logged_in {
		path.to_string()
	} else {
		LOGIN_PAGE.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn state(logged_in: bool) -> UserState {
		let mut state = UserState::default();
		if logged_in {
			state.log_in("alice");
		}
		state
	}

	#[rstest]
	#[case(false, LOGIN_PAGE)]
	#[case(true, HOME_PAGE)]
	fn test_login_guard(#[case] logged_in: bool, #[case] expected: &str) {
		assert_eq!(login_guard(&state(logged_in), LOGIN_PAGE), expected);
	}

	#[rstest]
	#[case(false, LOGIN_PAGE)]
	#[case(true, PROFILE_PAGE)]
	fn test_profile_guard(#[case] logged_in: bool, #[case] expected: &str) {
		assert_eq!(profile_guard(&state(logged_in), PROFILE_PAGE), expected);
	}
}
