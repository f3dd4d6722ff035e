//! Route guards.
//!
//! A guard maps the requested path to the effective path. Returning the
//! requested path unchanged lets the navigation through; returning any other
//! path redirects it. Guards only read shared state and never fail: a guard
//! that cannot decide should redirect to a public path.

use std::rc::Rc;

/// Shared guard function.
pub type Guard = Rc<dyn Fn(&str) -> String>;

/// Redirects to `target` while `condition` holds.
///
/// ```
/// use mosaic_router::guard::redirect_if;
///
/// let logged_in = true;
/// let guard = redirect_if(move || logged_in, "/");
/// assert_eq!(guard("/login"), "/");
/// ```
pub fn redirect_if<C>(condition: C, target: impl Into<String>) -> impl Fn(&str) -> String + 'static
where
	C: Fn() -> bool + 'static,
{
	let target = target.into();
	move |requested: &str| {
		if condition() {
			target.clone()
		} else {
			requested.to_string()
		}
	}
}

/// Redirects to `target` unless `condition` holds.
pub fn redirect_unless<C>(
	condition: C,
	target: impl Into<String>,
) -> impl Fn(&str) -> String + 'static
where
	C: Fn() -> bool + 'static,
{
	redirect_if(move || !condition(), target)
}
