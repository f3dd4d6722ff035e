//! Back/forward binding.
//!
//! [`PopStateListener`] attaches a `popstate` listener to the window that
//! feeds every traversal back into [`Router::handle_popstate`]. The listener
//! holds a weak reference to the router and is removed when dropped.

use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::core::Router;
use super::history::HistoryError;

/// Live `popstate` listener.
pub struct PopStateListener {
	window: web_sys::Window,
	closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl std::fmt::Debug for PopStateListener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PopStateListener").finish_non_exhaustive()
	}
}

impl PopStateListener {
	/// Starts forwarding `popstate` events to `router`.
	pub fn attach(router: &Rc<Router>) -> Result<Self, HistoryError> {
		let window = web_sys::window().ok_or(HistoryError::Unavailable)?;
		let router: Weak<Router> = Rc::downgrade(router);

		let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
			let Some(router) = router.upgrade() else {
				return;
			};
			if let Err(err) = router.handle_popstate() {
				tracing::error!(error = %err, "popstate navigation failed");
			}
		});

		window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			.map_err(|err| HistoryError::Rejected {
				path: String::new(),
				reason: format!("{:?}", err),
			})?;

		Ok(Self { window, closure })
	}
}

impl Drop for PopStateListener {
	fn drop(&mut self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("popstate", self.closure.as_ref().unchecked_ref());
	}
}
