//! Delegated event dispatch for the Mosaic runtime.
//!
//! Instead of attaching a listener to every interactive element, the runtime
//! attaches one listener per event type to the application root. Elements
//! declare which handler they want through a data attribute:
//!
//! ```html
//! <form data-submit="post-submit"> ... </form>
//! <a href="/profile" data-click="navigate">Profile</a>
//! ```
//!
//! When an event reaches the root, the [`Delegator`] walks from the event
//! target up to the root, picks the nearest element carrying
//! `data-<event type>`, and calls the handler registered under that name in
//! the [`HandlerRegistry`]. Unknown handler names are ignored.
//!
//! The walk is written against the [`DomNode`] trait; `web_sys::Element`
//! implements it on wasm32, and tests supply their own node types.

#![warn(missing_docs)]

pub mod dispatch;
#[cfg(target_arch = "wasm32")]
mod listener;
pub mod node;
pub mod registry;

pub use dispatch::{DEFAULT_ATTRIBUTE_PREFIX, DispatchOutcome, Delegator};
#[cfg(target_arch = "wasm32")]
pub use listener::DelegatedListeners;
pub use node::DomNode;
pub use registry::{EventHandler, HandlerRegistry};

use thiserror::Error;

/// Errors raised while wiring delegated listeners.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
	/// The browser refused to add a listener.
	#[error("failed to attach '{event_type}' listener: {reason}")]
	Attach {
		/// The event type being attached.
		event_type: String,
		/// The browser's error message.
		reason: String,
	},
}
