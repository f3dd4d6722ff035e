//! # Mosaic
//!
//! A minimal client-side runtime for single-page applications compiled to
//! WebAssembly.
//!
//! Mosaic gives a page four things and nothing more:
//!
//! - **Observer / Store**: an application state container that notifies
//!   subscribers after every update (`mosaic-reactive`)
//! - **Router**: path-keyed routes with optional guards, kept in sync with
//!   the browser History API (`mosaic-router`)
//! - **Delegated events**: one listener per event type on the root element,
//!   dispatching to named handlers declared through `data-<event>` attributes
//!   (`mosaic-events`)
//! - **Runtime**: the context object that ties the three together with a
//!   mount target and settings
//!
//! There is no virtual DOM. Pages build a [`View`] tree which replaces the
//! root's content when mounted, and a store update only re-renders when the
//! application asks for it.
//!
//! ## Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `mosaic-reactive` | [`Observer`], [`Store`] |
//! | `mosaic-router` | [`Router`], guards, [`History`] implementations |
//! | `mosaic-events` | [`HandlerRegistry`], [`Delegator`], DOM listeners |
//!
//! ## Feature Flags
//!
//! - `console_error_panic_hook` - install readable panic messages in the
//!   browser console when [`Runtime::launch`] runs (wasm32 only)
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use mosaic::prelude::*;
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     logged_in: bool,
//! }
//!
//! let runtime = Runtime::browser(RuntimeSettings::default(), AppState::default())?;
//! runtime.page("/", |_| View::text("Home"));
//! runtime.guarded_page(
//!     "/login",
//!     |_| View::text("Login"),
//!     |state, path| if state.logged_in { "/".into() } else { path.into() },
//! );
//! runtime.launch()?.forget();
//! ```

pub mod error;
pub mod logging;
pub mod runtime;
pub mod settings;
pub mod view;

pub use error::{Error, Result};
pub use runtime::Runtime;
#[cfg(target_arch = "wasm32")]
pub use runtime::RuntimeHandle;
pub use settings::{RuntimeSettings, SettingsError};
pub use view::{ElementView, MemoryMount, Mount, MountError, View, h};
#[cfg(target_arch = "wasm32")]
pub use view::InnerHtmlMount;

pub use mosaic_events::{
	DEFAULT_ATTRIBUTE_PREFIX, Delegator, DispatchError, DispatchOutcome, DomNode, EventHandler,
	HandlerRegistry,
};
#[cfg(target_arch = "wasm32")]
pub use mosaic_events::DelegatedListeners;
pub use mosaic_reactive::{Observer, Store, StoreError, SubscriberError, Subscription};
pub use mosaic_router::{
	Guard, History, HistoryError, MemoryHistory, NOT_FOUND_PATH, Navigation, NavigationType,
	Outcome, ReentrancyPolicy, Route, RouteHandler, Router, RouterError, redirect_if,
	redirect_unless,
};
#[cfg(target_arch = "wasm32")]
pub use mosaic_router::{BrowserHistory, PopStateListener};

// Used by the logging macros.
#[doc(hidden)]
pub use tracing as __tracing;
#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub use web_sys as __web_sys;

/// Re-exports for application code.
pub mod prelude {
	pub use crate::{
		Error,
		History,
		MemoryHistory,
		MemoryMount,
		Mount,
		Navigation,
		Outcome,
		ReentrancyPolicy,
		Router,
		Runtime,
		RuntimeSettings,
		Store,
		View,
		h,
		redirect_if,
		redirect_unless,
	};

	#[cfg(target_arch = "wasm32")]
	pub use crate::{BrowserHistory, InnerHtmlMount, RuntimeHandle};

	pub use crate::{debug_log, error_log, info_log, warn_log};
}
