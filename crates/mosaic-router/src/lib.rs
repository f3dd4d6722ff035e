//! Client-side routing for the Mosaic runtime.
//!
//! The router maps exact paths to page handlers, optionally guarded by a
//! function that may redirect the navigation. It keeps the browser URL in
//! sync through the [`History`] boundary.
//!
//! ## Navigation
//!
//! ```
//! use mosaic_router::{MemoryHistory, Outcome, Router};
//!
//! let history = MemoryHistory::new("/");
//! let logged_in = false;
//!
//! let router = Router::new(history.clone())
//!     .route("/", || {})
//!     .guarded_route("/profile", || {}, move |path: &str| {
//!         if logged_in { path.to_string() } else { "/login".to_string() }
//!     })
//!     .route("/login", || {});
//!
//! let navigation = router.push("/profile").unwrap();
//! assert_eq!(navigation.outcome, Outcome::Matched);
//! assert_eq!(history.entries(), vec!["/", "/login"]);
//! ```
//!
//! ## Sharp edges
//!
//! - Unregistered requested paths run the not-found handler and leave
//!   history untouched.
//! - A guard that redirects to an unregistered path still updates history
//!   before the not-found handler runs.

#![warn(missing_docs)]

mod core;
pub mod guard;
pub mod history;
#[cfg(target_arch = "wasm32")]
mod popstate;

pub use self::core::{
	MAX_QUEUED_NAVIGATIONS, NOT_FOUND_PATH, Navigation, Outcome, ReentrancyPolicy, Route,
	RouteHandler, Router, RouterError,
};
pub use guard::{Guard, redirect_if, redirect_unless};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{History, HistoryError, MemoryHistory, NavigationType};
#[cfg(target_arch = "wasm32")]
pub use popstate::PopStateListener;
