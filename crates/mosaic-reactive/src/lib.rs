//! Mosaic Reactive - Observer and Store primitives
//!
//! This crate provides the two state primitives of the Mosaic runtime:
//!
//! - [`Observer`]: an ordered list of zero-argument callbacks plus a
//!   synchronous "notify all" operation.
//! - [`Store`]: a state container that owns a value and an embedded
//!   [`Observer`], replacing the value and notifying subscribers on every
//!   update.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) and runs to completion
//! on the caller's stack. There is no batching and no scheduler: a subscriber
//! has already run by the time `notify` or `set_state` returns.
//!
//! ## Example
//!
//! ```
//! use mosaic_reactive::Store;
//!
//! #[derive(Clone, Default)]
//! struct Session {
//!     username: Option<String>,
//! }
//!
//! let store = Store::new(Session::default());
//! store.subscribe(|| println!("session changed"));
//!
//! store
//!     .set_state(|_| Session { username: Some("alice".into()) })
//!     .unwrap();
//! assert_eq!(store.get_state().username.as_deref(), Some("alice"));
//! ```

#![warn(missing_docs)]

pub mod observer;
pub mod store;

pub use observer::{Observer, SubscriberError, Subscription};
pub use store::{Store, StoreError};
