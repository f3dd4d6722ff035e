//! Runtime-level error type.

use thiserror::Error;

use crate::settings::SettingsError;
use crate::view::MountError;
use mosaic_events::DispatchError;
use mosaic_reactive::StoreError;
use mosaic_router::{HistoryError, RouterError};

/// Any error surfaced by the runtime.
#[derive(Debug, Error)]
pub enum Error {
	/// Navigation failed.
	#[error(transparent)]
	Router(#[from] RouterError),
	/// A store update failed.
	#[error(transparent)]
	Store(#[from] StoreError),
	/// Delegated listeners could not be attached.
	#[error(transparent)]
	Dispatch(#[from] DispatchError),
	/// A view could not be mounted.
	#[error(transparent)]
	Mount(#[from] MountError),
	/// Settings were invalid.
	#[error(transparent)]
	Settings(#[from] SettingsError),
	/// The history boundary failed outside a navigation.
	#[error(transparent)]
	History(#[from] HistoryError),
}

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;
