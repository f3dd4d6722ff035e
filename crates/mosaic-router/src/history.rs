//! History API boundary.
//!
//! The router never touches `window.history` directly. It talks to a
//! [`History`] implementation:
//!
//! - [`BrowserHistory`] (wasm32 only) wraps `window.history` and
//!   `window.location`.
//! - [`MemoryHistory`] keeps an in-memory entry stack with back/forward
//!   support, used on native targets and in tests.
//!
//! Neither implementation ever reloads the page.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Errors reported by a [`History`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
	/// No browser window is available.
	#[error("browser history is unavailable")]
	Unavailable,
	/// The browser rejected the state change.
	#[error("history update to '{path}' was rejected: {reason}")]
	Rejected {
		/// The path that was being written.
		path: String,
		/// The browser's error message.
		reason: String,
	},
}

/// How a navigation writes to history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// Adds a new entry (`pushState`).
	Push,
	/// Rewrites the current entry (`replaceState`).
	Replace,
	/// Back/forward traversal; the current entry is normalised in place.
	Pop,
}

/// Session history as seen by the router.
pub trait History {
	/// Returns the path of the current entry.
	fn current_path(&self) -> String;

	/// Appends a new entry for `path` and makes it current.
	fn push_state(&self, path: &str) -> Result<(), HistoryError>;

	/// Rewrites the current entry to `path`.
	fn replace_state(&self, path: &str) -> Result<(), HistoryError>;
}

#[derive(Debug)]
struct MemoryEntries {
	entries: Vec<String>,
	index: usize,
}

/// In-memory session history.
///
/// Clones share the same entry stack, so a test can hand one clone to the
/// router and keep another to inspect or traverse.
#[derive(Clone)]
pub struct MemoryHistory {
	inner: Rc<RefCell<MemoryEntries>>,
}

impl fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("MemoryHistory")
			.field("entries", &inner.entries)
			.field("index", &inner.index)
			.finish()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a history with a single entry.
	pub fn new(initial_path: impl Into<String>) -> Self {
		Self {
			inner: Rc::new(RefCell::new(MemoryEntries {
				entries: vec![initial_path.into()],
				index: 0,
			})),
		}
	}

	/// Returns all entries, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.inner.borrow().entries.clone()
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.inner.borrow().entries.len()
	}

	/// Always `false`; a history has at least one entry.
	pub fn is_empty(&self) -> bool {
		self.inner.borrow().entries.is_empty()
	}

	/// Moves `delta` entries through the stack, like `history.go(delta)`.
	///
	/// Returns the new current path, or `None` (without moving) when the
	/// target lies outside the stack.
	pub fn go(&self, delta: isize) -> Option<String> {
		let mut inner = self.inner.borrow_mut();
		let target = inner.index.checked_add_signed(delta)?;
		let path = inner.entries.get(target)?.clone();
		inner.index = target;
		Some(path)
	}

	/// Moves one entry back.
	pub fn back(&self) -> Option<String> {
		self.go(-1)
	}

	/// Moves one entry forward.
	pub fn forward(&self) -> Option<String> {
		self.go(1)
	}
}

impl History for MemoryHistory {
	fn current_path(&self) -> String {
		let inner = self.inner.borrow();
		inner.entries[inner.index].clone()
	}

	fn push_state(&self, path: &str) -> Result<(), HistoryError> {
		let mut inner = self.inner.borrow_mut();
		let keep = inner.index + 1;
		inner.entries.truncate(keep);
		inner.entries.push(path.to_string());
		inner.index = keep;
		Ok(())
	}

	fn replace_state(&self, path: &str) -> Result<(), HistoryError> {
		let mut inner = self.inner.borrow_mut();
		let index = inner.index;
		inner.entries[index] = path.to_string();
		Ok(())
	}
}

/// `window.history` backed session history.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct BrowserHistory {
	window: web_sys::Window,
}

#[cfg(target_arch = "wasm32")]
impl BrowserHistory {
	/// Binds to the global window.
	pub fn new() -> Result<Self, HistoryError> {
		let window = web_sys::window().ok_or(HistoryError::Unavailable)?;
		Ok(Self { window })
	}

	/// Returns the bound window.
	pub fn window(&self) -> &web_sys::Window {
		&self.window
	}

	fn history(&self) -> Result<web_sys::History, HistoryError> {
		self.window.history().map_err(|_| HistoryError::Unavailable)
	}
}

#[cfg(target_arch = "wasm32")]
fn rejected(path: &str, err: wasm_bindgen::JsValue) -> HistoryError {
	HistoryError::Rejected {
		path: path.to_string(),
		reason: err.as_string().unwrap_or_else(|| format!("{:?}", err)),
	}
}

#[cfg(target_arch = "wasm32")]
impl History for BrowserHistory {
	fn current_path(&self) -> String {
		self.window
			.location()
			.pathname()
			.unwrap_or_else(|_| "/".to_string())
	}

	fn push_state(&self, path: &str) -> Result<(), HistoryError> {
		self.history()?
			.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
			.map_err(|err| rejected(path, err))
	}

	fn replace_state(&self, path: &str) -> Result<(), HistoryError> {
		self.history()?
			.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(path))
			.map_err(|err| rejected(path, err))
	}
}
