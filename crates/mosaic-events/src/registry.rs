//! Named handler registry.
//!
//! Handlers are looked up by the name written in the element's data
//! attribute. Registering a name twice replaces the earlier handler.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Shared delegated event handler.
pub type EventHandler<E> = Rc<dyn Fn(&E)>;

/// Maps handler names to handlers.
pub struct HandlerRegistry<E: 'static> {
	handlers: RefCell<HashMap<String, EventHandler<E>>>,
}

impl<E: 'static> Default for HandlerRegistry<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E: 'static> fmt::Debug for HandlerRegistry<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HandlerRegistry")
			.field("names", &self.names())
			.finish()
	}
}

impl<E: 'static> HandlerRegistry<E> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			handlers: RefCell::new(HashMap::new()),
		}
	}

	/// Registers `handler` under `name`.
	pub fn register<F>(&self, name: impl Into<String>, handler: F)
	where
		F: Fn(&E) + 'static,
	{
		let name = name.into();
		tracing::debug!(handler = %name, "delegated handler registered");
		self.handlers.borrow_mut().insert(name, Rc::new(handler));
	}

	/// Removes the handler registered under `name`.
	pub fn unregister(&self, name: &str) -> bool {
		self.handlers.borrow_mut().remove(name).is_some()
	}

	/// Returns the handler registered under `name`.
	pub fn get(&self, name: &str) -> Option<EventHandler<E>> {
		self.handlers.borrow().get(name).cloned()
	}

	/// Checks if `name` is registered.
	pub fn contains(&self, name: &str) -> bool {
		self.handlers.borrow().contains_key(name)
	}

	/// Returns the registered names in sorted order.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.handlers.borrow().keys().cloned().collect();
		names.sort();
		names
	}

	/// Returns the number of registered handlers.
	pub fn len(&self) -> usize {
		self.handlers.borrow().len()
	}

	/// Returns `true` if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.handlers.borrow().is_empty()
	}
}
