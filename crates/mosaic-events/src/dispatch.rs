//! Ancestor-walk dispatch.

use std::fmt;
use std::rc::Rc;

use crate::node::DomNode;
use crate::registry::HandlerRegistry;

/// Attribute prefix used when none is configured: `data-submit`, `data-click`, ...
pub const DEFAULT_ATTRIBUTE_PREFIX: &str = "data-";

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
	/// A declared handler was found and invoked.
	Handled {
		/// The handler name.
		handler: String,
	},
	/// An element declared a handler name nobody registered.
	UnknownHandler {
		/// The declared name.
		handler: String,
	},
	/// No element between the target and the root declared a handler.
	Unmatched,
}

impl DispatchOutcome {
	/// Returns `true` if a handler ran.
	pub fn is_handled(&self) -> bool {
		matches!(self, Self::Handled { .. })
	}
}

/// Resolves events to registered handlers by walking up from the target.
pub struct Delegator<E: 'static> {
	registry: Rc<HandlerRegistry<E>>,
	attribute_prefix: String,
}

impl<E: 'static> fmt::Debug for Delegator<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Delegator")
			.field("attribute_prefix", &self.attribute_prefix)
			.field("registry", &self.registry)
			.finish()
	}
}

impl<E: 'static> Delegator<E> {
	/// Creates a delegator reading `data-<event type>` attributes.
	pub fn new(registry: Rc<HandlerRegistry<E>>) -> Self {
		Self {
			registry,
			attribute_prefix: DEFAULT_ATTRIBUTE_PREFIX.to_string(),
		}
	}

	/// Overrides the attribute prefix.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.attribute_prefix = prefix.into();
		self
	}

	/// Returns the handler registry.
	pub fn registry(&self) -> &Rc<HandlerRegistry<E>> {
		&self.registry
	}

	/// Returns the attribute consulted for `event_type`.
	pub fn attribute_name(&self, event_type: &str) -> String {
		format!("{}{}", self.attribute_prefix, event_type)
	}

	/// Finds the nearest element from `target` up to `root` (inclusive) that
	/// declares a handler for `event_type`, returning the declared name.
	pub fn find_declaration<N: DomNode>(
		&self,
		event_type: &str,
		target: N,
		root: &N,
	) -> Option<String> {
		let attribute = self.attribute_name(event_type);
		let mut current = Some(target);
		while let Some(node) = current {
			if let Some(name) = node.attribute(&attribute) {
				return Some(name);
			}
			if node.same_node(root) {
				break;
			}
			current = node.parent();
		}
		None
	}

	/// Dispatches `event` of type `event_type` that originated at `target`.
	pub fn dispatch<N: DomNode>(
		&self,
		event_type: &str,
		target: N,
		root: &N,
		event: &E,
	) -> DispatchOutcome {
		let Some(name) = self.find_declaration(event_type, target, root) else {
			return DispatchOutcome::Unmatched;
		};

		match self.registry.get(&name) {
			Some(handler) => {
				tracing::debug!(event_type, handler = %name, "delegated event handled");
				handler(event);
				DispatchOutcome::Handled { handler: name }
			}
			None => {
				tracing::debug!(event_type, handler = %name, "no handler registered under declared name");
				DispatchOutcome::UnknownHandler { handler: name }
			}
		}
	}
}
