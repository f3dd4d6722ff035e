//! DOM abstraction used by the ancestor walk.

/// The slice of a DOM element the delegated dispatcher needs.
pub trait DomNode: Sized {
	/// Returns the value of attribute `name`, if present.
	fn attribute(&self, name: &str) -> Option<String>;

	/// Returns the parent element, if any.
	fn parent(&self) -> Option<Self>;

	/// Returns `true` if both handles refer to the same element.
	fn same_node(&self, other: &Self) -> bool;
}

#[cfg(target_arch = "wasm32")]
impl DomNode for web_sys::Element {
	fn attribute(&self, name: &str) -> Option<String> {
		self.get_attribute(name)
	}

	fn parent(&self) -> Option<Self> {
		self.parent_element()
	}

	fn same_node(&self, other: &Self) -> bool {
		let other: &web_sys::Node = other;
		self.is_same_node(Some(other))
	}
}
