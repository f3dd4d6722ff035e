//! View trees and the mount boundary.
//!
//! Page handlers describe their markup as a [`View`] tree and hand it to a
//! [`Mount`], which makes it visible in the DOM before the handler returns.
//! The tree is deliberately simple: elements with ordered attributes and
//! children, text, and fragments. There is no diffing; mounting replaces the
//! root's content.
//!
//! ```
//! use mosaic::view::{View, h};
//!
//! let view = h(
//!     "form",
//!     [("id", "post-form"), ("data-submit", "post-submit")],
//!     [h("textarea", [("id", "post-content")], []), View::text("<Post>")],
//! );
//! assert_eq!(
//!     view.render_to_string(),
//!     r#"<form id="post-form" data-submit="post-submit"><textarea id="post-content"></textarea>&lt;Post&gt;</form>"#,
//! );
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// A renderable node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
	/// An element with attributes and children.
	Element(ElementView),
	/// A text node.
	Text(String),
	/// Several sibling nodes without a wrapper.
	Fragment(Vec<View>),
	/// Nothing.
	#[default]
	Empty,
}

/// An element node under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
	tag: String,
	attrs: Vec<(String, String)>,
	children: Vec<View>,
}

impl ElementView {
	/// Creates an element with no attributes or children.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Adds an attribute. Attributes render in insertion order.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds an attribute when `condition` holds.
	pub fn attr_if(self, condition: bool, name: impl Into<String>, value: impl Into<String>) -> Self {
		if condition { self.attr(name, value) } else { self }
	}

	/// Appends a child.
	pub fn child(mut self, child: impl Into<View>) -> Self {
		self.children.push(child.into());
		self
	}

	/// Appends several children.
	pub fn children<I>(mut self, children: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<View>,
	{
		self.children.extend(children.into_iter().map(Into::into));
		self
	}

	/// Returns the tag name.
	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Returns the value of attribute `name`.
	pub fn get_attr(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Converts into a [`View`].
	pub fn into_view(self) -> View {
		View::Element(self)
	}
}

impl From<ElementView> for View {
	fn from(element: ElementView) -> Self {
		View::Element(element)
	}
}

impl From<&str> for View {
	fn from(text: &str) -> Self {
		View::Text(text.to_string())
	}
}

impl From<String> for View {
	fn from(text: String) -> Self {
		View::Text(text)
	}
}

impl<T: Into<View>> From<Option<T>> for View {
	fn from(view: Option<T>) -> Self {
		view.map_or(View::Empty, Into::into)
	}
}

/// Builds an element from a tag, properties and children.
pub fn h<P, K, V, C>(tag: &str, props: P, children: C) -> View
where
	P: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<String>,
	C: IntoIterator<Item = View>,
{
	let element = props
		.into_iter()
		.fold(ElementView::new(tag), |element, (key, value)| {
			element.attr(key, value)
		});
	element.children(children).into_view()
}

impl View {
	/// Creates a text node.
	pub fn text(text: impl Into<String>) -> Self {
		View::Text(text.into())
	}

	/// Starts an element.
	pub fn element(tag: impl Into<String>) -> ElementView {
		ElementView::new(tag)
	}

	/// Creates a fragment.
	pub fn fragment<I>(children: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<View>,
	{
		View::Fragment(children.into_iter().map(Into::into).collect())
	}

	/// Serialises the tree to HTML, escaping text and attribute values.
	pub fn render_to_string(&self) -> String {
		let mut out = String::new();
		self.write_html(&mut out);
		out
	}

	fn write_html(&self, out: &mut String) {
		match self {
			View::Element(element) => {
				out.push('<');
				out.push_str(&element.tag);
				for (name, value) in &element.attrs {
					out.push(' ');
					out.push_str(name);
					out.push_str("=\"");
					escape_into(value, out);
					out.push('"');
				}
				out.push('>');
				if VOID_ELEMENTS.contains(&element.tag.as_str()) {
					return;
				}
				for child in &element.children {
					child.write_html(out);
				}
				out.push_str("</");
				out.push_str(&element.tag);
				out.push('>');
			}
			View::Text(text) => escape_into(text, out),
			View::Fragment(children) => {
				for child in children {
					child.write_html(out);
				}
			}
			View::Empty => {}
		}
	}
}

impl fmt::Display for View {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render_to_string())
	}
}

fn escape_into(text: &str, out: &mut String) {
	for ch in text.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#x27;"),
			other => out.push(other),
		}
	}
}

/// Errors raised while mounting a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
	/// No browser document is available.
	#[error("document is unavailable")]
	Unavailable,
	/// The configured root element does not exist.
	#[error("mount root '#{0}' not found")]
	RootNotFound(String),
}

/// Makes a view visible.
pub trait Mount {
	/// Replaces the mounted content with `view`.
	fn mount(&self, view: &View) -> Result<(), MountError>;
}

/// Records mounted HTML instead of touching a DOM.
#[derive(Debug, Clone, Default)]
pub struct MemoryMount {
	html: Rc<RefCell<String>>,
	mounts: Rc<Cell<usize>>,
}

impl MemoryMount {
	/// Creates an empty mount.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the last mounted HTML.
	pub fn html(&self) -> String {
		self.html.borrow().clone()
	}

	/// Returns how many times a view was mounted.
	pub fn mount_count(&self) -> usize {
		self.mounts.get()
	}
}

impl Mount for MemoryMount {
	fn mount(&self, view: &View) -> Result<(), MountError> {
		*self.html.borrow_mut() = view.render_to_string();
		self.mounts.set(self.mounts.get() + 1);
		Ok(())
	}
}

/// Mounts by replacing the root element's `innerHTML`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct InnerHtmlMount {
	root: web_sys::Element,
}

#[cfg(target_arch = "wasm32")]
impl InnerHtmlMount {
	/// Wraps an existing root element.
	pub fn new(root: web_sys::Element) -> Self {
		Self { root }
	}

	/// Looks up the root element by id.
	pub fn from_id(root_id: &str) -> Result<Self, MountError> {
		let document = web_sys::window()
			.and_then(|window| window.document())
			.ok_or(MountError::Unavailable)?;
		let root = document
			.get_element_by_id(root_id)
			.ok_or_else(|| MountError::RootNotFound(root_id.to_string()))?;
		Ok(Self { root })
	}

	/// Returns the root element.
	pub fn root(&self) -> &web_sys::Element {
		&self.root
	}
}

#[cfg(target_arch = "wasm32")]
impl Mount for InnerHtmlMount {
	fn mount(&self, view: &View) -> Result<(), MountError> {
		self.root.set_inner_html(&view.render_to_string());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_text_is_escaped() {
		let view = View::text("<script>alert('x')</script> & \"q\"");
		assert_eq!(
			view.render_to_string(),
			"&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt; &amp; &quot;q&quot;"
		);
	}

	#[rstest]
	fn test_attribute_values_are_escaped() {
		let view = View::element("a").attr("title", "\"quoted\"").into_view();
		assert_eq!(view.render_to_string(), r#"<a title="&quot;quoted&quot;"></a>"#);
	}

	#[rstest]
	fn test_void_elements_have_no_closing_tag() {
		let view = View::element("input")
			.attr("type", "text")
			.child("ignored")
			.into_view();
		assert_eq!(view.render_to_string(), r#"<input type="text">"#);
	}

	#[rstest]
	fn test_fragment_and_empty() {
		let view = View::fragment([View::text("a"), View::Empty, View::text("b")]);
		assert_eq!(view.render_to_string(), "ab");
		assert_eq!(View::default().render_to_string(), "");
	}

	#[rstest]
	fn test_option_child() {
		let shown: Option<View> = Some(View::text("yes"));
		let hidden: Option<View> = None;
		let view = View::element("div").child(shown).child(hidden).into_view();
		assert_eq!(view.render_to_string(), "<div>yes</div>");
	}

	#[rstest]
	fn test_attr_if_and_get_attr() {
		let element = View::element("button")
			.attr_if(true, "disabled", "disabled")
			.attr_if(false, "hidden", "hidden");
		assert_eq!(element.get_attr("disabled"), Some("disabled"));
		assert_eq!(element.get_attr("hidden"), None);
		assert_eq!(element.tag(), "button");
	}

	#[rstest]
	fn test_display_matches_render() {
		let view = h("p", [("class", "lead")], [View::text("hi")]);
		assert_eq!(view.to_string(), r#"<p class="lead">hi</p>"#);
	}

	#[rstest]
	fn test_memory_mount_records_last_view() {
		let mount = MemoryMount::new();
		mount.mount(&View::text("first")).unwrap();
		mount.mount(&View::text("second")).unwrap();
		assert_eq!(mount.html(), "second");
		assert_eq!(mount.mount_count(), 2);
	}
}
