//! Native listener wiring on the application root.

use std::fmt;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::DispatchError;
use crate::dispatch::Delegator;

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// One listener per event type on the root element.
///
/// Dropping the value removes every listener it added.
pub struct DelegatedListeners {
	root: web_sys::Element,
	listeners: Vec<(String, Listener)>,
}

impl fmt::Debug for DelegatedListeners {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let event_types: Vec<&str> = self.listeners.iter().map(|(t, _)| t.as_str()).collect();
		f.debug_struct("DelegatedListeners")
			.field("event_types", &event_types)
			.finish()
	}
}

/// Resolves the element an event started from. Text nodes map to their
/// parent element.
fn target_element(event: &web_sys::Event) -> Option<web_sys::Element> {
	let target = event.target()?;
	match target.dyn_into::<web_sys::Element>() {
		Ok(element) => Some(element),
		Err(target) => target
			.dyn_into::<web_sys::Node>()
			.ok()
			.and_then(|node| node.parent_element()),
	}
}

impl DelegatedListeners {
	/// Attaches one listener for each of `event_types` to `root`.
	pub fn attach<S: AsRef<str>>(
		root: &web_sys::Element,
		delegator: Rc<Delegator<web_sys::Event>>,
		event_types: &[S],
	) -> Result<Self, DispatchError> {
		let mut attached = Self {
			root: root.clone(),
			listeners: Vec::with_capacity(event_types.len()),
		};

		for event_type in event_types {
			let event_type = event_type.as_ref().to_string();
			let listener = {
				let delegator = Rc::clone(&delegator);
				let root = root.clone();
				let event_type = event_type.clone();
				Listener::new(move |event: web_sys::Event| {
					if let Some(target) = target_element(&event) {
						delegator.dispatch(&event_type, target, &root, &event);
					}
				})
			};

			// On failure `attached` is dropped, removing the listeners added so far.
			root.add_event_listener_with_callback(&event_type, listener.as_ref().unchecked_ref())
				.map_err(|err| DispatchError::Attach {
					event_type: event_type.clone(),
					reason: err.as_string().unwrap_or_else(|| format!("{:?}", err)),
				})?;
			attached.listeners.push((event_type, listener));
		}

		tracing::debug!(count = attached.listeners.len(), "delegated listeners attached");
		Ok(attached)
	}

	/// Returns the event types being listened to.
	pub fn event_types(&self) -> Vec<String> {
		self.listeners.iter().map(|(t, _)| t.clone()).collect()
	}
}

impl Drop for DelegatedListeners {
	fn drop(&mut self) {
		for (event_type, listener) in &self.listeners {
			let _ = self
				.root
				.remove_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref());
		}
	}
}
