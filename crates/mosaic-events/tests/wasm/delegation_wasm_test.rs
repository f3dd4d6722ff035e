//! Browser tests for delegated listeners
//!
//! Run with:
//!   wasm-pack test --chrome --headless crates/mosaic-events

#![cfg(target_arch = "wasm32")]

use mosaic_events::{DelegatedListeners, Delegator, HandlerRegistry};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mount_fixture() -> (web_sys::Element, web_sys::HtmlElement) {
	let document = web_sys::window().unwrap().document().unwrap();
	let root = document.create_element("div").unwrap();
	root.set_inner_html(
		r#"<form data-submit="post-submit"><div><button id="post-submit" type="submit">Post</button></div></form>"#,
	);
	document.body().unwrap().append_child(&root).unwrap();
	let button = root
		.query_selector("#post-submit")
		.unwrap()
		.unwrap()
		.dyn_into::<web_sys::HtmlElement>()
		.unwrap();
	(root, button)
}

#[wasm_bindgen_test]
fn test_bubbling_event_reaches_declared_handler() {
	let (root, button) = mount_fixture();
	let registry = Rc::new(HandlerRegistry::<web_sys::Event>::new());
	let hits = Rc::new(Cell::new(0));
	{
		let hits = Rc::clone(&hits);
		registry.register("post-submit", move |event: &web_sys::Event| {
			event.prevent_default();
			hits.set(hits.get() + 1);
		});
	}
	let delegator = Rc::new(Delegator::new(registry).with_prefix("data-"));
	let _listeners = DelegatedListeners::attach(&root, delegator, &["submit"]).unwrap();

	let init = web_sys::EventInit::new();
	init.set_bubbles(true);
	init.set_cancelable(true);
	let event = web_sys::Event::new_with_event_init_dict("submit", &init).unwrap();
	button.dispatch_event(&event).unwrap();

	assert_eq!(hits.get(), 1);
	root.remove();
}

#[wasm_bindgen_test]
fn test_dropping_listeners_detaches_them() {
	let (root, button) = mount_fixture();
	let registry = Rc::new(HandlerRegistry::<web_sys::Event>::new());
	let hits = Rc::new(Cell::new(0));
	{
		let hits = Rc::clone(&hits);
		registry.register("post-submit", move |_: &web_sys::Event| hits.set(hits.get() + 1));
	}
	let listeners =
		DelegatedListeners::attach(&root, Rc::new(Delegator::new(registry)), &["submit"]).unwrap();
	assert_eq!(listeners.event_types(), vec!["submit"]);
	drop(listeners);

	let init = web_sys::EventInit::new();
	init.set_bubbles(true);
	let event = web_sys::Event::new_with_event_init_dict("submit", &init).unwrap();
	button.dispatch_event(&event).unwrap();

	assert_eq!(hits.get(), 0);
	root.remove();
}
