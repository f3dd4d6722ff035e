//! Browser tests for Runtime::launch
//!
//! Run with:
//!   wasm-pack test --chrome --headless

#![cfg(target_arch = "wasm32")]

use mosaic::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn create_root(id: &str) -> web_sys::Element {
	let document = web_sys::window().unwrap().document().unwrap();
	let root = document.create_element("div").unwrap();
	root.set_id(id);
	document.body().unwrap().append_child(&root).unwrap();
	root
}

#[wasm_bindgen_test]
fn test_launch_mounts_page_and_delegates_clicks() {
	let root = create_root("mosaic-runtime-root");
	let settings = RuntimeSettings::default().with_root_id("mosaic-runtime-root");
	let runtime: Runtime<u32, web_sys::Event> = Runtime::browser(settings, 0).unwrap();
	let clicks = Rc::new(Cell::new(0));

	runtime.page("/", |count| {
		h(
			"button",
			[("id", "counter"), ("data-click", "increment")],
			[View::text(count.to_string())],
		)
	});
	{
		let clicks = Rc::clone(&clicks);
		let runtime_for_handler = runtime.clone();
		runtime.on("increment", move |_: &web_sys::Event| {
			clicks.set(clicks.get() + 1);
			runtime_for_handler.store().update(|count| *count += 1).unwrap();
			runtime_for_handler.refresh().unwrap();
		});
	}

	// The test runner's own URL is not a registered route.
	runtime.router().replace("/").unwrap();
	let handle = runtime.launch().unwrap();
	assert_eq!(root.inner_html(), r#"<button id="counter" data-click="increment">0</button>"#);

	let button = root
		.query_selector("#counter")
		.unwrap()
		.unwrap()
		.dyn_into::<web_sys::HtmlElement>()
		.unwrap();
	button.click();

	assert_eq!(clicks.get(), 1);
	assert_eq!(root.inner_html(), r#"<button id="counter" data-click="increment">1</button>"#);

	drop(handle);
	root.remove();
}

#[wasm_bindgen_test]
fn test_browser_runtime_requires_root() {
	let settings = RuntimeSettings::default().with_root_id("mosaic-missing-root");
	let result = Runtime::<(), web_sys::Event>::browser(settings, ());
	assert!(matches!(result, Err(Error::Mount(_))));
}
