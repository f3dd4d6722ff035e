//! Browser tests for BrowserHistory and the popstate binding
//!
//! Run with:
//!   wasm-pack test --chrome --headless crates/mosaic-router

#![cfg(target_arch = "wasm32")]

use mosaic_router::{BrowserHistory, History, Outcome, PopStateListener, Router, redirect_if};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn test_browser_history_push_and_replace() {
	let history = BrowserHistory::new().expect("window available");

	history.push_state("/mosaic-a").unwrap();
	assert_eq!(history.current_path(), "/mosaic-a");

	history.replace_state("/mosaic-b").unwrap();
	assert_eq!(history.current_path(), "/mosaic-b");
}

#[wasm_bindgen_test]
fn test_browser_router_redirects_through_guard() {
	let visits = Rc::new(Cell::new(0));
	let router = {
		let visits = Rc::clone(&visits);
		Router::browser()
			.unwrap()
			.route("/", move || visits.set(visits.get() + 1))
			.guarded_route("/login", || {}, redirect_if(|| true, "/"))
	};

	let navigation = router.push("/login").unwrap();

	assert_eq!(navigation.outcome, Outcome::Matched);
	assert_eq!(router.current_path(), "/");
	assert_eq!(visits.get(), 1);
}

#[wasm_bindgen_test]
fn test_popstate_listener_attaches_and_detaches() {
	let router = Rc::new(Router::browser().unwrap().route("/", || {}));
	let listener = PopStateListener::attach(&router).unwrap();
	drop(listener);
	assert!(!router.is_navigating());
}
