//! Delegated event handlers
//!
//! Handlers are registered by name and found through the `data-submit` /
//! `data-click` declarations in [`crate::pages`]. They talk to the page
//! through [`AppEvent`] so the same code runs against `web_sys::Event` in
//! the browser and an in-memory event in tests.

use std::rc::Rc;

use mosaic::{Router, Runtime, Store, error_log, warn_log};

use crate::routes::{HOME_PAGE, LOGIN_PAGE};
use crate::state::UserState;

/// What a handler needs from the event that triggered it.
pub trait AppEvent {
	/// Cancels the browser's default action (form submission, link follow).
	fn prevent_default(&self);

	/// Current value of the form control with id `id`.
	fn field_value(&self, id: &str) -> Option<String>;

	/// `href` of the nearest link enclosing the event target.
	fn link_target(&self) -> Option<String>;
}

#[cfg(target_arch = "wasm32")]
impl AppEvent for web_sys::Event {
	fn prevent_default(&self) {
		web_sys::Event::prevent_default(self);
	}

	fn field_value(&self, id: &str) -> Option<String> {
		use wasm_bindgen::JsCast;

		let element = web_sys::window()?.document()?.get_element_by_id(id)?;
		if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
			return Some(input.value());
		}
		element
			.dyn_ref::<web_sys::HtmlTextAreaElement>()
			.map(|textarea| textarea.value())
	}

	fn link_target(&self) -> Option<String> {
		use wasm_bindgen::JsCast;

		let node = self.target()?.dyn_into::<web_sys::Node>().ok()?;
		let element = match node.dyn_into::<web_sys::Element>() {
			Ok(element) => element,
			Err(node) => node.parent_element()?,
		};
		element.closest("[href]").ok()??.get_attribute("href")
	}
}

fn report(handler: &str, result: mosaic::Result<()>) {
	if let Err(err) = result {
		error_log!("handler '{}' failed: {}", handler, err);
	}
}

fn refresh(router: &Router) -> mosaic::Result<()> {
	router.replace(&router.current_path())?;
	Ok(())
}

fn login_submit<E: AppEvent>(store: &Store<UserState>, router: &Router, event: &E) -> mosaic::Result<()> {
	event.prevent_default();
	let username = event.field_value("username").unwrap_or_default();
	let username = username.trim();
	if username.is_empty() {
		warn_log!("login submitted without a username");
		return Ok(());
	}
	store.update(|state| state.log_in(username))?;
	router.push(HOME_PAGE)?;
	Ok(())
}

fn logout<E: AppEvent>(store: &Store<UserState>, router: &Router, event: &E) -> mosaic::Result<()> {
	event.prevent_default();
	store.update(UserState::log_out)?;
	router.push(LOGIN_PAGE)?;
	Ok(())
}

fn post_submit<E: AppEvent>(store: &Store<UserState>, router: &Router, event: &E) -> mosaic::Result<()> {
	event.prevent_default();
	let content = event.field_value("post-content").unwrap_or_default();
	let content = content.trim();
	if content.is_empty() {
		return Ok(());
	}
	let mut added = false;
	store.update(|state| added = state.add_post(content))?;
	if !added {
		warn_log!("post submitted without a session");
		return Ok(());
	}
	refresh(router)
}

fn profile_submit<E: AppEvent>(store: &Store<UserState>, router: &Router, event: &E) -> mosaic::Result<()> {
	event.prevent_default();
	let username = event.field_value("username").unwrap_or_default();
	let email = event.field_value("email").unwrap_or_default();
	let bio = event.field_value("bio").unwrap_or_default();
	store.update(|state| {
		let username = username.trim();
		if !username.is_empty() {
			state.username = Some(username.to_string());
		}
		state.email = email.trim().to_string();
		state.bio = bio;
	})?;
	refresh(router)
}

fn navigate<E: AppEvent>(router: &Router, event: &E) -> mosaic::Result<()> {
	let Some(href) = event.link_target() else {
		return Ok(());
	};
	event.prevent_default();
	router.push(&href)?;
	Ok(())
}

/// Registers every handler the pages declare.
pub fn register<E: AppEvent + 'static>(runtime: &Runtime<UserState, E>) {
	let store = runtime.store();
	let router = runtime.router();

	macro_rules! on_submit {
		($name:literal, $handler:ident) => {{
			let store = store.clone();
			let router = Rc::clone(router);
			runtime.on($name, move |event: &E| {
				report($name, $handler(&store, &router, event));
			});
		}};
	}

	on_submit!("login-submit", login_submit);
	on_submit!("logout", logout);
	on_submit!("post-submit", post_submit);
	on_submit!("profile-submit", profile_submit);

	let router = Rc::clone(router);
	runtime.on("navigate", move |event: &E| {
		report("navigate", navigate(&router, event));
	});
}
