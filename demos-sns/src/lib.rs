//! Mosaic Feed
//!
//! A small social feed: a home timeline, a login page, and a profile page
//! that needs a session. It exercises every part of the runtime: guarded
//! routes, a store read by every page, and delegated form and link handlers.

pub mod app;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;

pub use app::App;
pub use handlers::AppEvent;
pub use state::{Post, UserState};

#[cfg(target_arch = "wasm32")]
mod entry {
	use mosaic::RuntimeSettings;
	use wasm_bindgen::prelude::*;

	use crate::App;

	/// `id` of the optional `<script type="application/json">` block holding
	/// runtime settings.
	const SETTINGS_ELEMENT_ID: &str = "mosaic-settings";

	fn page_settings() -> Result<RuntimeSettings, JsValue> {
		let embedded = web_sys::window()
			.and_then(|window| window.document())
			.and_then(|document| document.get_element_by_id(SETTINGS_ELEMENT_ID))
			.and_then(|element| element.text_content());
		match embedded {
			Some(json) => RuntimeSettings::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string())),
			None => Ok(RuntimeSettings::default()),
		}
	}

	#[wasm_bindgen(start)]
	pub fn main() -> Result<(), JsValue> {
		let settings = page_settings()?;
		let app = App::browser(settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
		app.launch()
			.map_err(|e| JsValue::from_str(&e.to_string()))?
			.forget();
		// The application lives until the page unloads.
		std::mem::forget(app);
		Ok(())
	}
}
