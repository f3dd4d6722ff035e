//! Application wiring

use mosaic::{Navigation, Runtime};

use crate::handlers::{self, AppEvent};
use crate::pages;
use crate::routes::{self, HOME_PAGE, LOGIN_PAGE, PROFILE_PAGE};
use crate::state::UserState;

/// The feed application on top of a runtime.
pub struct App<E: AppEvent + 'static> {
	runtime: Runtime<UserState, E>,
}

impl<E: AppEvent + 'static> App<E> {
	/// Registers pages, guards and handlers on `runtime`.
	pub fn new(runtime: Runtime<UserState, E>) -> Self {
		runtime.page(HOME_PAGE, pages::home_page);
		runtime.guarded_page(LOGIN_PAGE, pages::login_page, routes::login_guard);
		runtime.guarded_page(PROFILE_PAGE, pages::profile_page, routes::profile_guard);
		runtime.not_found_page(pages::not_found_page);
		handlers::register(&runtime);
		Self { runtime }
	}

	/// Returns the runtime.
	pub fn runtime(&self) -> &Runtime<UserState, E> {
		&self.runtime
	}

	/// Mounts the page for the current location.
	pub fn start(&self) -> mosaic::Result<Navigation> {
		self.runtime.start()
	}
}

#[cfg(target_arch = "wasm32")]
impl App<web_sys::Event> {
	/// Builds the application against the browser.
	pub fn browser(settings: mosaic::RuntimeSettings) -> mosaic::Result<Self> {
		let runtime = Runtime::browser(settings, UserState::with_sample_posts())?;
		Ok(Self::new(runtime))
	}

	/// Attaches listeners and mounts the first page.
	pub fn launch(&self) -> mosaic::Result<mosaic::RuntimeHandle> {
		self.runtime.launch()
	}
}
