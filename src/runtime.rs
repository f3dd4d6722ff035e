//! Runtime context.
//!
//! A [`Runtime`] bundles the one router, the application store, the delegated
//! handler registry and the mount target of an application session. It is
//! constructed explicitly at start-up and cloned into whatever needs it;
//! nothing in the runtime lives in a global.
//!
//! Page builders receive the store state by reference and return a
//! [`View`]. Store changes do not re-render anything by themselves: call
//! [`Runtime::refresh`] (or navigate) to rebuild the current page.

use std::fmt;
use std::rc::Rc;

use mosaic_events::{Delegator, DispatchOutcome, DomNode, HandlerRegistry};
use mosaic_reactive::Store;
use mosaic_router::{History, Navigation, Router};

use crate::error::Result;
use crate::settings::RuntimeSettings;
use crate::view::{Mount, View};

/// Application session context.
pub struct Runtime<S: 'static, E: 'static> {
	router: Rc<Router>,
	store: Store<S>,
	handlers: Rc<HandlerRegistry<E>>,
	mount: Rc<dyn Mount>,
	settings: Rc<RuntimeSettings>,
}

impl<S: 'static, E: 'static> Clone for Runtime<S, E> {
	fn clone(&self) -> Self {
		Self {
			router: Rc::clone(&self.router),
			store: self.store.clone(),
			handlers: Rc::clone(&self.handlers),
			mount: Rc::clone(&self.mount),
			settings: Rc::clone(&self.settings),
		}
	}
}

impl<S: 'static, E: 'static> fmt::Debug for Runtime<S, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Runtime")
			.field("router", &self.router)
			.field("handlers", &self.handlers)
			.field("settings", &self.settings)
			.finish_non_exhaustive()
	}
}

fn mount_or_log(mount: &dyn Mount, view: &View) {
	if let Err(err) = mount.mount(view) {
		crate::error_log!("failed to mount page: {}", err);
	}
}

impl<S: 'static, E: 'static> Runtime<S, E> {
	/// Creates a runtime from validated settings, a history, a mount target
	/// and the initial store state.
	pub fn new(
		settings: RuntimeSettings,
		history: impl History + 'static,
		mount: impl Mount + 'static,
		initial_state: S,
	) -> Result<Self> {
		settings.validate()?;
		let router = Router::new(history).with_policy(settings.reentrancy);
		Ok(Self {
			router: Rc::new(router),
			store: Store::new(initial_state),
			handlers: Rc::new(HandlerRegistry::new()),
			mount: Rc::new(mount),
			settings: Rc::new(settings),
		})
	}

	/// Returns the router.
	pub fn router(&self) -> &Rc<Router> {
		&self.router
	}

	/// Returns the application store.
	pub fn store(&self) -> &Store<S> {
		&self.store
	}

	/// Returns the delegated handler registry.
	pub fn handlers(&self) -> &Rc<HandlerRegistry<E>> {
		&self.handlers
	}

	/// Returns the settings.
	pub fn settings(&self) -> &RuntimeSettings {
		&self.settings
	}

	/// Mounts `view` into the root.
	pub fn render(&self, view: &View) -> Result<()> {
		self.mount.mount(view)?;
		Ok(())
	}

	/// Registers a page: navigating to `path` builds a view from the current
	/// state and mounts it.
	pub fn page<F>(&self, path: &str, build: F)
	where
		F: Fn(&S) -> View + 'static,
	{
		let handler = self.page_handler(build);
		self.router.add_route(path, handler);
	}

	/// Registers a page behind a guard that sees the current state and the
	/// requested path and returns the effective path.
	pub fn guarded_page<F, G>(&self, path: &str, build: F, guard: G)
	where
		F: Fn(&S) -> View + 'static,
		G: Fn(&S, &str) -> String + 'static,
	{
		let handler = self.page_handler(build);
		let store = self.store.clone();
		self.router.add_guarded_route(path, handler, move |requested: &str| {
			store.with_state(|state| guard(state, requested))
		});
	}

	/// Registers the page shown for unregistered paths.
	pub fn not_found_page<F>(&self, build: F)
	where
		F: Fn(&S) -> View + 'static,
	{
		let handler = self.page_handler(build);
		self.router.add_not_found_route(handler);
	}

	fn page_handler<F>(&self, build: F) -> impl Fn() + 'static
	where
		F: Fn(&S) -> View + 'static,
	{
		let store = self.store.clone();
		let mount = Rc::clone(&self.mount);
		move || {
			let view = store.with_state(|state| build(state));
			mount_or_log(mount.as_ref(), &view);
		}
	}

	/// Registers a delegated handler under `name`.
	pub fn on<F>(&self, name: &str, handler: F)
	where
		F: Fn(&E) + 'static,
	{
		self.handlers.register(name, handler);
	}

	/// Builds a delegator over this runtime's registry and attribute prefix.
	pub fn delegator(&self) -> Delegator<E> {
		Delegator::new(Rc::clone(&self.handlers)).with_prefix(self.settings.attribute_prefix.clone())
	}

	/// Dispatches an event that reached `root` from `target`.
	pub fn dispatch<N: DomNode>(
		&self,
		event_type: &str,
		target: N,
		root: &N,
		event: &E,
	) -> DispatchOutcome {
		self.delegator().dispatch(event_type, target, root, event)
	}

	/// Navigates to `path`.
	pub fn navigate(&self, path: &str) -> Result<Navigation> {
		Ok(self.router.push(path)?)
	}

	/// Resolves the current location, mounting the initial page.
	///
	/// A guard redirect on the initial load rewrites the entry the page was
	/// loaded with instead of stacking a second one on top of it.
	pub fn start(&self) -> Result<Navigation> {
		let path = self.router.current_path();
		crate::debug_log!("starting at {}", path);
		Ok(self.router.replace(&path)?)
	}

	/// Re-resolves the current location without adding a history entry,
	/// re-running its guard and page builder.
	pub fn refresh(&self) -> Result<Navigation> {
		let path = self.router.current_path();
		Ok(self.router.replace(&path)?)
	}
}

/// Keeps browser listeners alive for the lifetime of the page.
#[cfg(target_arch = "wasm32")]
#[derive(Debug)]
pub struct RuntimeHandle {
	_listeners: mosaic_events::DelegatedListeners,
	_popstate: mosaic_router::PopStateListener,
}

#[cfg(target_arch = "wasm32")]
impl RuntimeHandle {
	/// Leaks the listeners so they stay attached until the page unloads.
	pub fn forget(self) {
		std::mem::forget(self);
	}
}

#[cfg(target_arch = "wasm32")]
impl<S: 'static> Runtime<S, web_sys::Event> {
	/// Creates a runtime bound to `window.history` and the root element
	/// named in `settings`.
	pub fn browser(settings: RuntimeSettings, initial_state: S) -> Result<Self> {
		let history = mosaic_router::BrowserHistory::new()?;
		let mount = crate::view::InnerHtmlMount::from_id(&settings.root_id)?;
		Self::new(settings, history, mount, initial_state)
	}

	/// Attaches the delegated and popstate listeners and mounts the page for
	/// the current location.
	pub fn launch(&self) -> Result<RuntimeHandle> {
		#[cfg(feature = "console_error_panic_hook")]
		console_error_panic_hook::set_once();

		let root = web_sys::window()
			.and_then(|window| window.document())
			.ok_or(crate::view::MountError::Unavailable)?
			.get_element_by_id(&self.settings.root_id)
			.ok_or_else(|| crate::view::MountError::RootNotFound(self.settings.root_id.clone()))?;

		let listeners = mosaic_events::DelegatedListeners::attach(
			&root,
			Rc::new(self.delegator()),
			self.settings.event_types.as_slice(),
		)?;
		let popstate = mosaic_router::PopStateListener::attach(&self.router)?;

		self.start()?;
		crate::info_log!("runtime launched on #{}", self.settings.root_id);

		Ok(RuntimeHandle {
			_listeners: listeners,
			_popstate: popstate,
		})
	}
}
