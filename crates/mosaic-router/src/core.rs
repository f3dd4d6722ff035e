//! Core Router Implementation.
//!
//! Routes are looked up by exact path. A navigation runs in three steps:
//! the guard of the requested route computes the effective path, history is
//! written with the effective path, and the handler registered for the
//! effective path runs. Unregistered requested paths go straight to the
//! not-found handler and leave history untouched.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use mosaic_reactive::{Observer, SubscriberError, Subscription};
use serde::Deserialize;
use thiserror::Error;

use super::guard::Guard;
use super::history::{History, HistoryError, NavigationType};

/// Key that registers the not-found handler through [`Router::add_route`].
pub const NOT_FOUND_PATH: &str = "/*";

/// Upper bound on queued navigations run behind one top-level navigation.
/// A handler that keeps navigating from every page it renders stops here.
pub const MAX_QUEUED_NAVIGATIONS: usize = 64;

/// Zero-argument page handler.
pub type RouteHandler = Rc<dyn Fn()>;

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A navigation was requested while another one was running and the
	/// router rejects re-entrant navigation.
	#[error("navigation to '{requested}' rejected: another navigation is in progress")]
	NavigationInProgress {
		/// The rejected path.
		requested: String,
	},
	/// Writing to session history failed.
	#[error(transparent)]
	History(#[from] HistoryError),
	/// A router subscriber failed.
	#[error(transparent)]
	Subscriber(#[from] SubscriberError),
}

/// What the router does with a navigation requested from inside a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReentrancyPolicy {
	/// Run it after the current navigation completes, in request order.
	#[default]
	Queue,
	/// Fail it with [`RouterError::NavigationInProgress`].
	Reject,
}

/// How a navigation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// A route handler ran.
	Matched,
	/// The not-found handler ran.
	NotFound,
	/// The navigation was deferred behind the one in progress.
	Queued,
}

/// Record of one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
	/// The path that was asked for.
	pub requested: String,
	/// The path written to history, if the requested path was registered.
	pub effective: Option<String>,
	/// How the navigation ended.
	pub outcome: Outcome,
}

impl Navigation {
	/// Returns `true` when history now points somewhere other than the
	/// requested path.
	pub fn redirected(&self) -> bool {
		self.effective
			.as_deref()
			.is_some_and(|effective| effective != self.requested)
	}
}

/// A single route definition.
#[derive(Clone)]
pub struct Route {
	path: String,
	handler: RouteHandler,
	guard: Option<Guard>,
}

impl fmt::Debug for Route {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Route")
			.field("path", &self.path)
			.field("has_guard", &self.guard.is_some())
			.finish()
	}
}

impl Route {
	/// Creates an unguarded route.
	pub fn new<F>(path: impl Into<String>, handler: F) -> Self
	where
		F: Fn() + 'static,
	{
		Self {
			path: path.into(),
			handler: Rc::new(handler),
			guard: None,
		}
	}

	/// Adds a guard to this route.
	pub fn with_guard<G>(mut self, guard: G) -> Self
	where
		G: Fn(&str) -> String + 'static,
	{
		self.guard = Some(Rc::new(guard));
		self
	}

	/// Returns the registered path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns `true` if a guard is attached.
	pub fn has_guard(&self) -> bool {
		self.guard.is_some()
	}

	/// Computes the effective path for `requested`.
	pub fn resolve(&self, requested: &str) -> String {
		match &self.guard {
			Some(guard) => guard(requested),
			None => requested.to_string(),
		}
	}

	/// Runs the page handler.
	pub fn render(&self) {
		(self.handler)()
	}
}

/// The main router.
///
/// All methods take `&self`; the router is meant to live in an `Rc` shared by
/// the runtime context, page handlers and the popstate listener.
pub struct Router {
	routes: RefCell<HashMap<String, Route>>,
	not_found: RefCell<RouteHandler>,
	history: Box<dyn History>,
	policy: ReentrancyPolicy,
	navigating: Cell<bool>,
	pending: RefCell<VecDeque<(String, NavigationType)>>,
	resolved_path: RefCell<Option<String>>,
	observer: Observer,
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut paths: Vec<String> = self.routes.borrow().keys().cloned().collect();
		paths.sort();
		f.debug_struct("Router")
			.field("routes", &paths)
			.field("policy", &self.policy)
			.field("resolved_path", &self.resolved_path.borrow())
			.finish()
	}
}

/// Clears the in-progress flag when a navigation ends, even by panic.
struct NavigationScope<'a> {
	router: &'a Router,
}

impl Drop for NavigationScope<'_> {
	fn drop(&mut self) {
		self.router.navigating.set(false);
		self.router.pending.borrow_mut().clear();
	}
}

impl Router {
	/// Creates a router on top of `history`.
	pub fn new(history: impl History + 'static) -> Self {
		Self {
			routes: RefCell::new(HashMap::new()),
			not_found: RefCell::new(Rc::new(|| {})),
			history: Box::new(history),
			policy: ReentrancyPolicy::default(),
			navigating: Cell::new(false),
			pending: RefCell::new(VecDeque::new()),
			resolved_path: RefCell::new(None),
			observer: Observer::new(),
		}
	}

	/// Creates a router bound to `window.history`.
	#[cfg(target_arch = "wasm32")]
	pub fn browser() -> Result<Self, RouterError> {
		Ok(Self::new(super::history::BrowserHistory::new()?))
	}

	/// Sets the re-entrant navigation policy.
	pub fn with_policy(mut self, policy: ReentrancyPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Adds a route (builder form of [`Router::add_route`]).
	pub fn route<F>(self, path: &str, handler: F) -> Self
	where
		F: Fn() + 'static,
	{
		self.add_route(path, handler);
		self
	}

	/// Adds a guarded route (builder form of [`Router::add_guarded_route`]).
	pub fn guarded_route<F, G>(self, path: &str, handler: F, guard: G) -> Self
	where
		F: Fn() + 'static,
		G: Fn(&str) -> String + 'static,
	{
		self.add_guarded_route(path, handler, guard);
		self
	}

	/// Sets the not-found handler (builder form).
	pub fn not_found<F>(self, handler: F) -> Self
	where
		F: Fn() + 'static,
	{
		self.add_not_found_route(handler);
		self
	}

	/// Registers `handler` for `path`, replacing any earlier registration.
	///
	/// Registering [`NOT_FOUND_PATH`] sets the not-found handler instead.
	pub fn add_route<F>(&self, path: &str, handler: F)
	where
		F: Fn() + 'static,
	{
		if path == NOT_FOUND_PATH {
			self.add_not_found_route(handler);
			return;
		}
		self.insert(Route::new(path, handler));
	}

	/// Registers a guarded route for `path`.
	pub fn add_guarded_route<F, G>(&self, path: &str, handler: F, guard: G)
	where
		F: Fn() + 'static,
		G: Fn(&str) -> String + 'static,
	{
		self.insert(Route::new(path, handler).with_guard(guard));
	}

	/// Registers a prepared [`Route`].
	pub fn insert(&self, route: Route) {
		tracing::debug!(path = %route.path, guarded = route.has_guard(), "route registered");
		self.routes.borrow_mut().insert(route.path.clone(), route);
	}

	/// Sets the fallback for unregistered paths.
	pub fn add_not_found_route<F>(&self, handler: F)
	where
		F: Fn() + 'static,
	{
		*self.not_found.borrow_mut() = Rc::new(handler);
	}

	/// Returns the path of the current history entry.
	pub fn current_path(&self) -> String {
		self.history.current_path()
	}

	/// Returns the effective path of the last navigation that reached
	/// history, if any.
	pub fn resolved_path(&self) -> Option<String> {
		self.resolved_path.borrow().clone()
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.borrow().len()
	}

	/// Checks if a route is registered for `path`.
	pub fn has_route(&self, path: &str) -> bool {
		self.routes.borrow().contains_key(path)
	}

	/// Returns `true` while a navigation is running.
	pub fn is_navigating(&self) -> bool {
		self.navigating.get()
	}

	/// Registers a callback that runs after every completed navigation.
	pub fn subscribe<F>(&self, callback: F) -> Subscription
	where
		F: Fn() + 'static,
	{
		self.observer.subscribe(callback)
	}

	/// Registers a fallible subscriber. Its error is returned from the
	/// navigation that triggered the notification, after history and the
	/// page handler have already run.
	pub fn subscribe_fallible<F>(&self, callback: F) -> Subscription
	where
		F: Fn() -> Result<(), SubscriberError> + 'static,
	{
		self.observer.subscribe_fallible(callback)
	}

	/// Removes a navigation subscriber.
	pub fn unsubscribe(&self, subscription: Subscription) -> bool {
		self.observer.unsubscribe(subscription)
	}

	/// Navigates to `path`, adding a history entry.
	pub fn push(&self, path: &str) -> Result<Navigation, RouterError> {
		self.navigate(path, NavigationType::Push)
	}

	/// Navigates to `path`, rewriting the current history entry.
	pub fn replace(&self, path: &str) -> Result<Navigation, RouterError> {
		self.navigate(path, NavigationType::Replace)
	}

	/// Re-resolves the current location after a back/forward traversal.
	///
	/// Guards run again; a redirect rewrites the current entry rather than
	/// adding one, so the back/forward stack keeps its shape.
	pub fn handle_popstate(&self) -> Result<Navigation, RouterError> {
		let path = self.history.current_path();
		self.navigate(&path, NavigationType::Pop)
	}

	fn navigate(&self, path: &str, nav_type: NavigationType) -> Result<Navigation, RouterError> {
		if self.navigating.get() {
			return match self.policy {
				ReentrancyPolicy::Queue => {
					tracing::debug!(requested = path, "navigation queued behind the current one");
					self.pending
						.borrow_mut()
						.push_back((path.to_string(), nav_type));
					Ok(Navigation {
						requested: path.to_string(),
						effective: None,
						outcome: Outcome::Queued,
					})
				}
				ReentrancyPolicy::Reject => {
					tracing::warn!(requested = path, "re-entrant navigation rejected");
					Err(RouterError::NavigationInProgress {
						requested: path.to_string(),
					})
				}
			};
		}

		self.navigating.set(true);
		let _scope = NavigationScope { router: self };

		let navigation = self.resolve(path, nav_type);
		self.drain_pending();
		navigation
	}

	/// Runs navigations queued while the current one was in progress.
	///
	/// Their callers were already answered with [`Outcome::Queued`], so a
	/// failure here is logged and the remaining entries still run.
	fn drain_pending(&self) {
		let mut processed = 0;
		loop {
			let next = self.pending.borrow_mut().pop_front();
			let Some((queued, queued_type)) = next else {
				break;
			};
			if processed == MAX_QUEUED_NAVIGATIONS {
				let dropped = self.pending.borrow().len() + 1;
				tracing::error!(
					requested = %queued,
					dropped,
					"queued navigation limit reached, dropping the rest"
				);
				self.pending.borrow_mut().clear();
				break;
			}
			processed += 1;
			if let Err(err) = self.resolve(&queued, queued_type) {
				tracing::error!(requested = %queued, error = %err, "queued navigation failed");
			}
		}
	}

	fn resolve(&self, requested: &str, nav_type: NavigationType) -> Result<Navigation, RouterError> {
		let route = self.routes.borrow().get(requested).cloned();
		let Some(route) = route else {
			tracing::debug!(requested, "no route registered, running not-found handler");
			self.render_not_found();
			self.observer.notify()?;
			return Ok(Navigation {
				requested: requested.to_string(),
				effective: None,
				outcome: Outcome::NotFound,
			});
		};

		let effective = route.resolve(requested);
		match nav_type {
			NavigationType::Push => self.history.push_state(&effective)?,
			NavigationType::Replace | NavigationType::Pop => {
				self.history.replace_state(&effective)?
			}
		}
		*self.resolved_path.borrow_mut() = Some(effective.clone());

		let target = self.routes.borrow().get(&effective).cloned();
		let outcome = match target {
			Some(target) => {
				tracing::debug!(requested, effective = %effective, "route resolved");
				target.render();
				Outcome::Matched
			}
			None => {
				tracing::warn!(
					requested,
					effective = %effective,
					"guard redirected to an unregistered path"
				);
				self.render_not_found();
				Outcome::NotFound
			}
		};

		self.observer.notify()?;
		Ok(Navigation {
			requested: requested.to_string(),
			effective: Some(effective),
			outcome,
		})
	}

	fn render_not_found(&self) {
		let handler = Rc::clone(&*self.not_found.borrow());
		handler();
	}
}
