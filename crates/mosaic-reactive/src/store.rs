//! Store - observable state container.
//!
//! A [`Store`] owns a state value and an embedded [`Observer`]. State is only
//! replaced through [`Store::set_state`] (or its `set`/`update` siblings),
//! each of which swaps the value first and then notifies every subscriber
//! synchronously. Subscribers therefore always see the complete new state.
//!
//! Cloning a `Store` yields another handle to the same state.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::observer::{Observer, SubscriberError, Subscription};

/// Errors produced by store updates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
	/// An update was started while another update on the same store was
	/// still running (from a producer or a subscriber).
	#[error("store update requested while another update is in progress")]
	ReentrantUpdate,
	/// A subscriber failed during notification.
	#[error(transparent)]
	Subscriber(#[from] SubscriberError),
}

struct StoreInner<S> {
	state: RefCell<S>,
	observer: Observer,
	updating: Cell<bool>,
}

/// Observable state container.
pub struct Store<S: 'static> {
	inner: Rc<StoreInner<S>>,
}

impl<S: 'static> Clone for Store<S> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<S: fmt::Debug + 'static> fmt::Debug for Store<S> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Store")
			.field("state", &*self.inner.state.borrow())
			.field("subscribers", &self.inner.observer.len())
			.finish()
	}
}

impl<S: Default + 'static> Default for Store<S> {
	fn default() -> Self {
		Self::new(S::default())
	}
}

/// Resets the in-progress flag even when a producer or subscriber panics.
struct UpdateGuard<'a>(&'a Cell<bool>);

impl Drop for UpdateGuard<'_> {
	fn drop(&mut self) {
		self.0.set(false);
	}
}

impl<S: 'static> Store<S> {
	/// Creates a store holding `initial`.
	pub fn new(initial: S) -> Self {
		Self {
			inner: Rc::new(StoreInner {
				state: RefCell::new(initial),
				observer: Observer::new(),
				updating: Cell::new(false),
			}),
		}
	}

	/// Returns a snapshot of the current state.
	pub fn get_state(&self) -> S
	where
		S: Clone,
	{
		self.inner.state.borrow().clone()
	}

	/// Reads the current state without cloning it.
	pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
		f(&*self.inner.state.borrow())
	}

	/// Replaces the state with `producer(&old)` and notifies subscribers.
	///
	/// Every subscriber has run by the time this returns. Calling any update
	/// method on the same store from inside `producer` or a subscriber yields
	/// [`StoreError::ReentrantUpdate`].
	pub fn set_state<F>(&self, producer: F) -> Result<(), StoreError>
	where
		F: FnOnce(&S) -> S,
	{
		let _guard = self.begin_update()?;
		let next = producer(&*self.inner.state.borrow());
		*self.inner.state.borrow_mut() = next;
		self.publish()
	}

	/// Replaces the state with `state` and notifies subscribers.
	pub fn set(&self, state: S) -> Result<(), StoreError> {
		let _guard = self.begin_update()?;
		*self.inner.state.borrow_mut() = state;
		self.publish()
	}

	/// Patches the state in place and notifies subscribers.
	///
	/// The state is mutably borrowed while `patch` runs; `patch` must not read
	/// the store through another handle.
	pub fn update<F>(&self, patch: F) -> Result<(), StoreError>
	where
		F: FnOnce(&mut S),
	{
		let _guard = self.begin_update()?;
		patch(&mut *self.inner.state.borrow_mut());
		self.publish()
	}

	fn begin_update(&self) -> Result<UpdateGuard<'_>, StoreError> {
		if self.inner.updating.replace(true) {
			tracing::warn!("rejected re-entrant store update");
			return Err(StoreError::ReentrantUpdate);
		}
		Ok(UpdateGuard(&self.inner.updating))
	}

	fn publish(&self) -> Result<(), StoreError> {
		tracing::debug!(
			subscribers = self.inner.observer.len(),
			"store state replaced"
		);
		self.inner.observer.notify()?;
		Ok(())
	}

	/// Registers a subscriber that runs after each state replacement.
	pub fn subscribe<F>(&self, callback: F) -> Subscription
	where
		F: Fn() + 'static,
	{
		self.inner.observer.subscribe(callback)
	}

	/// Registers a fallible subscriber. Its error is returned from the update
	/// call that triggered the notification.
	pub fn subscribe_fallible<F>(&self, callback: F) -> Subscription
	where
		F: Fn() -> Result<(), SubscriberError> + 'static,
	{
		self.inner.observer.subscribe_fallible(callback)
	}

	/// Removes a subscriber.
	pub fn unsubscribe(&self, subscription: Subscription) -> bool {
		self.inner.observer.unsubscribe(subscription)
	}

	/// Returns the number of subscribers.
	pub fn subscriber_count(&self) -> usize {
		self.inner.observer.len()
	}
}
