//! Observer - synchronous publish/subscribe primitive.
//!
//! An [`Observer`] keeps subscribers in insertion order and invokes every one
//! of them, in that order, when [`Observer::notify`] is called. Subscribing
//! the same closure twice makes it run twice per notification.
//!
//! Notification is fail-fast: the first fallible subscriber that returns an
//! error stops the loop and the error is handed back to the caller. A panic
//! in any subscriber unwinds through `notify` the same way.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

/// Error returned by a fallible subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("subscriber failed: {message}")]
pub struct SubscriberError {
	message: String,
}

impl SubscriberError {
	/// Creates a new subscriber error.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// Returns the failure message.
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Handle identifying one subscription.
///
/// Returned by [`Observer::subscribe`]; pass it to [`Observer::unsubscribe`]
/// to remove exactly that registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subscription(u64);

type Callback = Rc<dyn Fn() -> Result<(), SubscriberError>>;

/// Ordered list of subscribers with a synchronous notify operation.
pub struct Observer {
	subscribers: RefCell<Vec<(Subscription, Callback)>>,
	next_id: Cell<u64>,
}

impl Default for Observer {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for Observer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Observer")
			.field("subscribers", &self.len())
			.finish()
	}
}

impl Observer {
	/// Creates an observer with no subscribers.
	pub fn new() -> Self {
		Self {
			subscribers: RefCell::new(Vec::new()),
			next_id: Cell::new(0),
		}
	}

	/// Appends a subscriber. It runs after every subscriber added before it.
	pub fn subscribe<F>(&self, callback: F) -> Subscription
	where
		F: Fn() + 'static,
	{
		self.push(Rc::new(move || {
			callback();
			Ok(())
		}))
	}

	/// Appends a subscriber whose error aborts the notification in progress.
	pub fn subscribe_fallible<F>(&self, callback: F) -> Subscription
	where
		F: Fn() -> Result<(), SubscriberError> + 'static,
	{
		self.push(Rc::new(callback))
	}

	fn push(&self, callback: Callback) -> Subscription {
		let id = Subscription(self.next_id.get());
		self.next_id.set(id.0 + 1);
		self.subscribers.borrow_mut().push((id, callback));
		id
	}

	/// Removes a subscription. Returns `false` if it was already gone.
	pub fn unsubscribe(&self, subscription: Subscription) -> bool {
		let mut subscribers = self.subscribers.borrow_mut();
		let before = subscribers.len();
		subscribers.retain(|(id, _)| *id != subscription);
		subscribers.len() != before
	}

	/// Invokes every subscriber in insertion order.
	///
	/// The subscriber list is snapshotted first, so callbacks may subscribe
	/// or unsubscribe freely; such changes take effect on the next call.
	pub fn notify(&self) -> Result<(), SubscriberError> {
		let snapshot: Vec<Callback> = self
			.subscribers
			.borrow()
			.iter()
			.map(|(_, callback)| Rc::clone(callback))
			.collect();

		tracing::trace!(subscribers = snapshot.len(), "notifying subscribers");

		for callback in snapshot {
			callback()?;
		}
		Ok(())
	}

	/// Returns the number of subscribers.
	pub fn len(&self) -> usize {
		self.subscribers.borrow().len()
	}

	/// Returns `true` when nobody is subscribed.
	pub fn is_empty(&self) -> bool {
		self.subscribers.borrow().is_empty()
	}

	/// Drops every subscriber.
	pub fn clear(&self) {
		self.subscribers.borrow_mut().clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Box<dyn Fn()>) {
		let log = Rc::new(RefCell::new(Vec::new()));
		let handle = Rc::clone(&log);
		let make = move |name: &'static str| -> Box<dyn Fn()> {
			let log = Rc::clone(&handle);
			Box::new(move || log.borrow_mut().push(name))
		};
		(log, make)
	}

	#[rstest]
	fn test_notify_runs_in_insertion_order() {
		let observer = Observer::new();
		let (log, make) = recorder();
		observer.subscribe(make("a"));
		observer.subscribe(make("b"));
		observer.subscribe(make("c"));

		observer.notify().unwrap();

		assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
	}

	#[rstest]
	fn test_same_callback_twice_runs_twice() {
		let observer = Observer::new();
		let count = Rc::new(Cell::new(0));
		let callback = {
			let count = Rc::clone(&count);
			Rc::new(move || count.set(count.get() + 1))
		};

		let first = Rc::clone(&callback);
		observer.subscribe(move || first());
		let second = Rc::clone(&callback);
		observer.subscribe(move || second());

		observer.notify().unwrap();
		assert_eq!(count.get(), 2);
	}

	#[rstest]
	fn test_unsubscribe_removes_only_that_subscription() {
		let observer = Observer::new();
		let (log, make) = recorder();
		let a = observer.subscribe(make("a"));
		observer.subscribe(make("b"));

		assert!(observer.unsubscribe(a));
		assert!(!observer.unsubscribe(a));
		observer.notify().unwrap();

		assert_eq!(*log.borrow(), vec!["b"]);
		assert_eq!(observer.len(), 1);
	}

	#[rstest]
	fn test_fallible_subscriber_aborts_remaining() {
		let observer = Observer::new();
		let (log, make) = recorder();
		observer.subscribe(make("before"));
		observer.subscribe_fallible(|| Err(SubscriberError::new("boom")));
		observer.subscribe(make("after"));

		let err = observer.notify().unwrap_err();

		assert_eq!(err.message(), "boom");
		assert_eq!(err.to_string(), "subscriber failed: boom");
		assert_eq!(*log.borrow(), vec!["before"]);
	}

	#[rstest]
	fn test_subscribe_during_notify_applies_next_time() {
		let observer = Rc::new(Observer::new());
		let late_runs = Rc::new(Cell::new(0));
		{
			let observer_handle = Rc::downgrade(&observer);
			let late_runs = Rc::clone(&late_runs);
			observer.subscribe(move || {
				if let Some(observer) = observer_handle.upgrade() {
					let late_runs = Rc::clone(&late_runs);
					observer.subscribe(move || late_runs.set(late_runs.get() + 1));
				}
			});
		}

		observer.notify().unwrap();
		assert_eq!(late_runs.get(), 0);

		observer.notify().unwrap();
		assert_eq!(late_runs.get(), 1);
	}

	#[rstest]
	fn test_clear_and_empty() {
		let observer = Observer::new();
		assert!(observer.is_empty());
		observer.subscribe(|| {});
		assert!(!observer.is_empty());
		observer.clear();
		assert!(observer.is_empty());
		assert!(observer.notify().is_ok());
	}
}
