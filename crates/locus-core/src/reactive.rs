//! Signal - Observable Value Container
//!
//! `Signal<T>` holds a value that is replaced wholesale and notifies its
//! subscribers on every replacement. It is the observable that carries the
//! current [`Location`](crate::Location).
//!
//! ## Key Features
//!
//! - **Shared**: clones share the value and the subscriber list.
//! - **Wholesale replacement**: `set()` swaps the value and notifies; there is
//!   no partial mutation.
//! - **Re-entrant**: subscribers run against a snapshot, so they may read the
//!   signal, set it, or (un)subscribe while being notified.
//! - **Single-threaded**: backed by `Rc<RefCell<_>>`, intended for the UI thread.
//!
//! ## Example
//!
//! ```
//! use locus_core::Signal;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let count = Signal::new(0);
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let id = count.subscribe({
//! 	let seen = seen.clone();
//! 	move |value: &i32| seen.borrow_mut().push(*value)
//! });
//! count.set(42);
//! count.unsubscribe(id);
//! count.set(7);
//!
//! assert_eq!(*seen.borrow(), vec![0, 42]);
//! ```

use core::cell::{Cell, RefCell};
use core::fmt;
use std::rc::Rc;

/// Identifies a subscription on a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
	next_id: Cell<u64>,
	entries: RefCell<Vec<(SubscriptionId, Subscriber<T>)>>,
}

/// An observable value.
pub struct Signal<T: 'static> {
	/// The current value, shared by every clone.
	value: Rc<RefCell<T>>,
	/// Callbacks notified on replacement.
	subscribers: Rc<Subscribers<T>>,
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			subscribers: Rc::clone(&self.subscribers),
		}
	}
}

impl<T: 'static> Signal<T> {
	/// Creates a signal with the given initial value and no subscribers.
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			subscribers: Rc::new(Subscribers {
				next_id: Cell::new(0),
				entries: RefCell::new(Vec::new()),
			}),
		}
	}

	/// Returns a clone of the current value.
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Runs `f` against the current value without cloning it.
	///
	/// `f` must not call [`set`](Self::set) on this signal.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		f(&self.value.borrow())
	}

	/// Replaces the value and notifies every subscriber.
	pub fn set(&self, value: T)
	where
		T: Clone,
	{
		*self.value.borrow_mut() = value;
		self.notify();
	}

	/// Registers `subscriber`.
	///
	/// The subscriber is called immediately with the current value and then
	/// after every [`set`](Self::set), until it is unsubscribed.
	pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
	where
		F: Fn(&T) + 'static,
		T: Clone,
	{
		let id = SubscriptionId(self.subscribers.next_id.get());
		self.subscribers.next_id.set(id.0 + 1);

		let subscriber: Subscriber<T> = Rc::new(subscriber);
		self.subscribers
			.entries
			.borrow_mut()
			.push((id, Rc::clone(&subscriber)));

		let snapshot = self.get();
		subscriber(&snapshot);
		id
	}

	/// Removes a subscription. Returns `false` if it was already gone.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut entries = self.subscribers.entries.borrow_mut();
		let before = entries.len();
		entries.retain(|(entry_id, _)| *entry_id != id);
		entries.len() != before
	}

	/// Returns the number of live subscriptions.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers.entries.borrow().len()
	}

	fn notify(&self)
	where
		T: Clone,
	{
		let subscribers: Vec<Subscriber<T>> = self
			.subscribers
			.entries
			.borrow()
			.iter()
			.map(|(_, subscriber)| Rc::clone(subscriber))
			.collect();
		if subscribers.is_empty() {
			return;
		}

		let snapshot = self.get();
		for subscriber in subscribers {
			subscriber(&snapshot);
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.value.borrow())
			.field("subscribers", &self.subscribers.entries.borrow().len())
			.finish()
	}
}
