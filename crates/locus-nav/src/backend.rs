//! Backend seams.
//!
//! [`Navigator`](crate::Navigator) talks to the browser only through these
//! traits. [`crate::browser`] implements them over web-sys on wasm32 and
//! [`crate::memory`] implements them in memory for native targets and tests.

use locus_core::Location;

use crate::error::NavigationError;

/// The History and Location APIs.
pub trait History {
	/// Parses the current address (`pathname`, `search`, `hash`).
	fn location(&self) -> Result<Location, NavigationError>;

	/// Returns the state payload of the current history entry.
	fn state(&self) -> Result<Option<String>, NavigationError>;

	/// Adds a history entry. `url: None` keeps the current address.
	fn push_state(&self, state: Option<&str>, url: Option<&str>) -> Result<(), NavigationError>;

	/// Replaces the current history entry. `url: None` keeps the current address.
	fn replace_state(&self, state: Option<&str>, url: Option<&str>)
	-> Result<(), NavigationError>;

	/// Moves one entry back.
	fn back(&self) -> Result<(), NavigationError>;

	/// Moves one entry forward.
	fn forward(&self) -> Result<(), NavigationError>;
}

/// A string key-value store such as `localStorage`.
pub trait KeyValueStorage {
	/// Reads a value.
	fn get_item(&self, key: &str) -> Result<Option<String>, NavigationError>;

	/// Writes a value.
	fn set_item(&self, key: &str, value: &str) -> Result<(), NavigationError>;

	/// Deletes a value. Deleting a missing key is not an error.
	fn remove_item(&self, key: &str) -> Result<(), NavigationError>;
}

/// Callback invoked when the user moves through history (back/forward).
pub type PopStateCallback = Box<dyn Fn()>;

/// Source of back/forward notifications.
pub trait PopStateSource {
	/// Registers `callback`. The registration lasts as long as the returned
	/// [`Listener`].
	fn on_pop_state(&self, callback: PopStateCallback) -> Result<Listener, NavigationError>;
}

/// Guard for a registered event callback. Dropping it detaches the callback.
#[must_use = "dropping a Listener detaches its callback"]
pub struct Listener {
	detach: Option<Box<dyn FnOnce()>>,
}

impl Listener {
	/// Creates a guard that runs `detach` when dropped.
	pub fn new<F>(detach: F) -> Self
	where
		F: FnOnce() + 'static,
	{
		Self {
			detach: Some(Box::new(detach)),
		}
	}

	/// A guard with nothing to detach.
	pub fn noop() -> Self {
		Self { detach: None }
	}

	/// Keeps the callback registered for the lifetime of the page.
	pub fn forget(mut self) {
		self.detach = None;
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		if let Some(detach) = self.detach.take() {
			detach();
		}
	}
}

impl std::fmt::Debug for Listener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Listener")
			.field("attached", &self.detach.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;
	use std::rc::Rc;

	#[rstest]
	fn test_listener_detaches_on_drop() {
		let detached = Rc::new(Cell::new(false));
		let listener = Listener::new({
			let detached = Rc::clone(&detached);
			move || detached.set(true)
		});

		assert!(!detached.get());
		drop(listener);
		assert!(detached.get());
	}

	#[rstest]
	fn test_listener_forget_keeps_callback() {
		let detached = Rc::new(Cell::new(false));
		let listener = Listener::new({
			let detached = Rc::clone(&detached);
			move || detached.set(true)
		});

		listener.forget();
		assert!(!detached.get());
	}

	#[rstest]
	fn test_noop_listener() {
		let listener = Listener::noop();
		assert_eq!(format!("{:?}", listener), "Listener { attached: false }");
	}
}
