//! In-memory backends.
//!
//! [`MemoryHistory`] and [`MemoryStorage`] stand in for the browser on native
//! targets and in tests. `MemoryHistory` fires pop-state callbacks
//! synchronously from [`go`](MemoryHistory::go), [`back`](History::back) and
//! [`forward`](History::forward).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use locus_core::{Location, codec};

use crate::backend::{History, KeyValueStorage, Listener, PopStateCallback, PopStateSource};
use crate::error::NavigationError;

#[derive(Debug, Clone)]
struct Entry {
	url: String,
	state: Option<String>,
}

struct HistoryInner {
	entries: Vec<Entry>,
	index: usize,
	listeners: Vec<(u64, Rc<dyn Fn()>)>,
	next_listener: u64,
	read_only: bool,
}

/// Session history kept in memory.
///
/// Clones share the same history.
#[derive(Clone)]
pub struct MemoryHistory {
	inner: Rc<RefCell<HistoryInner>>,
}

impl MemoryHistory {
	/// Creates a history with a single entry at `initial_url`.
	pub fn new(initial_url: impl Into<String>) -> Self {
		Self {
			inner: Rc::new(RefCell::new(HistoryInner {
				entries: vec![Entry {
					url: initial_url.into(),
					state: None,
				}],
				index: 0,
				listeners: Vec::new(),
				next_listener: 0,
				read_only: false,
			})),
		}
	}

	/// Number of entries in the history.
	pub fn len(&self) -> usize {
		self.inner.borrow().entries.len()
	}

	/// Always `false`: a history has at least its initial entry.
	pub fn is_empty(&self) -> bool {
		self.inner.borrow().entries.is_empty()
	}

	/// Index of the current entry.
	pub fn index(&self) -> usize {
		self.inner.borrow().index
	}

	/// URL of the current entry.
	pub fn current_url(&self) -> String {
		let inner = self.inner.borrow();
		inner.entries[inner.index].url.clone()
	}

	/// Number of registered pop-state callbacks.
	pub fn listener_count(&self) -> usize {
		self.inner.borrow().listeners.len()
	}

	/// Makes `push_state` and `replace_state` fail, like a browser that throws
	/// `SecurityError`.
	pub fn set_read_only(&self, read_only: bool) {
		self.inner.borrow_mut().read_only = read_only;
	}

	/// Moves `delta` entries and fires pop-state callbacks.
	///
	/// Returns `false` without firing when the target is out of range or
	/// `delta` is zero.
	pub fn go(&self, delta: isize) -> bool {
		{
			let mut inner = self.inner.borrow_mut();
			let Some(target) = inner.index.checked_add_signed(delta) else {
				return false;
			};
			if delta == 0 || target >= inner.entries.len() {
				return false;
			}
			inner.index = target;
		}
		self.fire_pop_state();
		true
	}

	fn fire_pop_state(&self) {
		let callbacks: Vec<Rc<dyn Fn()>> = self
			.inner
			.borrow()
			.listeners
			.iter()
			.map(|(_, callback)| Rc::clone(callback))
			.collect();
		for callback in callbacks {
			callback();
		}
	}

	fn write(
		&self,
		state: Option<&str>,
		url: Option<&str>,
		push: bool,
	) -> Result<(), NavigationError> {
		let mut inner = self.inner.borrow_mut();
		if inner.read_only {
			return Err(NavigationError::History(
				"SecurityError: history is read-only".to_string(),
			));
		}

		let index = inner.index;
		let url = url
			.map(str::to_string)
			.unwrap_or_else(|| inner.entries[index].url.clone());
		let entry = Entry {
			url,
			state: state.map(str::to_string),
		};

		if push {
			inner.entries.truncate(index + 1);
			inner.entries.push(entry);
			inner.index = index + 1;
		} else {
			inner.entries[index] = entry;
		}
		Ok(())
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("MemoryHistory")
			.field("entries", &inner.entries)
			.field("index", &inner.index)
			.field("listeners", &inner.listeners.len())
			.finish()
	}
}

impl History for MemoryHistory {
	fn location(&self) -> Result<Location, NavigationError> {
		Ok(codec::parse_url(&self.current_url()))
	}

	fn state(&self) -> Result<Option<String>, NavigationError> {
		let inner = self.inner.borrow();
		Ok(inner.entries[inner.index].state.clone())
	}

	fn push_state(&self, state: Option<&str>, url: Option<&str>) -> Result<(), NavigationError> {
		self.write(state, url, true)
	}

	fn replace_state(
		&self,
		state: Option<&str>,
		url: Option<&str>,
	) -> Result<(), NavigationError> {
		self.write(state, url, false)
	}

	fn back(&self) -> Result<(), NavigationError> {
		self.go(-1);
		Ok(())
	}

	fn forward(&self) -> Result<(), NavigationError> {
		self.go(1);
		Ok(())
	}
}

impl PopStateSource for MemoryHistory {
	fn on_pop_state(&self, callback: PopStateCallback) -> Result<Listener, NavigationError> {
		let id = {
			let mut inner = self.inner.borrow_mut();
			let id = inner.next_listener;
			inner.next_listener += 1;
			inner.listeners.push((id, Rc::from(callback)));
			id
		};

		let weak: Weak<RefCell<HistoryInner>> = Rc::downgrade(&self.inner);
		Ok(Listener::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner
					.borrow_mut()
					.listeners
					.retain(|(listener_id, _)| *listener_id != id);
			}
		}))
	}
}

/// `localStorage` kept in memory.
///
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
	data: Rc<RefCell<HashMap<String, String>>>,
	read_only: Rc<RefCell<bool>>,
}

impl MemoryStorage {
	/// Creates an empty storage.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a storage pre-filled with `data`.
	pub fn with_data(data: HashMap<String, String>) -> Self {
		Self {
			data: Rc::new(RefCell::new(data)),
			read_only: Rc::default(),
		}
	}

	/// Number of stored items.
	pub fn len(&self) -> usize {
		self.data.borrow().len()
	}

	/// Returns `true` when nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.data.borrow().is_empty()
	}

	/// Returns `true` if `key` is stored.
	pub fn contains_key(&self, key: &str) -> bool {
		self.data.borrow().contains_key(key)
	}

	/// Reads a value directly.
	pub fn get(&self, key: &str) -> Option<String> {
		self.data.borrow().get(key).cloned()
	}

	/// Removes everything.
	pub fn clear(&self) {
		self.data.borrow_mut().clear();
	}

	/// Makes writes fail, like a full or disabled `localStorage`.
	pub fn set_read_only(&self, read_only: bool) {
		*self.read_only.borrow_mut() = read_only;
	}

	fn check_writable(&self) -> Result<(), NavigationError> {
		if *self.read_only.borrow() {
			return Err(NavigationError::Storage(
				"QuotaExceededError: storage is read-only".to_string(),
			));
		}
		Ok(())
	}
}

impl KeyValueStorage for MemoryStorage {
	fn get_item(&self, key: &str) -> Result<Option<String>, NavigationError> {
		Ok(self.get(key))
	}

	fn set_item(&self, key: &str, value: &str) -> Result<(), NavigationError> {
		self.check_writable()?;
		self.data
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove_item(&self, key: &str) -> Result<(), NavigationError> {
		self.check_writable()?;
		self.data.borrow_mut().remove(key);
		Ok(())
	}
}
