//! Navigation context.
//!
//! [`Navigator`] owns the current location as a [`Signal`] and keeps it in step
//! with browser history and local storage.
//!
//! ## Navigation
//!
//! 1. The `before_navigate` hook runs (popups are closed there).
//! 2. The target is serialized and compared with the URL history currently
//!    holds (the state location in embedded mode); an unchanged URL is a
//!    no-op and yields `false`.
//! 3. A history entry is pushed or replaced. In embedded mode the location
//!    travels in the entry's state and the address is left alone.
//! 4. The location is written to storage under the configured key, and under
//!    the per-workspace key when the location names a workspace.
//! 5. The signal is replaced and `true` is returned.
//!
//! Back/forward traversal re-reads the location through the pop-state
//! callback registered at construction.

use std::rc::Rc;

use locus_core::{Location, Signal};
use serde::{Deserialize, Serialize};

use crate::backend::{History, KeyValueStorage, Listener, PopStateCallback, PopStateSource};
use crate::collapse;
use crate::config::NavigationConfig;
use crate::error::NavigationError;

/// How a navigation records itself in history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
	/// Add a new history entry (`pushState`).
	#[default]
	Push,
	/// Overwrite the current entry (`replaceState`).
	Replace,
}

/// Hook run at the start of every navigation with the target location.
pub type BeforeNavigate = Rc<dyn Fn(&Location)>;

/// History state payload used in embedded mode.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryState {
	location: Location,
}

/// Navigation context for one application window.
pub struct Navigator {
	config: NavigationConfig,
	history: Rc<dyn History>,
	storage: Rc<dyn KeyValueStorage>,
	location: Signal<Location>,
	before_navigate: Option<BeforeNavigate>,
	/// Keeps the pop-state callback registered.
	_pop_state: Option<Listener>,
}

impl std::fmt::Debug for Navigator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Navigator")
			.field("config", &self.config)
			.field("location", &self.location.with(Location::to_url))
			.field("has_before_navigate", &self.before_navigate.is_some())
			.field("listening", &self._pop_state.is_some())
			.finish()
	}
}

impl Navigator {
	/// Creates a navigator.
	///
	/// The initial location is read from `history`. `events` receives the
	/// pop-state callback that refreshes the location on back/forward; if the
	/// registration fails the navigator still works but does not follow
	/// traversal.
	pub fn new<H, S>(
		config: NavigationConfig,
		history: H,
		storage: S,
		events: &dyn PopStateSource,
	) -> Self
	where
		H: History + 'static,
		S: KeyValueStorage + 'static,
	{
		let history: Rc<dyn History> = Rc::new(history);
		let storage: Rc<dyn KeyValueStorage> = Rc::new(storage);
		let location = Signal::new(read_location(history.as_ref(), config.embedded));

		let callback: PopStateCallback = {
			let history = Rc::clone(&history);
			let location = location.clone();
			let embedded = config.embedded;
			Box::new(move || {
				sync_location(history.as_ref(), embedded, &location);
			})
		};
		let pop_state = match events.on_pop_state(callback) {
			Ok(listener) => Some(listener),
			Err(err) => {
				tracing::warn!(error = %err, "failed to subscribe to history traversal");
				None
			}
		};

		Self {
			config,
			history,
			storage,
			location,
			before_navigate: None,
			_pop_state: pop_state,
		}
	}

	/// Sets the hook run before every navigation.
	pub fn with_before_navigate<F>(mut self, hook: F) -> Self
	where
		F: Fn(&Location) + 'static,
	{
		self.before_navigate = Some(Rc::new(hook));
		self
	}

	/// Returns the configuration.
	pub fn config(&self) -> &NavigationConfig {
		&self.config
	}

	/// Returns the observable current location.
	pub fn location(&self) -> Signal<Location> {
		self.location.clone()
	}

	/// Returns a snapshot of the current location.
	pub fn current(&self) -> Location {
		self.location.get()
	}

	/// Navigates to `target`, adding a history entry.
	pub fn navigate(&self, target: &Location) -> bool {
		self.navigate_with(target, NavigationMode::Push)
	}

	/// Navigates to `target`, replacing the current history entry.
	pub fn replace(&self, target: &Location) -> bool {
		self.navigate_with(target, NavigationMode::Replace)
	}

	/// Navigates to `target`.
	///
	/// Returns `false` when the target serializes to the current URL or when
	/// history rejects the update; in both cases neither storage nor the
	/// signal is touched.
	pub fn navigate_with(&self, target: &Location, mode: NavigationMode) -> bool {
		if let Some(hook) = &self.before_navigate {
			hook(target);
		}

		let url = target.to_url();
		let current = self.current_url();
		if url == current {
			tracing::debug!(url = %url, "location unchanged, skipping navigation");
			return false;
		}

		if let Err(err) = self.write_history(target, &url, mode) {
			tracing::warn!(url = %url, ?mode, error = %err, "history update failed");
			return false;
		}

		self.persist(target);
		self.location.set(target.clone());
		tracing::debug!(url = %url, ?mode, "navigated");
		true
	}

	/// Re-reads the location from history and publishes it.
	///
	/// This is what the pop-state callback runs; hosts that observe traversal
	/// themselves can call it directly.
	pub fn sync_from_history(&self) -> Location {
		sync_location(self.history.as_ref(), self.config.embedded, &self.location)
	}

	/// Moves one entry back in history.
	pub fn back(&self) -> Result<(), NavigationError> {
		self.history.back()
	}

	/// Moves one entry forward in history.
	pub fn forward(&self) -> Result<(), NavigationError> {
		self.history.forward()
	}

	/// Returns the storage key for the last location.
	pub fn storage_key(&self) -> &str {
		&self.config.storage_key
	}

	/// Replaces the storage key used by subsequent navigations.
	pub fn set_storage_key(&mut self, key: impl Into<String>) {
		self.config.storage_key = key.into();
	}

	/// Returns the last location persisted under the storage key.
	pub fn last_location(&self) -> Option<Location> {
		self.load(&self.config.storage_key)
	}

	/// Returns the last location persisted for `workspace`.
	pub fn last_workspace_location(&self, workspace: &str) -> Option<Location> {
		self.load(&self.config.workspace_key(workspace))
	}

	/// Returns `true` if tree node `id` is collapsed in the current workspace.
	pub fn tree_collapsed(&self, id: &str) -> bool {
		let workspace = self.current_workspace();
		collapse::is_collapsed(self.storage.as_ref(), workspace.as_deref(), id)
	}

	/// Stores the collapse flag of tree node `id` in the current workspace.
	pub fn set_tree_collapsed(&self, id: &str, collapsed: bool) -> Result<(), NavigationError> {
		let workspace = self.current_workspace();
		collapse::set_collapsed(self.storage.as_ref(), workspace.as_deref(), id, collapsed)
	}

	/// URL history currently holds. The signal stands in when history is
	/// unreadable.
	fn current_url(&self) -> String {
		if self.config.embedded {
			return read_location(self.history.as_ref(), true).to_url();
		}
		match self.history.location() {
			Ok(location) => location.to_url(),
			Err(err) => {
				tracing::debug!(
					error = %err,
					"history unreadable, comparing with last known location"
				);
				self.location.with(Location::to_url)
			}
		}
	}

	fn current_workspace(&self) -> Option<String> {
		self.location
			.with(|location| location.workspace().map(str::to_string))
	}

	fn write_history(
		&self,
		target: &Location,
		url: &str,
		mode: NavigationMode,
	) -> Result<(), NavigationError> {
		let (state, url) = if self.config.embedded {
			let state = serde_json::to_string(&HistoryState {
				location: target.clone(),
			})?;
			(Some(state), None)
		} else {
			(None, Some(url))
		};

		match mode {
			NavigationMode::Push => self.history.push_state(state.as_deref(), url),
			NavigationMode::Replace => self.history.replace_state(state.as_deref(), url),
		}
	}

	fn persist(&self, location: &Location) {
		let json = match serde_json::to_string(location) {
			Ok(json) => json,
			Err(err) => {
				tracing::warn!(error = %err, "failed to serialize location");
				return;
			}
		};

		self.store(&self.config.storage_key, &json);
		if let Some(workspace) = location.workspace() {
			self.store(&self.config.workspace_key(workspace), &json);
		}
	}

	fn store(&self, key: &str, value: &str) {
		if let Err(err) = self.storage.set_item(key, value) {
			tracing::warn!(key = %key, error = %err, "failed to persist location");
		}
	}

	fn load(&self, key: &str) -> Option<Location> {
		let raw = match self.storage.get_item(key) {
			Ok(raw) => raw?,
			Err(err) => {
				tracing::warn!(key = %key, error = %err, "failed to read stored location");
				return None;
			}
		};
		serde_json::from_str(&raw)
			.inspect_err(|err| {
				tracing::warn!(key = %key, error = %err, "discarding unreadable stored location");
			})
			.ok()
	}
}

/// Reads the current location: from history state in embedded mode, from the
/// address otherwise (and as the embedded fallback).
fn read_location(history: &dyn History, embedded: bool) -> Location {
	if embedded {
		match history.state() {
			Ok(Some(state)) => match serde_json::from_str::<HistoryState>(&state) {
				Ok(state) => return state.location,
				Err(err) => {
					tracing::warn!(error = %err, "ignoring unreadable history state");
				}
			},
			Ok(None) => {}
			Err(err) => {
				tracing::warn!(error = %err, "failed to read history state");
			}
		}
	}

	history.location().unwrap_or_else(|err| {
		tracing::warn!(error = %err, "failed to read browser location");
		Location::default()
	})
}

fn sync_location(history: &dyn History, embedded: bool, signal: &Signal<Location>) -> Location {
	let location = read_location(history, embedded);
	tracing::debug!(url = %location, "history traversal");
	signal.set(location.clone());
	location
}
