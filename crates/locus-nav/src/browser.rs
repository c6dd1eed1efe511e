//! Browser backends (wasm32 only).
//!
//! Thin wrappers over `window.history`, `window.location`, `window.localStorage`
//! and the `popstate` event.
//!
//! ```ignore
//! use locus_nav::{Location, NavigationConfig, Navigator};
//!
//! let navigator = Navigator::browser(NavigationConfig::default())?;
//! navigator.location().subscribe(|location| render(location));
//! navigator.navigate(&Location::new(["workbench", "acme"]));
//! ```

use locus_core::{Location, codec};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::backend::{History, KeyValueStorage, Listener, PopStateCallback, PopStateSource};
use crate::config::NavigationConfig;
use crate::error::NavigationError;
use crate::navigator::Navigator;

/// `window.history` and `window.location`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

/// `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

/// `popstate` events on `window`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserEvents;

impl Navigator {
	/// Creates a navigator over the browser's history, location and
	/// localStorage, following back/forward traversal.
	pub fn browser(config: NavigationConfig) -> Result<Self, NavigationError> {
		window()?;
		Ok(Self::new(config, BrowserHistory, BrowserStorage, &BrowserEvents))
	}
}

fn window() -> Result<web_sys::Window, NavigationError> {
	web_sys::window().ok_or(NavigationError::Unavailable("window"))
}

fn web_history() -> Result<web_sys::History, NavigationError> {
	window()?.history().map_err(history_error)
}

fn local_storage() -> Result<web_sys::Storage, NavigationError> {
	window()?
		.local_storage()
		.map_err(storage_error)?
		.ok_or(NavigationError::Unavailable("localStorage"))
}

/// Extracts a readable message from a thrown JS value.
fn js_message(value: &JsValue) -> String {
	if let Some(error) = value.dyn_ref::<js_sys::Error>() {
		return String::from(error.message());
	}
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn history_error(value: JsValue) -> NavigationError {
	NavigationError::History(js_message(&value))
}

fn storage_error(value: JsValue) -> NavigationError {
	NavigationError::Storage(js_message(&value))
}

impl History for BrowserHistory {
	fn location(&self) -> Result<Location, NavigationError> {
		let location = window()?.location();
		let pathname = location.pathname().map_err(history_error)?;
		let search = location.search().map_err(history_error)?;
		let hash = location.hash().map_err(history_error)?;
		Ok(codec::parse_location(&pathname, &search, &hash))
	}

	fn state(&self) -> Result<Option<String>, NavigationError> {
		let state = web_history()?.state().map_err(history_error)?;
		Ok(state.as_string())
	}

	fn push_state(&self, state: Option<&str>, url: Option<&str>) -> Result<(), NavigationError> {
		let data = state.map(JsValue::from_str).unwrap_or(JsValue::NULL);
		web_history()?
			.push_state_with_url(&data, "", url)
			.map_err(history_error)
	}

	fn replace_state(
		&self,
		state: Option<&str>,
		url: Option<&str>,
	) -> Result<(), NavigationError> {
		let data = state.map(JsValue::from_str).unwrap_or(JsValue::NULL);
		web_history()?
			.replace_state_with_url(&data, "", url)
			.map_err(history_error)
	}

	fn back(&self) -> Result<(), NavigationError> {
		web_history()?.back().map_err(history_error)
	}

	fn forward(&self) -> Result<(), NavigationError> {
		web_history()?.forward().map_err(history_error)
	}
}

impl KeyValueStorage for BrowserStorage {
	fn get_item(&self, key: &str) -> Result<Option<String>, NavigationError> {
		local_storage()?.get_item(key).map_err(storage_error)
	}

	fn set_item(&self, key: &str, value: &str) -> Result<(), NavigationError> {
		local_storage()?.set_item(key, value).map_err(storage_error)
	}

	fn remove_item(&self, key: &str) -> Result<(), NavigationError> {
		local_storage()?.remove_item(key).map_err(storage_error)
	}
}

impl PopStateSource for BrowserEvents {
	fn on_pop_state(&self, callback: PopStateCallback) -> Result<Listener, NavigationError> {
		let window = window()?;
		let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			callback();
		}) as Box<dyn FnMut(web_sys::Event)>);

		window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			.map_err(history_error)?;

		Ok(Listener::new(move || {
			if let Err(err) = window
				.remove_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			{
				tracing::debug!(error = %js_message(&err), "failed to remove popstate listener");
			}
		}))
	}
}
