//! Browser backend tests.
//!
//! Run with:
//!   wasm-pack test --chrome --headless crates/locus-nav

#![cfg(target_arch = "wasm32")]

use locus_nav::{
	BrowserHistory, BrowserStorage, History, KeyValueStorage, Location, NavigationConfig,
	Navigator,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn clear_storage() {
	if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
		let _ = storage.clear();
	}
}

#[wasm_bindgen_test]
fn test_browser_history_push_changes_address() {
	let history = BrowserHistory;
	history
		.push_state(None, Some("/locus-test/push?x=1#frag"))
		.unwrap();

	let location = history.location().unwrap();
	assert_eq!(location.path, vec!["locus-test", "push"]);
	assert_eq!(location.query_value("x"), Some("1"));
	assert_eq!(location.fragment.as_deref(), Some("frag"));
}

#[wasm_bindgen_test]
fn test_browser_history_state_payload() {
	let history = BrowserHistory;
	history.replace_state(Some("payload"), None).unwrap();
	assert_eq!(history.state().unwrap().as_deref(), Some("payload"));

	history.replace_state(None, None).unwrap();
	assert_eq!(history.state().unwrap(), None);
}

#[wasm_bindgen_test]
fn test_browser_storage_roundtrip() {
	clear_storage();
	let storage = BrowserStorage;

	storage.set_item("locus_test_key", "value").unwrap();
	assert_eq!(
		storage.get_item("locus_test_key").unwrap().as_deref(),
		Some("value")
	);

	storage.remove_item("locus_test_key").unwrap();
	assert_eq!(storage.get_item("locus_test_key").unwrap(), None);
}

#[wasm_bindgen_test]
fn test_browser_navigator_persists_location() {
	clear_storage();
	let navigator = Navigator::browser(NavigationConfig::default()).unwrap();
	let target = Location::new(["workbench", "locus-wasm", "tracker"]);

	assert!(navigator.navigate(&target));
	assert!(!navigator.navigate(&target));

	assert_eq!(BrowserHistory.location().unwrap(), target);
	assert_eq!(navigator.last_location(), Some(target.clone()));
	assert_eq!(navigator.last_workspace_location("locus-wasm"), Some(target));
}
