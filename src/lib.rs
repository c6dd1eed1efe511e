//! # Locus
//!
//! Client-side navigation location for browser applications.
//!
//! Locus models the address of a single-page application as a structured
//! [`Location`](core::Location) (path segments, ordered query parameters,
//! fragment), converts it to and from URL text, and keeps it in sync with the
//! browser's history and localStorage.
//!
//! ## Feature Flags
//!
//! - `core` - [`Location`](core::Location), the URL codec and
//!   [`Signal`](core::Signal)
//! - `nav` (default) - the [`Navigator`](nav::Navigator) with history,
//!   back/forward and last-location persistence
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "nav")]
//! # {
//! use locus::prelude::*;
//!
//! let history = MemoryHistory::new("/workbench/acme");
//! let storage = MemoryStorage::new();
//! let navigator = Navigator::new(
//! 	NavigationConfig::default(),
//! 	history.clone(),
//! 	storage.clone(),
//! 	&history,
//! );
//!
//! let tracker = navigator.current().with_segment("tracker");
//! assert!(navigator.navigate(&tracker));
//! assert_eq!(navigator.last_workspace_location("acme"), Some(tracker));
//! # }
//! ```
//!
//! On `wasm32` targets, `Navigator::browser` wires the same navigator to
//! `window.history`, `window.location` and `window.localStorage`.

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "nav")]
pub mod nav;

/// Commonly used types.
pub mod prelude {
	#[cfg(feature = "core")]
	pub use crate::core::{Location, Query, Signal, location_to_url, parse_url};

	#[cfg(feature = "nav")]
	pub use crate::nav::{
		History, KeyValueStorage, MemoryHistory, MemoryStorage, NavigationConfig,
		NavigationError, NavigationMode, Navigator,
	};
}
