//! Locus Nav - History and Storage Synchronization
//!
//! Keeps the application's current [`Location`] in step with the browser:
//!
//! - [`navigator`]: the [`Navigator`] context object (navigate, back/forward sync,
//!   last-location persistence)
//! - [`config`]: [`NavigationConfig`] (storage key, embedded mode)
//! - [`backend`]: the [`History`], [`KeyValueStorage`] and [`PopStateSource`] seams
//! - [`memory`]: in-memory backends for native targets and tests
//! - [`browser`]: web-sys backends (wasm32 only)
//! - [`collapse`]: per-workspace tree collapse flags
//!
//! ## Example
//!
//! ```
//! use locus_nav::{Location, MemoryHistory, MemoryStorage, NavigationConfig, Navigator};
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
//! assert!(navigator.navigate(&Location::new(["workbench", "acme", "tracker"])));
//! assert!(!navigator.navigate(&Location::new(["workbench", "acme", "tracker"])));
//! assert!(storage.contains_key("platform_last_loc_acme"));
//!
//! history.go(-1);
//! assert_eq!(navigator.current().to_url(), "/workbench/acme");
//! ```

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod collapse;
pub mod config;
pub mod error;
pub mod memory;
pub mod navigator;

pub use backend::{History, KeyValueStorage, Listener, PopStateCallback, PopStateSource};
#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserEvents, BrowserHistory, BrowserStorage};
pub use config::{DEFAULT_STORAGE_KEY, NavigationConfig};
pub use error::NavigationError;
pub use locus_core::{Location, Query, Signal};
pub use memory::{MemoryHistory, MemoryStorage};
pub use navigator::{BeforeNavigate, NavigationMode, Navigator};
