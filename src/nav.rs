//! History and localStorage synchronization.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "nav")]
//! # {
//! use locus::nav::{Location, MemoryHistory, MemoryStorage, NavigationConfig, Navigator};
//!
//! let history = MemoryHistory::new("/");
//! let navigator = Navigator::new(
//! 	NavigationConfig::default(),
//! 	history.clone(),
//! 	MemoryStorage::new(),
//! 	&history,
//! );
//! assert!(navigator.navigate(&Location::new(["workbench", "acme"])));
//! # }
//! ```

#[cfg(feature = "nav")]
pub use locus_nav::*;
