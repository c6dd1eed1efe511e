//! Location record, URL codec and reactive signal.
//!
//! # Examples
//!
//! ```rust
//! # #[cfg(feature = "core")]
//! # {
//! use locus::core::{Location, parse_url};
//!
//! let location = parse_url("/workbench/acme?issue=TSK-1");
//! assert_eq!(location.workspace(), Some("acme"));
//! # }
//! ```

#[cfg(feature = "core")]
pub use locus_core::*;
