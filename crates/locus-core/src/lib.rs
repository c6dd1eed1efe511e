//! Locus Core - Location Record and URL Codec
//!
//! The data model shared by every locus crate:
//!
//! - [`location`]: the [`Location`] record (path segments, query, fragment)
//! - [`codec`]: conversion between [`Location`] and URL strings
//! - [`reactive`]: the [`Signal`] observable holding the current location
//!
//! ## Example
//!
//! ```
//! use locus_core::{Location, codec};
//!
//! let location = codec::parse_url("/workbench/acme?mode=edit&debug#section-2");
//! assert_eq!(location.path, vec!["workbench", "acme"]);
//! assert_eq!(location.workspace(), Some("acme"));
//! assert_eq!(location.query_value("mode"), Some("edit"));
//! assert_eq!(location.fragment.as_deref(), Some("section-2"));
//!
//! let back = Location::new(["workbench", "acme"]).with_query_param("mode", Some("edit"));
//! assert_eq!(back.to_url(), "/workbench/acme?mode=edit");
//! ```

pub mod codec;
pub mod location;
pub mod reactive;

pub use codec::{location_to_url, parse_hash, parse_location, parse_path, parse_query, parse_url};
pub use location::{Location, Query};
pub use reactive::{Signal, SubscriptionId};
