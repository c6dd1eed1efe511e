//! The structured location record.
//!
//! A [`Location`] is the decoded form of an application URL. Path segments and
//! query values are always stored decoded; [`crate::codec`] re-encodes them on
//! the way out.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::codec;

/// Query parameters keyed by name.
///
/// A `None` value is a bare key (`?flag`). Insertion order is kept so that a
/// record always serializes to the same URL.
pub type Query = IndexMap<String, Option<String>>;

/// Index of the path segment holding the workspace identifier.
const WORKSPACE_SEGMENT: usize = 1;

/// A decoded navigation location.
///
/// Persisted and carried in history state as JSON:
///
/// ```json
/// {"path":["workbench","acme"],"query":{"mode":"edit","debug":null},"fragment":"top"}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
	/// Decoded path segments, in order.
	#[serde(default)]
	pub path: Vec<String>,
	/// Decoded query parameters.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub query: Option<Query>,
	/// Decoded fragment, without the leading `#`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fragment: Option<String>,
}

impl Location {
	/// Creates a location with the given path segments and no query or fragment.
	pub fn new<I, S>(path: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			path: path.into_iter().map(Into::into).collect(),
			query: None,
			fragment: None,
		}
	}

	/// Parses a URL or `path?query#fragment` string.
	///
	/// Never fails; see [`codec::parse_url`].
	pub fn from_url(url: &str) -> Self {
		codec::parse_url(url)
	}

	/// Serializes this location into a URL string.
	pub fn to_url(&self) -> String {
		codec::location_to_url(self)
	}

	/// Appends a path segment.
	pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
		self.path.push(segment.into());
		self
	}

	/// Sets a query parameter. `None` produces a bare key.
	pub fn with_query_param(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
		self.query
			.get_or_insert_with(Query::new)
			.insert(key.into(), value.map(str::to_string));
		self
	}

	/// Sets the fragment.
	pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
		self.fragment = Some(fragment.into());
		self
	}

	/// Returns the path segment at `index`.
	pub fn segment(&self, index: usize) -> Option<&str> {
		self.path.get(index).map(String::as_str)
	}

	/// Returns the workspace identifier (the second path segment).
	pub fn workspace(&self) -> Option<&str> {
		self.segment(WORKSPACE_SEGMENT)
	}

	/// Returns the value of a query parameter.
	///
	/// Bare keys and missing keys both yield `None`; use
	/// [`has_query_key`](Self::has_query_key) to tell them apart.
	pub fn query_value(&self, key: &str) -> Option<&str> {
		self.query.as_ref()?.get(key)?.as_deref()
	}

	/// Returns `true` if the query contains `key`, with or without a value.
	pub fn has_query_key(&self, key: &str) -> bool {
		self.query
			.as_ref()
			.is_some_and(|query| query.contains_key(key))
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_url())
	}
}

impl FromStr for Location {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from_url(s))
	}
}
