//! Error types for history and storage backends.

/// Errors raised by navigation backends and configuration loading.
///
/// The navigation surface itself never returns these: [`Navigator`](crate::Navigator)
/// logs them and reports a navigation that did not happen as `false`.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
	/// A browser API is not reachable (no window, storage disabled, ...).
	#[error("Browser API unavailable: {0}")]
	Unavailable(&'static str),

	/// `pushState`/`replaceState`/`back` or a location read failed.
	#[error("History operation failed: {0}")]
	History(String),

	/// A storage read or write failed.
	#[error("Storage operation failed: {0}")]
	Storage(String),

	/// A location record could not be (de)serialized.
	#[error("Serialization failed: {0}")]
	Serialization(#[from] serde_json::Error),

	/// Invalid navigation configuration.
	#[error("Invalid configuration: {0}")]
	Config(String),
}
