//! Navigation configuration.

use serde::Deserialize;

use crate::error::NavigationError;

/// Default storage key for the last known location.
pub const DEFAULT_STORAGE_KEY: &str = "platform_last_loc";

/// Settings for a [`Navigator`](crate::Navigator).
///
/// Hosts usually build this in code, but it can also be read from JSON; any
/// missing field takes its default.
///
/// ```
/// use locus_nav::NavigationConfig;
///
/// let config = NavigationConfig::from_json(r#"{"storage_key":"desk_last_loc"}"#).unwrap();
/// assert_eq!(config.storage_key, "desk_last_loc");
/// assert!(!config.embedded);
/// assert_eq!(config.workspace_key("acme"), "desk_last_loc_acme");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
	/// localStorage key holding the last navigated location.
	pub storage_key: String,
	/// Keep the address bar untouched and carry the location in history state.
	///
	/// Used when the application is embedded in a host page whose URL it does
	/// not own.
	pub embedded: bool,
}

impl Default for NavigationConfig {
	fn default() -> Self {
		Self {
			storage_key: DEFAULT_STORAGE_KEY.to_string(),
			embedded: false,
		}
	}
}

impl NavigationConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a configuration from JSON.
	pub fn from_json(json: &str) -> Result<Self, NavigationError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Sets the storage key.
	pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
		self.storage_key = key.into();
		self
	}

	/// Enables or disables embedded mode.
	pub fn with_embedded(mut self, embedded: bool) -> Self {
		self.embedded = embedded;
		self
	}

	/// Storage key for the last location inside `workspace`.
	pub fn workspace_key(&self, workspace: &str) -> String {
		format!("{}_{}", self.storage_key, workspace)
	}

	fn validate(&self) -> Result<(), NavigationError> {
		if self.storage_key.trim().is_empty() {
			return Err(NavigationError::Config(
				"storage_key must not be empty".to_string(),
			));
		}
		Ok(())
	}
}
