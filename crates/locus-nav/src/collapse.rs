//! Per-workspace tree collapse flags.
//!
//! Navigation trees remember which nodes the user collapsed. A collapsed node
//! is stored as `"1"` under `<workspace>_<id>_collapsed`; expanding removes the
//! key.

use crate::backend::KeyValueStorage;
use crate::error::NavigationError;

/// Value stored for a collapsed node.
pub const COLLAPSED: &str = "1";

/// Storage key for the collapse flag of node `id` in `workspace`.
///
/// Without a workspace the prefix is empty (`_<id>_collapsed`).
pub fn collapsed_key(workspace: Option<&str>, id: &str) -> String {
	format!("{}_{}_collapsed", workspace.unwrap_or_default(), id)
}

/// Returns `true` if node `id` is collapsed. Storage failures read as expanded.
pub fn is_collapsed(storage: &dyn KeyValueStorage, workspace: Option<&str>, id: &str) -> bool {
	let key = collapsed_key(workspace, id);
	match storage.get_item(&key) {
		Ok(value) => value.as_deref() == Some(COLLAPSED),
		Err(err) => {
			tracing::warn!(key = %key, error = %err, "failed to read collapse flag");
			false
		}
	}
}

/// Stores or clears the collapse flag of node `id`.
pub fn set_collapsed(
	storage: &dyn KeyValueStorage,
	workspace: Option<&str>,
	id: &str,
	collapsed: bool,
) -> Result<(), NavigationError> {
	let key = collapsed_key(workspace, id);
	if collapsed {
		storage.set_item(&key, COLLAPSED)
	} else {
		storage.remove_item(&key)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::memory::MemoryStorage;
	use rstest::rstest;

	#[rstest]
	#[case(Some("acme"), "node-1", "acme_node-1_collapsed")]
	#[case(None, "node-1", "_node-1_collapsed")]
	fn test_collapsed_key(
		#[case] workspace: Option<&str>,
		#[case] id: &str,
		#[case] expected: &str,
	) {
		assert_eq!(collapsed_key(workspace, id), expected);
	}

	#[rstest]
	fn test_collapse_and_expand() {
		let storage = MemoryStorage::new();

		set_collapsed(&storage, Some("acme"), "n", true).unwrap();
		assert!(is_collapsed(&storage, Some("acme"), "n"));
		assert_eq!(storage.get("acme_n_collapsed").as_deref(), Some("1"));
		assert!(!is_collapsed(&storage, Some("other"), "n"));

		set_collapsed(&storage, Some("acme"), "n", false).unwrap();
		assert!(!is_collapsed(&storage, Some("acme"), "n"));
		assert!(storage.is_empty());
	}

	#[rstest]
	fn test_unexpected_value_reads_as_expanded() {
		let storage = MemoryStorage::new();
		storage.set_item("acme_n_collapsed", "true").unwrap();
		assert!(!is_collapsed(&storage, Some("acme"), "n"));
	}

	#[rstest]
	fn test_set_collapsed_propagates_storage_error() {
		let storage = MemoryStorage::new();
		storage.set_read_only(true);
		assert!(set_collapsed(&storage, Some("acme"), "n", true).is_err());
	}
}
