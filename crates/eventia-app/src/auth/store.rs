//! Session storage.
//!
//! The session lives in a flat key-value store: `localStorage` in the
//! browser, a map natively.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Errors raised by a session store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	/// The storage backend is missing or refused the operation.
	#[error("Session storage unavailable: {0}")]
	Unavailable(String),
}

/// Key-value contract for session persistence.
pub trait SessionStore {
	/// Reads a value.
	fn get(&self, key: &str) -> Option<String>;

	/// Writes a value.
	fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

	/// Deletes a value. Deleting a missing key is not an error.
	fn remove(&self, key: &str);

	/// Deletes every value.
	fn clear(&self);
}

/// In-memory store.
///
/// Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored keys.
	pub fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	/// Returns whether the store is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.borrow().is_empty()
	}
}

impl SessionStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
		self.entries
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) {
		self.entries.borrow_mut().remove(key);
	}

	fn clear(&self) {
		self.entries.borrow_mut().clear();
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
	use super::{SessionStore, StoreError};
	use eventia_pages::warn_log;

	/// `window.localStorage`.
	#[derive(Debug, Default, Clone, Copy)]
	pub struct LocalStorage;

	impl LocalStorage {
		fn storage(&self) -> Result<web_sys::Storage, StoreError> {
			web_sys::window()
				.ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
				.local_storage()
				.map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
				.ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
		}
	}

	impl SessionStore for LocalStorage {
		fn get(&self, key: &str) -> Option<String> {
			self.storage().ok()?.get_item(key).ok().flatten()
		}

		fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
			self.storage()?
				.set_item(key, value)
				.map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
		}

		fn remove(&self, key: &str) {
			match self.storage() {
				Ok(storage) => {
					let _ = storage.remove_item(key);
				}
				Err(error) => warn_log!("cannot remove {}: {}", key, error),
			}
		}

		fn clear(&self) {
			if let Ok(storage) = self.storage() {
				let _ = storage.clear();
			}
		}
	}
}
