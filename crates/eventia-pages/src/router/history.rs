//! History API abstraction.
//!
//! The router talks to a [`History`]. [`MemoryHistory`] keeps the entries in
//! memory (native builds and tests); `BrowserHistory` drives the browser's
//! History API on WASM.

use std::cell::RefCell;
use std::rc::Rc;

/// Errors raised by history operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
	/// The platform refused the operation.
	#[error("history operation failed: {0}")]
	Platform(String),
	/// There is no entry to go back to.
	#[error("no previous history entry")]
	AtStart,
}

/// Callback invoked with the new path when the user moves through history.
pub type PopListener = Rc<dyn Fn(&str)>;

/// Location history the router reads and writes.
pub trait History {
	/// Returns the current path.
	fn current_path(&self) -> String;

	/// Adds an entry for `path`.
	fn push(&self, path: &str) -> Result<(), HistoryError>;

	/// Replaces the current entry with `path`.
	fn replace(&self, path: &str) -> Result<(), HistoryError>;

	/// Performs a full page load of `path`, outside the router's control.
	fn assign(&self, path: &str) -> Result<(), HistoryError>;

	/// Moves one entry back; pop listeners observe the new path.
	fn back(&self) -> Result<(), HistoryError>;

	/// Registers a listener for back/forward moves.
	fn on_pop(&self, listener: PopListener);
}

#[derive(Default)]
struct MemoryState {
	entries: Vec<String>,
	index: usize,
	assigned: Vec<String>,
	listeners: Vec<PopListener>,
}

/// In-memory history.
///
/// A full page load through [`History::assign`] becomes the current entry
/// and is recorded in [`MemoryHistory::assigned`]; pop listeners are not
/// notified, as a reload would tear the page down.
#[derive(Clone)]
pub struct MemoryHistory {
	state: Rc<RefCell<MemoryState>>,
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("MemoryHistory")
			.field("entries", &state.entries)
			.field("index", &state.index)
			.field("assigned", &state.assigned)
			.finish()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a history whose only entry is `initial_path`.
	pub fn new(initial_path: &str) -> Self {
		Self {
			state: Rc::new(RefCell::new(MemoryState {
				entries: vec![initial_path.to_string()],
				..MemoryState::default()
			})),
		}
	}

	/// All entries, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.state.borrow().entries.clone()
	}

	/// Paths loaded through [`History::assign`].
	pub fn assigned(&self) -> Vec<String> {
		self.state.borrow().assigned.clone()
	}

	/// Moves one entry forward.
	pub fn forward(&self) -> Result<(), HistoryError> {
		let path = {
			let mut state = self.state.borrow_mut();
			if state.index + 1 >= state.entries.len() {
				return Err(HistoryError::Platform("no next history entry".to_string()));
			}
			state.index += 1;
			state.entries[state.index].clone()
		};
		self.notify(&path);
		Ok(())
	}

	fn notify(&self, path: &str) {
		let listeners = self.state.borrow().listeners.clone();
		for listener in listeners {
			listener(path);
		}
	}
}

impl History for MemoryHistory {
	fn current_path(&self) -> String {
		let state = self.state.borrow();
		state.entries[state.index].clone()
	}

	fn push(&self, path: &str) -> Result<(), HistoryError> {
		let mut state = self.state.borrow_mut();
		let keep = state.index + 1;
		state.entries.truncate(keep);
		state.entries.push(path.to_string());
		state.index = keep;
		Ok(())
	}

	fn replace(&self, path: &str) -> Result<(), HistoryError> {
		let mut state = self.state.borrow_mut();
		let index = state.index;
		state.entries[index] = path.to_string();
		Ok(())
	}

	fn assign(&self, path: &str) -> Result<(), HistoryError> {
		self.push(path)?;
		self.state.borrow_mut().assigned.push(path.to_string());
		Ok(())
	}

	fn back(&self) -> Result<(), HistoryError> {
		let path = {
			let mut state = self.state.borrow_mut();
			if state.index == 0 {
				return Err(HistoryError::AtStart);
			}
			state.index -= 1;
			state.entries[state.index].clone()
		};
		self.notify(&path);
		Ok(())
	}

	fn on_pop(&self, listener: PopListener) {
		self.state.borrow_mut().listeners.push(listener);
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;

#[cfg(target_arch = "wasm32")]
mod browser {
	use wasm_bindgen::JsCast;
	use wasm_bindgen::JsValue;
	use wasm_bindgen::closure::Closure;

	use super::{History, HistoryError, PopListener};

	fn platform(error: JsValue) -> HistoryError {
		HistoryError::Platform(format!("{:?}", error))
	}

	fn window() -> Result<web_sys::Window, HistoryError> {
		web_sys::window().ok_or_else(|| HistoryError::Platform("no window".to_string()))
	}

	/// History backed by `window.history` and `window.location`.
	#[derive(Debug, Default, Clone, Copy)]
	pub struct BrowserHistory;

	impl History for BrowserHistory {
		fn current_path(&self) -> String {
			window()
				.ok()
				.and_then(|w| w.location().pathname().ok())
				.unwrap_or_else(|| "/".to_string())
		}

		fn push(&self, path: &str) -> Result<(), HistoryError> {
			window()?
				.history()
				.map_err(platform)?
				.push_state_with_url(&JsValue::NULL, "", Some(path))
				.map_err(platform)
		}

		fn replace(&self, path: &str) -> Result<(), HistoryError> {
			window()?
				.history()
				.map_err(platform)?
				.replace_state_with_url(&JsValue::NULL, "", Some(path))
				.map_err(platform)
		}

		fn assign(&self, path: &str) -> Result<(), HistoryError> {
			window()?.location().set_href(path).map_err(platform)
		}

		fn back(&self) -> Result<(), HistoryError> {
			window()?.history().map_err(platform)?.back().map_err(platform)
		}

		fn on_pop(&self, listener: PopListener) {
			let Ok(window) = window() else {
				return;
			};
			let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
				let path = web_sys::window()
					.and_then(|w| w.location().pathname().ok())
					.unwrap_or_else(|| "/".to_string());
				listener(&path);
			});
			if window
				.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
				.is_ok()
			{
				closure.forget();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_push_and_back_notifies() {
		let history = MemoryHistory::new("/");
		let seen = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&seen);
		history.on_pop(Rc::new(move |path| sink.borrow_mut().push(path.to_string())));

		history.push("/a").unwrap();
		history.push("/b").unwrap();
		history.back().unwrap();

		assert_eq!(history.current_path(), "/a");
		assert_eq!(*seen.borrow(), vec!["/a"]);
	}

	#[rstest]
	fn test_push_truncates_forward_entries() {
		let history = MemoryHistory::new("/");
		history.push("/a").unwrap();
		history.back().unwrap();
		history.push("/b").unwrap();
		assert_eq!(history.entries(), vec!["/", "/b"]);
		assert!(history.forward().is_err());
	}

	#[rstest]
	fn test_back_at_start() {
		let history = MemoryHistory::new("/");
		assert_eq!(history.back(), Err(HistoryError::AtStart));
	}

	#[rstest]
	fn test_replace_and_assign() {
		let history = MemoryHistory::new("/");
		history.replace("/home").unwrap();
		history.assign("/login").unwrap();
		assert_eq!(history.entries(), vec!["/home", "/login"]);
		assert_eq!(history.assigned(), vec!["/login"]);
		assert_eq!(history.current_path(), "/login");
	}
}
