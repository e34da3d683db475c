//! Mount bookkeeping and in-place re-rendering.

use std::cell::{Cell, RefCell};

use super::{Component, ComponentError, ComponentState};
use crate::dom::{Document, Event, EventType, ListenerHandle};
use crate::warn_log;

/// Tracks whether a component is mounted and which listeners it attached.
///
/// A component is mounted at most once at a time: [`Lifecycle::begin`]
/// refuses a second mount until [`Lifecycle::end`] ran.
#[derive(Debug, Default)]
pub struct Lifecycle {
	document: RefCell<Option<Document>>,
	handles: RefCell<Vec<ListenerHandle>>,
	mounts: Cell<usize>,
	unmounts: Cell<usize>,
}

impl Lifecycle {
	/// Creates an unmounted lifecycle.
	pub fn new() -> Self {
		Self::default()
	}

	/// Marks the component as mounted in `document`.
	///
	/// Returns `false` without side effects when it is already mounted.
	pub fn begin(&self, document: &Document) -> bool {
		if self.document.borrow().is_some() {
			warn_log!("ignoring mount of an already mounted component");
			return false;
		}
		*self.document.borrow_mut() = Some(document.clone());
		self.mounts.set(self.mounts.get() + 1);
		true
	}

	/// Attaches a listener that is detached again by [`Lifecycle::end`].
	///
	/// # Errors
	///
	/// Fails when called while not mounted or when the element is missing.
	pub fn listen<F>(
		&self,
		element_id: &str,
		event_type: EventType,
		listener: F,
	) -> Result<ListenerHandle, ComponentError>
	where
		F: Fn(&Event) + 'static,
	{
		let document = self
			.document()
			.ok_or_else(|| ComponentError::NotMounted(element_id.to_string()))?;
		let handle = document.add_listener(element_id, event_type, listener)?;
		self.handles.borrow_mut().push(handle);
		Ok(handle)
	}

	/// Detaches every tracked listener and marks the component unmounted.
	///
	/// Returns `false` when it was not mounted.
	pub fn end(&self) -> bool {
		let Some(document) = self.document.borrow_mut().take() else {
			return false;
		};
		let handles: Vec<_> = self.handles.borrow_mut().drain(..).collect();
		for handle in handles {
			document.remove_listener(handle);
		}
		self.unmounts.set(self.unmounts.get() + 1);
		true
	}

	/// Returns whether the component is mounted.
	pub fn is_mounted(&self) -> bool {
		self.document.borrow().is_some()
	}

	/// Returns the document the component is mounted in.
	pub fn document(&self) -> Option<Document> {
		self.document.borrow().clone()
	}

	/// Number of completed mounts.
	pub fn mount_count(&self) -> usize {
		self.mounts.get()
	}

	/// Number of completed unmounts.
	pub fn unmount_count(&self) -> usize {
		self.unmounts.get()
	}

	/// Number of listeners currently tracked.
	pub fn listener_count(&self) -> usize {
		self.handles.borrow().len()
	}
}

/// Components with local state that re-render themselves in place.
pub trait Stateful: Component {
	/// The component's state cell.
	fn state(&self) -> &RefCell<ComponentState>;

	/// The component's mount bookkeeping.
	fn lifecycle(&self) -> &Lifecycle;

	/// Shallow-merges `partial` into the state, then re-renders in place.
	///
	/// Returns whether the document was updated; a component that is not
	/// attached only records the new state.
	fn set_state(&self, partial: ComponentState) -> Result<bool, ComponentError> {
		self.state().borrow_mut().merge(partial);
		self.rerender()
	}

	/// Replaces only this component's subtree and re-attaches its handlers.
	fn rerender(&self) -> Result<bool, ComponentError> {
		let Some(document) = self.lifecycle().document() else {
			return Ok(false);
		};
		if !document.contains(self.id().as_str()) {
			return Ok(false);
		}
		let markup = self.render();
		self.unmount(&document);
		document.replace_element(self.id().as_str(), &markup)?;
		self.mount(&document)?;
		Ok(true)
	}
}
