//! Events and the listener registry.
//!
//! Listeners are bound to element ids. The registry is owned by the
//! [`Document`](super::Document); when a subtree is replaced every listener
//! bound to an element of the old subtree is dropped, the same way a browser
//! discards listeners together with the nodes they were attached to.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use super::markup::TagInfo;

/// Event kinds understood by the document model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
	/// Pointer activation.
	Click,
	/// Form submission.
	Submit,
	/// Value change of an input.
	Input,
	/// Any other DOM event name.
	Custom(String),
}

impl EventType {
	/// Returns the DOM event name.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Click => "click",
			Self::Submit => "submit",
			Self::Input => "input",
			Self::Custom(name) => name,
		}
	}
}

/// An event delivered to listeners.
#[derive(Debug)]
pub struct Event {
	kind: EventType,
	target: String,
	values: HashMap<String, String>,
	default_prevented: Cell<bool>,
}

impl Event {
	/// Creates an event for the element with the given id.
	pub fn new(kind: EventType, target: impl Into<String>) -> Self {
		Self {
			kind,
			target: target.into(),
			values: HashMap::new(),
			default_prevented: Cell::new(false),
		}
	}

	/// Creates a click event.
	pub fn click(target: impl Into<String>) -> Self {
		Self::new(EventType::Click, target)
	}

	/// Creates a submit event carrying the form field values.
	pub fn submit<I, K, V>(target: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut event = Self::new(EventType::Submit, target);
		event.values = values
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect();
		event
	}

	/// Returns the event kind.
	pub fn kind(&self) -> &EventType {
		&self.kind
	}

	/// Returns the target element id.
	pub fn target(&self) -> &str {
		&self.target
	}

	/// Returns a submitted form value.
	pub fn value(&self, name: &str) -> Option<&str> {
		self.values.get(name).map(String::as_str)
	}

	/// Returns all submitted values.
	pub fn values(&self) -> &HashMap<String, String> {
		&self.values
	}

	/// Marks the default action as cancelled.
	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
	}

	/// Returns whether a listener cancelled the default action.
	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

/// The element a click landed on, as seen by global click interceptors.
#[derive(Debug, Clone)]
pub struct ClickTarget {
	tag: TagInfo,
}

impl ClickTarget {
	pub(crate) fn new(tag: TagInfo) -> Self {
		Self { tag }
	}

	/// Lower-cased tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag.tag
	}

	/// Returns an attribute of the clicked element.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.tag.attribute(name)
	}

	/// Returns whether the clicked element carries the attribute.
	pub fn has_attribute(&self, name: &str) -> bool {
		self.tag.has_attribute(name)
	}
}

/// Listener callback.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Global click interceptor. Returns `true` when it handled the click.
pub type ClickInterceptor = Rc<dyn Fn(&ClickTarget) -> bool>;

/// Handle returned when a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub(crate) u64);

/// Handle returned when a click interceptor is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterceptorHandle(pub(crate) u64);

struct Binding {
	element_id: String,
	event_type: EventType,
	listener: Listener,
}

/// Registry for listeners indexed by handle.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
	bindings: HashMap<ListenerHandle, Binding>,
	next: u64,
}

impl ListenerRegistry {
	pub(crate) fn register(
		&mut self,
		element_id: &str,
		event_type: EventType,
		listener: Listener,
	) -> ListenerHandle {
		self.next += 1;
		let handle = ListenerHandle(self.next);
		self.bindings.insert(
			handle,
			Binding {
				element_id: element_id.to_string(),
				event_type,
				listener,
			},
		);
		handle
	}

	pub(crate) fn unregister(&mut self, handle: ListenerHandle) -> bool {
		self.bindings.remove(&handle).is_some()
	}

	/// Drops every listener bound to one of the given element ids.
	pub(crate) fn drop_elements(&mut self, element_ids: &[String]) -> usize {
		let before = self.bindings.len();
		self.bindings
			.retain(|_, binding| !element_ids.contains(&binding.element_id));
		before - self.bindings.len()
	}

	/// Listeners for an element and event type, ordered by registration.
	pub(crate) fn listeners_for(&self, element_id: &str, event_type: &EventType) -> Vec<Listener> {
		let mut matching: Vec<_> = self
			.bindings
			.iter()
			.filter(|(_, b)| b.element_id == element_id && &b.event_type == event_type)
			.collect();
		matching.sort_by_key(|(handle, _)| handle.0);
		matching
			.into_iter()
			.map(|(_, b)| Rc::clone(&b.listener))
			.collect()
	}

	pub(crate) fn count_for(&self, element_id: &str) -> usize {
		self.bindings
			.values()
			.filter(|b| b.element_id == element_id)
			.count()
	}

	pub(crate) fn len(&self) -> usize {
		self.bindings.len()
	}
}
