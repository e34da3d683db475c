//! Document model.
//!
//! The [`Document`] is the single authority over rendered markup and the
//! listeners attached to it. Components are injected into named mount points
//! (roots) and located afterwards by their element id; nothing reaches for an
//! ambient global DOM. On WASM a [`DomBackend`] mirrors every mutation into the
//! real page and [`browser::install_event_delegation`] feeds browser events
//! back into the model.
//!
//! ## Example
//!
//! ```ignore
//! use eventia_pages::dom::{Document, EventType};
//!
//! let document = Document::new();
//! document.create_root("app");
//! document.set_inner_html("app", r#"<button id="go">Go</button>"#)?;
//! document.add_listener("go", EventType::Click, |_| println!("clicked"))?;
//! document.click("go")?;
//! ```

#[cfg(target_arch = "wasm32")]
pub mod browser;
mod events;
pub mod markup;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub use events::{
	ClickInterceptor, ClickTarget, Event, EventType, InterceptorHandle, Listener, ListenerHandle,
};
use events::ListenerRegistry;
use markup::ElementSpan;

/// Errors raised by document operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
	/// No root or element carries the id.
	#[error("element not found: {0}")]
	ElementNotFound(String),
	/// Mount points can only have their content replaced.
	#[error("cannot replace mount point element: {0}")]
	RootReplacement(String),
}

/// Receives document mutations so they can be mirrored elsewhere.
pub trait DomBackend {
	/// The inner markup of an element was replaced.
	fn set_inner_html(&self, element_id: &str, markup: &str);

	/// An element (including its own tag) was replaced.
	fn set_outer_html(&self, element_id: &str, markup: &str);
}

/// Backend that mirrors nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedBackend;

impl DomBackend for DetachedBackend {
	fn set_inner_html(&self, _element_id: &str, _markup: &str) {}

	fn set_outer_html(&self, _element_id: &str, _markup: &str) {}
}

struct DocumentInner {
	roots: RefCell<Vec<(String, String)>>,
	listeners: RefCell<ListenerRegistry>,
	interceptors: RefCell<Vec<(InterceptorHandle, ClickInterceptor)>>,
	next_interceptor: Cell<u64>,
	backend: Box<dyn DomBackend>,
}

/// Shared handle to the document model.
///
/// Cloning is cheap; all clones observe the same markup and listeners.
#[derive(Clone)]
pub struct Document {
	inner: Rc<DocumentInner>,
}

impl std::fmt::Debug for Document {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Document")
			.field(
				"roots",
				&self
					.inner
					.roots
					.borrow()
					.iter()
					.map(|(id, _)| id.clone())
					.collect::<Vec<_>>(),
			)
			.field("listeners", &self.total_listeners())
			.finish()
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

/// Where an id was found: the root index, and the element span unless the id
/// names the root itself.
fn locate(roots: &[(String, String)], id: &str) -> Option<(usize, Option<ElementSpan>)> {
	if let Some(index) = roots.iter().position(|(root, _)| root == id) {
		return Some((index, None));
	}
	roots
		.iter()
		.enumerate()
		.find_map(|(index, (_, content))| markup::find_element(content, id).map(|s| (index, Some(s))))
}

impl Document {
	/// Creates a detached document.
	pub fn new() -> Self {
		Self::with_backend(DetachedBackend)
	}

	/// Creates a document that mirrors mutations into `backend`.
	pub fn with_backend<B: DomBackend + 'static>(backend: B) -> Self {
		Self {
			inner: Rc::new(DocumentInner {
				roots: RefCell::new(Vec::new()),
				listeners: RefCell::new(ListenerRegistry::default()),
				interceptors: RefCell::new(Vec::new()),
				next_interceptor: Cell::new(0),
				backend: Box::new(backend),
			}),
		}
	}

	/// Registers an empty mount point. Registering an existing root is a no-op.
	pub fn create_root(&self, id: &str) {
		let mut roots = self.inner.roots.borrow_mut();
		if !roots.iter().any(|(root, _)| root == id) {
			roots.push((id.to_string(), String::new()));
		}
	}

	/// Returns whether `id` is a registered mount point.
	pub fn has_root(&self, id: &str) -> bool {
		self.inner.roots.borrow().iter().any(|(root, _)| root == id)
	}

	/// Returns whether a root or an element with the id is present.
	pub fn contains(&self, id: &str) -> bool {
		locate(&self.inner.roots.borrow(), id).is_some()
	}

	/// Returns the markup inside the root or element.
	pub fn inner_html(&self, id: &str) -> Option<String> {
		let roots = self.inner.roots.borrow();
		let (index, span) = locate(&roots, id)?;
		let content = &roots[index].1;
		Some(match span {
			None => content.clone(),
			Some(span) => span.inner(content).to_string(),
		})
	}

	/// Returns the markup of an element including its own tag.
	pub fn outer_html(&self, id: &str) -> Option<String> {
		let roots = self.inner.roots.borrow();
		let (index, span) = locate(&roots, id)?;
		span.map(|span| span.outer(&roots[index].1).to_string())
	}

	/// Returns the visible text of the root or element.
	pub fn text_content(&self, id: &str) -> Option<String> {
		self.inner_html(id).map(|html| markup::text_content(&html))
	}

	/// Returns an attribute of the element.
	pub fn attribute(&self, id: &str, name: &str) -> Option<String> {
		let roots = self.inner.roots.borrow();
		let (index, span) = locate(&roots, id)?;
		let info = markup::parse_open_tag(span?.open_tag(&roots[index].1))?;
		info.attribute(name).map(str::to_string)
	}

	/// Replaces the markup inside a root or element.
	///
	/// Listeners bound to elements of the replaced content are dropped.
	pub fn set_inner_html(&self, id: &str, html: &str) -> Result<(), DomError> {
		let stale = {
			let mut roots = self.inner.roots.borrow_mut();
			let (index, span) =
				locate(&roots, id).ok_or_else(|| DomError::ElementNotFound(id.to_string()))?;
			let content = &mut roots[index].1;
			match span {
				None => {
					let stale = markup::element_ids(content);
					*content = html.to_string();
					stale
				}
				Some(span) => {
					let stale = markup::element_ids(span.inner(content));
					content.replace_range(span.inner_start..span.inner_end, html);
					stale
				}
			}
		};
		self.inner.listeners.borrow_mut().drop_elements(&stale);
		self.inner.backend.set_inner_html(id, html);
		Ok(())
	}

	/// Replaces an element, its own tag included, with new markup.
	///
	/// Listeners bound to the old element and its descendants are dropped.
	pub fn replace_element(&self, id: &str, html: &str) -> Result<(), DomError> {
		let stale = {
			let mut roots = self.inner.roots.borrow_mut();
			let (index, span) =
				locate(&roots, id).ok_or_else(|| DomError::ElementNotFound(id.to_string()))?;
			let span = span.ok_or_else(|| DomError::RootReplacement(id.to_string()))?;
			let content = &mut roots[index].1;
			let stale = markup::element_ids(span.outer(content));
			content.replace_range(span.start..span.end, html);
			stale
		};
		self.inner.listeners.borrow_mut().drop_elements(&stale);
		self.inner.backend.set_outer_html(id, html);
		Ok(())
	}

	/// Attaches a listener to an element present in the document.
	pub fn add_listener<F>(
		&self,
		element_id: &str,
		event_type: EventType,
		listener: F,
	) -> Result<ListenerHandle, DomError>
	where
		F: Fn(&Event) + 'static,
	{
		if !self.contains(element_id) {
			return Err(DomError::ElementNotFound(element_id.to_string()));
		}
		Ok(self
			.inner
			.listeners
			.borrow_mut()
			.register(element_id, event_type, Rc::new(listener)))
	}

	/// Detaches a listener. Returns `false` if it was already gone.
	pub fn remove_listener(&self, handle: ListenerHandle) -> bool {
		self.inner.listeners.borrow_mut().unregister(handle)
	}

	/// Number of listeners bound to the element.
	pub fn listener_count(&self, element_id: &str) -> usize {
		self.inner.listeners.borrow().count_for(element_id)
	}

	/// Returns whether the element has a listener for the event type.
	pub fn has_listener(&self, element_id: &str, event_type: &EventType) -> bool {
		!self
			.inner
			.listeners
			.borrow()
			.listeners_for(element_id, event_type)
			.is_empty()
	}

	/// Number of listeners in the whole document.
	pub fn total_listeners(&self) -> usize {
		self.inner.listeners.borrow().len()
	}

	/// Delivers an event to the listeners of its target and returns how many
	/// listeners ran.
	pub fn dispatch(&self, event: &Event) -> usize {
		// Listeners may mutate the document; release the registry first.
		let listeners = self
			.inner
			.listeners
			.borrow()
			.listeners_for(event.target(), event.kind());
		for listener in &listeners {
			listener(event);
		}
		listeners.len()
	}

	/// Installs a global click interceptor.
	pub fn add_click_interceptor<F>(&self, interceptor: F) -> InterceptorHandle
	where
		F: Fn(&ClickTarget) -> bool + 'static,
	{
		let next = self.inner.next_interceptor.get() + 1;
		self.inner.next_interceptor.set(next);
		let handle = InterceptorHandle(next);
		self.inner
			.interceptors
			.borrow_mut()
			.push((handle, Rc::new(interceptor)));
		handle
	}

	/// Removes a global click interceptor.
	pub fn remove_click_interceptor(&self, handle: InterceptorHandle) -> bool {
		let mut interceptors = self.inner.interceptors.borrow_mut();
		let before = interceptors.len();
		interceptors.retain(|(h, _)| *h != handle);
		interceptors.len() != before
	}

	/// Offers a click to the global interceptors. Returns `true` once one of
	/// them handled it.
	pub fn intercept_click(&self, target: &ClickTarget) -> bool {
		let interceptors: Vec<ClickInterceptor> = self
			.inner
			.interceptors
			.borrow()
			.iter()
			.map(|(_, i)| Rc::clone(i))
			.collect();
		interceptors.iter().any(|interceptor| interceptor(target))
	}

	/// Clicks the element with the given id.
	///
	/// Element listeners run first; unless one of them prevents the default
	/// action the click is then offered to the global interceptors. Returns the
	/// number of element listeners that ran.
	pub fn click(&self, element_id: &str) -> Result<usize, DomError> {
		let tag = {
			let roots = self.inner.roots.borrow();
			let (index, span) = locate(&roots, element_id)
				.ok_or_else(|| DomError::ElementNotFound(element_id.to_string()))?;
			span.and_then(|span| markup::parse_open_tag(span.open_tag(&roots[index].1)))
		};

		let event = Event::click(element_id);
		let ran = self.dispatch(&event);
		if event.default_prevented() {
			return Ok(ran);
		}
		if let Some(tag) = tag {
			self.intercept_click(&ClickTarget::new(tag));
		}
		Ok(ran)
	}

	/// Clicks the first anchor whose `href` equals `href`.
	///
	/// Returns whether an interceptor handled the click; an unhandled click
	/// corresponds to a full page load, which the document model ignores.
	pub fn follow_link(&self, href: &str) -> Result<bool, DomError> {
		let anchor = self
			.inner
			.roots
			.borrow()
			.iter()
			.flat_map(|(_, content)| markup::anchors(content))
			.find(|a| a.attribute("href") == Some(href))
			.ok_or_else(|| DomError::ElementNotFound(format!("a[href=\"{}\"]", href)))?;
		Ok(self.intercept_click(&ClickTarget::new(anchor)))
	}

	/// Submits a form with the given field values. Returns the number of
	/// listeners that ran.
	pub fn submit<I, K, V>(&self, form_id: &str, values: I) -> Result<usize, DomError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		if !self.contains(form_id) {
			return Err(DomError::ElementNotFound(form_id.to_string()));
		}
		Ok(self.dispatch(&Event::submit(form_id, values)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use std::cell::RefCell;

	#[fixture]
	fn document() -> Document {
		let document = Document::new();
		document.create_root("app");
		document
			.set_inner_html(
				"app",
				r#"<div id="box"><button id="btn">Go</button></div><a href="/next" data-link>Next</a>"#,
			)
			.unwrap();
		document
	}

	#[rstest]
	fn test_contains_roots_and_elements(document: Document) {
		assert!(document.contains("app"));
		assert!(document.contains("btn"));
		assert!(!document.contains("missing"));
	}

	#[rstest]
	fn test_set_inner_html_drops_stale_listeners(document: Document) {
		document
			.add_listener("btn", EventType::Click, |_| {})
			.unwrap();
		assert_eq!(document.listener_count("btn"), 1);

		document
			.set_inner_html("box", r#"<button id="btn">Again</button>"#)
			.unwrap();
		assert_eq!(document.listener_count("btn"), 0);
		assert_eq!(document.text_content("box").unwrap(), "Again");
	}

	#[rstest]
	fn test_replace_element_keeps_siblings(document: Document) {
		document
			.replace_element("box", r#"<div id="box">swapped</div>"#)
			.unwrap();
		assert_eq!(document.inner_html("box").unwrap(), "swapped");
		assert!(document.inner_html("app").unwrap().contains("data-link"));
	}

	#[rstest]
	fn test_replace_root_is_rejected(document: Document) {
		let result = document.replace_element("app", "<p>x</p>");
		assert_eq!(result, Err(DomError::RootReplacement("app".to_string())));
	}

	#[rstest]
	fn test_add_listener_requires_element(document: Document) {
		let result = document.add_listener("ghost", EventType::Click, |_| {});
		assert!(matches!(result, Err(DomError::ElementNotFound(_))));
	}

	#[rstest]
	fn test_click_runs_listeners_in_order(document: Document) {
		let calls = Rc::new(RefCell::new(Vec::new()));
		for label in ["first", "second"] {
			let calls = Rc::clone(&calls);
			document
				.add_listener("btn", EventType::Click, move |_| {
					calls.borrow_mut().push(label)
				})
				.unwrap();
		}
		assert_eq!(document.click("btn").unwrap(), 2);
		assert_eq!(*calls.borrow(), vec!["first", "second"]);
	}

	#[rstest]
	fn test_listener_may_rewrite_its_own_subtree(document: Document) {
		let doc = document.clone();
		document
			.add_listener("btn", EventType::Click, move |_| {
				doc.set_inner_html("box", "<p>done</p>").unwrap();
			})
			.unwrap();
		document.click("btn").unwrap();
		assert_eq!(document.text_content("box").unwrap(), "done");
		assert_eq!(document.total_listeners(), 0);
	}

	#[rstest]
	fn test_follow_link_reaches_interceptor(document: Document) {
		let seen = Rc::new(RefCell::new(None));
		let sink = Rc::clone(&seen);
		let handle = document.add_click_interceptor(move |target| {
			*sink.borrow_mut() = target.attribute("href").map(str::to_string);
			target.has_attribute("data-link")
		});

		assert!(document.follow_link("/next").unwrap());
		assert_eq!(seen.borrow().as_deref(), Some("/next"));

		assert!(document.remove_click_interceptor(handle));
		assert!(!document.follow_link("/next").unwrap());
	}

	#[rstest]
	fn test_prevented_click_skips_interceptors(document: Document) {
		let intercepted = Rc::new(Cell::new(false));
		let flag = Rc::clone(&intercepted);
		document.add_click_interceptor(move |_| {
			flag.set(true);
			true
		});
		document
			.add_listener("btn", EventType::Click, |event| event.prevent_default())
			.unwrap();

		document.click("btn").unwrap();
		assert!(!intercepted.get());
	}

	#[rstest]
	fn test_submit_delivers_values(document: Document) {
		document
			.set_inner_html("box", r#"<form id="f"><input name="q"></form>"#)
			.unwrap();
		let received = Rc::new(RefCell::new(String::new()));
		let sink = Rc::clone(&received);
		document
			.add_listener("f", EventType::Submit, move |event| {
				*sink.borrow_mut() = event.value("q").unwrap_or_default().to_string();
			})
			.unwrap();

		assert_eq!(document.submit("f", [("q", "jazz")]).unwrap(), 1);
		assert_eq!(*received.borrow(), "jazz");
	}

	#[rstest]
	fn test_attribute_lookup(document: Document) {
		document
			.set_inner_html("box", r#"<span id="s" class="counter-value">1</span>"#)
			.unwrap();
		assert_eq!(
			document.attribute("s", "class").as_deref(),
			Some("counter-value")
		);
		assert!(document.attribute("s", "title").is_none());
	}
}
