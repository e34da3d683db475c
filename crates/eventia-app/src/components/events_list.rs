use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use eventia_pages::dom::markup::escape;
use eventia_pages::{
	Component, ComponentError, ComponentId, ComponentState, Document, EventType, Lifecycle, Stateful,
	error_log, info_log, spawn_local,
};
use serde_json::Value;

use super::{EventCard, EventSummary};
use crate::api::{ApiClient, ApiResponse};

/// Endpoint listing the public events.
pub const EVENTS_ENDPOINT: &str = "/eventos";

const EVENTS: &str = "events";
const LOADING: &str = "loading";
const ERROR: &str = "error";

/// Events fetched from the backend.
///
/// The first mount starts the request; later re-renders never fetch again.
/// While loading, a placeholder is shown; a failure shows the message and a
/// retry button.
#[derive(Debug, Clone)]
pub struct EventsList {
	core: Rc<EventsListCore>,
}

#[derive(Debug)]
struct EventsListCore {
	id: ComponentId,
	api: ApiClient,
	state: RefCell<ComponentState>,
	lifecycle: Lifecycle,
	started: Cell<bool>,
	fetches: Cell<usize>,
	this: Weak<EventsListCore>,
}

impl EventsList {
	/// Creates the list with a generated id. Nothing is fetched until mount.
	pub fn new(api: ApiClient) -> Self {
		Self::with_id(ComponentId::generate("events-list"), api)
	}

	/// Creates the list with a fixed id.
	pub fn with_id(id: ComponentId, api: ApiClient) -> Self {
		let core = Rc::new_cyclic(|this| EventsListCore {
			id,
			api,
			state: RefCell::new(
				ComponentState::new()
					.with(EVENTS, Value::Array(Vec::new()))
					.with(LOADING, true)
					.with(ERROR, Value::Null),
			),
			lifecycle: Lifecycle::new(),
			started: Cell::new(false),
			fetches: Cell::new(0),
			this: this.clone(),
		});
		Self { core }
	}

	/// Requests the events again.
	pub fn refresh(&self) {
		self.core.fetch();
	}

	/// The events received so far.
	pub fn events(&self) -> Vec<EventSummary> {
		self.core.events().into_iter().map(EventSummary::from).collect()
	}

	/// Whether a fetch is still outstanding.
	pub fn is_loading(&self) -> bool {
		self.core.is_loading()
	}

	/// Message of the last failed request.
	pub fn error(&self) -> Option<String> {
		self.core.error()
	}

	/// Number of requests started.
	pub fn fetch_count(&self) -> usize {
		self.core.fetches.get()
	}

	/// Id of the retry button shown after a failure.
	pub fn retry_button_id(&self) -> String {
		self.core.id.child("retry")
	}

	/// Mount bookkeeping.
	pub fn lifecycle(&self) -> &Lifecycle {
		&self.core.lifecycle
	}
}

impl EventsListCore {
	fn events(&self) -> Vec<Value> {
		match self.state.borrow().get(EVENTS) {
			Some(Value::Array(events)) => events.clone(),
			_ => Vec::new(),
		}
	}

	fn is_loading(&self) -> bool {
		self.state.borrow().get_bool(LOADING).unwrap_or(false)
	}

	fn error(&self) -> Option<String> {
		self.state.borrow().get_str(ERROR).map(str::to_string)
	}

	fn update(&self, partial: ComponentState) {
		if let Err(error) = self.set_state(partial) {
			error_log!("{} update failed: {}", self.id, error);
		}
	}

	fn fetch(&self) {
		self.fetches.set(self.fetches.get() + 1);
		self.update(
			ComponentState::new()
				.with(LOADING, true)
				.with(ERROR, Value::Null),
		);

		let this = self.this.clone();
		let api = self.api.clone();
		spawn_local(async move {
			let response: ApiResponse<Vec<Value>> = api.get(EVENTS_ENDPOINT).await;
			let Some(core) = this.upgrade() else {
				return;
			};
			let partial = match response.into_result() {
				Ok(events) => {
					info_log!("received {} events", events.len());
					ComponentState::new()
						.with(EVENTS, Value::Array(events))
						.with(LOADING, false)
				}
				Err(error) => ComponentState::new()
					.with(ERROR, error.to_string())
					.with(LOADING, false),
			};
			core.update(partial);
		});
	}

	fn render_events(&self) -> String {
		let events = self.events();
		if events.is_empty() {
			return r#"<p class="no-events">No events available</p>"#.to_string();
		}
		events
			.into_iter()
			.enumerate()
			.map(|(index, event)| {
				EventCard::with_fallback_id(
					EventSummary::from(event),
					self.id.child(&format!("item-{}", index)),
				)
				.render()
			})
			.collect()
	}
}

impl Component for EventsListCore {
	fn name(&self) -> &'static str {
		"EventsList"
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		let loading = self.is_loading();
		let error = self.error();

		let mut body = String::new();
		if loading {
			body.push_str(r#"<div class="loading"><p>Loading events...</p></div>"#);
		}
		if let Some(message) = &error {
			body.push_str(&format!(
				r#"<div class="error"><p>❌ Error: {}</p><button id="{}">Retry</button></div>"#,
				escape(message),
				self.id.child("retry")
			));
		}
		if !loading && error.is_none() {
			body.push_str(&self.render_events());
		}

		format!(
			r#"<div id="{}" class="events-list"><h2>Available events</h2><div class="events-container">{}</div></div>"#,
			self.id, body
		)
	}

	fn mount(&self, document: &Document) -> Result<(), ComponentError> {
		if !self.lifecycle.begin(document) {
			return Ok(());
		}
		let retry = self.id.child("retry");
		if document.contains(&retry) {
			let this = self.this.clone();
			self.lifecycle.listen(&retry, EventType::Click, move |_| {
				if let Some(core) = this.upgrade() {
					core.fetch();
				}
			})?;
		}
		// Runs last: natively the request completes inside this call and
		// re-renders the list.
		if !self.started.replace(true) {
			self.fetch();
		}
		Ok(())
	}

	fn unmount(&self, _document: &Document) {
		self.lifecycle.end();
	}
}

impl Stateful for EventsListCore {
	fn state(&self) -> &RefCell<ComponentState> {
		&self.state
	}

	fn lifecycle(&self) -> &Lifecycle {
		&self.lifecycle
	}
}

impl Component for EventsList {
	fn name(&self) -> &'static str {
		self.core.name()
	}

	fn id(&self) -> &ComponentId {
		&self.core.id
	}

	fn render(&self) -> String {
		self.core.render()
	}

	fn mount(&self, document: &Document) -> Result<(), ComponentError> {
		self.core.mount(document)
	}

	fn unmount(&self, document: &Document) {
		self.core.unmount(document)
	}
}
