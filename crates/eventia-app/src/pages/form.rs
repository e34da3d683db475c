//! Pages built around a single submit form.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use eventia_pages::dom::markup::escape;
use eventia_pages::router::Navigator;
use eventia_pages::{
	Component, ComponentError, ComponentId, ComponentState, Document, Event, EventType, Lifecycle,
	Stateful, error_log, info_log, spawn_local,
};
use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::components::NavBar;

const ERROR: &str = "error";
const SUBMITTING: &str = "submitting";

/// What a [`FormPage`] renders, sends and does on success.
pub trait FormSpec: 'static {
	/// Component name for logging.
	fn name(&self) -> &'static str;

	/// Element id of the form.
	fn form_id(&self) -> &'static str;

	/// Heading above the form.
	fn title(&self) -> &'static str;

	/// Text of the submit button while idle.
	fn submit_label(&self) -> &'static str;

	/// Input markup; `values` holds what the user entered last.
	fn fields(&self, values: &ComponentState) -> String;

	/// Markup below the form.
	fn footer(&self) -> String;

	/// Backend endpoint receiving the payload.
	fn endpoint(&self) -> &'static str;

	/// Validates the submitted fields and builds the request body, or
	/// returns the message to show.
	fn payload(&self, event: &Event) -> Result<Value, String>;

	/// Field values kept for the next render.
	fn remembered(&self, event: &Event) -> ComponentState {
		let _ = event;
		ComponentState::new()
	}

	/// Handles a successful response; returns where to navigate next.
	fn on_success(&self, body: Value) -> Result<String, String>;

	/// Message shown for a failed request.
	fn on_failure(&self, error: &ApiError) -> String {
		error.to_string()
	}
}

/// A page with a navigation bar and a form that posts to the backend.
///
/// While the request is pending the submit button is disabled; a failure
/// re-renders the page with the message and the entered values.
pub struct FormPage<S: FormSpec> {
	core: Rc<FormCore<S>>,
}

struct FormCore<S: FormSpec> {
	id: ComponentId,
	spec: S,
	navbar: NavBar,
	api: ApiClient,
	navigator: Navigator,
	state: RefCell<ComponentState>,
	lifecycle: Lifecycle,
	this: Weak<FormCore<S>>,
}

impl<S: FormSpec> FormPage<S> {
	pub(crate) fn build(spec: S, navbar: NavBar, api: ApiClient, navigator: Navigator) -> Self {
		let prefix = format!("page-{}", spec.form_id());
		let core = Rc::new_cyclic(|this| FormCore {
			id: ComponentId::generate(&prefix),
			spec,
			navbar,
			api,
			navigator,
			state: RefCell::new(
				ComponentState::new()
					.with(ERROR, Value::Null)
					.with(SUBMITTING, false),
			),
			lifecycle: Lifecycle::new(),
			this: this.clone(),
		});
		Self { core }
	}

	/// Message currently shown, if any.
	pub fn error(&self) -> Option<String> {
		self.core.state.borrow().get_str(ERROR).map(str::to_string)
	}

	/// Whether a request is pending.
	pub fn is_submitting(&self) -> bool {
		self.core.state.borrow().get_bool(SUBMITTING).unwrap_or(false)
	}

	/// Element id of the form.
	pub fn form_id(&self) -> &'static str {
		self.core.spec.form_id()
	}

	/// Mount bookkeeping.
	pub fn lifecycle(&self) -> &Lifecycle {
		&self.core.lifecycle
	}
}

impl<S: FormSpec> FormCore<S> {
	fn update(&self, partial: ComponentState) {
		if let Err(error) = self.set_state(partial) {
			error_log!("{} update failed: {}", self.spec.name(), error);
		}
	}

	fn fail(&self, message: String) {
		self.update(
			ComponentState::new()
				.with(ERROR, message)
				.with(SUBMITTING, false),
		);
	}

	fn submit(&self, event: &Event) {
		if self.state.borrow().get_bool(SUBMITTING).unwrap_or(false) {
			return;
		}
		self.state.borrow_mut().merge(self.spec.remembered(event));
		let body = match self.spec.payload(event) {
			Ok(body) => body,
			Err(message) => {
				self.fail(message);
				return;
			}
		};
		self.update(
			ComponentState::new()
				.with(ERROR, Value::Null)
				.with(SUBMITTING, true),
		);

		let this = self.this.clone();
		let api = self.api.clone();
		let endpoint = self.spec.endpoint();
		spawn_local(async move {
			let response: ApiResponse = api.post(endpoint, &body).await;
			let Some(core) = this.upgrade() else {
				return;
			};
			let outcome = match response.into_result() {
				Ok(body) => core.spec.on_success(body),
				Err(error) => Err(core.spec.on_failure(&error)),
			};
			match outcome {
				Ok(next) => {
					info_log!("{} succeeded; continuing to {}", core.spec.name(), next);
					core.state.borrow_mut().set(SUBMITTING, false);
					if let Err(error) = core.navigator.navigate(&next) {
						error_log!("cannot navigate to {}: {}", next, error);
					}
				}
				Err(message) => core.fail(message),
			}
		});
	}
}

impl<S: FormSpec> Component for FormCore<S> {
	fn name(&self) -> &'static str {
		self.spec.name()
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		let state = self.state.borrow();
		let error = state
			.get_str(ERROR)
			.map(|message| {
				format!(
					r#"<div id="{}" class="form-error">{}</div>"#,
					self.id.child("error"),
					escape(message)
				)
			})
			.unwrap_or_default();
		let disabled = if state.get_bool(SUBMITTING).unwrap_or(false) {
			" disabled"
		} else {
			""
		};
		format!(
			concat!(
				r#"<div id="{id}" class="page">{navbar}<div class="page-container"><div class="auth-card">"#,
				r#"<h1>{title}</h1>{error}<form id="{form}" class="auth-form">{fields}"#,
				r#"<button type="submit" class="btn btn-primary"{disabled}>{label}</button></form>"#,
				"{footer}</div></div></div>"
			),
			id = self.id,
			navbar = self.navbar.render(),
			title = self.spec.title(),
			error = error,
			form = self.spec.form_id(),
			fields = self.spec.fields(&state),
			disabled = disabled,
			label = self.spec.submit_label(),
			footer = self.spec.footer()
		)
	}

	fn mount(&self, document: &Document) -> Result<(), ComponentError> {
		if !self.lifecycle.begin(document) {
			return Ok(());
		}
		let this = self.this.clone();
		self.lifecycle
			.listen(self.spec.form_id(), EventType::Submit, move |event| {
				event.prevent_default();
				if let Some(core) = this.upgrade() {
					core.submit(event);
				}
			})?;
		Ok(())
	}

	fn unmount(&self, _document: &Document) {
		self.lifecycle.end();
	}
}

impl<S: FormSpec> Stateful for FormCore<S> {
	fn state(&self) -> &RefCell<ComponentState> {
		&self.state
	}

	fn lifecycle(&self) -> &Lifecycle {
		&self.lifecycle
	}
}

impl<S: FormSpec> Component for FormPage<S> {
	fn name(&self) -> &'static str {
		self.core.spec.name()
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

/// Markup of a labelled input, refilled from `value`.
pub(crate) fn input(kind: &str, name: &str, label: &str, value: Option<&str>, extra: &str) -> String {
	let value = value
		.map(|v| format!(r#" value="{}""#, escape(v)))
		.unwrap_or_default();
	format!(
		r#"<div class="form-group"><label for="{name}">{label}</label><input type="{kind}" id="{name}" name="{name}"{value} required{extra}/></div>"#,
		name = name,
		label = label,
		kind = kind,
		value = value,
		extra = extra
	)
}

/// Trimmed, non-empty field value.
pub(crate) fn field<'a>(event: &'a Event, name: &str) -> Option<&'a str> {
	event.value(name).map(str::trim).filter(|v| !v.is_empty())
}
