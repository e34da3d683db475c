//! Browser bridge for the document model (WASM only).
//!
//! [`WebBackend`] mirrors document mutations into the live page, and
//! [`install_event_delegation`] installs one `click` and one `submit`
//! listener on the page that route browser events into the model.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use super::markup::TagInfo;
use super::{ClickTarget, Document, DomBackend, Event, EventType};
use crate::warn_log;

/// Attributes copied from a clicked anchor for the interceptors.
const LINK_ATTRIBUTES: &[&str] = &["href", "data-link", "data-replace", "target", "class"];

fn web_document() -> Option<web_sys::Document> {
	web_sys::window()?.document()
}

fn element(id: &str) -> Option<web_sys::Element> {
	web_document()?.get_element_by_id(id)
}

/// Mirrors document mutations into the live DOM.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebBackend;

impl DomBackend for WebBackend {
	fn set_inner_html(&self, element_id: &str, markup: &str) {
		match element(element_id) {
			Some(el) => el.set_inner_html(markup),
			None => warn_log!("mirror target #{} is missing from the page", element_id),
		}
	}

	fn set_outer_html(&self, element_id: &str, markup: &str) {
		match element(element_id) {
			Some(el) => el.set_outer_html(markup),
			None => warn_log!("mirror target #{} is missing from the page", element_id),
		}
	}
}

fn link_target(link: &web_sys::Element) -> ClickTarget {
	let attributes: HashMap<String, String> = LINK_ATTRIBUTES
		.iter()
		.filter_map(|name| link.get_attribute(name).map(|v| (name.to_string(), v)))
		.collect();
	ClickTarget::new(TagInfo {
		tag: link.tag_name().to_ascii_lowercase(),
		attributes,
	})
}

fn form_values(form: &HtmlFormElement) -> Vec<(String, String)> {
	let mut values = Vec::new();
	let Ok(fields) = form.query_selector_all("input[name], textarea[name], select[name]") else {
		return values;
	};
	for index in 0..fields.length() {
		let Some(node) = fields.item(index) else {
			continue;
		};
		if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
			values.push((input.name(), input.value()));
		} else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
			values.push((area.name(), area.value()));
		} else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
			values.push((select.name(), select.value()));
		}
	}
	values
}

fn on_click(document: &Document, event: &web_sys::Event) {
	let Some(target) = event
		.target()
		.and_then(|t| t.dyn_into::<web_sys::Element>().ok())
	else {
		return;
	};

	// Nearest ancestor with click listeners receives the event.
	let mut current = Some(target.clone());
	while let Some(el) = current {
		let id = el.id();
		if !id.is_empty() && document.has_listener(&id, &EventType::Click) {
			let click = Event::click(id);
			document.dispatch(&click);
			if click.default_prevented() {
				event.prevent_default();
				return;
			}
			break;
		}
		current = el.parent_element();
	}

	if let Ok(Some(link)) = target.closest("a[data-link]") {
		if document.intercept_click(&link_target(&link)) {
			event.prevent_default();
		}
	}
}

fn on_submit(document: &Document, event: &web_sys::Event) {
	let Some(form) = event
		.target()
		.and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
	else {
		return;
	};
	let id = form.id();
	if id.is_empty() || !document.has_listener(&id, &EventType::Submit) {
		return;
	}
	event.prevent_default();
	document.dispatch(&Event::submit(id, form_values(&form)));
}

/// Routes page-level `click` and `submit` events into the document model.
///
/// # Errors
///
/// Returns the JavaScript error if the page has no document or the listener
/// cannot be attached.
pub fn install_event_delegation(document: &Document) -> Result<(), JsValue> {
	let page = web_document().ok_or_else(|| JsValue::from_str("no document available"))?;

	let model = document.clone();
	let click = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
		on_click(&model, &event);
	});
	page.add_event_listener_with_callback("click", click.as_ref().unchecked_ref())?;
	click.forget();

	let model = document.clone();
	let submit = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
		on_submit(&model, &event);
	});
	page.add_event_listener_with_callback("submit", submit.as_ref().unchecked_ref())?;
	submit.forget();

	Ok(())
}
