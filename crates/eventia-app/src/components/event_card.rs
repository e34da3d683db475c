use chrono::{DateTime, NaiveDate, NaiveDateTime};
use eventia_pages::dom::markup::escape;
use eventia_pages::{Component, ComponentId};
use serde::Serialize;
use serde_json::Value;

/// An event as listed by the backend.
///
/// Built leniently from any JSON value: each field takes the first
/// non-empty of its Spanish or English key (`nombre` or `name`, and so on),
/// and ids may be numbers or strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(from = "Value")]
pub struct EventSummary {
	/// Backend id.
	pub id: Option<String>,
	/// Event title.
	pub name: Option<String>,
	/// Free-text description.
	pub description: Option<String>,
	/// Venue.
	pub location: Option<String>,
	/// Raw date as sent by the backend.
	pub date: Option<String>,
	/// Id of the organizing user.
	pub organizer_id: Option<String>,
}

impl From<Value> for EventSummary {
	fn from(value: Value) -> Self {
		let text = |keys: &[&str]| {
			keys.iter().find_map(|key| match value.get(key) {
				Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
				Some(Value::Number(n)) => Some(n.to_string()),
				_ => None,
			})
		};
		Self {
			id: text(&["id"]),
			name: text(&["nombre", "name"]),
			description: text(&["descripcion", "description"]),
			location: text(&["ubicacion", "location"]),
			date: text(&["fecha", "date"]),
			organizer_id: text(&["organizador_id", "organizer_id"]),
		}
	}
}

/// Formats a backend date as `dd/mm/yyyy`.
///
/// Accepts RFC 3339 timestamps (the date is taken in the timestamp's own
/// offset), naive date-times and plain `yyyy-mm-dd` dates. Anything else
/// is returned unchanged.
pub fn format_event_date(raw: &str) -> String {
	const DISPLAY: &str = "%d/%m/%Y";
	let raw = raw.trim();
	if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
		return timestamp.format(DISPLAY).to_string();
	}
	for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
		if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, pattern) {
			return timestamp.format(DISPLAY).to_string();
		}
	}
	if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
		return date.format(DISPLAY).to_string();
	}
	raw.to_string()
}

/// Card showing one event.
#[derive(Debug, Clone)]
pub struct EventCard {
	id: ComponentId,
	event: EventSummary,
}

impl EventCard {
	/// The element id is `event-<id>`, or a generated one for events
	/// without id.
	pub fn new(event: EventSummary) -> Self {
		let id = match &event.id {
			Some(id) => ComponentId::fixed(format!("event-{}", id)),
			None => ComponentId::generate("event"),
		};
		Self { id, event }
	}

	/// Uses `id` when the event has no id of its own.
	pub fn with_fallback_id(event: EventSummary, id: impl Into<String>) -> Self {
		if event.id.is_some() {
			Self::new(event)
		} else {
			Self {
				id: ComponentId::fixed(id),
				event,
			}
		}
	}

	/// The event shown.
	pub fn event(&self) -> &EventSummary {
		&self.event
	}
}

impl Component for EventCard {
	fn name(&self) -> &'static str {
		"EventCard"
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		let event = &self.event;
		let mut html = format!(r#"<div id="{}" class="event-card">"#, escape(self.id.as_str()));
		if let Some(name) = &event.name {
			html.push_str(&format!(r#"<h3 class="event-name">{}</h3>"#, escape(name)));
		}
		if let Some(description) = &event.description {
			html.push_str(&format!(
				r#"<p class="event-description">{}</p>"#,
				escape(description)
			));
		}
		if let Some(location) = &event.location {
			html.push_str(&format!(r#"<p class="event-location">📍 {}</p>"#, escape(location)));
		}
		if let Some(date) = &event.date {
			html.push_str(&format!(
				r#"<p class="event-date">📅 {}</p>"#,
				escape(&format_event_date(date))
			));
		}
		html.push_str("</div>");
		html
	}
}
