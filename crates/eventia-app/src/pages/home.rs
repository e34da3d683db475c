use eventia_pages::{Component, ComponentError, ComponentId, Document, RouteContext};

use crate::app::AppContext;
use crate::components::{EventsList, NavBar, link};

/// Landing page at `/` with the public events.
#[derive(Debug)]
pub struct HomePage {
	id: ComponentId,
	navbar: NavBar,
	events: EventsList,
	signed_in: bool,
}

impl HomePage {
	/// Builds the page for the current session.
	pub fn new(context: &AppContext, route: &RouteContext) -> Self {
		Self {
			id: ComponentId::generate("page-home"),
			navbar: NavBar::for_session(&context.config.brand, &context.auth, route.path()),
			events: EventsList::new(context.api.clone()),
			signed_in: context.auth.is_authenticated(),
		}
	}

	/// The embedded events list.
	pub fn events(&self) -> &EventsList {
		&self.events
	}
}

impl Component for HomePage {
	fn name(&self) -> &'static str {
		"HomePage"
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		let actions = if self.signed_in {
			String::new()
		} else {
			format!(
				r#"<div class="hero-buttons">{}{}</div>"#,
				link("/login", "Log in", "btn btn-primary"),
				link("/signup", "Create account", "btn btn-secondary")
			)
		};
		format!(
			concat!(
				r#"<div id="{id}" class="page">{navbar}<div class="page-container"><div class="hero">"#,
				"<h1>Welcome</h1><p>Find and book upcoming events.</p>{actions}{events}",
				r#"<div class="features"><div class="feature-card clickable" id="components-card">"#,
				"<h3>🧩 Components</h3><p>Browse the reusable components</p>{demo}</div></div>",
				"</div></div></div>"
			),
			id = self.id,
			navbar = self.navbar.render(),
			actions = actions,
			events = self.events.render(),
			demo = link("/components", "→ See demo", "btn btn-primary")
		)
	}

	fn mount(&self, document: &Document) -> Result<(), ComponentError> {
		self.events.mount(document)
	}

	fn unmount(&self, document: &Document) {
		self.events.unmount(document);
	}
}
