//! Error pages.

use eventia_pages::{Component, ComponentId, RouteContext};

use crate::app::AppContext;
use crate::components::{NavBar, link};

/// Page shown for unknown paths.
#[derive(Debug)]
pub struct NotFoundPage {
	id: ComponentId,
	navbar: NavBar,
	path: String,
}

impl NotFoundPage {
	/// Builds the page for the unmatched path.
	pub fn new(context: &AppContext, route: &RouteContext) -> Self {
		Self {
			id: ComponentId::generate("page-not-found"),
			navbar: NavBar::for_session(&context.config.brand, &context.auth, route.path()),
			path: route.path().to_string(),
		}
	}

	/// The path that matched nothing.
	pub fn path(&self) -> &str {
		&self.path
	}
}

impl Component for NotFoundPage {
	fn name(&self) -> &'static str {
		"NotFoundPage"
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		format!(
			concat!(
				r#"<div id="{}" class="page">{}<div class="page-container"><div class="not-found">"#,
				"<h1>404</h1><h2>Page not found</h2><p>The page you are looking for does not exist.</p>{}",
				"</div></div></div>"
			),
			self.id,
			self.navbar.render(),
			link("/", "Back to home", "btn btn-primary")
		)
	}
}

/// Page shown when the signed-in role may not open a page.
#[derive(Debug)]
pub struct UnauthorizedPage {
	id: ComponentId,
	navbar: NavBar,
}

impl UnauthorizedPage {
	/// Builds the page.
	pub fn new(context: &AppContext, route: &RouteContext) -> Self {
		Self {
			id: ComponentId::generate("page-unauthorized"),
			navbar: NavBar::for_session(&context.config.brand, &context.auth, route.path()),
		}
	}
}

impl Component for UnauthorizedPage {
	fn name(&self) -> &'static str {
		"UnauthorizedPage"
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		format!(
			concat!(
				r#"<div id="{}" class="page">{}<div class="page-container"><div class="error-container">"#,
				r#"<h1 class="error-code">403</h1><h2>Access denied</h2>"#,
				"<p>You do not have permission to open this page.</p>",
				r#"<div class="error-actions">{}</div></div></div></div>"#
			),
			self.id,
			self.navbar.render(),
			link("/", "Back to home", "btn btn-primary")
		)
	}
}
