use eventia_pages::router::Navigator;
use eventia_pages::{Component, ComponentError, ComponentId, Document, RouteContext, error_log};

use crate::app::AppContext;
use crate::auth::Auth;

/// Route target that ends the session and replaces itself with the login
/// page.
#[derive(Debug)]
pub struct LogoutPage {
	id: ComponentId,
	auth: Auth,
	navigator: Navigator,
	login_path: String,
}

impl LogoutPage {
	/// Builds the page. The session is cleared on mount.
	pub fn new(context: &AppContext, route: &RouteContext) -> Self {
		Self {
			id: ComponentId::generate("page-logout"),
			auth: context.auth.clone(),
			navigator: route.navigator().clone(),
			login_path: context.config.login_path.clone(),
		}
	}
}

impl Component for LogoutPage {
	fn name(&self) -> &'static str {
		"LogoutPage"
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		format!(r#"<div id="{}" class="page"><p>Signing out...</p></div>"#, self.id)
	}

	fn mount(&self, _document: &Document) -> Result<(), ComponentError> {
		self.auth.logout();
		if let Err(error) = self.navigator.replace(&self.login_path) {
			error_log!("cannot leave the logout page: {}", error);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::auth::Role;
	use crate::pages::testing::context;
	use rstest::rstest;

	#[rstest]
	fn test_mount_ends_session_even_without_router() {
		let context = context(Some(Role::User));
		let page = LogoutPage::new(&context, &RouteContext::detached("/logout"));
		let document = Document::new();

		page.mount(&document).unwrap();

		assert!(!context.auth.is_authenticated());
		assert!(page.render().contains("Signing out"));
	}
}
