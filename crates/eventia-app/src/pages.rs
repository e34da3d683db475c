//! Page components, one per route.
//!
//! Pages are built by the route table's factories from the shared
//! [`AppContext`](crate::app::AppContext) and the [`RouteContext`](eventia_pages::RouteContext)
//! of the resolved location.

mod dashboard;
mod demo;
mod form;
mod home;
mod login;
mod logout;
mod signup;
mod status;

pub use dashboard::DashboardPage;
pub use demo::ComponentsDemoPage;
pub use form::{FormPage, FormSpec};
pub use home::HomePage;
pub use login::{LOGIN_ENDPOINT, LoginForm, LoginPage};
pub use logout::LogoutPage;
pub use signup::{MIN_PASSWORD_LEN, REGISTER_ENDPOINT, SignUpForm, SignUpPage};
pub use status::{NotFoundPage, UnauthorizedPage};

#[cfg(test)]
pub(crate) mod testing {
	use std::rc::Rc;

	use eventia_pages::MemoryHistory;

	use crate::api::ScriptedTransport;
	use crate::app::AppContext;
	use crate::auth::{Auth, AuthSession, Role, User};
	use crate::config::AppConfig;

	/// Context over in-memory parts; `role` signs a user in first.
	pub(crate) fn context(role: Option<Role>) -> AppContext {
		let auth = Auth::in_memory();
		if let Some(role) = role {
			auth.login(&AuthSession {
				access_token: "token".to_string(),
				refresh_token: None,
				user: User {
					id: "1".to_string(),
					name: "Ana".to_string(),
					surname: "Ruiz".to_string(),
					email: "ana@example.com".to_string(),
					role,
				},
			})
			.unwrap();
		}
		AppContext::new(
			AppConfig::default(),
			auth,
			Rc::new(ScriptedTransport::new()),
			Rc::new(MemoryHistory::new("/")),
		)
	}
}
