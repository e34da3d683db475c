use eventia_pages::{ComponentState, Event, RouteContext};
use serde_json::{Value, json};

use super::form::{FormPage, FormSpec, field, input};
use crate::api::{ApiError, unwrap_envelope};
use crate::app::AppContext;
use crate::auth::{Auth, AuthSession};
use crate::components::{NavBar, link};

/// Backend endpoint exchanging credentials for a session.
pub const LOGIN_ENDPOINT: &str = "/auth/login";

/// The login form: stores the returned session and continues to the
/// user's dashboard.
#[derive(Debug, Clone)]
pub struct LoginForm {
	auth: Auth,
}

/// Page at `/login`.
pub type LoginPage = FormPage<LoginForm>;

impl FormPage<LoginForm> {
	/// Builds the login page.
	pub fn new(context: &AppContext, route: &RouteContext) -> Self {
		Self::build(
			LoginForm {
				auth: context.auth.clone(),
			},
			NavBar::for_session(&context.config.brand, &context.auth, route.path()),
			context.api.clone(),
			route.navigator().clone(),
		)
	}
}

impl FormSpec for LoginForm {
	fn name(&self) -> &'static str {
		"LoginPage"
	}

	fn form_id(&self) -> &'static str {
		"login-form"
	}

	fn title(&self) -> &'static str {
		"Log in"
	}

	fn submit_label(&self) -> &'static str {
		"Log in"
	}

	fn fields(&self, values: &ComponentState) -> String {
		[
			input("email", "email", "Email", values.get_str("email"), ""),
			input("password", "password", "Password", None, ""),
		]
		.concat()
	}

	fn footer(&self) -> String {
		format!(
			r#"<p class="auth-link">No account yet? {}</p><p class="auth-link">{}</p>"#,
			link("/signup", "Sign up here", "link"),
			link("/", "Back to home", "link")
		)
	}

	fn endpoint(&self) -> &'static str {
		LOGIN_ENDPOINT
	}

	fn payload(&self, event: &Event) -> Result<Value, String> {
		match (field(event, "email"), event.value("password")) {
			(Some(email), Some(password)) if !password.is_empty() => {
				Ok(json!({ "email": email, "password": password }))
			}
			_ => Err("Email and password are required".to_string()),
		}
	}

	fn remembered(&self, event: &Event) -> ComponentState {
		ComponentState::new().with("email", field(event, "email").unwrap_or_default())
	}

	fn on_success(&self, body: Value) -> Result<String, String> {
		let session: AuthSession = serde_json::from_value(unwrap_envelope(body))
			.map_err(|e| format!("Unexpected login response: {}", e))?;
		self.auth
			.login(&session)
			.map_err(|e| format!("Cannot keep the session: {}", e))?;
		Ok(session.user.role.dashboard_path().to_string())
	}

	fn on_failure(&self, error: &ApiError) -> String {
		match error {
			ApiError::Unauthorized => "Invalid email or password".to_string(),
			other => other.to_string(),
		}
	}
}
