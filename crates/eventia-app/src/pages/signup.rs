use eventia_pages::{ComponentState, Event, RouteContext};
use serde_json::{Value, json};

use super::form::{FormPage, FormSpec, field, input};
use crate::app::AppContext;
use crate::components::{NavBar, link};

/// Backend endpoint creating an account.
pub const REGISTER_ENDPOINT: &str = "/auth/register";

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// The sign-up form: creates the account and continues to the login page.
#[derive(Debug, Clone)]
pub struct SignUpForm {
	login_path: String,
}

/// Page at `/signup`.
pub type SignUpPage = FormPage<SignUpForm>;

impl FormPage<SignUpForm> {
	/// Builds the sign-up page.
	pub fn new(context: &AppContext, route: &RouteContext) -> Self {
		Self::build(
			SignUpForm {
				login_path: context.config.login_path.clone(),
			},
			NavBar::for_session(&context.config.brand, &context.auth, route.path()),
			context.api.clone(),
			route.navigator().clone(),
		)
	}
}

impl FormSpec for SignUpForm {
	fn name(&self) -> &'static str {
		"SignUpPage"
	}

	fn form_id(&self) -> &'static str {
		"signup-form"
	}

	fn title(&self) -> &'static str {
		"Create account"
	}

	fn submit_label(&self) -> &'static str {
		"Sign up"
	}

	fn fields(&self, values: &ComponentState) -> String {
		let min = format!(r#" minlength="{}""#, MIN_PASSWORD_LEN);
		[
			input("text", "name", "Full name", values.get_str("name"), ""),
			input("email", "email", "Email", values.get_str("email"), ""),
			input("password", "password", "Password", None, &min),
			input("password", "confirm-password", "Confirm password", None, &min),
		]
		.concat()
	}

	fn footer(&self) -> String {
		format!(
			r#"<p class="auth-link">Already have an account? {}</p><p class="auth-link">{}</p>"#,
			link(&self.login_path, "Log in here", "link"),
			link("/", "Back to home", "link")
		)
	}

	fn endpoint(&self) -> &'static str {
		REGISTER_ENDPOINT
	}

	fn payload(&self, event: &Event) -> Result<Value, String> {
		let (Some(name), Some(email)) = (field(event, "name"), field(event, "email")) else {
			return Err("Name and email are required".to_string());
		};
		let password = event.value("password").unwrap_or_default();
		let confirmation = event.value("confirm-password").unwrap_or_default();
		if password.chars().count() < MIN_PASSWORD_LEN {
			return Err(format!(
				"Password must be at least {} characters",
				MIN_PASSWORD_LEN
			));
		}
		if password != confirmation {
			return Err("Passwords do not match".to_string());
		}
		Ok(json!({ "nombre": name, "email": email, "password": password }))
	}

	fn remembered(&self, event: &Event) -> ComponentState {
		ComponentState::new()
			.with("name", field(event, "name").unwrap_or_default())
			.with("email", field(event, "email").unwrap_or_default())
	}

	fn on_success(&self, _body: Value) -> Result<String, String> {
		Ok(self.login_path.clone())
	}
}
