use eventia_pages::dom::markup::escape;
use eventia_pages::{Component, ComponentId};

use super::link;
use crate::auth::{Auth, NavLink, UserInfo, guest_links};

/// Path of the logout route linked from the user area.
const LOGOUT_PATH: &str = "/logout";

/// Top navigation bar.
///
/// The link matching `current_path` gets the `active` class. With a user
/// set, a greeting and a logout link are shown.
#[derive(Debug, Clone)]
pub struct NavBar {
	id: ComponentId,
	brand: String,
	links: Vec<NavLink>,
	current_path: String,
	user: Option<UserInfo>,
}

impl NavBar {
	/// Bar showing only the brand.
	pub fn new(brand: impl Into<String>) -> Self {
		Self {
			id: ComponentId::generate("navbar"),
			brand: brand.into(),
			links: Vec::new(),
			current_path: "/".to_string(),
			user: None,
		}
	}

	/// Links and user of the current session: the role's links for a
	/// signed-in user, the guest links otherwise.
	pub fn for_session(brand: impl Into<String>, auth: &Auth, current_path: &str) -> Self {
		let user = auth.user_info();
		let links = match &user {
			Some(user) => user.role.nav_links(),
			None => guest_links(),
		};
		Self::new(brand)
			.links(links)
			.current_path(current_path)
			.user(user)
	}

	/// Sets the links.
	pub fn links(mut self, links: Vec<NavLink>) -> Self {
		self.links = links;
		self
	}

	/// Path whose link is highlighted.
	pub fn current_path(mut self, path: impl Into<String>) -> Self {
		self.current_path = path.into();
		self
	}

	/// Signed-in user shown on the right.
	pub fn user(mut self, user: Option<UserInfo>) -> Self {
		self.user = user;
		self
	}

	fn render_links(&self) -> String {
		self.links
			.iter()
			.map(|nav| {
				let mut class = String::from("nav-link");
				if nav.path == self.current_path {
					class.push_str(" active");
				}
				if let Some(extra) = &nav.class {
					class.push(' ');
					class.push_str(extra);
				}
				link(&nav.path, &nav.text, &class)
			})
			.collect()
	}

	fn render_user(&self, user: &UserInfo) -> String {
		format!(
			r#"<div class="navbar-user"><span class="user-name">Hello, {}</span>{}</div>"#,
			escape(&user.name),
			link(LOGOUT_PATH, "Log out", "btn-logout")
		)
	}
}

impl Component for NavBar {
	fn name(&self) -> &'static str {
		"NavBar"
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		format!(
			r#"<nav class="navbar" id="{}"><div class="navbar-brand">{}</div><div class="navbar-links">{}</div>{}</nav>"#,
			self.id,
			link("/", &self.brand, "brand-link"),
			self.render_links(),
			self.user
				.as_ref()
				.map(|user| self.render_user(user))
				.unwrap_or_default()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::auth::{AuthSession, Role, User};
	use rstest::rstest;

	#[rstest]
	fn test_guest_navbar() {
		let html = NavBar::for_session("Eventia", &Auth::in_memory(), "/login").render();
		assert!(html.contains(r#"<a href="/" class="brand-link" data-link>Eventia</a>"#));
		assert!(html.contains(r#"<a href="/login" class="nav-link active" data-link>Log in</a>"#));
		assert!(html.contains(r#"<a href="/signup" class="nav-link btn-signup" data-link>Sign up</a>"#));
		assert!(!html.contains("navbar-user"));
	}

	#[rstest]
	#[case(Role::Admin, "/admin")]
	#[case(Role::Organizer, "/organizador")]
	#[case(Role::User, "/dashboard")]
	fn test_signed_in_navbar(#[case] role: Role, #[case] dashboard: &str) {
		let auth = Auth::in_memory();
		auth.login(&AuthSession {
			access_token: "t".to_string(),
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

		let html = NavBar::for_session("Eventia", &auth, dashboard).render();

		assert!(html.contains(&format!(r#"<a href="{}" class="nav-link active" data-link>"#, dashboard)));
		assert!(html.contains("Hello, Ana"));
		assert!(html.contains(r#"<a href="/logout" class="btn-logout" data-link>Log out</a>"#));
	}

	#[rstest]
	fn test_render_is_stable() {
		let navbar = NavBar::new("Brand").links(guest_links());
		assert_eq!(navbar.render(), navbar.render());
	}
}
