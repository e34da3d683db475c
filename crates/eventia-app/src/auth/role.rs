//! User roles.

use serde::{Deserialize, Serialize};

/// A navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
	/// Target path.
	pub path: String,
	/// Link text.
	pub text: String,
	/// Extra CSS class.
	pub class: Option<String>,
}

impl NavLink {
	/// Creates a link.
	pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			text: text.into(),
			class: None,
		}
	}

	/// Adds a CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}
}

/// Links shown to visitors without a session.
pub fn guest_links() -> Vec<NavLink> {
	vec![
		NavLink::new("/", "Home"),
		NavLink::new("/login", "Log in"),
		NavLink::new("/signup", "Sign up").class("btn-signup"),
	]
}

/// Roles known to the backend.
///
/// The wire values are the backend's: `ADMIN`, `ORGANIZADOR` (also accepted
/// as `ORGANIZER`) and `USER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
	/// Platform administrator.
	#[serde(rename = "ADMIN")]
	Admin,
	/// Event organizer.
	#[serde(rename = "ORGANIZADOR", alias = "ORGANIZER")]
	Organizer,
	/// Attendee.
	#[serde(rename = "USER")]
	User,
}

impl Role {
	/// Every role, highest level first.
	pub const ALL: [Role; 3] = [Role::Admin, Role::Organizer, Role::User];

	/// Wire value.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Admin => "ADMIN",
			Self::Organizer => "ORGANIZADOR",
			Self::User => "USER",
		}
	}

	/// Position in the hierarchy; higher means more privileges.
	pub fn level(self) -> u8 {
		match self {
			Self::Admin => 3,
			Self::Organizer => 2,
			Self::User => 1,
		}
	}

	/// Human-readable name.
	pub fn label(self) -> &'static str {
		match self {
			Self::Admin => "Administrator",
			Self::Organizer => "Organizer",
			Self::User => "User",
		}
	}

	/// Landing page after login.
	pub fn dashboard_path(self) -> &'static str {
		match self {
			Self::Admin => "/admin",
			Self::Organizer => "/organizador",
			Self::User => "/dashboard",
		}
	}

	/// Navigation entries for a signed-in user with this role.
	pub fn nav_links(self) -> Vec<NavLink> {
		let mut links = vec![NavLink::new("/", "Home")];
		match self {
			Self::Admin => {
				links.push(NavLink::new("/admin", "Administration"));
				links.push(NavLink::new("/components", "Components"));
			}
			Self::Organizer => {
				links.push(NavLink::new("/organizador", "My events"));
			}
			Self::User => {
				links.push(NavLink::new("/dashboard", "My tickets"));
			}
		}
		links
	}
}

impl std::fmt::Display for Role {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for Role {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"ADMIN" => Ok(Self::Admin),
			"ORGANIZADOR" | "ORGANIZER" => Ok(Self::Organizer),
			"USER" => Ok(Self::User),
			other => Err(format!("unknown role: {}", other)),
		}
	}
}
