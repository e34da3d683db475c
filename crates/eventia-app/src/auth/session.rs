//! Signed-in user data.

use serde::{Deserialize, Serialize};

use super::Role;

/// The signed-in user as stored under the `user` key.
///
/// Field aliases accept the backend's Spanish names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// Backend id.
	#[serde(deserialize_with = "crate::serde_ext::id_string")]
	pub id: String,
	/// Given name.
	#[serde(alias = "nombre", default)]
	pub name: String,
	/// Family name.
	#[serde(alias = "apellidos", default)]
	pub surname: String,
	/// Email address.
	#[serde(default)]
	pub email: String,
	/// Role.
	#[serde(alias = "rol")]
	pub role: Role,
}

/// Tokens and user returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
	/// Bearer token for API calls.
	#[serde(alias = "accessToken", alias = "token")]
	pub access_token: String,
	/// Token used to obtain a new access token.
	#[serde(alias = "refreshToken", default)]
	pub refresh_token: Option<String>,
	/// The signed-in user.
	#[serde(alias = "usuario")]
	pub user: User,
}

/// Display data derived from [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
	/// Backend id.
	pub id: String,
	/// Given name.
	pub name: String,
	/// Family name.
	pub surname: String,
	/// Email address.
	pub email: String,
	/// Role.
	pub role: Role,
	/// Given and family name.
	pub full_name: String,
	/// Upper-cased first letters of both names.
	pub initials: String,
}

impl From<User> for UserInfo {
	fn from(user: User) -> Self {
		let full_name = format!("{} {}", user.name, user.surname).trim().to_string();
		let initials = user
			.name
			.chars()
			.next()
			.into_iter()
			.chain(user.surname.chars().next())
			.flat_map(char::to_uppercase)
			.collect();
		Self {
			id: user.id,
			name: user.name,
			surname: user.surname,
			email: user.email,
			role: user.role,
			full_name,
			initials,
		}
	}
}
