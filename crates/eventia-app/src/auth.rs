//! Authentication state over a session store
//!
//! [`Auth`] reads and writes the session kept in a [`SessionStore`] under
//! the keys `authToken`, `refreshToken`, `user` and `loginTimestamp`, and
//! answers role questions for guards and pages.

mod guards;
mod role;
mod session;
mod store;

use std::rc::Rc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use eventia_pages::{error_log, info_log};

pub use guards::{
	DEFAULT_LOGIN_PATH, DEFAULT_UNAUTHORIZED_PATH, auth_guard, auth_guard_with, guest_guard,
};
pub use role::{NavLink, Role, guest_links};
pub use session::{AuthSession, User, UserInfo};
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorage;
pub use store::{MemoryStore, SessionStore, StoreError};

/// Storage key of the access token.
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Storage key of the serialized user.
pub const USER_KEY: &str = "user";
/// Storage key of the login time in epoch milliseconds.
pub const LOGIN_TIMESTAMP_KEY: &str = "loginTimestamp";

/// Session helpers.
///
/// Cloning is cheap; clones share the store.
#[derive(Clone)]
pub struct Auth {
	store: Rc<dyn SessionStore>,
}

impl std::fmt::Debug for Auth {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Auth")
			.field("authenticated", &self.is_authenticated())
			.field("role", &self.user_role())
			.finish()
	}
}

impl Auth {
	/// Wraps a session store.
	pub fn new(store: Rc<dyn SessionStore>) -> Self {
		Self { store }
	}

	/// Session kept in memory.
	pub fn in_memory() -> Self {
		Self::new(Rc::new(MemoryStore::new()))
	}

	/// The underlying store.
	pub fn store(&self) -> &Rc<dyn SessionStore> {
		&self.store
	}

	/// The stored user; an unreadable entry counts as no user.
	pub fn current_user(&self) -> Option<User> {
		let raw = self.store.get(USER_KEY)?;
		match serde_json::from_str(&raw) {
			Ok(user) => Some(user),
			Err(error) => {
				error_log!("stored user is unreadable: {}", error);
				None
			}
		}
	}

	/// The access token.
	pub fn access_token(&self) -> Option<String> {
		self.store.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
	}

	/// The refresh token.
	pub fn refresh_token(&self) -> Option<String> {
		self.store.get(REFRESH_TOKEN_KEY).filter(|t| !t.is_empty())
	}

	/// A session needs both a token and a readable user.
	pub fn is_authenticated(&self) -> bool {
		self.access_token().is_some() && self.current_user().is_some()
	}

	/// Role of the stored user.
	pub fn user_role(&self) -> Option<Role> {
		self.current_user().map(|user| user.role)
	}

	/// Whether the stored user has exactly `role`.
	pub fn has_role(&self, role: Role) -> bool {
		self.user_role() == Some(role)
	}

	/// Whether the stored user has one of `roles`.
	pub fn has_any_role(&self, roles: &[Role]) -> bool {
		self.user_role().is_some_and(|role| roles.contains(&role))
	}

	/// Whether the stored user's role is at least as high as `minimum`.
	pub fn has_minimum_role(&self, minimum: Role) -> bool {
		self.user_role()
			.is_some_and(|role| role.level() >= minimum.level())
	}

	/// Whether the stored user is an administrator.
	pub fn is_admin(&self) -> bool {
		self.has_role(Role::Admin)
	}

	/// Whether the stored user is an organizer.
	pub fn is_organizer(&self) -> bool {
		self.has_role(Role::Organizer)
	}

	/// Whether the stored user is a regular user.
	pub fn is_user(&self) -> bool {
		self.has_role(Role::User)
	}

	/// Stores a new session.
	pub fn login(&self, session: &AuthSession) -> Result<(), StoreError> {
		let user = serde_json::to_string(&session.user)
			.map_err(|e| StoreError::Unavailable(e.to_string()))?;
		self.store.set(AUTH_TOKEN_KEY, &session.access_token)?;
		match &session.refresh_token {
			Some(token) => self.store.set(REFRESH_TOKEN_KEY, token)?,
			None => self.store.remove(REFRESH_TOKEN_KEY),
		}
		self.store.set(USER_KEY, &user)?;
		self.store.set(
			LOGIN_TIMESTAMP_KEY,
			&chrono::Utc::now().timestamp_millis().to_string(),
		)?;
		info_log!("signed in as {}", session.user.email);
		Ok(())
	}

	/// Removes every session key.
	pub fn logout(&self) {
		for key in [AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY, LOGIN_TIMESTAMP_KEY] {
			self.store.remove(key);
		}
		info_log!("session closed");
	}

	/// Login time in epoch milliseconds.
	pub fn login_timestamp(&self) -> Option<i64> {
		self.store.get(LOGIN_TIMESTAMP_KEY)?.parse().ok()
	}

	/// Whether the access token is missing, unreadable or past its `exp`
	/// claim. A token without `exp` does not expire.
	pub fn is_token_expired(&self) -> bool {
		self.is_token_expired_at(chrono::Utc::now().timestamp_millis())
	}

	/// [`Auth::is_token_expired`] against an explicit clock.
	pub fn is_token_expired_at(&self, now_millis: i64) -> bool {
		let Some(token) = self.access_token() else {
			return true;
		};
		match token_expiry_millis(&token) {
			Ok(Some(expires)) => now_millis > expires,
			Ok(None) => false,
			Err(reason) => {
				error_log!("cannot read token expiry: {}", reason);
				true
			}
		}
	}

	/// Display data for the stored user.
	pub fn user_info(&self) -> Option<UserInfo> {
		self.current_user().map(UserInfo::from)
	}
}

/// Reads the `exp` claim (seconds) of a JWT and returns it in milliseconds.
fn token_expiry_millis(token: &str) -> Result<Option<i64>, String> {
	let payload = token
		.split('.')
		.nth(1)
		.ok_or_else(|| "token has no payload segment".to_string())?;
	let bytes = URL_SAFE_NO_PAD
		.decode(payload.trim_end_matches('='))
		.map_err(|e| e.to_string())?;
	let claims: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| e.to_string())?;
	Ok(claims
		.get("exp")
		.and_then(serde_json::Value::as_f64)
		.map(|exp| (exp * 1000.0) as i64))
}
