//! Shared setup for application scenarios.

#![allow(dead_code)]

use std::rc::Rc;

use eventia_app::api::{HttpMethod, ScriptedTransport};
use eventia_app::auth::{AUTH_TOKEN_KEY, Auth, AuthSession, MemoryStore, Role, SessionStore, User};
use eventia_app::{App, AppConfig};
use eventia_pages::{Document, MemoryHistory};
use serde_json::{Value, json};

/// A started application with handles on its platform parts.
pub struct Harness {
	pub app: App,
	pub history: MemoryHistory,
	pub store: MemoryStore,
	pub transport: ScriptedTransport,
}

impl Harness {
	/// Builds an application at `path` with the given session store, without
	/// starting it.
	pub fn build(path: &str, store: MemoryStore) -> Self {
		let history = MemoryHistory::new(path);
		let transport = ScriptedTransport::new();
		let app = App::new(
			AppConfig::default(),
			Document::new(),
			Rc::new(history.clone()),
			Rc::new(store.clone()),
			Rc::new(transport.clone()),
		)
		.expect("default configuration is valid");
		Self {
			app,
			history,
			store,
			transport,
		}
	}

	pub fn start(self) -> Self {
		self.app.start().expect("router starts");
		self
	}

	pub fn document(&self) -> &Document {
		self.app.document()
	}

	/// Visible text of the mount point.
	pub fn text(&self) -> String {
		self.document().text_content("app").unwrap_or_default()
	}

	pub fn page(&self) -> Option<&'static str> {
		self.app.router().active_component()
	}

	pub fn path(&self) -> String {
		self.app.router().current_path()
	}

	pub fn auth(&self) -> Auth {
		Auth::new(Rc::new(self.store.clone()))
	}

	pub fn signed_in(&self) -> bool {
		self.store.get(AUTH_TOKEN_KEY).is_some()
	}

	pub fn posts_to(&self, endpoint: &str) -> Vec<Value> {
		self.transport
			.requests()
			.into_iter()
			.filter(|r| r.method == HttpMethod::Post && r.url.ends_with(endpoint))
			.filter_map(|r| r.body)
			.collect()
	}
}

/// An application that is not signed in.
pub fn visitor(path: &str) -> Harness {
	Harness::build(path, MemoryStore::new()).start()
}

/// An application whose store already holds a session for `role`.
pub fn member(path: &str, role: Role) -> Harness {
	let store = MemoryStore::new();
	Auth::new(Rc::new(store.clone()))
		.login(&session(role))
		.expect("memory store accepts the session");
	Harness::build(path, store).start()
}

pub fn user(role: Role) -> User {
	User {
		id: "7".to_string(),
		name: "Ana".to_string(),
		surname: "Ruiz".to_string(),
		email: "ana@example.com".to_string(),
		role,
	}
}

pub fn session(role: Role) -> AuthSession {
	AuthSession {
		access_token: "header.payload.signature".to_string(),
		refresh_token: None,
		user: user(role),
	}
}

/// Login response in the backend's envelope and field names.
pub fn login_reply(role: &str) -> Value {
	json!({
		"success": true,
		"data": {
			"accessToken": "header.payload.signature",
			"refreshToken": "refresh",
			"usuario": {
				"id": 7,
				"nombre": "Ana",
				"apellidos": "Ruiz",
				"email": "ana@example.com",
				"rol": role
			}
		}
	})
}
