//! Application settings
//!
//! Settings can be loaded from JSON, from environment overrides, or built in
//! code. Every field has a default, so a partial JSON document is enough.

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	/// The settings document could not be parsed.
	#[error("Invalid settings document: {0}")]
	Parse(String),
	/// A field holds an unusable value.
	#[error("Invalid value for '{key}': {message}")]
	InvalidValue {
		/// Field name.
		key: &'static str,
		/// What is wrong with it.
		message: String,
	},
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
	/// Base URL of the REST backend, without trailing slash.
	#[serde(default = "default_api_base_url")]
	pub api_base_url: String,

	/// Id of the element the router renders into.
	#[serde(default = "default_mount_point")]
	pub mount_point: String,

	/// Brand shown in the navigation bar.
	#[serde(default = "default_brand")]
	pub brand: String,

	/// Where unauthenticated users are sent.
	#[serde(default = "default_login_path")]
	pub login_path: String,

	/// Where users with the wrong role are sent.
	#[serde(default = "default_unauthorized_path")]
	pub unauthorized_path: String,

	/// Where signed-in users visiting guest-only pages are sent.
	#[serde(default = "default_landing_path")]
	pub landing_path: String,
}

fn default_api_base_url() -> String {
	"http://localhost:3000/api".to_string()
}

fn default_mount_point() -> String {
	"app".to_string()
}

fn default_brand() -> String {
	"Eventia".to_string()
}

fn default_login_path() -> String {
	"/login".to_string()
}

fn default_unauthorized_path() -> String {
	"/unauthorized".to_string()
}

fn default_landing_path() -> String {
	"/".to_string()
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			api_base_url: default_api_base_url(),
			mount_point: default_mount_point(),
			brand: default_brand(),
			login_path: default_login_path(),
			unauthorized_path: default_unauthorized_path(),
			landing_path: default_landing_path(),
		}
	}
}

/// Runtime variable first, then the value baked in at build time.
#[cfg(not(target_arch = "wasm32"))]
fn env_override(name: &str, build_time: Option<&'static str>) -> Option<String> {
	std::env::var(name)
		.ok()
		.or_else(|| build_time.map(str::to_string))
}

/// The browser has no process environment; only build-time values apply.
#[cfg(target_arch = "wasm32")]
fn env_override(_name: &str, build_time: Option<&'static str>) -> Option<String> {
	build_time.map(str::to_string)
}

impl AppConfig {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses and validates a JSON settings document.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: Self =
			serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Applies `EVENTIA_API_BASE_URL`, `EVENTIA_MOUNT_POINT` and
	/// `EVENTIA_BRAND` overrides to the defaults.
	pub fn from_env() -> Result<Self, ConfigError> {
		let mut config = Self::default();

		if let Some(url) = env_override("EVENTIA_API_BASE_URL", option_env!("EVENTIA_API_BASE_URL")) {
			config.api_base_url = url;
		}
		if let Some(mount) = env_override("EVENTIA_MOUNT_POINT", option_env!("EVENTIA_MOUNT_POINT")) {
			config.mount_point = mount;
		}
		if let Some(brand) = env_override("EVENTIA_BRAND", option_env!("EVENTIA_BRAND")) {
			config.brand = brand;
		}

		config.validate()?;
		Ok(config)
	}

	/// Sets the backend base URL.
	pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
		self.api_base_url = url.into();
		self
	}

	/// Validate settings
	pub fn validate(&self) -> Result<(), ConfigError> {
		let url = &self.api_base_url;
		if !(url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/')) {
			return Err(ConfigError::InvalidValue {
				key: "api_base_url",
				message: format!("expected an http(s) URL or an absolute path, got '{}'", url),
			});
		}
		if url.len() > 1 && url.ends_with('/') {
			return Err(ConfigError::InvalidValue {
				key: "api_base_url",
				message: "must not end with '/'".to_string(),
			});
		}

		if self.mount_point.trim().is_empty() {
			return Err(ConfigError::InvalidValue {
				key: "mount_point",
				message: "must not be empty".to_string(),
			});
		}

		for (key, path) in [
			("login_path", &self.login_path),
			("unauthorized_path", &self.unauthorized_path),
			("landing_path", &self.landing_path),
		] {
			if !path.starts_with('/') {
				return Err(ConfigError::InvalidValue {
					key,
					message: format!("must start with '/', got '{}'", path),
				});
			}
		}

		Ok(())
	}
}
