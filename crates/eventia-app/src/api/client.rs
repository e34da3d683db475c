use std::rc::Rc;

use eventia_pages::router::History;
use eventia_pages::{debug_log, error_log, warn_log};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
use super::{ApiError, ApiResponse, unwrap_envelope};
use crate::auth::{Auth, DEFAULT_LOGIN_PATH};
use crate::config::AppConfig;

/// Path of the sign-up page, where a `401` is an expected answer.
pub const SIGNUP_PATH: &str = "/signup";

/// Client for the REST backend.
///
/// Cloning is cheap; clones share the transport, session and history.
#[derive(Clone)]
pub struct ApiClient {
	base_url: String,
	transport: Rc<dyn Transport>,
	auth: Auth,
	history: Rc<dyn History>,
	login_path: String,
}

impl std::fmt::Debug for ApiClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ApiClient")
			.field("base_url", &self.base_url)
			.field("login_path", &self.login_path)
			.finish()
	}
}

impl ApiClient {
	/// Creates a client for `base_url` (without trailing slash).
	pub fn new(
		base_url: impl Into<String>,
		transport: Rc<dyn Transport>,
		auth: Auth,
		history: Rc<dyn History>,
	) -> Self {
		Self {
			base_url: base_url.into(),
			transport,
			auth,
			history,
			login_path: DEFAULT_LOGIN_PATH.to_string(),
		}
	}

	/// Creates a client from the application settings.
	pub fn from_config(
		config: &AppConfig,
		transport: Rc<dyn Transport>,
		auth: Auth,
		history: Rc<dyn History>,
	) -> Self {
		Self::new(config.api_base_url.clone(), transport, auth, history)
			.with_login_path(config.login_path.clone())
	}

	/// Sets where a `401` sends the user.
	pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
		self.login_path = path.into();
		self
	}

	/// The backend base URL.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// The session used for bearer tokens.
	pub fn auth(&self) -> &Auth {
		&self.auth
	}

	/// Absolute URL of an endpoint.
	pub fn url(&self, endpoint: &str) -> String {
		if endpoint.starts_with('/') {
			format!("{}{}", self.base_url, endpoint)
		} else {
			format!("{}/{}", self.base_url, endpoint)
		}
	}

	/// `GET endpoint`, unwrapping `{success, data, message}` envelopes.
	pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResponse<T> {
		let response = self.request(HttpMethod::Get, endpoint, None).await;
		decode(map_data(response, unwrap_envelope))
	}

	/// `POST endpoint` with a JSON body.
	pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> ApiResponse<T>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		self.send_with_body(HttpMethod::Post, endpoint, body).await
	}

	/// `PUT endpoint` with a JSON body.
	pub async fn put<B, T>(&self, endpoint: &str, body: &B) -> ApiResponse<T>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		self.send_with_body(HttpMethod::Put, endpoint, body).await
	}

	/// `DELETE endpoint`.
	pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResponse<T> {
		decode(self.request(HttpMethod::Delete, endpoint, None).await)
	}

	async fn send_with_body<B, T>(&self, method: HttpMethod, endpoint: &str, body: &B) -> ApiResponse<T>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		let body = match serde_json::to_value(body) {
			Ok(body) => body,
			Err(e) => {
				error_log!("{} {}: {}", method, endpoint, e);
				return ApiResponse::failure(ApiError::Encode(e.to_string()), None);
			}
		};
		decode(self.request(method, endpoint, Some(body)).await)
	}

	async fn request(&self, method: HttpMethod, endpoint: &str, body: Option<Value>) -> ApiResponse<Value> {
		let mut request = HttpRequest::new(method, self.url(endpoint));
		if let Some(token) = self.auth.access_token() {
			request = request.header("Authorization", format!("Bearer {}", token));
		}
		if let Some(body) = body {
			request = request.json(body);
		}
		debug_log!("{} {}", method, request.url);

		let response = match self.transport.send(request).await {
			Ok(response) => response,
			Err(error) => {
				error_log!("{} {} failed: {}", method, endpoint, error);
				return ApiResponse::failure(error, None);
			}
		};

		if response.status == 401 {
			self.handle_unauthorized();
			return ApiResponse::failure(ApiError::Unauthorized, Some(401));
		}
		if !response.is_success() {
			let error = status_error(&response);
			error_log!("{} {} failed: {}", method, endpoint, error);
			return ApiResponse::failure(error, Some(response.status));
		}
		ApiResponse::success(response.status, response.body)
	}

	fn handle_unauthorized(&self) {
		let location = self.history.current_path();
		let page = page_path(&location);
		if page == self.login_path || page == SIGNUP_PATH {
			debug_log!("401 on {}; staying", page);
			return;
		}
		warn_log!("401 on {}; closing session", page);
		self.auth.logout();
		if let Err(error) = self.history.assign(&self.login_path) {
			error_log!("cannot load {}: {}", self.login_path, error);
		}
	}
}

fn page_path(location: &str) -> &str {
	location
		.split(['?', '#'])
		.next()
		.unwrap_or(location)
}

fn status_error(response: &HttpResponse) -> ApiError {
	let message = ["message", "error"]
		.iter()
		.find_map(|key| response.body.get(key).and_then(Value::as_str))
		.map(str::to_string)
		.unwrap_or_else(|| format!("Request failed with status code {}", response.status));
	ApiError::Status {
		status: response.status,
		message,
	}
}

fn map_data(response: ApiResponse<Value>, f: impl FnOnce(Value) -> Value) -> ApiResponse<Value> {
	ApiResponse {
		data: response.data.map(f),
		error: response.error,
		status: response.status,
	}
}

fn decode<T: DeserializeOwned>(response: ApiResponse<Value>) -> ApiResponse<T> {
	let ApiResponse { data, error, status } = response;
	if let Some(error) = error {
		return ApiResponse::failure(error, status);
	}
	match serde_json::from_value(data.unwrap_or(Value::Null)) {
		Ok(data) => ApiResponse {
			data: Some(data),
			error: None,
			status,
		},
		Err(e) => {
			error_log!("cannot decode response: {}", e);
			ApiResponse::failure(ApiError::Decode(e.to_string()), status)
		}
	}
}
