//! Backend HTTP client
//!
//! [`ApiClient`] wraps the REST backend. Failures never escape as `Err`:
//! every call yields an [`ApiResponse`] whose `error` is set when the
//! request failed, so pages branch on data instead of unwinding.
//!
//! Two cross-cutting behaviors apply to every request:
//!
//! - a stored access token is sent as `Authorization: Bearer <token>`
//! - a `401` response clears the session and loads the login page, unless
//!   the user already is on the login or sign-up page

mod client;
mod scripted;
mod transport;

use serde_json::Value;

pub use client::{ApiClient, SIGNUP_PATH};
pub use scripted::ScriptedTransport;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};

/// Errors reported in [`ApiResponse::error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
	/// The request never produced a response.
	#[error("network error: {0}")]
	Network(String),
	/// The backend answered with a non-2xx status.
	#[error("{message}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Backend message, or a generic description.
		message: String,
	},
	/// The backend answered `401`.
	#[error("session expired or not authorized")]
	Unauthorized,
	/// The response body did not have the expected shape.
	#[error("unexpected response body: {0}")]
	Decode(String),
	/// The request body could not be serialized.
	#[error("cannot encode request body: {0}")]
	Encode(String),
}

/// Outcome of an API call.
///
/// Exactly one of `data` and `error` is set. `status` is missing when no
/// response arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T = Value> {
	/// Decoded payload on success.
	pub data: Option<T>,
	/// What went wrong otherwise.
	pub error: Option<ApiError>,
	/// HTTP status code.
	pub status: Option<u16>,
}

impl<T> ApiResponse<T> {
	/// A successful response.
	pub fn success(status: u16, data: T) -> Self {
		Self {
			data: Some(data),
			error: None,
			status: Some(status),
		}
	}

	/// A failed call.
	pub fn failure(error: ApiError, status: Option<u16>) -> Self {
		Self {
			data: None,
			error: Some(error),
			status,
		}
	}

	/// Whether the call succeeded.
	pub fn is_ok(&self) -> bool {
		self.error.is_none()
	}

	/// Human readable error, if any.
	pub fn error_message(&self) -> Option<String> {
		self.error.as_ref().map(ToString::to_string)
	}

	/// Converts into a `Result`.
	pub fn into_result(self) -> Result<T, ApiError> {
		match (self.data, self.error) {
			(_, Some(error)) => Err(error),
			(Some(data), None) => Ok(data),
			(None, None) => Err(ApiError::Decode("empty response".to_string())),
		}
	}
}

/// Extracts the payload of a `{success, data, message}` envelope.
///
/// Bodies without a usable `data` field are returned whole.
pub fn unwrap_envelope(body: Value) -> Value {
	match body {
		Value::Object(mut fields) => match fields.remove("data") {
			Some(data) if is_truthy(&data) => data,
			Some(data) => {
				fields.insert("data".to_string(), data);
				Value::Object(fields)
			}
			None => Value::Object(fields),
		},
		other => other,
	}
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}
