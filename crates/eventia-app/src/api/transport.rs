//! HTTP transport.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::ApiError;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	Get,
	Post,
	Put,
	Delete,
}

impl HttpMethod {
	/// Upper-case method name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Delete => "DELETE",
		}
	}
}

impl fmt::Display for HttpMethod {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A request ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
	/// HTTP verb.
	pub method: HttpMethod,
	/// Absolute URL.
	pub url: String,
	/// Header names and values, sent in name order.
	pub headers: BTreeMap<String, String>,
	/// JSON body.
	pub body: Option<Value>,
}

impl HttpRequest {
	/// Creates a request without headers or body.
	pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
		Self {
			method,
			url: url.into(),
			headers: BTreeMap::new(),
			body: None,
		}
	}

	/// Adds a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}

	/// Sets the JSON body.
	pub fn json(mut self, body: Value) -> Self {
		self.body = Some(body);
		self
	}
}

/// A received response with its body decoded as JSON.
///
/// Bodies that are not JSON are kept as a string value; an empty body is
/// `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
	/// Status code.
	pub status: u16,
	/// Decoded body.
	pub body: Value,
}

impl HttpResponse {
	/// Creates a response.
	pub fn new(status: u16, body: Value) -> Self {
		Self { status, body }
	}

	/// Whether the status is 2xx.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Sends requests to the backend.
///
/// Implementations report only transport failures as errors; any status
/// code, including 4xx and 5xx, is a response.
#[async_trait(?Send)]
pub trait Transport {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// [`Transport`] backed by `reqwest`.
///
/// Natively the returned futures need a Tokio runtime; in the browser they
/// run on the fetch API.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
	client: Client,
}

impl ReqwestTransport {
	/// Creates a transport with a default client.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a transport with a custom client.
	pub fn with_client(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
		let mut builder = match request.method {
			HttpMethod::Get => self.client.get(&request.url),
			HttpMethod::Post => self.client.post(&request.url),
			HttpMethod::Put => self.client.put(&request.url),
			HttpMethod::Delete => self.client.delete(&request.url),
		};
		for (name, value) in &request.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}
		if let Some(body) = &request.body {
			builder = builder.json(body);
		}

		let response = builder
			.send()
			.await
			.map_err(|e| ApiError::Network(e.to_string()))?;
		let status = response.status().as_u16();
		let text = response
			.text()
			.await
			.map_err(|e| ApiError::Network(e.to_string()))?;

		Ok(HttpResponse::new(status, decode_body(&text)))
	}
}

pub(crate) fn decode_body(text: &str) -> Value {
	if text.trim().is_empty() {
		return Value::Null;
	}
	serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("", Value::Null)]
	#[case("  ", Value::Null)]
	#[case(r#"{"ok": true}"#, json!({"ok": true}))]
	#[case("Bad Gateway", json!("Bad Gateway"))]
	fn test_decode_body(#[case] text: &str, #[case] expected: Value) {
		assert_eq!(decode_body(text), expected);
	}

	#[rstest]
	#[case(200, true)]
	#[case(204, true)]
	#[case(301, false)]
	#[case(401, false)]
	fn test_is_success(#[case] status: u16, #[case] expected: bool) {
		assert_eq!(HttpResponse::new(status, Value::Null).is_success(), expected);
	}

	#[rstest]
	fn test_request_builder() {
		let request = HttpRequest::new(HttpMethod::Put, "http://api/eventos/1")
			.header("Authorization", "Bearer t")
			.json(json!({"nombre": "Feria"}));
		assert_eq!(request.method.to_string(), "PUT");
		assert_eq!(request.headers["Authorization"], "Bearer t");
		assert!(request.body.is_some());
	}
}
