use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use super::ApiError;
use super::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};

type Reply = Result<HttpResponse, ApiError>;

#[derive(Debug, Default)]
struct Script {
	replies: Vec<(HttpMethod, String, VecDeque<Reply>)>,
	sent: Vec<HttpRequest>,
}

/// [`Transport`] that answers from canned replies, for tests and offline
/// hosting.
///
/// Replies are keyed by method and endpoint; a request matches when its URL
/// ends with the endpoint. Queued replies are used in order and the last one
/// keeps answering. Unscripted requests fail with [`ApiError::Network`].
/// Clones share the script.
#[derive(Debug, Default, Clone)]
pub struct ScriptedTransport {
	script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
	/// Transport with no scripted responses.
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a reply.
	pub fn reply(&self, method: HttpMethod, endpoint: &str, reply: Reply) -> &Self {
		let mut script = self.script.borrow_mut();
		match script
			.replies
			.iter_mut()
			.find(|(m, e, _)| *m == method && e == endpoint)
		{
			Some((_, _, queue)) => queue.push_back(reply),
			None => script
				.replies
				.push((method, endpoint.to_string(), VecDeque::from([reply]))),
		}
		self
	}

	/// Queues a JSON reply with the given status.
	pub fn respond(&self, method: HttpMethod, endpoint: &str, status: u16, body: Value) -> &Self {
		self.reply(method, endpoint, Ok(HttpResponse::new(status, body)))
	}

	/// Queues a transport failure.
	pub fn fail(&self, method: HttpMethod, endpoint: &str, message: &str) -> &Self {
		self.reply(method, endpoint, Err(ApiError::Network(message.to_string())))
	}

	/// Requests sent so far.
	pub fn requests(&self) -> Vec<HttpRequest> {
		self.script.borrow().sent.clone()
	}

	/// Number of requests sent to `endpoint` with `method`.
	pub fn count(&self, method: HttpMethod, endpoint: &str) -> usize {
		self.script
			.borrow()
			.sent
			.iter()
			.filter(|r| r.method == method && r.url.ends_with(endpoint))
			.count()
	}
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
		let mut script = self.script.borrow_mut();
		let reply = script
			.replies
			.iter_mut()
			.find(|(method, endpoint, _)| *method == request.method && request.url.ends_with(endpoint.as_str()))
			.and_then(|(_, _, queue)| {
				if queue.len() > 1 {
					queue.pop_front()
				} else {
					queue.front().cloned()
				}
			});
		let reply = reply.unwrap_or_else(|| {
			Err(ApiError::Network(format!(
				"no reply scripted for {} {}",
				request.method, request.url
			)))
		});
		script.sent.push(request);
		reply
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[tokio::test]
	async fn test_last_reply_sticks() {
		let transport = ScriptedTransport::new();
		transport
			.respond(HttpMethod::Get, "/eventos", 500, Value::Null)
			.respond(HttpMethod::Get, "/eventos", 200, json!([]));

		let url = "http://api/eventos";
		for expected in [500, 200, 200] {
			let reply = transport
				.send(HttpRequest::new(HttpMethod::Get, url))
				.await
				.unwrap();
			assert_eq!(reply.status, expected);
		}
		assert_eq!(transport.count(HttpMethod::Get, "/eventos"), 3);
	}

	#[tokio::test]
	async fn test_unscripted_request_fails() {
		let transport = ScriptedTransport::new();
		transport.respond(HttpMethod::Get, "/eventos", 200, json!([]));
		let reply = transport
			.send(HttpRequest::new(HttpMethod::Post, "http://api/eventos"))
			.await;
		assert!(matches!(reply, Err(ApiError::Network(_))));
		assert_eq!(transport.requests().len(), 1);
	}
}
