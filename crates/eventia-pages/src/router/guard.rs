//! Navigation guards.
//!
//! A guard is a synchronous predicate evaluated before a route activates.
//! Returning `Ok(false)` aborts the activation; the guard decides where the
//! user goes instead by requesting a redirect on the [`GuardContext`]. A guard
//! that cannot decide returns a [`GuardError`] and the router falls back to
//! its not-found route.

use std::cell::RefCell;
use std::rc::Rc;

use super::RouteParams;

/// Guard predicate attached to a route.
pub type Guard = Rc<dyn Fn(&GuardContext<'_>) -> Result<bool, GuardError>>;

/// Failure raised by a guard that could not reach a decision.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("guard failed: {0}")]
pub struct GuardError(String);

impl GuardError {
	/// Creates an error with the given message.
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}

	/// The failure message.
	pub fn message(&self) -> &str {
		&self.0
	}
}

/// Redirect requested by a denying guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
	/// Navigation through the router, replacing the denied entry.
	Soft(String),
	/// Full page load of the target location.
	Hard(String),
}

impl Redirect {
	/// The redirect target.
	pub fn target(&self) -> &str {
		match self {
			Self::Soft(path) | Self::Hard(path) => path,
		}
	}
}

/// What a guard sees while deciding.
#[derive(Debug)]
pub struct GuardContext<'a> {
	path: &'a str,
	params: &'a RouteParams,
	redirect: RefCell<Option<Redirect>>,
}

impl<'a> GuardContext<'a> {
	/// Creates the context for evaluating a guard against `path`.
	pub fn new(path: &'a str, params: &'a RouteParams) -> Self {
		Self {
			path,
			params,
			redirect: RefCell::new(None),
		}
	}

	/// The path being activated.
	pub fn path(&self) -> &str {
		self.path
	}

	/// Parameters extracted from the path.
	pub fn params(&self) -> &RouteParams {
		self.params
	}

	/// Returns a single path parameter.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Requests a router navigation to `path` once the guard has denied.
	pub fn redirect(&self, path: impl Into<String>) {
		*self.redirect.borrow_mut() = Some(Redirect::Soft(path.into()));
	}

	/// Requests a full page load of `path` once the guard has denied.
	pub fn redirect_hard(&self, path: impl Into<String>) {
		*self.redirect.borrow_mut() = Some(Redirect::Hard(path.into()));
	}

	/// The redirect requested so far, if any.
	pub fn requested_redirect(&self) -> Option<Redirect> {
		self.redirect.borrow().clone()
	}

	/// Consumes the context, returning the requested redirect.
	pub fn into_redirect(self) -> Option<Redirect> {
		self.redirect.into_inner()
	}
}

/// Wraps a closure into a [`Guard`].
pub fn guard<F>(predicate: F) -> Guard
where
	F: Fn(&GuardContext<'_>) -> Result<bool, GuardError> + 'static,
{
	Rc::new(predicate)
}
