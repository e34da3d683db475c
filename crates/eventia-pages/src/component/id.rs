//! Stable component identifiers.

use std::fmt;

/// Length of the random suffix appended to the prefix.
const SUFFIX_LEN: usize = 9;

/// Element id owned by one component instance.
///
/// Generated once at construction and never changed, so repeated renders of
/// the same instance produce identical markup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentId(String);

impl ComponentId {
	/// Generates a fresh id such as `counter-1f3a9c0de`.
	pub fn generate(prefix: &str) -> Self {
		let random = uuid::Uuid::new_v4().simple().to_string();
		Self(format!("{}-{}", prefix, &random[..SUFFIX_LEN]))
	}

	/// Uses a caller-provided id verbatim.
	pub fn fixed(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the id as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Derives the id of a child element, e.g. `counter-xyz-inc`.
	pub fn child(&self, suffix: &str) -> String {
		format!("{}-{}", self.0, suffix)
	}
}

impl fmt::Display for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for ComponentId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
