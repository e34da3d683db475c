//! Component-local state.

use serde_json::{Map, Value};

use super::ComponentError;

/// Named fields owned by a component.
///
/// Updates are shallow merges: every key of the partial state overwrites the
/// key of the same name, other keys are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentState {
	fields: Map<String, Value>,
}

impl ComponentState {
	/// Creates an empty state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style field assignment.
	pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.fields.insert(key.to_string(), value.into());
		self
	}

	/// Creates a state from a JSON object.
	///
	/// # Errors
	///
	/// Returns [`ComponentError::InvalidState`] when the value is not an object.
	pub fn from_value(value: Value) -> Result<Self, ComponentError> {
		match value {
			Value::Object(fields) => Ok(Self { fields }),
			other => Err(ComponentError::InvalidState(format!(
				"expected an object, got {}",
				other
			))),
		}
	}

	/// Shallow-merges `partial` into this state.
	pub fn merge(&mut self, partial: ComponentState) {
		self.fields.extend(partial.fields);
	}

	/// Sets a single field.
	pub fn set(&mut self, key: &str, value: impl Into<Value>) {
		self.fields.insert(key.to_string(), value.into());
	}

	/// Returns a field.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.fields.get(key)
	}

	/// Returns an integer field.
	pub fn get_i64(&self, key: &str) -> Option<i64> {
		self.get(key).and_then(Value::as_i64)
	}

	/// Returns a boolean field.
	pub fn get_bool(&self, key: &str) -> Option<bool> {
		self.get(key).and_then(Value::as_bool)
	}

	/// Returns a string field.
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Value::as_str)
	}

	/// Returns whether a field is present and not null.
	pub fn is_set(&self, key: &str) -> bool {
		self.get(key).is_some_and(|v| !v.is_null())
	}

	/// Number of fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns whether there are no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl From<Map<String, Value>> for ComponentState {
	fn from(fields: Map<String, Value>) -> Self {
		Self { fields }
	}
}
