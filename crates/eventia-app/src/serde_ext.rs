//! Deserialization helpers for backend payloads.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
	Number(i64),
	Text(String),
}

impl From<RawId> for String {
	fn from(raw: RawId) -> Self {
		match raw {
			RawId::Number(n) => n.to_string(),
			RawId::Text(s) => s,
		}
	}
}

/// Accepts ids sent as numbers or strings.
pub(crate) fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	RawId::deserialize(deserializer).map(String::from)
}

/// Optional variant of [`id_string`]; `null` and missing fields become `None`.
pub(crate) fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}
