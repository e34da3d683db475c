//! Path patterns.
//!
//! A pattern is either a literal path (`/login`), a path with named segments
//! (`/events/{id}`) or the wildcard `*`, which matches every path.

use std::collections::HashMap;

use regex::Regex;

/// The wildcard pattern string.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone)]
enum Kind {
	Wildcard,
	Literal,
	Dynamic { regex: Regex, names: Vec<String> },
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	source: String,
	kind: Kind,
}

fn is_param(segment: &str) -> Option<&str> {
	segment
		.strip_prefix('{')
		.and_then(|s| s.strip_suffix('}'))
		.filter(|name| !name.is_empty())
}

impl PathPattern {
	/// Compiles a pattern.
	pub fn new(pattern: &str) -> Self {
		if pattern == WILDCARD {
			return Self {
				source: pattern.to_string(),
				kind: Kind::Wildcard,
			};
		}

		let mut names = Vec::new();
		let mut expr = String::from("^");
		for (index, segment) in pattern.split('/').enumerate() {
			if index > 0 {
				expr.push('/');
			}
			match is_param(segment) {
				Some(name) => {
					names.push(name.to_string());
					expr.push_str("([^/]+)");
				}
				None => expr.push_str(&regex::escape(segment)),
			}
		}
		expr.push('$');

		let kind = if names.is_empty() {
			Kind::Literal
		} else {
			match Regex::new(&expr) {
				Ok(regex) => Kind::Dynamic { regex, names },
				// Every segment is escaped, so this only guards against regex size limits.
				Err(_) => Kind::Literal,
			}
		};

		Self {
			source: pattern.to_string(),
			kind,
		}
	}

	/// Returns the pattern source.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	/// Returns whether this is the wildcard pattern.
	pub fn is_wildcard(&self) -> bool {
		matches!(self.kind, Kind::Wildcard)
	}

	/// Returns the parameter names in pattern order.
	pub fn param_names(&self) -> &[String] {
		match &self.kind {
			Kind::Dynamic { names, .. } => names,
			_ => &[],
		}
	}

	/// Matches a path, returning the extracted parameters.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		match &self.kind {
			Kind::Wildcard => Some(HashMap::new()),
			Kind::Literal => (self.source == path).then(HashMap::new),
			Kind::Dynamic { regex, names } => {
				let captures = regex.captures(path)?;
				Some(
					names
						.iter()
						.enumerate()
						.map(|(i, name)| (name.clone(), captures[i + 1].to_string()))
						.collect(),
				)
			}
		}
	}

	/// Builds a path from parameters. Returns `None` for the wildcard or when
	/// a parameter is missing.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		match &self.kind {
			Kind::Wildcard => None,
			Kind::Literal => Some(self.source.clone()),
			Kind::Dynamic { .. } => {
				let segments: Option<Vec<String>> = self
					.source
					.split('/')
					.map(|segment| match is_param(segment) {
						Some(name) => params.get(name).cloned(),
						None => Some(segment.to_string()),
					})
					.collect();
				segments.map(|s| s.join("/"))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;

	#[rstest]
	#[case("/login", "/login", true)]
	#[case("/login", "/login/", false)]
	#[case("/login", "/signup", false)]
	#[case("/", "/", true)]
	#[case("/", "", false)]
	fn test_literal_match(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
		assert_eq!(PathPattern::new(pattern).matches(path).is_some(), expected);
	}

	#[rstest]
	fn test_dynamic_match_extracts_params() {
		let pattern = PathPattern::new("/events/{id}/tickets/{ticket}");
		let params = pattern.matches("/events/7/tickets/A-12").unwrap();
		assert_eq!(params.get("id").map(String::as_str), Some("7"));
		assert_eq!(params.get("ticket").map(String::as_str), Some("A-12"));
		assert_eq!(pattern.param_names(), ["id", "ticket"]);
		assert!(pattern.matches("/events/7").is_none());
	}

	#[rstest]
	fn test_literal_with_regex_characters() {
		let pattern = PathPattern::new("/a.b");
		assert!(pattern.matches("/a.b").is_some());
		assert!(pattern.matches("/axb").is_none());
	}

	#[rstest]
	fn test_reverse() {
		let pattern = PathPattern::new("/events/{id}");
		let params = HashMap::from([("id".to_string(), "42".to_string())]);
		assert_eq!(pattern.reverse(&params).as_deref(), Some("/events/42"));
		assert!(pattern.reverse(&HashMap::new()).is_none());
		assert!(PathPattern::new(WILDCARD).reverse(&params).is_none());
	}

	proptest! {
		#[test]
		fn prop_wildcard_matches_everything(path in "/[a-z0-9/]{0,24}") {
			prop_assert!(PathPattern::new(WILDCARD).matches(&path).is_some());
		}

		#[test]
		fn prop_literal_matches_only_itself(a in "/[a-z]{1,8}", b in "/[a-z]{1,8}") {
			let pattern = PathPattern::new(&a);
			prop_assert_eq!(pattern.matches(&b).is_some(), a == b);
		}

		#[test]
		fn prop_dynamic_roundtrip(id in "[a-zA-Z0-9_-]{1,12}") {
			let pattern = PathPattern::new("/events/{id}");
			let params = pattern.matches(&format!("/events/{}", id)).unwrap();
			prop_assert_eq!(pattern.reverse(&params), Some(format!("/events/{}", id)));
		}
	}
}
