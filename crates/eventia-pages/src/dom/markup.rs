//! Markup scanning helpers.
//!
//! Components render to plain HTML strings. The document model only needs to
//! locate elements by `id`, read their attributes, and find the extent of an
//! element so its subtree can be replaced. A tag-balanced scan is enough for
//! that and keeps the model independent from a real DOM.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

static ID_ATTR: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"<[a-zA-Z][^>]*?\sid="([^"]+)""#).expect("valid id regex"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*"([^"]*)")?"#).expect("valid attribute regex")
});

static OPEN_TAG_NAME: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^<([a-zA-Z][a-zA-Z0-9-]*)").expect("valid tag regex"));

static ANCHOR: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"<a(?:\s[^>]*)?>").expect("valid anchor regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static WHITESPACE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Byte offsets of an element inside a markup string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSpan {
	/// Start of the opening tag.
	pub start: usize,
	/// End of the opening tag (start of the inner markup).
	pub inner_start: usize,
	/// Start of the closing tag (end of the inner markup).
	pub inner_end: usize,
	/// End of the closing tag.
	pub end: usize,
}

impl ElementSpan {
	/// Returns the full element markup.
	pub fn outer<'a>(&self, markup: &'a str) -> &'a str {
		&markup[self.start..self.end]
	}

	/// Returns the markup between the opening and closing tag.
	pub fn inner<'a>(&self, markup: &'a str) -> &'a str {
		&markup[self.inner_start..self.inner_end]
	}

	/// Returns the opening tag.
	pub fn open_tag<'a>(&self, markup: &'a str) -> &'a str {
		&markup[self.start..self.inner_start]
	}
}

/// A parsed opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
	/// Lower-cased tag name.
	pub tag: String,
	/// Attributes; valueless attributes map to an empty string.
	pub attributes: HashMap<String, String>,
}

impl TagInfo {
	/// Returns an attribute value.
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.get(name).map(String::as_str)
	}

	/// Returns whether the attribute is present.
	pub fn has_attribute(&self, name: &str) -> bool {
		self.attributes.contains_key(name)
	}
}

/// Escapes text for safe interpolation into markup.
pub fn escape(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

/// Collects every `id` attribute value in the markup, in document order.
pub fn element_ids(markup: &str) -> Vec<String> {
	ID_ATTR
		.captures_iter(markup)
		.map(|c| c[1].to_string())
		.collect()
}

/// Parses an opening tag such as `<a href="/x" data-link>`.
pub fn parse_open_tag(open_tag: &str) -> Option<TagInfo> {
	let name = OPEN_TAG_NAME.captures(open_tag)?;
	let tag = name[1].to_ascii_lowercase();
	let rest = open_tag[name[0].len()..]
		.trim_end_matches('>')
		.trim_end_matches('/');

	let attributes = ATTRIBUTE
		.captures_iter(rest)
		.map(|c| {
			(
				c[1].to_string(),
				c.get(2).map(|v| v.as_str().to_string()).unwrap_or_default(),
			)
		})
		.collect();

	Some(TagInfo { tag, attributes })
}

/// Finds the element carrying `id="<id>"`.
pub fn find_element(markup: &str, id: &str) -> Option<ElementSpan> {
	let open = Regex::new(&format!(
		r#"<([a-zA-Z][a-zA-Z0-9-]*)(?:\s[^>]*?)?\sid="{}"[^>]*>"#,
		regex::escape(id)
	))
	.ok()?;
	let open_match = open.captures(markup)?;
	let whole = open_match.get(0)?;
	let tag = open_match[1].to_ascii_lowercase();

	let (start, inner_start) = (whole.start(), whole.end());
	if VOID_ELEMENTS.contains(&tag.as_str()) || whole.as_str().ends_with("/>") {
		return Some(ElementSpan {
			start,
			inner_start,
			inner_end: inner_start,
			end: inner_start,
		});
	}

	let same_tag = Regex::new(&format!(r"(?i)<(/?){}(?:\s[^>]*)?>", regex::escape(&tag))).ok()?;
	let mut depth = 1usize;
	for tag_match in same_tag.captures_iter(&markup[inner_start..]) {
		let matched = tag_match.get(0)?;
		if &tag_match[1] == "/" {
			depth -= 1;
			if depth == 0 {
				return Some(ElementSpan {
					start,
					inner_start,
					inner_end: inner_start + matched.start(),
					end: inner_start + matched.end(),
				});
			}
		} else if !matched.as_str().ends_with("/>") {
			depth += 1;
		}
	}
	None
}

/// Finds the opening tags of anchors (`<a ...>`) in document order.
pub fn anchors(markup: &str) -> Vec<TagInfo> {
	ANCHOR
		.find_iter(markup)
		.filter_map(|m| parse_open_tag(m.as_str()))
		.collect()
}

/// Strips tags and collapses whitespace.
pub fn text_content(markup: &str) -> String {
	let stripped = TAG.replace_all(markup, " ");
	WHITESPACE.replace_all(stripped.trim(), " ").into_owned()
}
