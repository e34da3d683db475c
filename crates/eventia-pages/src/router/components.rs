//! Navigation markup helpers.

use crate::dom::markup::escape;

/// Markup for a link that navigates without a full page reload.
///
/// Internal links carry the `data-link` marker picked up by the router's
/// click interceptor; external links open in a new tab.
///
/// # Example
///
/// ```ignore
/// use eventia_pages::router::Link;
///
/// let html = Link::new("/events/42", "View event").class("btn").render();
/// ```
#[derive(Debug, Clone)]
pub struct Link {
	to: String,
	content: String,
	class: Option<String>,
	id: Option<String>,
	replace: bool,
	external: bool,
	attrs: Vec<(String, String)>,
}

impl Link {
	/// Creates a new link with text content.
	pub fn new(to: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			content: escape(&content.into()),
			class: None,
			id: None,
			replace: false,
			external: false,
			attrs: Vec::new(),
		}
	}

	/// Uses already rendered markup as the link content.
	pub fn html(mut self, markup: impl Into<String>) -> Self {
		self.content = markup.into();
		self
	}

	/// Sets the CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Sets the element id.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets whether to replace the current history entry.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Sets whether this is an external link.
	pub fn external(mut self, external: bool) -> Self {
		self.external = external;
		self
	}

	/// Adds a custom attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Returns the destination path.
	pub fn to(&self) -> &str {
		&self.to
	}

	/// Renders the anchor.
	pub fn render(&self) -> String {
		let mut html = format!(r#"<a href="{}""#, escape(&self.to));
		if let Some(id) = &self.id {
			html.push_str(&format!(r#" id="{}""#, escape(id)));
		}
		if let Some(class) = &self.class {
			html.push_str(&format!(r#" class="{}""#, escape(class)));
		}
		if self.external {
			html.push_str(r#" target="_blank" rel="noopener noreferrer""#);
		} else {
			html.push_str(" data-link");
			if self.replace {
				html.push_str(" data-replace");
			}
		}
		for (name, value) in &self.attrs {
			html.push_str(&format!(r#" {}="{}""#, name, escape(value)));
		}
		html.push('>');
		html.push_str(&self.content);
		html.push_str("</a>");
		html
	}
}

impl std::fmt::Display for Link {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.render())
	}
}
