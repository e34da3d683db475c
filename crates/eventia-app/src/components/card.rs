use eventia_pages::dom::markup::escape;

/// Framed content.
///
/// `title`, `subtitle` and `icon` are text; `content` and `footer` are
/// markup. Empty parts are left out.
///
/// # Example
///
/// ```ignore
/// let html = Card::new()
///     .title("Simple card")
///     .icon("📦")
///     .content("<p>A card with a title and an icon</p>")
///     .render();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
	title: String,
	subtitle: String,
	content: String,
	footer: String,
	class: String,
	icon: String,
}

impl Card {
	/// Empty card.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	/// Sets the subtitle.
	pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
		self.subtitle = subtitle.into();
		self
	}

	/// Body markup.
	pub fn content(mut self, markup: impl Into<String>) -> Self {
		self.content = markup.into();
		self
	}

	/// Footer markup.
	pub fn footer(mut self, markup: impl Into<String>) -> Self {
		self.footer = markup.into();
		self
	}

	/// Extra CSS classes.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = class.into();
		self
	}

	/// Icon shown before the title.
	pub fn icon(mut self, icon: impl Into<String>) -> Self {
		self.icon = icon.into();
		self
	}

	/// Renders the card. Empty parts are left out.
	pub fn render(&self) -> String {
		let mut html = if self.class.is_empty() {
			String::from(r#"<div class="card">"#)
		} else {
			format!(r#"<div class="card {}">"#, escape(&self.class))
		};
		if !self.icon.is_empty() {
			html.push_str(&format!(r#"<div class="card-icon">{}</div>"#, escape(&self.icon)));
		}
		if !self.title.is_empty() {
			html.push_str(r#"<div class="card-header">"#);
			html.push_str(&format!(r#"<h3 class="card-title">{}</h3>"#, escape(&self.title)));
			if !self.subtitle.is_empty() {
				html.push_str(&format!(
					r#"<p class="card-subtitle">{}</p>"#,
					escape(&self.subtitle)
				));
			}
			html.push_str("</div>");
		}
		if !self.content.is_empty() {
			html.push_str(&format!(r#"<div class="card-body">{}</div>"#, self.content));
		}
		if !self.footer.is_empty() {
			html.push_str(&format!(r#"<div class="card-footer">{}</div>"#, self.footer));
		}
		html.push_str("</div>");
		html
	}
}

impl std::fmt::Display for Card {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.render())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_empty_card() {
		assert_eq!(Card::new().render(), r#"<div class="card"></div>"#);
	}

	#[rstest]
	fn test_full_card() {
		let html = Card::new()
			.title("Full")
			.subtitle("With subtitle")
			.icon("🎨")
			.content("<p>Body</p>")
			.footer("<small>Footer</small>")
			.class("demo-card")
			.render();
		assert_eq!(
			html,
			concat!(
				r#"<div class="card demo-card"><div class="card-icon">🎨</div>"#,
				r#"<div class="card-header"><h3 class="card-title">Full</h3><p class="card-subtitle">With subtitle</p></div>"#,
				r#"<div class="card-body"><p>Body</p></div><div class="card-footer"><small>Footer</small></div></div>"#
			)
		);
	}

	#[rstest]
	fn test_subtitle_needs_title() {
		let html = Card::new().subtitle("orphan").render();
		assert!(!html.contains("orphan"));
	}
}
