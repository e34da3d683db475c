use std::cell::Cell;
use std::rc::Rc;

use eventia_pages::{Component, ComponentError, ComponentId, Document, info_log};

use crate::components::{Button, ButtonVariant, Card, Counter, link};

/// Showcase of the reusable components at `/components`.
#[derive(Debug)]
pub struct ComponentsDemoPage {
	id: ComponentId,
	buttons: Vec<Button>,
	counters: Vec<Counter>,
	clicks: Rc<Cell<usize>>,
}

impl Default for ComponentsDemoPage {
	fn default() -> Self {
		Self::new()
	}
}

impl ComponentsDemoPage {
	/// Page with its demo buttons and counters.
	pub fn new() -> Self {
		let clicks = Rc::new(Cell::new(0));
		let primary_clicks = Rc::clone(&clicks);
		let buttons = vec![
			Button::new("Primary button")
				.id("demo-btn-1")
				.on_click(move |()| {
					primary_clicks.set(primary_clicks.get() + 1);
					info_log!("primary button clicked {} times", primary_clicks.get());
				}),
			Button::new("Secondary button")
				.id("demo-btn-2")
				.variant(ButtonVariant::Secondary)
				.on_click(|()| info_log!("secondary button clicked")),
			Button::new("Disabled button").id("demo-btn-3").disabled(true),
		];
		let counters = vec![
			Counter::with_id(ComponentId::fixed("demo-counter-1"), 0, 1),
			Counter::with_id(ComponentId::fixed("demo-counter-2"), 10, 5),
		];
		Self {
			id: ComponentId::generate("page-components"),
			buttons,
			counters,
			clicks,
		}
	}

	/// Clicks on the primary demo button.
	pub fn clicks(&self) -> usize {
		self.clicks.get()
	}

	/// The embedded counters.
	pub fn counters(&self) -> &[Counter] {
		&self.counters
	}
}

impl Component for ComponentsDemoPage {
	fn name(&self) -> &'static str {
		"ComponentsDemoPage"
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		let buttons: String = self.buttons.iter().map(Component::render).collect();
		let cards = [
			Card::new()
				.title("Simple card")
				.icon("📦")
				.content("<p>A card with a title and an icon</p>")
				.class("demo-card"),
			Card::new()
				.title("Full card")
				.subtitle("With subtitle")
				.icon("🎨")
				.content("<p>Title, subtitle, content and footer.</p>")
				.footer("<small>Card footer</small>")
				.class("demo-card"),
		]
		.iter()
		.map(Card::render)
		.collect::<String>();
		let counters: String = [("Basic counter (step 1)", 0), ("Fast counter (step 5)", 1)]
			.iter()
			.map(|(label, index)| {
				format!(
					r#"<div class="counter-wrapper"><h4>{}</h4>{}</div>"#,
					label,
					self.counters[*index].render()
				)
			})
			.collect();

		format!(
			concat!(
				r#"<div id="{id}" class="page"><div class="page-container">"#,
				r#"<nav class="navbar"><div class="navbar-brand"><h2>Component demo</h2></div>"#,
				r#"<div class="navbar-links">{back}</div></nav><div class="demo-content">"#,
				"<h1>Reusable components</h1>",
				r#"<section class="demo-section"><h2>1. Button</h2><div class="demo-buttons">{buttons}</div></section>"#,
				r#"<section class="demo-section"><h2>2. Card</h2><div class="demo-cards">{cards}</div></section>"#,
				r#"<section class="demo-section"><h2>3. Counter</h2><div class="demo-counters">{counters}</div></section>"#,
				"</div></div></div>"
			),
			id = self.id,
			back = link("/", "Back to home", "nav-link"),
			buttons = buttons,
			cards = cards,
			counters = counters
		)
	}

	fn mount(&self, document: &Document) -> Result<(), ComponentError> {
		for button in &self.buttons {
			button.mount(document)?;
		}
		for counter in &self.counters {
			counter.mount(document)?;
		}
		Ok(())
	}

	fn unmount(&self, document: &Document) {
		for button in &self.buttons {
			button.unmount(document);
		}
		for counter in &self.counters {
			counter.unmount(document);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn mounted() -> (ComponentsDemoPage, Document) {
		let page = ComponentsDemoPage::new();
		let document = Document::new();
		document.create_root("app");
		document.set_inner_html("app", &page.render()).unwrap();
		page.mount(&document).unwrap();
		(page, document)
	}

	#[rstest]
	fn test_primary_button_counts_clicks() {
		let (page, document) = mounted();
		document.click("demo-btn-1").unwrap();
		document.click("demo-btn-1").unwrap();
		document.click("demo-btn-2").unwrap();
		assert_eq!(page.clicks(), 2);
	}

	#[rstest]
	fn test_disabled_button_has_no_listener() {
		let (_, document) = mounted();
		assert_eq!(document.listener_count("demo-btn-3"), 0);
		assert!(document.outer_html("demo-btn-3").unwrap().contains("disabled"));
	}

	#[rstest]
	fn test_counters_are_independent() {
		let (page, document) = mounted();
		document.click("demo-counter-2-inc").unwrap();
		document.click("demo-counter-1-dec").unwrap();
		let counts: Vec<i64> = page.counters().iter().map(Counter::count).collect();
		assert_eq!(counts, vec![-1, 15]);
	}

	#[rstest]
	fn test_unmount_releases_all_listeners() {
		let (page, document) = mounted();
		assert!(document.total_listeners() > 0);
		page.unmount(&document);
		assert_eq!(document.total_listeners(), 0);
	}
}
