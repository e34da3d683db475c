//! Reusable UI components
//!
//! - [`Button`]: a button with an optional click handler
//! - [`Card`]: framed content with optional header, icon and footer
//! - [`Counter`]: a stateful counter that re-renders in place
//! - [`EventCard`] and [`EventsList`]: backend events
//! - [`NavBar`]: top navigation for the current session

mod button;
mod card;
mod counter;
mod event_card;
mod events_list;
mod navbar;

use eventia_pages::router::Link;

pub use button::{Button, ButtonVariant};
pub use card::Card;
pub use counter::Counter;
pub use event_card::{EventCard, EventSummary, format_event_date};
pub use events_list::{EVENTS_ENDPOINT, EventsList};
pub use navbar::NavBar;

/// Markup of a router link. An empty `class` adds no class attribute.
pub fn link(path: &str, text: &str, class: &str) -> String {
	let link = Link::new(path, text);
	if class.is_empty() {
		link.render()
	} else {
		link.class(class).render()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/", "Home", "", r#"<a href="/" data-link>Home</a>"#)]
	#[case("/login", "Log in", "btn btn-primary", r#"<a href="/login" class="btn btn-primary" data-link>Log in</a>"#)]
	#[case("/q", "a < b", "", r#"<a href="/q" data-link>a &lt; b</a>"#)]
	fn test_link(#[case] path: &str, #[case] text: &str, #[case] class: &str, #[case] expected: &str) {
		assert_eq!(link(path, text, class), expected);
	}
}
