//! Component trait definition.

use super::ComponentId;
use crate::dom::{Document, DomError};

/// Errors raised while building, mounting or updating a component.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
	/// The component could not be constructed.
	#[error("failed to construct {component}: {reason}")]
	Construction {
		/// Component name.
		component: &'static str,
		/// Failure description.
		reason: String,
	},
	/// A document operation failed during mount or re-render.
	#[error(transparent)]
	Dom(#[from] DomError),
	/// State could not be built from the given value.
	#[error("invalid component state: {0}")]
	InvalidState(String),
	/// A handler was attached outside of `mount`.
	#[error("component {0} is not mounted")]
	NotMounted(String),
}

/// Trait for renderable UI units.
///
/// `render` is a pure function of the current state and is safe to call any
/// number of times. `mount` runs once the markup is in the document and
/// attaches handlers to elements located by id; `unmount` detaches them and
/// is a no-op when nothing was mounted.
///
/// Hooks take `&self` because handlers attached in `mount` hold weak
/// references back to the component; components keep their mutable parts in
/// cells.
///
/// # Example
///
/// ```ignore
/// use eventia_pages::component::{Component, ComponentId};
///
/// struct Banner {
///     id: ComponentId,
///     text: String,
/// }
///
/// impl Component for Banner {
///     fn name(&self) -> &'static str {
///         "Banner"
///     }
///
///     fn id(&self) -> &ComponentId {
///         &self.id
///     }
///
///     fn render(&self) -> String {
///         format!(r#"<div id="{}" class="banner">{}</div>"#, self.id, self.text)
///     }
/// }
/// ```
pub trait Component: 'static {
	/// Returns the component's name for logging.
	fn name(&self) -> &'static str;

	/// Returns the stable id of the component's root element.
	fn id(&self) -> &ComponentId;

	/// Renders the component to markup.
	fn render(&self) -> String;

	/// Attaches handlers after the markup was inserted into `document`.
	fn mount(&self, document: &Document) -> Result<(), ComponentError> {
		let _ = document;
		Ok(())
	}

	/// Detaches the handlers attached by [`Component::mount`].
	fn unmount(&self, document: &Document) {
		let _ = document;
	}
}

impl std::fmt::Debug for dyn Component {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Component")
			.field("name", &self.name())
			.field("id", self.id())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct TestComponent {
		id: ComponentId,
		message: String,
	}

	impl Component for TestComponent {
		fn name(&self) -> &'static str {
			"TestComponent"
		}

		fn id(&self) -> &ComponentId {
			&self.id
		}

		fn render(&self) -> String {
			format!(r#"<div id="{}">{}</div>"#, self.id, self.message)
		}
	}

	#[rstest]
	fn test_component_render() {
		let comp = TestComponent {
			id: ComponentId::fixed("t"),
			message: "Hello".to_string(),
		};
		assert_eq!(comp.render(), r#"<div id="t">Hello</div>"#);
	}

	#[rstest]
	fn test_render_is_idempotent() {
		let comp = TestComponent {
			id: ComponentId::generate("test"),
			message: "Same".to_string(),
		};
		assert_eq!(comp.render(), comp.render());
	}

	#[rstest]
	fn test_default_hooks_are_noops() {
		let document = Document::new();
		let comp = TestComponent {
			id: ComponentId::fixed("t"),
			message: String::new(),
		};
		assert!(comp.mount(&document).is_ok());
		comp.unmount(&document);
		assert_eq!(document.total_listeners(), 0);
	}

	#[rstest]
	fn test_dyn_component_debug() {
		let comp: Box<dyn Component> = Box::new(TestComponent {
			id: ComponentId::fixed("t"),
			message: String::new(),
		});
		let debug = format!("{:?}", comp);
		assert!(debug.contains("TestComponent"));
	}

	#[rstest]
	fn test_error_display() {
		let error = ComponentError::Construction {
			component: "Dashboard",
			reason: "no user".to_string(),
		};
		assert_eq!(error.to_string(), "failed to construct Dashboard: no user");
	}
}
