use eventia_pages::dom::markup::escape;
use eventia_pages::{Callback, Component, ComponentError, ComponentId, Document, EventType, Lifecycle};

/// Visual style of a [`Button`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
	#[default]
	Primary,
	Secondary,
	Danger,
}

impl ButtonVariant {
	/// CSS suffix, as in `btn-primary`.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Primary => "primary",
			Self::Secondary => "secondary",
			Self::Danger => "danger",
		}
	}
}

/// A button that runs `on_click` when pressed.
///
/// A disabled button renders the `disabled` attribute and attaches no
/// handler.
#[derive(Debug)]
pub struct Button {
	id: ComponentId,
	text: String,
	variant: ButtonVariant,
	disabled: bool,
	on_click: Option<Callback>,
	lifecycle: Lifecycle,
}

impl Default for Button {
	fn default() -> Self {
		Self::new("Click me")
	}
}

impl Button {
	/// Creates a primary button.
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			id: ComponentId::generate("btn"),
			text: text.into(),
			variant: ButtonVariant::default(),
			disabled: false,
			on_click: None,
			lifecycle: Lifecycle::new(),
		}
	}

	/// Uses a fixed element id.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = ComponentId::fixed(id);
		self
	}

	/// Sets the style.
	pub fn variant(mut self, variant: ButtonVariant) -> Self {
		self.variant = variant;
		self
	}

	/// Disabled buttons render the attribute and ignore clicks.
	pub fn disabled(mut self, disabled: bool) -> Self {
		self.disabled = disabled;
		self
	}

	/// Sets the click handler.
	pub fn on_click(mut self, handler: impl Into<Callback>) -> Self {
		self.on_click = Some(handler.into());
		self
	}

	/// Mount bookkeeping.
	pub fn lifecycle(&self) -> &Lifecycle {
		&self.lifecycle
	}
}

impl Component for Button {
	fn name(&self) -> &'static str {
		"Button"
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		let mut class = format!("btn btn-{}", self.variant.as_str());
		if self.disabled {
			class.push_str(" btn-disabled");
		}
		format!(
			r#"<button id="{}" class="{}"{}>{}</button>"#,
			self.id,
			class,
			if self.disabled { " disabled" } else { "" },
			escape(&self.text)
		)
	}

	fn mount(&self, document: &Document) -> Result<(), ComponentError> {
		if !self.lifecycle.begin(document) {
			return Ok(());
		}
		if self.disabled {
			return Ok(());
		}
		if let Some(on_click) = &self.on_click {
			let on_click = on_click.clone();
			self.lifecycle
				.listen(self.id.as_str(), EventType::Click, move |_| on_click.call(()))?;
		}
		Ok(())
	}

	fn unmount(&self, _document: &Document) {
		self.lifecycle.end();
	}
}
