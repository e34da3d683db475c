use std::cell::RefCell;
use std::rc::{Rc, Weak};

use eventia_pages::{
	Component, ComponentError, ComponentId, ComponentState, Document, EventType, Lifecycle, Stateful,
	error_log,
};

const COUNT: &str = "count";

#[derive(Debug, Clone, Copy)]
enum Action {
	Increment,
	Decrement,
	Reset,
}

impl Action {
	fn button(self) -> &'static str {
		match self {
			Self::Increment => "inc",
			Self::Decrement => "dec",
			Self::Reset => "reset",
		}
	}
}

/// A counter with increment, decrement and reset buttons.
///
/// Every change re-renders only the counter's own element and re-attaches
/// its three click handlers.
#[derive(Debug, Clone)]
pub struct Counter {
	core: Rc<CounterCore>,
}

#[derive(Debug)]
struct CounterCore {
	id: ComponentId,
	step: i64,
	state: RefCell<ComponentState>,
	lifecycle: Lifecycle,
	this: Weak<CounterCore>,
}

impl Default for Counter {
	fn default() -> Self {
		Self::new(0, 1)
	}
}

impl Counter {
	/// Creates a counter starting at `initial_value` that moves by `step`.
	pub fn new(initial_value: i64, step: i64) -> Self {
		Self::with_id(ComponentId::generate("counter"), initial_value, step)
	}

	/// Creates a counter with a fixed element id.
	pub fn with_id(id: ComponentId, initial_value: i64, step: i64) -> Self {
		let core = Rc::new_cyclic(|this| CounterCore {
			id,
			step,
			state: RefCell::new(ComponentState::new().with(COUNT, initial_value)),
			lifecycle: Lifecycle::new(),
			this: this.clone(),
		});
		Self { core }
	}

	/// Current value.
	pub fn count(&self) -> i64 {
		self.core.count()
	}

	/// Amount added or subtracted per click.
	pub fn step(&self) -> i64 {
		self.core.step
	}

	/// Adds `step`.
	pub fn increment(&self) -> Result<bool, ComponentError> {
		self.core.apply(Action::Increment)
	}

	/// Subtracts `step`.
	pub fn decrement(&self) -> Result<bool, ComponentError> {
		self.core.apply(Action::Decrement)
	}

	/// Back to zero, not to the initial value.
	pub fn reset(&self) -> Result<bool, ComponentError> {
		self.core.apply(Action::Reset)
	}

	/// Id of the element showing the value.
	pub fn value_element_id(&self) -> String {
		self.core.id.child("value")
	}

	/// Id of the increment, decrement or reset button (`"inc"`, `"dec"`,
	/// `"reset"`).
	pub fn button_id(&self, button: &str) -> String {
		self.core.id.child(button)
	}

	/// Mount bookkeeping.
	pub fn lifecycle(&self) -> &Lifecycle {
		&self.core.lifecycle
	}
}

impl CounterCore {
	fn count(&self) -> i64 {
		self.state.borrow().get_i64(COUNT).unwrap_or_default()
	}

	fn apply(&self, action: Action) -> Result<bool, ComponentError> {
		let next = match action {
			Action::Increment => self.count().saturating_add(self.step),
			Action::Decrement => self.count().saturating_sub(self.step),
			Action::Reset => 0,
		};
		self.set_state(ComponentState::new().with(COUNT, next))
	}
}

impl Component for CounterCore {
	fn name(&self) -> &'static str {
		"Counter"
	}

	fn id(&self) -> &ComponentId {
		&self.id
	}

	fn render(&self) -> String {
		let id = &self.id;
		format!(
			concat!(
				r#"<div id="{id}" class="counter-component">"#,
				r#"<div class="counter-display"><h3>Count: <span id="{id}-value" class="counter-value">{count}</span></h3></div>"#,
				r#"<div class="counter-controls">"#,
				r#"<button id="{id}-dec" class="btn btn-secondary">- {step}</button>"#,
				r#"<button id="{id}-reset" class="btn btn-secondary">Reset</button>"#,
				r#"<button id="{id}-inc" class="btn btn-primary">+ {step}</button>"#,
				"</div></div>"
			),
			id = id,
			count = self.count(),
			step = self.step
		)
	}

	fn mount(&self, document: &Document) -> Result<(), ComponentError> {
		if !self.lifecycle.begin(document) {
			return Ok(());
		}
		for action in [Action::Decrement, Action::Reset, Action::Increment] {
			let this = self.this.clone();
			self.lifecycle
				.listen(&self.id.child(action.button()), EventType::Click, move |_| {
					let Some(core) = this.upgrade() else {
						return;
					};
					if let Err(error) = core.apply(action) {
						error_log!("counter {} update failed: {}", core.id, error);
					}
				})?;
		}
		Ok(())
	}

	fn unmount(&self, _document: &Document) {
		self.lifecycle.end();
	}
}

impl Stateful for CounterCore {
	fn state(&self) -> &RefCell<ComponentState> {
		&self.state
	}

	fn lifecycle(&self) -> &Lifecycle {
		&self.lifecycle
	}
}

impl Component for Counter {
	fn name(&self) -> &'static str {
		self.core.name()
	}

	fn id(&self) -> &ComponentId {
		&self.core.id
	}

	fn render(&self) -> String {
		self.core.render()
	}

	fn mount(&self, document: &Document) -> Result<(), ComponentError> {
		self.core.mount(document)
	}

	fn unmount(&self, document: &Document) {
		self.core.unmount(document)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn mounted() -> (Counter, Document) {
		let counter = Counter::with_id(ComponentId::fixed("c"), 0, 1);
		let document = Document::new();
		document.create_root("app");
		document
			.set_inner_html("app", &format!("<section>{}</section>", counter.render()))
			.unwrap();
		counter.mount(&document).unwrap();
		(counter, document)
	}

	#[rstest]
	fn test_render_shows_value_and_step() {
		let counter = Counter::with_id(ComponentId::fixed("c"), 10, 5);
		let html = counter.render();
		assert!(html.starts_with(r#"<div id="c" class="counter-component">"#));
		assert!(html.contains(r#"<span id="c-value" class="counter-value">10</span>"#));
		assert!(html.contains(r#"<button id="c-inc" class="btn btn-primary">+ 5</button>"#));
		assert_eq!(html, counter.render());
	}

	#[rstest]
	fn test_click_updates_only_the_counter(mounted: (Counter, Document)) {
		let (counter, document) = mounted;
		document.click("c-inc").unwrap();
		document.click("c-inc").unwrap();
		document.click("c-dec").unwrap();

		assert_eq!(counter.count(), 1);
		assert_eq!(document.text_content("c-value").unwrap(), "1");
		assert!(document.inner_html("app").unwrap().starts_with("<section>"));
		assert_eq!(document.listener_count("c-inc"), 1);
	}

	#[rstest]
	fn test_each_update_remounts_once(mounted: (Counter, Document)) {
		let (counter, document) = mounted;
		counter.increment().unwrap();
		counter.increment().unwrap();
		assert_eq!(counter.lifecycle().mount_count(), 3);
		assert_eq!(counter.lifecycle().unmount_count(), 2);
		assert_eq!(document.total_listeners(), 3);
	}

	#[rstest]
	fn test_reset_goes_to_zero() {
		let counter = Counter::new(10, 5);
		counter.increment().unwrap();
		assert_eq!(counter.count(), 15);
		counter.reset().unwrap();
		assert_eq!(counter.count(), 0);
	}

	#[rstest]
	fn test_detached_update_does_not_render() {
		let counter = Counter::default();
		assert!(!counter.decrement().unwrap());
		assert_eq!(counter.count(), -1);
	}

	#[rstest]
	fn test_count_saturates_at_bounds() {
		let top = Counter::new(i64::MAX - 1, 5);
		top.increment().unwrap();
		assert_eq!(top.count(), i64::MAX);
		top.increment().unwrap();
		assert_eq!(top.count(), i64::MAX);

		let bottom = Counter::new(i64::MIN + 1, 5);
		bottom.decrement().unwrap();
		assert_eq!(bottom.count(), i64::MIN);
		bottom.decrement().unwrap();
		assert_eq!(bottom.count(), i64::MIN);
	}
}
