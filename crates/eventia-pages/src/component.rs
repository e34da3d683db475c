//! Component System for eventia-pages
//!
//! A component renders markup from its state, and may attach interaction
//! handlers once that markup is in the [`Document`](crate::dom::Document).
//!
//! ## Features
//!
//! - **Component trait**: `render`, optional `mount`/`unmount` hooks
//! - **ComponentId**: stable per-instance element id
//! - **ComponentState**: named fields with shallow-merge updates
//! - **Lifecycle**: mount bookkeeping that rules out double mounts
//! - **Stateful**: `set_state` with in-place subtree re-render
//!
//! ## Usage
//!
//! ```ignore
//! use eventia_pages::component::{Component, ComponentId};
//!
//! struct Greeting {
//!     id: ComponentId,
//!     name: String,
//! }
//!
//! impl Component for Greeting {
//!     fn name(&self) -> &'static str {
//!         "Greeting"
//!     }
//!
//!     fn id(&self) -> &ComponentId {
//!         &self.id
//!     }
//!
//!     fn render(&self) -> String {
//!         format!(r#"<p id="{}">Hello, {}!</p>"#, self.id, self.name)
//!     }
//! }
//! ```

mod id;
mod lifecycle;
mod state;
mod r#trait;

pub use id::ComponentId;
pub use lifecycle::{Lifecycle, Stateful};
pub use state::ComponentState;
pub use r#trait::{Component, ComponentError};
