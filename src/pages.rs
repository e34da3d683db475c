//! Component framework and client-side router
//!
//! This module provides access to eventia-pages: string-rendered components
//! with explicit lifecycles, an event-listener registry over a document
//! model, and a history-backed router with guards.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use eventia::pages::{
//! 	Component, ComponentId, Document, MemoryHistory, RouteContext, RouteTable, Router,
//! };
//!
//! struct Hello(ComponentId);
//!
//! impl Component for Hello {
//! 	fn name(&self) -> &'static str {
//! 		"Hello"
//! 	}
//!
//! 	fn id(&self) -> &ComponentId {
//! 		&self.0
//! 	}
//!
//! 	fn render(&self) -> String {
//! 		format!(r#"<p id="{}">Hello</p>"#, self.0)
//! 	}
//! }
//!
//! let table = RouteTable::builder()
//! 	.route("/", |_: &RouteContext| Ok(Hello(ComponentId::fixed("hello"))))
//! 	.build()
//! 	.unwrap();
//! let router = Router::new(table, Document::new(), "app", Rc::new(MemoryHistory::new("/")));
//! router.init().unwrap();
//! assert_eq!(router.active_component(), Some("Hello"));
//! //! ```

pub use eventia_pages::*;
