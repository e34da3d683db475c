//! Eventia Pages - component framework and client-side router
//!
//! A small single-page application toolkit: components render markup from
//! their state, a router maps locations to components and enforces navigation
//! guards, and a document model keeps rendered markup and event listeners
//! consistent on WASM and native targets alike.
//!
//! ## Features
//!
//! - **Components**: deterministic `render`, `mount`/`unmount` hooks, in-place re-render
//! - **Router**: ordered route table, `{param}` segments, wildcard fallback
//! - **Guards**: synchronous predicates that redirect on denial
//! - **Document model**: subtree replacement drops stale listeners like a browser does
//! - **Low-level Only**: built on wasm-bindgen and web-sys
//!
//! ## Architecture
//!
//! - [`component`]: Component trait, ids, state, lifecycle bookkeeping
//! - [`dom`]: Document model, events, browser mirroring
//! - [`router`]: Route table, router state machine, guards, history
//! - [`callback`]: Cloneable handlers for component props
//! - [`task`]: `spawn_local` for async work
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use eventia_pages::dom::Document;
//! use eventia_pages::router::{MemoryHistory, RouteTable, Router};
//!
//! let table = RouteTable::builder()
//!     .route("/", |_| Ok(Home::new()))
//!     .fallback(|_| Ok(NotFound::new()))
//!     .build()?;
//!
//! let router = Router::new(table, Document::new(), "app", Rc::new(MemoryHistory::new("/")));
//! router.init()?;
//! ```

// Logging macros must come first so every module can use them
#[macro_use]
pub mod logging;

pub mod callback;
pub mod component;
pub mod dom;
pub mod router;
pub mod task;

// Re-export commonly used types
pub use callback::Callback;
pub use component::{
	Component, ComponentError, ComponentId, ComponentState, Lifecycle, Stateful,
};
pub use dom::{Document, DomError, Event, EventType};
pub use router::{
	GuardContext, GuardError, History, Link, MemoryHistory, Navigator, PathPattern, Redirect, Route,
	RouteContext, RouteTable, Router, RouterError, RouterState,
};
pub use task::spawn_local;

// Logging macros are automatically exported via #[macro_export]
// Users can access them as: eventia_pages::debug_log!, eventia_pages::info_log!, etc.

#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
