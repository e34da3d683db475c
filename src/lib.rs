//! # Eventia
//!
//! A client-side component framework and router, and the events/ticketing
//! frontend built on it.
//!
//! ## Feature Flags
//!
//! - `app` (default) - The events/ticketing application (auth, HTTP client,
//!   components, pages, route table)
//! - `debug-hooks` - Enables `debug_log!` output in debug builds
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "app")]
//! # {
//! use std::rc::Rc;
//! use eventia::prelude::*;
//! use eventia::app::api::ScriptedTransport;
//! use eventia::app::auth::MemoryStore;
//!
//! let app = App::new(
//! 	AppConfig::default(),
//! 	Document::new(),
//! 	Rc::new(MemoryHistory::new("/")),
//! 	Rc::new(MemoryStore::new()),
//! 	Rc::new(ScriptedTransport::new()),
//! )
//! .unwrap();
//! app.start().unwrap();
//! assert_eq!(app.router().active_component(), Some("HomePage"));
//! # }
//! ```

pub mod pages;

/// The events/ticketing application.
#[cfg(feature = "app")]
pub mod app {
	pub use eventia_app::*;
}

// Re-export the framework's core types
pub use eventia_pages::{
	Callback, Component, ComponentError, ComponentId, Document, Event, EventType, History,
	Lifecycle, MemoryHistory, Navigator, Route, RouteContext, RouteTable, Router, RouterError,
	Stateful,
};

// Re-export the application's entry points
#[cfg(feature = "app")]
pub use eventia_app::{App, AppConfig, AppContext, AppError, Auth, Role};

/// Commonly used types.
pub mod prelude {
	pub use crate::{
		Callback, Component, ComponentError, ComponentId, Document, Event, EventType, History,
		Lifecycle, MemoryHistory, Navigator, Route, RouteContext, RouteTable, Router, Stateful,
	};

	#[cfg(feature = "app")]
	pub use crate::{App, AppConfig, AppContext, Auth, Role};

	pub use eventia_pages::ComponentState;
	pub use eventia_pages::spawn_local;
}
