//! # eventia-app
//!
//! Events and ticketing frontend built on `eventia-pages`.
//!
//! ## Layout
//!
//! - [`config`]: startup settings
//! - [`auth`]: session storage, roles and route guards
//! - [`api`]: REST client with envelope unwrapping and 401 handling
//! - [`components`]: reusable widgets (buttons, cards, counter, navbar, events list)
//! - [`pages`]: one component per route
//! - [`routes`]: the route table
//! - [`app`]: assembly and the browser entry point
//!
//! ## Native use
//!
//! Everything except the browser entry point runs natively against an
//! in-memory [`Document`](eventia_pages::Document), a
//! [`MemoryHistory`](eventia_pages::MemoryHistory), a
//! [`MemoryStore`](auth::MemoryStore) and a scripted transport:
//!
//! ```
//! use std::rc::Rc;
//! use eventia_app::api::ScriptedTransport;
//! use eventia_app::auth::MemoryStore;
//! use eventia_app::{App, AppConfig};
//! use eventia_pages::{Document, MemoryHistory};
//!
//! let app = App::new(
//! 	AppConfig::default(),
//! 	Document::new(),
//! 	Rc::new(MemoryHistory::new("/unauthorized")),
//! 	Rc::new(MemoryStore::new()),
//! 	Rc::new(ScriptedTransport::new()),
//! )
//! .unwrap();
//! app.start().unwrap();
//! assert_eq!(app.router().active_component(), Some("UnauthorizedPage"));
//! ```

pub mod api;
pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod pages;
pub mod routes;

pub(crate) mod serde_ext;

pub use api::{ApiClient, ApiError, ApiResponse};
pub use app::{App, AppContext, AppError};
pub use auth::{Auth, AuthSession, Role, User};
pub use config::{AppConfig, ConfigError};
pub use routes::route_table;
