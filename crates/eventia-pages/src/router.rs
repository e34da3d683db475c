//! Client-side router.
//!
//! The router maps locations to components through an ordered [`RouteTable`],
//! evaluates navigation guards before activation, and keeps exactly one
//! component mounted at a time.
//!
//! ## Features
//!
//! - **Path patterns**: literal paths, `{name}` segments and the `*` wildcard
//! - **Guards**: synchronous predicates with soft or hard redirects
//! - **History**: in-memory history natively, the History API on WASM
//! - **Link interception**: `<a data-link>` clicks navigate without reloads
//! - **Named routes**: reverse lookups through [`Router::reverse`]
//!
//! ## Usage
//!
//! ```ignore
//! use std::rc::Rc;
//! use eventia_pages::dom::Document;
//! use eventia_pages::router::{MemoryHistory, RouteTable, Router};
//!
//! let table = RouteTable::builder()
//!     .named("home", "/", |_| Ok(Home::new()))
//!     .guarded("/admin", |_| Ok(Admin::new()), |ctx| {
//!         ctx.redirect("/login");
//!         Ok(false)
//!     })
//!     .fallback(|_| Ok(NotFound::new()))
//!     .build()?;
//!
//! let router = Router::new(table, Document::new(), "app", Rc::new(MemoryHistory::new("/")));
//! router.init()?;
//! ```

mod components;
mod core;
mod guard;
mod history;
mod pattern;

pub use components::Link;
pub use self::core::{
	ComponentFactory, MAX_REDIRECTS, NavigationKind, Navigator, Route, RouteContext, RouteMatch,
	RouteParams, RouteTable, RouteTableBuilder, RouteTableError, Router, RouterError, RouterState,
};
pub use guard::{Guard, GuardContext, GuardError, Redirect, guard};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{History, HistoryError, MemoryHistory, PopListener};
pub use pattern::{PathPattern, WILDCARD};
