//! Application assembly and startup.

use std::rc::Rc;

use eventia_pages::router::{History, RouteTableError, Router, RouterError};
use eventia_pages::{Document, info_log};

use crate::api::{ApiClient, Transport};
use crate::auth::{Auth, SessionStore};
use crate::config::{AppConfig, ConfigError};
use crate::routes::route_table;

/// Errors raised while starting the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	/// Settings could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The route table is inconsistent.
	#[error(transparent)]
	RouteTable(#[from] RouteTableError),
	/// The first page could not be resolved.
	#[error(transparent)]
	Router(#[from] RouterError),
}

/// Everything pages need: settings, session and backend client.
///
/// Cloning is cheap; clones share all parts.
#[derive(Debug, Clone)]
pub struct AppContext {
	/// Validated settings.
	pub config: Rc<AppConfig>,
	/// Session state.
	pub auth: Auth,
	/// Backend client sharing the session.
	pub api: ApiClient,
}

impl AppContext {
	/// Wires the backend client to the session and history.
	pub fn new(
		config: AppConfig,
		auth: Auth,
		transport: Rc<dyn Transport>,
		history: Rc<dyn History>,
	) -> Self {
		let api = ApiClient::from_config(&config, transport, auth.clone(), history);
		Self {
			config: Rc::new(config),
			auth,
			api,
		}
	}
}

/// The running application: a router over the application's route table.
#[derive(Debug)]
pub struct App {
	context: AppContext,
	router: Router,
}

impl App {
	/// Validates `config` and builds the router. Nothing is rendered until
	/// [`App::start`].
	pub fn new(
		config: AppConfig,
		document: Document,
		history: Rc<dyn History>,
		store: Rc<dyn SessionStore>,
		transport: Rc<dyn Transport>,
	) -> Result<Self, AppError> {
		config.validate()?;
		let context = AppContext::new(config, Auth::new(store), transport, Rc::clone(&history));
		let table = route_table(&context)?;
		let router = Router::new(table, document, &context.config.mount_point, history);
		Ok(Self { context, router })
	}

	/// Starts routing and renders the current location.
	pub fn start(&self) -> Result<(), AppError> {
		self.router.init()?;
		info_log!(
			"{} started with {} routes at {}",
			self.context.config.brand,
			self.router.route_count(),
			self.router.current_path()
		);
		Ok(())
	}

	/// Stops routing and unmounts the active page.
	pub fn shutdown(&self) {
		self.router.shutdown();
	}

	/// Shared settings, session and API client.
	pub fn context(&self) -> &AppContext {
		&self.context
	}

	/// The router driving the mount point.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// The document pages render into.
	pub fn document(&self) -> &Document {
		self.router.document()
	}
}

#[cfg(target_arch = "wasm32")]
mod web {
	use std::cell::RefCell;
	use std::rc::Rc;

	use eventia_pages::Document;
	use eventia_pages::dom::browser::{WebBackend, install_event_delegation};
	use eventia_pages::router::BrowserHistory;
	use wasm_bindgen::prelude::*;

	use super::App;
	use crate::api::ReqwestTransport;
	use crate::auth::LocalStorage;
	use crate::config::AppConfig;

	thread_local! {
		static APP: RefCell<Option<App>> = const { RefCell::new(None) };
	}

	fn js_error(error: impl std::fmt::Display) -> JsValue {
		JsValue::from_str(&error.to_string())
	}

	/// Browser entry point.
	#[wasm_bindgen(start)]
	pub fn run() -> Result<(), JsValue> {
		let config = AppConfig::from_env().map_err(js_error)?;
		let document = Document::with_backend(WebBackend);
		install_event_delegation(&document)?;

		let app = App::new(
			config,
			document,
			Rc::new(BrowserHistory),
			Rc::new(LocalStorage),
			Rc::new(ReqwestTransport::new()),
		)
		.map_err(js_error)?;
		app.start().map_err(js_error)?;
		APP.with(|slot| *slot.borrow_mut() = Some(app));
		Ok(())
	}
}
