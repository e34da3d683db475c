//! Core Router Implementation.
//!
//! This module provides the route table, the [`Router`] state machine and the
//! [`Navigator`] handle that components use to request navigations.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};

use super::guard::{Guard, GuardContext, GuardError, Redirect};
use super::history::History;
use super::pattern::PathPattern;
use crate::component::{Component, ComponentError};
use crate::dom::{ClickTarget, Document, InterceptorHandle};
use crate::{debug_log, error_log, info_log, warn_log};

/// Parameters extracted from `{name}` path segments.
pub type RouteParams = HashMap<String, String>;

/// Builds the component for a matched route.
pub type ComponentFactory = Rc<dyn Fn(&RouteContext) -> Result<Box<dyn Component>, ComponentError>>;

/// Upper bound on navigations processed in one resolution cycle.
///
/// Guards that keep redirecting to each other hit this limit.
pub const MAX_REDIRECTS: usize = 16;

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// No route matched and the table has no wildcard.
	#[error("Route not found: {0}")]
	NotFound(String),
	/// No route carries the name.
	#[error("Invalid route name: {0}")]
	InvalidRouteName(String),
	/// A parameter needed to build the path is missing.
	#[error("Missing parameter: {0}")]
	MissingParameter(String),
	/// History refused the navigation, or the router is gone.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),
	/// Neither the matched component nor the fallback could be mounted.
	#[error("Component failed on {path}: {source}")]
	Component {
		/// Path being resolved.
		path: String,
		/// The fallback's failure, or the route's when there is no fallback.
		#[source]
		source: ComponentError,
	},
	/// A guard failed and the table has no wildcard to fall back to.
	#[error("Guard failed on {path}: {source}")]
	Guard {
		/// Path being resolved.
		path: String,
		/// The guard's failure.
		#[source]
		source: GuardError,
	},
}

/// Errors detected while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
	/// The wildcard route must be the last entry.
	#[error("wildcard route at position {0} is not the last route")]
	WildcardNotLast(usize),
	/// Two routes share a name.
	#[error("duplicate route name: {0}")]
	DuplicateName(String),
}

/// Router states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouterState {
	/// Nothing mounted.
	#[default]
	Idle,
	/// A navigation is being processed.
	Resolving,
	/// A component is mounted.
	Mounted,
}

/// How a navigation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
	/// Adds a history entry.
	Push,
	/// Replaces the current history entry.
	Replace,
	/// Back/forward move; history already changed.
	Pop,
	/// First resolution on `init`.
	Initial,
}

/// Information handed to a component factory.
#[derive(Debug, Clone)]
pub struct RouteContext {
	path: String,
	params: RouteParams,
	navigator: Navigator,
}

impl RouteContext {
	/// Context for building a component outside a router. Navigation through
	/// it fails with [`RouterError::NavigationFailed`].
	pub fn detached(path: &str) -> Self {
		Self {
			path: route_path(path).to_string(),
			params: RouteParams::new(),
			navigator: Navigator::detached(),
		}
	}

	/// The resolved path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// All path parameters.
	pub fn params(&self) -> &RouteParams {
		&self.params
	}

	/// Returns a single path parameter.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Handle for navigating from inside the component.
	pub fn navigator(&self) -> &Navigator {
		&self.navigator
	}
}

/// A single route definition.
#[derive(Clone)]
pub struct Route {
	pattern: PathPattern,
	name: Option<String>,
	factory: ComponentFactory,
	guard: Option<Guard>,
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("pattern", &self.pattern.as_str())
			.field("name", &self.name)
			.field("has_guard", &self.guard.is_some())
			.finish()
	}
}

impl Route {
	/// Creates a new route.
	pub fn new<C, F>(pattern: &str, factory: F) -> Self
	where
		C: Component,
		F: Fn(&RouteContext) -> Result<C, ComponentError> + 'static,
	{
		Self {
			pattern: PathPattern::new(pattern),
			name: None,
			factory: Rc::new(move |context| {
				factory(context).map(|component| Box::new(component) as Box<dyn Component>)
			}),
			guard: None,
		}
	}

	/// Names this route for reverse lookups.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Adds a guard to this route.
	pub fn with_guard<G>(mut self, guard: G) -> Self
	where
		G: Fn(&GuardContext<'_>) -> Result<bool, GuardError> + 'static,
	{
		self.guard = Some(Rc::new(guard));
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns whether a guard is attached.
	pub fn is_guarded(&self) -> bool {
		self.guard.is_some()
	}
}

/// A matched route with extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
	/// Position of the route in the table.
	pub index: usize,
	/// The matched route.
	pub route: &'a Route,
	/// Extracted path parameters.
	pub params: RouteParams,
}

/// Ordered, validated list of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
	routes: Vec<Route>,
	named_routes: HashMap<String, usize>,
}

impl RouteTable {
	/// Starts building a table.
	pub fn builder() -> RouteTableBuilder {
		RouteTableBuilder::default()
	}

	/// Returns the first route matching `path`. Patterns are tried in order,
	/// so a trailing wildcard only catches what nothing else matched.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_>> {
		self.routes.iter().enumerate().find_map(|(index, route)| {
			route.pattern.matches(path).map(|params| RouteMatch {
				index,
				route,
				params,
			})
		})
	}

	/// Position of the wildcard route.
	pub fn fallback_index(&self) -> Option<usize> {
		self.routes
			.last()
			.filter(|route| route.pattern.is_wildcard())
			.map(|_| self.routes.len() - 1)
	}

	/// Returns the route at `index`.
	pub fn get(&self, index: usize) -> Option<&Route> {
		self.routes.get(index)
	}

	/// Generates a path by route name with parameters.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let index = self
			.named_routes
			.get(name)
			.ok_or_else(|| RouterError::InvalidRouteName(name.to_string()))?;
		let pattern = &self.routes[*index].pattern;
		let params: RouteParams = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		pattern.reverse(&params).ok_or_else(|| {
			let missing = pattern
				.param_names()
				.iter()
				.find(|name| !params.contains_key(*name))
				.cloned()
				.unwrap_or_else(|| pattern.as_str().to_string());
			RouterError::MissingParameter(missing)
		})
	}

	/// Number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Returns whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named_routes.contains_key(name)
	}
}

/// Builder for [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
	routes: Vec<Route>,
}

impl RouteTableBuilder {
	/// Appends a prepared route.
	pub fn add(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	/// Adds an unguarded route.
	pub fn route<C, F>(self, pattern: &str, factory: F) -> Self
	where
		C: Component,
		F: Fn(&RouteContext) -> Result<C, ComponentError> + 'static,
	{
		self.add(Route::new(pattern, factory))
	}

	/// Adds a named route.
	pub fn named<C, F>(self, name: &str, pattern: &str, factory: F) -> Self
	where
		C: Component,
		F: Fn(&RouteContext) -> Result<C, ComponentError> + 'static,
	{
		self.add(Route::new(pattern, factory).with_name(name))
	}

	/// Adds a route with a guard.
	pub fn guarded<C, F, G>(self, pattern: &str, factory: F, guard: G) -> Self
	where
		C: Component,
		F: Fn(&RouteContext) -> Result<C, ComponentError> + 'static,
		G: Fn(&GuardContext<'_>) -> Result<bool, GuardError> + 'static,
	{
		self.add(Route::new(pattern, factory).with_guard(guard))
	}

	/// Adds the wildcard route. It must stay the last entry.
	pub fn fallback<C, F>(self, factory: F) -> Self
	where
		C: Component,
		F: Fn(&RouteContext) -> Result<C, ComponentError> + 'static,
	{
		self.add(Route::new(super::pattern::WILDCARD, factory))
	}

	/// Validates and finishes the table.
	pub fn build(self) -> Result<RouteTable, RouteTableError> {
		let last = self.routes.len().saturating_sub(1);
		if let Some(position) = self
			.routes
			.iter()
			.position(|route| route.pattern.is_wildcard())
			.filter(|position| *position != last)
		{
			return Err(RouteTableError::WildcardNotLast(position));
		}

		let mut named_routes = HashMap::new();
		for (index, route) in self.routes.iter().enumerate() {
			if let Some(name) = &route.name {
				if named_routes.insert(name.clone(), index).is_some() {
					return Err(RouteTableError::DuplicateName(name.clone()));
				}
			}
		}

		Ok(RouteTable {
			routes: self.routes,
			named_routes,
		})
	}
}

#[derive(Debug)]
struct Navigation {
	path: String,
	kind: NavigationKind,
}

struct Active {
	route: usize,
	component: Rc<dyn Component>,
}

struct RouterInner {
	this: Weak<RouterInner>,
	table: RouteTable,
	document: Document,
	mount_point: String,
	history: Rc<dyn History>,
	state: Cell<RouterState>,
	active: RefCell<Option<Active>>,
	queue: RefCell<VecDeque<Navigation>>,
	resolving: Cell<bool>,
	current_path: RefCell<String>,
	interceptor: Cell<Option<InterceptorHandle>>,
	listening: Cell<bool>,
	pop_installed: Cell<bool>,
}

/// Clears the resolving flag even when a resolution unwinds.
struct ResolvingGuard<'a>(&'a Cell<bool>);

impl Drop for ResolvingGuard<'_> {
	fn drop(&mut self) {
		self.0.set(false);
	}
}

/// Drops query string and fragment before matching.
fn route_path(path: &str) -> &str {
	let end = path.find(['?', '#']).unwrap_or(path.len());
	&path[..end]
}

fn is_external(href: &str) -> bool {
	href.contains("://") || href.starts_with("//") || href.starts_with("mailto:")
}

/// The client-side router.
///
/// The router matches the current location against its [`RouteTable`],
/// enforces guards, and keeps exactly one component mounted in its mount
/// point. Navigations requested while a resolution is running (from guards,
/// factories or mount hooks) are queued and processed in order afterwards, so
/// resolutions never interleave.
///
/// # Example
///
/// ```ignore
/// use eventia_pages::dom::Document;
/// use eventia_pages::router::{MemoryHistory, RouteTable, Router};
///
/// let table = RouteTable::builder()
///     .route("/", |_| Ok(Home::new()))
///     .fallback(|_| Ok(NotFound::new()))
///     .build()?;
/// let router = Router::new(table, document, "app", Rc::new(MemoryHistory::new("/")));
/// router.init()?;
/// router.navigate("/missing")?;
/// ```
#[derive(Clone)]
pub struct Router {
	inner: Rc<RouterInner>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes_count", &self.inner.table.len())
			.field("state", &self.inner.state.get())
			.field("current_path", &*self.inner.current_path.borrow())
			.finish()
	}
}

impl Router {
	/// Creates a router rendering into the mount point `mount_point`.
	///
	/// The mount point is registered in `document` if it is not there yet.
	pub fn new(
		table: RouteTable,
		document: Document,
		mount_point: &str,
		history: Rc<dyn History>,
	) -> Self {
		document.create_root(mount_point);
		Self {
			inner: Rc::new_cyclic(|this| RouterInner {
				this: this.clone(),
				table,
				document,
				mount_point: mount_point.to_string(),
				history,
				state: Cell::new(RouterState::Idle),
				active: RefCell::new(None),
				queue: RefCell::new(VecDeque::new()),
				resolving: Cell::new(false),
				current_path: RefCell::new(String::new()),
				interceptor: Cell::new(None),
				listening: Cell::new(false),
				pop_installed: Cell::new(false),
			}),
		}
	}

	/// Installs the link interceptor and the history listener, then resolves
	/// the current location. Calling it again while initialized does nothing.
	pub fn init(&self) -> Result<(), RouterError> {
		if self.inner.listening.replace(true) {
			return Ok(());
		}

		let weak = Rc::downgrade(&self.inner);
		let handle = self
			.inner
			.document
			.add_click_interceptor(move |target| match weak.upgrade() {
				Some(inner) => inner.intercept_link(target),
				None => false,
			});
		self.inner.interceptor.set(Some(handle));

		if !self.inner.pop_installed.replace(true) {
			let weak = Rc::downgrade(&self.inner);
			self.inner.history.on_pop(Rc::new(move |path| {
				let Some(inner) = weak.upgrade() else {
					return;
				};
				if !inner.listening.get() {
					return;
				}
				if let Err(error) = inner.request(path, NavigationKind::Pop) {
					error_log!("navigation to {} failed: {}", path, error);
				}
			}));
		}

		let path = self.inner.history.current_path();
		info_log!("router initialized at {}", path);
		self.inner.request(&path, NavigationKind::Initial)
	}

	/// Navigates to `path`, adding a history entry.
	pub fn navigate(&self, path: &str) -> Result<(), RouterError> {
		self.inner.request(path, NavigationKind::Push)
	}

	/// Navigates to `path`, replacing the current history entry.
	pub fn replace(&self, path: &str) -> Result<(), RouterError> {
		self.inner.request(path, NavigationKind::Replace)
	}

	/// Navigates to a named route.
	pub fn navigate_to(&self, name: &str, params: &[(&str, &str)]) -> Result<(), RouterError> {
		let path = self.inner.table.reverse(name, params)?;
		self.navigate(&path)
	}

	/// Moves one history entry back; the pop listener re-resolves.
	pub fn back(&self) -> Result<(), RouterError> {
		self.inner
			.history
			.back()
			.map_err(|error| RouterError::NavigationFailed(error.to_string()))
	}

	/// Generates a path by route name with parameters.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		self.inner.table.reverse(name, params)
	}

	/// Unmounts the active component and stops reacting to links and history.
	pub fn shutdown(&self) {
		self.inner.listening.set(false);
		if let Some(handle) = self.inner.interceptor.take() {
			self.inner.document.remove_click_interceptor(handle);
		}
		self.inner.queue.borrow_mut().clear();
		self.inner.unmount_active();
		self.inner.state.set(RouterState::Idle);
		info_log!("router shut down");
	}

	/// Returns the current state.
	pub fn state(&self) -> RouterState {
		self.inner.state.get()
	}

	/// Returns the last resolved path.
	pub fn current_path(&self) -> String {
		self.inner.current_path.borrow().clone()
	}

	/// Returns the name of the mounted component.
	pub fn active_component(&self) -> Option<&'static str> {
		self.inner
			.active
			.borrow()
			.as_ref()
			.map(|active| active.component.name())
	}

	/// Returns the route of the mounted component.
	pub fn active_route(&self) -> Option<String> {
		let active = self.inner.active.borrow();
		let index = active.as_ref()?.route;
		self.inner
			.table
			.get(index)
			.map(|route| route.pattern.as_str().to_string())
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.inner.table.len()
	}

	/// Returns the route table.
	pub fn table(&self) -> &RouteTable {
		&self.inner.table
	}

	/// Returns the document the router renders into.
	pub fn document(&self) -> &Document {
		&self.inner.document
	}

	/// Returns a handle that does not keep the router alive.
	pub fn navigator(&self) -> Navigator {
		Navigator {
			inner: Rc::downgrade(&self.inner),
		}
	}
}

impl RouterInner {
	fn intercept_link(&self, target: &ClickTarget) -> bool {
		if !self.listening.get()
			|| !target.tag_name().eq_ignore_ascii_case("a")
			|| !target.has_attribute("data-link")
		{
			return false;
		}
		let Some(href) = target.attribute("href") else {
			return false;
		};
		if is_external(href) {
			return false;
		}
		let kind = if target.has_attribute("data-replace") {
			NavigationKind::Replace
		} else {
			NavigationKind::Push
		};
		if let Err(error) = self.request(href, kind) {
			error_log!("navigation to {} failed: {}", href, error);
		}
		true
	}

	/// Queues a navigation and, unless a resolution is already running,
	/// processes the queue.
	fn request(&self, path: &str, kind: NavigationKind) -> Result<(), RouterError> {
		self.queue.borrow_mut().push_back(Navigation {
			path: path.to_string(),
			kind,
		});
		if self.resolving.get() {
			debug_log!("queued navigation to {}", path);
			return Ok(());
		}
		self.drain()
	}

	fn drain(&self) -> Result<(), RouterError> {
		self.resolving.set(true);
		let _resolving = ResolvingGuard(&self.resolving);

		let mut processed = 0;
		let mut outcome = Ok(());
		loop {
			let next = self.queue.borrow_mut().pop_front();
			let Some(navigation) = next else {
				break;
			};
			processed += 1;
			if processed > MAX_REDIRECTS {
				self.queue.borrow_mut().clear();
				error_log!("redirect limit reached at {}", navigation.path);
				self.state.set(if self.active.borrow().is_some() {
					RouterState::Mounted
				} else {
					RouterState::Idle
				});
				return Err(RouterError::NavigationFailed(format!(
					"more than {} redirects while resolving {}",
					MAX_REDIRECTS, navigation.path
				)));
			}
			outcome = self.resolve(navigation);
			if let Err(error) = &outcome {
				error_log!("{}", error);
			}
		}
		outcome
	}

	/// Writes a navigation into history. Pops and the initial load are
	/// already there.
	fn record(&self, navigation: &Navigation) -> Result<(), RouterError> {
		let recorded = match navigation.kind {
			NavigationKind::Push => self.history.push(&navigation.path),
			NavigationKind::Replace => self.history.replace(&navigation.path),
			NavigationKind::Pop | NavigationKind::Initial => Ok(()),
		};
		recorded.map_err(|error| RouterError::NavigationFailed(error.to_string()))
	}

	fn resolve(&self, navigation: Navigation) -> Result<(), RouterError> {
		let path = route_path(&navigation.path).to_string();
		self.state.set(RouterState::Resolving);
		debug_log!("resolving {} ({:?})", path, navigation.kind);

		let Some(matched) = self.table.match_path(&path) else {
			self.record(&navigation)?;
			*self.current_path.borrow_mut() = path.clone();
			self.unmount_active();
			self.clear_mount_point();
			self.state.set(RouterState::Idle);
			return Err(RouterError::NotFound(path));
		};
		let index = matched.index;
		let params = matched.params;

		if let Some(guard) = matched.route.guard.as_ref() {
			let context = GuardContext::new(&path, &params);
			let verdict = guard(&context);
			let redirect = context.into_redirect();
			match verdict {
				Ok(true) => {
					if let Some(redirect) = redirect {
						warn_log!(
							"guard for {} allowed access but requested {:?}; ignoring",
							path,
							redirect
						);
					}
				}
				Ok(false) => {
					self.deny(&navigation, &path, redirect);
					return Ok(());
				}
				Err(error) => {
					error_log!("guard for {} failed: {}", path, error);
					self.record(&navigation)?;
					*self.current_path.borrow_mut() = path.clone();
					self.unmount_active();
					let context = self.route_context(path, params);
					return self.fall_back(index, context, |path| RouterError::Guard {
						path,
						source: error,
					});
				}
			}
		}

		self.record(&navigation)?;
		*self.current_path.borrow_mut() = path.clone();
		self.activate(index, path, params)
	}

	/// Handles a denied navigation. Nothing has been recorded for it yet,
	/// except for pops and the initial load which the history already shows.
	fn deny(&self, navigation: &Navigation, path: &str, redirect: Option<Redirect>) {
		info_log!("guard denied {}", path);
		match redirect {
			Some(Redirect::Soft(target)) => {
				let kind = match navigation.kind {
					NavigationKind::Push => NavigationKind::Push,
					NavigationKind::Replace | NavigationKind::Pop | NavigationKind::Initial => {
						NavigationKind::Replace
					}
				};
				self.queue.borrow_mut().push_front(Navigation { path: target, kind });
			}
			Some(Redirect::Hard(target)) => {
				self.unmount_active();
				self.state.set(RouterState::Idle);
				if let Err(error) = self.history.assign(&target) {
					error_log!("location assignment to {} failed: {}", target, error);
				}
			}
			None => {
				if navigation.kind == NavigationKind::Pop {
					let previous = self.current_path.borrow().clone();
					if let Err(error) = self.history.replace(&previous) {
						warn_log!("could not restore {} after denial: {}", previous, error);
					}
				}
				let state = if self.active.borrow().is_some() {
					RouterState::Mounted
				} else {
					RouterState::Idle
				};
				self.state.set(state);
			}
		}
	}

	fn activate(&self, index: usize, path: String, params: RouteParams) -> Result<(), RouterError> {
		self.unmount_active();
		let context = self.route_context(path, params);

		let error = match self.instantiate(index, &context) {
			Ok(()) => return Ok(()),
			Err(error) => error,
		};
		error_log!(
			"route {} failed on {}: {}",
			self.table.routes[index].pattern.as_str(),
			context.path,
			error
		);
		self.fall_back(index, context, |path| RouterError::Component {
			path,
			source: error,
		})
	}

	/// Mounts the wildcard route in place of `failed`. Without one, clears
	/// the mount point and reports `failure`.
	fn fall_back<E>(
		&self,
		failed: usize,
		context: RouteContext,
		failure: E,
	) -> Result<(), RouterError>
	where
		E: FnOnce(String) -> RouterError,
	{
		let fallback = self.table.fallback_index().filter(|fallback| *fallback != failed);
		let error = match fallback {
			Some(fallback) => match self.instantiate(fallback, &context) {
				Ok(()) => return Ok(()),
				Err(source) => RouterError::Component {
					path: context.path,
					source,
				},
			},
			None => failure(context.path),
		};
		self.clear_mount_point();
		self.state.set(RouterState::Idle);
		Err(error)
	}

	fn route_context(&self, path: String, params: RouteParams) -> RouteContext {
		RouteContext {
			path,
			params,
			navigator: self.navigator(),
		}
	}

	/// Builds, renders and mounts the component of route `index`.
	fn instantiate(&self, index: usize, context: &RouteContext) -> Result<(), ComponentError> {
		let route = &self.table.routes[index];
		let component: Rc<dyn Component> = Rc::from((route.factory)(context)?);
		self.document
			.set_inner_html(&self.mount_point, &component.render())?;
		if let Err(error) = component.mount(&self.document) {
			component.unmount(&self.document);
			return Err(error);
		}
		debug_log!("mounted {} ({})", component.name(), component.id());
		*self.active.borrow_mut() = Some(Active {
			route: index,
			component,
		});
		self.state.set(RouterState::Mounted);
		Ok(())
	}

	fn unmount_active(&self) {
		let previous = self.active.borrow_mut().take();
		if let Some(previous) = previous {
			debug_log!("unmounting {}", previous.component.name());
			previous.component.unmount(&self.document);
		}
	}

	fn clear_mount_point(&self) {
		if let Err(error) = self.document.set_inner_html(&self.mount_point, "") {
			warn_log!("could not clear mount point: {}", error);
		}
	}

	fn navigator(&self) -> Navigator {
		Navigator {
			inner: self.this.clone(),
		}
	}
}

/// Weak handle for requesting navigations.
///
/// Components receive one through their [`RouteContext`]; it stops working
/// once the router is dropped.
#[derive(Clone, Default)]
pub struct Navigator {
	inner: Weak<RouterInner>,
}

impl std::fmt::Debug for Navigator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Navigator")
			.field("attached", &(self.inner.strong_count() > 0))
			.finish()
	}
}

impl Navigator {
	/// A navigator that is not attached to any router.
	pub fn detached() -> Self {
		Self::default()
	}

	fn upgrade(&self) -> Result<Rc<RouterInner>, RouterError> {
		self.inner
			.upgrade()
			.ok_or_else(|| RouterError::NavigationFailed("router is gone".to_string()))
	}

	/// Navigates to `path`, adding a history entry.
	pub fn navigate(&self, path: &str) -> Result<(), RouterError> {
		self.upgrade()?.request(path, NavigationKind::Push)
	}

	/// Navigates to `path`, replacing the current history entry.
	pub fn replace(&self, path: &str) -> Result<(), RouterError> {
		self.upgrade()?.request(path, NavigationKind::Replace)
	}

	/// Moves one history entry back.
	pub fn back(&self) -> Result<(), RouterError> {
		self.upgrade()?
			.history
			.back()
			.map_err(|error| RouterError::NavigationFailed(error.to_string()))
	}

	/// Returns the last resolved path.
	pub fn current_path(&self) -> Option<String> {
		self.inner
			.upgrade()
			.map(|inner| inner.current_path.borrow().clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::ComponentId;
	use crate::router::{MemoryHistory, WILDCARD};
	use rstest::{fixture, rstest};

	struct Page {
		id: ComponentId,
		text: String,
	}

	impl Page {
		fn new(text: &str) -> Self {
			Self {
				id: ComponentId::fixed(format!("page-{}", text.to_lowercase())),
				text: text.to_string(),
			}
		}
	}

	impl Component for Page {
		fn name(&self) -> &'static str {
			"Page"
		}

		fn id(&self) -> &ComponentId {
			&self.id
		}

		fn render(&self) -> String {
			format!(r#"<section id="{}">{}</section>"#, self.id, self.text)
		}
	}

	fn page(text: &'static str) -> impl Fn(&RouteContext) -> Result<Page, ComponentError> {
		move |_| Ok(Page::new(text))
	}

	#[fixture]
	fn history() -> Rc<MemoryHistory> {
		Rc::new(MemoryHistory::new("/"))
	}

	fn router(table: RouteTable, history: &Rc<MemoryHistory>) -> Router {
		Router::new(table, Document::new(), "app", history.clone())
	}

	#[rstest]
	#[case("/?tab=1", "/")]
	#[case("/events#top", "/events")]
	#[case("/a?b#c", "/a")]
	#[case("/plain", "/plain")]
	fn test_route_path_strips_query_and_fragment(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(route_path(input), expected);
	}

	#[rstest]
	fn test_wildcard_must_be_last() {
		let result = RouteTable::builder()
			.fallback(page("404"))
			.route("/", page("Home"))
			.build();
		assert!(matches!(result, Err(RouteTableError::WildcardNotLast(0))));
	}

	#[rstest]
	fn test_duplicate_names_rejected() {
		let result = RouteTable::builder()
			.named("home", "/", page("Home"))
			.named("home", "/start", page("Start"))
			.build();
		assert_eq!(
			result.unwrap_err(),
			RouteTableError::DuplicateName("home".to_string())
		);
	}

	#[rstest]
	fn test_first_match_wins() {
		let table = RouteTable::builder()
			.route("/events/new", page("New"))
			.route("/events/{id}", page("Detail"))
			.fallback(page("404"))
			.build()
			.unwrap();
		assert_eq!(table.match_path("/events/new").unwrap().index, 0);
		let detail = table.match_path("/events/5").unwrap();
		assert_eq!(detail.index, 1);
		assert_eq!(detail.params.get("id").map(String::as_str), Some("5"));
		assert_eq!(table.match_path("/nowhere").unwrap().index, 2);
		assert_eq!(table.fallback_index(), Some(2));
	}

	#[rstest]
	fn test_reverse() {
		let table = RouteTable::builder()
			.named("home", "/", page("Home"))
			.named("event", "/events/{id}", page("Detail"))
			.build()
			.unwrap();
		assert_eq!(table.reverse("home", &[]).unwrap(), "/");
		assert_eq!(table.reverse("event", &[("id", "42")]).unwrap(), "/events/42");
		assert_eq!(
			table.reverse("event", &[]),
			Err(RouterError::MissingParameter("id".to_string()))
		);
		assert!(matches!(
			table.reverse("ghost", &[]),
			Err(RouterError::InvalidRouteName(_))
		));
	}

	#[rstest]
	fn test_navigate_mounts_matching_route(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", page("Home"))
			.route("/about", page("About"))
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();
		assert_eq!(router.state(), RouterState::Mounted);
		assert_eq!(router.document().text_content("app").unwrap(), "Home");

		router.navigate("/about?ref=nav").unwrap();
		assert_eq!(router.current_path(), "/about");
		assert_eq!(router.active_route().as_deref(), Some("/about"));
		assert_eq!(history.entries(), vec!["/", "/about?ref=nav"]);
	}

	#[rstest]
	fn test_no_match_without_wildcard_is_not_found(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder().route("/", page("Home")).build().unwrap();
		let router = router(table, &history);
		router.init().unwrap();

		let result = router.navigate("/missing");
		assert_eq!(result, Err(RouterError::NotFound("/missing".to_string())));
		assert_eq!(router.state(), RouterState::Idle);
		assert!(router.active_component().is_none());
		assert_eq!(router.document().inner_html("app").unwrap(), "");
	}

	#[rstest]
	fn test_denial_without_redirect_keeps_current_page(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", page("Home"))
			.guarded("/closed", page("Closed"), |_| Ok(false))
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();
		router.navigate("/closed").unwrap();

		assert_eq!(router.state(), RouterState::Mounted);
		assert_eq!(router.document().text_content("app").unwrap(), "Home");
		assert_eq!(router.current_path(), "/");
		assert_eq!(history.entries(), vec!["/"]);
	}

	#[rstest]
	fn test_denied_replace_leaves_history_untouched(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", page("Home"))
			.route("/about", page("About"))
			.guarded("/closed", page("Closed"), |_| Ok(false))
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();
		router.navigate("/about").unwrap();
		router.replace("/closed").unwrap();

		assert_eq!(router.current_path(), "/about");
		assert_eq!(history.entries(), vec!["/", "/about"]);

		router.back().unwrap();
		assert_eq!(router.current_path(), "/");
		assert_eq!(router.document().text_content("app").unwrap(), "Home");
	}

	#[rstest]
	fn test_failing_guard_mounts_wildcard(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", page("Home"))
			.guarded("/boom", page("Boom"), |_| {
				Err(GuardError::new("session store unreachable"))
			})
			.fallback(page("NotFound"))
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();
		router.navigate("/boom").unwrap();

		assert_eq!(router.state(), RouterState::Mounted);
		assert_eq!(router.current_path(), "/boom");
		assert_eq!(router.active_route().as_deref(), Some(WILDCARD));
		assert_eq!(router.document().text_content("app").unwrap(), "NotFound");
	}

	#[rstest]
	fn test_failing_guard_without_wildcard_reports_error(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", page("Home"))
			.guarded("/boom", page("Boom"), |_| Err(GuardError::new("no session")))
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();

		let result = router.navigate("/boom");
		assert_eq!(
			result,
			Err(RouterError::Guard {
				path: "/boom".to_string(),
				source: GuardError::new("no session"),
			})
		);
		assert_eq!(router.state(), RouterState::Idle);
		assert!(router.active_component().is_none());
		assert_eq!(router.document().inner_html("app").unwrap(), "");
	}

	#[rstest]
	fn test_soft_redirect_replaces_denied_entry(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", page("Home"))
			.route("/login", page("Login"))
			.guarded("/private", page("Private"), |ctx| {
				ctx.redirect("/login");
				Ok(false)
			})
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();
		router.navigate("/private").unwrap();

		assert_eq!(router.current_path(), "/login");
		assert_eq!(router.document().text_content("app").unwrap(), "Login");
		assert_eq!(history.entries(), vec!["/", "/login"]);
	}

	#[rstest]
	fn test_hard_redirect_leaves_router_idle(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", page("Home"))
			.guarded("/private", page("Private"), |ctx| {
				ctx.redirect_hard("/login");
				Ok(false)
			})
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();
		router.navigate("/private").unwrap();

		assert_eq!(router.state(), RouterState::Idle);
		assert!(router.active_component().is_none());
		assert_eq!(history.assigned(), vec!["/login"]);
	}

	#[rstest]
	fn test_redirect_loop_is_cut(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", page("Home"))
			.guarded("/a", page("A"), |ctx| {
				ctx.redirect("/b");
				Ok(false)
			})
			.guarded("/b", page("B"), |ctx| {
				ctx.redirect("/a");
				Ok(false)
			})
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();

		let result = router.navigate("/a");
		assert!(matches!(result, Err(RouterError::NavigationFailed(_))));
		assert_eq!(router.state(), RouterState::Mounted);
		assert_eq!(router.document().text_content("app").unwrap(), "Home");
	}

	#[rstest]
	fn test_factory_error_falls_back_to_wildcard(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", page("Home"))
			.route("/broken", |_| -> Result<Page, ComponentError> {
				Err(ComponentError::Construction {
					component: "Broken",
					reason: "boom".to_string(),
				})
			})
			.fallback(page("404"))
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();

		router.navigate("/broken").unwrap();
		assert_eq!(router.state(), RouterState::Mounted);
		assert_eq!(router.active_route().as_deref(), Some("*"));
		assert_eq!(router.document().text_content("app").unwrap(), "404");
	}

	#[rstest]
	fn test_factory_error_without_wildcard(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", |_| -> Result<Page, ComponentError> {
				Err(ComponentError::InvalidState("no data".to_string()))
			})
			.build()
			.unwrap();
		let router = router(table, &history);

		let result = router.init();
		assert!(matches!(result, Err(RouterError::Component { .. })));
		assert_eq!(router.state(), RouterState::Idle);
	}

	#[rstest]
	fn test_back_re_resolves_without_push(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", page("Home"))
			.route("/about", page("About"))
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();
		router.navigate("/about").unwrap();

		router.back().unwrap();
		assert_eq!(router.current_path(), "/");
		assert_eq!(router.document().text_content("app").unwrap(), "Home");
		assert_eq!(history.entries(), vec!["/", "/about"]);
	}

	#[rstest]
	fn test_detached_navigator_fails() {
		let navigator = Navigator::detached();
		assert!(matches!(
			navigator.navigate("/"),
			Err(RouterError::NavigationFailed(_))
		));
		assert!(navigator.current_path().is_none());

		let route = RouteContext::detached("/events?page=2");
		assert_eq!(route.path(), "/events");
		assert!(route.params().is_empty());
		assert!(route.navigator().replace("/").is_err());
	}

	#[rstest]
	fn test_shutdown_stops_link_handling(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", |_| -> Result<Link, ComponentError> { Ok(Link::new()) })
			.route("/next", page("Next"))
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();
		router.shutdown();

		assert!(!router.document().follow_link("/next").unwrap());
		assert_eq!(router.state(), RouterState::Idle);
		assert_eq!(history.entries(), vec!["/"]);
	}

	struct Link {
		id: ComponentId,
	}

	impl Link {
		fn new() -> Self {
			Self {
				id: ComponentId::fixed("nav"),
			}
		}
	}

	impl Component for Link {
		fn name(&self) -> &'static str {
			"Link"
		}

		fn id(&self) -> &ComponentId {
			&self.id
		}

		fn render(&self) -> String {
			format!(
				r#"<nav id="{}"><a href="/next" data-link>Next</a></nav>"#,
				self.id
			)
		}
	}

	#[rstest]
	fn test_link_click_navigates(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder()
			.route("/", |_| -> Result<Link, ComponentError> { Ok(Link::new()) })
			.route("/next", page("Next"))
			.build()
			.unwrap();
		let router = router(table, &history);
		router.init().unwrap();

		assert!(router.document().follow_link("/next").unwrap());
		assert_eq!(router.current_path(), "/next");
		assert_eq!(router.document().text_content("app").unwrap(), "Next");
	}

	#[rstest]
	fn test_init_is_idempotent(history: Rc<MemoryHistory>) {
		let table = RouteTable::builder().route("/", page("Home")).build().unwrap();
		let router = router(table, &history);
		router.init().unwrap();
		router.init().unwrap();
		assert_eq!(router.route_count(), 1);
		assert_eq!(router.state(), RouterState::Mounted);
	}
}
