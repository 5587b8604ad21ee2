//! Core Router Implementation.
//!
//! [`Router::load_view`] performs one navigation:
//!
//! ```text
//! lookup ─► pre-load CSS ─► fetch HTML ─┬─► (stale)  ─► roll back CSS ─► Superseded
//!                                       ├─► (error)  ─► alert + roll back CSS ─► Failed
//!                                       └─► old cleanup ─► swap HTML ─► mark tab
//!                                             ─► controller init ─► commit state
//!                                             ─► detach stale CSS ─► Active
//! ```
//!
//! Navigations are not queued. Each call takes a generation number on entry;
//! after the fetch completes, a call that is no longer the newest stops
//! without touching the DOM or the current route state, so the last
//! navigation requested is the one that ends up on screen.

use std::cell::{Cell, RefCell};
use std::fmt;

use super::assets::AssetLoader;
use super::table::RouteTable;
use super::view::{Cleanup, ViewContext, ViewError, ViewRegistry};
use crate::platform::{FetchError, RouterServices};
use crate::{debug_log, error_log, warn_log};

/// Error type for router operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	/// Route not found in the route table.
	#[error("Route not found: {0}")]
	NotFound(String),
	/// A route names a controller module nobody registered.
	#[error("View module not registered: {0}")]
	ModuleNotRegistered(String),
	/// A controller's initializer failed.
	#[error("View module {module} failed to initialize: {source}")]
	ViewInit {
		/// The module identifier.
		module: String,
		/// The initializer's error.
		#[source]
		source: ViewError,
	},
}

/// How a [`Router::load_view`] call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
	/// The view is on screen and is the current route.
	Active,
	/// The HTML could not be fetched; an alert replaced the content and the
	/// previous route is still current.
	Failed(FetchError),
	/// A newer navigation started while this one was fetching; nothing was
	/// applied.
	Superseded,
}

/// Read-only view of the current route state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSnapshot {
	/// Route of the last successful navigation.
	pub route: Option<String>,
	/// Whether that view registered a cleanup.
	pub has_cleanup: bool,
	/// Stylesheets owned by that view.
	pub css_hrefs: Vec<String>,
}

#[derive(Default)]
struct CurrentRoute {
	route: Option<String>,
	cleanup: Option<Cleanup>,
	css_hrefs: Vec<String>,
}

/// Message rendered into the mount point when a view's HTML cannot be fetched.
pub fn failure_html(route: &str) -> String {
	format!("<div role=\"alert\">Failed to load view: {}</div>", route)
}

/// The view loader. Sole owner and writer of the current route state.
pub struct Router {
	table: RouteTable,
	registry: ViewRegistry,
	services: RouterServices,
	assets: AssetLoader,
	state: RefCell<CurrentRoute>,
	/// Generation of the newest navigation issued.
	generation: Cell<u64>,
	/// Stylesheets pre-loaded by the newest navigation while it is in flight.
	pending_css: RefCell<Vec<String>>,
	/// Stylesheets of views whose controller failed. They stay attached while
	/// that view is on screen and are detached by the next committed view.
	orphaned_css: RefCell<Vec<String>>,
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.table.paths().collect::<Vec<_>>())
			.field("registry", &self.registry)
			.field("current", &self.current())
			.field("generation", &self.generation.get())
			.finish()
	}
}

impl Router {
	/// Creates a router. No view is loaded until [`Router::load_view`] runs.
	pub fn new(table: RouteTable, registry: ViewRegistry, services: RouterServices) -> Self {
		let assets = AssetLoader::new(services.stylesheets.clone());
		Self {
			table,
			registry,
			services,
			assets,
			state: RefCell::new(CurrentRoute::default()),
			generation: Cell::new(0),
			pending_css: RefCell::new(Vec::new()),
			orphaned_css: RefCell::new(Vec::new()),
		}
	}

	/// The route table.
	pub fn table(&self) -> &RouteTable {
		&self.table
	}

	/// The current route state.
	pub fn current(&self) -> RouteSnapshot {
		let state = self.state.borrow();
		RouteSnapshot {
			route: state.route.clone(),
			has_cleanup: state.cleanup.is_some(),
			css_hrefs: state.css_hrefs.clone(),
		}
	}

	/// Generation number of the newest navigation issued so far.
	pub fn latest_generation(&self) -> u64 {
		self.generation.get()
	}

	/// Controller modules named by the route table that the registry cannot
	/// resolve, in route order and without duplicates.
	pub fn unregistered_modules(&self) -> Vec<&str> {
		let mut missing = Vec::new();
		let modules = self
			.table
			.paths()
			.filter_map(|path| self.table.get(path))
			.filter_map(|definition| definition.module.as_deref());
		for module in modules {
			if !self.registry.contains(module) && !missing.contains(&module) {
				missing.push(module);
			}
		}
		missing
	}

	/// Loads `route`'s view and makes it current.
	///
	/// `route` must be a key of the route table (see
	/// [`RouteTable::normalize`]). A fetch failure is reported through
	/// [`LoadOutcome::Failed`]; controller failures are returned as errors,
	/// in which case the new HTML is already on screen but the route state
	/// was not committed. That view's stylesheets stay attached until the
	/// next view is committed.
	pub async fn load_view(&self, route: &str) -> Result<LoadOutcome, RouterError> {
		let definition = self
			.table
			.get(route)
			.ok_or_else(|| RouterError::NotFound(route.to_string()))?;

		let generation = self.generation.get() + 1;
		self.generation.set(generation);
		*self.pending_css.borrow_mut() = definition.css.clone();
		debug_log!("navigation #{} -> {}", generation, route);

		let previous_css = self.state.borrow().css_hrefs.clone();

		let mut next_css = Vec::with_capacity(definition.css.len());
		for href in &definition.css {
			self.assets.load_css(href);
			next_css.push(href.clone());
		}

		let fetched = self.services.fetcher.fetch_text(&definition.html).await;

		if !self.is_latest(generation) {
			debug_log!(
				"navigation #{} -> {} superseded by #{}",
				generation,
				route,
				self.generation.get()
			);
			self.roll_back_css(&next_css);
			return Ok(LoadOutcome::Superseded);
		}
		self.pending_css.borrow_mut().clear();

		let html = match fetched {
			Ok(html) => html,
			Err(error) => {
				error_log!("failed to load view {}: {}", route, error);
				self.services.mount.set_html(&failure_html(route));
				self.roll_back_css(&next_css);
				return Ok(LoadOutcome::Failed(error));
			}
		};

		// Taken only now: a failed or superseded fetch must leave it in place.
		let previous_cleanup = self.state.borrow_mut().cleanup.take();
		if let Some(cleanup) = previous_cleanup {
			if let Err(error) = cleanup.run() {
				warn_log!("cleanup before {} failed: {}", route, error);
			}
		}

		self.services.mount.set_html(&html);
		self.services.chrome.mark_active_tab(route);

		let next_cleanup = match definition.module.as_deref() {
			Some(module) => match self.init_module(module) {
				Ok(cleanup) => cleanup,
				Err(error) => {
					self.orphan_css(next_css);
					return Err(error);
				}
			},
			None => None,
		};

		*self.state.borrow_mut() = CurrentRoute {
			route: Some(route.to_string()),
			cleanup: next_cleanup,
			css_hrefs: next_css,
		};

		let orphaned = std::mem::take(&mut *self.orphaned_css.borrow_mut());
		let state = self.state.borrow();
		for href in previous_css
			.iter()
			.chain(orphaned.iter())
			.filter(|href| !state.css_hrefs.contains(*href))
		{
			self.assets.unload_css(href);
		}

		Ok(LoadOutcome::Active)
	}

	fn orphan_css(&self, hrefs: Vec<String>) {
		let state = self.state.borrow();
		let mut orphaned = self.orphaned_css.borrow_mut();
		for href in hrefs {
			if !state.css_hrefs.contains(&href) && !orphaned.contains(&href) {
				orphaned.push(href);
			}
		}
	}

	fn is_latest(&self, generation: u64) -> bool {
		self.generation.get() == generation
	}

	fn init_module(&self, module: &str) -> Result<Option<Cleanup>, RouterError> {
		let mut controller = self.registry.resolve(module).inspect_err(|error| {
			error_log!("{}", error);
		})?;
		let ctx = ViewContext {
			root: self.services.mount.clone(),
		};

		controller.init(&ctx).map_err(|source| {
			error_log!("view module {} failed to initialize: {}", module, source);
			RouterError::ViewInit {
				module: module.to_string(),
				source,
			}
		})
	}

	/// Detaches stylesheets a navigation pre-loaded but will not use, unless
	/// the committed view, the newest in-flight navigation or a view still on
	/// screen after its controller failed needs them.
	fn roll_back_css(&self, preloaded: &[String]) {
		let state = self.state.borrow();
		let pending = self.pending_css.borrow();
		let orphaned = self.orphaned_css.borrow();

		for href in preloaded {
			if !state.css_hrefs.contains(href)
				&& !pending.contains(href)
				&& !orphaned.contains(href)
			{
				self.assets.unload_css(href);
			}
		}
	}
}
