//! Browser entry point.
//!
//! [`ClientLauncher::launch`] wires the `web-sys` capabilities into a
//! [`Router`], installs the `hashchange` and theme toggle listeners, and
//! spawns the initial navigation. Call it once the document is parsed (a
//! `#[wasm_bindgen(start)]` function loaded from a module script qualifies).

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::config::{ConfigError, RouterSettings};
use crate::platform::RouterServices;
use crate::platform::browser::{
	BrowserChrome, BrowserFetcher, BrowserLocation, BrowserMountPoint, BrowserStylesheets,
	BrowserThemeSurface, LocalStorage, MediaColorScheme, describe,
};
use crate::router::{NavigationController, PendingNavigation, Router, ViewRegistry};
use crate::theme::ThemeToggle;
use crate::{error_log, info_log, warn_log};

/// Errors that abort [`ClientLauncher::launch`].
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
	/// No global `window` (not running in a browser main thread).
	#[error("No window object")]
	NoWindow,
	/// The window has no document.
	#[error("No document object")]
	NoDocument,
	/// The app root element does not exist.
	#[error("No #{0} element found")]
	MissingMountPoint(String),
	/// The settings do not describe a usable route table.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A DOM call threw.
	#[error("JavaScript error: {0}")]
	Js(String),
}

impl From<JsValue> for LaunchError {
	fn from(value: JsValue) -> Self {
		Self::Js(describe(&value))
	}
}

/// Builds and starts the application.
#[derive(Debug)]
pub struct ClientLauncher {
	settings: RouterSettings,
	registry: ViewRegistry,
}

impl ClientLauncher {
	/// Creates a launcher for `settings` with the controllers in `registry`.
	pub fn new(settings: RouterSettings, registry: ViewRegistry) -> Self {
		Self { settings, registry }
	}

	/// Parses TOML settings and creates a launcher.
	pub fn from_toml(source: &str, registry: ViewRegistry) -> Result<Self, LaunchError> {
		Ok(Self::new(RouterSettings::from_toml(source)?, registry))
	}

	/// Starts the application.
	///
	/// Nothing is touched until the mount point is found. The theme is then
	/// set up before the initial view so it renders with the right colours.
	/// The listeners installed here live for the rest of the page.
	pub fn launch(self) -> Result<LaunchedApp, LaunchError> {
		#[cfg(feature = "console_error_panic_hook")]
		console_error_panic_hook::set_once();

		let Self { settings, registry } = self;

		let window = web_sys::window().ok_or(LaunchError::NoWindow)?;
		let document = window.document().ok_or(LaunchError::NoDocument)?;
		let table = settings.route_table()?;

		let mount = BrowserMountPoint::find(&document, &settings.app_root)
			.ok_or_else(|| LaunchError::MissingMountPoint(settings.app_root.clone()))?;

		let theme = setup_theme(&window, &document, &settings)?;

		let chrome = Rc::new(BrowserChrome::new(
			document.clone(),
			settings.tab_selector.as_str(),
			settings.tab_route_attribute.as_str(),
			settings.tab_active_class.as_str(),
			settings.disclosure_selector.as_str(),
		));
		let services = RouterServices {
			mount: Rc::new(mount),
			stylesheets: Rc::new(BrowserStylesheets::new(
				document,
				settings.stylesheet_key_attribute.as_str(),
			)),
			chrome: chrome.clone(),
			fetcher: Rc::new(BrowserFetcher::new(window.clone())),
		};

		let router = Rc::new(Router::new(table, registry, services));
		for module in router.unregistered_modules() {
			warn_log!("view module {} is not registered", module);
		}
		let controller = Rc::new(NavigationController::new(
			router,
			Rc::new(BrowserLocation::new(window.clone())),
			chrome,
		));

		let listener = Rc::clone(&controller);
		let on_hash_change = Closure::wrap(Box::new(move |_event: web_sys::Event| {
			spawn_navigation(listener.on_route_change());
		}) as Box<dyn FnMut(_)>);
		window
			.add_event_listener_with_callback("hashchange", on_hash_change.as_ref().unchecked_ref())?;
		on_hash_change.forget(); // Keep closure alive

		spawn_navigation(controller.start());
		info_log!("hashnav started");

		Ok(LaunchedApp { controller, theme })
	}
}

/// Handles to a running application.
#[derive(Debug, Clone)]
pub struct LaunchedApp {
	controller: Rc<NavigationController>,
	theme: Option<Rc<ThemeToggle>>,
}

impl LaunchedApp {
	/// The navigation controller.
	pub fn controller(&self) -> &Rc<NavigationController> {
		&self.controller
	}

	/// The router.
	pub fn router(&self) -> &Rc<Router> {
		self.controller.router()
	}

	/// The theme toggle, when the page has a toggle button and storage.
	pub fn theme(&self) -> Option<&Rc<ThemeToggle>> {
		self.theme.as_ref()
	}

	/// Navigates to `route` through the location fragment.
	pub fn navigate(&self, route: &str) {
		self.controller.navigate(route);
	}
}

fn spawn_navigation(pending: PendingNavigation) {
	wasm_bindgen_futures::spawn_local(async move {
		let route = pending.route().to_string();
		if let Err(error) = pending.await {
			error_log!("navigation to {} failed: {}", route, error);
		}
	});
}

fn setup_theme(
	window: &Window,
	document: &Document,
	settings: &RouterSettings,
) -> Result<Option<Rc<ThemeToggle>>, LaunchError> {
	let Some(surface) = BrowserThemeSurface::find(
		document,
		&settings.theme_toggle_id,
		settings.light_mode_class.as_str(),
	) else {
		return Ok(None);
	};
	let Some(store) = LocalStorage::new(window) else {
		warn_log!("localStorage unavailable; theme toggle disabled");
		return Ok(None);
	};

	let button = surface.button().clone();
	let toggle = Rc::new(ThemeToggle::setup(
		Rc::new(store),
		&MediaColorScheme::new(window.clone()),
		Rc::new(surface),
		settings.theme_storage_key.as_str(),
	));

	let listener = Rc::clone(&toggle);
	let on_click = Closure::wrap(Box::new(move |_event: web_sys::Event| {
		listener.toggle();
	}) as Box<dyn FnMut(_)>);
	button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
	on_click.forget(); // Keep closure alive

	Ok(Some(toggle))
}
