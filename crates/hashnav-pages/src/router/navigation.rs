//! Hash-change handling.
//!
//! The controller turns location changes into [`Router::load_view`] calls. It
//! never awaits them itself: [`NavigationController::on_route_change`]
//! returns a [`PendingNavigation`] that the event loop spawns.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::rc::Rc;

use super::core::{LoadOutcome, Router, RouterError};
use super::hash::route_from_hash;
use crate::debug_log;
use crate::platform::{Location, NavigationChrome};

/// A navigation that has been resolved but not run yet.
///
/// Awaiting it (or spawning it) runs [`Router::load_view`] for
/// [`PendingNavigation::route`].
pub struct PendingNavigation {
	route: String,
	router: Rc<Router>,
}

impl std::fmt::Debug for PendingNavigation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PendingNavigation")
			.field("route", &self.route)
			.finish()
	}
}

impl PendingNavigation {
	/// The normalized route that will be loaded.
	pub fn route(&self) -> &str {
		&self.route
	}
}

impl IntoFuture for PendingNavigation {
	type Output = Result<LoadOutcome, RouterError>;
	type IntoFuture = Pin<Box<dyn Future<Output = Self::Output>>>;

	fn into_future(self) -> Self::IntoFuture {
		Box::pin(async move { self.router.load_view(&self.route).await })
	}
}

/// Reacts to location changes by closing the menu and loading the route.
pub struct NavigationController {
	router: Rc<Router>,
	location: Rc<dyn Location>,
	chrome: Rc<dyn NavigationChrome>,
}

impl std::fmt::Debug for NavigationController {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NavigationController")
			.field("router", &self.router)
			.finish_non_exhaustive()
	}
}

impl NavigationController {
	/// Creates a controller driving `router`.
	pub fn new(
		router: Rc<Router>,
		location: Rc<dyn Location>,
		chrome: Rc<dyn NavigationChrome>,
	) -> Self {
		Self {
			router,
			location,
			chrome,
		}
	}

	/// The router this controller drives.
	pub fn router(&self) -> &Rc<Router> {
		&self.router
	}

	/// Route the current location resolves to.
	pub fn resolve_route(&self) -> String {
		route_from_hash(&self.location.hash(), self.router.table())
	}

	/// Handles a `hashchange` notification.
	pub fn on_route_change(&self) -> PendingNavigation {
		self.chrome.close_disclosure();

		let route = self.resolve_route();
		debug_log!("route change -> {}", route);
		PendingNavigation {
			route,
			router: Rc::clone(&self.router),
		}
	}

	/// Initial navigation. An empty location is first pointed at the
	/// fallback route so the first load is deterministic.
	pub fn start(&self) -> PendingNavigation {
		if self.location.hash().is_empty() {
			self.location.replace_hash(&self.router.table().fallback_hash());
		}
		self.on_route_change()
	}

	/// Points the location at `route`. The resulting `hashchange`
	/// notification performs the load.
	pub fn navigate(&self, route: &str) {
		self.location.set_hash(&format!("#{}", route));
	}
}
