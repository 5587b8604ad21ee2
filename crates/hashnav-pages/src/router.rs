//! Client-side hash routing.
//!
//! This module provides:
//! - [`RouteTable`]: route path to [`ViewDefinition`] mapping with a fallback route
//! - [`route_from_hash`]: location fragment to route resolution
//! - [`AssetLoader`]: idempotent per-view stylesheet attach/detach
//! - [`ViewRegistry`] / [`ViewController`]: controllers run after a view is rendered
//! - [`Router`]: the view loader and owner of the current route state
//! - [`NavigationController`]: `hashchange` handling
//!
//! ## Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use hashnav_pages::router::{NavigationController, RouteTable, Router, ViewDefinition, ViewRegistry};
//!
//! let table = RouteTable::new(
//!     [
//!         ("/achievements", ViewDefinition::new("views/achievements.html").css("css/achievements.css")),
//!         ("/about", ViewDefinition::new("views/about.html")),
//!     ],
//!     "/achievements",
//! )?;
//! let router = Rc::new(Router::new(table, ViewRegistry::new(), services));
//! let controller = NavigationController::new(router, location, chrome);
//!
//! spawn_local(async move {
//!     let _ = controller.start().await;
//! });
//! ```

mod assets;
mod core;
mod hash;
mod navigation;
mod table;
mod view;

pub use assets::AssetLoader;
pub use self::core::{LoadOutcome, RouteSnapshot, Router, RouterError, failure_html};
pub use hash::route_from_hash;
pub use navigation::{NavigationController, PendingNavigation};
pub use table::{RouteTable, ViewDefinition};
pub use view::{Cleanup, ViewContext, ViewController, ViewError, ViewRegistry};
