//! Hashnav Pages - hash-fragment view router for WASM single-page applications
//!
//! A small client-side shell: an HTML page with a tab strip and an app root,
//! plus a table of routes. Each route names an HTML fragment to fetch, the
//! stylesheets it needs, and optionally a controller to initialize once the
//! fragment is on screen.
//!
//! ## Architecture
//!
//! - [`router`]: route table, hash resolution, stylesheet loading, the view
//!   loader and the `hashchange` controller
//! - [`theme`]: persisted light/dark toggle
//! - [`config`]: TOML router settings
//! - [`platform`]: capability traits the router drives, with `web-sys`
//!   implementations on `wasm32`
//! - [`testing`]: in-memory capabilities for native tests
//! - [`logging`]: console logging macros compiled out of release builds
//!
//! ## Example
//!
//! ```ignore
//! use hashnav_pages::{ClientLauncher, RouterSettings, ViewRegistry};
//!
//! #[wasm_bindgen(start)]
//! pub fn main() -> Result<(), JsValue> {
//!     let settings = RouterSettings::from_toml(include_str!("routes.toml"))
//!         .map_err(|e| JsValue::from_str(&e.to_string()))?;
//!
//!     let mut registry = ViewRegistry::new();
//!     registry.register_fn("achievements", achievements::init);
//!
//!     let app = ClientLauncher::new(settings, registry)
//!         .launch()
//!         .map_err(|e| JsValue::from_str(&e.to_string()))?;
//!     std::mem::forget(app);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod platform;
pub mod router;
pub mod theme;

// Browser entry point
#[cfg(target_arch = "wasm32")]
pub mod launcher;

// In-memory capabilities (available on both WASM and native)
pub mod testing;

#[doc(hidden)]
pub mod __private {
	pub use web_sys;
}

pub use config::{ConfigError, RouterSettings};
#[cfg(target_arch = "wasm32")]
pub use launcher::{ClientLauncher, LaunchError, LaunchedApp};
pub use platform::{FetchError, RouterServices};
pub use router::{
	Cleanup, LoadOutcome, NavigationController, PendingNavigation, RouteSnapshot, RouteTable,
	Router, RouterError, ViewContext, ViewController, ViewDefinition, ViewError, ViewRegistry,
};
pub use theme::{Theme, ThemeToggle};
