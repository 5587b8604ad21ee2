//! # Hashnav
//!
//! Hash-fragment view routing for static single-page applications built
//! with Rust and WebAssembly.
//!
//! A page ships a tab strip, an app root and a route table. The URL fragment
//! (`#/achievements`, `#/about`) picks the route; the router fetches the
//! route's HTML fragment, swaps it into the app root, keeps the route's
//! stylesheets attached and hands the rendered DOM to a registered view
//! controller.
//!
//! ## Feature Flags
//!
//! - `pages` (default) - the router crate, re-exported as [`pages`]
//! - `console_error_panic_hook` - readable panics in the browser console
//! - `debug-hooks` - navigation tracing in debug builds
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use hashnav::prelude::*;
//!
//! #[wasm_bindgen(start)]
//! pub fn main() -> Result<(), JsValue> {
//!     let mut registry = ViewRegistry::new();
//!     registry.register_fn("achievements", |ctx| {
//!         // wire up the table rendered into ctx.root
//!         Ok(None)
//!     });
//!
//!     let app = ClientLauncher::from_toml(include_str!("routes.toml"), registry)
//!         .and_then(ClientLauncher::launch)
//!         .map_err(|e| JsValue::from_str(&e.to_string()))?;
//!     std::mem::forget(app);
//!     Ok(())
//! }
//! ```

#[cfg(feature = "pages")]
pub mod pages;

/// Commonly used types.
#[cfg(feature = "pages")]
pub mod prelude {
	pub use crate::pages::{
		Cleanup, LoadOutcome, NavigationController, RouteTable, Router, RouterError,
		RouterSettings, Theme, ThemeToggle, ViewContext, ViewController, ViewDefinition,
		ViewError, ViewRegistry,
	};

	#[cfg(target_arch = "wasm32")]
	pub use crate::pages::{ClientLauncher, LaunchError, LaunchedApp};
}
