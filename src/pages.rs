//! Hash-fragment view router
//!
//! This module provides access to hashnav-pages, the router behind every
//! hashnav application.
//!
//! ## Architecture
//!
//! - **Route table**: fragment path to HTML fragment, stylesheets and an
//!   optional view controller, loaded from TOML settings
//! - **View loader**: fetch, swap, initialize; the newest navigation wins
//! - **Capabilities**: DOM, storage and network access behind traits, with
//!   in-memory doubles for native tests
//! - **Theme toggle**: persisted light/dark preference
//!
//! ## Example
//!
//! ```rust,ignore
//! use hashnav::pages::testing::TestHost;
//! use hashnav::pages::{RouteTable, Router, ViewDefinition, ViewRegistry};
//!
//! let table = RouteTable::new(
//!     [("/about", ViewDefinition::new("views/about.html"))],
//!     "/about",
//! )?;
//! let host = TestHost::new();
//! host.fetcher.respond("views/about.html", "<h1>About</h1>");
//!
//! let router = Router::new(table, ViewRegistry::new(), host.services());
//! router.load_view("/about").await?;
//! ```

// Re-export all hashnav-pages functionality
pub use hashnav_pages::*;
