//! Platform capabilities.
//!
//! The router core never reaches for `window` or `document` itself. Each side
//! effect it needs is expressed as a small capability trait and handed in by
//! whoever builds the [`Router`](crate::router::Router):
//!
//! - on `wasm32`, the [`browser`] module implements every trait on top of
//!   `web-sys`;
//! - everywhere, [`crate::testing`] provides in-memory implementations that
//!   record what happened, so the loader can be exercised natively.
//!
//! Everything here lives on the single-threaded UI event loop. Capabilities
//! take `&self` and use interior mutability; none of them are `Send`.

use std::any::Any;
use std::rc::Rc;

use async_trait::async_trait;

use crate::theme::Theme;

#[cfg(target_arch = "wasm32")]
pub mod browser;

/// Error returned by a [`ViewFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
	/// The server answered with a non-success status.
	#[error("unexpected HTTP status {0}")]
	Status(u16),
	/// The request never produced a response (offline, CORS, bad URL).
	#[error("network error: {0}")]
	Network(String),
}

/// The element views are rendered into.
pub trait MountPoint {
	/// Replaces the element's content with `html`.
	fn set_html(&self, html: &str);

	/// Returns the element's current content.
	fn html(&self) -> String;

	/// Downcasting hook for controllers that need the concrete element
	/// (for example `BrowserMountPoint::element` on `wasm32`).
	fn as_any(&self) -> &dyn Any;
}

/// Stylesheet references attached to the document, keyed by href.
///
/// Implementations must keep at most one reference per href; the
/// [`AssetLoader`](crate::router::AssetLoader) only calls `attach` after
/// `contains` returned `false`.
pub trait StylesheetHost {
	/// Whether a reference keyed by `href` is currently attached.
	fn contains(&self, href: &str) -> bool;

	/// Attaches a reference keyed by `href`.
	fn attach(&self, href: &str);

	/// Removes the reference keyed by `href`.
	fn detach(&self, href: &str);
}

/// Navigation UI around the mount point: the tab strip and the
/// collapsible menu.
pub trait NavigationChrome {
	/// Marks the tab for `route` active and every other tab inactive.
	fn mark_active_tab(&self, route: &str);

	/// Closes the navigation disclosure if it is open. No-op when absent.
	fn close_disclosure(&self);
}

/// The URL fragment, the only routing input.
pub trait Location {
	/// Current fragment including the leading `#`, or `""` when there is none.
	fn hash(&self) -> String;

	/// Sets the fragment, adding a history entry and notifying `hashchange`
	/// listeners. `hash` may be given with or without `#`.
	fn set_hash(&self, hash: &str);

	/// Rewrites the fragment in place: no new history entry, no
	/// notification.
	fn replace_hash(&self, hash: &str);
}

/// Retrieves view HTML.
#[async_trait(?Send)]
pub trait ViewFetcher {
	/// Fetches `src` bypassing any HTTP cache and returns the body text.
	async fn fetch_text(&self, src: &str) -> Result<String, FetchError>;
}

/// Persistent string key-value storage (`localStorage` in the browser).
pub trait KeyValueStore {
	/// Reads `key`.
	fn get(&self, key: &str) -> Option<String>;

	/// Writes `key`. Storage is assumed to be always available.
	fn set(&self, key: &str, value: &str);
}

/// System colour-scheme preference.
pub trait ColorSchemeQuery {
	/// `true` when the system asks for a light colour scheme.
	fn prefers_light(&self) -> bool;
}

/// Presentation state the theme is reflected into.
pub trait ThemeSurface {
	/// Shows `theme`.
	fn apply(&self, theme: Theme);
}

/// The capabilities a [`Router`](crate::router::Router) drives.
#[derive(Clone)]
pub struct RouterServices {
	/// Element that receives view HTML.
	pub mount: Rc<dyn MountPoint>,
	/// Stylesheet references in the document head.
	pub stylesheets: Rc<dyn StylesheetHost>,
	/// Tab strip and disclosure.
	pub chrome: Rc<dyn NavigationChrome>,
	/// HTML source.
	pub fetcher: Rc<dyn ViewFetcher>,
}

impl std::fmt::Debug for RouterServices {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterServices").finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(FetchError::Status(404), "unexpected HTTP status 404")]
	#[case(FetchError::Network("offline".to_string()), "network error: offline")]
	fn test_fetch_error_display(#[case] error: FetchError, #[case] expected: &str) {
		assert_eq!(error.to_string(), expected);
	}
}
