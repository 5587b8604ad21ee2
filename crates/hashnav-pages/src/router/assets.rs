//! Per-view stylesheet management.
//!
//! Stylesheets are identified by their href. Attaching is idempotent, so the
//! loader can pre-load a view's stylesheets without checking what the
//! previous view left behind.

use std::rc::Rc;

use crate::platform::StylesheetHost;

/// Idempotent attach/detach of stylesheet references keyed by href.
#[derive(Clone)]
pub struct AssetLoader {
	host: Rc<dyn StylesheetHost>,
}

impl std::fmt::Debug for AssetLoader {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AssetLoader").finish_non_exhaustive()
	}
}

impl AssetLoader {
	/// Creates a loader over `host`.
	pub fn new(host: Rc<dyn StylesheetHost>) -> Self {
		Self { host }
	}

	/// Attaches `href` unless it is already attached.
	pub fn load_css(&self, href: &str) {
		if self.host.contains(href) {
			return;
		}
		self.host.attach(href);
	}

	/// Detaches `href` if attached.
	pub fn unload_css(&self, href: &str) {
		if self.host.contains(href) {
			self.host.detach(href);
		}
	}

	/// Whether `href` is attached.
	pub fn is_loaded(&self, href: &str) -> bool {
		self.host.contains(href)
	}
}
