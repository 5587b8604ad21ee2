//! In-memory capabilities.
//!
//! Every [`platform`](crate::platform) trait has a recording implementation
//! here, so the router, the navigation controller and the theme toggle run
//! natively without a browser. [`TestHost`] bundles one of each.
//!
//! ```ignore
//! let host = TestHost::new();
//! host.fetcher.respond("views/about.html", "<p>About</p>");
//! let router = Router::new(table, ViewRegistry::new(), host.services());
//! router.load_view("/about").await?;
//! assert_eq!(host.mount.html(), "<p>About</p>");
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::platform::{
	ColorSchemeQuery, FetchError, KeyValueStore, Location, MountPoint, NavigationChrome,
	RouterServices, StylesheetHost, ThemeSurface, ViewFetcher,
};
use crate::theme::Theme;

/// Mount point backed by a string.
#[derive(Debug, Default)]
pub struct MemoryMountPoint {
	html: RefCell<String>,
	writes: Cell<usize>,
}

impl MemoryMountPoint {
	/// Creates an empty mount point.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of `set_html` calls so far.
	pub fn writes(&self) -> usize {
		self.writes.get()
	}
}

impl MountPoint for MemoryMountPoint {
	fn set_html(&self, html: &str) {
		*self.html.borrow_mut() = html.to_string();
		self.writes.set(self.writes.get() + 1);
	}

	fn html(&self) -> String {
		self.html.borrow().clone()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// A change recorded by [`MemoryStylesheets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetEvent {
	/// A reference was attached.
	Attached(String),
	/// A reference was detached.
	Detached(String),
}

/// Stylesheet host that records every attach and detach.
///
/// Unlike the browser host it does not deduplicate: attaching an href twice
/// yields two references, which is how tests catch a loader that skips the
/// `contains` check.
#[derive(Debug, Default)]
pub struct MemoryStylesheets {
	attached: RefCell<Vec<String>>,
	events: RefCell<Vec<StylesheetEvent>>,
}

impl MemoryStylesheets {
	/// Creates a host with nothing attached.
	pub fn new() -> Self {
		Self::default()
	}

	/// Attached hrefs in attach order.
	pub fn attached(&self) -> Vec<String> {
		self.attached.borrow().clone()
	}

	/// Number of references attached for `href`.
	pub fn count(&self, href: &str) -> usize {
		self.attached.borrow().iter().filter(|h| *h == href).count()
	}

	/// Whether at least one reference for `href` is attached.
	pub fn is_attached(&self, href: &str) -> bool {
		self.count(href) > 0
	}

	/// Every attach/detach so far.
	pub fn events(&self) -> Vec<StylesheetEvent> {
		self.events.borrow().clone()
	}

	/// Whether `href` was ever detached.
	pub fn was_detached(&self, href: &str) -> bool {
		self.events
			.borrow()
			.iter()
			.any(|event| matches!(event, StylesheetEvent::Detached(h) if h == href))
	}
}

impl StylesheetHost for MemoryStylesheets {
	fn contains(&self, href: &str) -> bool {
		self.is_attached(href)
	}

	fn attach(&self, href: &str) {
		self.attached.borrow_mut().push(href.to_string());
		self.events
			.borrow_mut()
			.push(StylesheetEvent::Attached(href.to_string()));
	}

	fn detach(&self, href: &str) {
		self.attached.borrow_mut().retain(|h| h != href);
		self.events
			.borrow_mut()
			.push(StylesheetEvent::Detached(href.to_string()));
	}
}

/// Tab strip and disclosure state.
#[derive(Debug, Default)]
pub struct MemoryChrome {
	tabs: RefCell<Vec<(String, bool)>>,
	disclosure_open: Cell<bool>,
}

impl MemoryChrome {
	/// Creates chrome with one tab per route in `routes`, none active.
	pub fn with_tabs<I, S>(routes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			tabs: RefCell::new(routes.into_iter().map(|r| (r.into(), false)).collect()),
			disclosure_open: Cell::new(false),
		}
	}

	/// Routes whose tab is marked active.
	pub fn active_tabs(&self) -> Vec<String> {
		self.tabs
			.borrow()
			.iter()
			.filter(|(_, active)| *active)
			.map(|(route, _)| route.clone())
			.collect()
	}

	/// Opens the disclosure, as a user click would.
	pub fn open_disclosure(&self) {
		self.disclosure_open.set(true);
	}

	/// Whether the disclosure is open.
	pub fn disclosure_open(&self) -> bool {
		self.disclosure_open.get()
	}
}

impl NavigationChrome for MemoryChrome {
	fn mark_active_tab(&self, route: &str) {
		for (tab_route, active) in self.tabs.borrow_mut().iter_mut() {
			*active = tab_route.as_str() == route;
		}
	}

	fn close_disclosure(&self) {
		self.disclosure_open.set(false);
	}
}

/// Location fragment with a history stack, held in memory.
#[derive(Debug)]
pub struct MemoryLocation {
	history: RefCell<Vec<String>>,
}

impl Default for MemoryLocation {
	fn default() -> Self {
		Self {
			history: RefCell::new(vec![String::new()]),
		}
	}
}

impl MemoryLocation {
	/// Creates a location with no fragment and one history entry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of history entries.
	pub fn history_len(&self) -> usize {
		self.history.borrow().len()
	}

	fn fragment(hash: &str) -> String {
		match hash {
			"" | "#" => String::new(),
			h if h.starts_with('#') => h.to_string(),
			h => format!("#{}", h),
		}
	}
}

impl Location for MemoryLocation {
	fn hash(&self) -> String {
		self.history.borrow().last().cloned().unwrap_or_default()
	}

	fn set_hash(&self, hash: &str) {
		self.history.borrow_mut().push(Self::fragment(hash));
	}

	fn replace_hash(&self, hash: &str) {
		let fragment = Self::fragment(hash);
		let mut history = self.history.borrow_mut();
		match history.last_mut() {
			Some(last) => *last = fragment,
			None => history.push(fragment),
		}
	}
}

/// Fetcher answering from a table of canned responses.
///
/// Unknown sources answer with status 404. A source can be held with
/// [`MemoryFetcher::hold`]: requests for it stay pending until
/// [`MemoryFetcher::release`], which is how tests interleave navigations.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
	responses: RefCell<HashMap<String, Result<String, FetchError>>>,
	held: RefCell<HashSet<String>>,
	waiting: RefCell<HashMap<String, Vec<oneshot::Sender<Result<String, FetchError>>>>>,
	requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
	/// Creates a fetcher with no responses.
	pub fn new() -> Self {
		Self::default()
	}

	/// Answers `src` with `body`.
	pub fn respond(&self, src: &str, body: &str) {
		self.responses
			.borrow_mut()
			.insert(src.to_string(), Ok(body.to_string()));
	}

	/// Answers `src` with `error`.
	pub fn fail(&self, src: &str, error: FetchError) {
		self.responses
			.borrow_mut()
			.insert(src.to_string(), Err(error));
	}

	/// Keeps future requests for `src` pending until released.
	pub fn hold(&self, src: &str) {
		self.held.borrow_mut().insert(src.to_string());
	}

	/// Completes every pending request for `src` with its canned response and
	/// stops holding it. Returns the number of requests completed.
	pub fn release(&self, src: &str) -> usize {
		self.held.borrow_mut().remove(src);
		let waiting = self.waiting.borrow_mut().remove(src).unwrap_or_default();
		let response = self.response_for(src);

		let count = waiting.len();
		for sender in waiting {
			let _ = sender.send(response.clone());
		}
		count
	}

	/// Every source requested so far, in request order.
	pub fn requests(&self) -> Vec<String> {
		self.requests.borrow().clone()
	}

	fn response_for(&self, src: &str) -> Result<String, FetchError> {
		self.responses
			.borrow()
			.get(src)
			.cloned()
			.unwrap_or(Err(FetchError::Status(404)))
	}
}

#[async_trait(?Send)]
impl ViewFetcher for MemoryFetcher {
	async fn fetch_text(&self, src: &str) -> Result<String, FetchError> {
		self.requests.borrow_mut().push(src.to_string());

		let held = self.held.borrow().contains(src);
		if !held {
			return self.response_for(src);
		}

		let (sender, receiver) = oneshot::channel();
		self.waiting
			.borrow_mut()
			.entry(src.to_string())
			.or_default()
			.push(sender);
		receiver
			.await
			.unwrap_or_else(|_| Err(FetchError::Network("request dropped".to_string())))
	}
}

/// Key-value store held in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}
}

impl KeyValueStore for MemoryStorage {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		self.entries
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
	}
}

/// Colour-scheme query with a fixed answer; `FixedColorScheme(true)` prefers light.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedColorScheme(pub bool);

impl ColorSchemeQuery for FixedColorScheme {
	fn prefers_light(&self) -> bool {
		self.0
	}
}

/// Theme presentation mirroring the browser surface's three outputs.
#[derive(Debug, Default)]
pub struct MemoryThemeSurface {
	applied: RefCell<Vec<Theme>>,
	light_mode: Cell<bool>,
	pressed: RefCell<String>,
	data_theme: RefCell<String>,
}

impl MemoryThemeSurface {
	/// Creates a surface nothing has been applied to.
	pub fn new() -> Self {
		Self::default()
	}

	/// Every theme applied, in order.
	pub fn applied(&self) -> Vec<Theme> {
		self.applied.borrow().clone()
	}

	/// Whether the light-mode class is set on the body.
	pub fn light_mode(&self) -> bool {
		self.light_mode.get()
	}

	/// The toggle button's `aria-pressed` value.
	pub fn pressed(&self) -> String {
		self.pressed.borrow().clone()
	}

	/// The toggle button's `data-theme` value.
	pub fn data_theme(&self) -> String {
		self.data_theme.borrow().clone()
	}
}

impl ThemeSurface for MemoryThemeSurface {
	fn apply(&self, theme: Theme) {
		self.applied.borrow_mut().push(theme);
		self.light_mode.set(theme.is_light());
		*self.pressed.borrow_mut() = theme.is_light().to_string();
		*self.data_theme.borrow_mut() = theme.as_str().to_string();
	}
}

/// One of each in-memory capability.
#[derive(Debug, Clone)]
pub struct TestHost {
	/// App root.
	pub mount: Rc<MemoryMountPoint>,
	/// Document head stylesheets.
	pub stylesheets: Rc<MemoryStylesheets>,
	/// Tabs `/achievements` and `/about` plus the disclosure.
	pub chrome: Rc<MemoryChrome>,
	/// HTML source.
	pub fetcher: Rc<MemoryFetcher>,
	/// Location fragment, initially empty.
	pub location: Rc<MemoryLocation>,
	/// Local storage.
	pub storage: Rc<MemoryStorage>,
}

impl Default for TestHost {
	fn default() -> Self {
		Self::new()
	}
}

impl TestHost {
	/// Creates a host whose chrome has tabs for `/achievements` and `/about`.
	pub fn new() -> Self {
		Self::with_tabs(["/achievements", "/about"])
	}

	/// Creates a host whose chrome has one tab per route in `routes`.
	pub fn with_tabs<I, S>(routes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			mount: Rc::new(MemoryMountPoint::new()),
			stylesheets: Rc::new(MemoryStylesheets::new()),
			chrome: Rc::new(MemoryChrome::with_tabs(routes)),
			fetcher: Rc::new(MemoryFetcher::new()),
			location: Rc::new(MemoryLocation::new()),
			storage: Rc::new(MemoryStorage::new()),
		}
	}

	/// The router-facing capabilities.
	pub fn services(&self) -> RouterServices {
		RouterServices {
			mount: self.mount.clone(),
			stylesheets: self.stylesheets.clone(),
			chrome: self.chrome.clone(),
			fetcher: self.fetcher.clone(),
		}
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", "")]
	#[case("#", "")]
	#[case("/about", "#/about")]
	#[case("#/about", "#/about")]
	fn test_memory_location_normalizes_marker(#[case] input: &str, #[case] expected: &str) {
		let location = MemoryLocation::new();
		location.set_hash(input);
		assert_eq!(location.hash(), expected);
	}

	#[rstest]
	fn test_memory_location_replace_keeps_history_length() {
		let location = MemoryLocation::new();

		location.replace_hash("/achievements");
		assert_eq!(location.history_len(), 1);

		location.set_hash("/about");
		location.replace_hash("#/settings");
		assert_eq!(location.history_len(), 2);
		assert_eq!(location.hash(), "#/settings");
	}

	#[rstest]
	fn test_mount_point_downcasts_to_concrete_type() {
		let root: Rc<dyn MountPoint> = Rc::new(MemoryMountPoint::new());
		root.set_html("<p>hi</p>");

		let concrete = root.as_any().downcast_ref::<MemoryMountPoint>().unwrap();

		assert_eq!(concrete.writes(), 1);
		assert!(root.as_any().downcast_ref::<MemoryChrome>().is_none());
	}

	#[rstest]
	fn test_chrome_marks_exactly_one_tab() {
		let chrome = MemoryChrome::with_tabs(["/a", "/b", "/c"]);

		chrome.mark_active_tab("/b");
		assert_eq!(chrome.active_tabs(), vec!["/b".to_string()]);

		chrome.mark_active_tab("/c");
		assert_eq!(chrome.active_tabs(), vec!["/c".to_string()]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_fetcher_unknown_source_is_404() {
		let fetcher = MemoryFetcher::new();
		assert_eq!(fetcher.fetch_text("nope.html").await, Err(FetchError::Status(404)));
		assert_eq!(fetcher.requests(), vec!["nope.html".to_string()]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_fetcher_hold_and_release() {
		let fetcher = MemoryFetcher::new();
		fetcher.respond("a.html", "A");
		fetcher.hold("a.html");

		let mut pending = std::pin::pin!(fetcher.fetch_text("a.html"));
		assert!(futures::poll!(pending.as_mut()).is_pending());

		assert_eq!(fetcher.release("a.html"), 1);
		assert_eq!(pending.await, Ok("A".to_string()));
	}
}
