//! `web-sys` implementations of the platform capabilities.
//!
//! All DOM mutation here is best effort: a failed `setAttribute` or a missing
//! element is logged and skipped, never surfaced to the router.

use std::any::Any;

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlDetailsElement, Storage, Window};

use super::{
	ColorSchemeQuery, FetchError, KeyValueStore, Location, MountPoint, NavigationChrome,
	StylesheetHost, ThemeSurface, ViewFetcher,
};
use crate::theme::Theme;
use crate::warn_log;

pub(crate) fn describe(value: &JsValue) -> String {
	value
		.as_string()
		.unwrap_or_else(|| format!("{:?}", value))
}

/// The app root element.
#[derive(Debug, Clone)]
pub struct BrowserMountPoint {
	element: Element,
}

impl BrowserMountPoint {
	/// Looks up the element with `id`.
	pub fn find(document: &Document, id: &str) -> Option<Self> {
		document
			.get_element_by_id(id)
			.map(|element| Self { element })
	}

	/// The underlying element, for controllers that need the DOM.
	pub fn element(&self) -> &Element {
		&self.element
	}
}

impl MountPoint for BrowserMountPoint {
	fn set_html(&self, html: &str) {
		self.element.set_inner_html(html);
	}

	fn html(&self) -> String {
		self.element.inner_html()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// `<link rel="stylesheet">` elements in `document.head`, keyed by an
/// attribute carrying the href (`data-view-css` by default).
#[derive(Debug, Clone)]
pub struct BrowserStylesheets {
	document: Document,
	key_attribute: String,
}

impl BrowserStylesheets {
	/// Creates a host keying links by `key_attribute`.
	pub fn new(document: Document, key_attribute: impl Into<String>) -> Self {
		Self {
			document,
			key_attribute: key_attribute.into(),
		}
	}

	fn find(&self, href: &str) -> Option<Element> {
		let selector = format!(
			"link[{}=\"{}\"]",
			self.key_attribute,
			href.replace('\\', "\\\\").replace('"', "\\\"")
		);
		self.document.query_selector(&selector).ok().flatten()
	}

	fn create_link(&self, href: &str) -> Result<Element, JsValue> {
		let link = self.document.create_element("link")?;
		link.set_attribute("rel", "stylesheet")?;
		link.set_attribute("href", href)?;
		link.set_attribute(&self.key_attribute, href)?;
		Ok(link)
	}
}

impl StylesheetHost for BrowserStylesheets {
	fn contains(&self, href: &str) -> bool {
		self.find(href).is_some()
	}

	fn attach(&self, href: &str) {
		let Some(head) = self.document.head() else {
			warn_log!("no <head>; stylesheet {} not attached", href);
			return;
		};

		let attached = self
			.create_link(href)
			.and_then(|link| head.append_child(&link).map(|_| ()));
		if let Err(error) = attached {
			warn_log!("stylesheet {} not attached: {}", href, describe(&error));
		}
	}

	fn detach(&self, href: &str) {
		if let Some(link) = self.find(href) {
			link.remove();
		}
	}
}

/// Navigation tabs and the collapsible menu.
#[derive(Debug, Clone)]
pub struct BrowserChrome {
	document: Document,
	tab_selector: String,
	tab_route_attribute: String,
	tab_active_class: String,
	disclosure_selector: String,
}

impl BrowserChrome {
	/// Creates chrome over `document` using the given selectors.
	pub fn new(
		document: Document,
		tab_selector: impl Into<String>,
		tab_route_attribute: impl Into<String>,
		tab_active_class: impl Into<String>,
		disclosure_selector: impl Into<String>,
	) -> Self {
		Self {
			document,
			tab_selector: tab_selector.into(),
			tab_route_attribute: tab_route_attribute.into(),
			tab_active_class: tab_active_class.into(),
			disclosure_selector: disclosure_selector.into(),
		}
	}
}

impl NavigationChrome for BrowserChrome {
	fn mark_active_tab(&self, route: &str) {
		let Ok(tabs) = self.document.query_selector_all(&self.tab_selector) else {
			warn_log!("invalid tab selector {}", self.tab_selector);
			return;
		};

		for i in 0..tabs.length() {
			let Some(tab) = tabs.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
				continue;
			};
			let active = tab.get_attribute(&self.tab_route_attribute).as_deref() == Some(route);
			let _ = tab
				.class_list()
				.toggle_with_force(&self.tab_active_class, active);
		}
	}

	fn close_disclosure(&self) {
		let Ok(Some(disclosure)) = self.document.query_selector(&self.disclosure_selector) else {
			return;
		};

		match disclosure.dyn_into::<HtmlDetailsElement>() {
			Ok(details) => details.set_open(false),
			Err(element) => {
				let _ = element.remove_attribute("open");
			}
		}
	}
}

/// `window.location`, with in-place rewrites through `history.replaceState`.
#[derive(Debug, Clone)]
pub struct BrowserLocation {
	window: Window,
}

impl BrowserLocation {
	/// Wraps `window`'s location.
	pub fn new(window: Window) -> Self {
		Self { window }
	}
}

fn fragment(hash: &str) -> String {
	if hash.starts_with('#') {
		hash.to_string()
	} else {
		format!("#{}", hash)
	}
}

impl Location for BrowserLocation {
	fn hash(&self) -> String {
		self.window.location().hash().unwrap_or_default()
	}

	fn set_hash(&self, hash: &str) {
		if let Err(error) = self.window.location().set_hash(&fragment(hash)) {
			warn_log!("location.hash not set: {}", describe(&error));
		}
	}

	fn replace_hash(&self, hash: &str) {
		let replaced = self.window.history().and_then(|history| {
			history.replace_state_with_url(&JsValue::NULL, "", Some(fragment(hash).as_str()))
		});
		if let Err(error) = replaced {
			warn_log!("history.replaceState failed: {}", describe(&error));
		}
	}
}

/// Fetches view HTML relative to the page URL, bypassing HTTP caches.
#[derive(Debug, Clone)]
pub struct BrowserFetcher {
	window: Window,
	client: reqwest::Client,
}

impl BrowserFetcher {
	/// Creates a fetcher resolving sources against `window.location.href`.
	pub fn new(window: Window) -> Self {
		Self {
			window,
			client: reqwest::Client::new(),
		}
	}

	fn resolve(&self, src: &str) -> Result<reqwest::Url, FetchError> {
		let base = self
			.window
			.location()
			.href()
			.map_err(|error| FetchError::Network(describe(&error)))?;
		reqwest::Url::parse(&base)
			.and_then(|base| base.join(src))
			.map_err(|error| FetchError::Network(error.to_string()))
	}
}

#[async_trait(?Send)]
impl ViewFetcher for BrowserFetcher {
	async fn fetch_text(&self, src: &str) -> Result<String, FetchError> {
		let url = self.resolve(src)?;
		let response = self
			.client
			.get(url)
			.header("Cache-Control", "no-cache")
			.header("Pragma", "no-cache")
			.send()
			.await
			.map_err(|error| FetchError::Network(error.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::Status(status.as_u16()));
		}

		response
			.text()
			.await
			.map_err(|error| FetchError::Network(error.to_string()))
	}
}

/// `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
	storage: Storage,
}

impl LocalStorage {
	/// Returns `None` when the browser denies storage access.
	pub fn new(window: &Window) -> Option<Self> {
		window
			.local_storage()
			.ok()
			.flatten()
			.map(|storage| Self { storage })
	}
}

impl KeyValueStore for LocalStorage {
	fn get(&self, key: &str) -> Option<String> {
		self.storage.get_item(key).ok().flatten()
	}

	fn set(&self, key: &str, value: &str) {
		if let Err(error) = self.storage.set_item(key, value) {
			warn_log!("localStorage.setItem({}) failed: {}", key, describe(&error));
		}
	}
}

/// `matchMedia("(prefers-color-scheme: light)")`.
#[derive(Debug, Clone)]
pub struct MediaColorScheme {
	window: Window,
}

impl MediaColorScheme {
	/// Queries `window`.
	pub fn new(window: Window) -> Self {
		Self { window }
	}
}

impl ColorSchemeQuery for MediaColorScheme {
	fn prefers_light(&self) -> bool {
		self.window
			.match_media("(prefers-color-scheme: light)")
			.ok()
			.flatten()
			.is_some_and(|query| query.matches())
	}
}

/// Body class plus toggle button `aria-pressed` / `data-theme`.
#[derive(Debug, Clone)]
pub struct BrowserThemeSurface {
	body: Option<Element>,
	button: Element,
	light_mode_class: String,
}

impl BrowserThemeSurface {
	/// Creates a surface for `button`; returns `None` when there is no
	/// toggle button with `button_id`.
	pub fn find(
		document: &Document,
		button_id: &str,
		light_mode_class: impl Into<String>,
	) -> Option<Self> {
		let button = document.get_element_by_id(button_id)?;
		Some(Self {
			body: document.body().map(Into::into),
			button,
			light_mode_class: light_mode_class.into(),
		})
	}

	/// The toggle button.
	pub fn button(&self) -> &Element {
		&self.button
	}
}

impl ThemeSurface for BrowserThemeSurface {
	fn apply(&self, theme: Theme) {
		if let Some(body) = &self.body {
			let _ = body
				.class_list()
				.toggle_with_force(&self.light_mode_class, theme.is_light());
		}

		let pressed = theme.is_light().to_string();
		if let Err(error) = self
			.button
			.set_attribute("aria-pressed", &pressed)
			.and_then(|_| self.button.set_attribute("data-theme", theme.as_str()))
		{
			warn_log!("theme toggle not updated: {}", describe(&error));
		}
	}
}
