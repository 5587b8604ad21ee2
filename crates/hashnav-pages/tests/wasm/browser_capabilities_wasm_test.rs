//! Browser tests for the `web-sys` capabilities
//!
//! Run with `wasm-pack test --headless --chrome crates/hashnav-pages`.

#[cfg(target_arch = "wasm32")]
mod browser_tests {
	use std::rc::Rc;

	use hashnav_pages::launcher::{ClientLauncher, LaunchError};
	use hashnav_pages::platform::browser::{
		BrowserChrome, BrowserLocation, BrowserMountPoint, BrowserStylesheets,
		BrowserThemeSurface, LocalStorage,
	};
	use hashnav_pages::platform::{
		KeyValueStore, Location, MountPoint, NavigationChrome, StylesheetHost, ThemeSurface,
	};
	use hashnav_pages::router::{AssetLoader, ViewRegistry};
	use hashnav_pages::theme::Theme;
	use wasm_bindgen_test::*;
	use web_sys::{Document, Element, Window};

	wasm_bindgen_test_configure!(run_in_browser);

	fn window() -> Window {
		web_sys::window().unwrap()
	}

	fn document() -> Document {
		window().document().unwrap()
	}

	fn mount(html: &str) -> Element {
		let document = document();
		let container = document.create_element("div").unwrap();
		container.set_inner_html(html);
		document.body().unwrap().append_child(&container).unwrap();
		container
	}

	fn link_count(href: &str) -> u32 {
		document()
			.query_selector_all(&format!("link[data-view-css=\"{}\"]", href))
			.unwrap()
			.length()
	}

	#[wasm_bindgen_test]
	fn test_stylesheet_attached_once_and_removed() {
		let host = Rc::new(BrowserStylesheets::new(document(), "data-view-css"));
		let loader = AssetLoader::new(host.clone());

		loader.load_css("css/wasm-a.css");
		loader.load_css("css/wasm-a.css");
		assert_eq!(link_count("css/wasm-a.css"), 1);
		assert!(host.contains("css/wasm-a.css"));

		let link = document()
			.query_selector("link[data-view-css=\"css/wasm-a.css\"]")
			.unwrap()
			.unwrap();
		assert_eq!(link.get_attribute("rel").as_deref(), Some("stylesheet"));

		loader.unload_css("css/wasm-a.css");
		loader.unload_css("css/wasm-a.css");
		assert_eq!(link_count("css/wasm-a.css"), 0);
	}

	#[wasm_bindgen_test]
	fn test_mount_point_swaps_content() {
		let container = mount("<section id=\"wasm-app\"><p>old</p></section>");
		let root = BrowserMountPoint::find(&document(), "wasm-app").unwrap();

		root.set_html("<h1>About</h1>");

		assert_eq!(root.html(), "<h1>About</h1>");
		assert_eq!(root.element().id(), "wasm-app");
		assert!(BrowserMountPoint::find(&document(), "wasm-missing").is_none());
		container.remove();
	}

	#[wasm_bindgen_test]
	fn test_chrome_marks_tab_and_closes_disclosure() {
		let container = mount(
			"<details class=\"wasm-dropdown\" open>\
			 <button class=\"wasm-tab\" data-route=\"/achievements\"></button>\
			 <button class=\"wasm-tab\" data-route=\"/about\"></button>\
			 </details>",
		);
		let chrome = BrowserChrome::new(
			document(),
			".wasm-tab",
			"data-route",
			"active",
			".wasm-dropdown[open]",
		);

		chrome.mark_active_tab("/about");
		chrome.close_disclosure();
		chrome.close_disclosure();

		let active = document().query_selector_all(".wasm-tab.active").unwrap();
		assert_eq!(active.length(), 1);
		let about = document()
			.query_selector(".wasm-tab[data-route=\"/about\"]")
			.unwrap()
			.unwrap();
		assert!(about.class_list().contains("active"));
		let details = document().query_selector(".wasm-dropdown").unwrap().unwrap();
		assert!(!details.has_attribute("open"));
		container.remove();
	}

	#[wasm_bindgen_test]
	fn test_replace_hash_keeps_history_length() {
		let location = BrowserLocation::new(window());
		let history = window().history().unwrap();
		let before = history.length().unwrap();

		location.replace_hash("#/wasm-replaced");

		assert_eq!(location.hash(), "#/wasm-replaced");
		assert_eq!(history.length().unwrap(), before);
	}

	#[wasm_bindgen_test]
	fn test_theme_surface_reflects_theme() {
		let container = mount("<button id=\"wasm-theme-toggle\"></button>");
		let surface =
			BrowserThemeSurface::find(&document(), "wasm-theme-toggle", "wasm-light").unwrap();
		let body = document().body().unwrap();

		surface.apply(Theme::Light);
		assert!(body.class_list().contains("wasm-light"));
		assert_eq!(
			surface.button().get_attribute("aria-pressed").as_deref(),
			Some("true")
		);

		surface.apply(Theme::Dark);
		assert!(!body.class_list().contains("wasm-light"));
		assert_eq!(
			surface.button().get_attribute("data-theme").as_deref(),
			Some("dark")
		);
		container.remove();
	}

	#[wasm_bindgen_test]
	fn test_local_storage_round_trip() {
		let storage = LocalStorage::new(&window()).unwrap();

		storage.set("hashnav.wasm-test", "dark");

		assert_eq!(storage.get("hashnav.wasm-test").as_deref(), Some("dark"));
		assert_eq!(storage.get("hashnav.wasm-missing"), None);
	}

	#[wasm_bindgen_test]
	fn test_launch_without_mount_point_leaves_theme_untouched() {
		let container = mount("<button id=\"wasm-launch-toggle\"></button>");
		let settings = r#"
fallback_route = "/about"
app_root = "wasm-launch-missing"
theme_toggle_id = "wasm-launch-toggle"
theme_storage_key = "hashnav.wasm-launch"
light_mode_class = "wasm-launch-light"

[routes."/about"]
html = "views/about.html"
"#;

		let result = ClientLauncher::from_toml(settings, ViewRegistry::new())
			.unwrap()
			.launch();

		assert!(matches!(
			result,
			Err(LaunchError::MissingMountPoint(ref id)) if id == "wasm-launch-missing"
		));
		let button = document().get_element_by_id("wasm-launch-toggle").unwrap();
		assert!(!button.has_attribute("aria-pressed"));
		assert!(!button.has_attribute("data-theme"));
		let storage = LocalStorage::new(&window()).unwrap();
		assert_eq!(storage.get("hashnav.wasm-launch"), None);
		container.remove();
	}
}
