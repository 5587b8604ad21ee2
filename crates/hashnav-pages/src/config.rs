//! Router settings.
//!
//! Settings are plain TOML, usually embedded with `include_str!` next to the
//! WASM entry point:
//!
//! ```toml
//! fallback_route = "/achievements"
//!
//! [routes."/achievements"]
//! html = "views/achievements.html"
//! css = ["css/achievements.css", "css/paginator.css"]
//! module = "achievements"
//!
//! [routes."/about"]
//! html = "views/about.html"
//! ```
//!
//! Every DOM hook (mount point id, selectors, attribute names) has a default
//! matching the stock page layout and can be overridden at the top level.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::router::{RouteTable, ViewDefinition};

/// Configuration error
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The settings are not valid TOML or do not match the schema.
	#[error("Invalid router settings: {0}")]
	Parse(#[from] toml::de::Error),

	/// The fallback route is not one of the configured routes.
	#[error("Fallback route {0:?} is not a configured route")]
	UnknownFallback(String),

	/// No routes are configured.
	#[error("Route table is empty")]
	EmptyRouteTable,
}

fn default_app_root() -> String {
	"app".to_string()
}

fn default_tab_selector() -> String {
	".tab".to_string()
}

fn default_tab_route_attribute() -> String {
	"data-route".to_string()
}

fn default_tab_active_class() -> String {
	"active".to_string()
}

fn default_disclosure_selector() -> String {
	".navbar-dropdown[open]".to_string()
}

fn default_stylesheet_key_attribute() -> String {
	"data-view-css".to_string()
}

fn default_theme_toggle_id() -> String {
	"themeToggle".to_string()
}

fn default_theme_storage_key() -> String {
	"gw2toolbox.theme".to_string()
}

fn default_light_mode_class() -> String {
	"light-mode".to_string()
}

/// Router, DOM hook and theme settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouterSettings {
	/// Route unknown or empty fragments resolve to.
	pub fallback_route: String,

	/// Route path to view definition, in file order.
	pub routes: IndexMap<String, ViewDefinition>,

	/// `id` of the mount point element.
	#[serde(default = "default_app_root")]
	pub app_root: String,

	/// Selector matching the navigation tabs.
	#[serde(default = "default_tab_selector")]
	pub tab_selector: String,

	/// Tab attribute holding the tab's route (`data-route="/about"`).
	#[serde(default = "default_tab_route_attribute")]
	pub tab_route_attribute: String,

	/// Class marking the active tab.
	#[serde(default = "default_tab_active_class")]
	pub tab_active_class: String,

	/// Selector matching the navigation disclosure while it is open.
	#[serde(default = "default_disclosure_selector")]
	pub disclosure_selector: String,

	/// Attribute keying view stylesheet links by href.
	#[serde(default = "default_stylesheet_key_attribute")]
	pub stylesheet_key_attribute: String,

	/// `id` of the theme toggle button.
	#[serde(default = "default_theme_toggle_id")]
	pub theme_toggle_id: String,

	/// Storage key of the theme preference.
	#[serde(default = "default_theme_storage_key")]
	pub theme_storage_key: String,

	/// Body class set while the light theme is active.
	#[serde(default = "default_light_mode_class")]
	pub light_mode_class: String,
}

impl RouterSettings {
	/// Parses settings from TOML.
	///
	/// The route table is validated as part of parsing, so settings that
	/// parse always yield a route table.
	pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
		let settings: Self = toml::from_str(source)?;
		settings.route_table()?;
		Ok(settings)
	}

	/// Builds the route table.
	pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
		RouteTable::new(
			self.routes
				.iter()
				.map(|(path, definition)| (path.clone(), definition.clone())),
			self.fallback_route.clone(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	const SETTINGS: &str = r#"
fallback_route = "/achievements"

[routes."/achievements"]
html = "views/achievements.html"
css = ["css/achievements.css", "css/paginator.css"]
module = "achievements"

[routes."/about"]
html = "views/about.html"
"#;

	#[rstest]
	fn test_from_toml_applies_defaults() {
		let settings = RouterSettings::from_toml(SETTINGS).unwrap();

		assert_eq!(settings.app_root, "app");
		assert_eq!(settings.tab_selector, ".tab");
		assert_eq!(settings.tab_route_attribute, "data-route");
		assert_eq!(settings.tab_active_class, "active");
		assert_eq!(settings.disclosure_selector, ".navbar-dropdown[open]");
		assert_eq!(settings.stylesheet_key_attribute, "data-view-css");
		assert_eq!(settings.theme_toggle_id, "themeToggle");
		assert_eq!(settings.theme_storage_key, "gw2toolbox.theme");
		assert_eq!(settings.light_mode_class, "light-mode");
	}

	#[rstest]
	fn test_route_definitions() {
		let table = RouterSettings::from_toml(SETTINGS)
			.unwrap()
			.route_table()
			.unwrap();

		let about = table.get("/about").unwrap();
		assert!(about.css.is_empty());
		assert!(about.module.is_none());

		let achievements = table.get("/achievements").unwrap();
		assert_eq!(
			achievements.css,
			vec!["css/achievements.css", "css/paginator.css"]
		);
		assert_eq!(achievements.module.as_deref(), Some("achievements"));
		assert_eq!(table.fallback(), "/achievements");
	}

	#[rstest]
	fn test_route_table_keeps_file_order() {
		let source = format!("{}\n[routes.\"/builds\"]\nhtml = \"views/builds.html\"\n", SETTINGS);

		let table = RouterSettings::from_toml(&source)
			.unwrap()
			.route_table()
			.unwrap();

		assert_eq!(
			table.paths().collect::<Vec<_>>(),
			vec!["/achievements", "/about", "/builds"]
		);
	}

	#[rstest]
	fn test_overrides() {
		let source = format!("app_root = \"main\"\ntheme_storage_key = \"site.theme\"\n{}", SETTINGS);

		let settings = RouterSettings::from_toml(&source).unwrap();

		assert_eq!(settings.app_root, "main");
		assert_eq!(settings.theme_storage_key, "site.theme");
	}

	#[rstest]
	fn test_unknown_fallback() {
		let source = SETTINGS.replace(
			"fallback_route = \"/achievements\"",
			"fallback_route = \"/home\"",
		);

		let error = RouterSettings::from_toml(&source).unwrap_err();

		assert!(matches!(error, ConfigError::UnknownFallback(route) if route == "/home"));
	}

	#[rstest]
	fn test_empty_routes() {
		let error = RouterSettings::from_toml("fallback_route = \"/\"\n[routes]\n").unwrap_err();
		assert!(matches!(error, ConfigError::EmptyRouteTable));
	}

	#[rstest]
	#[case("routes = 3\nfallback_route = \"/\"")]
	#[case("[routes.\"/a\"]\nhtml = \"a.html\"")]
	#[case("fallback_route = \"/a\"\n[routes.\"/a\"]\ncss = []")]
	fn test_malformed_settings(#[case] source: &str) {
		let error = RouterSettings::from_toml(source).unwrap_err();
		assert!(matches!(error, ConfigError::Parse(_)));
	}
}
