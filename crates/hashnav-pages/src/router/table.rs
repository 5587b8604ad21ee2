//! Route table and route normalization.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::ConfigError;

/// What a route renders: an HTML fragment, its stylesheets and an optional
/// controller module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewDefinition {
	/// Location of the HTML fragment.
	pub html: String,
	/// Stylesheet hrefs, attached in order.
	#[serde(default)]
	pub css: Vec<String>,
	/// Identifier of the controller in the [`ViewRegistry`](super::ViewRegistry).
	#[serde(default)]
	pub module: Option<String>,
}

impl ViewDefinition {
	/// A view with no stylesheets and no controller.
	pub fn new(html: impl Into<String>) -> Self {
		Self {
			html: html.into(),
			css: Vec::new(),
			module: None,
		}
	}

	/// Appends a stylesheet href.
	pub fn css(mut self, href: impl Into<String>) -> Self {
		self.css.push(href.into());
		self
	}

	/// Sets the controller module identifier.
	pub fn module(mut self, id: impl Into<String>) -> Self {
		self.module = Some(id.into());
		self
	}
}

/// Immutable mapping from route path to [`ViewDefinition`], with a fallback
/// route that is guaranteed to be one of its keys.
#[derive(Debug, Clone)]
pub struct RouteTable {
	routes: Vec<(String, ViewDefinition)>,
	index: HashMap<String, usize>,
	fallback: String,
}

impl RouteTable {
	/// Builds a table from `(path, definition)` pairs.
	///
	/// Later duplicates of a path replace earlier ones. Fails when the table
	/// is empty or `fallback` is not one of the paths.
	pub fn new<I, P>(routes: I, fallback: impl Into<String>) -> Result<Self, ConfigError>
	where
		I: IntoIterator<Item = (P, ViewDefinition)>,
		P: Into<String>,
	{
		let mut table = Self {
			routes: Vec::new(),
			index: HashMap::new(),
			fallback: fallback.into(),
		};

		for (path, definition) in routes {
			let path = path.into();
			match table.index.get(&path) {
				Some(&i) => table.routes[i].1 = definition,
				None => {
					table.index.insert(path.clone(), table.routes.len());
					table.routes.push((path, definition));
				}
			}
		}

		if table.routes.is_empty() {
			return Err(ConfigError::EmptyRouteTable);
		}
		if !table.index.contains_key(&table.fallback) {
			return Err(ConfigError::UnknownFallback(table.fallback));
		}

		Ok(table)
	}

	/// The route unknown or empty input resolves to.
	pub fn fallback(&self) -> &str {
		&self.fallback
	}

	/// The fallback route in fragment form, e.g. `#/achievements`.
	pub fn fallback_hash(&self) -> String {
		format!("#{}", self.fallback)
	}

	/// Looks up the definition for `path`.
	pub fn get(&self, path: &str) -> Option<&ViewDefinition> {
		self.index.get(path).map(|&i| &self.routes[i].1)
	}

	/// Whether `path` is a key of the table.
	pub fn contains(&self, path: &str) -> bool {
		self.index.contains_key(path)
	}

	/// Route paths in registration order.
	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.routes.iter().map(|(path, _)| path.as_str())
	}

	/// Number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Always `false`; construction rejects empty tables.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Resolves raw input to a valid route: known keys pass through,
	/// everything else (including empty or absent input) becomes the fallback.
	pub fn normalize<'a>(&'a self, raw: Option<&'a str>) -> &'a str {
		match raw {
			Some(route) if self.contains(route) => route,
			_ => &self.fallback,
		}
	}
}
