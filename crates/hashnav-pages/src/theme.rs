//! Light/dark theme toggle.
//!
//! The preference is persisted under a single storage key. Without a stored
//! value the system colour-scheme preference decides the initial theme.
//!
//! ```ignore
//! let toggle = ThemeToggle::setup(store, scheme, surface, "gw2toolbox.theme");
//! toggle.toggle(); // flips, applies, persists
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::platform::{ColorSchemeQuery, KeyValueStore, ThemeSurface};

/// One of the two supported themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
	/// Light colour scheme.
	Light,
	/// Dark colour scheme.
	Dark,
}

impl Theme {
	/// The stored representation, `"light"` or `"dark"`.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}

	/// The other theme.
	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}

	/// Whether this is [`Theme::Light`].
	pub fn is_light(self) -> bool {
		self == Self::Light
	}
}

impl fmt::Display for Theme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A stored value that is neither `"light"` nor `"dark"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0:?}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
	type Err = UnknownTheme;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"light" => Ok(Self::Light),
			"dark" => Ok(Self::Dark),
			other => Err(UnknownTheme(other.to_string())),
		}
	}
}

/// Owns the current theme and keeps storage and presentation in sync with it.
pub struct ThemeToggle {
	store: Rc<dyn KeyValueStore>,
	surface: Rc<dyn ThemeSurface>,
	key: String,
	current: Cell<Theme>,
}

impl fmt::Debug for ThemeToggle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ThemeToggle")
			.field("key", &self.key)
			.field("current", &self.current.get())
			.finish()
	}
}

impl ThemeToggle {
	/// Resolves the initial theme, applies it and persists it.
	pub fn setup(
		store: Rc<dyn KeyValueStore>,
		scheme: &dyn ColorSchemeQuery,
		surface: Rc<dyn ThemeSurface>,
		key: impl Into<String>,
	) -> Self {
		let key = key.into();
		let initial = initial_theme(store.as_ref(), scheme, &key);
		let toggle = Self {
			store,
			surface,
			key,
			current: Cell::new(initial),
		};
		toggle.apply();
		toggle
	}

	/// The theme currently applied.
	pub fn current(&self) -> Theme {
		self.current.get()
	}

	/// Flips the theme, applies and persists it, and returns the new value.
	pub fn toggle(&self) -> Theme {
		let next = self.current.get().toggled();
		self.current.set(next);
		self.apply();
		next
	}

	fn apply(&self) {
		let theme = self.current.get();
		self.surface.apply(theme);
		self.store.set(&self.key, theme.as_str());
	}
}

/// Stored value when valid, otherwise the system preference.
fn initial_theme(store: &dyn KeyValueStore, scheme: &dyn ColorSchemeQuery, key: &str) -> Theme {
	if let Some(theme) = store.get(key).and_then(|stored| stored.parse().ok()) {
		return theme;
	}

	if scheme.prefers_light() {
		Theme::Light
	} else {
		Theme::Dark
	}
}
