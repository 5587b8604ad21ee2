//! Logging macros for hashnav-pages
//!
//! The router runs inside the browser event loop, so log lines go to the
//! developer console on `wasm32` and to stderr everywhere else (native unit
//! and integration tests). Every macro compiles to nothing in release builds.
//!
//! | Macro | Debug Assertions | Feature Required | WASM | Non-WASM |
//! |-------|------------------|------------------|------|----------|
//! | `debug_log!` | Required | `debug-hooks` | `console.debug` | `eprintln!` |
//! | `info_log!` | Required | None | `console.info` | `eprintln!` |
//! | `warn_log!` | Required | None | `console.warn` | `eprintln!` |
//! | `error_log!` | Required | None | `console.error` | `eprintln!` |
//!
//! ## Example
//!
//! ```ignore
//! use hashnav_pages::{debug_log, warn_log};
//!
//! debug_log!("navigation #{} -> {}", generation, route);
//! warn_log!("cleanup for {} failed: {}", route, error);
//! ```

/// Writes one formatted line to the sink selected for the current target.
///
/// Not part of the public API; use the level macros instead.
#[doc(hidden)]
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! __hashnav_emit {
	($console:ident, $level:literal, $($arg:tt)*) => {{
		$crate::__private::web_sys::console::$console(&format!($($arg)*).into());
	}};
}

#[doc(hidden)]
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! __hashnav_emit {
	($console:ident, $level:literal, $($arg:tt)*) => {{
		eprintln!("[{}] {}", $level, format!($($arg)*));
	}};
}

/// Logs a navigation trace message (requires `debug-hooks` feature + `debug_assertions`)
///
/// Used for the per-navigation trail (generation numbers, supersession).
#[macro_export]
#[cfg(all(debug_assertions, feature = "debug-hooks"))]
macro_rules! debug_log {
	($($arg:tt)*) => {
		$crate::__hashnav_emit!(debug_1, "DEBUG", $($arg)*)
	};
}

/// No-op debug_log when conditions are not met
#[macro_export]
#[cfg(not(all(debug_assertions, feature = "debug-hooks")))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message (requires `debug_assertions`)
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! info_log {
	($($arg:tt)*) => {
		$crate::__hashnav_emit!(info_1, "INFO", $($arg)*)
	};
}

/// No-op info_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message (requires `debug_assertions`)
///
/// Swallowed failures (a view's cleanup returning an error, a stylesheet
/// that could not be attached) are reported here.
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! warn_log {
	($($arg:tt)*) => {
		$crate::__hashnav_emit!(warn_1, "WARN", $($arg)*)
	};
}

/// No-op warn_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! warn_log {
	($($arg:tt)*) => {{}};
}

/// Logs an error message (requires `debug_assertions`)
#[macro_export]
#[cfg(debug_assertions)]
macro_rules! error_log {
	($($arg:tt)*) => {
		$crate::__hashnav_emit!(error_1, "ERROR", $($arg)*)
	};
}

/// No-op error_log in release builds
#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! error_log {
	($($arg:tt)*) => {{}};
}
