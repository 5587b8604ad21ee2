//! View controllers and their registry.
//!
//! A route may name a controller module. Controllers are registered up front
//! under that name and instantiated by the loader after the view's HTML has
//! been swapped in.
//!
//! ```ignore
//! let mut registry = ViewRegistry::new();
//! registry.register_fn("achievements", |ctx| {
//!     let paginator = Paginator::attach(&ctx.root)?;
//!     Ok(Some(Cleanup::new(move || paginator.detach())))
//! });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::core::RouterError;
use crate::platform::MountPoint;

/// Error raised by a controller's initializer or cleanup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ViewError {
	message: String,
}

impl ViewError {
	/// Creates an error with `message`.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// The error message.
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// What a controller's initializer receives.
#[derive(Clone)]
pub struct ViewContext {
	/// The element the view was rendered into.
	pub root: Rc<dyn MountPoint>,
}

impl fmt::Debug for ViewContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewContext").finish_non_exhaustive()
	}
}

/// Teardown registered by a controller, run once before the next view
/// replaces this one.
pub struct Cleanup(Box<dyn FnOnce() -> Result<(), ViewError>>);

impl Cleanup {
	/// Wraps a teardown that cannot fail.
	pub fn new<F>(f: F) -> Self
	where
		F: FnOnce() + 'static,
	{
		Self(Box::new(move || {
			f();
			Ok(())
		}))
	}

	/// Wraps a teardown that may fail. Failures are logged and ignored by the
	/// loader; they never block navigation.
	pub fn fallible<F>(f: F) -> Self
	where
		F: FnOnce() -> Result<(), ViewError> + 'static,
	{
		Self(Box::new(f))
	}

	/// Runs the teardown.
	pub fn run(self) -> Result<(), ViewError> {
		(self.0)()
	}
}

impl fmt::Debug for Cleanup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Cleanup(..)")
	}
}

/// Behaviour attached to a rendered view.
pub trait ViewController {
	/// Called once after the view's HTML is in place. The returned
	/// [`Cleanup`], if any, runs before the next successful navigation.
	fn init(&mut self, ctx: &ViewContext) -> Result<Option<Cleanup>, ViewError>;
}

/// Adapts a closure into a [`ViewController`].
struct FnController<F>(F);

impl<F> ViewController for FnController<F>
where
	F: FnMut(&ViewContext) -> Result<Option<Cleanup>, ViewError>,
{
	fn init(&mut self, ctx: &ViewContext) -> Result<Option<Cleanup>, ViewError> {
		(self.0)(ctx)
	}
}

type ControllerFactory = Rc<dyn Fn() -> Box<dyn ViewController>>;

/// Module identifier to controller factory mapping.
#[derive(Clone, Default)]
pub struct ViewRegistry {
	factories: HashMap<String, ControllerFactory>,
}

impl fmt::Debug for ViewRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut modules: Vec<_> = self.factories.keys().collect();
		modules.sort();
		f.debug_struct("ViewRegistry")
			.field("modules", &modules)
			.finish()
	}
}

impl ViewRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a factory producing a fresh controller per navigation.
	pub fn register<F>(&mut self, id: impl Into<String>, factory: F) -> &mut Self
	where
		F: Fn() -> Box<dyn ViewController> + 'static,
	{
		self.factories.insert(id.into(), Rc::new(factory));
		self
	}

	/// Registers a closure as the controller's initializer.
	pub fn register_fn<F>(&mut self, id: impl Into<String>, init: F) -> &mut Self
	where
		F: Fn(&ViewContext) -> Result<Option<Cleanup>, ViewError> + 'static,
	{
		let init = Rc::new(init);
		self.register(id, move || {
			let init = Rc::clone(&init);
			Box::new(FnController(move |ctx: &ViewContext| init(ctx)))
		})
	}

	/// Whether `id` is registered.
	pub fn contains(&self, id: &str) -> bool {
		self.factories.contains_key(id)
	}

	/// Instantiates the controller registered as `id`.
	pub fn resolve(&self, id: &str) -> Result<Box<dyn ViewController>, RouterError> {
		self.factories
			.get(id)
			.map(|factory| factory())
			.ok_or_else(|| RouterError::ModuleNotRegistered(id.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::MemoryMountPoint;
	use rstest::rstest;
	use std::cell::Cell;

	fn context() -> ViewContext {
		ViewContext {
			root: Rc::new(MemoryMountPoint::new()),
		}
	}

	#[rstest]
	fn test_resolve_unregistered_module() {
		let registry = ViewRegistry::new();
		let result = registry.resolve("achievements");
		assert!(matches!(result, Err(RouterError::ModuleNotRegistered(id)) if id == "achievements"));
	}

	#[rstest]
	fn test_register_fn_runs_initializer_per_resolution() {
		let calls = Rc::new(Cell::new(0));
		let mut registry = ViewRegistry::new();
		{
			let calls = Rc::clone(&calls);
			registry.register_fn("counter", move |_| {
				calls.set(calls.get() + 1);
				Ok(None)
			});
		}

		let ctx = context();
		for _ in 0..2 {
			let mut controller = registry.resolve("counter").unwrap();
			assert!(controller.init(&ctx).unwrap().is_none());
		}

		assert_eq!(calls.get(), 2);
	}

	#[rstest]
	fn test_initializer_sees_rendered_root() {
		let mut registry = ViewRegistry::new();
		registry.register_fn("reader", |ctx| {
			if ctx.root.html().contains("<table") {
				Ok(None)
			} else {
				Err(ViewError::new("table missing"))
			}
		});
		let ctx = context();
		ctx.root.set_html("<table></table>");

		let mut controller = registry.resolve("reader").unwrap();

		assert!(controller.init(&ctx).is_ok());
	}

	#[rstest]
	fn test_cleanup_variants() {
		let ran = Rc::new(Cell::new(false));
		let flag = Rc::clone(&ran);
		assert!(Cleanup::new(move || flag.set(true)).run().is_ok());
		assert!(ran.get());

		let failing = Cleanup::fallible(|| Err(ViewError::new("listener already gone")));
		assert_eq!(failing.run().unwrap_err().message(), "listener already gone");
	}
}
