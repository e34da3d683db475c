//! Callback wrapper for component props.
//!
//! Components accept user handlers (a button's `on_click`, a form's
//! `on_submit`) as [`Callback`] values so they can be cloned into the
//! listeners attached on every mount.
//!
//! ## Example
//!
//! ```ignore
//! use eventia_pages::Callback;
//!
//! let on_click = Callback::new(|()| info_log!("clicked"));
//! let button = Button::new("Save").on_click(on_click.clone());
//! ```

use std::rc::Rc;

/// A cloneable, single-threaded handler.
///
/// ## Type Parameters
///
/// - `Args`: The argument the callback receives (defaults to `()`)
/// - `Ret`: The return type of the callback (defaults to `()`)
pub struct Callback<Args = (), Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}

	/// Returns whether both callbacks wrap the same function.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> std::fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

impl<Args, Ret, F> From<F> for Callback<Args, Ret>
where
	F: Fn(Args) -> Ret + 'static,
{
	fn from(f: F) -> Self {
		Self::new(f)
	}
}
