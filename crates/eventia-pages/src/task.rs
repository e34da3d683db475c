//! Running futures on the UI thread.
//!
//! In the browser, [`spawn_local`] queues the future on the JavaScript event
//! loop. Natively there is no event loop to hand it to, so the future runs to
//! completion on the calling thread before `spawn_local` returns.

use std::future::Future;

/// Spawns a `!Send` future.
#[cfg(target_arch = "wasm32")]
pub fn spawn_local<F>(future: F)
where
	F: Future<Output = ()> + 'static,
{
	wasm_bindgen_futures::spawn_local(future);
}

/// Spawns a `!Send` future.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_local<F>(future: F)
where
	F: Future<Output = ()> + 'static,
{
	futures::executor::block_on(future);
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;
	use std::rc::Rc;

	#[rstest]
	fn test_native_spawn_completes_before_returning() {
		let done = Rc::new(Cell::new(false));
		let flag = Rc::clone(&done);
		spawn_local(async move {
			futures::future::ready(()).await;
			flag.set(true);
		});
		assert!(done.get());
	}
}
