//! Live search controller: debounce, request cancellation, latest-wins delivery.
//!
//! # Purpose
//!
//! * Drives an injected [`Fetcher`] from user input without flooding it.
//! * Guarantees that only the most recently started search reaches the caller.
//! * Keeps no result state; callers render whatever the callbacks hand them.
//!
//! # Mental model
//!
//! * Every routine run advances the epoch and swaps the active cancellation token.
//! * A completion carries the epoch it captured and is applied only while that
//!   epoch is still current.
//! * `search` parks the routine behind a timer token; a newer `search`,
//!   `search_now`, `cancel`, or drop fires that token before it elapses.
//!
//! # Key types
//!
//! | Type | Meaning | Constraints | Constructed / mutated in |
//! |---|---|---|---|
//! | [`SearchController`] | Owning handle | Tears down on `cleanup` and on drop | this module |
//! | `Inner` | Shared state reachable from spawned tasks | Epoch and tokens only change under the delivery lock | `begin`, `cancel_all` |
//! | `Slots` | Pending debounce timer and active request token | At most one of each is live | `search`, `begin`, `cancel_all` |
//! | `Attempt` | One routine run awaiting its fetch | Keyword is trimmed and non-empty | `begin` |
//!
//! # Invariants
//!
//! * Must advance the epoch before issuing a fetch and on every cancellation.
//! * Must cancel the previous request token before installing a new one.
//! * Must not invoke `on_success` or `on_error` for a stale epoch.
//! * Must never surface [`FetchError::Cancelled`] through a callback.
//! * Must invoke `on_clear` and skip the fetch for a blank keyword.
//!
//! # Lifecycle
//!
//! * Create with [`SearchController::new`] when the owning view mounts.
//! * Feed keystrokes to [`SearchController::search`]; use
//!   [`SearchController::search_now`] for explicit submits.
//! * Call [`SearchController::cleanup`] when the view unmounts. Dropping the
//!   controller does the same.
//!
//! # Concurrency & ordering
//!
//! * Timers and fetches run as Tokio tasks on the handle captured at construction.
//! * The epoch check and callback invocation happen under the same reentrant
//!   delivery lock that guards epoch advances, so an older response can never
//!   land after a newer search has started, even on a multi-threaded runtime.
//! * Callbacks may call back into the controller on the same thread.
//!
//! # Failure modes & recovery
//!
//! * Cancelled request: dropped at `trace`.
//! * Stale response or stale error: dropped at `trace`.
//! * Genuine current failure: logged at `debug`, handed to `on_error`.
//! * The controller stays usable after any of the above.

use std::fmt;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::epoch::Epoch;
use crate::fetcher::{FetchError, Fetcher};
use crate::options::SearchOptions;

/// Debounced, cancellable, latest-wins search driver.
pub struct SearchController<T, F>
where
	F: Fetcher<T>,
{
	inner: Arc<Inner<T, F>>,
}

struct Inner<T, F>
where
	F: Fetcher<T>,
{
	fetcher: F,
	options: SearchOptions<T, F::Error>,
	epoch: Epoch,
	delivery: ReentrantMutex<()>,
	slots: Mutex<Slots>,
	handle: Handle,
}

#[derive(Default)]
struct Slots {
	pending: Option<CancellationToken>,
	active: Option<CancellationToken>,
}

struct Attempt {
	epoch: u64,
	keyword: String,
	cancel: CancellationToken,
}

impl<T, F> SearchController<T, F>
where
	T: Send + 'static,
	F: Fetcher<T>,
{
	/// Creates a controller spawning onto the current Tokio runtime.
	///
	/// # Panics
	///
	/// Panics when called outside a Tokio runtime context.
	pub fn new(fetcher: F, options: SearchOptions<T, F::Error>) -> Self {
		Self::with_handle(Handle::current(), fetcher, options)
	}

	/// Creates a controller spawning onto `handle`.
	pub fn with_handle(handle: Handle, fetcher: F, options: SearchOptions<T, F::Error>) -> Self {
		Self {
			inner: Arc::new(Inner {
				fetcher,
				options,
				epoch: Epoch::new(),
				delivery: ReentrantMutex::new(()),
				slots: Mutex::new(Slots::default()),
				handle,
			}),
		}
	}

	/// Schedules a debounced search.
	///
	/// Each call resets the quiet period; only the last call of a burst runs.
	pub fn search(&self, keyword: impl Into<String>) {
		let keyword = keyword.into();
		let timer = CancellationToken::new();
		if let Some(previous) = self.inner.slots.lock().pending.replace(timer.clone()) {
			previous.cancel();
		}

		let inner = Arc::clone(&self.inner);
		let delay = inner.options.delay;
		self.inner.handle.spawn(async move {
			tokio::select! {
				biased;
				_ = timer.cancelled() => return,
				_ = tokio::time::sleep(delay) => {}
			}

			if let Some(attempt) = inner.begin(&keyword, Some(&timer)) {
				inner.complete(attempt).await;
			}
		});
	}

	/// Discards any pending debounced search and runs this one immediately.
	///
	/// The epoch advance, token swap and `on_clear` happen before this returns;
	/// the fetch itself runs on a spawned task.
	pub fn search_now(&self, keyword: impl AsRef<str>) {
		self.inner.discard_pending();
		if let Some(attempt) = self.inner.begin(keyword.as_ref(), None) {
			self.inner.handle.spawn(Arc::clone(&self.inner).complete(attempt));
		}
	}

	/// Discards the pending search, aborts the in-flight request and
	/// invalidates any response still on its way.
	pub fn cancel(&self) {
		self.inner.cancel_all();
	}

	/// Teardown for the owning view. Same as [`Self::cancel`]; safe to repeat.
	pub fn cleanup(&self) {
		self.inner.cancel_all();
	}

	/// Returns the current epoch.
	pub fn epoch(&self) -> u64 {
		self.inner.epoch.current()
	}
}

impl<T, F> Inner<T, F>
where
	F: Fetcher<T>,
{
	fn discard_pending(&self) {
		if let Some(timer) = self.slots.lock().pending.take() {
			timer.cancel();
		}
	}

	fn cancel_all(&self) {
		let _delivery = self.delivery.lock();
		let mut slots = self.slots.lock();
		if let Some(timer) = slots.pending.take() {
			timer.cancel();
		}
		if let Some(active) = slots.active.take() {
			active.cancel();
		}
		let epoch = self.epoch.advance();
		tracing::trace!(epoch, "search.cancel");
	}
}

impl<T, F> Inner<T, F>
where
	T: Send + 'static,
	F: Fetcher<T>,
{
	/// Synchronous half of the search routine.
	///
	/// `timer` is the debounce token that scheduled this run; when it has been
	/// fired in the meantime the run was superseded and nothing happens.
	fn begin(&self, keyword: &str, timer: Option<&CancellationToken>) -> Option<Attempt> {
		let keyword = keyword.trim();
		let _delivery = self.delivery.lock();

		let (epoch, cancel) = {
			let mut slots = self.slots.lock();
			if let Some(timer) = timer {
				if timer.is_cancelled() {
					return None;
				}
				slots.pending = None;
			}

			let epoch = self.epoch.advance();
			if let Some(previous) = slots.active.take() {
				previous.cancel();
			}
			let cancel = CancellationToken::new();
			slots.active = Some(cancel.clone());
			(epoch, cancel)
		};

		if keyword.is_empty() {
			tracing::trace!(epoch, "search.clear");
			if let Some(on_clear) = &self.options.on_clear {
				on_clear();
			}
			return None;
		}

		Some(Attempt {
			epoch,
			keyword: keyword.to_owned(),
			cancel,
		})
	}

	/// Asynchronous half of the search routine.
	async fn complete(self: Arc<Self>, attempt: Attempt) {
		let Attempt { epoch, keyword, cancel } = attempt;
		tracing::trace!(epoch, keyword = %keyword, "search.fetch");

		let result = tokio::select! {
			biased;
			_ = cancel.cancelled() => Err(FetchError::Cancelled),
			result = self.fetcher.fetch(keyword.clone(), cancel.clone()) => result,
		};

		self.deliver(epoch, &keyword, result);
	}

	fn deliver(&self, epoch: u64, keyword: &str, result: Result<Vec<T>, FetchError<F::Error>>) {
		if result.as_ref().is_err_and(FetchError::is_cancelled) {
			tracing::trace!(epoch, keyword, "search.cancelled");
			return;
		}

		let _delivery = self.delivery.lock();
		if !self.epoch.is_current(epoch) {
			tracing::trace!(epoch, current = self.epoch.current(), keyword, "search.stale");
			return;
		}

		match result {
			Ok(results) => {
				tracing::trace!(epoch, keyword, count = results.len(), "search.success");
				if let Some(on_success) = &self.options.on_success {
					on_success(results, keyword);
				}
			}
			Err(FetchError::Failed(error)) => {
				tracing::debug!(epoch, keyword, "search.failed");
				if let Some(on_error) = &self.options.on_error {
					on_error(error);
				}
			}
			Err(FetchError::Cancelled) => {}
		}
	}
}

impl<T, F> Drop for SearchController<T, F>
where
	F: Fetcher<T>,
{
	fn drop(&mut self) {
		self.inner.cancel_all();
	}
}

impl<T, F> fmt::Debug for SearchController<T, F>
where
	F: Fetcher<T>,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let slots = self.inner.slots.lock();
		f.debug_struct("SearchController")
			.field("epoch", &self.inner.epoch.current())
			.field("pending", &slots.pending.is_some())
			.field("in_flight", &slots.active.as_ref().is_some_and(|t| !t.is_cancelled()))
			.field("delay", &self.inner.options.delay)
			.finish()
	}
}

#[cfg(test)]
mod tests;
