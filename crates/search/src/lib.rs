//! Search input control for live search views.
//!
//! [`SearchController`] wraps an async [`Fetcher`] and coordinates the requests
//! a search box produces while the user types:
//!
//! - **Debounce**: [`SearchController::search`] waits for a quiet period and
//!   coalesces a burst of keystrokes into one request.
//! - **Cancellation**: starting a search fires the previous request's
//!   [`CancellationToken`](tokio_util::sync::CancellationToken).
//! - **Latest wins**: every run advances an epoch; a response is delivered only
//!   when its epoch is still current, whatever order responses arrive in.
//!
//! The controller keeps no results. Callers receive them through the callbacks
//! on [`SearchOptions`] and own the rendered state.
//!
//! ```no_run
//! # async fn demo() {
//! use scout_search::{FetchError, SearchController, SearchOptions, fetcher_fn};
//! use tokio_util::sync::CancellationToken;
//!
//! let fetcher = fetcher_fn(|keyword: String, _cancel: CancellationToken| async move {
//! 	Ok::<_, FetchError<std::io::Error>>(vec![format!("{keyword}!")])
//! });
//! let controller = SearchController::new(
//! 	fetcher,
//! 	SearchOptions::new()
//! 		.on_success(|rows: Vec<String>, keyword| println!("{keyword}: {rows:?}"))
//! 		.on_clear(|| println!("cleared")),
//! );
//! controller.search("rust");
//! # }
//! ```

mod controller;
mod epoch;
mod fetcher;
mod options;

pub use controller::SearchController;
pub use fetcher::{FetchError, Fetcher, FnFetcher, fetcher_fn};
pub use options::{DEFAULT_DELAY, SearchOptions};
