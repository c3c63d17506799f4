//! Fetcher seam consumed by [`crate::SearchController`].

use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Failure reported by a [`Fetcher`].
///
/// Cancellation is its own variant so the controller never has to inspect
/// error text to tell an aborted request from a genuine failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError<E> {
	/// The request observed its cancellation token and stopped.
	Cancelled,
	/// The request failed for any other reason.
	Failed(E),
}

impl<E> FetchError<E> {
	/// Returns true for [`FetchError::Cancelled`].
	pub const fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled)
	}
}

impl<E: fmt::Display> fmt::Display for FetchError<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Cancelled => f.write_str("request cancelled"),
			Self::Failed(error) => error.fmt(f),
		}
	}
}

impl<E: std::error::Error + 'static> std::error::Error for FetchError<E> {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Cancelled => None,
			Self::Failed(error) => Some(error),
		}
	}
}

/// Async search backend driven by the controller.
///
/// Implementations must watch `cancel` and return [`FetchError::Cancelled`]
/// promptly once it fires.
#[async_trait]
pub trait Fetcher<T>: Send + Sync + 'static {
	/// Genuine failure type surfaced through `on_error`.
	type Error: Send + 'static;

	/// Fetches results for an already trimmed, non-empty keyword.
	async fn fetch(&self, keyword: String, cancel: CancellationToken) -> Result<Vec<T>, FetchError<Self::Error>>;
}

/// [`Fetcher`] backed by a plain async closure. Built by [`fetcher_fn`].
pub struct FnFetcher<F> {
	f: F,
}

impl<F> fmt::Debug for FnFetcher<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnFetcher").finish_non_exhaustive()
	}
}

/// Wraps `f(keyword, cancel)` as a [`Fetcher`].
pub fn fetcher_fn<F, Fut>(f: F) -> FnFetcher<F>
where
	F: Fn(String, CancellationToken) -> Fut,
{
	FnFetcher { f }
}

#[async_trait]
impl<T, E, F, Fut> Fetcher<T> for FnFetcher<F>
where
	T: Send + 'static,
	E: Send + 'static,
	F: Fn(String, CancellationToken) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Vec<T>, FetchError<E>>> + Send + 'static,
{
	type Error = E;

	async fn fetch(&self, keyword: String, cancel: CancellationToken) -> Result<Vec<T>, FetchError<E>> {
		(self.f)(keyword, cancel).await
	}
}
