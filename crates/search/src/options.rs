use std::fmt;
use std::time::Duration;

/// Quiet period before a debounced search fires.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(400);

pub(crate) type SuccessCallback<T> = Box<dyn Fn(Vec<T>, &str) + Send + Sync>;
pub(crate) type ErrorCallback<E> = Box<dyn Fn(E) + Send + Sync>;
pub(crate) type ClearCallback = Box<dyn Fn() + Send + Sync>;

/// Controller configuration. Every field is optional.
pub struct SearchOptions<T, E> {
	pub(crate) delay: Duration,
	pub(crate) on_success: Option<SuccessCallback<T>>,
	pub(crate) on_error: Option<ErrorCallback<E>>,
	pub(crate) on_clear: Option<ClearCallback>,
}

impl<T, E> Default for SearchOptions<T, E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T, E> fmt::Debug for SearchOptions<T, E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SearchOptions")
			.field("delay", &self.delay)
			.field("on_success", &self.on_success.is_some())
			.field("on_error", &self.on_error.is_some())
			.field("on_clear", &self.on_clear.is_some())
			.finish()
	}
}

impl<T, E> SearchOptions<T, E> {
	/// Options with [`DEFAULT_DELAY`] and no callbacks.
	pub fn new() -> Self {
		Self {
			delay: DEFAULT_DELAY,
			on_success: None,
			on_error: None,
			on_clear: None,
		}
	}

	/// Sets the debounce quiet period.
	pub fn delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	/// Called with the results and the trimmed keyword of the latest search.
	pub fn on_success(mut self, f: impl Fn(Vec<T>, &str) + Send + Sync + 'static) -> Self {
		self.on_success = Some(Box::new(f));
		self
	}

	/// Called with a genuine failure of the latest search.
	pub fn on_error(mut self, f: impl Fn(E) + Send + Sync + 'static) -> Self {
		self.on_error = Some(Box::new(f));
		self
	}

	/// Called when the trimmed keyword is empty. No fetch is issued in that case.
	pub fn on_clear(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
		self.on_clear = Some(Box::new(f));
		self
	}

	/// Returns the configured quiet period.
	pub fn debounce(&self) -> Duration {
		self.delay
	}
}
