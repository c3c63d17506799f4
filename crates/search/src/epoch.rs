use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request clock identifying the most recently started search.
///
/// Each routine invocation and each explicit cancellation advances the clock.
/// A completion is applied only when the epoch it captured is still current.
#[derive(Debug, Default)]
pub(crate) struct Epoch {
	current: AtomicU64,
}

impl Epoch {
	/// Creates a clock at epoch 0. The first [`Self::advance`] yields 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Advances the clock and returns the new epoch.
	pub fn advance(&self) -> u64 {
		self.current.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}

	/// Returns the current epoch.
	pub fn current(&self) -> u64 {
		self.current.load(Ordering::Acquire)
	}

	/// Returns true when no newer epoch has started since `epoch` was captured.
	pub fn is_current(&self, epoch: u64) -> bool {
		self.current() == epoch
	}
}
