use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic generation clock for catalog refreshes.
///
/// Every refresh takes a new generation when it starts; a completion is only
/// published when its generation is still the latest one handed out.
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	latest: Arc<AtomicU64>,
}

impl GenerationClock {
	/// Creates a new clock. The first generation handed out is 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a new generation and returns it.
	pub fn advance(&self) -> Generation {
		Generation(self.latest.fetch_add(1, Ordering::AcqRel).wrapping_add(1))
	}

	/// Returns the most recently started generation (0 before any).
	pub fn latest(&self) -> Generation {
		Generation(self.latest.load(Ordering::Acquire))
	}

	/// Returns true when `generation` is the most recently started one.
	pub fn is_current(&self, generation: Generation) -> bool {
		self.latest() == generation
	}
}

/// Identifier of one catalog refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
	/// Returns the raw generation counter.
	pub const fn get(self) -> u64 {
		self.0
	}
}
