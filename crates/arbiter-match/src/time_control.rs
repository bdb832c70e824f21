//! Time controls: how much clock each side starts with and gains per move.

use std::time::Duration;

/// A per-game time budget.
pub trait TimeControl {
    /// Clock each side starts the game with.
    fn initial(&self) -> Duration;

    /// Time added back after each completed move.
    fn increment(&self) -> Duration;
}

/// Three minutes per side, no increment.
pub struct Blitz3;

impl TimeControl for Blitz3 {
    fn initial(&self) -> Duration {
        Duration::from_secs(3 * 60)
    }

    fn increment(&self) -> Duration {
        Duration::ZERO
    }
}

/// No practical limit. Large enough to outlast any sitting, small enough to
/// stay clear of `Instant` arithmetic overflow.
pub struct Untimed;

impl TimeControl for Untimed {
    fn initial(&self) -> Duration {
        Duration::from_secs(999_999_999)
    }

    fn increment(&self) -> Duration {
        Duration::ZERO
    }
}
