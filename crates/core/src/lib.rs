#![warn(missing_docs)]
//! Core value types shared across the workspace.

pub mod controller;
pub mod placement;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use controller::ControllerId;
pub use placement::{Placement, ScaleError, WorldScale, WORLD_DPI_RATIO};

/// Frame counter stamped on replay records (one tick per input frame).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameTick(pub u64);

impl FrameTick {
    /// First frame of any replay.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` frames.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_tick_advances() {
        assert_eq!(FrameTick::ZERO.advance(3), FrameTick(3));
        assert!(FrameTick(2) < FrameTick(5));
    }
}
