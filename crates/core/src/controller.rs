//! Controller identifiers.
//!
//! A tracked input device is addressed by a small integer index assigned by
//! the input layer. Idle drag state is modelled as `Option<ControllerId>`
//! rather than a sentinel index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a tracked controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControllerId(pub u32);

impl ControllerId {
    /// Convert to the raw index used by the input layer.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl From<u32> for ControllerId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "controller#{}", self.0)
    }
}
