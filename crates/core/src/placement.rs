//! Widget placement descriptor.
//!
//! A placement is the logical position of a floating panel: a translation in
//! placement units plus a tilt about the horizontal axis. It is distinct from
//! the transform matrix the scene graph renders with; the layout step maps
//! placement units to world meters through [`WorldScale`].

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default world-to-screen ratio (world meters per placement unit).
pub const WORLD_DPI_RATIO: f32 = 2.0 / 720.0;

/// Errors produced when constructing a [`WorldScale`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    /// The ratio must be a finite, strictly positive number.
    #[error("world-to-screen ratio must be finite and > 0, got {0}")]
    InvalidRatio(f32),
}

/// Conversion between placement units and screen-space (world meter) units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldScale {
    ratio: f32,
}

impl WorldScale {
    /// Scale using [`WORLD_DPI_RATIO`].
    pub const DEFAULT: Self = Self {
        ratio: WORLD_DPI_RATIO,
    };

    /// Create a scale from an explicit ratio.
    pub fn new(ratio: f32) -> Result<Self, ScaleError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ScaleError::InvalidRatio(ratio));
        }
        Ok(Self { ratio })
    }

    /// The raw ratio.
    pub fn ratio(self) -> f32 {
        self.ratio
    }

    /// Placement units to screen-space units.
    pub fn to_screen(self, value: f32) -> f32 {
        value * self.ratio
    }

    /// Screen-space units back to placement units.
    pub fn to_placement(self, value: f32) -> f32 {
        value / self.ratio
    }
}

impl Default for WorldScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Logical position/orientation of a widget.
///
/// Only `translation` and `rotation` are rewritten while a widget is being
/// moved; the layout fields ride along unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// Translation in placement units (x right, y up, z negative away from the viewer).
    pub translation: Vec3,
    /// Tilt about the horizontal axis, in radians.
    pub rotation: f32,
    /// Layout width in placement units.
    pub width: f32,
    /// Layout height in placement units.
    pub height: f32,
    /// Normalized anchor point inside the widget rectangle.
    pub anchor: Vec2,
    /// Whether the widget is shown.
    pub visible: bool,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: 0.0,
            width: 0.0,
            height: 0.0,
            anchor: Vec2::splat(0.5),
            visible: true,
        }
    }
}

impl Placement {
    /// Create a placement at `translation` with no tilt.
    pub fn new(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Builder: set tilt (radians).
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set layout size.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder: set anchor.
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor = anchor;
        self
    }

    /// Translation converted to world meters.
    pub fn world_translation(&self, scale: WorldScale) -> Vec3 {
        self.translation * scale.ratio()
    }

    /// Compare translation and rotation within `eps`, and layout fields exactly.
    pub fn approx_eq(&self, other: &Placement, eps: f32) -> bool {
        self.translation.abs_diff_eq(other.translation, eps)
            && (self.rotation - other.rotation).abs() <= eps
            && self.width == other.width
            && self.height == other.height
            && self.anchor == other.anchor
            && self.visible == other.visible
    }
}
