//! Placement solver - Maps a grab-time placement plus a controller displacement
//! onto a new placement.
//!
//! The console policy clamps the panel to a fixed screen-space window and
//! derives tilt and depth from the clamped vertical position: panels pulled
//! low tilt back, panels raised high sit flat. The free-form policy simply
//! translates the grab-time transform.

use crate::components::Widget;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use widget_mover_core::{Placement, WorldScale};

/// Reasons a [`ConsoleBounds`] cannot be used.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    /// A bound is NaN or infinite.
    #[error("bound `{0}` must be finite")]
    NotFinite(&'static str),
    /// Lower bound above upper bound on an axis.
    #[error("{axis} range is inverted: min {min} > max {max}")]
    Inverted {
        /// Axis name.
        axis: &'static str,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
    },
    /// A ramp start coincides with or sits below `y_min`.
    #[error("`{name}` ({value}) must be above y_min ({y_min})")]
    RampBelowFloor {
        /// Ramp parameter name.
        name: &'static str,
        /// Ramp parameter value.
        value: f32,
        /// Configured floor.
        y_min: f32,
    },
}

/// Screen-space window and curve parameters of the console policy.
///
/// x/y bounds and ramp thresholds are in screen-space units; `min_z`/`max_z`
/// are depths before conversion back to placement units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleBounds {
    /// Leftmost screen-space x.
    pub x_min: f32,
    /// Rightmost screen-space x.
    pub x_max: f32,
    /// Lowest screen-space y; tilt and depth ramps bottom out here.
    pub y_min: f32,
    /// Highest screen-space y.
    pub y_max: f32,
    /// Tilt reached at `y_min`, in degrees (negative tilts back).
    pub max_tilt_degrees: f32,
    /// Tilt is zero at and above this height.
    pub angle_start_y: f32,
    /// Depth at `y_min`.
    pub min_z: f32,
    /// Depth above `threshold_z`.
    pub max_z: f32,
    /// Height where depth stops ramping and holds at `max_z`.
    pub threshold_z: f32,
}

impl Default for ConsoleBounds {
    fn default() -> Self {
        Self {
            x_min: -2.0,
            x_max: 3.0,
            y_min: -1.0,
            y_max: 2.0,
            max_tilt_degrees: -35.0,
            angle_start_y: 0.8,
            min_z: -2.5,
            max_z: -3.2,
            threshold_z: 1.45,
        }
    }
}

impl ConsoleBounds {
    /// Tilt reached at `y_min`, in radians.
    pub fn max_tilt(&self) -> f32 {
        self.max_tilt_degrees.to_radians()
    }

    /// Check the bounds can drive the solver without dividing by zero or
    /// clamping into an empty range.
    pub fn validate(&self) -> Result<(), BoundsError> {
        let named = [
            ("x_min", self.x_min),
            ("x_max", self.x_max),
            ("y_min", self.y_min),
            ("y_max", self.y_max),
            ("max_tilt_degrees", self.max_tilt_degrees),
            ("angle_start_y", self.angle_start_y),
            ("min_z", self.min_z),
            ("max_z", self.max_z),
            ("threshold_z", self.threshold_z),
        ];
        if let Some((name, _)) = named.iter().find(|(_, value)| !value.is_finite()) {
            return Err(BoundsError::NotFinite(*name));
        }

        if self.x_min > self.x_max {
            return Err(BoundsError::Inverted {
                axis: "x",
                min: self.x_min,
                max: self.x_max,
            });
        }
        if self.y_min > self.y_max {
            return Err(BoundsError::Inverted {
                axis: "y",
                min: self.y_min,
                max: self.y_max,
            });
        }

        for (name, value) in [
            ("angle_start_y", self.angle_start_y),
            ("threshold_z", self.threshold_z),
        ] {
            if value <= self.y_min {
                return Err(BoundsError::RampBelowFloor {
                    name,
                    value,
                    y_min: self.y_min,
                });
            }
        }

        Ok(())
    }
}

/// How a drag displacement becomes a widget update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementPolicy {
    /// Clamped console-style placement with tilt and depth curves.
    Constrained(ConsoleBounds),
    /// Literal translation of the grab-time transform; no clamping, no tilt.
    FreeForm,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self::Constrained(ConsoleBounds::default())
    }
}

impl PlacementPolicy {
    /// Solve one frame of a drag.
    pub fn solve(
        &self,
        baseline: &Placement,
        initial_transform: &Mat4,
        delta: Vec3,
        scale: WorldScale,
    ) -> MoveResult {
        match self {
            Self::Constrained(bounds) => {
                MoveResult::Placement(solve_constrained(baseline, delta, bounds, scale))
            }
            Self::FreeForm => MoveResult::Transform(solve_free_form(initial_transform, delta)),
        }
    }

    /// Policy name as written in configuration.
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::Constrained(_) => PolicyKind::Constrained,
            Self::FreeForm => PolicyKind::FreeForm,
        }
    }
}

/// Configuration-level policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Console layout: clamped x/y, depth and tilt follow height.
    #[default]
    Constrained,
    /// Literal translation of the grab-time transform.
    FreeForm,
}

impl PolicyKind {
    /// Build the policy, attaching `bounds` when the policy uses them.
    pub fn into_policy(self, bounds: ConsoleBounds) -> PlacementPolicy {
        match self {
            Self::Constrained => PlacementPolicy::Constrained(bounds),
            Self::FreeForm => PlacementPolicy::FreeForm,
        }
    }
}

/// Outcome of one drag frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveResult {
    /// A replacement placement (constrained policy).
    Placement(Placement),
    /// A replacement transform (free-form policy).
    Transform(Mat4),
}

impl MoveResult {
    /// Apply the result to the widget being dragged.
    pub fn apply_to(&self, widget: &mut dyn Widget) {
        match self {
            Self::Placement(placement) => widget.set_placement(*placement),
            Self::Transform(transform) => widget.set_transform(*transform),
        }
    }

    /// The placement, if this result carries one.
    pub fn placement(&self) -> Option<Placement> {
        match self {
            Self::Placement(placement) => Some(*placement),
            Self::Transform(_) => None,
        }
    }
}

/// Tilt (radians) for a clamped screen-space height.
///
/// Zero at and above `angle_start_y`; ramps linearly to the maximum tilt at
/// `y_min`.
pub fn tilt_for(y: f32, bounds: &ConsoleBounds) -> f32 {
    if y < bounds.angle_start_y {
        let t = 1.0 - (y - bounds.y_min) / (bounds.angle_start_y - bounds.y_min);
        t * bounds.max_tilt()
    } else {
        0.0
    }
}

/// Screen-space depth for a clamped screen-space height.
///
/// `min_z` at `y_min`, ramping to `max_z` at `threshold_z` and held there
/// above it. Heights below `y_min` extrapolate; callers clamp first.
pub fn depth_for(y: f32, bounds: &ConsoleBounds) -> f32 {
    let t = if y > bounds.threshold_z {
        1.0
    } else {
        (y - bounds.y_min) / (bounds.threshold_z - bounds.y_min)
    };
    bounds.min_z + t * (bounds.max_z - bounds.min_z)
}

/// Console policy: clamp, then derive tilt and depth from the clamped height.
pub fn solve_constrained(
    baseline: &Placement,
    delta: Vec3,
    bounds: &ConsoleBounds,
    scale: WorldScale,
) -> Placement {
    let x = scale.to_screen(baseline.translation.x) + delta.x;
    let y = scale.to_screen(baseline.translation.y) + delta.y;

    let x = x.min(bounds.x_max).max(bounds.x_min);
    let y = y.min(bounds.y_max).max(bounds.y_min);

    Placement {
        translation: Vec3::new(
            scale.to_placement(x),
            scale.to_placement(y),
            scale.to_placement(depth_for(y, bounds)),
        ),
        rotation: tilt_for(y, bounds),
        ..*baseline
    }
}

/// Free-form policy: translate the grab-time transform in the view plane.
pub fn solve_free_form(initial_transform: &Mat4, delta: Vec3) -> Mat4 {
    Mat4::from_translation(Vec3::new(delta.x, delta.y, 0.0)) * *initial_transform
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PanelWidget;
    use glam::Vec2;

    const EPS: f32 = 1e-4;

    fn unit_scale() -> WorldScale {
        WorldScale::new(1.0).unwrap()
    }

    #[test]
    fn pulling_down_tilts_and_recedes() {
        let bounds = ConsoleBounds::default();
        let baseline = Placement::new(Vec3::new(1.0, 1.0, -3.0));

        let solved = solve_constrained(&baseline, Vec3::new(0.0, -1.5, 0.0), &bounds, unit_scale());

        assert!((solved.translation.x - 1.0).abs() < EPS);
        assert!((solved.translation.y + 0.5).abs() < EPS);
        assert!((solved.translation.z + 2.642857).abs() < EPS);
        // 1 - 0.5 / 1.8 of -35 degrees
        assert!((solved.rotation + 0.441186).abs() < EPS);
    }

    #[test]
    fn x_is_clamped_to_the_right_edge() {
        let bounds = ConsoleBounds::default();
        let scale = WorldScale::default();
        let baseline = Placement::new(Vec3::ZERO);

        let solved = solve_constrained(&baseline, Vec3::new(50.0, 0.0, 0.0), &bounds, scale);

        assert!((solved.translation.x - scale.to_placement(3.0)).abs() < 1e-2);
        assert_eq!(
            solve_constrained(&baseline, Vec3::new(50.0, 0.0, 0.0), &bounds, unit_scale())
                .translation
                .x,
            3.0
        );
    }

    #[test]
    fn y_is_clamped_on_both_ends() {
        let bounds = ConsoleBounds::default();
        let baseline = Placement::new(Vec3::ZERO);

        let high = solve_constrained(&baseline, Vec3::new(0.0, 9.0, 0.0), &bounds, unit_scale());
        let low = solve_constrained(&baseline, Vec3::new(0.0, -9.0, 0.0), &bounds, unit_scale());

        assert_eq!(high.translation.y, 2.0);
        assert_eq!(low.translation.y, -1.0);
        assert!((low.rotation - bounds.max_tilt()).abs() < EPS);
        assert!((low.translation.z - bounds.min_z).abs() < EPS);
        assert_eq!(high.rotation, 0.0);
        assert!((high.translation.z - bounds.max_z).abs() < EPS);
    }

    #[test]
    fn ramps_are_continuous_at_their_thresholds() {
        let bounds = ConsoleBounds::default();

        assert_eq!(tilt_for(bounds.angle_start_y, &bounds), 0.0);
        assert!(tilt_for(bounds.angle_start_y - 1e-3, &bounds).abs() < 1e-3);

        assert!((depth_for(bounds.threshold_z, &bounds) - bounds.max_z).abs() < EPS);
        assert!((depth_for(bounds.threshold_z + 0.1, &bounds) - bounds.max_z).abs() < EPS);
    }

    #[test]
    fn layout_fields_survive_a_move() {
        let baseline = Placement::new(Vec3::new(0.5, 0.5, -3.0))
            .with_size(720.0, 450.0)
            .with_anchor(Vec2::new(0.5, 0.0));

        let solved = solve_constrained(
            &baseline,
            Vec3::new(0.2, 0.1, 0.0),
            &ConsoleBounds::default(),
            unit_scale(),
        );

        assert_eq!((solved.width, solved.height), (720.0, 450.0));
        assert_eq!(solved.anchor, Vec2::new(0.5, 0.0));
        assert!(solved.visible);
    }

    #[test]
    fn free_form_translates_in_view_plane_only() {
        let initial = Mat4::from_translation(Vec3::new(0.0, 1.0, -2.0));

        let moved = solve_free_form(&initial, Vec3::new(0.5, -0.25, 4.0));

        let origin = moved.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.5, 0.75, -2.0), EPS));
    }

    #[test]
    fn policy_dispatch_picks_the_output_channel() {
        let baseline = Placement::new(Vec3::new(1.0, 1.0, -3.0));
        let initial = Mat4::IDENTITY;

        let constrained = PlacementPolicy::default().solve(&baseline, &initial, Vec3::ZERO, unit_scale());
        assert!(matches!(constrained, MoveResult::Placement(_)));
        assert_eq!(PlacementPolicy::default().kind(), PolicyKind::Constrained);

        let free = PlacementPolicy::FreeForm.solve(&baseline, &initial, Vec3::X, unit_scale());
        assert!(matches!(free, MoveResult::Transform(_)));
        assert_eq!(free.placement(), None);
    }

    #[test]
    fn move_result_applies_through_one_channel() {
        let mut panel = PanelWidget::new(Placement::new(Vec3::ZERO), Vec2::ONE, unit_scale());

        let target = Placement::new(Vec3::new(1.0, 0.0, -2.0));
        MoveResult::Placement(target).apply_to(&mut panel);
        assert_eq!(panel.placement(), target);

        let transform = Mat4::from_translation(Vec3::new(9.0, 0.0, 0.0));
        MoveResult::Transform(transform).apply_to(&mut panel);
        assert_eq!(panel.transform(), transform);
        assert_eq!(panel.placement(), target);
    }

    #[test]
    fn validate_rejects_unusable_bounds() {
        assert!(ConsoleBounds::default().validate().is_ok());

        let inverted = ConsoleBounds {
            x_min: 4.0,
            ..Default::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(BoundsError::Inverted { axis: "x", .. })
        ));

        let flat_ramp = ConsoleBounds {
            angle_start_y: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            flat_ramp.validate(),
            Err(BoundsError::RampBelowFloor { name: "angle_start_y", .. })
        ));

        let nan = ConsoleBounds {
            max_z: f32::NAN,
            ..Default::default()
        };
        assert_eq!(nan.validate(), Err(BoundsError::NotFinite("max_z")));
    }

    #[test]
    fn policy_kind_builds_policies() {
        let bounds = ConsoleBounds::default();
        assert_eq!(
            PolicyKind::Constrained.into_policy(bounds),
            PlacementPolicy::Constrained(bounds)
        );
        assert_eq!(PolicyKind::FreeForm.into_policy(bounds), PlacementPolicy::FreeForm);
    }
}
