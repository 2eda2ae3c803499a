//! Floating panel widget - A flat quad laid out from its placement

use super::Widget;
use crate::interaction::{raycast_quad, RayHit};
use glam::{Mat4, Vec2, Vec3};
use widget_mover_core::{Placement, WorldScale};

/// A rectangular UI panel floating in the scene.
///
/// The transform is derived from the placement whenever the placement
/// changes: translate to the placement's world position, then tilt about the
/// horizontal axis.
#[derive(Debug, Clone)]
pub struct PanelWidget {
    placement: Placement,
    scale: WorldScale,
    /// Panel size in world units (width, height)
    size: Vec2,
    transform: Mat4,
}

impl PanelWidget {
    /// Create a panel laid out from `placement`
    pub fn new(placement: Placement, size: Vec2, scale: WorldScale) -> Self {
        Self {
            placement,
            scale,
            size,
            transform: layout_transform(&placement, scale),
        }
    }

    /// Panel size in world units
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// World-space center of the panel
    pub fn center(&self) -> Vec3 {
        self.transform.transform_point3(Vec3::ZERO)
    }

    /// Scale used to lay out the placement
    pub fn scale(&self) -> WorldScale {
        self.scale
    }
}

/// Map a placement to the transform the renderer draws the panel with.
pub fn layout_transform(placement: &Placement, scale: WorldScale) -> Mat4 {
    Mat4::from_translation(placement.world_translation(scale))
        * Mat4::from_rotation_x(placement.rotation)
}

impl Widget for PanelWidget {
    fn transform(&self) -> Mat4 {
        self.transform
    }

    fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    fn placement(&self) -> Placement {
        self.placement
    }

    fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
        self.transform = layout_transform(&placement, self.scale);
    }

    fn test_controller_intersection(&self, origin: Vec3, direction: Vec3) -> Option<RayHit> {
        raycast_quad(origin, direction, &self.transform, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_scale() -> WorldScale {
        WorldScale::new(1.0).unwrap()
    }

    #[test]
    fn panel_lays_out_from_placement() {
        let placement = Placement::new(Vec3::new(1.0, 2.0, -3.0));
        let panel = PanelWidget::new(placement, Vec2::new(2.0, 1.0), unit_scale());

        assert!(panel.center().abs_diff_eq(Vec3::new(1.0, 2.0, -3.0), 0.001));
        assert_eq!(panel.placement(), placement);
        assert_eq!(panel.size(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn set_placement_relayouts_transform() {
        let mut panel = PanelWidget::new(Placement::default(), Vec2::ONE, unit_scale());
        panel.set_placement(Placement::new(Vec3::new(0.0, 1.0, -2.0)).with_rotation(-0.5));

        assert!(panel.center().abs_diff_eq(Vec3::new(0.0, 1.0, -2.0), 0.001));
        let normal = panel.transform().transform_vector3(Vec3::Z);
        assert!(normal.y > 0.0);
    }

    #[test]
    fn set_transform_leaves_placement_alone() {
        let placement = Placement::new(Vec3::new(0.0, 0.0, -2.0));
        let mut panel = PanelWidget::new(placement, Vec2::ONE, unit_scale());
        panel.set_transform(Mat4::from_translation(Vec3::new(5.0, 0.0, -2.0)));

        assert_eq!(panel.placement(), placement);
        assert!(panel.center().abs_diff_eq(Vec3::new(5.0, 0.0, -2.0), 0.001));
    }

    #[test]
    fn panel_intersection_uses_world_scale() {
        let scale = WorldScale::new(0.5).unwrap();
        let panel = PanelWidget::new(
            Placement::new(Vec3::new(0.0, 0.0, -8.0)),
            Vec2::new(1.0, 1.0),
            scale,
        );

        let hit = panel
            .test_controller_intersection(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
            .expect("panel sits 4 world units ahead");
        assert!((hit.distance - 4.0).abs() < 0.001);
        assert!(hit.in_widget);
    }
}
