//! Widget raycasting - Intersect controller rays with widget planes

use glam::{Mat4, Vec2, Vec3};

/// Result of intersecting a controller ray with a widget's plane.
///
/// A ray that reaches the plane outside the widget rectangle still produces a
/// hit with `in_widget == false`; an in-progress drag keeps tracking it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Point where the ray meets the widget plane (world space)
    pub point: Vec3,
    /// Plane normal (world space, unit length)
    pub normal: Vec3,
    /// Ray parameter at the hit, in multiples of the ray direction
    pub distance: f32,
    /// Whether the hit lies inside the widget rectangle
    pub in_widget: bool,
}

/// Intersect a ray with the `z = 0` plane of a quad placed by `transform`.
///
/// `size` is the quad's width and height in world units, centered on the
/// local origin. Returns `None` when the ray is parallel to the plane or the
/// plane lies behind the ray origin.
pub fn raycast_quad(
    ray_origin: Vec3,
    ray_dir: Vec3,
    transform: &Mat4,
    size: Vec2,
) -> Option<RayHit> {
    let center = transform.transform_point3(Vec3::ZERO);
    let normal = transform.transform_vector3(Vec3::Z).normalize_or_zero();
    if normal == Vec3::ZERO {
        return None;
    }

    let denom = ray_dir.dot(normal);

    // Ray parallel to plane
    if denom.abs() < 0.0001 {
        return None;
    }

    let t = (center - ray_origin).dot(normal) / denom;

    // Intersection behind ray origin, or a degenerate (NaN/infinite) ray
    if !t.is_finite() || t < 0.0 {
        return None;
    }

    let point = ray_origin + ray_dir * t;
    if !point.is_finite() {
        return None;
    }

    let local = transform.inverse().transform_point3(point);
    let half = size * 0.5;
    let in_widget = local.x.abs() <= half.x && local.y.abs() <= half.y;

    Some(RayHit {
        point,
        normal,
        distance: t,
        in_widget,
    })
}

/// Convert screen coordinates to a 3D ray in world space.
///
/// Expects a projection with a `[0, 1]` depth range (`Mat4::perspective_rh`).
pub fn screen_to_ray(
    screen_pos: Vec2,
    screen_size: (u32, u32),
    view_matrix: &Mat4,
    projection_matrix: &Mat4,
) -> (Vec3, Vec3) {
    // Convert screen coordinates to normalized device coordinates (-1 to 1)
    let x = (2.0 * screen_pos.x) / screen_size.0 as f32 - 1.0;
    let y = 1.0 - (2.0 * screen_pos.y) / screen_size.1 as f32; // Flip Y

    // Unproject the pixel on the near and far planes
    let inv_view_proj = (*projection_matrix * *view_matrix).inverse();
    let near = inv_view_proj.project_point3(Vec3::new(x, y, 0.0));
    let far = inv_view_proj.project_point3(Vec3::new(x, y, 1.0));

    // Ray origin is the eye position
    let ray_origin = view_matrix.inverse().transform_point3(Vec3::ZERO);

    (ray_origin, (far - near).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_at(position: Vec3) -> Mat4 {
        Mat4::from_translation(position)
    }

    #[test]
    fn ray_hits_quad_center() {
        let transform = quad_at(Vec3::new(0.0, 0.0, -5.0));

        let hit = raycast_quad(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            &transform,
            Vec2::new(2.0, 1.0),
        )
        .expect("ray should hit the plane");

        assert!((hit.distance - 5.0).abs() < 0.001);
        assert!(hit.point.abs_diff_eq(Vec3::new(0.0, 0.0, -5.0), 0.001));
        assert!(hit.normal.abs_diff_eq(Vec3::Z, 0.001));
        assert!(hit.in_widget);
    }

    #[test]
    fn ray_off_the_edge_still_hits_plane() {
        let transform = quad_at(Vec3::new(0.0, 0.0, -5.0));

        let hit = raycast_quad(
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            &transform,
            Vec2::new(2.0, 1.0),
        )
        .expect("plane hit outside the rectangle");

        assert!(!hit.in_widget);
        assert!(hit.point.abs_diff_eq(Vec3::new(3.0, 0.0, -5.0), 0.001));
    }

    #[test]
    fn parallel_and_backward_rays_miss() {
        let transform = quad_at(Vec3::new(0.0, 0.0, -5.0));
        let size = Vec2::new(2.0, 1.0);

        assert!(raycast_quad(Vec3::ZERO, Vec3::X, &transform, size).is_none());
        assert!(raycast_quad(Vec3::ZERO, Vec3::Z, &transform, size).is_none());
    }

    #[test]
    fn tilted_quad_uses_rotated_plane() {
        // Tilted back by 45 degrees about the horizontal axis.
        let transform = Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0))
            * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_4);

        let hit = raycast_quad(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            &transform,
            Vec2::new(2.0, 2.0),
        )
        .expect("ray should hit the tilted plane");

        assert!((hit.distance - 4.0).abs() < 0.001);
        assert!(hit.in_widget);
        assert!((hit.normal.length() - 1.0).abs() < 0.001);
        assert!(hit.normal.y > 0.0);
    }

    #[test]
    fn screen_center_ray_looks_forward() {
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        let projection = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.1, 100.0);

        let (origin, direction) =
            screen_to_ray(Vec2::new(400.0, 400.0), (800, 800), &view, &projection);

        assert!(origin.abs_diff_eq(Vec3::ZERO, 0.001));
        assert!(direction.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 0.001));
    }

    #[test]
    fn non_finite_ray_is_a_miss() {
        let transform = quad_at(Vec3::new(0.0, 0.0, -3.0));

        assert!(raycast_quad(Vec3::ZERO, Vec3::new(f32::NAN, 0.0, -1.0), &transform, Vec2::ONE).is_none());
        assert!(raycast_quad(Vec3::new(0.0, f32::NAN, 0.0), Vec3::NEG_Z, &transform, Vec2::ONE).is_none());
        assert!(raycast_quad(Vec3::ZERO, Vec3::new(0.0, 0.0, f32::INFINITY), &transform, Vec2::ONE).is_none());
    }

    #[test]
    fn screen_corner_ray_points_through_pixel() {
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        let projection = Mat4::perspective_rh(90f32.to_radians(), 1.0, 0.1, 100.0);

        // Right edge, vertical center: 45 degrees off axis with a 90 degree fov.
        let (_, direction) =
            screen_to_ray(Vec2::new(800.0, 400.0), (800, 800), &view, &projection);

        let expected = Vec3::new(1.0, 0.0, -1.0).normalize();
        assert!(direction.abs_diff_eq(expected, 0.001), "{direction:?}");
    }
}
