//! Controller ray interaction
//!
//! Ray-plane intersection against widget quads, and the pointer-to-ray
//! conversion used when a mouse stands in for a tracked controller.

pub mod raycaster;

pub use raycaster::{raycast_quad, screen_to_ray, RayHit};
