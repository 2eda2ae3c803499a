//! Widget components
//!
//! The [`Widget`] trait is the narrow surface the mover needs from the scene
//! graph. [`PanelWidget`] is the concrete floating panel used by the manager
//! and the replay tool.

pub mod panel;

pub use panel::PanelWidget;

use crate::interaction::RayHit;
use glam::{Mat4, Vec3};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use widget_mover_core::Placement;

/// Shared handle to a widget, owned by the scene graph.
pub type WidgetRef = Rc<RefCell<dyn Widget>>;

/// Non-owning handle held by a drag session.
pub type WeakWidgetRef = Weak<RefCell<dyn Widget>>;

/// Scene-graph surface of a movable widget
pub trait Widget {
    /// Current world transform
    fn transform(&self) -> Mat4;

    /// Overwrite the world transform without touching the placement
    fn set_transform(&mut self, transform: Mat4);

    /// Current placement
    fn placement(&self) -> Placement;

    /// Replace the placement and re-layout the widget
    fn set_placement(&mut self, placement: Placement);

    /// Intersect a controller ray with the widget's plane
    fn test_controller_intersection(&self, origin: Vec3, direction: Vec3) -> Option<RayHit>;
}
