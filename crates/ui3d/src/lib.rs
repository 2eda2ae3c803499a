//! 3D widget mover for the immersive browser shell
//!
//! Floating UI panels are grabbed with a tracked controller and repositioned
//! by pointing. This crate turns each frame's controller ray into a new,
//! bounds-constrained widget placement.
//!
//! # Features
//!
//! - **Drag sessions**: start/update/end protocol keyed by controller id
//! - **Console placement**: clamped x/y with depth and tilt derived from height
//! - **Free-form placement**: literal translation of the grab-time transform
//! - **Raycasting**: controller ray vs. widget plane intersection
//!
//! # Example
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use glam::{Vec2, Vec3};
//! use widget_mover_core::{ControllerId, Placement, WorldScale};
//! use widget_mover_ui3d::{ControllerEvent, PanelWidget, WidgetManager};
//!
//! let scale = WorldScale::default();
//! let panel = PanelWidget::new(
//!     Placement::new(Vec3::new(0.0, 0.0, -1080.0)),
//!     Vec2::new(2.0, 1.25),
//!     scale,
//! );
//! let mut manager = WidgetManager::default();
//! manager.add_widget(Rc::new(RefCell::new(panel)));
//!
//! // In your input loop:
//! let controller = ControllerId(0);
//! manager.handle_controller_event(controller, ControllerEvent::Press, Vec3::ZERO, Vec3::NEG_Z);
//! let moved = manager.handle_controller_event(
//!     controller,
//!     ControllerEvent::Hold,
//!     Vec3::ZERO,
//!     Vec3::new(0.0, -0.2, -1.0).normalize(),
//! );
//! assert!(moved.is_some());
//! manager.handle_controller_event(controller, ControllerEvent::Release, Vec3::ZERO, Vec3::NEG_Z);
//! ```

pub mod components;
pub mod interaction;
pub mod manager;
pub mod mover;

// Re-export commonly used types
pub use components::{PanelWidget, WeakWidgetRef, Widget, WidgetRef};
pub use interaction::{raycast_quad, screen_to_ray, RayHit};
pub use manager::{ControllerEvent, WidgetHandle, WidgetManager};
pub use mover::{
    BoundsError, ConsoleBounds, DragSession, MoveResult, MoverError, PlacementPolicy, PolicyKind,
};

use anyhow::Result;

/// Version of the widget mover crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the widget mover with default settings
pub fn init() -> Result<()> {
    tracing::info!("Initializing widget-mover-ui3d v{}", VERSION);
    Ok(())
}
