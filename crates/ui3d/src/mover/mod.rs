//! Widget mover
//!
//! Controller-driven repositioning of floating widgets: a [`DragSession`]
//! tracks the gesture and a [`PlacementPolicy`] turns each frame's ray
//! displacement into a [`MoveResult`].

pub mod session;
pub mod solver;

pub use session::DragSession;
pub use solver::{
    depth_for, solve_constrained, solve_free_form, tilt_for, BoundsError, ConsoleBounds,
    MoveResult, PlacementPolicy, PolicyKind,
};

use thiserror::Error;

/// Errors surfaced by a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoverError {
    /// `update` was called with no drag in progress.
    #[error("no drag in progress")]
    NotDragging,
    /// The dragged widget was removed from the scene; the drag has ended.
    #[error("dragged widget was released by the scene graph")]
    WidgetReleased,
}
