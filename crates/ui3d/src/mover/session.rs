//! Drag session - State of one grab-move-release gesture

use super::solver::{MoveResult, PlacementPolicy};
use super::MoverError;
use crate::components::{WeakWidgetRef, WidgetRef};
use glam::{Mat4, Vec3};
use std::rc::Rc;
use tracing::{debug, trace, warn};
use widget_mover_core::{ControllerId, Placement, WorldScale};

/// Snapshot taken when a controller grabs a widget.
#[derive(Debug)]
struct Grab {
    widget: WeakWidgetRef,
    controller: ControllerId,
    grab_point: Vec3,
    initial_transform: Mat4,
    initial_placement: Placement,
    working_placement: Placement,
}

/// Tracks which controller is dragging which widget.
///
/// Idle until [`DragSession::start`]; [`DragSession::end`] returns it to idle.
/// The session only holds a weak reference to the widget, so removing the
/// widget from the scene mid-drag never keeps it alive.
#[derive(Debug)]
pub struct DragSession {
    policy: PlacementPolicy,
    scale: WorldScale,
    grab: Option<Grab>,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(PlacementPolicy::default(), WorldScale::default())
    }
}

impl DragSession {
    /// Create an idle session
    pub fn new(policy: PlacementPolicy, scale: WorldScale) -> Self {
        Self {
            policy,
            scale,
            grab: None,
        }
    }

    /// Policy used to solve each frame
    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// True iff a widget is attached and `controller` is the one dragging it
    pub fn is_active(&self, controller: ControllerId) -> bool {
        self.grab
            .as_ref()
            .is_some_and(|grab| grab.controller == controller && grab.widget.strong_count() > 0)
    }

    /// True while any controller is dragging
    pub fn is_dragging(&self) -> bool {
        self.grab
            .as_ref()
            .is_some_and(|grab| grab.widget.strong_count() > 0)
    }

    /// Controller driving the current drag
    pub fn attached_controller(&self) -> Option<ControllerId> {
        self.grab.as_ref().map(|grab| grab.controller)
    }

    /// Begin dragging `widget` with `controller`, grabbed at `grab_point`.
    ///
    /// Any drag already in progress is replaced; the last controller to start
    /// wins. The caller has already hit-tested the widget.
    pub fn start(&mut self, widget: &WidgetRef, controller: ControllerId, grab_point: Vec3) {
        if let Some(previous) = self.grab.as_ref() {
            debug!(
                from = %previous.controller,
                to = %controller,
                "drag restarted before release"
            );
        }

        let (initial_transform, initial_placement) = {
            let widget = widget.borrow();
            (widget.transform(), widget.placement())
        };

        debug!(%controller, ?grab_point, "drag started");
        self.grab = Some(Grab {
            widget: Rc::downgrade(widget),
            controller,
            grab_point,
            initial_transform,
            initial_placement,
            working_placement: initial_placement,
        });
    }

    /// Solve one frame of the drag for the controller ray `origin`/`direction`.
    ///
    /// Returns `Ok(None)` when the ray misses the widget's plane; the widget
    /// should stay where it is for this frame. The result is not applied to
    /// the widget; see [`MoveResult::apply_to`].
    pub fn update(
        &mut self,
        origin: Vec3,
        direction: Vec3,
    ) -> Result<Option<MoveResult>, MoverError> {
        debug_assert!(self.grab.is_some(), "DragSession::update called while idle");
        let Some(grab) = self.grab.as_mut() else {
            return Err(MoverError::NotDragging);
        };

        let Some(widget) = grab.widget.upgrade() else {
            warn!(controller = %grab.controller, "dragged widget was released mid-drag");
            self.grab = None;
            return Err(MoverError::WidgetReleased);
        };

        let hit = widget.borrow().test_controller_intersection(origin, direction);
        let Some(hit) = hit else {
            trace!(controller = %grab.controller, "drag ray missed widget plane");
            return Ok(None);
        };

        let delta = hit.point - grab.grab_point;
        let result = self.policy.solve(
            &grab.initial_placement,
            &grab.initial_transform,
            delta,
            self.scale,
        );
        if let MoveResult::Placement(placement) = result {
            grab.working_placement = placement;
        }

        trace!(controller = %grab.controller, ?delta, "drag frame solved");
        Ok(Some(result))
    }

    /// Release the widget. Calling this while idle does nothing.
    pub fn end(&mut self) {
        if let Some(grab) = self.grab.take() {
            debug!(controller = %grab.controller, "drag ended");
        }
    }

    /// Widget being dragged, if it is still alive
    pub fn current_widget(&self) -> Option<WidgetRef> {
        self.grab.as_ref().and_then(|grab| grab.widget.upgrade())
    }

    /// World point where the drag began
    pub fn grab_point(&self) -> Option<Vec3> {
        self.grab.as_ref().map(|grab| grab.grab_point)
    }

    /// Placement captured at grab time
    pub fn initial_placement(&self) -> Option<Placement> {
        self.grab.as_ref().map(|grab| grab.initial_placement)
    }

    /// Latest placement solved for this drag
    pub fn working_placement(&self) -> Option<Placement> {
        self.grab.as_ref().map(|grab| grab.working_placement)
    }
}
