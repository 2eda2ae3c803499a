//! Widget Manager - Routes controller events into drag sessions

use crate::components::WidgetRef;
use crate::interaction::RayHit;
use crate::mover::{DragSession, MoveResult};
use glam::Vec3;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, warn};
use widget_mover_core::ControllerId;

/// Handle to a registered widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetHandle(pub u64);

/// Controller trigger phase reported by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Trigger went down this frame
    Press,
    /// Trigger is held
    Hold,
    /// Trigger was released this frame
    Release,
}

/// Owns the scene's movable widgets and the single drag session.
pub struct WidgetManager {
    widgets: BTreeMap<WidgetHandle, WidgetRef>,
    session: DragSession,
    next_handle: u64,
}

impl WidgetManager {
    /// Create a manager driving drags through `session`
    pub fn new(session: DragSession) -> Self {
        Self {
            widgets: BTreeMap::new(),
            session,
            next_handle: 1,
        }
    }

    /// Register a widget
    pub fn add_widget(&mut self, widget: WidgetRef) -> WidgetHandle {
        let handle = WidgetHandle(self.next_handle);
        self.next_handle += 1;
        self.widgets.insert(handle, widget);
        handle
    }

    /// Remove a widget. A drag on it ends on the next frame.
    pub fn remove_widget(&mut self, handle: WidgetHandle) -> Option<WidgetRef> {
        self.widgets.remove(&handle)
    }

    /// Look up a widget
    pub fn widget(&self, handle: WidgetHandle) -> Option<&WidgetRef> {
        self.widgets.get(&handle)
    }

    /// Get the number of registered widgets
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// The drag session
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Handle of the widget currently being dragged
    pub fn dragged_widget(&self) -> Option<WidgetHandle> {
        let dragged = self.session.current_widget()?;
        self.widgets
            .iter()
            .find(|(_, widget)| Rc::ptr_eq(widget, &dragged))
            .map(|(handle, _)| *handle)
    }

    /// Raycast against all widgets to find the one under the controller ray.
    /// Only hits inside a widget rectangle count.
    pub fn pick(&self, origin: Vec3, direction: Vec3) -> Option<(WidgetHandle, RayHit)> {
        let mut closest_hit: Option<(WidgetHandle, RayHit)> = None;
        let mut closest_distance = f32::MAX;

        for (handle, widget) in &self.widgets {
            let Some(hit) = widget.borrow().test_controller_intersection(origin, direction) else {
                continue;
            };
            if hit.in_widget && hit.distance < closest_distance {
                closest_distance = hit.distance;
                closest_hit = Some((*handle, hit));
            }
        }

        closest_hit
    }

    /// Feed one controller event. Returns the move applied this frame, if any.
    pub fn handle_controller_event(
        &mut self,
        controller: ControllerId,
        event: ControllerEvent,
        origin: Vec3,
        direction: Vec3,
    ) -> Option<MoveResult> {
        match event {
            ControllerEvent::Press => {
                let (handle, hit) = self.pick(origin, direction)?;
                let widget = self.widgets.get(&handle)?;
                debug!(%controller, handle = handle.0, "controller grabbed widget");
                self.session.start(widget, controller, hit.point);
                None
            }
            ControllerEvent::Hold => {
                // A dead widget still reports its controller so the update can retire the drag.
                if self.session.attached_controller() != Some(controller) {
                    return None;
                }
                match self.session.update(origin, direction) {
                    Ok(Some(result)) => {
                        let widget = self.session.current_widget()?;
                        result.apply_to(&mut *widget.borrow_mut());
                        Some(result)
                    }
                    Ok(None) => None,
                    Err(err) => {
                        warn!(%controller, "drag update failed: {err}");
                        self.session.end();
                        None
                    }
                }
            }
            ControllerEvent::Release => {
                if self.session.attached_controller() == Some(controller) {
                    self.session.end();
                }
                None
            }
        }
    }
}

impl Default for WidgetManager {
    fn default() -> Self {
        Self::new(DragSession::default())
    }
}
