//! Headless gesture replay.
//!
//! Feeds a [`GestureScript`] through a [`WidgetManager`] holding a single
//! panel and records the widget after every frame.

use crate::{DragTraceRecord, DragTraceSink, GesturePhase, GestureScript};
use anyhow::{Context, Result};
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};
use widget_mover_core::{FrameTick, Placement, WorldScale};
use widget_mover_ui3d::{DragSession, PanelWidget, PlacementPolicy, Widget, WidgetManager};

/// Outcome of a replayed gesture.
#[derive(Debug, Clone)]
pub struct GestureReport {
    /// One record per script step.
    pub frames: Vec<DragTraceRecord>,
    /// Widget placement after the last step.
    pub final_placement: Placement,
    /// World-space widget center after the last step.
    pub final_center: Vec3,
    /// Hold frames that moved the widget.
    pub moves: usize,
    /// Hold frames of an active drag whose ray missed the widget plane.
    pub misses: usize,
}

/// Replay `script` with `policy`, writing each frame to `sink` when given.
pub fn replay_gesture(
    script: &GestureScript,
    policy: PlacementPolicy,
    scale: WorldScale,
    mut sink: Option<&mut DragTraceSink>,
) -> Result<GestureReport> {
    let panel = Rc::new(RefCell::new(PanelWidget::new(
        script.widget,
        script.widget_size,
        scale,
    )));
    let mut manager = WidgetManager::new(DragSession::new(policy, scale));
    manager.add_widget(panel.clone());

    let mut frames = Vec::with_capacity(script.steps.len());
    let mut tick = FrameTick::ZERO;
    let mut moves = 0;
    let mut misses = 0;

    for (index, step) in script.steps.iter().enumerate() {
        let (origin, direction) = step
            .ray(script.camera.as_ref())
            .with_context(|| format!("step {index}"))?;
        let controller = step.controller();
        let was_active = manager.session().is_active(controller);

        let result = manager.handle_controller_event(controller, step.event.event(), origin, direction);
        let moved = result.is_some();
        if moved {
            moves += 1;
        } else if was_active && step.event == GesturePhase::Hold {
            debug!(tick = tick.0, %controller, "drag frame missed the widget plane");
            misses += 1;
        }

        let widget = panel.borrow();
        let record = DragTraceRecord {
            tick,
            controller,
            event: step.event,
            dragging: manager.session().is_dragging(),
            moved,
            placement: widget.placement(),
            center: widget.transform().transform_point3(Vec3::ZERO),
        };
        if let Some(sink) = sink.as_deref_mut() {
            sink.write(&record)?;
        }
        frames.push(record);
        tick = tick.advance(1);
    }

    let (final_placement, final_center) = {
        let widget = panel.borrow();
        (widget.placement(), widget.transform().transform_point3(Vec3::ZERO))
    };
    info!(
        frames = frames.len(),
        moves,
        misses,
        policy = ?policy.kind(),
        "gesture replay finished"
    );

    Ok(GestureReport {
        frames,
        final_placement,
        final_center,
        moves,
        misses,
    })
}
