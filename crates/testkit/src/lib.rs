#![warn(missing_docs)]
//! Deterministic testing surfaces: scripted gestures, replay, and JSONL traces.

mod gesture;
mod replay;

use anyhow::Result;
use glam::Vec3;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use widget_mover_core::{ControllerId, FrameTick, Placement};

pub use gesture::*;
pub use replay::*;

/// One replayed controller frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DragTraceRecord {
    /// Frame index within the replay.
    pub tick: FrameTick,
    /// Controller that produced the frame.
    pub controller: ControllerId,
    /// Trigger phase.
    pub event: GesturePhase,
    /// Whether a drag is in progress after the frame.
    pub dragging: bool,
    /// Whether the frame moved the widget.
    pub moved: bool,
    /// Widget placement after the frame.
    pub placement: Placement,
    /// World-space widget center after the frame.
    pub center: Vec3,
}

/// A sink that writes newline-delimited JSON trace records to disk.
pub struct DragTraceSink {
    file: File,
}

impl DragTraceSink {
    /// Create a sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            file: File::create(path)?,
        })
    }

    /// Append a record to the trace.
    pub fn write(&mut self, record: &DragTraceRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
