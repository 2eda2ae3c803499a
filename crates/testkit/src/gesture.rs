//! Scripted controller gestures.
//!
//! A gesture script describes one widget and a sequence of controller
//! frames (press, hold, release). Rays are given directly, or as a 2D
//! pointer position projected through the script's camera.

use anyhow::{bail, Context, Result};
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use widget_mover_core::{ControllerId, Placement};
use widget_mover_ui3d::{screen_to_ray, ControllerEvent};

/// A recorded or hand-written drag gesture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureScript {
    /// Placement of the widget before the gesture.
    pub widget: Placement,
    /// Widget size in world units.
    #[serde(default = "default_widget_size")]
    pub widget_size: Vec2,
    /// Camera used to resolve `pointer` steps.
    #[serde(default)]
    pub camera: Option<ScriptCamera>,
    /// Frames, in order.
    pub steps: Vec<GestureStep>,
}

/// Trigger phase of a scripted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Trigger pressed.
    Press,
    /// Trigger held.
    Hold,
    /// Trigger released.
    Release,
}

impl GesturePhase {
    /// The controller event fed to the widget manager.
    pub fn event(self) -> ControllerEvent {
        match self {
            Self::Press => ControllerEvent::Press,
            Self::Hold => ControllerEvent::Hold,
            Self::Release => ControllerEvent::Release,
        }
    }
}

/// One scripted controller frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureStep {
    /// Controller index.
    #[serde(default)]
    pub controller: u32,
    /// Trigger phase.
    pub event: GesturePhase,
    /// Ray origin (ignored when `pointer` is set).
    #[serde(default)]
    pub origin: Vec3,
    /// Ray direction (ignored when `pointer` is set).
    #[serde(default = "default_direction")]
    pub direction: Vec3,
    /// Pointer position in screen pixels, projected through the script camera.
    #[serde(default)]
    pub pointer: Option<Vec2>,
}

/// Desktop camera standing in for a head-mounted display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScriptCamera {
    /// Eye position.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    /// Screen size in pixels.
    pub screen: (u32, u32),
}

impl ScriptCamera {
    fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    fn projection(&self) -> Mat4 {
        let aspect = self.screen.0 as f32 / self.screen.1 as f32;
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, 0.1, 100.0)
    }
}

fn default_widget_size() -> Vec2 {
    Vec2::new(2.0, 1.25)
}

fn default_direction() -> Vec3 {
    Vec3::NEG_Z
}

fn default_fov() -> f32 {
    70.0
}

impl GestureScript {
    /// Load a script from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read gesture script {}", path.display()))?;
        Self::parse_str(&contents)
            .with_context(|| format!("invalid gesture script {}", path.display()))
    }

    /// Parse a script from JSON.
    pub fn parse_str(contents: &str) -> Result<Self> {
        let script: GestureScript = serde_json::from_str(contents)?;
        if script.steps.is_empty() {
            bail!("gesture script contains no steps");
        }
        if script.steps.iter().any(|step| step.pointer.is_some()) && script.camera.is_none() {
            bail!("gesture script uses pointer steps but defines no camera");
        }
        if let Some(camera) = &script.camera {
            if camera.screen.0 == 0 || camera.screen.1 == 0 {
                bail!(
                    "camera screen must be non-empty, got {}x{}",
                    camera.screen.0,
                    camera.screen.1
                );
            }
        }
        Ok(script)
    }
}

impl GestureStep {
    /// Controller driving this frame.
    pub fn controller(&self) -> ControllerId {
        ControllerId(self.controller)
    }

    /// World-space ray for this frame.
    pub fn ray(&self, camera: Option<&ScriptCamera>) -> Result<(Vec3, Vec3)> {
        match (self.pointer, camera) {
            (Some(pointer), Some(camera)) => Ok(screen_to_ray(
                pointer,
                camera.screen,
                &camera.view(),
                &camera.projection(),
            )),
            (Some(_), None) => bail!("pointer step without a camera"),
            (None, _) => {
                let direction = self.direction.normalize_or_zero();
                if direction == Vec3::ZERO {
                    bail!("ray direction must be non-zero");
                }
                Ok((self.origin, direction))
            }
        }
    }
}
