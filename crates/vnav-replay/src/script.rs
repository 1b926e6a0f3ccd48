//! Input scripts and their replay
//!
//! A script describes a scene (camera, viewport, boxes), the navigation
//! options and a sequence of input events. Replaying it feeds every event to
//! a [`Navigator`] and records the camera pose after each one.
//!
//! ```ron
//! (
//!     options: (mode: panning),
//!     camera: (position: (0.0, 10.0, 10.0), target: (0.0, 0.0, 0.0)),
//!     boxes: [(name: "crate", min: (-1.0, 0.0, -1.0), max: (1.0, 2.0, 1.0))],
//!     events: [
//!         MouseDown(button: 0, x: 400.0, y: 300.0),
//!         MouseMove(x: 450.0, y: 320.0),
//!         MouseUp(x: 450.0, y: 320.0),
//!         Examine("crate"),
//!     ],
//! )
//! ```

use std::path::Path;

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use vnav_core::{BoundingBox, NavError, NavigationOptions};
use vnav_input::{Key, Navigator};

use crate::camera::CameraState;
use crate::scene::ReplayScene;

fn default_viewport() -> Vec2 {
    Vec2::new(800.0, 600.0)
}

/// Initial camera placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSetup {
    /// Eye position
    pub position: Vec3,
    /// Point the camera initially faces
    pub target: Vec3,
    /// Vertical field of view in degrees
    #[serde(default)]
    pub fov: Option<f32>,
}

/// A named box in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxSpec {
    /// Name referenced by `Examine` events
    pub name: String,
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

/// One input event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Button press at a screen position
    MouseDown { button: usize, x: f32, y: f32 },
    /// Pointer motion
    MouseMove { x: f32, y: f32 },
    /// Button release
    MouseUp { x: f32, y: f32 },
    /// Touches down after the event
    TouchStart(Vec<Vec2>),
    /// Current touch positions
    TouchMove(Vec<Vec2>),
    /// Touches still down after the event
    TouchEnd(Vec<Vec2>),
    /// Touches still down after the event
    TouchCancel(Vec<Vec2>),
    /// Key press
    Key(Key),
    /// Wheel delta; positive moves the camera back
    Wheel(f32),
    /// Frame the box with this name
    Examine(String),
    /// Turn the camera to face a point
    LookAt(Vec3),
}

impl Event {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::MouseDown { .. } => "mouseDown",
            Self::MouseMove { .. } => "mouseMove",
            Self::MouseUp { .. } => "mouseUp",
            Self::TouchStart(_) => "touchStart",
            Self::TouchMove(_) => "touchMove",
            Self::TouchEnd(_) => "touchEnd",
            Self::TouchCancel(_) => "touchCancel",
            Self::Key(_) => "key",
            Self::Wheel(_) => "wheel",
            Self::Examine(_) => "examine",
            Self::LookAt(_) => "lookAt",
        }
    }
}

/// A replayable input script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub options: NavigationOptions,
    pub camera: CameraSetup,
    /// Viewport size in pixels
    #[serde(default = "default_viewport")]
    pub viewport: Vec2,
    #[serde(default)]
    pub boxes: Vec<BoxSpec>,
    /// Events applied in order
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Script {
    /// Load a script from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ReplayError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Parse a script from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ReplayError> {
        ron::from_str(content).map_err(|e| ReplayError::Deserialize(e.to_string()))
    }

    /// Build the scene described by the script
    pub fn build_scene(&self) -> Result<ReplayScene, ReplayError> {
        let mut camera = CameraState::looking_at(self.camera.position, self.camera.target)
            .ok_or_else(|| NavError::invalid_option("camera", "position and target coincide"))?;
        if let Some(fov) = self.camera.fov {
            camera.set_fov_degrees(fov);
        }

        let mut scene = ReplayScene::new(camera, self.viewport);
        for spec in &self.boxes {
            scene.add_box(spec.name.clone(), BoundingBox::new(spec.min, spec.max));
        }
        Ok(scene)
    }
}

/// Camera pose after one replayed event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseRecord {
    /// Position of the event in the script
    pub index: usize,
    /// Event name
    pub event: &'static str,
    /// Active gesture after the event
    pub action: Option<&'static str>,
    /// Camera position after the event
    pub position: Vec3,
    /// Camera orientation after the event
    pub orientation: Quat,
    /// View direction
    pub direction: Vec3,
    /// Orbit pivot after the event
    pub examine_point: Vec3,
}

/// Replay errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ReplayError {
    /// The script file could not be read
    #[error("IO error: {0}")]
    Io(String),
    /// The script is not valid RON for [`Script`]
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    /// The navigator rejected the scene or the options
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavError),
    /// An event names a box that is not in the scene
    #[error("Unknown node: {0}")]
    UnknownNode(String),
}

/// Replay a script and record the pose after every event
pub fn replay(script: &Script) -> Result<Vec<PoseRecord>, ReplayError> {
    let scene = script.build_scene()?;
    let camera_id = scene.camera_id();
    let mut nav = Navigator::new(scene, camera_id, script.options.clone())?;

    tracing::info!(
        mode = script.options.mode.name(),
        events = script.events.len(),
        "replaying script"
    );

    let mut records = Vec::with_capacity(script.events.len());
    for (index, event) in script.events.iter().enumerate() {
        apply(&mut nav, event)?;

        let pose = nav.pose();
        records.push(PoseRecord {
            index,
            event: event.name(),
            action: nav.current_action().map(|action| action.name()),
            position: pose.position,
            orientation: pose.orientation,
            direction: pose.direction(),
            examine_point: nav.examine_point(),
        });
    }

    tracing::info!(records = records.len(), "replay finished");
    Ok(records)
}

fn apply(nav: &mut Navigator<ReplayScene>, event: &Event) -> Result<(), ReplayError> {
    match event {
        Event::MouseDown { button, x, y } => {
            nav.on_mouse_down(*button, *x, *y);
        }
        Event::MouseMove { x, y } => {
            nav.on_mouse_move(*x, *y);
        }
        Event::MouseUp { x, y } => nav.on_mouse_up(*x, *y),
        Event::TouchStart(touches) => nav.on_touch_start(touches),
        Event::TouchMove(touches) => {
            nav.on_touch_move(touches);
        }
        Event::TouchEnd(touches) => nav.on_touch_end(touches),
        Event::TouchCancel(touches) => nav.on_touch_cancel(touches),
        Event::Key(key) => {
            nav.on_key_down(*key);
        }
        Event::Wheel(delta) => {
            nav.on_wheel(*delta);
        }
        Event::Examine(name) => {
            let id = nav
                .host()
                .find_box(name)
                .ok_or_else(|| ReplayError::UnknownNode(name.clone()))?;
            if let Err(err) = nav.examine(id) {
                tracing::warn!(%err, %name, "examine rejected");
            }
        }
        Event::LookAt(target) => {
            if !nav.look_at(*target) {
                tracing::warn!(?target, "look-at target coincides with camera");
            }
        }
    }
    Ok(())
}
