//! Reference scene host
//!
//! A ground plane at y = 0, a set of named boxes and one camera. Box hits are
//! answered by [`ReplayScene::intersect_scene`]; the ground plane is the pick
//! fallback applied by the engine itself.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{Quat, Vec2, Vec3};
use parking_lot::Mutex;
use uuid::Uuid;
use vnav_core::{BoundingBox, FovMetadata, HoverPicking, Ray, SceneHost, SceneNode};

use crate::camera::CameraState;

/// Shared handle to the scene camera
#[derive(Debug, Clone)]
pub struct CameraNode(Arc<Mutex<CameraState>>);

impl CameraNode {
    /// Wrap a camera state in a shared handle
    pub fn new(state: CameraState) -> Self {
        Self(Arc::new(Mutex::new(state)))
    }

    /// Snapshot of the camera state
    pub fn state(&self) -> CameraState {
        *self.0.lock()
    }
}

impl SceneNode for CameraNode {
    fn position(&self) -> Vec3 {
        self.0.lock().pose.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.0.lock().pose.position = position;
    }

    fn orientation(&self) -> Quat {
        self.0.lock().pose.orientation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.0.lock().pose.orientation = orientation;
    }

    fn fov_metadata(&self) -> FovMetadata {
        self.0.lock().fov
    }
}

/// A named axis-aligned box
#[derive(Debug, Clone)]
pub struct SceneBox {
    /// Name used by scripts to refer to the box
    pub name: String,
    /// World-space extents
    pub bounds: BoundingBox,
}

/// Scene host used by the replay tool
#[derive(Debug)]
pub struct ReplayScene {
    camera_id: Uuid,
    camera: CameraNode,
    boxes: HashMap<Uuid, SceneBox>,
    viewport: Vec2,
    picking: HoverPicking,
}

impl ReplayScene {
    /// Create an empty scene viewed through `camera`
    pub fn new(camera: CameraState, viewport: Vec2) -> Self {
        Self {
            camera_id: Uuid::new_v4(),
            camera: CameraNode::new(camera),
            boxes: HashMap::new(),
            viewport,
            picking: HoverPicking::default(),
        }
    }

    // ============== Accessors ==============

    /// ID of the camera node
    pub fn camera_id(&self) -> Uuid {
        self.camera_id
    }

    /// Handle to the camera node
    pub fn camera(&self) -> &CameraNode {
        &self.camera
    }

    /// All boxes by ID
    pub fn boxes(&self) -> &HashMap<Uuid, SceneBox> {
        &self.boxes
    }

    /// Add a box, returns its ID
    pub fn add_box(&mut self, name: impl Into<String>, bounds: BoundingBox) -> Uuid {
        let id = Uuid::new_v4();
        self.boxes.insert(
            id,
            SceneBox {
                name: name.into(),
                bounds,
            },
        );
        id
    }

    /// Find a box by name
    pub fn find_box(&self, name: &str) -> Option<Uuid> {
        self.boxes
            .iter()
            .find(|(_, b)| b.name == name)
            .map(|(id, _)| *id)
    }
}

impl SceneHost for ReplayScene {
    type Node = CameraNode;

    fn node(&self, id: Uuid) -> Option<CameraNode> {
        (id == self.camera_id).then(|| self.camera.clone())
    }

    fn generate_ray(&self, screen_x: f32, screen_y: f32) -> Ray {
        self.camera
            .state()
            .screen_to_ray(screen_x, screen_y, self.viewport.x, self.viewport.y)
    }

    fn intersect_scene(&self, ray: &Ray) -> Option<Vec3> {
        self.boxes
            .values()
            .filter_map(|b| b.bounds.intersect_ray(ray))
            .min_by(|a, b| a.total_cmp(b))
            .map(|t| ray.at(t))
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn world_bounding_box(&self, id: Uuid) -> Option<BoundingBox> {
        self.boxes.get(&id).map(|b| b.bounds)
    }

    fn hover_picking(&self) -> HoverPicking {
        self.picking.clone()
    }
}
