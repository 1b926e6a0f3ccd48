//! In-memory host for engine tests

use std::collections::HashMap;
use std::sync::Arc;

use glam::{Quat, Vec2, Vec3};
use parking_lot::Mutex;
use uuid::Uuid;
use vnav_core::{
    BoundingBox, FovMetadata, HoverPicking, Pose, Ray, SceneHost, SceneNode, field_of_view,
};

#[derive(Debug)]
pub(crate) struct MockCamera {
    pub pose: Pose,
    pub fov: FovMetadata,
    pub parent_translation: Vec3,
}

#[derive(Debug, Clone)]
pub(crate) struct MockNode(pub Arc<Mutex<MockCamera>>);

impl SceneNode for MockNode {
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
    fn parent_world_translation(&self) -> Vec3 {
        self.0.lock().parent_translation
    }
}

pub(crate) struct MockHost {
    pub camera_id: Uuid,
    pub camera: MockNode,
    pub viewport: Vec2,
    /// Returned for every scene query
    pub scene_hit: Option<Vec3>,
    pub boxes: HashMap<Uuid, BoundingBox>,
    pub picking: HoverPicking,
    pub available: bool,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new(Pose::new(Vec3::new(0.0, 0.0, 10.0), Quat::IDENTITY))
    }
}

impl MockHost {
    pub fn new(pose: Pose) -> Self {
        Self {
            camera_id: Uuid::new_v4(),
            camera: MockNode(Arc::new(Mutex::new(MockCamera {
                pose,
                fov: FovMetadata::default(),
                parent_translation: Vec3::ZERO,
            }))),
            viewport: Vec2::new(800.0, 600.0),
            scene_hit: None,
            boxes: HashMap::new(),
            picking: HoverPicking::new(true),
            available: true,
        }
    }

    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        Self::new(Pose::looking_from(eye, target).expect("eye and target differ"))
    }

    pub fn pose(&self) -> Pose {
        self.camera.0.lock().pose
    }
}

impl SceneHost for MockHost {
    type Node = MockNode;

    fn is_available(&self) -> bool {
        self.available
    }

    fn node(&self, id: Uuid) -> Option<MockNode> {
        (id == self.camera_id).then(|| self.camera.clone())
    }

    fn generate_ray(&self, screen_x: f32, screen_y: f32) -> Ray {
        let camera = self.camera.0.lock();
        let half = (field_of_view(&camera.fov) * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;
        let ndc_x = 2.0 * screen_x / self.viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen_y / self.viewport.y;
        let local = Vec3::new(ndc_x * half * aspect, ndc_y * half, -1.0);
        Ray::new(camera.pose.position, camera.pose.orientation * local)
    }

    fn intersect_scene(&self, _ray: &Ray) -> Option<Vec3> {
        self.scene_hit
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn world_bounding_box(&self, id: Uuid) -> Option<BoundingBox> {
        self.boxes.get(&id).copied()
    }

    fn hover_picking(&self) -> HoverPicking {
        self.picking.clone()
    }
}
