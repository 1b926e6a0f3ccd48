//! Gesture engine entry points
//!
//! [`Navigator`] receives raw input events, classifies them through the
//! [`ModeTable`] of its mode and drives the start/move/end lifecycle of the
//! selected [`ActionKind`].
//!
//! ```text
//! Idle --press / touch start on a mapped slot--> Active(action)
//! Active --release / touch end / cancel / unmapped touch count--> Idle
//! ```
//!
//! Hover picking is suppressed for as long as a gesture is active.

use glam::{Vec2, Vec3};
use uuid::Uuid;
use vnav_core::{
    BoundingBox, NavError, NavResult, NavigationMode, NavigationOptions, Pose, SceneHost,
    SceneNode, Transform,
};

use crate::actions::{ActionContext, ActionKind};
use crate::gesture::GestureState;
use crate::keys::{Key, KeyMotion};
use crate::mode::ModeTable;

/// A move that reached an action handler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveEvent {
    /// Action that handled the move
    pub action: ActionKind,
    /// Pointer position
    pub position: Vec2,
    /// Delta since the previous event of the gesture
    pub delta: Vec2,
}

/// Gesture engine controlling one scene node
pub struct Navigator<H: SceneHost> {
    host: H,
    transform: Transform<H::Node>,
    options: NavigationOptions,
    table: ModeTable,
    up: Vec3,
    gesture: GestureState,
}

impl<H: SceneHost> Navigator<H> {
    /// Create a navigator for the node `node_id`
    ///
    /// Fails if the host is unavailable, the node does not exist or an option
    /// is invalid. Nothing is constructed in that case.
    pub fn new(host: H, node_id: Uuid, options: NavigationOptions) -> NavResult<Self> {
        if !host.is_available() {
            return Err(NavError::HostUnavailable);
        }
        options.validate()?;

        let node = host.node(node_id).ok_or(NavError::NodeNotFound(node_id))?;
        let transform = Transform::new(node);

        let up = match options.up_vector {
            Some(up) => up.normalize(),
            None => transform.up(),
        };
        let examine_point = options
            .examine_point
            .unwrap_or_else(|| -transform.node().parent_world_translation());

        tracing::debug!(
            mode = options.mode.name(),
            %node_id,
            ?examine_point,
            "navigator created"
        );

        Ok(Self {
            host,
            transform,
            table: ModeTable::for_mode(options.mode),
            options,
            up,
            gesture: GestureState::new(examine_point),
        })
    }

    // ============== Accessors ==============

    /// Navigation mode
    pub fn mode(&self) -> NavigationMode {
        self.options.mode
    }

    /// Construction options
    pub fn options(&self) -> &NavigationOptions {
        &self.options
    }

    /// Action tables in use
    pub fn table(&self) -> &ModeTable {
        &self.table
    }

    /// Resolved up vector
    pub fn up_vector(&self) -> Vec3 {
        self.up
    }

    /// The host environment
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Transform facade of the controlled node
    pub fn transform(&self) -> &Transform<H::Node> {
        &self.transform
    }

    /// Current pose of the controlled node
    pub fn pose(&self) -> Pose {
        self.transform.pose()
    }

    /// Gesture state
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Action of the active gesture
    pub fn current_action(&self) -> Option<ActionKind> {
        self.gesture.current
    }

    /// Whether a gesture is active
    pub fn is_active(&self) -> bool {
        self.gesture.current.is_some()
    }

    /// Orbit pivot
    pub fn examine_point(&self) -> Vec3 {
        self.gesture.pivots.examine_point
    }

    /// Set the orbit pivot
    pub fn set_examine_point(&mut self, point: Vec3) {
        self.gesture.pivots.examine_point = point;
    }

    /// Panning pivot of the active gesture
    pub fn drag_point(&self) -> Option<Vec3> {
        self.gesture.pivots.drag_point
    }

    // ============== Mouse ==============

    /// Mouse button pressed
    ///
    /// Returns true if the press was consumed; an unmapped button leaves the
    /// engine idle so the host can keep its default handling.
    pub fn on_mouse_down(&mut self, button: usize, x: f32, y: f32) -> bool {
        if let Some(current) = self.gesture.current {
            tracing::trace!(button, %current, "press ignored during active gesture");
            return true;
        }

        let Some(action) = self.table.mouse_action(button) else {
            return false;
        };

        self.begin(action, Vec2::new(x, y));
        true
    }

    /// Mouse moved
    pub fn on_mouse_move(&mut self, x: f32, y: f32) -> Option<MoveEvent> {
        let action = self.gesture.current?;
        let position = Vec2::new(x, y);
        let delta = position - self.gesture.prev_pointer;
        self.gesture.prev_pointer = position;

        self.apply_move(action, position, delta)
    }

    /// Mouse button released
    pub fn on_mouse_up(&mut self, x: f32, y: f32) {
        self.finish(Vec2::new(x, y));
    }

    /// Mouse wheel; positive `delta` moves the camera back
    pub fn on_wheel(&mut self, delta: f32) -> bool {
        if !self.options.wheel_zoom || delta == 0.0 {
            return false;
        }

        let position = self.gesture.prev_pointer;
        ActionKind::Dolly.move_by(&mut self.context(), position, Vec2::new(0.0, delta));
        true
    }

    // ============== Touch ==============

    /// Touch started; `touches` are all touches currently down
    pub fn on_touch_start(&mut self, touches: &[Vec2]) {
        self.touches_changed(touches);
    }

    /// Touch moved; only the first touch drives the delta
    pub fn on_touch_move(&mut self, touches: &[Vec2]) -> Option<MoveEvent> {
        let action = self.gesture.current?;
        let position = *touches.first()?;
        let previous = self
            .gesture
            .prev_touches
            .first()
            .copied()
            .unwrap_or(position);

        self.gesture.prev_touches = touches.to_vec();
        self.gesture.prev_pointer = position;

        self.apply_move(action, position, position - previous)
    }

    /// Touch ended; `touches` are the touches still down
    pub fn on_touch_end(&mut self, touches: &[Vec2]) {
        self.touches_changed(touches);
    }

    /// Touch cancelled; handled exactly like [`Self::on_touch_end`]
    pub fn on_touch_cancel(&mut self, touches: &[Vec2]) {
        self.touches_changed(touches);
    }

    // ============== Keyboard ==============

    /// Key pressed; returns true if the key moved the camera
    pub fn on_key_down(&mut self, key: Key) -> bool {
        if !self.options.use_keys {
            return false;
        }

        let speed = self.options.move_speed();
        let offset = match key.motion() {
            KeyMotion::Forward => self.transform.direction() * speed,
            KeyMotion::Backward => -self.transform.direction() * speed,
            KeyMotion::Left => -self.transform.right() * speed,
            KeyMotion::Right => self.transform.right() * speed,
        };

        self.transform.translate(offset);
        true
    }

    // ============== Direct camera control ==============

    /// Frame a node's world bounding box
    ///
    /// The camera keeps its orientation and backs off from the box centre far
    /// enough for the bounding sphere to fit the vertical field of view. The
    /// centre becomes the new examine point. A target without a valid bounding
    /// box is reported and leaves the camera untouched.
    pub fn examine(&mut self, target: Uuid) -> NavResult<()> {
        let Some(bbox) = self
            .host
            .world_bounding_box(target)
            .filter(BoundingBox::is_valid)
        else {
            tracing::warn!(%target, "examine target has no bounding box");
            return Err(NavError::NotExaminable(target));
        };

        let center = bbox.center();
        let distance = bbox.radius() / (self.transform.field_of_view() * 0.5).sin();
        let pose = self.transform.pose();

        self.transform.set_pose(Pose {
            position: center - pose.direction() * distance,
            orientation: pose.orientation,
        });
        self.gesture.pivots.examine_point = center;

        tracing::debug!(%target, ?center, distance, "examined target");
        Ok(())
    }

    /// Turn the camera to face a point
    pub fn look_at(&mut self, point: Vec3) -> bool {
        self.transform.look_at(point)
    }

    // ============== Lifecycle ==============

    fn context(&mut self) -> ActionContext<'_, H> {
        ActionContext {
            host: &self.host,
            transform: &mut self.transform,
            options: &self.options,
            up: self.up,
            pivots: &mut self.gesture.pivots,
        }
    }

    fn begin(&mut self, action: ActionKind, position: Vec2) {
        if self.gesture.suppression.is_none() {
            self.gesture.suppression = Some(self.host.hover_picking().suppress());
        }
        self.gesture.current = Some(action);

        if action.has_start() {
            action.start(&mut self.context(), position);
        }
        self.gesture.prev_pointer = position;

        tracing::debug!(%action, ?position, "gesture started");
    }

    fn apply_move(
        &mut self,
        action: ActionKind,
        position: Vec2,
        delta: Vec2,
    ) -> Option<MoveEvent> {
        if delta == Vec2::ZERO {
            return None;
        }

        action.move_by(&mut self.context(), position, delta);
        tracing::trace!(%action, ?position, ?delta, "gesture move");

        Some(MoveEvent {
            action,
            position,
            delta,
        })
    }

    fn end_current(&mut self) {
        if let Some(action) = self.gesture.current.take() {
            let position = self.gesture.prev_pointer;
            if action.has_end() {
                action.end(&mut self.context(), position);
            }
            tracing::debug!(%action, "gesture ended");
        }
    }

    fn finish(&mut self, position: Vec2) {
        if self.gesture.current.is_some() {
            self.gesture.prev_pointer = position;
        }
        self.end_current();
        self.gesture.prev_touches.clear();
        self.gesture.suppression = None;
    }

    /// Re-classify after the number of touches changed
    fn touches_changed(&mut self, touches: &[Vec2]) {
        self.end_current();
        self.gesture.prev_touches = touches.to_vec();

        let next = self.table.touch_action(touches.len());
        match (next, touches.first()) {
            (Some(action), Some(&primary)) => self.begin(action, primary),
            _ => {
                self.gesture.suppression = None;
                if !touches.is_empty() {
                    tracing::trace!(count = touches.len(), "no action for touch count");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use approx::assert_abs_diff_eq;
    use glam::Quat;

    use super::*;
    use crate::test_support::MockHost;

    const EPS: f32 = 1e-4;

    fn navigator(host: MockHost, options: NavigationOptions) -> Navigator<MockHost> {
        let id = host.camera_id;
        Navigator::new(host, id, options).unwrap()
    }

    fn examine() -> Navigator<MockHost> {
        navigator(MockHost::default(), NavigationOptions::default())
    }

    fn panning_from_above() -> Navigator<MockHost> {
        let host = MockHost::looking_at(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO);
        navigator(host, NavigationOptions::with_mode(NavigationMode::Panning))
    }

    fn assert_pose_eq(a: Pose, b: Pose) {
        assert!(
            a.position.abs_diff_eq(b.position, EPS),
            "position {:?} != {:?}",
            a.position,
            b.position
        );
        assert!(
            a.orientation.abs_diff_eq(b.orientation, EPS)
                || a.orientation.abs_diff_eq(-b.orientation, EPS),
            "orientation {:?} != {:?}",
            a.orientation,
            b.orientation
        );
    }

    // ============== Construction ==============

    #[test]
    fn test_missing_node_is_fatal() {
        let host = MockHost::default();
        let missing = Uuid::new_v4();
        let result = Navigator::new(host, missing, NavigationOptions::default());
        assert!(matches!(result, Err(NavError::NodeNotFound(id)) if id == missing));
    }

    #[test]
    fn test_unavailable_host_is_fatal() {
        let mut host = MockHost::default();
        host.available = false;
        let id = host.camera_id;
        let result = Navigator::new(host, id, NavigationOptions::default());
        assert!(matches!(result, Err(NavError::HostUnavailable)));
    }

    #[test]
    fn test_invalid_options_are_fatal() {
        let host = MockHost::default();
        let id = host.camera_id;
        let options = NavigationOptions {
            rotate_speed: f32::NAN,
            ..Default::default()
        };
        let result = Navigator::new(host, id, options);
        assert!(matches!(result, Err(NavError::InvalidOption { .. })));
    }

    #[test]
    fn test_defaults_derived_from_node() {
        let host = MockHost::default();
        host.camera.0.lock().parent_translation = Vec3::new(1.0, 2.0, 3.0);
        let nav = navigator(host, NavigationOptions::default());

        assert_eq!(nav.examine_point(), Vec3::new(-1.0, -2.0, -3.0));
        assert!(nav.up_vector().abs_diff_eq(Vec3::Y, EPS));
        assert_eq!(nav.mode(), NavigationMode::Examine);
    }

    #[test]
    fn test_explicit_examine_point_and_up() {
        let options = NavigationOptions {
            examine_point: Some(Vec3::new(5.0, 0.0, 0.0)),
            up_vector: Some(Vec3::new(0.0, 0.0, 2.0)),
            ..Default::default()
        };
        let nav = navigator(MockHost::default(), options);
        assert_eq!(nav.examine_point(), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(nav.up_vector(), Vec3::Z);
    }

    // ============== Mouse ==============

    #[test]
    fn test_examine_drag_rotates_and_restores_picking() {
        let mut nav = examine();
        let before = nav.pose();
        let width = nav.host().viewport.x;

        assert!(nav.on_mouse_down(0, 100.0, 100.0));
        assert_eq!(nav.current_action(), Some(ActionKind::Rotate));
        assert!(!nav.host().picking.is_enabled());

        let event = nav.on_mouse_move(110.0, 100.0);
        nav.on_mouse_up(110.0, 100.0);

        assert_eq!(
            event,
            Some(MoveEvent {
                action: ActionKind::Rotate,
                position: Vec2::new(110.0, 100.0),
                delta: Vec2::new(10.0, 0.0),
            })
        );

        let yaw = Quat::from_rotation_y(-1.5 * 10.0 * PI / width);
        let expected = Pose {
            position: yaw * before.position,
            orientation: yaw * before.orientation,
        };
        assert_pose_eq(nav.pose(), expected);

        assert!(nav.host().picking.is_enabled());
        assert!(!nav.is_active());
    }

    #[test]
    fn test_rotate_keeps_distance_to_examine_point() {
        let mut nav = examine();
        nav.on_mouse_down(0, 400.0, 300.0);
        nav.on_mouse_move(470.0, 250.0);
        nav.on_mouse_move(430.0, 380.0);
        nav.on_mouse_up(430.0, 380.0);

        let pose = nav.pose();
        assert_abs_diff_eq!(pose.position.length(), 10.0, epsilon = EPS);
        // still facing the pivot
        let to_pivot = (-pose.position).normalize();
        assert!(pose.direction().abs_diff_eq(to_pivot, EPS));
    }

    #[test]
    fn test_unmapped_button_stays_idle() {
        let mut nav = examine();
        let before = nav.pose();

        assert!(!nav.on_mouse_down(3, 10.0, 10.0));
        assert!(!nav.is_active());
        assert!(nav.host().picking.is_enabled());
        assert_eq!(nav.on_mouse_move(50.0, 50.0), None);
        assert_eq!(nav.pose(), before);
    }

    #[test]
    fn test_zero_delta_move_is_idempotent() {
        for mode in NavigationMode::ALL {
            let host = MockHost::looking_at(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO);
            let mut nav = navigator(host, NavigationOptions::with_mode(mode));

            for button in 0..3 {
                nav.on_mouse_down(button, 200.0, 200.0);
                let before = nav.pose();
                assert_eq!(nav.on_mouse_move(200.0, 200.0), None);
                assert_eq!(nav.pose(), before, "{mode:?} button {button}");
                nav.on_mouse_up(200.0, 200.0);
            }
        }
    }

    #[test]
    fn test_press_during_gesture_is_consumed_without_switching() {
        let mut nav = examine();
        nav.on_mouse_down(0, 0.0, 0.0);
        assert!(nav.on_mouse_down(2, 0.0, 0.0));
        assert_eq!(nav.current_action(), Some(ActionKind::Rotate));
    }

    #[test]
    fn test_translate_scales_with_field_of_view() {
        let mut nav = examine();
        let height = nav.host().viewport.y;
        let fov = nav.transform().field_of_view();

        nav.on_mouse_down(1, 100.0, 100.0);
        nav.on_mouse_move(120.0, 100.0);
        nav.on_mouse_up(120.0, 100.0);

        let expected = -20.0 * 2.0 * (fov * 0.5).tan() / height * 20.0;
        let pose = nav.pose();
        assert_abs_diff_eq!(pose.position.x, expected, epsilon = EPS);
        assert_abs_diff_eq!(pose.position.y, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(pose.position.z, 10.0, epsilon = EPS);
    }

    #[test]
    fn test_dolly_moves_along_view_axis() {
        let mut nav = examine();
        nav.on_mouse_down(2, 100.0, 100.0);
        nav.on_mouse_move(100.0, 70.0);
        nav.on_mouse_up(100.0, 70.0);

        // dy = -30 over a 600 px viewport at zoomSpeed 20 -> one unit forward
        assert!(nav.pose().position.abs_diff_eq(Vec3::new(0.0, 0.0, 9.0), EPS));
    }

    #[test]
    fn test_wheel_dolly() {
        let mut nav = examine();
        assert!(nav.on_wheel(60.0));
        assert!(nav.pose().position.abs_diff_eq(Vec3::new(0.0, 0.0, 12.0), EPS));

        let mut disabled = navigator(
            MockHost::default(),
            NavigationOptions {
                wheel_zoom: false,
                ..Default::default()
            },
        );
        assert!(!disabled.on_wheel(60.0));
    }

    #[test]
    fn test_update_examine_point_on_start() {
        let mut host = MockHost::default();
        host.scene_hit = Some(Vec3::new(0.0, 0.0, 2.0));
        let options = NavigationOptions {
            update_examine_point: true,
            ..Default::default()
        };
        let mut nav = navigator(host, options);

        nav.on_mouse_down(0, 400.0, 300.0);
        assert_eq!(nav.examine_point(), Vec3::new(0.0, 0.0, 2.0));
        nav.on_mouse_up(400.0, 300.0);
        // persists after the gesture
        assert_eq!(nav.examine_point(), Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_examine_point_kept_when_nothing_is_picked() {
        let options = NavigationOptions {
            update_examine_point: true,
            examine_point: Some(Vec3::new(7.0, 7.0, 7.0)),
            ..Default::default()
        };
        let host = MockHost::default();
        host.camera.0.lock().pose.position = Vec3::new(0.0, 5.0, 10.0);
        let mut nav = navigator(host, options);

        // the top edge of the screen points above the horizon, missing the ground
        nav.on_mouse_down(0, 400.0, 0.0);
        assert_eq!(nav.examine_point(), Vec3::new(7.0, 7.0, 7.0));
    }

    #[test]
    fn test_degenerate_viewport_skips_every_update() {
        for mode in NavigationMode::ALL {
            let mut host = MockHost::looking_at(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO);
            host.viewport = Vec2::ZERO;
            let mut nav = navigator(host, NavigationOptions::with_mode(mode));
            let before = nav.pose();

            for button in 0..3 {
                nav.on_mouse_down(button, 0.0, 0.0);
                nav.on_mouse_move(10.0, 7.0);
                nav.on_mouse_move(-40.0, 25.0);
                nav.on_mouse_up(-40.0, 25.0);
                assert_eq!(nav.pose(), before, "{mode:?} button {button}");
                assert!(nav.pose().position.is_finite());
            }

            nav.on_touch_start(&[Vec2::ZERO]);
            nav.on_touch_move(&[Vec2::new(12.0, 9.0)]);
            nav.on_touch_end(&[]);
            nav.on_wheel(30.0);
            assert_eq!(nav.pose(), before, "{mode:?} touch and wheel");
            assert!(nav.host().picking.is_enabled());
        }
    }

    // ============== Panning / Orbit ==============

    #[test]
    fn test_panning_keeps_ground_point_under_cursor() {
        let mut nav = panning_from_above();

        nav.on_mouse_down(0, 400.0, 300.0);
        let drag_point = nav.drag_point().expect("ground under cursor");
        assert!(drag_point.abs_diff_eq(Vec3::ZERO, EPS));

        for (x, y) in [(450.0, 320.0), (300.0, 200.0), (520.0, 410.0)] {
            nav.on_mouse_move(x, y);
            let hit = nav.host().generate_ray(x, y).intersect_ground().unwrap();
            assert!(hit.abs_diff_eq(drag_point, 1e-3), "{hit:?} != {drag_point:?}");
        }

        // height and orientation are untouched by ground panning
        assert_abs_diff_eq!(nav.pose().position.y, 10.0, epsilon = EPS);

        nav.on_mouse_up(520.0, 410.0);
        assert_eq!(nav.drag_point(), None);
    }

    #[test]
    fn test_panning_prefers_scene_hit() {
        let mut host = MockHost::looking_at(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO);
        host.scene_hit = Some(Vec3::new(0.0, 2.0, 0.0));
        let mut nav = navigator(host, NavigationOptions::with_mode(NavigationMode::Panning));

        nav.on_mouse_down(0, 400.0, 300.0);
        assert_eq!(nav.drag_point(), Some(Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_panning_without_pick_does_not_move() {
        // looking at the horizon from ground level: no hit for the upper half of the screen
        let host = MockHost::new(Pose::new(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY));
        let mut nav = navigator(host, NavigationOptions::with_mode(NavigationMode::Panning));
        let before = nav.pose();

        nav.on_mouse_down(0, 400.0, 100.0);
        assert_eq!(nav.drag_point(), None);
        assert!(nav.on_mouse_move(420.0, 120.0).is_some());
        assert_eq!(nav.pose(), before);
    }

    #[test]
    fn test_orbit_applies_small_vertical_increment() {
        let mut nav = panning_from_above();
        let before = nav.pose();

        nav.on_mouse_down(1, 400.0, 300.0);
        assert_eq!(nav.current_action(), Some(ActionKind::Orbit));
        nav.on_mouse_move(400.0, 310.0);
        nav.on_mouse_up(400.0, 310.0);

        let after = nav.pose();
        assert!(after.direction().y < before.direction().y);
        assert_abs_diff_eq!(after.position.length(), before.position.length(), epsilon = EPS);
    }

    #[test]
    fn test_orbit_drops_vertical_increment_past_pole_band() {
        let mut nav = panning_from_above();
        let before = nav.pose();

        nav.on_mouse_down(1, 400.0, 300.0);
        nav.on_mouse_move(440.0, 600.0);
        nav.on_mouse_up(440.0, 600.0);

        let after = nav.pose();
        // yaw applied, pitch dropped
        assert_abs_diff_eq!(after.direction().y, before.direction().y, epsilon = EPS);
        assert_abs_diff_eq!(after.position.y, before.position.y, epsilon = EPS);
        assert!(!after.position.abs_diff_eq(before.position, EPS));
    }

    #[test]
    fn test_panning_never_writes_non_finite_pose() {
        let mut host = MockHost::looking_at(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO);
        host.viewport = Vec2::ZERO;
        let mut nav = navigator(host, NavigationOptions::with_mode(NavigationMode::Panning));
        let before = nav.pose();

        nav.on_mouse_down(0, 0.0, 0.0);
        assert_eq!(nav.drag_point(), None);
        nav.on_mouse_move(10.0, 7.0);
        assert!(nav.pose().position.is_finite());
        assert_eq!(nav.pose(), before);
    }

    fn orbit_drag(nav: &mut Navigator<MockHost>, dy: f32) {
        nav.on_mouse_down(1, 400.0, 300.0);
        nav.on_mouse_move(400.0, 300.0 + dy);
        nav.on_mouse_up(400.0, 300.0 + dy);
    }

    fn level_orbit() -> Navigator<MockHost> {
        navigator(
            MockHost::default(),
            NavigationOptions::with_mode(NavigationMode::Panning),
        )
    }

    #[test]
    fn test_orbit_outside_band_accepts_steps_towards_it() {
        // a level camera has a downward component of 0, below the band
        let mut nav = level_orbit();
        orbit_drag(&mut nav, 1.0);
        let down = -nav.pose().direction().y;
        assert!(down > 0.0 && down < 0.05, "down {down}");

        let mut nav = level_orbit();
        orbit_drag(&mut nav, 30.0);
        let down = -nav.pose().direction().y;
        assert_abs_diff_eq!(down, (1.5 * 30.0 * PI / 600.0).sin(), epsilon = EPS);
        assert_abs_diff_eq!(nav.pose().position.length(), 10.0, epsilon = EPS);
    }

    #[test]
    fn test_orbit_outside_band_rejects_steps_away_from_it() {
        let mut nav = level_orbit();
        let before = nav.pose();
        orbit_drag(&mut nav, -30.0);
        assert_pose_eq(nav.pose(), before);
    }

    #[test]
    fn test_orbit_rejects_leaving_band() {
        let mut nav = level_orbit();
        orbit_drag(&mut nav, 30.0);
        let inside = nav.pose();

        orbit_drag(&mut nav, -30.0);
        assert_pose_eq(nav.pose(), inside);
    }

    #[test]
    fn test_orbit_respects_min_height() {
        let host = MockHost::looking_at(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO);
        let options = NavigationOptions {
            orbit_min_height: Some(9.0),
            ..NavigationOptions::with_mode(NavigationMode::Panning)
        };
        let mut nav = navigator(host, options);
        let before = nav.pose();

        nav.on_mouse_down(1, 400.0, 300.0);
        nav.on_mouse_move(400.0, 240.0);
        nav.on_mouse_up(400.0, 240.0);

        assert_pose_eq(nav.pose(), before);
    }

    // ============== Look-around ==============

    #[test]
    fn test_look_around_pitch_and_yaw() {
        let host = MockHost::new(Pose::default());
        let mut nav = navigator(host, NavigationOptions::with_mode(NavigationMode::LookAround));

        nav.on_mouse_down(0, 400.0, 300.0);
        nav.on_mouse_move(400.0, 200.0);
        nav.on_mouse_up(400.0, 200.0);

        // 100 px up on a 600 px viewport at rotateSpeed 1.5 -> 45° up
        assert_abs_diff_eq!(nav.pose().direction().y, (PI / 4.0).sin(), epsilon = EPS);
        assert_eq!(nav.pose().position, Vec3::ZERO);
    }

    #[test]
    fn test_look_around_never_flips_past_pole() {
        let host = MockHost::new(Pose::default());
        let mut nav = navigator(host, NavigationOptions::with_mode(NavigationMode::LookAround));

        nav.on_mouse_down(0, 400.0, 500.0);
        let mut last_alignment = 0.0_f32;
        for step in 1..=20 {
            let y = 500.0 - step as f32 * 25.0;
            nav.on_mouse_move(400.0, y);
            let alignment = nav.up_vector().dot(nav.pose().direction()).abs();
            assert!(
                alignment <= 0.95 || alignment <= last_alignment,
                "alignment {alignment} passed the pole at step {step}"
            );
            assert!(nav.pose().direction().z < 0.0, "view flipped at step {step}");
            last_alignment = alignment;
        }
        nav.on_mouse_up(400.0, 0.0);
    }

    // ============== Touch ==============

    #[test]
    fn test_touch_count_selects_action() {
        let mut nav = examine();
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(200.0, 200.0);
        let c = Vec2::new(300.0, 300.0);

        nav.on_touch_start(&[a]);
        assert_eq!(nav.current_action(), Some(ActionKind::Rotate));
        nav.on_touch_start(&[a, b]);
        assert_eq!(nav.current_action(), Some(ActionKind::Dolly));
        nav.on_touch_start(&[a, b, c]);
        assert_eq!(nav.current_action(), Some(ActionKind::Translate));
        assert!(!nav.host().picking.is_enabled());

        nav.on_touch_end(&[a]);
        assert_eq!(nav.current_action(), Some(ActionKind::Rotate));
        nav.on_touch_end(&[]);
        assert_eq!(nav.current_action(), None);
        assert!(nav.host().picking.is_enabled());
    }

    #[test]
    fn test_touch_move_uses_primary_touch_only() {
        let mut nav = examine();
        nav.on_touch_start(&[Vec2::new(100.0, 100.0), Vec2::new(300.0, 300.0)]);

        let event = nav
            .on_touch_move(&[Vec2::new(100.0, 130.0), Vec2::new(250.0, 250.0)])
            .unwrap();
        assert_eq!(event.action, ActionKind::Dolly);
        assert_eq!(event.delta, Vec2::new(0.0, 30.0));
    }

    #[test]
    fn test_unmapped_touch_count_goes_idle() {
        let host = MockHost::default();
        let mut nav = navigator(host, NavigationOptions::with_mode(NavigationMode::LookAround));
        let touches = [Vec2::ZERO, Vec2::ONE, Vec2::splat(2.0)];

        nav.on_touch_start(&touches[..2]);
        assert_eq!(nav.current_action(), Some(ActionKind::Dolly));
        nav.on_touch_start(&touches);
        assert_eq!(nav.current_action(), None);
        assert!(nav.host().picking.is_enabled());
        assert_eq!(nav.on_touch_move(&touches), None);
    }

    #[test]
    fn test_touch_cancel_ends_panning() {
        let mut nav = panning_from_above();
        nav.on_touch_start(&[Vec2::new(400.0, 300.0)]);
        assert!(nav.drag_point().is_some());
        assert!(nav.gesture().is_suppressing_picking());
        assert_eq!(nav.gesture().prev_touches(), &[Vec2::new(400.0, 300.0)]);

        nav.on_touch_cancel(&[]);
        assert_eq!(nav.current_action(), None);
        assert_eq!(nav.drag_point(), None);
        assert!(nav.host().picking.is_enabled());
        assert!(!nav.gesture().is_suppressing_picking());
    }

    // ============== Picking ==============

    #[test]
    fn test_picking_disabled_before_gesture_stays_disabled() {
        let host = MockHost::default();
        host.picking.set_enabled(false);
        let mut nav = navigator(host, NavigationOptions::default());

        nav.on_mouse_down(0, 0.0, 0.0);
        nav.on_mouse_up(0.0, 0.0);
        assert!(!nav.host().picking.is_enabled());
    }

    #[test]
    fn test_picking_restored_when_navigator_dropped_mid_gesture() {
        let host = MockHost::default();
        let picking = host.picking.clone();
        let mut nav = navigator(host, NavigationOptions::default());

        nav.on_mouse_down(0, 0.0, 0.0);
        assert!(!picking.is_enabled());
        drop(nav);
        assert!(picking.is_enabled());
    }

    // ============== Keyboard ==============

    #[test]
    fn test_keys_ignored_unless_enabled() {
        let mut nav = examine();
        let before = nav.pose();
        assert!(!nav.on_key_down(Key::W));
        assert_eq!(nav.pose(), before);
    }

    #[test]
    fn test_keys_move_along_view_axes() {
        let options = NavigationOptions {
            use_keys: true,
            ..Default::default()
        };
        let mut nav = navigator(MockHost::default(), options);

        assert!(nav.on_key_down(Key::W));
        assert!(nav.pose().position.abs_diff_eq(Vec3::new(0.0, 0.0, 9.0), EPS));
        assert!(nav.on_key_down(Key::ArrowRight));
        assert!(nav.pose().position.abs_diff_eq(Vec3::new(1.0, 0.0, 9.0), EPS));
        assert!(nav.on_key_down(Key::S));
        assert!(nav.on_key_down(Key::A));
        assert!(nav.pose().position.abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), EPS));
    }

    // ============== Examine ==============

    #[test]
    fn test_examine_frames_bounding_box() {
        let mut host = MockHost::default();
        let target = Uuid::new_v4();
        host.boxes.insert(
            target,
            BoundingBox::from_center_half_extents(Vec3::new(5.0, 1.0, 0.0), Vec3::splat(1.0)),
        );
        let mut nav = navigator(host, NavigationOptions::default());
        let orientation = nav.pose().orientation;

        nav.examine(target).unwrap();

        let pose = nav.pose();
        let distance = 3.0_f32.sqrt() / (nav.transform().field_of_view() * 0.5).sin();
        assert_eq!(nav.examine_point(), Vec3::new(5.0, 1.0, 0.0));
        assert_eq!(pose.orientation, orientation);
        assert!(pose.position.abs_diff_eq(Vec3::new(5.0, 1.0, distance), EPS));
    }

    #[test]
    fn test_examine_without_bounding_box_is_noop() {
        let mut nav = examine();
        let before = nav.pose();
        let pivot = nav.examine_point();
        let target = Uuid::new_v4();

        let result = nav.examine(target);
        assert!(matches!(result, Err(NavError::NotExaminable(id)) if id == target));
        assert_eq!(nav.pose(), before);
        assert_eq!(nav.examine_point(), pivot);
    }

    #[test]
    fn test_look_at() {
        let mut nav = examine();
        assert!(nav.look_at(Vec3::new(10.0, 0.0, 10.0)));
        assert!(nav.pose().direction().abs_diff_eq(Vec3::X, EPS));
    }
}
