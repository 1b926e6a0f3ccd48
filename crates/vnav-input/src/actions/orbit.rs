//! Rotate, Orbit and LookAround handlers

use std::f32::consts::PI;

use glam::{Quat, Vec2, Vec3};
use vnav_core::SceneHost;
use vnav_core::pose::crosses_pole;

use super::ActionContext;
use crate::pick::resolve_pick;

/// Re-pick the examine point under the cursor when `updateExaminePoint` is set
pub(super) fn refresh_examine_point<H: SceneHost>(ctx: &mut ActionContext<'_, H>, position: Vec2) {
    if !ctx.options.update_examine_point {
        return;
    }

    let ray = ctx.host.generate_ray(position.x, position.y);
    match resolve_pick(ctx.host, &ray, ctx.options.dragging) {
        Some(point) => {
            tracing::debug!(?point, "examine point updated");
            ctx.pivots.examine_point = point;
        }
        None => tracing::debug!(?position, "nothing under cursor, examine point kept"),
    }
}

/// Yaw and pitch in radians for a pixel delta
fn orbit_angles<H: SceneHost>(ctx: &ActionContext<'_, H>, delta: Vec2) -> Option<(f32, f32)> {
    let viewport = ctx.viewport()?;
    let speed = ctx.options.rotate_speed;
    Some((
        -speed * delta.x * PI / viewport.x,
        -speed * delta.y * PI / viewport.y,
    ))
}

/// Yaw about world up and pitch about the local right axis, both expressed in
/// the local frame of `orientation`
fn local_yaw_pitch(orientation: Quat, yaw: f32, pitch: f32) -> (Quat, Quat) {
    let local_up = (orientation.inverse() * Vec3::Y).normalize();
    (
        Quat::from_axis_angle(local_up, yaw),
        Quat::from_axis_angle(Vec3::X, pitch),
    )
}

/// Orbit position and orientation around the examine point
pub(super) fn rotate<H: SceneHost>(ctx: &mut ActionContext<'_, H>, delta: Vec2) {
    let Some((yaw, pitch)) = orbit_angles(ctx, delta) else {
        return;
    };

    let (yaw, pitch) = local_yaw_pitch(ctx.transform.orientation(), yaw, pitch);
    let pivot = ctx.pivots.examine_point;
    ctx.transform.rotate_around_point(yaw * pitch, pivot);
}

/// Orbit around the examine point, dropping the vertical increment near the poles
///
/// The downward view component `-(direction · up)` has to stay inside the
/// configured band, and the camera may not drop below `orbitMinHeight`. When
/// the full rotation breaks either rule only the yaw is applied.
pub(super) fn orbit<H: SceneHost>(ctx: &mut ActionContext<'_, H>, delta: Vec2) {
    let Some((yaw, pitch)) = orbit_angles(ctx, delta) else {
        return;
    };

    let pose = ctx.transform.pose();
    let pivot = ctx.pivots.examine_point;
    let (yaw_q, pitch_q) = local_yaw_pitch(pose.orientation, yaw, pitch);

    let full = pose.rotated_around_point(yaw_q * pitch_q, pivot);

    let band = ctx.options.orbit_pole_guard;
    let down_before = -pose.direction().dot(Vec3::Y);
    let down_after = -full.direction().dot(Vec3::Y);
    let mut keep_vertical = band.contains(down_after)
        || (!band.contains(down_before) && band.distance(down_after) < band.distance(down_before));

    if crosses_pole(pose.direction(), full.direction(), Vec3::Y) {
        keep_vertical = false;
    }

    if let Some(min_height) = ctx.options.orbit_min_height
        && full.position.y < min_height
        && full.position.y < pose.position.y
    {
        keep_vertical = false;
    }

    let next = if keep_vertical {
        full
    } else {
        tracing::trace!(down_after, "orbit vertical increment dropped");
        pose.rotated_around_point(yaw_q, pivot)
    };
    ctx.transform.set_pose(next);
}

/// First-person look: yaw about the up vector, pitch about `up × forward`
pub(super) fn look_around<H: SceneHost>(ctx: &mut ActionContext<'_, H>, delta: Vec2) {
    let Some(viewport) = ctx.viewport() else {
        return;
    };

    let speed = ctx.options.rotate_speed;
    let yaw = -speed * delta.x * PI / viewport.x;
    let pitch = speed * delta.y * PI / viewport.y;

    let up = ctx.up;
    let forward = ctx.transform.direction();
    let side = up
        .cross(forward)
        .try_normalize()
        .unwrap_or_else(|| -ctx.transform.right());

    let rot_side = Quat::from_axis_angle(up, yaw);
    let rot_up = Quat::from_axis_angle(side, pitch);
    ctx.transform
        .look_around(rot_side, rot_up, up, ctx.options.look_around_pole_limit);
}
