//! Translate, Dolly and Panning handlers

use glam::{Vec2, Vec3};
use vnav_core::SceneHost;
use vnav_core::ray::is_valid_hit;

use super::ActionContext;
use crate::pick::resolve_pick;

/// Pan in the camera's local XY plane
///
/// Scaled by `2 * tan(fov / 2) / height * zoomSpeed` so a pixel of motion
/// covers the same apparent distance at any field of view and viewport size.
pub(super) fn translate<H: SceneHost>(ctx: &mut ActionContext<'_, H>, delta: Vec2) {
    let Some(viewport) = ctx.viewport() else {
        return;
    };

    let fov = ctx.transform.field_of_view();
    let scale = 2.0 * (fov * 0.5).tan() / viewport.y * ctx.options.zoom_speed;
    let local = Vec3::new(-delta.x, delta.y, 0.0) * scale;

    let offset = ctx.transform.orientation() * local;
    ctx.transform.translate(offset);
}

/// Move along the local Z axis by `zoomSpeed * dy / height`
pub(super) fn dolly<H: SceneHost>(ctx: &mut ActionContext<'_, H>, delta: Vec2) {
    let Some(viewport) = ctx.viewport() else {
        return;
    };

    let amount = ctx.options.zoom_speed * delta.y / viewport.y;
    let offset = ctx.transform.orientation() * Vec3::new(0.0, 0.0, amount);
    ctx.transform.translate(offset);
}

/// Pick the world point under the cursor as the drag point
pub(super) fn panning_start<H: SceneHost>(ctx: &mut ActionContext<'_, H>, position: Vec2) {
    ctx.pivots.drag_point = None;
    if ctx.viewport().is_none() {
        return;
    }

    let ray = ctx.host.generate_ray(position.x, position.y);
    ctx.pivots.drag_point = resolve_pick(ctx.host, &ray, ctx.options.dragging);

    if ctx.pivots.drag_point.is_none() {
        tracing::debug!(?position, "no drag point under cursor, panning disabled for gesture");
    }
}

/// Keep the drag point under the cursor
///
/// The new cursor ray is intersected with the horizontal plane through the
/// drag point and the camera moves by the difference.
pub(super) fn panning_move<H: SceneHost>(ctx: &mut ActionContext<'_, H>, position: Vec2) {
    let Some(drag_point) = ctx.pivots.drag_point else {
        return;
    };
    if ctx.viewport().is_none() {
        return;
    }

    let ray = ctx.host.generate_ray(position.x, position.y);
    let Some(hit) = ray
        .intersect_plane(drag_point, Vec3::Y)
        .filter(|hit| is_valid_hit(*hit))
    else {
        tracing::trace!(?position, "cursor ray misses drag plane");
        return;
    };

    ctx.transform.translate(drag_point - hit);
}
