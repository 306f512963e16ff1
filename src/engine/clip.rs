//! View-frustum clipping of translated walls.
//!
//! For every wall:
//! 1. pick the face the camera sees and order the endpoints so `p0` is on
//!    the screen-left,
//! 2. drop walls wholly outside either field-of-view boundary,
//! 3. cut the wall against the boundary rays, remembering how much of the
//!    original length went missing at each end so the texture can follow,
//! 4. drop what is left behind the camera with no boundary crossing.

use glam::Vec2;

use crate::engine::{
    math::{dist_from_line, line_segment_intersection},
    types::{ClippedWall, Frustum, TranslatedWall},
};

/// Clip one view-space wall; `None` means nothing of it is visible.
pub fn clip_wall(wall: &TranslatedWall, frustum: &Frustum) -> Option<ClippedWall> {
    let mut w0 = wall.p0;
    let mut w1 = wall.p1;

    /*----- 1. face resolution -------------------------------------------*/
    let normal = -(w1 - w0).perp(); // (p1 - p0) rotated by -90°
    let side = if dist_from_line(Vec2::ZERO, w0, normal) > 0.0 {
        core::mem::swap(&mut w0, &mut w1);
        wall.back
    } else {
        wall.front
    }?;

    /*----- 2. whole wall outside one boundary ---------------------------*/
    let left0 = dist_from_line(w0, frustum.left_bound, frustum.left_normal);
    let left1 = dist_from_line(w1, frustum.left_bound, frustum.left_normal);
    let right0 = dist_from_line(w0, frustum.right_bound, frustum.right_normal);
    let right1 = dist_from_line(w1, frustum.right_bound, frustum.right_normal);

    if (right0 < 0.0 && right1 < 0.0) || (left0 < 0.0 && left1 < 0.0) {
        return None;
    }

    /*----- 3. cut against the boundary rays ------------------------------*/
    let wall_len = (w1 - w0).length();
    let mut tex_clip_left = 0.0;
    let mut tex_clip_right = 0.0;

    let hit_left = line_segment_intersection(
        Vec2::ZERO,
        frustum.left_bound * Frustum::BOUND_REACH,
        w0,
        w1,
    );
    if let Some(hit) = hit_left {
        if left0 < 0.0 && left1 >= 0.0 {
            tex_clip_left = (hit - w0).length() / wall_len;
            w0 = hit;
        }
    }

    let hit_right = line_segment_intersection(
        Vec2::ZERO,
        frustum.right_bound * Frustum::BOUND_REACH,
        w0,
        w1,
    );
    if let Some(hit) = hit_right {
        if right0 >= 0.0 && right1 < 0.0 {
            tex_clip_right = (w1 - hit).length() / wall_len;
            w1 = hit;
        }
    }

    /*----- 4. behind the camera with nothing to clip against -------------*/
    if hit_left.is_none() && hit_right.is_none() && (w0.x < 0.0 || w1.x < 0.0) {
        return None;
    }

    Some(ClippedWall {
        p0: w0,
        p1: w1,
        side,
        tex_clip_left,
        tex_clip_right,
    })
}

/// Clip every wall, appending only the visible ones to `out`.
pub fn clip_walls(walls: &[TranslatedWall], frustum: &Frustum, out: &mut Vec<ClippedWall>) {
    out.clear();
    out.extend(walls.iter().filter_map(|w| clip_wall(w, frustum)));
}
