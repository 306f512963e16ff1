use glam::Vec2;

use crate::world::geometry::SideId;

/// Constants that depend on the *frame-buffer*, not on the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub w: usize,
    pub h: usize,
    pub half_w: f32, // integer half, pre-derived for speed
    pub half_h: i32, // integer half, pre-derived for speed
}

impl Viewport {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            half_w: (w / 2) as f32,
            half_h: (h / 2) as i32,
        }
    }

    /// Byte length of a matching frame-buffer.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.w * self.h * crate::world::BYTES_PER_PIXEL
    }
}

/// Horizontal field of view, resolved once per renderer.
///
/// Both boundary rays start at the view-space origin. Their normals point
/// into the visible wedge, so a negative distance means "outside".
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub fov: f32,
    pub tan_half_fov: f32,
    pub left_bound: Vec2,
    pub left_normal: Vec2,
    pub right_bound: Vec2,
    pub right_normal: Vec2,
}

impl Frustum {
    /// Length of the boundary segments used for the ray/wall intersection.
    pub const BOUND_REACH: f32 = 100.0;

    /// `fov` in radians; must lie in `(0, π)`.
    pub fn new(fov: f32) -> Self {
        let half = fov * 0.5;
        let left_bound = Vec2::from_angle(-half);
        let right_bound = Vec2::from_angle(half);
        Self {
            fov,
            tan_half_fov: half.tan(),
            left_bound,
            left_normal: left_bound.normalize().perp(),
            right_bound,
            right_normal: -right_bound.normalize().perp(),
        }
    }
}

/*──────────────────────── per-frame records ─────────────────────────*/

/// Wall endpoints after the camera transform (forward = +X).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TranslatedWall {
    pub p0: Vec2,
    pub p1: Vec2,
    pub front: Option<SideId>,
    pub back: Option<SideId>,
}

/// Visible portion of a wall, `p0` on the screen-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClippedWall {
    pub p0: Vec2,
    pub p1: Vec2,
    pub side: SideId,
    /// Fraction of the original length removed at the `p0` end.
    pub tex_clip_left: f32,
    /// Fraction of the original length removed at the `p1` end.
    pub tex_clip_right: f32,
}

/// Everything the rasterizer needs for one wall trapezoid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenCoords {
    pub left_x: i32,
    pub right_x: i32,
    pub top_left_y: i32,
    pub bottom_left_y: i32,
    pub top_right_y: i32,
    pub bottom_right_y: i32,
    pub inv_z_left: f32,
    pub inv_z_right: f32,
    pub tex_clip_left: f32,
    pub tex_clip_right: f32,
    pub side: SideId,
}
