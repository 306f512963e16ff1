use crate::{
    engine::types::{ClippedWall, Frustum, ScreenCoords, Viewport},
    world::geometry::{Sector, Side},
};

/// Fixed world-height → screen-height scale of the camera.
pub const VERTICAL_SCALE: f32 = 0.2;

/// Perspective-divide one clipped wall into screen space.
///
/// Returns `None` when an endpoint has no positive forward depth; the
/// clipper only lets such walls through in degenerate cases.
pub fn project_wall(
    wall: &ClippedWall,
    sides: &[Side],
    sectors: &[Sector],
    screen: &Viewport,
    frustum: &Frustum,
) -> Option<ScreenCoords> {
    let (w0, w1) = (wall.p0, wall.p1);
    if !(w0.x > 0.0 && w1.x > 0.0) {
        return None;
    }

    let sector = &sectors[sides[wall.side as usize].sector as usize];

    let x_scale_l = w0.y / (w0.x * frustum.tan_half_fov);
    let x_scale_r = w1.y / (w1.x * frustum.tan_half_fov);
    let y_scale_l = VERTICAL_SCALE * screen.h as f32 / w0.x;
    let y_scale_r = VERTICAL_SCALE * screen.h as f32 / w1.x;

    // Ceiling goes up (negated), floor goes down; both truncate before the
    // centre offset so floor = -ceiling gives rows symmetric about half_h.
    let top = |scale: f32| {
        ((scale * sector.ceil_h) as i32)
            .saturating_neg()
            .saturating_add(screen.half_h)
    };
    let bottom = |scale: f32| ((scale * -sector.floor_h) as i32).saturating_add(screen.half_h);

    Some(ScreenCoords {
        left_x: (x_scale_l * screen.half_w + screen.half_w) as i32,
        right_x: (x_scale_r * screen.half_w + screen.half_w) as i32,
        top_left_y: top(y_scale_l),
        bottom_left_y: bottom(y_scale_l),
        top_right_y: top(y_scale_r),
        bottom_right_y: bottom(y_scale_r),
        inv_z_left: 1.0 / w0.x,
        inv_z_right: 1.0 / w1.x,
        tex_clip_left: wall.tex_clip_left,
        tex_clip_right: wall.tex_clip_right,
        side: wall.side,
    })
}

/// Project every clipped wall into `out`.
pub fn project_walls(
    walls: &[ClippedWall],
    sides: &[Side],
    sectors: &[Sector],
    screen: &Viewport,
    frustum: &Frustum,
    out: &mut Vec<ScreenCoords>,
) {
    out.clear();
    out.extend(
        walls
            .iter()
            .filter_map(|w| project_wall(w, sides, sectors, screen, frustum)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::geometry::TexCoord;
    use glam::{Vec2, vec2};
    use std::f32::consts::FRAC_PI_2;

    fn world(floor_h: f32, ceil_h: f32) -> (Vec<Side>, Vec<Sector>) {
        let sides = vec![Side {
            upper: None,
            middle: 0,
            lower: None,
            tex_coord: TexCoord::default(),
            sector: 0,
        }];
        let sectors = vec![Sector {
            floor_h,
            ceil_h,
            floor_tex: None,
            ceil_tex: None,
        }];
        (sides, sectors)
    }

    fn clipped(p0: Vec2, p1: Vec2) -> ClippedWall {
        ClippedWall {
            p0,
            p1,
            side: 0,
            tex_clip_left: 0.1,
            tex_clip_right: 0.2,
        }
    }

    fn project(p0: Vec2, p1: Vec2, floor_h: f32, ceil_h: f32) -> Option<ScreenCoords> {
        let (sides, sectors) = world(floor_h, ceil_h);
        project_wall(
            &clipped(p0, p1),
            &sides,
            &sectors,
            &Viewport::new(640, 480),
            &Frustum::new(FRAC_PI_2),
        )
    }

    #[test]
    fn columns_follow_the_perspective_divide() {
        let sc = project(vec2(1.0, -1.0), vec2(2.0, 1.0), -1.0, 1.0).unwrap();
        // tan(45°) is not exact in f32, allow one column of truncation slop.
        assert_eq!(sc.left_x, 0);
        assert!((sc.right_x - 480).abs() <= 1, "right_x = {}", sc.right_x);
        assert!(sc.left_x < sc.right_x);

        let sc = project(vec2(2.0, 0.0), vec2(1.0, 1.0), -1.0, 1.0).unwrap();
        assert_eq!(sc.left_x, 320);
        assert!((sc.right_x - 640).abs() <= 1, "right_x = {}", sc.right_x);
    }

    #[test]
    fn facing_wall_is_vertically_symmetric() {
        for d in [0.5, 1.0, 3.0, 7.5] {
            let sc = project(vec2(d, -1.0), vec2(d, 1.0), -1.0, 1.0).unwrap();
            assert_eq!(sc.top_left_y + sc.bottom_left_y, 2 * 240, "d = {d}");
            assert_eq!(sc.top_right_y + sc.bottom_right_y, 2 * 240, "d = {d}");
            assert_eq!(sc.top_left_y, sc.top_right_y);
        }
    }

    #[test]
    fn heights_scale_with_inverse_depth() {
        // 0.2 * 480 / 2 = 48 rows above the horizon for a ceiling at 1.
        let sc = project(vec2(2.0, -1.0), vec2(4.0, 1.0), -0.5, 1.0).unwrap();
        assert_eq!(sc.top_left_y, 240 - 48);
        assert_eq!(sc.bottom_left_y, 240 + 24);
        assert_eq!(sc.top_right_y, 240 - 24);
        assert_eq!(sc.bottom_right_y, 240 + 12);
    }

    #[test]
    fn depth_and_clip_fractions_are_carried() {
        let sc = project(vec2(2.0, -1.0), vec2(4.0, 1.0), -1.0, 1.0).unwrap();
        assert_eq!(sc.inv_z_left, 0.5);
        assert_eq!(sc.inv_z_right, 0.25);
        assert_eq!((sc.tex_clip_left, sc.tex_clip_right), (0.1, 0.2));
        assert_eq!(sc.side, 0);
    }

    #[test]
    fn non_positive_depth_is_dropped() {
        assert_eq!(project(vec2(0.0, -1.0), vec2(2.0, 1.0), -1.0, 1.0), None);
        assert_eq!(project(vec2(2.0, -1.0), vec2(-0.1, 1.0), -1.0, 1.0), None);
    }
}
