//! 2-D line helpers shared by the clipping stage.

use glam::{Vec2, vec2};

/// Denominators smaller than this are treated as parallel lines.
pub const PARALLEL_EPSILON: f32 = 1e-3;

/// Intersection of the infinite lines through `p0→p1` and `p2→p3`.
///
/// Both lines are written as `A·x + B·y = C` and solved with Cramer's
/// rule. Returns `None` for (near-)parallel lines.
pub fn line_intersection(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Option<Vec2> {
    let a1 = p1.y - p0.y;
    let b1 = p0.x - p1.x;
    let c1 = a1 * p0.x + b1 * p0.y;

    let a2 = p3.y - p2.y;
    let b2 = p2.x - p3.x;
    let c2 = a2 * p2.x + b2 * p2.y;

    let denominator = a1 * b2 - a2 * b1;
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    Some(vec2(
        (b2 * c1 - b1 * c2) / denominator,
        (a1 * c2 - a2 * c1) / denominator,
    ))
}

/// Intersection of the segments `p0→p1` and `p2→p3`.
///
/// Containment is deliberately loose: a segment accepts the point when
/// *either* its X ratio or its Y ratio lies in `[0, 1]`. An axis-aligned
/// segment has a zero extent on one axis, which turns that ratio into
/// NaN/inf; the other axis still decides.
pub fn line_segment_intersection(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Option<Vec2> {
    let hit = line_intersection(p0, p1, p2, p3)?;

    let rx0 = (hit.x - p0.x) / (p1.x - p0.x);
    let ry0 = (hit.y - p0.y) / (p1.y - p0.y);
    let rx1 = (hit.x - p2.x) / (p3.x - p2.x);
    let ry1 = (hit.y - p2.y) / (p3.y - p2.y);

    let unit = |r: f32| (0.0..=1.0).contains(&r);
    if (unit(rx0) || unit(ry0)) && (unit(rx1) || unit(ry1)) {
        Some(hit)
    } else {
        None
    }
}

/// Signed distance of `point` from the line through `line_point` with
/// normal `line_normal` (positive on the normal's side).
#[inline]
pub fn dist_from_line(point: Vec2, line_point: Vec2, line_normal: Vec2) -> f32 {
    (point - line_point).dot(line_normal.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_lines_meet() {
        let hit = line_intersection(
            vec2(0.0, 0.0),
            vec2(2.0, 2.0),
            vec2(0.0, 2.0),
            vec2(2.0, 0.0),
        )
        .unwrap();
        assert!((hit - vec2(1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn parallel_lines_rejected() {
        assert_eq!(
            line_intersection(
                vec2(0.0, 0.0),
                vec2(1.0, 0.0),
                vec2(0.0, 1.0),
                vec2(1.0, 1.0)
            ),
            None
        );
    }

    #[test]
    fn segments_that_miss_are_rejected() {
        // The infinite lines cross at (3, 3), outside both segments.
        assert_eq!(
            line_segment_intersection(
                vec2(0.0, 0.0),
                vec2(1.0, 1.0),
                vec2(0.0, 6.0),
                vec2(1.0, 5.0)
            ),
            None
        );
    }

    #[test]
    fn axis_aligned_segments_still_intersect() {
        // Vertical wall against a diagonal ray: the wall's X ratio is NaN.
        let hit = line_segment_intersection(
            vec2(0.0, 0.0),
            vec2(70.0, -70.0),
            vec2(2.0, -4.0),
            vec2(2.0, 4.0),
        )
        .unwrap();
        assert!((hit - vec2(2.0, -2.0)).length() < 1e-4);

        // Horizontal wall: the Y ratio is NaN.
        let hit = line_segment_intersection(
            vec2(0.0, 0.0),
            vec2(70.0, 70.0),
            vec2(-1.0, 3.0),
            vec2(5.0, 3.0),
        )
        .unwrap();
        assert!((hit - vec2(3.0, 3.0)).length() < 1e-4);
    }

    #[test]
    fn distance_sign_follows_normal() {
        let d = dist_from_line(vec2(1.0, 3.0), vec2(0.0, 0.0), vec2(0.0, 2.0));
        assert!((d - 3.0).abs() < 1e-6);
        let d = dist_from_line(vec2(1.0, -3.0), vec2(5.0, 0.0), vec2(0.0, 1.0));
        assert!((d + 3.0).abs() < 1e-6);
    }
}
