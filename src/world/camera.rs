use glam::Vec2;

/// Player view-point in world space.
///
/// Only the heading is simulated; the eye never tilts and its height is
/// implied by the sector the walls bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub heading: f32, // radians, 0 = +X, grows towards +Y
}

impl Camera {
    pub fn new(pos: Vec2, heading: f32) -> Self {
        Self { pos, heading }
    }

    /// Transform a world point into view space: translate by `-pos`, then
    /// rotate by `-heading` so the camera looks along +X.
    ///
    /// Positive view-space Y ends up on the right half of the screen.
    #[inline]
    pub fn to_view(&self, p: Vec2) -> Vec2 {
        Vec2::from_angle(-self.heading).rotate(p - self.pos)
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector pointing where the camera looks on the X-Y plane.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        Vec2::from_angle(self.heading)
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move `distance` units along the heading (negative walks backwards).
    pub fn step(&mut self, distance: f32) {
        self.pos += self.forward() * distance;
    }

    /// Change the heading (positive = turn towards screen-right).
    pub fn turn(&mut self, delta: f32) {
        self.heading = (self.heading + delta).rem_euclid(std::f32::consts::TAU);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
