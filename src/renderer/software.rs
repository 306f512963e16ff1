//! ---------------------------------------------------------------------------
//! Classic software (CPU) column renderer
//!
//! * Fills a `&mut [u8]` frame-buffer, 4 bytes per pixel, `w * 4` stride.
//! * Texels are copied verbatim, so the frame-buffer ends up in whatever
//!   channel order the textures were decoded in (BGRA for bitmaps).
//! * Walls are drawn in input order with no depth test.
//! ---------------------------------------------------------------------------

use crate::{
    engine::types::{ScreenCoords, Viewport},
    renderer::Renderer,
    world::{
        geometry::{Side, TexCoord},
        texture::{BYTES_PER_PIXEL, Texture, TextureBank},
    },
};

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Column renderer owning the frame-buffer.
pub struct Software {
    scratch: Vec<u8>,
    screen: Viewport,
}

impl Default for Software {
    fn default() -> Self {
        Self {
            scratch: Vec::new(),
            screen: Viewport::new(0, 0),
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, screen: Viewport) {
        // (re)allocate if resolution changed
        if screen != self.screen {
            self.screen = screen;
            self.scratch.resize(screen.byte_len(), 0);
        }
        self.scratch.fill(0);
    }

    fn draw_walls(&mut self, walls: &[ScreenCoords], sides: &[Side], bank: &TextureBank) {
        rasterize(walls, sides, bank, &self.screen, &mut self.scratch);
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[u8], usize, usize),
    {
        submit(&self.scratch, self.screen.w, self.screen.h);
    }
}

/*──────────────────────── rasterizer ─────────────────────────────────*/

/// Draw every projected wall into `fb` (`screen.byte_len()` bytes).
///
/// Sides must exist for every `ScreenCoords::side`; a stale texture id
/// falls back to the checkerboard.
pub fn rasterize(
    walls: &[ScreenCoords],
    sides: &[Side],
    bank: &TextureBank,
    screen: &Viewport,
    fb: &mut [u8],
) {
    debug_assert_eq!(fb.len(), screen.byte_len());
    for sc in walls {
        let side = &sides[sc.side as usize];
        let tex = bank.texture_or_missing(side.middle);
        let tc = side.tex_coord.clipped(sc.tex_clip_left, sc.tex_clip_right);
        draw_wall(sc, &tc, tex, screen, fb);
    }
}

fn draw_wall(sc: &ScreenCoords, tc: &TexCoord, tex: &Texture, screen: &Viewport, fb: &mut [u8]) {
    /* pre-compute per-column linear increments ----------------------------*/
    // i64 so saturated projections of very near endpoints cannot overflow.
    let span_w = (sc.right_x as i64 - sc.left_x as i64).max(1) as f32;
    let step = ColumnStep::new(sc, tc, tex, span_w);

    /* columns off either screen edge are skipped, never clamped ----------*/
    let first = sc.left_x.max(0);
    let last = sc.right_x.min(screen.w as i32 - 1);
    if first > last {
        return;
    }

    /* cursor that will walk across the wall strip */
    let mut cur = ColumnCursor::new(sc, tc, tex);
    cur.skip(&step, first as i64 - sc.left_x as i64);

    /* render every vertical column in the span ---------------------------*/
    for x in first..=last {
        let u = (cur.u() as i32).rem_euclid(tex.w as i32) as usize;
        draw_column(x as usize, cur.y_top as i32, cur.y_bot as i32, u, tc, tex, screen, fb);
        cur.advance(&step);
    }
}

/*──────────────────────── helper structs ─────────────────────────────*/

/// Per-column attributes that advance linearly across the strip.
#[derive(Clone, Copy, Debug)]
struct ColumnStep {
    duoz: f32,
    dinvz: f32,
    dytop: f32,
    dybot: f32,
}
impl ColumnStep {
    fn new(sc: &ScreenCoords, tc: &TexCoord, tex: &Texture, span_w: f32) -> Self {
        let w = tex.w as f32;
        Self {
            duoz: (tc.right * w * sc.inv_z_right - tc.left * w * sc.inv_z_left) / span_w,
            dinvz: (sc.inv_z_right - sc.inv_z_left) / span_w,
            dytop: (sc.top_right_y as i64 - sc.top_left_y as i64) as f32 / span_w,
            dybot: (sc.bottom_right_y as i64 - sc.bottom_left_y as i64) as f32 / span_w,
        }
    }
}

/// Current per-column parameters that march from left to right.
///
/// `u / z` and `1 / z` are linear in screen space; their ratio is the
/// perspective-correct texture column.
#[derive(Clone, Copy, Debug)]
struct ColumnCursor {
    uoz: f32,
    inv_z: f32,
    y_top: f32,
    y_bot: f32,
}
impl ColumnCursor {
    fn new(sc: &ScreenCoords, tc: &TexCoord, tex: &Texture) -> Self {
        Self {
            uoz: tc.left * tex.w as f32 * sc.inv_z_left,
            inv_z: sc.inv_z_left,
            y_top: sc.top_left_y as f32,
            y_bot: sc.bottom_left_y as f32,
        }
    }
    #[inline]
    fn advance(&mut self, s: &ColumnStep) {
        self.uoz += s.duoz;
        self.inv_z += s.dinvz;
        self.y_top += s.dytop;
        self.y_bot += s.dybot;
    }
    /// Jump `columns` steps at once.
    fn skip(&mut self, s: &ColumnStep, columns: i64) {
        let n = columns as f32;
        self.uoz += s.duoz * n;
        self.inv_z += s.dinvz * n;
        self.y_top += s.dytop * n;
        self.y_bot += s.dybot * n;
    }
    #[inline]
    fn u(&self) -> f32 {
        self.uoz / self.inv_z
    }
}

/*──────────────────────── column rendering ───────────────────────────*/

/// Draw a single vertical slice from `y_min` to `y_max` inclusive.
///
/// V runs from `tc.top` at `y_min` to `tc.bottom` at `y_max` and wraps
/// vertically; rows above the screen advance V before being cut away.
#[allow(clippy::too_many_arguments)]
fn draw_column(
    x: usize,
    mut y_min: i32,
    mut y_max: i32,
    u: usize,
    tc: &TexCoord,
    tex: &Texture,
    screen: &Viewport,
    fb: &mut [u8],
) {
    let tex_h = tex.h as f32;
    let mut v = tc.top * tex_h;
    let v_step = (tc.bottom * tex_h - v) / (y_max as i64 - y_min as i64).max(1) as f32;

    if y_min < 0 {
        v += -(y_min as f32) * v_step;
        y_min = 0;
    }
    if y_max >= screen.h as i32 {
        y_max = screen.h as i32 - 1;
    }

    for y in y_min..=y_max {
        let v_tex = (v as i32).rem_euclid(tex.h as i32) as usize;
        let dst = (x + y as usize * screen.w) * BYTES_PER_PIXEL;
        fb[dst..dst + BYTES_PER_PIXEL].copy_from_slice(tex.texel(u, v_tex));
        v += v_step;
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RendererExt;

    /* tiny helpers ---------------------------------------------------*/

    /// `w × h` texture whose texel (u, v) is `[u, v, 0xAA, 0xFF]`.
    fn gradient(w: usize, h: usize) -> Texture {
        let mut pix = Vec::with_capacity(w * h * 4);
        for v in 0..h {
            for u in 0..w {
                pix.extend_from_slice(&[u as u8, v as u8, 0xAA, 0xFF]);
            }
        }
        Texture::from_pixels("GRADIENT", w, h, pix)
    }

    fn setup(tex: Texture) -> (TextureBank, Vec<Side>) {
        let mut bank = TextureBank::default_with_checker();
        let id = bank.insert("GRADIENT", tex).unwrap();
        let sides = vec![Side {
            upper: None,
            middle: id,
            lower: None,
            tex_coord: TexCoord::default(),
            sector: 0,
        }];
        (bank, sides)
    }

    fn coords(left_x: i32, right_x: i32, top: i32, bottom: i32) -> ScreenCoords {
        ScreenCoords {
            left_x,
            right_x,
            top_left_y: top,
            bottom_left_y: bottom,
            top_right_y: top,
            bottom_right_y: bottom,
            inv_z_left: 1.0,
            inv_z_right: 1.0,
            tex_clip_left: 0.0,
            tex_clip_right: 0.0,
            side: 0,
        }
    }

    fn pixel(fb: &[u8], screen: &Viewport, x: usize, y: usize) -> [u8; 4] {
        let at = (x + y * screen.w) * 4;
        [fb[at], fb[at + 1], fb[at + 2], fb[at + 3]]
    }

    fn render(walls: &[ScreenCoords], tex: Texture, screen: Viewport) -> Vec<u8> {
        let (bank, sides) = setup(tex);
        let mut fb = vec![0; screen.byte_len()];
        rasterize(walls, &sides, &bank, &screen, &mut fb);
        fb
    }

    #[test]
    fn single_column_wall_still_draws() {
        let screen = Viewport::new(8, 8);
        let fb = render(&[coords(3, 3, 1, 4)], gradient(4, 4), screen);
        for y in 0..8 {
            for x in 0..8 {
                let drawn = pixel(&fb, &screen, x, y)[3] == 0xFF;
                assert_eq!(drawn, x == 3 && (1..=4).contains(&y), "({x}, {y})");
            }
        }
    }

    #[test]
    fn off_screen_columns_are_skipped() {
        let screen = Viewport::new(8, 8);
        let fb = render(&[coords(-5, 20, 2, 5)], gradient(4, 4), screen);
        for x in 0..8 {
            assert_eq!(pixel(&fb, &screen, x, 2)[3], 0xFF, "column {x}");
            assert_eq!(pixel(&fb, &screen, x, 6), [0; 4]);
        }
    }

    #[test]
    fn wall_entirely_off_screen_draws_nothing() {
        let screen = Viewport::new(8, 8);
        let fb = render(&[coords(-9, -2, 0, 7), coords(8, 12, 0, 7)], gradient(4, 4), screen);
        assert!(fb.iter().all(|&b| b == 0));
    }

    #[test]
    fn top_of_wall_samples_first_texture_row() {
        let screen = Viewport::new(4, 8);
        let fb = render(&[coords(0, 3, 0, 7)], gradient(1, 8), screen);
        assert_eq!(pixel(&fb, &screen, 0, 0)[1], 0);
        assert_eq!(pixel(&fb, &screen, 0, 1)[1], 1);
        assert_eq!(pixel(&fb, &screen, 0, 6)[1], 6);
    }

    #[test]
    fn rows_above_screen_advance_v() {
        // Wall spans rows -4..=3 over an 8-row texture: v_step = 8/7.
        let screen = Viewport::new(4, 8);
        let fb = render(&[coords(0, 3, -4, 3)], gradient(1, 8), screen);
        assert_eq!(pixel(&fb, &screen, 0, 0)[1], 4);
        assert_eq!(pixel(&fb, &screen, 0, 2)[1], 6);
    }

    #[test]
    fn rows_below_screen_are_cut_without_v_shift() {
        let screen = Viewport::new(4, 4);
        let fb = render(&[coords(0, 3, 0, 7)], gradient(1, 8), screen);
        for y in 0..4 {
            assert_eq!(pixel(&fb, &screen, 0, y)[1], y as u8);
        }
    }

    #[test]
    fn texture_tiles_in_both_directions() {
        // Two repeats of a 4×4 texture across an 8×8 wall.
        let screen = Viewport::new(8, 8);
        let (bank, mut sides) = setup(gradient(4, 4));
        sides[0].tex_coord = TexCoord {
            left: 0.0,
            right: 2.0,
            top: 0.0,
            bottom: 2.0,
        };
        let mut fb = vec![0; screen.byte_len()];
        rasterize(&[coords(0, 7, 0, 7)], &sides, &bank, &screen, &mut fb);

        // 8/7 texels per pixel; the last pixel sits on the 8.0 seam.
        let expected = [0, 1, 2, 3, 0, 1, 2];
        for (i, &t) in expected.iter().enumerate() {
            assert_eq!(pixel(&fb, &screen, i, 0)[0], t, "u at column {i}");
            assert_eq!(pixel(&fb, &screen, 0, i)[1], t, "v at row {i}");
        }
    }

    #[test]
    fn saturated_bounds_do_not_overflow() {
        let screen = Viewport::new(8, 8);
        let sc = ScreenCoords {
            left_x: i32::MIN,
            right_x: i32::MAX,
            top_left_y: -i32::MAX,
            bottom_left_y: i32::MAX,
            ..coords(0, 0, 2, 5)
        };
        let fb = render(&[sc], gradient(4, 4), screen);
        assert!(fb.chunks_exact(4).any(|px| px[3] == 0xFF));
    }

    #[test]
    fn texture_columns_are_perspective_correct() {
        // Near end at z = 1, far end at z = 4, 16 texels across 9 columns.
        let screen = Viewport::new(16, 1);
        let mut sc = coords(0, 8, 0, 0);
        sc.inv_z_right = 0.25;
        let fb = render(&[sc], gradient(16, 1), screen);
        // Half-way across the screen is only a fifth of the way along the
        // wall: u = (0.5 * 4) / 0.625 = 3.2. Affine mapping would give 8.
        assert_eq!(pixel(&fb, &screen, 4, 0)[0], 3);
        assert_eq!(pixel(&fb, &screen, 0, 0)[0], 0);
    }

    #[test]
    fn clip_fractions_narrow_the_texture() {
        let screen = Viewport::new(16, 1);
        let mut sc = coords(0, 8, 0, 0);
        sc.tex_clip_left = 0.5;
        let fb = render(&[sc], gradient(16, 1), screen);
        assert_eq!(pixel(&fb, &screen, 0, 0)[0], 8);
    }

    #[test]
    fn depth_interpolation_is_exact_at_both_ends() {
        let sc = ScreenCoords {
            inv_z_left: 1.0 / 3.0,
            inv_z_right: 1.0 / 11.0,
            ..coords(-7, 250, 10, 30)
        };
        let tex = gradient(4, 4);
        let tc = TexCoord::default();
        let span_w = (sc.right_x as i64 - sc.left_x as i64).max(1);
        let step = ColumnStep::new(&sc, &tc, &tex, span_w as f32);

        let start = ColumnCursor::new(&sc, &tc, &tex);
        assert_eq!(start.inv_z, 1.0 / 3.0);

        let mut walked = start;
        for _ in 0..span_w {
            walked.advance(&step);
        }
        let mut jumped = start;
        jumped.skip(&step, span_w);
        for end in [walked, jumped] {
            assert!((end.inv_z - 1.0 / 11.0).abs() < 1e-5);
            assert!((end.u() - tex.w as f32).abs() < 1e-2);
        }
    }

    #[test]
    fn software_backend_clears_and_submits() {
        let (bank, sides) = setup(gradient(4, 4));
        let mut sw = Software::default();
        let screen = Viewport::new(8, 8);

        sw.draw_frame(screen, &[coords(1, 2, 1, 4)], &sides, &bank, |fb, w, h| {
            assert_eq!((w, h), (8, 8));
            assert!(fb.chunks_exact(4).any(|px| px[2] == 0xAA));
        });

        // Next frame with no walls must come back cleared.
        sw.draw_frame(screen, &[], &sides, &bank, |fb, _, _| {
            assert!(fb.iter().all(|&b| b == 0));
        });
    }
}
