//! Rendering abstraction layer.
//!
//! *The geometry stages never touch a pixel buffer directly.*
//! They produce a list of [`ScreenCoords`] and hand them to a type that
//! implements [`Renderer`].
//!
//! * A back-end owns its frame-buffer and loans it out in `end_frame`, so
//!   the window layer decides how to present the bytes.
//! * A helper blanket‐impl [`RendererExt`] adds `draw_frame` so call-sites
//!   stay short.
//!
//! **Current limitation**: only the middle texture of each side is drawn.
//! Upper/lower portal slices and flats are carried in the data model but
//! never rasterised.

use crate::{
    engine::types::{ScreenCoords, Viewport},
    world::{geometry::Side, texture::TextureBank},
};

/// Pixel format of the window surface (0x00RRGGBB).
pub type Rgba = u32;

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, screen: Viewport);

    /// Rasterise every projected wall into the internal buffer.
    fn draw_walls(&mut self, walls: &[ScreenCoords], sides: &[Side], bank: &TextureBank);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// `submit(&[u8], w, h)` is run exactly once per frame; the slice is
    /// `w * h * 4` bytes, row-major, 4 bytes per pixel.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[u8], usize, usize);
}

/// Convenience blanket-impl with a one-liner `draw_frame` adaptor.
pub trait RendererExt: Renderer {
    fn draw_frame<F>(
        &mut self,
        screen: Viewport,
        walls: &[ScreenCoords],
        sides: &[Side],
        bank: &TextureBank,
        submit: F,
    ) where
        F: FnOnce(&[u8], usize, usize),
    {
        self.begin_frame(screen);
        self.draw_walls(walls, sides, bank);
        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

/// Repack a BGRA byte frame-buffer into the 0x00RRGGBB words a window
/// surface expects. `dst` must hold one word per pixel.
pub fn pack_0rgb(src: &[u8], dst: &mut [Rgba]) {
    debug_assert_eq!(src.len(), dst.len() * 4);
    for (px, out) in src.chunks_exact(4).zip(dst.iter_mut()) {
        *out = u32::from_le_bytes([px[0], px[1], px[2], 0]);
    }
}

pub mod software;

pub use software::Software;
