//! Windows bitmap decoder.
//!
//! ### Supported files
//! * `BM` magic, uncompressed, **24** or **32** bits per pixel.
//! * Bottom-up row order (positive height).
//!
//! Output is a top-down, 4 bytes per pixel [`Texture`] in the file's own
//! BGRA order; 24-bit rows get an opaque alpha byte appended.

use std::{
    fs,
    io::{self, Cursor},
    path::Path,
};

use byteorder::{LittleEndian as LE, ReadBytesExt};
use thiserror::Error;

use crate::world::texture::{BYTES_PER_PIXEL, Texture};

/// Bytes that must be present to read every header field we use.
const HEADER_LEN: usize = 30;

const PIXEL_OFFSET_AT: u64 = 10;
const WIDTH_AT: u64 = 18;
const BPP_AT: u64 = 28;

/// Errors that can be encountered while decoding a bitmap.
#[derive(Error, Debug)]
pub enum BmpError {
    /// Underlying I/O failure, propagated unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File doesn't start with `BM`.
    #[error("not a BMP file")]
    BadMagic,

    #[error("unsupported bit depth {0}; only 24 and 32 bpp are supported")]
    UnsupportedBitDepth(u16),

    #[error("unsupported dimensions {width}x{height}")]
    BadDimensions { width: i32, height: i32 },

    /// Pixel rows claim to extend past end of file.
    #[error("corrupt BMP: pixel data extends beyond end of file")]
    Truncated,
}

/// Decode an in-memory bitmap.
pub fn decode_bmp(name: &str, bytes: &[u8]) -> Result<Texture, BmpError> {
    /*----------- 1. read and validate header ------------------------*/
    if bytes.len() < 2 || &bytes[..2] != b"BM" {
        return Err(BmpError::BadMagic);
    }
    if bytes.len() < HEADER_LEN {
        return Err(BmpError::Truncated);
    }

    let mut cursor = Cursor::new(bytes);
    cursor.set_position(PIXEL_OFFSET_AT);
    let pixel_offset = cursor.read_u32::<LE>()? as usize;
    cursor.set_position(WIDTH_AT);
    let width = cursor.read_i32::<LE>()?;
    let height = cursor.read_i32::<LE>()?;
    cursor.set_position(BPP_AT);
    let bpp = cursor.read_u16::<LE>()?;

    if bpp != 24 && bpp != 32 {
        return Err(BmpError::UnsupportedBitDepth(bpp));
    }
    if width <= 0 || height <= 0 {
        return Err(BmpError::BadDimensions { width, height });
    }

    let (w, h) = (width as usize, height as usize);
    let src_bpp = bpp as usize / 8;
    let row_size = (bpp as usize * w).div_ceil(32) * 4;

    /*----------- 2. bounds-check the pixel array ---------------------*/
    let last_row_end = (h - 1)
        .checked_mul(row_size)
        .and_then(|n| n.checked_add(pixel_offset))
        .and_then(|n| n.checked_add(w * src_bpp))
        .ok_or(BmpError::Truncated)?;
    if last_row_end > bytes.len() {
        return Err(BmpError::Truncated);
    }

    /*----------- 3. flip rows, widen to 4 bytes ----------------------*/
    let mut pixels = Vec::with_capacity(w * h * BYTES_PER_PIXEL);
    for y in 0..h {
        let start = pixel_offset + (h - 1 - y) * row_size;
        let row = &bytes[start..start + w * src_bpp];
        for px in row.chunks_exact(src_bpp) {
            pixels.extend_from_slice(&px[..3]);
            pixels.push(if src_bpp == 4 { px[3] } else { 0xFF });
        }
    }

    Ok(Texture::from_pixels(name, w, h, pixels))
}

/// Load a bitmap from disk; the texture is named after the file stem.
pub fn load_bmp<P: AsRef<Path>>(path: P) -> Result<Texture, BmpError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    decode_bmp(&name, &bytes)
}
