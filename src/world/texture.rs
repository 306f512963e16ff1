// Format-agnostic repository of textures decoded by the asset loader.
// The renderer and world logic interact through `TextureId` only.

use std::collections::HashMap;

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// Bytes per texel, shared with the frame-buffer layout.
pub const BYTES_PER_PIXEL: usize = 4;

/// CPU-side storage: 4 bytes per texel in row-major, **top-down** order.
///
/// The channel order is whatever the decoder produced (BMP gives BGRA);
/// the rasterizer copies texels verbatim, so it only has to match the
/// frame-buffer the caller presents.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    /// Bytes per row (`w * BYTES_PER_PIXEL` for every decoded texture).
    pub pitch: usize,
    pub pixels: Vec<u8>,
}

impl Texture {
    /// Wrap an already decoded, tightly packed pixel buffer.
    pub fn from_pixels<S: Into<String>>(name: S, w: usize, h: usize, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), w * h * BYTES_PER_PIXEL);
        Self {
            name: name.into(),
            w,
            h,
            pitch: w * BYTES_PER_PIXEL,
            pixels,
        }
    }

    /// Borrow the four bytes of texel `(u, v)`. Caller keeps both in range.
    #[inline(always)]
    pub fn texel(&self, u: usize, v: usize) -> &[u8] {
        let at = v * self.pitch + u * BYTES_PER_PIXEL;
        &self.pixels[at..at + BYTES_PER_PIXEL]
    }
}

/// Convenience checkerboard 8×8 (dark/light grey, opaque).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: [u8; 4] = [0xC0, 0xC0, 0xC0, 0xFF];
        const DARK: [u8; 4] = [0x40, 0x40, 0x40, 0xFF];
        let mut pix = Vec::with_capacity(8 * 8 * BYTES_PER_PIXEL);
        for y in 0..8 {
            for x in 0..8 {
                pix.extend_from_slice(if (x ^ y) & 1 == 0 { &LIGHT } else { &DARK });
            }
        }
        Texture::from_pixels("CHECKER", 8, 8, pix)
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),
}

/// A format-agnostic cache of textures.
///
/// * Does **not** know about BMP or scene files; that’s the loader’s job.
/// * Stores exactly one copy of every name; every `Side` that uses a
///   texture holds the same `TextureId`, so the pixels are shared.
/// * ID **0** is always the “missing” checkerboard.
///
/// Textures are never mutated once the first frame starts, so the
/// rasterizer reads them without any synchronisation.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback.  The texture is inserted under the fixed name `"MISSING"`
    /// and obtains the handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored, the “missing” one included.
    ///
    /// Never zero: id 0 always holds the fallback.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Obtain the id for a *loaded* texture by name.
    /// Returns `None` if the name is unknown.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Hot-path lookup used by the rasterizer: a stale id draws the checker.
    #[inline]
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data
            .get(id as usize)
            .unwrap_or(&self.data[NO_TEXTURE as usize])
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
