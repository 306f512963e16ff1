pub mod camera;
pub mod geometry;
pub mod texture;

pub use geometry::{Level, LevelError, Sector, SectorId, Side, SideId, TexCoord, Wall, WallId};

pub use camera::Camera;

pub use texture::{BYTES_PER_PIXEL, NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
