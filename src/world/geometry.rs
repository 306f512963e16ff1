use glam::Vec2;
use thiserror::Error;

use crate::world::texture::TextureId;

pub type WallId = u16;
pub type SideId = u16;
pub type SectorId = u16;

/// Runtime snapshot of one map (immutable after load).
#[derive(Clone, Debug, Default)]
pub struct Level {
    pub name: String,
    pub walls: Vec<Wall>,
    pub sides: Vec<Side>,
    pub sectors: Vec<Sector>,
}

/*----------------------------- walls --------------------------------*/

/// One line segment of world geometry.
///
/// The front face is the one whose normal, `(p1 - p0)` rotated by −90°,
/// points away from the viewer; see [`crate::engine::clip`].
#[derive(Clone, Debug, PartialEq)]
pub struct Wall {
    pub p0: Vec2,
    pub p1: Vec2,
    /// `None` = this face is a void/portal boundary and is never drawn.
    pub front: Option<SideId>,
    pub back: Option<SideId>,
}

/*----------------------------- sides --------------------------------*/

/// Normalised texture rectangle.
///
/// `top` is the V sampled at the wall's upper screen edge and `bottom`
/// the V at its lower edge; V = 0 is the first row of a top-down texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexCoord {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for TexCoord {
    fn default() -> Self {
        Self {
            left: 0.0,
            right: 1.0,
            top: 0.0,
            bottom: 1.0,
        }
    }
}

impl TexCoord {
    /// Narrow `left`/`right` by the fractions the clipper cut off each end.
    pub fn clipped(self, clip_left: f32, clip_right: f32) -> Self {
        let width = self.right - self.left;
        Self {
            left: self.left + clip_left * width,
            right: self.right - clip_right * width,
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Side {
    pub upper: Option<TextureId>,
    pub middle: TextureId,
    pub lower: Option<TextureId>,
    pub tex_coord: TexCoord,
    pub sector: SectorId,
}

/*---------------------------- sectors -------------------------------*/

#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    pub floor_h: f32,
    pub ceil_h: f32,
    pub floor_tex: Option<TextureId>,
    pub ceil_tex: Option<TextureId>,
}

/*--------------------------- validation -----------------------------*/

/// Broken cross-references inside a [`Level`].
#[derive(Error, Debug, PartialEq)]
pub enum LevelError {
    #[error("wall {wall} references missing side {side}")]
    UnknownSide { wall: WallId, side: SideId },

    #[error("side {side} references missing sector {sector}")]
    UnknownSector { side: SideId, sector: SectorId },

    #[error("side {0}: texture left must be smaller than right")]
    InvalidTexCoord(SideId),

    #[error("sector {0}: floor must be below ceiling")]
    InvalidSector(SectorId),
}

impl Level {
    /// Check every invariant the render pipeline takes for granted.
    ///
    /// The pipeline indexes `sides` and `sectors` without bounds checks
    /// of its own, so a level must pass this before the first frame.
    pub fn validate(&self) -> Result<(), LevelError> {
        for (i, sector) in self.sectors.iter().enumerate() {
            if !(sector.floor_h < sector.ceil_h) {
                return Err(LevelError::InvalidSector(i as SectorId));
            }
        }
        for (i, side) in self.sides.iter().enumerate() {
            if side.sector as usize >= self.sectors.len() {
                return Err(LevelError::UnknownSector {
                    side: i as SideId,
                    sector: side.sector,
                });
            }
            if !(side.tex_coord.left < side.tex_coord.right) {
                return Err(LevelError::InvalidTexCoord(i as SideId));
            }
        }
        for (i, wall) in self.walls.iter().enumerate() {
            for side in [wall.front, wall.back].into_iter().flatten() {
                if side as usize >= self.sides.len() {
                    return Err(LevelError::UnknownSide {
                        wall: i as WallId,
                        side,
                    });
                }
            }
        }
        Ok(())
    }
}
