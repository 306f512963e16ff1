// ──────────────────────────────────────────────────────────────────────────
// asset/scene.rs
//
//  *   SceneFile  (TOML, serde)          ──╮
//  *   bitmaps referenced by name          │   --->  world::geometry::Level
//  *   TextureBank (mut)                   │          + populated TextureBank
//                                          ╯          + starting Camera
// ──────────────────────────────────────────────────────────────────────────

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use glam::Vec2;
use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    asset::bmp::load_bmp,
    world::{
        camera::Camera,
        geometry::{Level, LevelError, Sector, SectorId, Side, SideId, TexCoord, Wall},
        texture::{NO_TEXTURE, TextureBank, TextureError, TextureId},
    },
};

/// Source of the built-in demo room.
pub const DEMO_SCENE: &str = include_str!("../../scenes/demo.toml");

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse scene: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("texture `{0}` is not declared in the scene")]
    UnknownTexture(String),

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/*──────────────────────────── File format ──────────────────────────*/

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    camera: CameraDef,
    #[serde(default)]
    textures: Vec<TextureDef>,
    #[serde(default)]
    sectors: Vec<SectorDef>,
    #[serde(default)]
    sides: Vec<SideDef>,
    #[serde(default)]
    walls: Vec<WallDef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraDef {
    #[serde(default)]
    pos: [f32; 2],
    #[serde(default)]
    heading: f32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TextureDef {
    name: String,
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SectorDef {
    floor: f32,
    ceiling: f32,
    floor_texture: Option<String>,
    ceiling_texture: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SideDef {
    middle: String,
    upper: Option<String>,
    lower: Option<String>,
    sector: SectorId,
    tex_coord: Option<TexCoordDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TexCoordDef {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WallDef {
    p0: [f32; 2],
    p1: [f32; 2],
    front: Option<SideId>,
    back: Option<SideId>,
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// A ready-to-render map plus where the viewer starts.
#[derive(Debug)]
pub struct Scene {
    pub level: Level,
    pub camera: Camera,
}

/// Load a scene file; texture paths resolve relative to its directory.
pub fn load_scene<P: AsRef<Path>>(path: P, bank: &mut TextureBank) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let src = std::fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_scene(&src, base_dir, &name, bank)
}

/// The built-in seven-wall room.
pub fn demo_scene(bank: &mut TextureBank) -> Result<Scene, SceneError> {
    let base_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes");
    parse_scene(DEMO_SCENE, &base_dir, "demo", bank)
}

/// Build a scene from TOML source and populate `bank` with every texture
/// it declares.
///
/// Bitmaps that fail to load are replaced by the bank’s checkerboard id
/// (0); references to undeclared texture names are an error.
pub fn parse_scene(
    src: &str,
    base_dir: &Path,
    name: &str,
    bank: &mut TextureBank,
) -> Result<Scene, SceneError> {
    let file: SceneFile = toml::from_str(src)?;

    /*----- 1. Textures ---------------------------------------------------*/
    let mut by_name: HashMap<&str, TextureId> = HashMap::with_capacity(file.textures.len());
    for def in &file.textures {
        let id = match bank.id(&def.name) {
            Some(id) => id,
            None => {
                let path = base_dir.join(&def.path);
                match load_bmp(&path) {
                    Ok(tex) => bank.insert(def.name.as_str(), tex)?,
                    Err(e) => {
                        warn!(
                            "texture `{}` ({}): {e}; using checkerboard",
                            def.name,
                            path.display()
                        );
                        NO_TEXTURE
                    }
                }
            }
        };
        debug!("texture `{}` -> id {id}", def.name);
        by_name.insert(def.name.as_str(), id);
    }

    let tex_id = |name: &str| -> Result<TextureId, SceneError> {
        by_name
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::UnknownTexture(name.to_owned()))
    };
    let opt_tex_id = |name: &Option<String>| name.as_deref().map(&tex_id).transpose();

    /*----- 2. Convert defs → geo lists -----------------------------------*/
    let sectors = file
        .sectors
        .iter()
        .map(|s| {
            Ok(Sector {
                floor_h: s.floor,
                ceil_h: s.ceiling,
                floor_tex: opt_tex_id(&s.floor_texture)?,
                ceil_tex: opt_tex_id(&s.ceiling_texture)?,
            })
        })
        .collect::<Result<Vec<_>, SceneError>>()?;

    let sides = file
        .sides
        .iter()
        .map(|s| {
            Ok(Side {
                upper: opt_tex_id(&s.upper)?,
                middle: tex_id(&s.middle)?,
                lower: opt_tex_id(&s.lower)?,
                tex_coord: s
                    .tex_coord
                    .as_ref()
                    .map(|t| TexCoord {
                        left: t.left,
                        right: t.right,
                        top: t.top,
                        bottom: t.bottom,
                    })
                    .unwrap_or_default(),
                sector: s.sector,
            })
        })
        .collect::<Result<Vec<_>, SceneError>>()?;

    let walls = file
        .walls
        .iter()
        .map(|w| Wall {
            p0: Vec2::from(w.p0),
            p1: Vec2::from(w.p1),
            front: w.front,
            back: w.back,
        })
        .collect();

    let level = Level {
        name: name.to_owned(),
        walls,
        sides,
        sectors,
    };
    level.validate()?;

    info!(
        "scene `{}`: {} walls, {} sides, {} sectors, {} textures in bank",
        level.name,
        level.walls.len(),
        level.sides.len(),
        level.sectors.len(),
        bank.len()
    );

    Ok(Scene {
        level,
        camera: Camera::new(Vec2::from(file.camera.pos), file.camera.heading),
    })
}
