//! On-disk assets: bitmaps and TOML scene descriptions.

pub mod bmp;
pub mod scene;

pub use bmp::{BmpError, decode_bmp, load_bmp};
pub use scene::{Scene, SceneError, demo_scene, load_scene, parse_scene};
