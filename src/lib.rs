//! Software 2.5D wall renderer.
//!
//! Walls are line segments on a 2-D map, extruded between the floor and
//! ceiling heights of their sector and drawn column by column with
//! perspective-correct texturing.

pub mod asset;
pub mod config;
pub mod engine;
pub mod renderer;
pub mod world;
