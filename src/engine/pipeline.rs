use log::debug;

use crate::{
    config::RenderConfig,
    engine::{
        clip::clip_walls,
        projection::project_walls,
        transform::translate_walls,
        types::{ClippedWall, Frustum, ScreenCoords, TranslatedWall, Viewport},
    },
    renderer::{Renderer, RendererExt},
    world::{camera::Camera, geometry::Level, texture::TextureBank},
};

/// Frame driver for the wall stages.
///
/// Owns one scratch buffer per stage, sized once for the level's wall
/// count, so a frame runs without touching the allocator. Each stage fully
/// overwrites its buffer before the next one reads it.
pub struct Pipeline {
    screen: Viewport,
    frustum: Frustum,
    translated: Vec<TranslatedWall>,
    clipped: Vec<ClippedWall>,
    projected: Vec<ScreenCoords>,
}

impl Pipeline {
    pub fn new(screen: Viewport, frustum: Frustum, wall_capacity: usize) -> Self {
        debug!(
            "pipeline: {}x{}, fov {:.1}°, {} walls",
            screen.w,
            screen.h,
            frustum.fov.to_degrees(),
            wall_capacity
        );
        Self {
            screen,
            frustum,
            translated: Vec::with_capacity(wall_capacity),
            clipped: Vec::with_capacity(wall_capacity),
            projected: Vec::with_capacity(wall_capacity),
        }
    }

    pub fn from_config(config: &RenderConfig, wall_capacity: usize) -> Self {
        Self::new(config.viewport(), config.frustum(), wall_capacity)
    }

    #[inline]
    pub fn screen(&self) -> Viewport {
        self.screen
    }

    /// Run transform → clip → project and return the visible walls.
    pub fn prepare(&mut self, level: &Level, cam: &Camera) -> &[ScreenCoords] {
        translate_walls(&level.walls, cam, &mut self.translated);
        clip_walls(&self.translated, &self.frustum, &mut self.clipped);
        project_walls(
            &self.clipped,
            &level.sides,
            &level.sectors,
            &self.screen,
            &self.frustum,
            &mut self.projected,
        );
        &self.projected
    }

    /// Render one complete frame and loan the pixels to `submit`.
    pub fn draw_frame<R, F>(
        &mut self,
        level: &Level,
        cam: &Camera,
        bank: &TextureBank,
        renderer: &mut R,
        submit: F,
    ) where
        R: Renderer,
        F: FnOnce(&[u8], usize, usize),
    {
        self.prepare(level, cam);
        renderer.draw_frame(self.screen, &self.projected, &level.sides, bank, submit);
    }
}
