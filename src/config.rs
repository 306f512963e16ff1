//! Renderer configuration (TOML file + defaults).

use std::{io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::types::{Frustum, Viewport};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("field of view must lie strictly between 0 and 180 degrees, got {0}")]
    BadFov(f32),

    #[error("viewport must be at least 1x1, got {0}x{1}")]
    BadViewport(usize, usize),
}

/// Everything fixed for the lifetime of one renderer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Horizontal field of view in degrees.
    pub fov_deg: f32,
    pub target_fps: usize,
    /// World units per second.
    pub move_speed: f32,
    /// Radians per second.
    pub turn_speed: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            fov_deg: 90.0,
            target_fps: 500,
            move_speed: 2.0,
            turn_speed: 2.0,
        }
    }
}

impl RenderConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(ConfigError::BadFov(self.fov_deg));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::BadViewport(self.width, self.height));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.fov_deg.to_radians())
    }
}
