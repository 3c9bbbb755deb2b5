//! Configuration loading (`--config path/to/cube3d.toml`)
//!
//! All fields are optional and fall back to the defaults below. Command-line
//! flags are layered on top by [`crate::cli::Cli::settings`].
//!
//! ```toml
//! [render]
//! fill_faces = false
//! show_axes = true
//! edge_color = [0, 0, 255]
//!
//! [surface]
//! width = 800
//! height = 800
//!
//! [keys]
//! move-forward = "z"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use cube3d_core::{InputCommand, KeyMap, RenderOptions, Rgb};

use crate::error::AppError;
use crate::input::RESET_KEY;
use crate::renderer::{Surface, MIN_SURFACE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub surface: SurfaceConfig,
    /// Command name to key overrides, e.g. `rotate-x-pos = "u"`
    #[serde(default)]
    pub keys: BTreeMap<String, char>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Fill faces with their colors before drawing edges (default: false)
    #[serde(default)]
    pub fill_faces: bool,
    /// Draw the fixed reference axes (default: true)
    #[serde(default = "default_true")]
    pub show_axes: bool,
    /// Wireframe color as `[r, g, b]` (default: blue)
    #[serde(default = "default_edge_color")]
    pub edge_color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Logical surface width (default and minimum: 800)
    #[serde(default = "default_surface_edge")]
    pub width: u32,
    /// Logical surface height (default and minimum: 800)
    #[serde(default = "default_surface_edge")]
    pub height: u32,
}

fn default_true() -> bool {
    true
}
fn default_edge_color() -> [u8; 3] {
    [0, 0, 255]
}
fn default_surface_edge() -> u32 {
    MIN_SURFACE
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fill_faces: false,
            show_axes: default_true(),
            edge_color: default_edge_color(),
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_edge(),
            height: default_surface_edge(),
        }
    }
}

impl Config {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| AppError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml(&self) -> Result<String, AppError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_axes: self.render.show_axes,
            fill_faces: self.render.fill_faces,
            edge_color: Rgb::from(self.render.edge_color),
            ..RenderOptions::default()
        }
    }

    /// Logical surface, raised to at least 800x800
    pub fn surface(&self) -> Surface {
        let requested = Surface {
            width: self.surface.width,
            height: self.surface.height,
        };
        let surface = Surface {
            width: requested.width.max(MIN_SURFACE),
            height: requested.height.max(MIN_SURFACE),
        };
        if surface != requested {
            tracing::warn!(
                "Surface {}x{} is below the minimum, using {}x{}",
                requested.width,
                requested.height,
                surface.width,
                surface.height
            );
        }
        surface
    }

    /// Default bindings with the `[keys]` overrides applied.
    ///
    /// Fails when a name is unknown, a key is reserved, or two commands end
    /// up sharing one key.
    pub fn keymap(&self) -> Result<KeyMap, AppError> {
        let mut keymap = KeyMap::default();
        let mut displaced = Vec::new();

        for (name, &key) in &self.keys {
            let command: InputCommand = name.parse()?;
            if key == RESET_KEY {
                return Err(AppError::ReservedKey { key, command });
            }
            if let Some(previous) = keymap.rebind(command, key) {
                displaced.push((key, previous, command));
            }
        }

        // A displaced command is fine only if it was rebound elsewhere.
        for (key, first, second) in displaced {
            if keymap.key_for(first).is_none() {
                return Err(AppError::DuplicateKey { key, first, second });
            }
        }

        Ok(keymap)
    }
}
