/// Command-line interface
use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, SurfaceConfig};
use crate::error::AppError;
use crate::Settings;

/// Interactive wireframe cube for the terminal
#[derive(Debug, Parser)]
#[command(name = "cube3d")]
#[command(about = "Rotate, move and scale a wireframe cube in the terminal")]
#[command(version)]
pub struct Cli {
    /// TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fill the cube faces with their colors
    #[arg(long)]
    pub fill_faces: bool,

    /// Hide the reference axes
    #[arg(long)]
    pub no_axes: bool,

    /// Logical surface width (minimum 800)
    #[arg(long)]
    pub width: Option<u32>,

    /// Logical surface height (minimum 800)
    #[arg(long)]
    pub height: Option<u32>,

    /// Write logs to this file instead of discarding them
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Config file contents (or defaults) with flags layered on top
    pub fn config(&self) -> Result<Config, AppError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if self.fill_faces {
            config.render.fill_faces = true;
        }
        if self.no_axes {
            config.render.show_axes = false;
        }
        if let Some(width) = self.width {
            config.surface.width = width;
        }
        if let Some(height) = self.height {
            config.surface.height = height;
        }

        Ok(config)
    }

    /// The configuration the app actually runs with: key overrides checked
    /// and the surface raised to its minimum
    pub fn effective_config(&self) -> Result<Config, AppError> {
        let config = self.config()?;
        config.keymap()?;
        let surface = config.surface();
        Ok(Config {
            surface: SurfaceConfig {
                width: surface.width,
                height: surface.height,
            },
            ..config
        })
    }

    pub fn settings(&self) -> Result<Settings, AppError> {
        let config = self.config()?;
        Ok(Settings {
            options: config.render_options(),
            surface: config.surface(),
            keymap: config.keymap()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Surface;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["cube3d"]).unwrap();
        let settings = cli.settings().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_flags_override() {
        let cli =
            Cli::try_parse_from(["cube3d", "--fill-faces", "--no-axes", "--width", "1600"])
                .unwrap();
        let settings = cli.settings().unwrap();
        assert!(settings.options.fill_faces);
        assert!(!settings.options.show_axes);
        assert_eq!(settings.surface, Surface { width: 1600, height: 800 });
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join(format!("cube3d-cli-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[render]\nshow_axes = false\n[surface]\nheight = 900\n[keys]\nmove-up = \"p\""
        )
        .unwrap();
        drop(file);

        let cli = Cli::try_parse_from([
            "cube3d",
            "--config",
            path.to_str().unwrap(),
            "--height",
            "1000",
        ])
        .unwrap();
        let settings = cli.settings().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(!settings.options.show_axes);
        assert_eq!(settings.surface.height, 1000);
        assert_eq!(settings.keymap.lookup('p'), Some(cube3d_core::InputCommand::MoveUp));
    }

    #[test]
    fn test_printed_config_matches_settings() {
        let cli = Cli::try_parse_from(["cube3d", "--width", "100", "--print-config"]).unwrap();
        assert!(cli.print_config);

        let printed = cli.effective_config().unwrap().to_toml().unwrap();
        assert!(printed.contains("width = 800"));
        assert!(!printed.contains("width = 100"));

        let reparsed: Config = toml::from_str(&printed).unwrap();
        assert_eq!(reparsed.surface(), cli.settings().unwrap().surface);
    }

    #[test]
    fn test_printed_config_rejects_bad_keys() {
        let path =
            std::env::temp_dir().join(format!("cube3d-cli-keys-{}.toml", std::process::id()));
        std::fs::write(&path, "[keys]\nmove-up = \"u\"\n").unwrap();

        let cli = Cli::try_parse_from(["cube3d", "--config", path.to_str().unwrap()]).unwrap();
        let result = cli.effective_config();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(AppError::DuplicateKey { key: 'u', .. })));
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::try_parse_from(["cube3d", "--config", "/nonexistent/cube3d.toml"]).unwrap();
        assert!(matches!(cli.settings(), Err(AppError::ReadConfig { .. })));
    }
}
