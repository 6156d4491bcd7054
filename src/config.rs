use anyhow::{Context, Result};
use hudkit_overlay::Color;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/hud.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HudConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Frames to draw in a headless run.
    pub frames: u64,
    /// Initial body line pool of the demo menu.
    pub menu_capacity: usize,
    pub menu_scale: f64,
    /// Menu center in scaled space, [x, y] in -1..1.
    pub menu_position: [f64; 2],
    /// RGBA, 0-255 per channel.
    pub header_color: [u8; 4],
    pub body_color: [u8; 4],
    pub selection_color: [u8; 4],
    pub show_test_pattern: bool,
    /// Newline-delimited JSON log of every frame's draw calls.
    pub frame_log: Option<PathBuf>,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1920,
            viewport_height: 1080,
            fov_degrees: 70.0,
            frames: 120,
            menu_capacity: 8,
            menu_scale: 1.0,
            menu_position: [0.0, 0.0],
            header_color: [41, 54, 62, 230],
            body_color: [70, 78, 86, 205],
            selection_color: [34, 44, 53, 255],
            show_test_pattern: false,
            frame_log: None,
        }
    }
}

impl HudConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<HudConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    HudConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!("Hud config not found at {}. Using defaults", path.display());
                }
                HudConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn header_color(&self) -> Color {
        Color::from(self.header_color)
    }

    pub fn body_color(&self) -> Color {
        Color::from(self.body_color)
    }

    pub fn selection_color(&self) -> Color {
        Color::from(self.selection_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hudkit_config_{:016x}", rand::random::<u64>())).join(name)
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_path("hud.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "frames = 3\nmenu_scale = 0.75\n").unwrap();

        let cfg = HudConfig::load_from_path(&path);
        assert_eq!(cfg.frames, 3);
        assert_eq!(cfg.menu_scale, 0.75);
        assert_eq!(cfg.viewport_height, 1080);
        assert!(cfg.frame_log.is_none());
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let path = temp_path("broken.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "frames = \"many\"").unwrap();

        let cfg = HudConfig::load_from_path(&path);
        assert_eq!(cfg.frames, HudConfig::default().frames);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = temp_path("saved.toml");
        let cfg = HudConfig {
            menu_position: [0.25, -0.5],
            show_test_pattern: true,
            frame_log: Some(PathBuf::from("frames.jsonl")),
            ..Default::default()
        };
        cfg.save_to_path(&path).unwrap();

        let loaded = HudConfig::load_from_path(&path);
        assert_eq!(loaded.menu_position, [0.25, -0.5]);
        assert!(loaded.show_test_pattern);
        assert_eq!(loaded.frame_log, Some(PathBuf::from("frames.jsonl")));
    }

    #[test]
    fn colors_convert_channel_order() {
        let cfg = HudConfig {
            header_color: [1, 2, 3, 4],
            ..Default::default()
        };
        assert_eq!(cfg.header_color(), Color::new(1, 2, 3, 4));
    }
}
