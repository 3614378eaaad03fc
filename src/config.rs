//! User configuration — margin bounds, throttling and terminal metrics.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scroll-margin/config.toml` (default
//! `~/.config/scroll-margin/config.toml`).  Command-line flags override
//! whatever the file says.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::margin::{ConfigError, MarginConfig, MIN_VIEWPORT_WIDTH};

/// Unvalidated margin values as read from disk / the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginSettings {
    pub min_margin_top: i32,
    pub max_margin_top: i32,
    pub init_margin_top: i32,
    pub update_steps_in_px: i32,
}

impl Default for MarginSettings {
    fn default() -> Self {
        let d = MarginConfig::default();
        Self {
            min_margin_top: d.min_margin_top(),
            max_margin_top: d.max_margin_top(),
            init_margin_top: d.init_margin_top(),
            update_steps_in_px: d.update_steps_in_px(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub margin: MarginSettings,
    /// Scroll throttle window in milliseconds.
    pub throttle_ms: u64,
    /// Narrower viewports (in px) leave the controller inert.
    pub min_viewport_width: u32,
    /// Logical pixels per terminal column; viewport width = columns × this.
    pub cell_width_px: u32,
    /// Logical pixels per terminal row; also the page's line height.
    pub cell_height_px: u32,
    /// Pixels scrolled per wheel notch / arrow key.
    pub wheel_step_px: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            margin: MarginSettings::default(),
            throttle_ms: 10,
            min_viewport_width: MIN_VIEWPORT_WIDTH,
            cell_width_px: 8,
            cell_height_px: 16,
            wheel_step_px: 48,
        }
    }
}

impl AppConfig {
    /// Validate the margin settings.
    pub fn margin_config(&self) -> Result<MarginConfig, ConfigError> {
        let m = &self.margin;
        MarginConfig::new(
            m.min_margin_top,
            m.max_margin_top,
            m.init_margin_top,
            m.update_steps_in_px,
        )
    }

    pub fn throttle_window(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Self::parse_config(&contents)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "unreadable config, using defaults");
                Self::default()
            }
        }
    }

    fn parse_config(s: &str) -> Self {
        let mut cfg = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            let applied = match key {
                "min_margin_top" => value.parse().map(|v| cfg.margin.min_margin_top = v).is_ok(),
                "max_margin_top" => value.parse().map(|v| cfg.margin.max_margin_top = v).is_ok(),
                "init_margin_top" => value.parse().map(|v| cfg.margin.init_margin_top = v).is_ok(),
                "update_steps_in_px" => value
                    .parse()
                    .map(|v| cfg.margin.update_steps_in_px = v)
                    .is_ok(),
                "throttle_ms" => value
                    .parse::<u64>()
                    // Keep this bounded for predictable UX.
                    .map(|v| cfg.throttle_ms = v.clamp(1, 1000))
                    .is_ok(),
                "min_viewport_width" => value.parse().map(|v| cfg.min_viewport_width = v).is_ok(),
                "cell_width_px" => value
                    .parse::<u32>()
                    .map(|v| cfg.cell_width_px = v.max(1))
                    .is_ok(),
                "cell_height_px" => value
                    .parse::<u32>()
                    .map(|v| cfg.cell_height_px = v.max(1))
                    .is_ok(),
                "wheel_step_px" => value
                    .parse::<u32>()
                    .map(|v| cfg.wheel_step_px = v.max(1))
                    .is_ok(),
                _ => {
                    tracing::debug!(key, "ignoring unknown config key");
                    true
                }
            };
            if !applied {
                tracing::warn!(key, value, "ignoring malformed config value");
            }
        }

        cfg
    }

    /// Render the config in the same format `load` reads.
    pub fn serialise(&self) -> String {
        let lines = [
            "# scroll-margin configuration".to_string(),
            String::new(),
            "# Margin bounds (px)".to_string(),
            format!("min_margin_top = {}", self.margin.min_margin_top),
            format!("max_margin_top = {}", self.margin.max_margin_top),
            format!("init_margin_top = {}", self.margin.init_margin_top),
            format!("update_steps_in_px = {}", self.margin.update_steps_in_px),
            String::new(),
            "# Scroll handling".to_string(),
            format!("throttle_ms = {}", self.throttle_ms),
            format!("wheel_step_px = {}", self.wheel_step_px),
            String::new(),
            "# Viewport".to_string(),
            format!("min_viewport_width = {}", self.min_viewport_width),
            format!("cell_width_px = {}", self.cell_width_px),
            format!("cell_height_px = {}", self.cell_height_px),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/scroll-margin/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scroll-margin").join("config.toml")
}
