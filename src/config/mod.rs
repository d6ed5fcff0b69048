//! Presentation configuration
//!
//! Viewport, pacing and mix defaults, optionally overridden by a JSON
//! file. Scene content never lives here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use anyhow::Context;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Logical viewport, in pixels
    pub view_width: f64,
    pub view_height: f64,
    /// Typewriter cadence when a line does not override it, milliseconds
    pub default_char_delay_ms: u64,
    /// Nominal linear gains
    pub music_gain: f64,
    pub sfx_gain: f64,
    /// Directory sample paths are resolved against
    pub asset_root: PathBuf,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            view_width: 320.0,
            view_height: 240.0,
            default_char_delay_ms: 30,
            music_gain: crate::audio::DEFAULT_MUSIC_GAIN,
            sfx_gain: crate::audio::DEFAULT_SFX_GAIN,
            asset_root: PathBuf::from("assets"),
        }
    }
}

impl PresentationConfig {
    pub fn view(&self) -> (f64, f64) {
        (self.view_width, self.view_height)
    }
}

/// Read a config file, falling back to defaults for absent fields.
pub fn load_config(path: &Path) -> anyhow::Result<PresentationConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_the_reference_presentation() {
        let config = PresentationConfig::default();
        assert_eq!(config.view(), (320.0, 240.0));
        assert_eq!(config.default_char_delay_ms, 30);
    }

    #[test]
    fn partial_json_falls_back_per_field() {
        let config: PresentationConfig =
            serde_json::from_str(r#"{"view_width": 640.0, "music_gain": 0.3}"#).unwrap();
        assert_eq!(config.view_width, 640.0);
        assert_eq!(config.music_gain, 0.3);
        assert_eq!(config.view_height, 240.0);
    }
}
