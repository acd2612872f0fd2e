//! Import and parsing configuration.
//!
//! Every field has a default, so an empty YAML document (or no file at all) yields
//! the stock behavior. Keys are kebab-case:
//!
//! ```yaml
//! normalize-to: C
//! min-text-len: 50
//! parser:
//!   position-scale: 0.8
//!   inline-strip-threshold: 2
//! ```

use crate::error::SetlistError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const MAX_POSITION_SCALE: f64 = 4.0;

/// Tunables of the chord/lyric line parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ParserOptions {
    /// Factor applied to chord offsets on a chord-only line before they are
    /// attached to the lyric line below it. Empirical.
    pub position_scale: f64,

    /// A line is chord-only when fewer than this many characters remain after
    /// removing its chords.
    pub chord_line_residual_limit: usize,

    /// Inline chords are stripped from a lyric line when it has more than this many.
    pub inline_strip_threshold: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            position_scale: 0.8,
            chord_line_residual_limit: 5,
            inline_strip_threshold: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ImportConfig {
    pub parser: ParserOptions,

    /// Key every imported song is transposed to. `None` keeps the detected key.
    pub normalize_to: Option<String>,

    /// Key assumed when nothing in the text indicates one.
    pub default_key: String,

    /// Scraped titles shorter than this are treated as missing.
    pub min_title_len: usize,

    /// Scraped chord text shorter than this is treated as missing.
    pub min_text_len: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            parser: ParserOptions::default(),
            normalize_to: Some("C".to_string()),
            default_key: "C".to_string(),
            min_title_len: 3,
            min_text_len: 50,
        }
    }
}

impl ImportConfig {
    pub fn from_yaml_str(content: &str) -> Result<Self, SetlistError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ImportConfig =
            serde_yaml::from_str(content).map_err(|e| SetlistError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetlistError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    fn validate(&self) -> Result<(), SetlistError> {
        let scale = self.parser.position_scale;
        if !(0.0..=MAX_POSITION_SCALE).contains(&scale) {
            return Err(SetlistError::Config(format!(
                "position-scale must be between 0 and {}, got {}",
                MAX_POSITION_SCALE, scale
            )));
        }
        if let Some(key) = &self.normalize_to {
            if crate::note::key_root(key).is_none() {
                return Err(SetlistError::Config(format!("Unknown normalize-to key: {}", key)));
            }
        }
        Ok(())
    }
}
