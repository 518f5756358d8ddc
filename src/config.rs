//! # Translator Configuration
//!
//! Knobs for the line driver, loadable from YAML:
//!
//! ```yaml
//! header-marker: "K:"
//! comment-char: "%"
//! tempo: 360
//! capacity: 256
//! ```
//!
//! Every field is optional; missing fields keep their defaults.

use serde::Deserialize;

use crate::error::TuneError;
use crate::note::DEFAULT_TEMPO;

/// Maximum number of notes, end marker included, when nothing else is configured.
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct TranslatorConfig {
    /// Prefix of the line that ends the header and starts the body.
    pub header_marker: String,
    /// Everything after this character on a body line is ignored.
    pub comment_char: char,
    /// Tempo used when the tune has no `Q:` header.
    pub tempo: u16,
    /// Maximum sequence length, end marker included.
    pub capacity: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            header_marker: "K:".to_string(),
            comment_char: '%',
            tempo: DEFAULT_TEMPO,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    header_marker: Option<String>,
    comment_char: Option<String>,
    tempo: Option<u16>,
    capacity: Option<usize>,
}

impl TranslatorConfig {
    /// Parse a YAML document, validating each field.
    pub fn from_yaml(content: &str) -> Result<Self, TuneError> {
        // an empty document deserializes to unit, not to a map
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| TuneError::ConfigError(e.to_string()))?
        };

        let mut config = Self::default();

        if let Some(marker) = raw.header_marker {
            if marker.is_empty() {
                return Err(TuneError::ConfigError(
                    "header-marker must not be empty".to_string(),
                ));
            }
            config.header_marker = marker;
        }

        if let Some(comment) = raw.comment_char {
            let mut chars = comment.chars();
            config.comment_char = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(TuneError::ConfigError(format!(
                        "comment-char must be a single character, got '{}'",
                        comment
                    )))
                }
            };
        }

        if let Some(tempo) = raw.tempo {
            if tempo == 0 {
                return Err(TuneError::ConfigError("tempo must be positive".to_string()));
            }
            config.tempo = tempo;
        }

        if let Some(capacity) = raw.capacity {
            // room for at least the end marker
            if capacity == 0 {
                return Err(TuneError::ConfigError(
                    "capacity must be at least 1".to_string(),
                ));
            }
            config.capacity = capacity;
        }

        Ok(config)
    }
}
