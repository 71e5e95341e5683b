//! Embedder configuration
//!
//! Defaults used when a session call omits `velocity`, `origin` or
//! `pixels_per_bar`. Loadable from JSON; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, Result};
use crate::transducer::MIDI_MAX;

pub const DEFAULT_VELOCITY: u8 = 100;
pub const DEFAULT_ORIGIN: u8 = 60;
pub const DEFAULT_PIXELS_PER_BAR: usize = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedderConfig {
    /// Velocity written for every decoded note
    pub default_velocity: u8,
    /// Pitch of the first decoded note
    pub origin: u8,
    pub pixels_per_bar: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            default_velocity: DEFAULT_VELOCITY,
            origin: DEFAULT_ORIGIN,
            pixels_per_bar: DEFAULT_PIXELS_PER_BAR,
        }
    }
}

impl EmbedderConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        EmbeddingError::check_range("default_velocity", self.default_velocity.into(), 0, MIDI_MAX)?;
        EmbeddingError::check_range("origin", self.origin.into(), 0, MIDI_MAX)?;
        if self.pixels_per_bar < 1 {
            return Err(EmbeddingError::InvalidConfiguration(
                "pixels_per_bar must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = EmbedderConfig::default();
        assert_eq!(config.default_velocity, 100);
        assert_eq!(config.origin, 60);
        assert_eq!(config.pixels_per_bar, 96);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = EmbedderConfig::from_json(r#"{"origin": 48}"#).unwrap();
        assert_eq!(config.origin, 48);
        assert_eq!(config.default_velocity, 100);
        assert_eq!(config.pixels_per_bar, 96);
    }

    #[test]
    fn test_json_round_trip() {
        let config = EmbedderConfig { default_velocity: 64, origin: 33, pixels_per_bar: 48 };
        let json = config.to_json().unwrap();
        assert_eq!(EmbedderConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_config() {
        let err = EmbedderConfig::from_json(r#"{"pixels_per_bar": 0}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);

        let err = EmbedderConfig::from_json(r#"{"origin": 128}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);

        let err = EmbedderConfig::from_json("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }
}
