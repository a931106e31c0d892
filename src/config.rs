use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::BOARD_SIZE;

pub const DEFAULT_CAPTURE_THRESHOLD: u8 = 8;

/// Rule parameters a host may tune. Board size and starting layout are fixed.
///
/// Only [`RuleConfig::new`], `Default` and deserialization build one, and all
/// three validate, so every `RuleConfig` in circulation is playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRuleConfig")]
pub struct RuleConfig {
    /// Captures needed to win. A side only owns 9 pieces.
    capture_threshold: u8,
}

/// Wire shape before validation; missing fields take the defaults.
#[derive(Deserialize)]
#[serde(default)]
struct RawRuleConfig {
    capture_threshold: u8,
}

impl Default for RawRuleConfig {
    fn default() -> Self {
        Self {
            capture_threshold: DEFAULT_CAPTURE_THRESHOLD,
        }
    }
}

impl TryFrom<RawRuleConfig> for RuleConfig {
    type Error = ConfigError;

    fn try_from(raw: RawRuleConfig) -> Result<Self, Self::Error> {
        Self::new(raw.capture_threshold)
    }
}

impl RuleConfig {
    pub fn new(capture_threshold: u8) -> Result<Self, ConfigError> {
        let max = BOARD_SIZE as u8;
        if capture_threshold == 0 || capture_threshold > max {
            return Err(ConfigError::CaptureThreshold {
                value: capture_threshold,
                max,
            });
        }
        Ok(Self { capture_threshold })
    }

    pub fn capture_threshold(&self) -> u8 {
        self.capture_threshold
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            capture_threshold: DEFAULT_CAPTURE_THRESHOLD,
        }
    }
}
