//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::{HidMapError, HidMapResult};

/// Highest accepted debug level.
pub const MAX_DEBUG_LEVEL: u8 = 9;

/// Per-engine settings injected at attach time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Logging verbosity: 0 only warns, 1 logs attach summaries, 5 and up
    /// traces every translated value.
    pub debug_level: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { debug_level: 1 }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> HidMapResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)
            .map_err(|e| HidMapError::config(format!("invalid engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> HidMapResult<()> {
        if self.debug_level > MAX_DEBUG_LEVEL {
            return Err(HidMapError::config(format!(
                "debug_level {} exceeds {MAX_DEBUG_LEVEL}",
                self.debug_level
            )));
        }
        Ok(())
    }

    pub fn with_debug_level(mut self, level: u8) -> Self {
        self.debug_level = level;
        self
    }

    /// Whether messages of verbosity `level` should be logged.
    pub fn verbose(&self, level: u8) -> bool {
        self.debug_level >= level
    }
}
