use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::{ChessError, Result};
use crate::search::alphabeta::DEFAULT_QUIESCENCE_DEPTH;
use crate::search::Difficulty;

/// Engine settings loadable from JSON. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Host level, 1 (easy) to 4 (expert).
    pub difficulty: i32,
    /// Seed for the move-choice RNG; entropy when absent.
    pub seed: Option<u64>,
    pub quiescence_depth: u32,
    /// Fixed root depth instead of the difficulty's.
    pub depth_override: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default().level(),
            seed: None,
            quiescence_depth: DEFAULT_QUIESCENCE_DEPTH,
            depth_override: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let cfg: EngineConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let cfg = Self::from_json_str(&text)?;
        info!("loaded engine config from {}", path.display());
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=4).contains(&self.difficulty) {
            return Err(ChessError::InvalidConfig(format!("difficulty {} outside 1..=4", self.difficulty)));
        }
        if self.depth_override == Some(0) {
            return Err(ChessError::InvalidConfig("depth_override must be at least 1".into()));
        }
        Ok(())
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_level(self.difficulty)
    }
}
