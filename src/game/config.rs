use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::DEFAULT_DICE_MAX;
use crate::game::action::ActionKind;
use crate::game::players::DEFAULT_REQUIRED_POINTS;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub dice_max: u32,
    pub required_points: u32,
    pub seed: u64,
    pub actions: Vec<ActionKind>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            dice_max: DEFAULT_DICE_MAX,
            required_points: DEFAULT_REQUIRED_POINTS,
            seed: 42,
            actions: ActionKind::default_playset(),
        }
    }
}

impl RoundConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Same settings with the seed shifted by `game_idx`, for batches of games.
    pub fn for_game(&self, game_idx: u32) -> Self {
        Self {
            seed: self.seed.wrapping_add(u64::from(game_idx)),
            ..self.clone()
        }
    }
}
