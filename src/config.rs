use serde::{Deserialize, Serialize};

use crate::engine::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::error::EngineError;

/// Construction-time knobs for a [`Board`](crate::engine::Board).
///
/// - `size`: grid dimension N (the board is NxN).
/// - `seed`: seed for the random source; `None` draws from OS entropy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub size: usize,
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { size: DEFAULT_SIZE, seed: None }
    }
}

impl BoardConfig {
    pub fn seeded(seed: u64) -> Self { Self { seed: Some(seed), ..Self::default() } }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(EngineError::InvalidSize { size: self.size, min: MIN_SIZE, max: MAX_SIZE });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_classic_board() {
        let config = BoardConfig::default();
        assert_eq!(config.size, 4);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
        assert_eq!(BoardConfig::seeded(9).seed, Some(9));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: BoardConfig = serde_json::from_str(r#"{"seed": 11}"#).unwrap();
        assert_eq!(config, BoardConfig { size: 4, seed: Some(11) });
    }

    #[test]
    fn size_out_of_range() {
        let err = BoardConfig { size: 1, seed: None }.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid board size 1: must be within 2..=16");
    }
}
