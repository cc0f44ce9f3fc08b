use serde::{Deserialize, Serialize};

use crate::*;

/// Session configuration, immutable for the lifetime of a session and reused on restart.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    /// Multiplier applied to `base_mines`.
    pub difficulty: u8,
    pub base_mines: CellCount,
    /// Fixes the board sequence for reproducible sessions, seeded from the OS otherwise.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 22,
            height: 13,
            difficulty: 2,
            base_mines: 20,
            seed: None,
        }
    }
}

impl GameConfig {
    pub const fn new(width: Coord, height: Coord, difficulty: u8, base_mines: CellCount) -> Self {
        Self {
            width,
            height,
            difficulty,
            base_mines,
            seed: None,
        }
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_toml_str(text: &str) -> core::result::Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub const fn requested_mines(&self) -> u32 {
        self.difficulty as u32 * self.base_mines as u32
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.width, self.height)
    }

    /// Mine count for this configuration, at least one tile must stay safe.
    pub fn mine_count(&self) -> Result<CellCount> {
        let requested = self.requested_mines();
        let total = self.total_tiles();
        if requested >= u32::from(total) {
            return Err(GameError::TooManyMines { requested, total });
        }
        // bounded by `total` above
        Ok(requested as CellCount)
    }

    pub fn validate(&self) -> Result<()> {
        self.grid()?;
        self.mine_count()?;
        Ok(())
    }
}
