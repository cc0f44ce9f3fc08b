use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use config::*;
pub use engine::*;
pub use error::*;
pub use flag::*;
pub use generator::*;
pub use presenter::*;
pub use reveal::*;
pub use store::*;
pub use tile::*;
pub use timer::*;
pub use types::*;

mod config;
mod engine;
mod error;
mod flag;
mod generator;
mod presenter;
mod reveal;
mod store;
mod tile;
mod timer;
mod types;

/// Immutable placement of mines on a grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    grid: Grid,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(grid: Grid, mine_mask: Array2<bool>) -> Self {
        // the mask never holds more cells than the grid does
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            grid,
            mine_mask,
            mine_count,
        }
    }

    /// Builds a fixed layout, duplicated coordinates collapse into a single mine.
    pub fn from_mine_coords(grid: Grid, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(grid.shape());

        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(grid, mine_mask))
    }

    pub fn from_positions(grid: Grid, positions: &[Position]) -> Result<Self> {
        let coords = positions
            .iter()
            .map(|&position| grid.to_coord(position))
            .collect::<Result<Vec<_>>>()?;
        Self::from_mine_coords(grid, &coords)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles() - self.mine_count
    }

    pub fn total_tiles(&self) -> CellCount {
        self.grid.total_tiles()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.grid.contains(coords) && self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbors
        self.grid
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    /// Mine coordinates in ascending position order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.grid.iter_coords().filter(|&coords| self[coords])
    }

    pub fn mine_positions(&self) -> Vec<Position> {
        self.iter_mines()
            .filter_map(|coords| self.grid.to_index(coords).ok())
            .collect()
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Result of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Result of a reveal, `Won` and `HitMine` end the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}
