use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Single source of truth for tile state during a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileStore {
    grid: Grid,
    tiles: Array2<Tile>,
    mine_count: CellCount,
    safe_revealed: CellCount,
    flagged: CellCount,
}

impl TileStore {
    /// Builds the store for a fresh board, adjacency counts are computed once here.
    pub fn new(layout: &MineLayout) -> Self {
        let grid = layout.grid();
        let mut tiles: Array2<Tile> = Array2::default(grid.shape());

        for coords in grid.iter_coords() {
            tiles[coords.to_nd_index()] = Tile {
                is_mine: layout[coords],
                adjacent: layout.adjacent_mine_count(coords),
                ..Tile::default()
            };
        }

        Self {
            grid,
            tiles,
            mine_count: layout.mine_count(),
            safe_revealed: 0,
            flagged: 0,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_tiles(&self) -> CellCount {
        self.grid.total_tiles()
    }

    /// Distinct non-mine tiles revealed so far.
    pub fn safe_revealed_count(&self) -> CellCount {
        self.safe_revealed
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged
    }

    /// Whether every safe tile has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.safe_revealed + self.mine_count == self.total_tiles()
    }

    pub fn get(&self, position: Position) -> Result<Tile> {
        self.tile_at(self.grid.to_coord(position)?)
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.tiles[coords.to_nd_index()])
    }

    pub(crate) fn is_revealed_at(&self, coords: Coord2) -> bool {
        self.tile_at(coords).is_ok_and(Tile::is_revealed)
    }

    pub fn adjacency_count(&self, coords: Coord2) -> Result<u8> {
        Ok(self.tile_at(coords)?.adjacent)
    }

    /// Marks a tile revealed, returns whether it was hidden before.
    pub fn set_revealed(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.grid.validate_coords(coords)?;
        let tile = &mut self.tiles[coords.to_nd_index()];
        if tile.revealed {
            return Ok(false);
        }

        tile.revealed = true;
        if !tile.is_mine {
            self.safe_revealed += 1;
        }
        Ok(true)
    }

    /// Sets or clears a flag on an unrevealed tile, returns whether anything changed.
    pub fn set_flag(&mut self, coords: Coord2, flagged: bool) -> Result<bool> {
        let coords = self.grid.validate_coords(coords)?;
        let tile = &mut self.tiles[coords.to_nd_index()];
        if tile.revealed || tile.flagged == flagged {
            return Ok(false);
        }

        tile.flagged = flagged;
        if flagged {
            self.flagged += 1;
        } else {
            self.flagged -= 1;
        }
        Ok(true)
    }

    /// Mine coordinates in ascending position order.
    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.grid
            .iter_coords()
            .filter(|&coords| self.tiles[coords.to_nd_index()].is_mine)
    }

    pub fn mine_positions(&self) -> Vec<Position> {
        let grid = self.grid;
        grid.iter_positions()
            .zip(grid.iter_coords())
            .filter(|&(_, coords)| self.tiles[coords.to_nd_index()].is_mine)
            .map(|(position, _)| position)
            .collect()
    }

    /// Reveals every mine at once, used when the game is lost.
    pub fn reveal_mines(&mut self) -> Vec<Position> {
        let mines = self.mine_positions();
        for coords in self.grid.iter_coords() {
            let tile = &mut self.tiles[coords.to_nd_index()];
            if tile.is_mine {
                tile.revealed = true;
            }
        }
        mines
    }
}
