use serde::{Deserialize, Serialize};

/// Full state of a single tile, owned by the [`TileStore`](crate::TileStore).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) is_mine: bool,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) adjacent: u8,
}

impl Tile {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent
    }

    /// What the player is allowed to see of this tile.
    pub const fn view(self) -> TileView {
        match (self.revealed, self.is_mine, self.flagged) {
            (true, true, _) => TileView::Mine,
            (true, false, _) => TileView::Count(self.adjacent),
            (false, _, true) => TileView::Flagged,
            (false, _, false) => TileView::Hidden,
        }
    }
}

/// Player-visible rendering of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    Count(u8),
    Mine,
}

impl Default for TileView {
    fn default() -> Self {
        Self::Hidden
    }
}
