use hashbrown::HashSet;

use super::*;

/// Uniform placement by rejection sampling: coordinates are drawn over the whole grid and a draw that collides with
/// an already chosen tile is simply drawn again.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, grid: Grid, mines: CellCount) -> MineLayout {
        use rand::prelude::*;

        let total_tiles = grid.total_tiles();
        let max_mines = total_tiles.saturating_sub(1);
        let mines = if mines > max_mines {
            log::warn!(
                "Too many mines, requested {} but only {} fit while keeping a safe tile",
                mines,
                max_mines
            );
            max_mines
        } else {
            mines
        };

        let (width, height) = grid.size();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut chosen: HashSet<Coord2> = HashSet::with_capacity(mines.into());
        let mut collisions = 0u32;

        while chosen.len() < usize::from(mines) {
            let coords = (rng.random_range(1..=width), rng.random_range(1..=height));
            if !chosen.insert(coords) {
                collisions += 1;
            }
        }

        let mut mine_mask: Array2<bool> = Array2::default(grid.shape());
        for &coords in &chosen {
            mine_mask[coords.to_nd_index()] = true;
        }

        log::debug!(
            "Placed {} mines on {} grid, {} draws collided",
            mines,
            grid,
            collisions
        );
        MineLayout::from_mine_mask(grid, mine_mask)
    }
}
