use hashbrown::HashSet;
use std::collections::VecDeque;

use crate::*;

/// Tiles uncovered by a single reveal request, in the order they were uncovered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Disclosure {
    pub revealed: Vec<Coord2>,
    pub hit_mine: bool,
}

impl Disclosure {
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    fn uncover(&mut self, store: &mut TileStore, coords: Coord2) -> Result<bool> {
        let uncovered = store.set_revealed(coords)?;
        if uncovered {
            self.revealed.push(coords);
        }
        Ok(uncovered)
    }
}

/// Reveals `origin` and flood-fills through connected zero-adjacency tiles.
///
/// Flags are advisory, a flagged tile is revealed like any other and keeps its flag. Each tile is uncovered at most
/// once, revealing an already revealed tile yields an empty [`Disclosure`].
pub fn disclose(store: &mut TileStore, origin: Coord2) -> Result<Disclosure> {
    let mut disclosure = Disclosure::default();

    if !disclosure.uncover(store, origin)? {
        return Ok(disclosure);
    }

    let tile = store.tile_at(origin)?;
    if tile.is_mine() {
        disclosure.hit_mine = true;
        return Ok(disclosure);
    }
    if tile.adjacent_mines() > 0 {
        return Ok(disclosure);
    }

    let grid = store.grid();
    let mut visited: HashSet<Coord2> = HashSet::new();
    visited.insert(origin);
    let mut to_visit: VecDeque<_> = grid
        .iter_neighbors(origin)
        .filter(|&pos| !store.is_revealed_at(pos))
        .collect();
    log::trace!(
        "Starting flood-fill from {:?}, initial neighbors: {:?}",
        origin,
        to_visit
    );

    while let Some(visit_coords) = to_visit.pop_front() {
        if !visited.insert(visit_coords) {
            continue;
        }

        // neighbors of a zero tile are never mines
        if !disclosure.uncover(store, visit_coords)? {
            continue;
        }

        let visit_count = store.adjacency_count(visit_coords)?;
        log::trace!(
            "Flood revealed tile at {:?}, mine count: {}",
            visit_coords,
            visit_count
        );

        if visit_count == 0 {
            to_visit.extend(
                grid.iter_neighbors(visit_coords)
                    .filter(|&pos| !store.is_revealed_at(pos))
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }

    Ok(disclosure)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(size: Coord2, mines: &[Coord2]) -> TileStore {
        let grid = Grid::new(size.0, size.1).unwrap();
        TileStore::new(&MineLayout::from_mine_coords(grid, mines).unwrap())
    }

    fn sorted(mut coords: Vec<Coord2>) -> Vec<Coord2> {
        coords.sort_by_key(|&(x, y)| (y, x));
        coords
    }

    #[test]
    fn numbered_tile_does_not_cascade() {
        let mut store = store((3, 3), &[(1, 1)]);

        let disclosure = disclose(&mut store, (2, 2)).unwrap();

        assert_eq!(disclosure.revealed, vec![(2, 2)]);
        assert!(!disclosure.hit_mine);
        assert_eq!(store.safe_revealed_count(), 1);
    }

    #[test]
    fn mine_is_revealed_and_reported() {
        let mut store = store((3, 3), &[(1, 1)]);

        let disclosure = disclose(&mut store, (1, 1)).unwrap();

        assert!(disclosure.hit_mine);
        assert_eq!(disclosure.revealed, vec![(1, 1)]);
        assert_eq!(store.safe_revealed_count(), 0);
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        // 4x4 with a single mine in the far corner
        let mut store = store((4, 4), &[(4, 4)]);

        let disclosure = disclose(&mut store, (1, 1)).unwrap();

        assert_eq!(disclosure.revealed.len(), 15);
        assert_eq!(store.safe_revealed_count(), 15);
        assert!(!store.tile_at((4, 4)).unwrap().is_revealed());
        assert!(store.is_cleared());
    }

    #[test]
    fn flood_fill_reveals_zero_region_and_one_ring() {
        // wall of mines in column 3 splits the board
        let mines = [(3, 1), (3, 2), (3, 3), (3, 4)];
        let mut store = store((5, 4), &mines);

        let disclosure = disclose(&mut store, (1, 1)).unwrap();

        let expected = sorted(vec![
            (1, 1),
            (2, 1),
            (1, 2),
            (2, 2),
            (1, 3),
            (2, 3),
            (1, 4),
            (2, 4),
        ]);
        assert_eq!(sorted(disclosure.revealed.clone()), expected);
        for coords in [(4, 1), (5, 1), (4, 4)] {
            assert!(!store.tile_at(coords).unwrap().is_revealed());
        }
    }

    #[test]
    fn each_tile_uncovered_once() {
        let mut store = store((8, 8), &[(8, 8), (1, 8)]);

        let disclosure = disclose(&mut store, (4, 1)).unwrap();

        let mut unique = disclosure.revealed.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), disclosure.revealed.len());
        assert_eq!(
            usize::from(store.safe_revealed_count()),
            disclosure.revealed.len()
        );
    }

    #[test]
    fn revealed_tile_is_a_no_op() {
        let mut store = store((4, 4), &[(4, 4)]);
        disclose(&mut store, (3, 3)).unwrap();

        let again = disclose(&mut store, (3, 3)).unwrap();

        assert!(again.is_empty());
        assert_eq!(store.safe_revealed_count(), 1);
    }

    #[test]
    fn flagged_tiles_are_revealed_without_touching_flags() {
        let mut store = store((4, 4), &[(4, 4)]);
        store.set_flag((2, 2), true).unwrap();
        store.set_flag((1, 1), true).unwrap();

        let disclosure = disclose(&mut store, (1, 1)).unwrap();

        assert_eq!(disclosure.revealed.len(), 15);
        assert_eq!(store.flagged_count(), 2);
        let tile = store.tile_at((2, 2)).unwrap();
        assert!(tile.is_revealed());
        assert_eq!(tile.view(), TileView::Count(0));
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut store = store((2, 2), &[]);

        assert_eq!(disclose(&mut store, (3, 1)), Err(GameError::InvalidCoords));
    }
}
