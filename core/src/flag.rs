use crate::*;

/// Flips the flag on an unrevealed tile, flags on revealed tiles are left alone.
pub fn toggle_flag(store: &mut TileStore, coords: Coord2) -> Result<MarkOutcome> {
    let tile = store.tile_at(coords)?;
    if tile.is_revealed() {
        return Ok(MarkOutcome::NoChange);
    }

    Ok(if store.set_flag(coords, !tile.is_flagged())? {
        MarkOutcome::Changed
    } else {
        MarkOutcome::NoChange
    })
}

/// Mines not yet accounted for by a flag, negative when the player over-flags.
pub fn flags_remaining(store: &TileStore) -> i32 {
    i32::from(store.mine_count()) - i32::from(store.flagged_count())
}
