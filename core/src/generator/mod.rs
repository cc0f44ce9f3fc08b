use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, grid: Grid, mines: CellCount) -> MineLayout;
}
