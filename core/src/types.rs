use core::fmt;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts, tile counts and linear positions.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, both 1-based.
pub type Coord2 = (Coord, Coord);

/// Linear tile identity in `1..=width*height`, related to coordinates by
/// `index = width * (y - 1) + x`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub CellCount);

impl Position {
    pub const fn get(self) -> CellCount {
        self.0
    }
}

impl From<CellCount> for Position {
    fn from(index: CellCount) -> Self {
        Self(index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Maps in-bounds 1-based coordinates onto the 0-based storage index.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [
            usize::from(self.0.saturating_sub(1)),
            usize::from(self.1.saturating_sub(1)),
        ]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Board dimensions, fixed for the lifetime of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    width: Coord,
    height: Coord,
}

impl Grid {
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    pub const fn width(self) -> Coord {
        self.width
    }

    pub const fn height(self) -> Coord {
        self.height
    }

    pub const fn size(self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_tiles(self) -> CellCount {
        mult(self.width, self.height)
    }

    pub(crate) fn shape(self) -> [usize; 2] {
        [usize::from(self.width), usize::from(self.height)]
    }

    pub const fn contains(self, coords: Coord2) -> bool {
        let (x, y) = coords;
        x >= 1 && x <= self.width && y >= 1 && y <= self.height
    }

    pub fn validate_coords(self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn validate_position(self, position: Position) -> Result<Position> {
        if position.0 >= 1 && position.0 <= self.total_tiles() {
            Ok(position)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn to_index(self, coords: Coord2) -> Result<Position> {
        let (x, y) = self.validate_coords(coords)?;
        Ok(Position(mult(self.width, y - 1) + CellCount::from(x)))
    }

    pub fn to_coord(self, position: Position) -> Result<Coord2> {
        let Position(index) = self.validate_position(position)?;
        let offset = index - 1;
        let width = CellCount::from(self.width);
        // both quotients are bounded by the grid dimensions
        let x = (offset % width + 1) as Coord;
        let y = (offset / width + 1) as Coord;
        Ok((x, y))
    }

    /// All in-bounds coordinates at Chebyshev distance one.
    pub fn neighbors(self, coords: Coord2) -> SmallVec<[Coord2; 8]> {
        self.iter_neighbors(coords).collect()
    }

    pub fn iter_neighbors(self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Coordinates in ascending position order.
    pub fn iter_coords(self) -> impl Iterator<Item = Coord2> {
        let (width, height) = self.size();
        (1..=height).flat_map(move |y| (1..=width).map(move |x| (x, y)))
    }

    pub fn iter_positions(self) -> impl Iterator<Item = Position> {
        (1..=self.total_tiles()).map(Position)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in `1..=bounds` on both axes.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x == 0 || next_x > max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y == 0 || next_y > max_y {
        return None;
    }

    Some((next_x, next_y))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
