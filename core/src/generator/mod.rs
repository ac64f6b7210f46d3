use crate::*;
pub use random::*;

mod random;

/// Strategy for laying out mines once the first cell to open is known.
pub trait MineGenerator {
    fn generate(self, config: BoardConfig, start: Coord2) -> Result<MineLayout>;
}

/// The first-click cell and its in-bounds neighbours, the cells mine placement
/// has to avoid.
pub fn protected_zone(start: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    core::iter::once(start).chain(neighbors(start, size))
}
