use super::*;

/// Uniformly random placement that keeps the protected zone around the start
/// cell free of mines. The same seed and start always give the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: BoardConfig, start: Coord2) -> Result<MineLayout> {
        use rand::prelude::*;
        use rand::seq::index;

        let start = config.validate_coords(start)?;
        let size = config.size();

        let mut protected: Array2<bool> = Array2::default(size.to_nd_index());
        for coords in protected_zone(start, size) {
            protected[coords.to_nd_index()] = true;
        }

        let candidates: Vec<Coord2> = protected
            .indexed_iter()
            .filter(|&(_, &is_protected)| !is_protected)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect();

        let mines = usize::from(config.mines);
        if candidates.len() < mines {
            // candidates never outnumber the board cells, so this fits
            let available = candidates.len() as CellCount;
            log::warn!(
                "Cannot place {} mines around {:?}, only {} cells available",
                config.mines,
                start,
                available
            );
            return Err(GameError::InsufficientSpace {
                mines: config.mines,
                available,
            });
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for i in index::sample(&mut rng, candidates.len(), mines) {
            mine_mask[candidates[i].to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);

        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "Placed {} mines on {}x{} avoiding {:?}",
            layout.mine_count(),
            config.rows,
            config.cols,
            start
        );
        Ok(layout)
    }
}
