use rand::prelude::*;

use super::*;

/// Generation strategy that keeps the 3x3 zone around the first click free and can keep mines apart, but other
/// than that is purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    first_click: Option<Coord2>,
    min_spacing: Coord,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, first_click: Option<Coord2>, min_spacing: Coord) -> Self {
        Self {
            seed,
            first_click,
            min_spacing,
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Generated {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_board(config, self.first_click, self.min_spacing, &mut rng)
    }
}

/// Places `config.mines` mines by rejection sampling.
///
/// A candidate is rejected when it is already a mine, lies in the 3x3 neighborhood of `first_click`, or is within
/// Chebyshev distance `min_spacing` of a placed mine. Sampling stops after `rows * cols * 10` attempts, in which
/// case the board is returned with fewer mines and [`Placement::Partial`].
pub fn generate_board<R: Rng + ?Sized>(
    config: GameConfig,
    first_click: Option<Coord2>,
    min_spacing: Coord,
    rng: &mut R,
) -> Generated {
    let (rows, cols) = config.size;
    let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
    let mut forbidden: Array2<bool> = Array2::default(config.size.to_nd_index());

    if let Some(center) = first_click {
        if center.0 < rows && center.1 < cols {
            forbidden[center.to_nd_index()] = true;
        }
        for pos in forbidden.iter_neighbors(center) {
            forbidden[pos.to_nd_index()] = true;
        }
    }

    let max_attempts = u32::from(config.total_cells()) * 10;
    let mut attempts = 0;
    let mut placed: CellCount = 0;

    if rows > 0 && cols > 0 {
        while placed < config.mines && attempts < max_attempts {
            attempts += 1;
            let candidate = (rng.random_range(0..rows), rng.random_range(0..cols));
            let index = candidate.to_nd_index();

            if mines[index] || forbidden[index] || too_close(&mines, candidate, min_spacing) {
                continue;
            }

            mines[index] = true;
            placed += 1;
        }
    }

    let placement = if placed < config.mines {
        log::warn!(
            "Only placed {} of {} mines after {} attempts (spacing {})",
            placed,
            config.mines,
            attempts,
            min_spacing
        );
        Placement::Partial {
            requested: config.mines,
            placed,
        }
    } else {
        Placement::Complete
    };

    log::debug!(
        "Generated {}x{} board with {} mines in {} attempts",
        rows,
        cols,
        placed,
        attempts
    );

    Generated {
        board: Board::from_mine_mask_unchecked(mines),
        placement,
    }
}

/// Whether any mine sits within `spacing` (Chebyshev) of `coords`.
fn too_close(mines: &Array2<bool>, (row, col): Coord2, spacing: Coord) -> bool {
    if spacing == 0 {
        return false;
    }

    let (rows, cols) = mines.dim();
    let row_end = usize::from(row.saturating_add(spacing)).min(rows - 1);
    let col_end = usize::from(col.saturating_add(spacing)).min(cols - 1);

    for r in usize::from(row.saturating_sub(spacing))..=row_end {
        for c in usize::from(col.saturating_sub(spacing))..=col_end {
            if mines[[r, c]] {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn recount(board: &Board, coords: Coord2) -> u8 {
        let (rows, cols) = board.size();
        let mut count = 0;
        for r in 0..rows {
            for c in 0..cols {
                if (r, c) != coords && chebyshev((r, c), coords) == 1 && board.contains_mine((r, c)) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn places_every_mine_outside_first_click_zone() {
        let config = GameConfig::square(10, 20);
        let generated = RandomBoardGenerator::new(7, Some((4, 4)), 0).generate(config);

        assert_eq!(generated.placement, Placement::Complete);
        assert_eq!(generated.board.mine_count(), 20);
        for mine in generated.board.mine_coords() {
            assert!(chebyshev(mine, (4, 4)) > 1, "mine {mine:?} inside forbidden zone");
        }
    }

    #[test]
    fn neighbor_counts_match_recount() {
        let config = GameConfig::new((9, 13), 30);
        let generated = RandomBoardGenerator::new(99, None, 0).generate(config);
        let board = &generated.board;

        let (rows, cols) = board.size();
        for r in 0..rows {
            for c in 0..cols {
                if !board.contains_mine((r, c)) {
                    assert_eq!(board.adjacent_mine_count((r, c)), recount(board, (r, c)));
                }
            }
        }
    }

    #[test]
    fn spacing_keeps_mines_apart() {
        let config = GameConfig::square(12, 15);
        let generated = RandomBoardGenerator::new(3, Some((0, 0)), 1).generate(config);
        let mines: Vec<_> = generated.board.mine_coords().collect();

        assert_eq!(mines.len(), usize::from(generated.board.mine_count()));
        for (i, &a) in mines.iter().enumerate() {
            for &b in &mines[i + 1..] {
                assert!(chebyshev(a, b) > 1, "{a:?} and {b:?} are adjacent");
            }
        }
    }

    #[test]
    fn reports_shortfall_under_spacing_pressure() {
        let config = GameConfig::square(5, 20);
        let generated = RandomBoardGenerator::new(11, None, 2).generate(config);

        assert!(generated.placement.is_partial());
        assert_eq!(generated.board.size(), (5, 5));
        let Placement::Partial { requested, placed } = generated.placement else {
            unreachable!();
        };
        assert_eq!(requested, 20);
        assert_eq!(placed, generated.board.mine_count());
        assert_eq!(generated.placement.shortfall(), 20 - placed);
        // at most one mine fits in each 3x3 block when spacing is 2
        assert!(placed <= 4);
    }

    #[test]
    fn forbidden_zone_can_exhaust_tiny_board() {
        let config = GameConfig::square(3, 1);
        let generated = RandomBoardGenerator::new(0, Some((1, 1)), 0).generate(config);

        assert_eq!(
            generated.placement,
            Placement::Partial {
                requested: 1,
                placed: 0
            }
        );
        assert_eq!(generated.board.mine_count(), 0);
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::square(16, 40);
        let a = RandomBoardGenerator::new(42, Some((8, 8)), 0).generate(config);
        let b = RandomBoardGenerator::new(42, Some((8, 8)), 0).generate(config);
        assert_eq!(a, b);
    }
}
