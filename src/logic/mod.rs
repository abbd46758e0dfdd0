use std::fmt;

use rand::{Rng, seq::SliceRandom};
use serde::Serialize;

use crate::{
    data::{Difficulty, Minefield},
    error::GameError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Won,
    Lost,
}

/// One game instance: the minefield plus the win/loss state machine.
///
/// `Won` and `Lost` are terminal. A game is won once every safe cell is open
/// and lost as soon as any mine is opened; nothing transitions out of either.
#[derive(Debug)]
pub struct Game {
    minefield: Minefield,
    status: GameStatus,
    moves: u32,
    mine_count: usize,
    opened_count: usize,
}

impl Game {
    /// Creates a game with `mine_count` mines placed uniformly at random.
    /// A count larger than the board is clamped to the cell count.
    pub fn new(rows: usize, cols: usize, mine_count: usize) -> Result<Self, GameError> {
        Self::with_rng(rows, cols, mine_count, &mut rand::rng())
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Result<Self, GameError> {
        Self::new(
            difficulty.rows(),
            difficulty.cols(),
            difficulty.mine_count(),
        )
    }

    /// Like [`Game::new`] but with an injected random source, so mine
    /// placement is reproducible under a seeded rng.
    pub fn with_rng<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        mine_count: usize,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let mut minefield = Minefield::new(rows, cols)?;

        let mut positions: Vec<(usize, usize)> = minefield
            .cells()
            .iter()
            .map(|cell| (cell.row(), cell.col()))
            .collect();
        positions.shuffle(rng);

        let placed = mine_count.min(positions.len());
        for &(row, col) in positions.iter().take(placed) {
            minefield.cell_mut(row, col)?.set_mine();
        }

        Ok(Self::from_minefield(minefield, placed))
    }

    /// Creates a game with mines at exactly the given coordinates. Fails if
    /// any coordinate is out of range; duplicates are allowed and counted
    /// once.
    pub fn with_mines(
        rows: usize,
        cols: usize,
        mines: &[(usize, usize)],
    ) -> Result<Self, GameError> {
        let mut minefield = Minefield::new(rows, cols)?;
        for &(row, col) in mines {
            minefield.cell_mut(row, col)?.set_mine();
        }

        let mine_count = minefield.cells().iter().filter(|cell| cell.is_mine()).count();
        Ok(Self::from_minefield(minefield, mine_count))
    }

    fn from_minefield(minefield: Minefield, mine_count: usize) -> Self {
        Self {
            minefield,
            status: GameStatus::Ongoing,
            moves: 0,
            mine_count,
            opened_count: 0,
        }
    }

    pub fn minefield(&self) -> &Minefield {
        &self.minefield
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of accepted top-level reveal actions.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn is_lost(&self) -> bool {
        self.status == GameStatus::Lost
    }

    pub fn is_over(&self) -> bool {
        self.is_won() || self.is_lost()
    }

    fn safe_cell_count(&self) -> usize {
        self.minefield.cells().len() - self.mine_count
    }

    /// Attempts to open the square at `(row, col)`.
    ///
    /// Opening a square with no mines among its neighbors cascades into the
    /// neighbors as well, via an explicit work list rather than call-stack
    /// recursion. The cascade never enqueues a neighbor of a cell that
    /// touches a mine, so only the top-level square can lose the game.
    ///
    /// Returns `true` if the square was newly opened. Calls on a finished
    /// game, an open square, or a flagged square are no-ops returning
    /// `false`; only an out-of-range coordinate is an error.
    pub fn open_square(&mut self, row: usize, col: usize) -> Result<bool, GameError> {
        let target = self.minefield.cell(row, col)?;
        if self.is_over() || target.is_open() || target.is_flagged() {
            return Ok(false);
        }

        self.moves += 1;

        let mut pending = vec![(row, col)];
        while let Some((row, col)) = pending.pop() {
            let cell = self.minefield.cell_mut(row, col)?;
            if cell.is_open() || cell.is_flagged() {
                continue;
            }
            cell.set_open();

            if cell.is_mine() {
                self.status = GameStatus::Lost;
                break;
            }

            self.opened_count += 1;
            if self.opened_count == self.safe_cell_count() {
                self.status = GameStatus::Won;
                break;
            }

            if self.minefield.adjacent_mines(row, col) == 0 {
                for (neighbor_row, neighbor_col) in self.minefield.neighbor_positions(row, col) {
                    let neighbor = self.minefield.cell(neighbor_row, neighbor_col)?;
                    if !neighbor.is_open() && !neighbor.is_flagged() {
                        pending.push((neighbor_row, neighbor_col));
                    }
                }
            }
        }

        Ok(true)
    }

    /// Flips the flag on a closed square. Flagging an open square or moving
    /// on a finished game is rejected.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> Result<(), GameError> {
        let cell = self.minefield.cell(row, col)?;
        if self.is_over() {
            return Err(GameError::InvalidOperation("game is already over"));
        }
        if cell.is_open() {
            return Err(GameError::InvalidOperation("cannot flag an open square"));
        }

        self.minefield.cell_mut(row, col)?.toggle_flag();
        Ok(())
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Moves {}\n\n{}", self.moves, self.minefield)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn count_mines(game: &Game) -> usize {
        game.minefield()
            .cells()
            .iter()
            .filter(|cell| cell.is_mine())
            .count()
    }

    #[test]
    fn places_exactly_the_requested_number_of_mines() {
        let mut rng = StdRng::seed_from_u64(42);

        for mine_count in [0, 1, 7, 30] {
            let game = Game::with_rng(6, 5, mine_count, &mut rng).unwrap();
            assert_eq!(count_mines(&game), mine_count);
            assert_eq!(game.status(), GameStatus::Ongoing);
            assert_eq!(game.moves(), 0);
        }
    }

    #[test]
    fn mine_count_is_clamped_to_the_board() {
        let mut rng = StdRng::seed_from_u64(7);
        let game = Game::with_rng(2, 2, 100, &mut rng).unwrap();

        assert_eq!(count_mines(&game), 4);
    }

    #[test]
    fn seeded_placement_is_reproducible() {
        let first = Game::with_rng(8, 8, 10, &mut StdRng::seed_from_u64(3)).unwrap();
        let second = Game::with_rng(8, 8, 10, &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(
            first.minefield().to_string(),
            second.minefield().to_string()
        );
        let mines = |game: &Game| {
            game.minefield()
                .cells()
                .iter()
                .filter(|cell| cell.is_mine())
                .map(|cell| (cell.row(), cell.col()))
                .collect::<Vec<_>>()
        };
        assert_eq!(mines(&first), mines(&second));
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        assert_eq!(
            Game::new(0, 3, 1).unwrap_err(),
            GameError::InvalidDimensions { rows: 0, cols: 3 }
        );
    }

    #[test]
    fn opening_a_mine_loses_the_game() {
        let mut game = Game::with_mines(2, 2, &[(1, 0), (1, 1)]).unwrap();

        assert!(game.open_square(1, 0).unwrap());
        assert!(game.is_lost());
        assert!(!game.is_won());
    }

    #[test]
    fn opening_all_safe_squares_wins_the_game() {
        let mut game = Game::with_mines(2, 2, &[(1, 0), (1, 1)]).unwrap();

        assert!(game.open_square(0, 0).unwrap());
        assert!(!game.is_over());
        assert!(game.open_square(0, 1).unwrap());
        assert!(game.is_won());
        assert_eq!(game.moves(), 2);
    }

    #[test]
    fn cascade_opens_the_zero_region_and_stops_at_numbered_cells() {
        let mut game = Game::with_mines(2, 4, &[(0, 2)]).unwrap();

        assert!(game.open_square(1, 0).unwrap());

        assert_eq!(game.minefield().to_string(), "01??\n01??");
        assert_eq!(game.moves(), 1);
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn cascade_does_not_cross_flagged_squares() {
        let mut game = Game::with_mines(2, 4, &[(0, 2)]).unwrap();
        game.toggle_flag(0, 0).unwrap();

        assert!(game.open_square(1, 0).unwrap());

        let flagged = game.minefield().cell(0, 0).unwrap();
        assert!(flagged.is_flagged());
        assert!(!flagged.is_open());
        assert_eq!(game.minefield().to_string(), "F1??\n01??");
    }

    #[test]
    fn cascade_can_win_the_game() {
        let mut game = Game::with_mines(3, 3, &[(2, 2)]).unwrap();

        assert!(game.open_square(0, 0).unwrap());

        assert!(game.is_won());
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn finished_game_ignores_further_reveals() {
        let mut game = Game::with_mines(2, 2, &[(1, 0), (1, 1)]).unwrap();
        game.open_square(1, 0).unwrap();
        assert!(game.is_lost());

        assert!(!game.open_square(0, 0).unwrap());
        assert!(game.is_lost());
        assert!(!game.minefield().cell(0, 0).unwrap().is_open());
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn reopening_an_open_square_is_a_no_op() {
        let mut game = Game::with_mines(2, 2, &[(1, 1)]).unwrap();

        assert!(game.open_square(0, 0).unwrap());
        assert!(!game.open_square(0, 0).unwrap());
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn opening_a_flagged_square_is_a_no_op() {
        let mut game = Game::with_mines(2, 2, &[(1, 1)]).unwrap();
        game.toggle_flag(0, 0).unwrap();

        assert!(!game.open_square(0, 0).unwrap());

        let cell = game.minefield().cell(0, 0).unwrap();
        assert!(cell.is_flagged());
        assert!(!cell.is_open());
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn flagging_an_open_square_is_rejected() {
        let mut game = Game::with_mines(2, 2, &[(1, 1)]).unwrap();
        game.open_square(0, 0).unwrap();

        assert_eq!(
            game.toggle_flag(0, 0).unwrap_err(),
            GameError::InvalidOperation("cannot flag an open square")
        );
    }

    #[test]
    fn flagging_after_game_over_is_rejected() {
        let mut game = Game::with_mines(1, 2, &[(0, 0)]).unwrap();
        game.open_square(0, 0).unwrap();
        assert!(game.is_lost());

        assert_eq!(
            game.toggle_flag(0, 1).unwrap_err(),
            GameError::InvalidOperation("game is already over")
        );
    }

    #[test]
    fn out_of_range_moves_fail_without_touching_state() {
        let mut game = Game::with_mines(2, 2, &[(1, 1)]).unwrap();

        assert_eq!(
            game.open_square(5, 0).unwrap_err(),
            GameError::CoordinateOutOfRange { row: 5, col: 0 }
        );
        assert_eq!(
            game.toggle_flag(0, 9).unwrap_err(),
            GameError::CoordinateOutOfRange { row: 0, col: 9 }
        );
        assert_eq!(game.moves(), 0);
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn display_includes_moves_and_board() {
        let mut game = Game::with_mines(1, 2, &[(0, 0)]).unwrap();
        game.open_square(0, 1).unwrap();

        assert_eq!(game.to_string(), "Moves 1\n\n?1");
    }
}
