use serde::Serialize;

use crate::{
    data::Cell,
    logic::{Game, GameStatus},
};

const MINE_SYMBOL: &str = "M";
const FLAG_SYMBOL: &str = "F";
const EMPTY_SYMBOL: &str = " ";

/// Read-only projection of one square into display attributes. Built from a
/// borrowed [`Game`], so the presentation layer never holds a path back into
/// mutable engine state.
#[derive(Debug, Clone, Serialize)]
pub struct SquareView {
    pub row: usize,
    pub col: usize,
    pub css_class: String,
    pub text: String,
    pub disabled: bool,
}

impl SquareView {
    fn project(game: &Game, cell: &Cell) -> Self {
        let exploded = game.is_lost() && cell.is_mine();

        let mut classes = vec![if cell.is_open() { "open" } else { "closed" }];
        if exploded {
            classes.push("mine");
        }
        if cell.is_flagged() {
            classes.push("flagged");
        }

        let text = if exploded {
            MINE_SYMBOL.to_string()
        } else if cell.is_flagged() {
            FLAG_SYMBOL.to_string()
        } else if cell.is_open() {
            let count = game.minefield().adjacent_mines(cell.row(), cell.col());
            if count > 0 {
                count.to_string()
            } else {
                EMPTY_SYMBOL.to_string()
            }
        } else {
            EMPTY_SYMBOL.to_string()
        };

        Self {
            row: cell.row(),
            col: cell.col(),
            css_class: classes.join(" "),
            text,
            disabled: cell.is_open() || game.is_over(),
        }
    }
}

/// Full display snapshot of a game: status, move count, and the squares
/// grouped per row for straightforward rendering.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub status: GameStatus,
    pub status_text: &'static str,
    pub moves: u32,
    pub rows: Vec<Vec<SquareView>>,
}

impl GameView {
    pub fn from_game(game: &Game) -> Self {
        let minefield = game.minefield();

        let mut rows: Vec<Vec<SquareView>> = (0..minefield.rows())
            .map(|_| Vec::with_capacity(minefield.cols()))
            .collect();
        for cell in minefield.cells() {
            rows[cell.row()].push(SquareView::project(game, cell));
        }

        Self {
            status: game.status(),
            status_text: status_text(game.status()),
            moves: game.moves(),
            rows,
        }
    }
}

fn status_text(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Ongoing => "Game is on!",
        GameStatus::Won => "Game won!",
        GameStatus::Lost => "Game lost :(",
    }
}
