use serde::{Deserialize, Serialize};

use crate::{data::Difficulty, view::GameView};

/// Zero-based board coordinate as sent by clients.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

/// Body of `POST /games`: either a named preset or explicit board
/// parameters.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NewGameRequest {
    Preset { difficulty: Difficulty },
    Custom { rows: usize, cols: usize, mines: usize },
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: String,
    pub view: GameView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_request_accepts_presets_and_custom_boards() {
        let preset: NewGameRequest = serde_json::from_str(r#"{"difficulty": "hard"}"#).unwrap();
        assert!(matches!(
            preset,
            NewGameRequest::Preset {
                difficulty: Difficulty::Hard
            }
        ));

        let custom: NewGameRequest =
            serde_json::from_str(r#"{"rows": 4, "cols": 6, "mines": 5}"#).unwrap();
        assert!(matches!(
            custom,
            NewGameRequest::Custom {
                rows: 4,
                cols: 6,
                mines: 5
            }
        ));
    }
}
