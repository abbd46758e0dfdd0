use serde::{Deserialize, Serialize};

/// Named board presets. Pure data, just constructor sugar for
/// [`crate::logic::Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const fn rows(self) -> usize {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Normal => 15,
            Difficulty::Hard => 20,
        }
    }

    pub const fn cols(self) -> usize {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Normal => 15,
            Difficulty::Hard => 20,
        }
    }

    pub const fn mine_count(self) -> usize {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Normal => 30,
            Difficulty::Hard => 60,
        }
    }
}
