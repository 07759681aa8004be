use serde::{Deserialize, Serialize};

use crate::time_settings::TimeSettings;

pub const DEFAULT_BOARD_SIZE: u8 = 19;

/// Game-wide settings and metadata stored with a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInformation {
    pub board_size: u8,
    pub handicap: u32,
    pub komi: f64,
    pub rules: Option<String>,
    pub player_black: Option<String>,
    pub player_white: Option<String>,
    pub rank_black: Option<String>,
    pub rank_white: Option<String>,
    pub date: Option<String>,
    pub result: Option<String>,
    pub time_settings: Option<TimeSettings>,
}

impl GameInformation {
    pub fn new(board_size: u8) -> Self {
        GameInformation {
            board_size,
            ..GameInformation::default()
        }
    }
}

impl Default for GameInformation {
    fn default() -> Self {
        GameInformation {
            board_size: DEFAULT_BOARD_SIZE,
            handicap: 0,
            komi: 0.0,
            rules: None,
            player_black: None,
            player_white: None,
            rank_black: None,
            rank_white: None,
            date: None,
            result: None,
            time_settings: None,
        }
    }
}
