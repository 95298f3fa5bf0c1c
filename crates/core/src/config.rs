use crate::FaceRank;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum GenrePointBehavior {
    Reroll,
    PlusOne,
    RerollPlusOne,
}

impl GenrePointBehavior {
    pub fn label(self) -> &'static str {
        match self {
            Self::Reroll => "Reroll",
            Self::PlusOne => "+1 to Main",
            Self::RerollPlusOne => "Reroll +1",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Reroll => "[Reroll]",
            Self::PlusOne => "[+1]",
            Self::RerollPlusOne => "[Reroll+1]",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SuccessCondition {
    EqualOrHigher,
    HigherThan,
}

impl SuccessCondition {
    pub fn check(self, total: i32, difficulty: i32) -> bool {
        match self {
            Self::EqualOrHigher => total >= difficulty,
            Self::HigherThan => total > difficulty,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::EqualOrHigher => "≥",
            Self::HigherThan => ">",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrophyPileInitial {
    Top,
    Bottom,
    None,
}

impl TrophyPileInitial {
    pub fn label(self) -> &'static str {
        match self {
            Self::Top => "Top of Reserve",
            Self::Bottom => "Bottom of Reserve",
            Self::None => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrophyShuffleTrigger {
    Fail,
    FaceCard,
    Joker,
}

impl fmt::Display for TrophyShuffleTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fail => "failure",
            Self::FaceCard => "face card",
            Self::Joker => "joker",
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("numPlayers must be at least 1")]
    NoPlayers,
    #[error("maxRounds must be at least 1")]
    NoRounds,
}

/// Every rule toggle of a run. All fields are required; defaults live with
/// whoever builds the config, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub max_rounds: u32,
    pub max_strikes: u32,
    pub num_players: usize,
    pub genre_points: u32,
    pub genre_point_behavior: GenrePointBehavior,
    pub success_condition: SuccessCondition,
    pub jack_modifier: i32,
    pub queen_modifier: i32,
    pub king_modifier: i32,
    pub success_number_cards: usize,
    pub failure_number_cards: usize,
    pub low_fallout_face_card: FaceRank,
    pub high_fallout_face_card: FaceRank,
    pub include_aces: bool,
    pub include_twos: bool,
    pub include_threes: bool,
    pub include_fours: bool,
    pub include_fives: bool,
    pub include_initial_face_card: bool,
    pub initial_face_card_type: FaceRank,
    pub trophy_pile_initial: TrophyPileInitial,
    pub shuffle_trophy_on_fail: bool,
    pub shuffle_trophy_on_face_card: bool,
    pub shuffle_trophy_on_joker: bool,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        Ok(())
    }

    pub fn face_modifier(&self, face: FaceRank) -> i32 {
        match face {
            FaceRank::Jack => self.jack_modifier,
            FaceRank::Queen => self.queen_modifier,
            FaceRank::King => self.king_modifier,
        }
    }

    /// Reserve rank drawn after beating a face card.
    pub fn preferred_face_for(&self, fallout: i32) -> FaceRank {
        if fallout <= 2 {
            self.low_fallout_face_card
        } else {
            self.high_fallout_face_card
        }
    }

    /// Whether all four cards of pip `value` (2..=5) go into the threat pool.
    pub fn includes_pool_rank(&self, value: i32) -> bool {
        match value {
            2 => self.include_twos,
            3 => self.include_threes,
            4 => self.include_fours,
            5 => self.include_fives,
            _ => false,
        }
    }

    pub fn shuffles_trophy_on(&self, trigger: TrophyShuffleTrigger) -> bool {
        match trigger {
            TrophyShuffleTrigger::Fail => self.shuffle_trophy_on_fail,
            TrophyShuffleTrigger::FaceCard => self.shuffle_trophy_on_face_card,
            TrophyShuffleTrigger::Joker => self.shuffle_trophy_on_joker,
        }
    }

    /// Cards dealt into the threat deck at setup, aces included.
    pub fn threat_pool_size(&self) -> usize {
        let ranks = (2..=5).filter(|value| self.includes_pool_rank(*value)).count();
        let aces = usize::from(self.include_aces);
        let face = usize::from(self.include_initial_face_card);
        4 * (ranks + aces) + face
    }

    /// Number cards (2-10) left in the reserve before the trophy pile is seeded.
    pub fn number_reserve_size(&self) -> usize {
        let ranks = (2..=5).filter(|value| self.includes_pool_rank(*value)).count();
        36 - 4 * ranks
    }
}
