use crate::schema::GameConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thirteenth_core::{FaceRank, GenrePointBehavior, SuccessCondition, TrophyPileInitial};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Values used when a field is left blank.
    Fallback,
    /// The tuned "reset to defaults" table.
    #[default]
    Recommended,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Fallback, Preset::Recommended];

    pub fn name(self) -> &'static str {
        match self {
            Self::Fallback => "fallback",
            Self::Recommended => "recommended",
        }
    }

    pub fn config(self) -> GameConfig {
        let fallback = GameConfig {
            max_rounds: 1000,
            max_strikes: 3,
            num_players: 4,
            genre_points: 0,
            genre_point_behavior: GenrePointBehavior::Reroll,
            success_condition: SuccessCondition::EqualOrHigher,
            jack_modifier: 1,
            queen_modifier: 2,
            king_modifier: 3,
            success_number_cards: 2,
            failure_number_cards: 1,
            low_fallout_face_card: FaceRank::Jack,
            high_fallout_face_card: FaceRank::Queen,
            include_aces: true,
            include_twos: true,
            include_threes: true,
            include_fours: true,
            include_fives: true,
            include_initial_face_card: true,
            initial_face_card_type: FaceRank::Jack,
            trophy_pile_initial: TrophyPileInitial::Top,
            shuffle_trophy_on_fail: false,
            shuffle_trophy_on_face_card: false,
            shuffle_trophy_on_joker: true,
        };
        match self {
            Self::Fallback => fallback,
            Self::Recommended => GameConfig {
                genre_points: 13,
                genre_point_behavior: GenrePointBehavior::RerollPlusOne,
                success_number_cards: 1,
                include_fives: false,
                trophy_pile_initial: TrophyPileInitial::Bottom,
                shuffle_trophy_on_face_card: true,
                ..fallback
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown preset {value:?}"))
    }
}
