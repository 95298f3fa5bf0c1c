use serde::{Deserialize, Serialize};

pub use thirteenth_core::{
    ConfigError, FaceRank, GameConfig, GenrePointBehavior, SuccessCondition, TrophyPileInitial,
};

/// Single narrated run or a batch of runs; carried along in exported text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Single,
    Multiple,
}

impl RunMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Multiple => "Multiple",
        }
    }
}

/// Partial configuration. Unset fields leave the base config untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigPatch {
    pub mode: Option<RunMode>,
    pub max_rounds: Option<u32>,
    pub max_strikes: Option<u32>,
    pub num_players: Option<usize>,
    pub genre_points: Option<u32>,
    pub genre_point_behavior: Option<GenrePointBehavior>,
    pub success_condition: Option<SuccessCondition>,
    pub jack_modifier: Option<i32>,
    pub queen_modifier: Option<i32>,
    pub king_modifier: Option<i32>,
    pub success_number_cards: Option<usize>,
    pub failure_number_cards: Option<usize>,
    pub low_fallout_face_card: Option<FaceRank>,
    pub high_fallout_face_card: Option<FaceRank>,
    pub include_aces: Option<bool>,
    pub include_twos: Option<bool>,
    pub include_threes: Option<bool>,
    pub include_fours: Option<bool>,
    pub include_fives: Option<bool>,
    pub include_initial_face_card: Option<bool>,
    pub initial_face_card_type: Option<FaceRank>,
    pub trophy_pile_initial: Option<TrophyPileInitial>,
    pub shuffle_trophy_on_fail: Option<bool>,
    pub shuffle_trophy_on_face_card: Option<bool>,
    pub shuffle_trophy_on_joker: Option<bool>,
}

macro_rules! patch_fields {
    ($patch:expr, $config:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $config.$field = value;
            }
        )+
    };
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, config: &mut GameConfig) {
        patch_fields!(
            self,
            config,
            max_rounds,
            max_strikes,
            num_players,
            genre_points,
            genre_point_behavior,
            success_condition,
            jack_modifier,
            queen_modifier,
            king_modifier,
            success_number_cards,
            failure_number_cards,
            low_fallout_face_card,
            high_fallout_face_card,
            include_aces,
            include_twos,
            include_threes,
            include_fours,
            include_fives,
            include_initial_face_card,
            initial_face_card_type,
            trophy_pile_initial,
            shuffle_trophy_on_fail,
            shuffle_trophy_on_face_card,
            shuffle_trophy_on_joker,
        );
    }

    /// Applies onto a copy of `base` and validates the result.
    pub fn merged(&self, base: &GameConfig) -> Result<GameConfig, ConfigError> {
        let mut config = base.clone();
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}
