use crate::{Card, Deck, FaceRank};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Normal,
    Endgame,
    Victory,
    Defeat,
    Timeout,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Timeout)
    }
}

/// Why a run stopped. Serialized as its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EndReason {
    Victory,
    ThreatDeckEmpty,
    AllPlayersEliminated { weaknesses: usize },
    Timeout,
}

impl EndReason {
    pub fn is_victory(self) -> bool {
        self == Self::Victory
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory => f.write_str("Victory - Red Joker Success"),
            Self::ThreatDeckEmpty => f.write_str("Defeat - Threat Deck Empty"),
            Self::AllPlayersEliminated { weaknesses } => write!(
                f,
                "Defeat - All Players Eliminated ({weaknesses}/4 weaknesses)"
            ),
            Self::Timeout => f.write_str("Timeout - Max Rounds Reached"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown end reason: {0}")]
pub struct ParseEndReasonError(String);

impl FromStr for EndReason {
    type Err = ParseEndReasonError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Victory - Red Joker Success" => return Ok(Self::Victory),
            "Defeat - Threat Deck Empty" => return Ok(Self::ThreatDeckEmpty),
            "Timeout - Max Rounds Reached" => return Ok(Self::Timeout),
            _ => {}
        }
        value
            .trim()
            .strip_prefix("Defeat - All Players Eliminated (")
            .and_then(|rest| rest.strip_suffix("/4 weaknesses)"))
            .and_then(|count| count.parse().ok())
            .map(|weaknesses| Self::AllPlayersEliminated { weaknesses })
            .ok_or_else(|| ParseEndReasonError(value.to_string()))
    }
}

impl From<EndReason> for String {
    fn from(value: EndReason) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for EndReason {
    type Error = ParseEndReasonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub win: bool,
    pub rounds: u32,
    pub tests: u32,
    pub end_reason: EndReason,
}

/// Off-deck pools feeding the threat deck.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reserves {
    pub number: Deck,
    pub jacks: Deck,
    pub queens: Deck,
    pub kings: Deck,
    pub jokers: Deck,
}

impl Reserves {
    pub fn face(&self, rank: FaceRank) -> &Deck {
        match rank {
            FaceRank::Jack => &self.jacks,
            FaceRank::Queen => &self.queens,
            FaceRank::King => &self.kings,
        }
    }

    pub fn face_mut(&mut self, rank: FaceRank) -> &mut Deck {
        match rank {
            FaceRank::Jack => &mut self.jacks,
            FaceRank::Queen => &mut self.queens,
            FaceRank::King => &mut self.kings,
        }
    }

    /// Draws `preferred`, falling back to each higher rank in turn.
    pub fn draw_face_or_higher(&mut self, preferred: FaceRank) -> Option<Card> {
        preferred
            .and_higher()
            .iter()
            .find_map(|rank| self.face_mut(*rank).draw())
    }

    pub fn len(&self) -> usize {
        self.number.len()
            + self.jacks.len()
            + self.queens.len()
            + self.kings.len()
            + self.jokers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    macro_rules! reason_case {
        ($name:ident, $reason:expr, $text:expr) => {
            #[test]
            fn $name() {
                assert_eq!($reason.to_string(), $text);
                assert_eq!($text.parse::<EndReason>(), Ok($reason));
            }
        };
    }

    reason_case!(victory_text, EndReason::Victory, "Victory - Red Joker Success");
    reason_case!(empty_text, EndReason::ThreatDeckEmpty, "Defeat - Threat Deck Empty");
    reason_case!(timeout_text, EndReason::Timeout, "Timeout - Max Rounds Reached");
    reason_case!(
        eliminated_text,
        EndReason::AllPlayersEliminated { weaknesses: 3 },
        "Defeat - All Players Eliminated (3/4 weaknesses)"
    );

    #[test]
    fn rejects_unknown_reason() {
        assert!("Defeat - Eaten".parse::<EndReason>().is_err());
        assert!("Defeat - All Players Eliminated (x/4 weaknesses)"
            .parse::<EndReason>()
            .is_err());
    }

    #[test]
    fn result_serializes_reason_as_text() {
        let result = GameResult {
            win: false,
            rounds: 12,
            tests: 30,
            end_reason: EndReason::AllPlayersEliminated { weaknesses: 1 },
        };
        let json = serde_json::to_string(&result).expect("ser");
        assert!(json.contains("\"endReason\":\"Defeat - All Players Eliminated (1/4 weaknesses)\""));
        let back: GameResult = serde_json::from_str(&json).expect("de");
        assert_eq!(back, result);
    }

    #[test]
    fn face_draw_falls_back_upwards() {
        let mut reserves = Reserves {
            kings: Deck::from_cards([Card::standard(Suit::Clubs, Rank::King)]),
            ..Reserves::default()
        };
        assert_eq!(
            reserves.draw_face_or_higher(FaceRank::Jack),
            Some(Card::standard(Suit::Clubs, Rank::King))
        );
        assert_eq!(reserves.draw_face_or_higher(FaceRank::Jack), None);
    }

    #[test]
    fn face_draw_never_falls_back_downwards() {
        let mut reserves = Reserves {
            jacks: Deck::from_cards([Card::standard(Suit::Clubs, Rank::Jack)]),
            ..Reserves::default()
        };
        assert_eq!(reserves.draw_face_or_higher(FaceRank::Queen), None);
        assert_eq!(reserves.jacks.len(), 1);
    }
}
