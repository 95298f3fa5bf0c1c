use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Spades => "♠",
            Self::Hearts => "♥",
            Self::Clubs => "♣",
            Self::Diamonds => "♦",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Spades => 0,
            Self::Hearts => 1,
            Self::Clubs => 2,
            Self::Diamonds => 3,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    RedJoker,
    BlackJoker,
}

impl Rank {
    pub const NUMBERS: [Rank; 10] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
    ];

    /// Pip value of a number rank; `None` for faces and jokers.
    pub fn value(self) -> Option<i32> {
        match self {
            Self::Ace => Some(1),
            Self::Two => Some(2),
            Self::Three => Some(3),
            Self::Four => Some(4),
            Self::Five => Some(5),
            Self::Six => Some(6),
            Self::Seven => Some(7),
            Self::Eight => Some(8),
            Self::Nine => Some(9),
            Self::Ten => Some(10),
            _ => None,
        }
    }

    pub fn from_value(value: i32) -> Option<Self> {
        Self::NUMBERS.get(usize::try_from(value - 1).ok()?).copied()
    }

    pub fn face(self) -> Option<FaceRank> {
        match self {
            Self::Jack => Some(FaceRank::Jack),
            Self::Queen => Some(FaceRank::Queen),
            Self::King => Some(FaceRank::King),
            _ => None,
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::Jack => "J".to_string(),
            Self::Queen => "Q".to_string(),
            Self::King => "K".to_string(),
            Self::RedJoker => "R".to_string(),
            Self::BlackJoker => "B".to_string(),
            number => number.value().unwrap_or_default().to_string(),
        }
    }
}

/// Face ranks in ascending order; used for reserve buckets and config choices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaceRank {
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl FaceRank {
    pub const ALL: [FaceRank; 3] = [FaceRank::Jack, FaceRank::Queen, FaceRank::King];

    pub fn rank(self) -> Rank {
        match self {
            Self::Jack => Rank::Jack,
            Self::Queen => Rank::Queen,
            Self::King => Rank::King,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }

    pub fn from_letter(value: &str) -> Option<Self> {
        match value.trim() {
            "J" | "j" => Some(Self::Jack),
            "Q" | "q" => Some(Self::Queen),
            "K" | "k" => Some(Self::King),
            _ => None,
        }
    }

    /// This rank followed by every higher one.
    pub fn and_higher(self) -> &'static [FaceRank] {
        match self {
            Self::Jack => &Self::ALL,
            Self::Queen => &Self::ALL[1..],
            Self::King => &Self::ALL[2..],
        }
    }
}

impl fmt::Display for FaceRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

pub const FULL_DECK_SIZE: usize = 54;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    #[serde(default)]
    pub suit: Option<Suit>,
}

impl Card {
    pub fn standard(suit: Suit, rank: Rank) -> Self {
        Self {
            rank,
            suit: Some(suit),
        }
    }

    pub fn red_joker() -> Self {
        Self {
            rank: Rank::RedJoker,
            suit: None,
        }
    }

    pub fn black_joker() -> Self {
        Self {
            rank: Rank::BlackJoker,
            suit: None,
        }
    }

    pub fn is_number(&self) -> bool {
        self.rank.value().is_some()
    }

    pub fn is_face(&self) -> bool {
        self.rank.face().is_some()
    }

    pub fn is_joker(&self) -> bool {
        matches!(self.rank, Rank::RedJoker | Rank::BlackJoker)
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }

    /// The canonical 54-card set: numbers by rank then suit, faces by rank
    /// then suit, then the red and black jokers.
    pub fn full_set() -> Vec<Card> {
        let mut cards = Vec::with_capacity(FULL_DECK_SIZE);
        for rank in Rank::NUMBERS {
            for suit in Suit::ALL {
                cards.push(Card::standard(suit, rank));
            }
        }
        for face in FaceRank::ALL {
            for suit in Suit::ALL {
                cards.push(Card::standard(suit, face.rank()));
            }
        }
        cards.push(Card::red_joker());
        cards.push(Card::black_joker());
        cards
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.rank.label(), suit),
            None => f.write_str(&self.rank.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_set_has_fifty_four_distinct_cards() {
        let cards = Card::full_set();
        assert_eq!(cards.len(), 54);
        let unique: std::collections::HashSet<_> = cards.iter().collect();
        assert_eq!(unique.len(), 54);
        assert_eq!(cards.iter().filter(|card| card.is_ace()).count(), 4);
        assert_eq!(cards.iter().filter(|card| card.is_face()).count(), 12);
        assert_eq!(cards.iter().filter(|card| card.is_joker()).count(), 2);
    }

    #[test]
    fn classification_is_exclusive() {
        for card in Card::full_set() {
            let kinds = [card.is_number(), card.is_face(), card.is_joker()];
            assert_eq!(kinds.iter().filter(|kind| **kind).count(), 1, "{card}");
            assert_eq!(card.suit.is_none(), card.is_joker());
        }
    }

    #[test]
    fn display_matches_table_notation() {
        assert_eq!(Card::standard(Suit::Hearts, Rank::Seven).to_string(), "7♥");
        assert_eq!(Card::standard(Suit::Spades, Rank::Ten).to_string(), "10♠");
        assert_eq!(Card::standard(Suit::Clubs, Rank::King).to_string(), "K♣");
        assert_eq!(Card::red_joker().to_string(), "R");
        assert_eq!(Card::black_joker().to_string(), "B");
    }

    #[test]
    fn face_fallback_order_is_ascending() {
        assert_eq!(FaceRank::Jack.and_higher().len(), 3);
        assert_eq!(FaceRank::Queen.and_higher(), &[FaceRank::Queen, FaceRank::King]);
        assert_eq!(FaceRank::King.and_higher(), &[FaceRank::King]);
    }

    #[test]
    fn rank_values_round_trip() {
        for value in 1..=10 {
            let rank = Rank::from_value(value).expect("number rank");
            assert_eq!(rank.value(), Some(value));
        }
        assert_eq!(Rank::from_value(0), None);
        assert_eq!(Rank::from_value(11), None);
    }
}
