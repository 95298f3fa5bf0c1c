use crate::{SuccessCondition, Suit};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Aptitude {
    Power,
    Resolve,
    Intellect,
    Finesse,
}

impl Aptitude {
    pub fn for_suit(suit: Suit) -> Self {
        match suit {
            Suit::Spades => Self::Power,
            Suit::Hearts => Self::Resolve,
            Suit::Clubs => Self::Intellect,
            Suit::Diamonds => Self::Finesse,
        }
    }
}

impl fmt::Display for Aptitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    suit: Suit,
    aptitude: Aptitude,
    pub acted: bool,
}

impl Character {
    pub fn new(suit: Suit) -> Self {
        Self {
            suit,
            aptitude: Aptitude::for_suit(suit),
            acted: false,
        }
    }

    /// One character per suit, in suit order.
    pub fn roster() -> [Character; 4] {
        Suit::ALL.map(Character::new)
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn aptitude(&self) -> Aptitude {
        self.aptitude
    }

    pub fn reset(&mut self) {
        self.acted = false;
    }

    /// Shifts `fallout` by one when the threat matches this character's suit.
    ///
    /// Preference: turn a failure into a success (raising first, then
    /// lowering, never landing on 4), otherwise lower the fallout of a success
    /// as long as it still succeeds, otherwise lower the total of a failure.
    pub fn adjust_fallout(
        &self,
        fallout: i32,
        threat_suit: Option<Suit>,
        difficulty: i32,
        main_roll: i32,
        condition: SuccessCondition,
    ) -> i32 {
        if threat_suit != Some(self.suit) {
            return fallout;
        }
        let add_one = (fallout + 1).clamp(1, 4);
        let sub_one = (fallout - 1).clamp(1, 4);
        let succeeds = |value: i32| condition.check(main_roll + value, difficulty);

        if !succeeds(fallout) && succeeds(add_one) && add_one < 4 {
            return add_one;
        }
        if !succeeds(fallout) && succeeds(sub_one) && sub_one < 4 {
            return sub_one;
        }
        if succeeds(fallout) {
            return [add_one, sub_one]
                .into_iter()
                .find(|value| *value < fallout && succeeds(*value))
                .unwrap_or(fallout);
        }
        let mut best = fallout;
        for candidate in [add_one, sub_one] {
            if main_roll + candidate < main_roll + best {
                best = candidate;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! adjust_case {
        ($name:ident, $fallout:expr, $difficulty:expr, $main:expr, $condition:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let hero = Character::new(Suit::Hearts);
                let adjusted = hero.adjust_fallout(
                    $fallout,
                    Some(Suit::Hearts),
                    $difficulty,
                    $main,
                    $condition,
                );
                assert_eq!(adjusted, $expected);
            }
        };
    }

    use SuccessCondition::{EqualOrHigher, HigherThan};

    // success kept at 5; lowering to 1 would drop the total to 4
    adjust_case!(keeps_fallout_when_lowering_breaks_success, 2, 5, 3, EqualOrHigher, 2);
    adjust_case!(lowers_fallout_on_comfortable_success, 3, 5, 6, EqualOrHigher, 2);
    adjust_case!(fallout_one_success_is_untouched, 1, 2, 5, EqualOrHigher, 1);
    adjust_case!(raises_to_rescue_failure, 2, 6, 3, EqualOrHigher, 3);
    adjust_case!(never_raises_into_four, 3, 7, 3, EqualOrHigher, 2);
    adjust_case!(raise_needed_under_strict_condition, 1, 4, 3, HigherThan, 2);
    adjust_case!(hopeless_failure_lowers_total, 3, 12, 2, EqualOrHigher, 2);
    adjust_case!(hopeless_failure_at_one_stays, 1, 12, 2, EqualOrHigher, 1);
    adjust_case!(four_comes_down_on_success, 4, 5, 4, EqualOrHigher, 3);

    #[test]
    fn other_suits_are_ignored() {
        let hero = Character::new(Suit::Spades);
        assert_eq!(hero.adjust_fallout(2, Some(Suit::Clubs), 9, 3, EqualOrHigher), 2);
        assert_eq!(hero.adjust_fallout(2, None, 9, 3, EqualOrHigher), 2);
    }

    #[test]
    fn roster_pairs_suits_with_aptitudes() {
        let roster = Character::roster();
        let pairs: Vec<(Suit, Aptitude)> =
            roster.iter().map(|c| (c.suit(), c.aptitude())).collect();
        assert_eq!(
            pairs,
            vec![
                (Suit::Spades, Aptitude::Power),
                (Suit::Hearts, Aptitude::Resolve),
                (Suit::Clubs, Aptitude::Intellect),
                (Suit::Diamonds, Aptitude::Finesse),
            ]
        );
        assert!(roster.iter().all(|c| !c.acted));
    }
}
