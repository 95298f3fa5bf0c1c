use crate::{Card, RandomSource};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Ordered pile of cards; the front is the top.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn shuffle<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn draw_bottom(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Draws up to `count` cards from the top, in order.
    pub fn take_top(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.cards.len());
        self.cards.drain(..count).collect()
    }

    pub fn add_top(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    pub fn add_bottom(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.front()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Removes the first card matching rank and suit.
    pub fn remove_card(&mut self, card: &Card) -> Option<Card> {
        let index = self.cards.iter().position(|c| c == card)?;
        self.cards.remove(index)
    }

    /// Removes every number card, keeping the order of what remains.
    pub fn remove_number_cards(&mut self) -> Vec<Card> {
        let (numbers, rest): (Vec<Card>, Vec<Card>) =
            self.cards.drain(..).partition(|card| card.is_number());
        self.cards = rest.into();
        numbers
    }
}

impl Extend<Card> for Deck {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        self.cards.extend(iter);
    }
}
