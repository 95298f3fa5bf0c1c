use super::*;
use crate::{Event, FaceRank, Pile, Rank, TrophyShuffleTrigger};
use std::cmp::Reverse;

impl<R: RandomSource> Game<R> {
    /// Rank of the trophy pile's top card, or 1 while the pile is empty.
    pub fn trophy_base(&self) -> i32 {
        self.trophy_pile
            .peek_top()
            .and_then(|card| card.rank.value())
            .unwrap_or(1)
    }

    pub fn difficulty(&self, card: &Card) -> i32 {
        match (card.rank.value(), card.rank.face()) {
            (Some(value), _) => value,
            (None, Some(face)) => self
                .trophy_base()
                .saturating_add(self.config.face_modifier(face)),
            (None, None) => self.trophy_base(),
        }
    }

    pub(super) fn resolve_number(
        &mut self,
        player: usize,
        card: Card,
        outcome: TestOutcome,
        events: &mut dyn EventSink,
    ) {
        self.threat_deck.draw();
        if outcome.success {
            self.trophy_pile.add_top(card);
            events.emit(Event::CardTrophied { card });
            self.deal_number_reserve(self.config.success_number_cards, events);
            return;
        }
        self.threat_deck.add_bottom(card);
        events.emit(Event::CardRequeued { card });
        self.deal_number_reserve(self.config.failure_number_cards, events);
        if outcome.fallout == 4 {
            self.add_strike(player, events);
        }
        self.shuffle_trophy_if(TrophyShuffleTrigger::Fail, events);
    }

    pub(super) fn resolve_face(
        &mut self,
        player: usize,
        card: Card,
        outcome: TestOutcome,
        events: &mut dyn EventSink,
    ) {
        self.threat_deck.draw();
        if outcome.success {
            match card.suit.filter(|suit| !self.defeated_suits.contains(suit)) {
                Some(suit) => {
                    self.out_of_play.add_bottom(card);
                    self.defeated_suits.insert(suit);
                    events.emit(Event::SuitDefeated {
                        suit,
                        defeated: self.defeated_suits.len(),
                    });
                    if self.defeated_suits.len() == Suit::ALL.len() {
                        self.setup_endgame(events);
                    }
                }
                None => {
                    self.threat_deck.add_bottom(card);
                    events.emit(Event::CardRequeued { card });
                }
            }
            let preferred = self.config.preferred_face_for(outcome.fallout);
            self.draw_face_into_threat_deck(preferred, events);
            if outcome.fallout == 4 {
                self.add_strike(player, events);
            }
        } else {
            self.add_strike(player, events);
            self.threat_deck.add_bottom(card);
            events.emit(Event::CardRequeued { card });
            self.draw_face_into_threat_deck(FaceRank::King, events);
        }
        self.shuffle_trophy_if(TrophyShuffleTrigger::FaceCard, events);
        self.shuffle_threat_deck(events);
    }

    /// Jokers test against the bare trophy rank with whoever was picked to act.
    /// This is a second test on top of the reveal test `take_turn` already rolled.
    pub(super) fn resolve_joker(
        &mut self,
        player: usize,
        actor: usize,
        card: Card,
        events: &mut dyn EventSink,
    ) {
        self.threat_deck.draw();
        events.emit(Event::JokerTriggered { card });
        self.shuffle_trophy_if(TrophyShuffleTrigger::Joker, events);

        let difficulty = self.trophy_base();
        self.emit_actor(player, actor, card, difficulty, events);
        let outcome = self.perform_test(actor, &card, difficulty, events);

        if card.rank == Rank::RedJoker {
            if outcome.success {
                self.out_of_play.add_bottom(card);
                self.finish(EndReason::Victory);
                return;
            }
            self.add_strike(player, events);
            self.threat_deck.add_bottom(card);
            events.emit(Event::RedJokerReturned);
        } else {
            if outcome.success {
                let target = self
                    .threat_deck
                    .iter()
                    .filter(|candidate| candidate.is_face())
                    .min_by_key(|candidate| Reverse(candidate.rank.face()))
                    .copied();
                if let Some(banished) = target.and_then(|face| self.threat_deck.remove_card(&face)) {
                    self.out_of_play.add_bottom(banished);
                    events.emit(Event::FaceCardBanished { card: banished });
                }
            } else {
                self.draw_face_into_threat_deck(FaceRank::King, events);
            }
            self.out_of_play.add_bottom(card);
            events.emit(Event::BlackJokerDiscarded);
        }
        self.shuffle_threat_deck(events);
    }

    pub(super) fn emit_actor(
        &self,
        player: usize,
        actor: usize,
        card: Card,
        difficulty: i32,
        events: &mut dyn EventSink,
    ) {
        let character = &self.characters[actor];
        events.emit(Event::ActorChosen {
            player,
            suit: character.suit(),
            aptitude: character.aptitude(),
            card,
            difficulty,
        });
    }

    fn setup_endgame(&mut self, events: &mut dyn EventSink) {
        self.in_endgame = true;
        let numbers = self.threat_deck.remove_number_cards();
        self.out_of_play.extend(numbers);
        while let Some(joker) = self.reserves.jokers.draw() {
            self.threat_deck.add_bottom(joker);
        }
        self.shuffle_threat_deck(events);
        log::debug!(
            "endgame after {} tests, {} threats left",
            self.tests,
            self.threat_deck.len()
        );
        events.emit(Event::EndgameStarted {
            threat_deck: self.threat_deck.len(),
        });
    }

    fn deal_number_reserve(&mut self, count: usize, events: &mut dyn EventSink) {
        let cards = self.reserves.number.take_top(count);
        if cards.is_empty() {
            return;
        }
        self.threat_deck.extend(cards.iter().copied());
        events.emit(Event::ReserveDealt { cards });
    }

    fn draw_face_into_threat_deck(&mut self, preferred: FaceRank, events: &mut dyn EventSink) {
        match self.reserves.draw_face_or_higher(preferred) {
            Some(card) => {
                self.threat_deck.add_bottom(card);
                events.emit(Event::FaceCardDrawn { card, preferred });
            }
            None => events.emit(Event::FaceReserveEmpty { preferred }),
        }
    }

    fn add_strike(&mut self, player: usize, events: &mut dyn EventSink) {
        if let Some(strikes) = self.strikes.get_mut(player) {
            *strikes += 1;
            events.emit(Event::StrikeGained {
                player,
                strikes: *strikes,
            });
        }
    }

    fn shuffle_trophy_if(&mut self, trigger: TrophyShuffleTrigger, events: &mut dyn EventSink) {
        if !self.config.shuffles_trophy_on(trigger) || self.trophy_pile.len() < 2 {
            return;
        }
        self.trophy_pile.shuffle(&mut self.rng);
        events.emit(Event::Shuffled {
            pile: Pile::TrophyPile,
            size: self.trophy_pile.len(),
        });
    }

    fn shuffle_threat_deck(&mut self, events: &mut dyn EventSink) {
        self.threat_deck.shuffle(&mut self.rng);
        events.emit(Event::Shuffled {
            pile: Pile::ThreatDeck,
            size: self.threat_deck.len(),
        });
    }
}
