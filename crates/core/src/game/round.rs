use super::*;
use crate::Event;

impl<R: RandomSource> Game<R> {
    /// Plays one full round: every surviving player faces the top threat.
    /// Asking for a round past `max_rounds` times the game out instead.
    pub fn play_round(&mut self, events: &mut dyn EventSink) -> Result<(), GameError> {
        if self.end_reason.is_none() && self.rounds >= self.config.max_rounds {
            self.time_out(events);
        }
        if let Some(reason) = self.end_reason {
            return Err(GameError::GameOver(reason));
        }
        self.resolve_round(events);
        Ok(())
    }

    /// Plays rounds until the game ends or the round cap is reached.
    pub fn run(&mut self, events: &mut dyn EventSink) -> GameResult {
        while self.end_reason.is_none() && self.rounds < self.config.max_rounds {
            self.resolve_round(events);
        }
        let end_reason = match self.end_reason {
            Some(reason) => reason,
            None => self.time_out(events),
        };
        GameResult {
            win: self.victory,
            rounds: self.rounds,
            tests: self.tests,
            end_reason,
        }
    }

    fn time_out(&mut self, events: &mut dyn EventSink) -> EndReason {
        self.finish(EndReason::Timeout);
        events.emit(Event::GameEnded {
            reason: EndReason::Timeout,
            rounds: self.rounds,
            tests: self.tests,
        });
        EndReason::Timeout
    }

    /// Index of the character who acts: the unacted one matching `suit`, else
    /// the first unacted one. When all have acted everyone resets and the
    /// first character goes again.
    pub fn choose_actor(&mut self, suit: Option<Suit>) -> usize {
        let matching = self
            .characters
            .iter()
            .position(|character| !character.acted && Some(character.suit()) == suit);
        if let Some(index) = matching.or_else(|| self.characters.iter().position(|c| !c.acted)) {
            return index;
        }
        for character in &mut self.characters {
            character.reset();
        }
        0
    }

    fn resolve_round(&mut self, events: &mut dyn EventSink) {
        for character in &mut self.characters {
            character.reset();
        }
        events.emit(Event::RoundStarted {
            round: self.rounds + 1,
        });

        for player in 0..self.config.num_players {
            if self.game_over {
                break;
            }
            if self.is_eliminated(player) {
                continue;
            }
            if !self.take_turn(player, events) {
                break;
            }
        }

        if !self.game_over && self.all_eliminated() {
            self.finish(EndReason::AllPlayersEliminated {
                weaknesses: self.defeated_suits.len(),
            });
        }
        self.rounds += 1;
        if let Some(reason) = self.end_reason {
            events.emit(Event::GameEnded {
                reason,
                rounds: self.rounds,
                tests: self.tests,
            });
        }
    }

    /// Returns false when the threat deck ran dry.
    fn take_turn(&mut self, player: usize, events: &mut dyn EventSink) -> bool {
        let Some(card) = self.top_card() else {
            self.finish(EndReason::ThreatDeckEmpty);
            return false;
        };
        events.emit(Event::ThreatRevealed { player, card });

        let actor = self.choose_actor(card.suit);
        self.characters[actor].acted = true;

        // Every revealed card is tested, jokers included. A joker ignores
        // this outcome and resolves on its own test.
        let difficulty = self.difficulty(&card);
        self.emit_actor(player, actor, card, difficulty, events);
        let outcome = self.perform_test(actor, &card, difficulty, events);
        if card.is_joker() {
            self.resolve_joker(player, actor, card, events);
        } else if card.is_number() {
            self.resolve_number(player, card, outcome, events);
        } else {
            self.resolve_face(player, card, outcome, events);
        }
        self.emit_status(events);
        true
    }
}
