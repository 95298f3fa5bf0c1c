use crate::{
    Card, Character, Deck, EndReason, EventSink, GameConfig, GameResult, GenrePointBehavior,
    NullSink, Phase, RandomSource, Reserves, RngState, Suit, FULL_DECK_SIZE,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

mod check;
mod round;
mod setup;
mod threats;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game already finished: {0}")]
    GameOver(EndReason),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestOutcome {
    pub success: bool,
    pub total: i32,
    pub fallout: i32,
    pub genre_point: Option<GenrePointBehavior>,
}

/// One playthrough. Built from a config, advanced only by [`Game::play_round`]
/// or [`Game::run`].
#[derive(Debug, Clone)]
pub struct Game<R = RngState> {
    config: GameConfig,
    rng: R,
    pub characters: [Character; 4],
    pub threat_deck: Deck,
    pub trophy_pile: Deck,
    pub reserves: Reserves,
    pub out_of_play: Deck,
    pub strikes: Vec<u32>,
    pub defeated_suits: BTreeSet<Suit>,
    pub genre_points: u32,
    in_endgame: bool,
    game_over: bool,
    victory: bool,
    rounds: u32,
    tests: u32,
    end_reason: Option<EndReason>,
}

impl Game<RngState> {
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, RngState::from_seed(seed))
    }
}

impl<R: RandomSource> Game<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self::with_events(config, rng, &mut NullSink)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn tests(&self) -> u32 {
        self.tests
    }

    pub fn in_endgame(&self) -> bool {
        self.in_endgame
    }

    /// True once a player-facing outcome (victory or defeat) is reached.
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn victory(&self) -> bool {
        self.victory
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn phase(&self) -> Phase {
        match self.end_reason {
            Some(EndReason::Victory) => Phase::Victory,
            Some(EndReason::Timeout) => Phase::Timeout,
            Some(_) => Phase::Defeat,
            None if self.in_endgame => Phase::Endgame,
            None => Phase::Normal,
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        self.end_reason.map(|end_reason| GameResult {
            win: self.victory,
            rounds: self.rounds,
            tests: self.tests,
            end_reason,
        })
    }

    pub fn is_eliminated(&self, player: usize) -> bool {
        self.strikes
            .get(player)
            .is_some_and(|strikes| *strikes >= self.config.max_strikes)
    }

    pub fn all_eliminated(&self) -> bool {
        (0..self.config.num_players).all(|player| self.is_eliminated(player))
    }

    /// Every card of the full set sits in exactly one of these piles.
    pub fn cards_accounted(&self) -> usize {
        self.threat_deck.len() + self.trophy_pile.len() + self.reserves.len() + self.out_of_play.len()
    }

    pub fn is_conserved(&self) -> bool {
        self.cards_accounted() == FULL_DECK_SIZE
    }

    fn finish(&mut self, reason: EndReason) {
        if self.end_reason.is_some() {
            return;
        }
        log::debug!("game ended after {} rounds: {reason}", self.rounds);
        self.game_over = reason != EndReason::Timeout;
        self.victory = reason.is_victory();
        self.end_reason = Some(reason);
    }

    fn emit_status(&self, events: &mut dyn EventSink) {
        events.emit(crate::Event::TurnStatus {
            strikes: self.strikes.clone(),
            genre_points: self.genre_points,
        });
    }

    fn top_card(&self) -> Option<Card> {
        self.threat_deck.peek_top().copied()
    }
}
