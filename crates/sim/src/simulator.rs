use crate::{GameTrace, SimError};
use thirteenth_core::{Event, EventBus, EventSink, Game, GameConfig, NullSink, RngState};

/// One seeded game that keeps every event it emits.
#[derive(Debug)]
pub struct Simulator {
    pub game: Game,
    pub events: EventBus,
    seed: u64,
}

impl Simulator {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        let mut events = EventBus::default();
        let game = Game::with_events(config, RngState::from_seed(seed), &mut events);
        Ok(Self { game, events, seed })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Plays to the end, forwarding each event to `live` as it is recorded.
    pub fn run_with(mut self, live: &mut dyn EventSink) -> GameTrace {
        for event in self.events.events() {
            live.emit(event.clone());
        }
        let bus = &mut self.events;
        let mut tee = |event: &Event| {
            bus.push(event.clone());
            live.emit(event.clone());
        };
        let result = self.game.run(&mut tee);
        log::debug!(
            "seed {:#x}: {} in {} rounds",
            self.seed,
            result.end_reason,
            result.rounds
        );
        GameTrace {
            seed: self.seed,
            config: self.game.config().clone(),
            result,
            events: self.events.into_events(),
        }
    }

    pub fn run(self) -> GameTrace {
        self.run_with(&mut NullSink)
    }
}

pub fn run_single(config: &GameConfig, seed: u64) -> Result<GameTrace, SimError> {
    Ok(Simulator::new(config.clone(), seed)?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use thirteenth_core::{FaceRank, GenrePointBehavior, SuccessCondition, TrophyPileInitial};

    fn sample_config() -> GameConfig {
        GameConfig {
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
        }
    }

    #[test]
    fn trace_starts_with_setup_shuffle_and_ends_with_result() {
        let trace = run_single(&sample_config(), 7).expect("run");
        assert!(matches!(
            trace.events.first(),
            Some(Event::Shuffled { size: 17, .. })
        ));
        assert!(matches!(trace.events.last(), Some(Event::GameEnded { .. })));
        assert!(trace.result.rounds <= 1000);
    }

    #[test]
    fn live_sink_sees_what_the_trace_keeps() {
        let mut seen = 0usize;
        let trace = Simulator::new(sample_config(), 11)
            .expect("new")
            .run_with(&mut |_: &Event| seen += 1);
        assert_eq!(seen, trace.events.len());
    }

    #[test]
    fn invalid_config_is_refused() {
        let mut config = sample_config();
        config.num_players = 0;
        assert!(matches!(
            run_single(&config, 1),
            Err(SimError::Config(_))
        ));
    }
}
