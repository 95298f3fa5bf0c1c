use super::*;
use crate::{roll_d13, Event, RollStage};

impl<R: RandomSource> Game<R> {
    /// Rolls one test for `actor` against `threat`. Spends at most one genre
    /// point, and only on a failed first attempt.
    pub fn perform_test(
        &mut self,
        actor: usize,
        threat: &Card,
        difficulty: i32,
        events: &mut dyn EventSink,
    ) -> TestOutcome {
        self.tests += 1;
        let actor = self.characters[actor % self.characters.len()].clone();
        let condition = self.config.success_condition;

        let first = roll_d13(&mut self.rng);
        events.emit(Event::Rolled {
            stage: RollStage::Initial,
            main: first.main,
            fallout: first.fallout,
            total: first.total(),
        });
        let mut fallout =
            self.apply_aptitude(&actor, first.fallout, first.main, threat, difficulty, events);
        let mut total = first.main + fallout;
        let mut genre_point = None;

        if !condition.check(total, difficulty) && self.genre_points > 0 {
            self.genre_points -= 1;
            let behavior = self.config.genre_point_behavior;
            genre_point = Some(behavior);
            events.emit(Event::GenrePointSpent {
                behavior,
                remaining: self.genre_points,
            });

            let (main, raw_fallout) = match behavior {
                GenrePointBehavior::PlusOne => (first.main + 1, first.fallout),
                GenrePointBehavior::Reroll => {
                    let roll = roll_d13(&mut self.rng);
                    events.emit(Event::Rolled {
                        stage: RollStage::Reroll,
                        main: roll.main,
                        fallout: roll.fallout,
                        total: roll.total(),
                    });
                    (roll.main, roll.fallout)
                }
                GenrePointBehavior::RerollPlusOne => {
                    let roll = roll_d13(&mut self.rng);
                    events.emit(Event::Rolled {
                        stage: RollStage::RerollPlusOne,
                        main: roll.main + 1,
                        fallout: roll.fallout,
                        total: roll.total() + 1,
                    });
                    (roll.main + 1, roll.fallout)
                }
            };
            fallout = self.apply_aptitude(&actor, raw_fallout, main, threat, difficulty, events);
            total = main + fallout;
        }

        let success = condition.check(total, difficulty);
        events.emit(Event::TestResolved {
            total,
            fallout,
            success,
            genre_point,
        });
        TestOutcome {
            success,
            total,
            fallout,
            genre_point,
        }
    }

    fn apply_aptitude(
        &self,
        actor: &Character,
        fallout: i32,
        main: i32,
        threat: &Card,
        difficulty: i32,
        events: &mut dyn EventSink,
    ) -> i32 {
        let adjusted = actor.adjust_fallout(
            fallout,
            threat.suit,
            difficulty,
            main,
            self.config.success_condition,
        );
        if adjusted != fallout {
            events.emit(Event::AptitudeApplied {
                aptitude: actor.aptitude(),
                from: fallout,
                to: adjusted,
                total_before: main + fallout,
                total_after: main + adjusted,
            });
        }
        adjusted
    }
}
