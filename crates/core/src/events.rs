use crate::{Aptitude, Card, EndReason, FaceRank, GenrePointBehavior, Suit};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Pile {
    ThreatPool,
    ThreatDeck,
    TrophyPile,
}

impl fmt::Display for Pile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ThreatPool => "Threat Pool",
            Self::ThreatDeck => "Threat Deck",
            Self::TrophyPile => "Trophy Pile",
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RollStage {
    Initial,
    Reroll,
    RerollPlusOne,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    Shuffled {
        pile: Pile,
        size: usize,
    },
    RoundStarted {
        round: u32,
    },
    ThreatRevealed {
        player: usize,
        card: Card,
    },
    ActorChosen {
        player: usize,
        suit: Suit,
        aptitude: Aptitude,
        card: Card,
        difficulty: i32,
    },
    Rolled {
        stage: RollStage,
        main: i32,
        fallout: i32,
        total: i32,
    },
    AptitudeApplied {
        aptitude: Aptitude,
        from: i32,
        to: i32,
        total_before: i32,
        total_after: i32,
    },
    GenrePointSpent {
        behavior: GenrePointBehavior,
        remaining: u32,
    },
    TestResolved {
        total: i32,
        fallout: i32,
        success: bool,
        genre_point: Option<GenrePointBehavior>,
    },
    CardTrophied {
        card: Card,
    },
    CardRequeued {
        card: Card,
    },
    ReserveDealt {
        cards: Vec<Card>,
    },
    FaceCardDrawn {
        card: Card,
        preferred: FaceRank,
    },
    FaceReserveEmpty {
        preferred: FaceRank,
    },
    StrikeGained {
        player: usize,
        strikes: u32,
    },
    SuitDefeated {
        suit: Suit,
        defeated: usize,
    },
    EndgameStarted {
        threat_deck: usize,
    },
    JokerTriggered {
        card: Card,
    },
    RedJokerReturned,
    FaceCardBanished {
        card: Card,
    },
    BlackJokerDiscarded,
    TurnStatus {
        strikes: Vec<u32>,
        genre_points: u32,
    },
    GameEnded {
        reason: EndReason,
        rounds: u32,
        tests: u32,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shuffled { pile, size } => write!(f, "Shuffling {pile} ({size} cards)"),
            Self::RoundStarted { round } => write!(f, "--- Round {round} ---"),
            Self::ThreatRevealed { player, card } => {
                write!(f, "Player {}: next threat {card}", player + 1)
            }
            Self::ActorChosen {
                suit,
                aptitude,
                card,
                difficulty,
                ..
            } => write!(f, "Actor {suit} ({aptitude}) vs {card} (Diff {difficulty})"),
            Self::Rolled {
                stage,
                main,
                fallout,
                total,
            } => {
                let label = match stage {
                    RollStage::Initial => "Initial roll",
                    RollStage::Reroll => "Reroll",
                    RollStage::RerollPlusOne => "Reroll +1",
                };
                write!(f, "{label}: {total} ({main} + F{fallout})")
            }
            Self::AptitudeApplied {
                aptitude,
                from,
                to,
                total_before,
                total_after,
            } => write!(
                f,
                "{aptitude} aptitude: {from} → {to} ({total_before} → {total_after})"
            ),
            Self::GenrePointSpent {
                behavior,
                remaining,
            } => write!(f, "Spent 1 GP for {} ({remaining} left)", behavior.label()),
            Self::TestResolved {
                total,
                fallout,
                success,
                genre_point,
            } => {
                let verdict = if *success { "Success" } else { "Fail" };
                write!(f, "Roll {total} (F{fallout}) - {verdict}")?;
                if let Some(behavior) = genre_point {
                    write!(f, " {}", behavior.tag())?;
                }
                Ok(())
            }
            Self::CardTrophied { card } => write!(f, "Added {card} to top of Trophy Pile"),
            Self::CardRequeued { card } => write!(f, "Moved {card} to bottom of Threat Deck"),
            Self::ReserveDealt { cards } => {
                let list = cards.iter().map(Card::to_string).collect::<Vec<_>>();
                write!(f, "Number Reserve → Threat Deck: [{}]", list.join(", "))
            }
            Self::FaceCardDrawn { card, preferred } => {
                if card.rank == preferred.rank() {
                    write!(f, "Drew {card} from {preferred} reserves")
                } else {
                    write!(f, "Drew {card} from reserves (fallback from {preferred})")
                }
            }
            Self::FaceReserveEmpty { preferred } => write!(
                f,
                "No {preferred} or higher face cards available in reserves"
            ),
            Self::StrikeGained { player, strikes } => {
                write!(f, "Player {} gains a strike ({strikes})", player + 1)
            }
            Self::SuitDefeated { suit, defeated } => {
                write!(f, "Defeated {suit} suit for the first time! ({defeated}/4)")
            }
            Self::EndgameStarted { threat_deck } => write!(
                f,
                "All four weaknesses found! Endgame: {threat_deck} face cards and jokers remain"
            ),
            Self::JokerTriggered { card } => {
                let name = if card.rank == crate::Rank::RedJoker {
                    "Red"
                } else {
                    "Black"
                };
                write!(f, "{name} Joker triggered!")
            }
            Self::RedJokerReturned => f.write_str("Character dies! Red Joker shuffled back."),
            Self::FaceCardBanished { card } => write!(f, "Removed {card} from game"),
            Self::BlackJokerDiscarded => f.write_str("Black Joker removed from game"),
            Self::TurnStatus {
                strikes,
                genre_points,
            } => {
                let list = strikes.iter().map(u32::to_string).collect::<Vec<_>>();
                write!(f, "Strikes: {} | GP: {genre_points}", list.join(", "))
            }
            Self::GameEnded {
                reason,
                rounds,
                tests,
            } => write!(f, "{reason} after {rounds} rounds and {tests} tests"),
        }
    }
}

/// Receiver for engine narration.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

impl<F: FnMut(&Event)> EventSink for F {
    fn emit(&mut self, event: Event) {
        self(&event);
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn events(&self) -> &[Event] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.queue
    }
}

impl EventSink for EventBus {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

/// Discards everything; used by batch runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: Event) {}
}

/// Forwards every event to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    level: log::Level,
}

impl LogSink {
    pub fn new(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(log::Level::Info)
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: Event) {
        log::log!(target: "thirteenth::events", self.level, "{event}");
    }
}
