use super::*;
use crate::{Event, Pile, TrophyPileInitial};

impl<R: RandomSource> Game<R> {
    /// Builds the piles from the canonical set. The threat pool is shuffled
    /// once; aces stay on top in suit order.
    pub fn with_events(config: GameConfig, mut rng: R, events: &mut dyn EventSink) -> Self {
        let (aces, others): (Vec<Card>, Vec<Card>) =
            Card::full_set().into_iter().partition(Card::is_ace);

        let mut pool_cards: Vec<Card> = others
            .iter()
            .filter(|card| {
                card.rank
                    .value()
                    .is_some_and(|value| config.includes_pool_rank(value))
            })
            .copied()
            .collect();
        let initial_face = if config.include_initial_face_card {
            others
                .iter()
                .find(|card| card.rank == config.initial_face_card_type.rank())
                .copied()
        } else {
            None
        };
        pool_cards.extend(initial_face);

        let mut pool = Deck::from_cards(pool_cards.iter().copied());
        pool.shuffle(&mut rng);
        events.emit(Event::Shuffled {
            pile: Pile::ThreatPool,
            size: pool.len(),
        });

        let mut threat_deck = Deck::new();
        let mut out_of_play = Deck::new();
        if config.include_aces {
            threat_deck.extend(aces);
        } else {
            out_of_play.extend(aces);
        }
        threat_deck.extend(pool.iter().copied());

        let unplaced = |card: &&Card| !pool_cards.contains(card);
        let mut reserves = Reserves {
            number: Deck::from_cards(others.iter().filter(|c| c.is_number()).filter(unplaced).copied()),
            jokers: Deck::from_cards(others.iter().filter(|c| c.is_joker()).copied()),
            ..Reserves::default()
        };
        for face in crate::FaceRank::ALL {
            reserves.face_mut(face).extend(
                others
                    .iter()
                    .filter(|card| card.rank == face.rank())
                    .filter(unplaced)
                    .copied(),
            );
        }

        let seed_card = match config.trophy_pile_initial {
            TrophyPileInitial::Top => reserves.number.draw(),
            TrophyPileInitial::Bottom => reserves.number.draw_bottom(),
            TrophyPileInitial::None => None,
        };
        let trophy_pile = Deck::from_cards(seed_card);

        Self {
            strikes: vec![0; config.num_players],
            genre_points: config.genre_points,
            characters: Character::roster(),
            threat_deck,
            trophy_pile,
            reserves,
            out_of_play,
            defeated_suits: BTreeSet::new(),
            in_endgame: false,
            game_over: false,
            victory: false,
            rounds: 0,
            tests: 0,
            end_reason: None,
            config,
            rng,
        }
    }
}
