//! Night of the Thirteenth rules engine. No IO beyond the `log` facade.

pub mod cards;
pub mod character;
pub mod config;
pub mod deck;
pub mod dice;
pub mod events;
pub mod game;
pub mod rng;
pub mod state;

pub use cards::*;
pub use character::*;
pub use config::*;
pub use deck::*;
pub use dice::*;
pub use events::*;
pub use game::*;
pub use rng::*;
pub use state::*;
