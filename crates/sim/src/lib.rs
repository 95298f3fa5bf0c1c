//! Seeded single runs and parallel batches over the core engine.

mod batch;
mod config;
mod error;
mod simulator;
mod summary;
mod trace;

pub use batch::*;
pub use config::*;
pub use error::*;
pub use simulator::*;
pub use summary::*;
pub use trace::*;
