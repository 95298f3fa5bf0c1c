use crate::RandomSource;
use serde::{Deserialize, Serialize};

/// One d13 roll: a main die (0-9) and a fallout die (1-4).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Roll {
    pub main: i32,
    pub fallout: i32,
}

impl Roll {
    pub fn total(&self) -> i32 {
        self.main + self.fallout
    }
}

pub fn roll_d13<R: RandomSource + ?Sized>(rng: &mut R) -> Roll {
    let main = rng.below(10) as i32;
    let fallout = rng.below(4) as i32 + 1;
    Roll { main, fallout }
}
