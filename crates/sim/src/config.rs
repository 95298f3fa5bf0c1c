use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::thread;

pub const DEFAULT_SEED: u64 = 0xC0FFEE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub runs: u64,
    pub seed: u64,
    /// 0 picks one worker per available core.
    pub workers: usize,
    /// Progress is reported after every this many finished runs; 0 disables it.
    pub progress_every: u64,
}

impl BatchConfig {
    pub fn worker_count(&self) -> usize {
        let workers = if self.workers == 0 {
            thread::available_parallelism().map_or(1, NonZeroUsize::get)
        } else {
            self.workers
        };
        let runs = usize::try_from(self.runs).unwrap_or(usize::MAX);
        workers.min(runs).max(1)
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            runs: 100,
            seed: DEFAULT_SEED,
            workers: 0,
            progress_every: 10,
        }
    }
}
