use crate::{BatchConfig, BatchSummary, SimError};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use thirteenth_core::{Game, GameConfig, GameResult, NullSink};

/// Shared stop flag, checked between whole runs.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
    pub wins: u64,
    pub win_rate: f64,
    pub avg_rounds: f64,
    pub avg_tests: f64,
}

impl Progress {
    fn of(summary: &BatchSummary, total: u64) -> Self {
        Self {
            completed: summary.runs,
            total,
            wins: summary.wins,
            win_rate: summary.win_rate(),
            avg_rounds: summary.avg_rounds(),
            avg_tests: summary.avg_tests(),
        }
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Seed of run `index` within a batch (splitmix64 over the batch seed).
pub fn derive_seed(batch_seed: u64, index: u64) -> u64 {
    let mut z = batch_seed.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

pub fn run_game(config: &GameConfig, batch_seed: u64, index: u64) -> GameResult {
    Game::seeded(config.clone(), derive_seed(batch_seed, index)).run(&mut NullSink)
}

/// Plays `batch.runs` games over scoped worker threads. Each game's seed
/// depends only on its index, so the summary does not depend on the
/// worker count.
pub fn run_batch<F>(
    config: &GameConfig,
    batch: &BatchConfig,
    cancel: &CancelToken,
    mut progress: F,
) -> Result<BatchSummary, SimError>
where
    F: FnMut(&Progress),
{
    config.validate()?;
    let workers = batch.worker_count();
    log::debug!(
        "batch of {} runs on {workers} workers, seed {:#x}",
        batch.runs,
        batch.seed
    );

    let next = AtomicU64::new(0);
    let mut summary = BatchSummary::default();
    thread::scope(|scope| -> Result<(), SimError> {
        let (tx, rx) = mpsc::channel::<GameResult>();
        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            handles.push(scope.spawn(move || {
                while !cancel.is_cancelled() {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    if index >= batch.runs {
                        break;
                    }
                    if tx.send(run_game(config, batch.seed, index)).is_err() {
                        break;
                    }
                }
            }));
        }
        drop(tx);

        for result in rx {
            summary.record(&result);
            if batch.progress_every > 0 && summary.runs % batch.progress_every == 0 {
                progress(&Progress::of(&summary, batch.runs));
            }
        }
        for handle in handles {
            handle
                .join()
                .map_err(|_| SimError::Worker("simulation worker panicked".to_string()))?;
        }
        Ok(())
    })?;

    summary.cancelled = summary.runs < batch.runs;
    if batch.progress_every > 0 && summary.runs % batch.progress_every != 0 {
        progress(&Progress::of(&summary, batch.runs));
    }
    log::debug!("batch finished: {}", summary.headline());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_seeds_differ_per_index_and_batch() {
        let a = derive_seed(1, 0);
        assert_ne!(a, derive_seed(1, 1));
        assert_ne!(a, derive_seed(2, 0));
        assert_eq!(a, derive_seed(1, 0));
    }

    #[test]
    fn token_clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn empty_batch_progress_is_complete() {
        let progress = Progress::of(&BatchSummary::default(), 0);
        assert_eq!(progress.percent(), 100.0);
    }
}
