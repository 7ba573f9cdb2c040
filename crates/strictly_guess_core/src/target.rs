//! Target selection.
//!
//! A round draws its hidden number from a [`TargetSource`]. Production code
//! uses [`ThreadRngTargets`]; reproducible sessions use [`SeededTargets`];
//! tests script the sequence with [`FixedTargets`].

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, warn};

use crate::{GUESS_MAX, GUESS_MIN, Guess};

/// Produces a target uniformly from `[GUESS_MIN, GUESS_MAX]`.
pub trait TargetSource {
    /// Draws the next target.
    fn next_target(&mut self) -> Guess;
}

/// Draws a uniform value from `rng` and wraps it.
fn draw<R: Rng + ?Sized>(rng: &mut R) -> Guess {
    let value: u8 = rng.random_range(GUESS_MIN..=GUESS_MAX);
    // In range by construction.
    Guess::new(i64::from(value)).unwrap_or(Guess::MIDPOINT)
}

/// Uses the thread-local OS-seeded generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngTargets;

impl TargetSource for ThreadRngTargets {
    #[instrument(skip(self))]
    fn next_target(&mut self) -> Guess {
        draw(&mut rand::rng())
    }
}

/// Deterministic targets from a ChaCha8 stream.
///
/// The same seed always produces the same sequence of targets.
#[derive(Debug, Clone)]
pub struct SeededTargets {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededTargets {
    /// Creates a source seeded with `seed`.
    #[instrument]
    pub fn new(seed: u64) -> Self {
        debug!(seed, "Seeding target source");
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl TargetSource for SeededTargets {
    #[instrument(skip(self), fields(seed = self.seed))]
    fn next_target(&mut self) -> Guess {
        draw(&mut self.rng)
    }
}

/// Scripted targets, returned in order.
///
/// When the script runs out the last target repeats; an empty script yields
/// [`Guess::MIDPOINT`].
#[derive(Debug, Clone, Default)]
pub struct FixedTargets {
    queue: VecDeque<Guess>,
    last: Option<Guess>,
}

impl FixedTargets {
    /// Builds a script from raw values. Out-of-range values are skipped.
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        let queue = values
            .into_iter()
            .filter_map(|v| match Guess::new(v) {
                Ok(guess) => Some(guess),
                Err(e) => {
                    warn!(value = v, error = %e, "Skipping out-of-range scripted target");
                    None
                }
            })
            .collect();
        Self { queue, last: None }
    }
}

impl TargetSource for FixedTargets {
    fn next_target(&mut self) -> Guess {
        if let Some(next) = self.queue.pop_front() {
            self.last = Some(next);
        }
        self.last.unwrap_or(Guess::MIDPOINT)
    }
}

impl<T: TargetSource + ?Sized> TargetSource for Box<T> {
    fn next_target(&mut self) -> Guess {
        (**self).next_target()
    }
}
