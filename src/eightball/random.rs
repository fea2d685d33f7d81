use std::sync::{Mutex, PoisonError};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A source of randomness for the eight-ball.
///
/// The server shares a single instance across every request, so implementations must be safe to
/// draw from concurrently.
pub trait EightballRandom: Send + Sync {
    /// Returns a uniformly chosen index in `0..upper`.
    fn next_index(&self, upper: usize) -> usize;

    /// Returns a uniformly chosen value in `[0, 1)`.
    fn next_unit(&self) -> f64;
}

/// An `EightballRandom` backed by an entropy seeded `StdRng`.
///
/// Draws are serialized behind a mutex since `StdRng` needs exclusive access to advance.
#[derive(Debug)]
pub struct ThreadSafeRandom {
    rng: Mutex<StdRng>,
}

impl ThreadSafeRandom {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    fn with_rng<T>(&self, draw: impl FnOnce(&mut StdRng) -> T) -> T {
        // NB: A panic while holding the lock cannot leave the rng in a bad state.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw(&mut rng)
    }
}

impl EightballRandom for ThreadSafeRandom {
    fn next_index(&self, upper: usize) -> usize {
        self.with_rng(|rng| rng.gen_range(0..upper))
    }

    fn next_unit(&self) -> f64 {
        self.with_rng(|rng| rng.gen::<f64>())
    }
}
