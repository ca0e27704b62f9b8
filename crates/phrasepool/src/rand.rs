use ::rand::{Rng, SeedableRng, rng, rngs::StdRng};
use parking_lot::Mutex;

/// A trait for the random decisions phrase generation and issuance make.
///
/// This abstraction allows you to plug in the thread-local RNG, a seeded RNG,
/// or a scripted mock in tests.
///
/// # Example
/// ```
/// use phrasepool::RandSource;
///
/// struct AlwaysFirst;
/// impl RandSource for AlwaysFirst {
///     fn index(&self, _len: usize) -> usize {
///         0
///     }
///     fn chance(&self, _probability: f64) -> bool {
///         false
///     }
/// }
///
/// assert_eq!(AlwaysFirst.index(10), 0);
/// ```
pub trait RandSource {
    /// Returns a uniformly random index in `0..len`. `len` is never zero.
    fn index(&self, len: usize) -> usize;

    /// Returns `true` with the given probability.
    fn chance(&self, probability: f64) -> bool;
}

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This type does **not** store the RNG itself; it accesses the thread-local
/// generator on each call, so it may be freely shared across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn index(&self, len: usize) -> usize {
        rng().random_range(0..len)
    }

    fn chance(&self, probability: f64) -> bool {
        rng().random_bool(probability.clamp(0.0, 1.0))
    }
}

/// A deterministic `RandSource` backed by a seeded [`StdRng`].
///
/// Two instances created from the same seed make the same decisions in the
/// same order.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandSource for SeededRandom {
    fn index(&self, len: usize) -> usize {
        self.rng.lock().random_range(0..len)
    }

    fn chance(&self, probability: f64) -> bool {
        self.rng.lock().random_bool(probability.clamp(0.0, 1.0))
    }
}

impl<R: RandSource + ?Sized> RandSource for &R {
    fn index(&self, len: usize) -> usize {
        (**self).index(len)
    }

    fn chance(&self, probability: f64) -> bool {
        (**self).chance(probability)
    }
}
