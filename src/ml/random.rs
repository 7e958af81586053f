use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Where forecast noise and placeholder KPIs draw their randomness from.
///
/// `Entropy` uses the thread-local generator. `Seeded` shares one `StdRng`
/// across requests so a fixed seed replays the same sequence of responses.
#[derive(Debug)]
pub enum RandomSource {
    Entropy,
    Seeded(Mutex<StdRng>),
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::Entropy
    }
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(Mutex::new(StdRng::seed_from_u64(seed)))
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(Self::Entropy, Self::seeded)
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }

    pub fn with_rng<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        match self {
            Self::Entropy => f(&mut rand::thread_rng()),
            Self::Seeded(rng) => {
                let mut guard = rng.lock().unwrap_or_else(PoisonError::into_inner);
                f(&mut *guard)
            }
        }
    }
}
