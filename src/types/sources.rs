use chrono::{DateTime, Local};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Injectable randomness. Production uses an entropy-seeded ChaCha stream,
/// tests substitute a seeded stream or `rand::rngs::mock::StepRng`.
pub type BoxedRng = Box<dyn RngCore + Send>;

pub fn rng_from_seed(seed: Option<u64>) -> BoxedRng {
    match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(ChaCha8Rng::from_entropy()),
    }
}

/// Wall-clock source for the narrative models.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
