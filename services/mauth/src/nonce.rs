use std::fmt::{Debug, Formatter};
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::NONCE_BOUND;

/// GenerateNonce produces the `mauth_cnonce` value for each request.
///
/// Every signer owns its generator, so tests can inject a deterministic one
/// and concurrent clients never share random state.
pub trait GenerateNonce: Debug + Send + Sync + 'static {
    /// Draw a nonce in `0..99999`.
    fn generate_nonce(&self) -> u32;
}

/// RandomNonce draws nonces from a per-instance `StdRng`.
pub struct RandomNonce {
    rng: Mutex<StdRng>,
}

impl RandomNonce {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for RandomNonce {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomNonce").finish_non_exhaustive()
    }
}

impl GenerateNonce for RandomNonce {
    fn generate_nonce(&self) -> u32 {
        // A panic while holding the lock cannot leave the rng half-updated.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..NONCE_BOUND)
    }
}
