//! Seeds and portable random streams.
//!
//! Every match runs on a `ChaCha20Rng` so a seed replays identically on any
//! platform. Seeds come from a plain `u64`, from external entropy bytes (a
//! block hash, say), or are derived per match from a base seed for batch runs.

use hmac::{Hmac, Mac};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

pub type MatchRng = ChaCha20Rng;

type HmacSha256 = Hmac<Sha256>;

#[must_use]
pub fn rng_from_seed(seed: u64) -> MatchRng {
    MatchRng::seed_from_u64(seed)
}

/// SHA-256 of `entropy`, first eight bytes read big-endian.
#[must_use]
pub fn seed_from_entropy(entropy: &[u8]) -> u64 {
    let digest = Sha256::digest(entropy);
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// Independent per-match seed for the `index`-th match of a batch.
#[must_use]
pub fn derive_match_seed(base: u64, index: u64) -> u64 {
    let Ok(mut mac) = HmacSha256::new_from_slice(&base.to_le_bytes()) else {
        // HMAC takes keys of any length.
        return base ^ index;
    };
    mac.update(b"oink-match");
    mac.update(&index.to_le_bytes());
    let digest = mac.finalize().into_bytes();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Wraps a generator and counts draw calls, for replay audits.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<MatchRng> {
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(rng_from_seed(seed))
    }
}

impl<R: RngCore> CountingRng<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    #[must_use]
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}
