//! Randomness sources consumed by [`crate::bitmat::BitMat::randomize`] and
//! the share constructors in [`crate::share`].
//!
//! The reference implementation randomizes vectors from two interchangeable
//! sources — the OS CSPRNG (`mzd_randomize_ssl`) and a seeded AES-CTR stream
//! (`mzd_randomize_aes_prng`) — behind the same call sites. [`RandomSource`]
//! is the seam that lets this crate do the same without the kernel caring
//! which concrete source it got.

use aes::cipher::{KeyIvInit, StreamCipher};
use aes::Aes128;
use ctr::Ctr128BE;
use rand::rngs::OsRng;
use rand_core::RngCore;

/// A source of uniformly random bytes.
pub trait RandomSource {
    fn fill_bytes(&mut self, buf: &mut [u8]);
}

/// The OS-backed cryptographically secure RNG.
#[derive(Debug, Default)]
pub struct SystemRandom {
    inner: OsRng,
}

impl SystemRandom {
    pub fn new() -> Self {
        SystemRandom { inner: OsRng }
    }
}

impl RandomSource for SystemRandom {
    fn fill_bytes(&mut self, buf: &mut [u8]) {
        self.inner.fill_bytes(buf);
    }
}

type Aes128Ctr = Ctr128BE<Aes128>;

/// A deterministic AES-128-CTR stream, keyed by a 128-bit seed.
///
/// Used wherever the prover or verifier need replayable randomness, e.g.
/// tape randomness reconstructed from a committed seed.
pub struct SeededPrng {
    cipher: Aes128Ctr,
}

impl SeededPrng {
    /// `seed` is the 128-bit AES key; the counter starts at zero.
    pub fn new(seed: [u8; 16]) -> Self {
        let cipher = Aes128Ctr::new(&seed.into(), &[0u8; 16].into());
        SeededPrng { cipher }
    }
}

impl RandomSource for SeededPrng {
    fn fill_bytes(&mut self, buf: &mut [u8]) {
        buf.fill(0);
        self.cipher.apply_keystream(buf);
    }
}
