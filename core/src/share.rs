//! The three-party additive share layer: triples of vectors whose XOR is
//! the secret value, plus the linear operations that propagate through the
//! MPC-in-the-head simulation.

use crate::bitmat::{BitMat, BitVec};
use crate::rng::RandomSource;

/// Number of simulated parties in the prover's full MPC-in-the-head run.
pub const SC_PROOF: usize = 3;

/// A length-3 share of a secret vector: logically `s0 ^ s1 ^ s2`.
pub struct ShareTriple {
    pub s: [BitVec; 3],
}

impl ShareTriple {
    /// Three zero vectors of length `n`.
    pub fn share_empty(n: usize) -> Self {
        ShareTriple {
            s: [
                BitVec::init_vector(n),
                BitVec::init_vector(n),
                BitVec::init_vector(n),
            ],
        }
    }

    /// Three vectors filled independently from `rng`.
    pub fn share_random(n: usize, rng: &mut impl RandomSource) -> Self {
        let mut triple = Self::share_empty(n);
        for s in &mut triple.s {
            s.randomize(rng);
        }
        triple
    }

    /// Three copies of a publicly known vector.
    pub fn share_plain(v: &BitVec) -> Self {
        let mut triple = Self::share_empty(v.ncols());
        for s in &mut triple.s {
            s.copy_from(v);
        }
        triple
    }

    /// `s0, s1` random, `s2 = s0 ^ s1 ^ v`; reconstructs to exactly `v`.
    pub fn share_secret(v: &BitVec, rng: &mut impl RandomSource) -> Self {
        let mut triple = Self::share_empty(v.ncols());
        triple.s[0].randomize(rng);
        triple.s[1].randomize(rng);
        let (s01, s2) = triple.s.split_at_mut(2);
        s2[0].xor(&s01[0], &s01[1]);
        s2[0].xor_assign(v);
        triple
    }

    /// `s0 ^ s1 ^ s2`.
    pub fn reconstruct(&self) -> BitVec {
        let mut dst = BitVec::init_vector(self.s[0].ncols());
        dst.xor(&self.s[0], &self.s[1]);
        dst.xor_assign(&self.s[2]);
        dst
    }
}

/// `r = a ^ b`, element-wise over the three slots. `r` must not alias `a`
/// or `b`.
pub fn share_xor(r: &mut ShareTriple, a: &ShareTriple, b: &ShareTriple) {
    for m in 0..3 {
        r.s[m].xor(&a.s[m], &b.s[m]);
    }
}

/// XORs the public constant `k` into `r.s[slot]`, copying `a` into the
/// other slots first. `r` must not alias `a`.
///
/// Only `slot == 0` and `slot == SC_PROOF` have effect — matching the
/// reference's `mpc_const_add`, which treats any other `c` as a silent
/// no-op. Every real call site only ever passes one of these two, so the
/// behaviour is preserved rather than tightened into a panic.
pub fn share_const_xor(r: &mut ShareTriple, a: &ShareTriple, k: &BitVec, slot: usize) {
    for m in 0..3 {
        r.s[m].copy_from(&a.s[m]);
    }
    if slot == 0 {
        r.s[0].xor_assign(k);
    } else if slot == SC_PROOF {
        r.s[2].xor_assign(k);
    }
}

/// `r.s[i] = matrix . shared.s[i]` for each of the three slots.
pub fn share_const_matmul(r: &mut ShareTriple, matrix: &BitMat, shared: &ShareTriple) {
    for m in 0..3 {
        r.s[m].mul_v(&shared.s[m], matrix).expect(
            "share_const_matmul: matrix row count must equal share vector width",
        );
    }
}
