//! The per-batch view tape: the transcript of one party's broadcast
//! messages during a round of AND gates, committed to by the prover and
//! partially revealed to the verifier on challenge.

use crate::bitmat::BitVec;

/// Three vectors, one per simulated party, each accumulating AND-gate
/// broadcast bits at offsets determined by `viewshift`.
pub struct View {
    pub s: [BitVec; 3],
}

impl View {
    /// Allocates a zero-filled view tape wide enough for `bits` AND-gate
    /// outputs packed into it.
    pub fn init(bits: usize) -> Self {
        View {
            s: [
                BitVec::init_vector(bits),
                BitVec::init_vector(bits),
                BitVec::init_vector(bits),
            ],
        }
    }
}
