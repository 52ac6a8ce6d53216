//! The nonlinear MPC-in-the-head AND gate, prover and verifier flavors.
//!
//! Both consume three (prover) or two (verifier) live parties' shares of the
//! gate's inputs plus a random mask triple, and mutate a [`View`] tape with
//! the broadcast bits a real three-party protocol run would have produced.

use crate::bitmat::BitVec;
use crate::share::{ShareTriple, SC_PROOF};
use crate::view::View;

/// Number of live parties the verifier simulates directly; the third is
/// reconstructed from the committed view.
pub const SC_VERIFY: usize = 2;

fn and_xor_combination(am: &BitVec, bm: &BitVec, aj: &BitVec, bj: &BitVec, rm: &BitVec, rj: &BitVec) -> BitVec {
    let ncols = am.ncols();
    let mut acc = BitVec::init_vector(ncols);
    acc.and(am, bm);

    let mut term = BitVec::init_vector(ncols);
    term.and(aj, bm);
    acc.xor_assign(&term);

    term.and(am, bj);
    acc.xor_assign(&term);

    acc.xor_assign(rm);
    acc.xor_assign(rj);
    acc
}

/// The prover-side AND gate (`SC_PROOF = 3` simulated parties). Computes,
/// for each party `m`, `res[m] = (a[m]∧b[m]) ⊕ (a[j]∧b[m]) ⊕ (a[m]∧b[j]) ⊕
/// r[m] ⊕ r[j]` with `j = (m+1) mod 3`, shifts each party's result right by
/// `viewshift`, and XORs the shifted bits into `view.s[m]`.
pub fn mpc_and(
    res: &mut ShareTriple,
    a: &ShareTriple,
    b: &ShareTriple,
    r: &ShareTriple,
    view: &mut View,
    viewshift: u32,
) {
    let ncols = a.s[0].ncols();
    tracing::trace!(ncols, viewshift, gates = SC_PROOF, "mpc_and");
    for m in 0..SC_PROOF {
        let j = (m + 1) % SC_PROOF;
        let computed = and_xor_combination(&a.s[m], &b.s[m], &a.s[j], &b.s[j], &r.s[m], &r.s[j]);
        res.s[m].copy_from(&computed);

        let mut shifted = BitVec::init_vector(ncols);
        shifted.shift_right(&computed, viewshift);
        view.s[m].xor_assign(&shifted);
    }
}

/// The verifier-side AND gate (`SC_VERIFY = 2` live parties). For `m = 0`
/// (no modular wrap, `j = m + 1`), computes the same combination and folds
/// the shifted result into `view.s[0]` so that a later comparison against
/// the prover's committed view can detect cheating. For party
/// `SC_VERIFY - 1`, the result is *read back* from the committed view tape
/// of party 1 instead of computed: `view.s[1]` shifted left by `viewshift`
/// and masked, restricting to the bit positions of the current S-box batch.
///
/// Never short-circuits on a mismatch — detection is the outer verifier's
/// job, comparing reconstructed and committed views after the fact.
pub fn mpc_and_verify(
    res: &mut ShareTriple,
    a: &ShareTriple,
    b: &ShareTriple,
    r: &ShareTriple,
    view: &mut View,
    mask: &BitVec,
    viewshift: u32,
) {
    let ncols = a.s[0].ncols();
    tracing::trace!(ncols, viewshift, gates = SC_VERIFY, "mpc_and_verify");

    for m in 0..SC_VERIFY - 1 {
        let j = m + 1;
        let computed = and_xor_combination(&a.s[m], &b.s[m], &a.s[j], &b.s[j], &r.s[m], &r.s[j]);
        res.s[m].copy_from(&computed);
    }

    for m in 0..SC_VERIFY - 1 {
        let mut shifted = BitVec::init_vector(ncols);
        shifted.shift_right(&res.s[m], viewshift);
        view.s[m].xor_assign(&shifted);
    }

    let last = SC_VERIFY - 1;
    let mut shifted_left = BitVec::init_vector(ncols);
    shifted_left.shift_left(&view.s[last], viewshift);
    let unmasked = shifted_left.clone();
    res.s[last].and(&unmasked, mask);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededPrng;

    fn bit_vector_one(bits: usize) -> BitVec {
        let mut v = BitVec::init_vector(bits);
        v.row_mut(0)[0] = 1;
        v
    }

    #[test]
    fn and_gate_of_ones_is_one() {
        let a = ShareTriple::share_plain(&bit_vector_one(1));
        let b = ShareTriple::share_plain(&bit_vector_one(1));
        let r = ShareTriple::share_empty(1);
        let mut view = View::init(1);
        let mut res = ShareTriple::share_empty(1);

        mpc_and(&mut res, &a, &b, &r, &mut view, 0);

        let one = bit_vector_one(1);
        for m in 0..SC_PROOF {
            assert!(res.s[m].equal(&one));
        }
        for m in 0..SC_PROOF {
            assert!(view.s[m].equal(&one));
        }
    }

    #[test]
    fn and_gate_reconstructs_to_logical_and() {
        let mut rng = SeededPrng::new([9u8; 16]);
        let bits = 64;

        let mut x = BitVec::init_vector(bits);
        x.randomize(&mut rng);
        let mut y = BitVec::init_vector(bits);
        y.randomize(&mut rng);

        let a = ShareTriple::share_secret(&x, &mut rng);
        let b = ShareTriple::share_secret(&y, &mut rng);
        let r = ShareTriple::share_empty(bits);

        let mut view = View::init(bits);
        let mut res = ShareTriple::share_empty(bits);
        mpc_and(&mut res, &a, &b, &r, &mut view, 0);

        let mut expected = BitVec::init_vector(bits);
        expected.and(&x, &y);
        assert!(res.reconstruct().equal(&expected));
    }

    #[test]
    fn verifier_agrees_with_prover_on_live_parties() {
        let mut rng = SeededPrng::new([11u8; 16]);
        let bits = 64;

        let mut x = BitVec::init_vector(bits);
        x.randomize(&mut rng);
        let mut y = BitVec::init_vector(bits);
        y.randomize(&mut rng);

        let a = ShareTriple::share_secret(&x, &mut rng);
        let b = ShareTriple::share_secret(&y, &mut rng);
        let r = ShareTriple::share_empty(bits);

        let mut prover_view = View::init(bits);
        let mut prover_res = ShareTriple::share_empty(bits);
        mpc_and(&mut prover_res, &a, &b, &r, &mut prover_view, 0);

        let mut verify_view = View::init(bits);
        verify_view.s[1].copy_from(&prover_view.s[1]);
        let mut mask = BitVec::init_vector(bits);
        for w in mask.row_mut(0).iter_mut() {
            *w = u64::MAX;
        }

        let mut verifier_res = ShareTriple::share_empty(bits);
        mpc_and_verify(
            &mut verifier_res,
            &a,
            &b,
            &r,
            &mut verify_view,
            &mask,
            0,
        );

        assert!(verifier_res.s[0].equal(&prover_res.s[0]));
        assert!(verifier_res.s[1].equal(&prover_res.s[1]));
    }
}
