//! The packed GF(2) matrix/vector kernel.
//!
//! [`BitMat`] is an r×c dense binary matrix; [`BitVec`] is the `nrows == 1`
//! specialization used for MPC share values. Every operation dispatches
//! between a scalar fallback and, on x86_64 with the `simd` feature, SSE2/
//! AVX2 kernels, chosen purely from CPU capability and operand dimensions.

mod buffer;
mod scalar;

#[cfg(all(target_arch = "x86_64", feature = "simd"))]
mod simd;

use buffer::AlignedBuffer;

use crate::cpu::cpu_features;
use crate::error::KernelError;
use crate::rng::RandomSource;
use crate::word::{high_bitmask, words_for_bits, Word, AVX_BOUND_WORDS, WORD_BITS};

/// A dense r×c matrix over GF(2), stored as packed machine words.
#[derive(Clone)]
pub struct BitMat {
    nrows: usize,
    ncols: usize,
    width: usize,
    rowstride: usize,
    high_bitmask: Word,
    data: AlignedBuffer,
}

/// A single-row specialization of [`BitMat`], used for MPC share values and
/// view-tape slots.
pub type BitVec = BitMat;

impl BitMat {
    /// Allocates a zero-filled `nrows`×`ncols` matrix.
    ///
    /// # Panics
    /// Panics if `nrows == 0` or `ncols == 0` (an empty matrix has no
    /// meaningful layout; callers never construct one).
    pub fn init(nrows: usize, ncols: usize) -> Self {
        debug_assert!(nrows > 0 && ncols > 0);
        let width = words_for_bits(ncols);
        let rowstride = Self::row_stride(width);
        let align = Self::row_alignment(width);
        let data = AlignedBuffer::zeroed(nrows * rowstride, align);

        tracing::trace!(nrows, ncols, width, rowstride, "BitMat::init");

        BitMat {
            nrows,
            ncols,
            width,
            rowstride,
            high_bitmask: high_bitmask(ncols),
            data,
        }
    }

    /// Allocates a single-row vector of `ncols` bits.
    pub fn init_vector(ncols: usize) -> BitVec {
        Self::init(1, ncols)
    }

    fn row_stride(width: usize) -> usize {
        let align_words = if width >= AVX_BOUND_WORDS {
            crate::word::AVX_ALIGNMENT / std::mem::size_of::<Word>()
        } else {
            crate::word::SSE_ALIGNMENT / std::mem::size_of::<Word>()
        };
        width.div_ceil(align_words) * align_words
    }

    fn row_alignment(width: usize) -> usize {
        if width >= AVX_BOUND_WORDS {
            crate::word::AVX_ALIGNMENT
        } else {
            crate::word::SSE_ALIGNMENT
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[Word] {
        let start = i * self.rowstride;
        &self.data.as_slice()[start..start + self.width]
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [Word] {
        let start = i * self.rowstride;
        &mut self.data.as_mut_slice()[start..start + self.width]
    }

    /// Copies `src`'s contents into `self`, row by row. Both must have
    /// identical shape.
    pub fn copy_from(&mut self, src: &BitMat) {
        debug_assert_eq!(self.nrows, src.nrows);
        debug_assert_eq!(self.ncols, src.ncols);
        for i in 0..self.nrows {
            self.row_mut(i).copy_from_slice(src.row(i));
        }
    }

    /// `self = a ^ b`, element-wise, masking the last word of every row.
    pub fn xor(&mut self, a: &BitMat, b: &BitMat) {
        debug_assert_eq!(a.ncols, b.ncols);
        debug_assert_eq!(self.ncols, a.ncols);
        for i in 0..self.nrows {
            dispatch_binop(
                self.row_mut(i),
                a.row(i),
                b.row(i),
                self.ncols,
                self.high_bitmask,
                BinOp::Xor,
            );
        }
    }

    /// `self = a & b`, element-wise, masking the last word of every row.
    pub fn and(&mut self, a: &BitMat, b: &BitMat) {
        debug_assert_eq!(a.ncols, b.ncols);
        debug_assert_eq!(self.ncols, a.ncols);
        for i in 0..self.nrows {
            dispatch_binop(
                self.row_mut(i),
                a.row(i),
                b.row(i),
                self.ncols,
                self.high_bitmask,
                BinOp::And,
            );
        }
    }

    /// Logical right shift of a single-row vector's bitstream by `count`
    /// positions (`0 <= count < WORD_BITS`); `0` degenerates to a copy.
    pub fn shift_right(&mut self, v: &BitVec, count: u32) {
        debug_assert_eq!(self.nrows, 1);
        debug_assert_eq!(v.nrows, 1);
        debug_assert!(count < WORD_BITS);
        if count == 0 {
            self.copy_from(v);
            return;
        }
        scalar::shift_right(self.row_mut(0), v.row(0), count);
    }

    /// Mirror of [`Self::shift_right`].
    pub fn shift_left(&mut self, v: &BitVec, count: u32) {
        debug_assert_eq!(self.nrows, 1);
        debug_assert_eq!(v.nrows, 1);
        debug_assert!(count < WORD_BITS);
        if count == 0 {
            self.copy_from(v);
            return;
        }
        scalar::shift_left(self.row_mut(0), v.row(0), count);
    }

    /// `self = v . A`, replacing any prior contents.
    pub fn mul_v(&mut self, v: &BitVec, a: &BitMat) -> Result<(), KernelError> {
        for w in self.row_mut(0).iter_mut() {
            *w = 0;
        }
        self.addmul_v(v, a)
    }

    /// `self ^= v . A`.
    pub fn addmul_v(&mut self, v: &BitVec, a: &BitMat) -> Result<(), KernelError> {
        debug_assert_eq!(self.nrows, 1);
        debug_assert_eq!(v.nrows, 1);

        if a.nrows != v.ncols {
            return Err(KernelError::DimensionMismatch {
                vector_cols: v.ncols,
                matrix_rows: a.nrows,
            });
        }
        if a.ncols != self.ncols {
            return Err(KernelError::DestinationShapeMismatch {
                dest_cols: self.ncols,
                matrix_cols: a.ncols,
            });
        }

        let features = cpu_features();
        let word_aligned_rows = a.nrows % WORD_BITS as usize == 0;

        #[cfg(all(target_arch = "x86_64", feature = "simd"))]
        if word_aligned_rows && features.avx2 && a.ncols % 256 == 0 {
            tracing::trace!(ncols = a.ncols, "addmul_v: avx2");
            // SAFETY: checked is_x86_feature_detected via cpu_features, and
            // dimensions satisfy the dispatch preconditions.
            unsafe {
                simd::addmul_v_avx2(
                    self.row_mut(0),
                    v.row(0),
                    a.row(0).as_ptr(),
                    a.rowstride,
                );
            }
            return Ok(());
        } else if word_aligned_rows && features.sse2 && a.ncols % 128 == 0 {
            tracing::trace!(ncols = a.ncols, "addmul_v: sse2");
            // SAFETY: see above.
            unsafe {
                simd::addmul_v_sse2(
                    self.row_mut(0),
                    v.row(0),
                    a.row(0).as_ptr(),
                    a.rowstride,
                );
            }
            return Ok(());
        }
        let _ = features;

        tracing::trace!(ncols = a.ncols, "addmul_v: scalar");
        let rowstride = a.rowstride;
        let base = a.row(0).as_ptr();
        let width = self.width;
        // SAFETY: `a` has at least `v.ncols` rows, each `rowstride` words
        // long, laid out contiguously starting at `base`.
        let a_row = |i: usize| unsafe {
            std::slice::from_raw_parts(base.add(i * rowstride), width)
        };
        scalar::addmul_v(self.row_mut(0), v.row(0), a_row, self.high_bitmask);
        Ok(())
    }

    /// `self ^= other`, in place. Used by the MPC layer's small per-gate
    /// accumulations, where going through a fresh destination would just
    /// add an extra allocation for no benefit; the bulk linear-layer path
    /// uses [`Self::xor`] instead, which is the one that benefits from
    /// SIMD dispatch.
    pub fn xor_assign(&mut self, other: &BitMat) {
        debug_assert_eq!(self.ncols, other.ncols);
        let mask = self.high_bitmask;
        for i in 0..self.nrows {
            let row = self.row_mut(i);
            let orow = other.row(i);
            for w in 0..row.len() {
                row[w] ^= orow[w];
            }
            let last = row.len() - 1;
            row[last] &= mask;
        }
    }

    /// Structural bit equality (shape and contents).
    pub fn equal(&self, other: &BitMat) -> bool {
        if self.nrows != other.nrows || self.ncols != other.ncols {
            return false;
        }
        (0..self.nrows).all(|i| self.row(i) == other.row(i))
    }

    /// Fills `self` uniformly at random from `src`, masking the last word
    /// of every row.
    pub fn randomize(&mut self, src: &mut impl RandomSource) {
        for i in 0..self.nrows {
            let mask = self.high_bitmask;
            let width = self.width;
            let row = self.row_mut(i);
            let bytes = bytemuck::cast_slice_mut::<Word, u8>(row);
            src.fill_bytes(bytes);
            row_mut_mask(row, width, mask);
        }
    }
}

fn row_mut_mask(row: &mut [Word], width: usize, mask: Word) {
    row[width - 1] &= mask;
}

enum BinOp {
    Xor,
    And,
}

fn dispatch_binop(dst: &mut [Word], a: &[Word], b: &[Word], ncols: usize, mask: Word, op: BinOp) {
    let features = cpu_features();
    let word_aligned = ncols % WORD_BITS as usize == 0;

    #[cfg(all(target_arch = "x86_64", feature = "simd"))]
    {
        if word_aligned && ncols >= 256 && features.avx2 {
            tracing::trace!(ncols, "dispatch_binop: avx2");
            // SAFETY: dimensions and CPU support checked above.
            unsafe {
                match op {
                    BinOp::Xor => simd::xor_avx2(dst, a, b),
                    BinOp::And => simd::and_avx2(dst, a, b),
                }
            }
            return;
        } else if word_aligned && features.sse2 {
            tracing::trace!(ncols, "dispatch_binop: sse2");
            // SAFETY: dimensions and CPU support checked above.
            unsafe {
                match op {
                    BinOp::Xor => simd::xor_sse2(dst, a, b),
                    BinOp::And => simd::and_sse2(dst, a, b),
                }
            }
            return;
        }
    }
    let _ = (features, word_aligned);

    tracing::trace!(ncols, "dispatch_binop: scalar");

    match op {
        BinOp::Xor => scalar::xor(dst, a, b, mask),
        BinOp::And => scalar::and(dst, a, b, mask),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SystemRandom;

    #[test]
    fn init_is_zeroed_and_masked() {
        let m = BitMat::init(3, 5);
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.width(), 1);
        for i in 0..3 {
            assert_eq!(m.row(i), &[0u64]);
        }
        assert_eq!(m.high_bitmask, 0b11111);
    }

    #[test]
    fn identity_mul_v_is_identity() {
        let mut a = BitMat::init(64, 64);
        for i in 0..64 {
            a.row_mut(i)[0] = 1u64 << i;
        }
        let mut v = BitMat::init_vector(64);
        v.row_mut(0)[0] = 1;
        let mut c = BitMat::init_vector(64);
        c.mul_v(&v, &a).unwrap();
        assert_eq!(c.row(0), &[1u64]);

        v.row_mut(0)[0] = u64::MAX;
        c.mul_v(&v, &a).unwrap();
        assert_eq!(c.row(0), &[u64::MAX]);
    }

    #[test]
    fn mul_v_rejects_dimension_mismatch() {
        let a = BitMat::init(32, 64);
        let v = BitMat::init_vector(64);
        let mut c = BitMat::init_vector(64);
        assert!(c.mul_v(&v, &a).is_err());
    }

    #[test]
    fn randomize_masks_last_word() {
        let mut v = BitMat::init_vector(5);
        let mut rng = SystemRandom::new();
        v.randomize(&mut rng);
        assert_eq!(v.row(0)[0] & !0b11111, 0);
    }
}
