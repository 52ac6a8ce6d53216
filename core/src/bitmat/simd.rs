//! SSE2/AVX2 kernels, selected at runtime by [`super::dispatch`].
//!
//! Callers guarantee the dimension preconditions documented on each
//! function (word-aligned row counts for `dst`/`a`/`b`); the column count
//! need not be a multiple of the lane width. `xor_sse2`/`and_sse2`/
//! `xor_avx2`/`and_avx2` vectorize the full-lane prefix and scalar-loop
//! whatever words are left over, mirroring `mzd_xor_sse`/`mzd_and_sse`/
//! `mzd_xor_avx`/`mzd_and_avx` in the C reference. None of these functions
//! mask a trailing partial word; the scalar fallback does that.

#![cfg(all(target_arch = "x86_64", feature = "simd"))]

use std::arch::x86_64::*;

use crate::word::{Word, WORD_BITS};

/// # Safety
/// Caller must have verified `is_x86_feature_detected!("sse2")`, and `dst`,
/// `a`, `b` must all have the same length.
#[target_feature(enable = "sse2")]
pub unsafe fn xor_sse2(dst: &mut [Word], a: &[Word], b: &[Word]) {
    let len = dst.len();
    let lanes = len / 2;
    let dptr = dst.as_mut_ptr() as *mut __m128i;
    let aptr = a.as_ptr() as *const __m128i;
    let bptr = b.as_ptr() as *const __m128i;
    for i in 0..lanes {
        let va = _mm_load_si128(aptr.add(i));
        let vb = _mm_load_si128(bptr.add(i));
        _mm_store_si128(dptr.add(i), _mm_xor_si128(va, vb));
    }
    for i in (lanes * 2)..len {
        dst[i] = a[i] ^ b[i];
    }
}

/// # Safety
/// Same preconditions as [`xor_sse2`].
#[target_feature(enable = "sse2")]
pub unsafe fn and_sse2(dst: &mut [Word], a: &[Word], b: &[Word]) {
    let len = dst.len();
    let lanes = len / 2;
    let dptr = dst.as_mut_ptr() as *mut __m128i;
    let aptr = a.as_ptr() as *const __m128i;
    let bptr = b.as_ptr() as *const __m128i;
    for i in 0..lanes {
        let va = _mm_load_si128(aptr.add(i));
        let vb = _mm_load_si128(bptr.add(i));
        _mm_store_si128(dptr.add(i), _mm_and_si128(va, vb));
    }
    for i in (lanes * 2)..len {
        dst[i] = a[i] & b[i];
    }
}

/// # Safety
/// Caller must have verified `is_x86_feature_detected!("avx2")`, and `dst`,
/// `a`, `b` must all have the same length.
#[target_feature(enable = "avx2")]
pub unsafe fn xor_avx2(dst: &mut [Word], a: &[Word], b: &[Word]) {
    let len = dst.len();
    let lanes = len / 4;
    let dptr = dst.as_mut_ptr() as *mut __m256i;
    let aptr = a.as_ptr() as *const __m256i;
    let bptr = b.as_ptr() as *const __m256i;
    for i in 0..lanes {
        let va = _mm256_load_si256(aptr.add(i));
        let vb = _mm256_load_si256(bptr.add(i));
        _mm256_store_si256(dptr.add(i), _mm256_xor_si256(va, vb));
    }
    for i in (lanes * 4)..len {
        dst[i] = a[i] ^ b[i];
    }
}

/// # Safety
/// Same preconditions as [`xor_avx2`].
#[target_feature(enable = "avx2")]
pub unsafe fn and_avx2(dst: &mut [Word], a: &[Word], b: &[Word]) {
    let len = dst.len();
    let lanes = len / 4;
    let dptr = dst.as_mut_ptr() as *mut __m256i;
    let aptr = a.as_ptr() as *const __m256i;
    let bptr = b.as_ptr() as *const __m256i;
    for i in 0..lanes {
        let va = _mm256_load_si256(aptr.add(i));
        let vb = _mm256_load_si256(bptr.add(i));
        _mm256_store_si256(dptr.add(i), _mm256_and_si256(va, vb));
    }
    for i in (lanes * 4)..len {
        dst[i] = a[i] & b[i];
    }
}

#[inline(always)]
unsafe fn xor_region_128(dst: *mut __m128i, src: *const __m128i, lanes: usize) {
    for i in 0..lanes {
        let d = _mm_load_si128(dst.add(i));
        let s = _mm_load_si128(src.add(i));
        _mm_store_si128(dst.add(i), _mm_xor_si128(d, s));
    }
}

#[inline(always)]
unsafe fn xor_region_256(dst: *mut __m256i, src: *const __m256i, lanes: usize) {
    for i in 0..lanes {
        let d = _mm256_load_si256(dst.add(i));
        let s = _mm256_load_si256(src.add(i));
        _mm256_store_si256(dst.add(i), _mm256_xor_si256(d, s));
    }
}

/// Nibble-dispatch `c ^= v . A`, 128-bit lanes.
///
/// # Safety
/// `is_x86_feature_detected!("sse2")` must hold. `c` has `width` words (a
/// multiple of 2); `a_base` points at the first of `v.len() * WORD_BITS`
/// rows of `A`, each `rowstride` words apart; `rowstride >= width`.
#[target_feature(enable = "sse2")]
pub unsafe fn addmul_v_sse2(
    c: &mut [Word],
    v: &[Word],
    a_base: *const Word,
    rowstride: usize,
) {
    use super::scalar::NIBBLE_ROWS;

    let lanes = c.len() / 2;
    let cptr = c.as_mut_ptr() as *mut __m128i;
    let mrowstride = rowstride / 2;

    for (w, &vw) in v.iter().enumerate() {
        let mut idx = vw;
        let mut a_ptr = a_base.add(w * WORD_BITS as usize * rowstride) as *const __m128i;
        let group_stride = 4 * mrowstride;
        for _ in 0..16 {
            if idx == 0 {
                break;
            }
            let nibble = (idx & 0x0F) as usize;
            for &row in &NIBBLE_ROWS[nibble] {
                if row == 4 {
                    break;
                }
                xor_region_128(cptr, a_ptr.add(row as usize * mrowstride), lanes);
            }
            a_ptr = a_ptr.add(group_stride);
            idx >>= 4;
        }
    }
}

/// Nibble-dispatch `c ^= v . A`, 256-bit lanes.
///
/// # Safety
/// Same preconditions as [`addmul_v_sse2`], with `is_x86_feature_detected!("avx2")`
/// and `width`/`rowstride` multiples of 4.
#[target_feature(enable = "avx2")]
pub unsafe fn addmul_v_avx2(
    c: &mut [Word],
    v: &[Word],
    a_base: *const Word,
    rowstride: usize,
) {
    use super::scalar::NIBBLE_ROWS;

    let lanes = c.len() / 4;
    let cptr = c.as_mut_ptr() as *mut __m256i;
    let mrowstride = rowstride / 4;

    for (w, &vw) in v.iter().enumerate() {
        let mut idx = vw;
        let mut a_ptr = a_base.add(w * WORD_BITS as usize * rowstride) as *const __m256i;
        let group_stride = 4 * mrowstride;
        for _ in 0..16 {
            if idx == 0 {
                break;
            }
            let nibble = (idx & 0x0F) as usize;
            for &row in &NIBBLE_ROWS[nibble] {
                if row == 4 {
                    break;
                }
                xor_region_256(cptr, a_ptr.add(row as usize * mrowstride), lanes);
            }
            a_ptr = a_ptr.add(group_stride);
            idx >>= 4;
        }
    }
}
