//! Process-wide CPU feature cache.
//!
//! The dispatch decision in [`crate::bitmat`] is a pure function of build
//! flags, this cache, and operand dimensions — never of data values — so
//! that behaviour stays deterministic across runs on the same machine. The
//! cache is populated lazily on first use and never changes afterwards,
//! which is what makes read access thread-safe without any locking.

use std::sync::OnceLock;

/// Snapshot of the SIMD instruction sets available on the current CPU.
#[derive(Debug, Clone, Copy)]
pub struct CpuFeatures {
    pub sse2: bool,
    pub sse41: bool,
    pub avx2: bool,
}

impl CpuFeatures {
    fn detect() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(all(target_arch = "x86_64", feature = "simd"))] {
                CpuFeatures {
                    sse2: is_x86_feature_detected!("sse2"),
                    sse41: is_x86_feature_detected!("sse4.1"),
                    avx2: is_x86_feature_detected!("avx2"),
                }
            } else {
                CpuFeatures {
                    sse2: false,
                    sse41: false,
                    avx2: false,
                }
            }
        }
    }
}

static FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Returns the immutable, process-wide CPU feature record, probing the CPU
/// on the first call.
#[inline]
pub fn cpu_features() -> CpuFeatures {
    *FEATURES.get_or_init(CpuFeatures::detect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_is_stable_across_calls() {
        let a = cpu_features();
        let b = cpu_features();
        assert_eq!(a.sse2, b.sse2);
        assert_eq!(a.avx2, b.avx2);
    }
}
