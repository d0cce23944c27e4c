// src/smallfft.rs
//
// Self-contained radix-2 DIT engine, generalized from the teacher's
// `radix_2_dit_fft_core` (`float/core.rs`) to any `FftFloat`. This is the
// one kernel every "opaque leaf" transform in the plan compiler is built
// on: the k = 1..=8 `Specialization` stage *is* one of these at size N, and
// the cascade's terminal `FinalStage` (size 512/1024) is one of these
// wrapped to satisfy the `Stage` contract (§4.3).
//
// Unlike the teacher's core, the inverse transform here does not rescale
// per butterfly stage: this crate follows the unnormalized-DFT convention
// used throughout the rest of the engine (forward and inverse are each
// other's conjugate-twiddle mirror; the caller divides by N when an
// actually-inverted signal is wanted, exactly as the round-trip property in
// §8 states explicitly: `inverse(forward(x))/N = x`).

use crate::trig::FftFloat;
use crate::twiddle::build_radix2_twiddles;
use alloc::vec::Vec;
use num_complex::Complex;

/// Standard bit-reversal permutation table, ported directly from the
/// teacher's `precompute_bitrev`.
pub(crate) fn bit_reversal_table(n: usize) -> Vec<usize> {
    let mut bitrev = alloc::vec![0usize; n];
    let mut j = 0usize;
    for i in 1..n {
        let mut k = n >> 1;
        while j >= k {
            j -= k;
            k >>= 1;
        }
        j += k;
        bitrev[i] = j;
    }
    bitrev
}

/// A complete, correctly-ordered radix-2 DIT FFT of a fixed size `n`, used
/// as the terminal kernel for both small-N specializations and the
/// cascade's final stage.
pub(crate) struct SmallFft<T> {
    n: usize,
    twiddles: Vec<Complex<T>>,
    bitrev: Vec<usize>,
}

impl<T: FftFloat> SmallFft<T> {
    pub(crate) fn new(n: usize, inverse: bool) -> Self {
        debug_assert!(n.is_power_of_two() && n >= 2);
        Self {
            n,
            twiddles: build_radix2_twiddles(n, inverse),
            bitrev: bit_reversal_table(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.n
    }

    /// Combined length of the twiddle and bit-reversal tables this kernel
    /// owns, reported up through `Stage::data_size` for `plan.data_size`
    /// diagnostics parity (§4.4).
    pub(crate) fn data_size(&self) -> usize {
        self.twiddles.len() + self.bitrev.len()
    }

    /// Transforms `buf` in place. `buf.len()` must equal `self.n`.
    pub(crate) fn execute(&self, buf: &mut [Complex<T>]) {
        debug_assert_eq!(buf.len(), self.n);

        for i in 0..self.n {
            let j = self.bitrev[i];
            if i < j {
                buf.swap(i, j);
            }
        }

        let mut stride = 1usize;
        while stride < self.n {
            let step = stride * 2;
            let tw_stride = self.n / step;
            let mut block_start = 0usize;
            while block_start < self.n {
                for i in 0..stride {
                    let w = self.twiddles[i * tw_stride];
                    let a = buf[block_start + i];
                    let b = buf[block_start + i + stride];
                    let t = b * w;
                    buf[block_start + i] = a + t;
                    buf[block_start + i + stride] = a - t;
                }
                block_start += step;
            }
            stride = step;
        }
    }
}

#[cfg(test)]
#[path = "smallfft_tests.rs"]
mod tests;
