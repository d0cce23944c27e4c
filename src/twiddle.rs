// src/twiddle.rs
//
// Twiddle-factor construction (§4.2). Builds the per-stage triples
// `(W_S^n, W_S^{2n}, W_S^{3n})` the radix-4 passes consume, and the
// single-factor tables the small-FFT core and the real-plan repack need.
//
// Exact twiddles at the four quadrant points (§4.1) are a correctness
// requirement, not an optimisation: a naive `sin/cos` evaluation at those
// angles is off by ~1e-8 in f32, which is enough to break the
// impulse-response property at large N (§9).

use crate::trig::FftFloat;
use num_complex::Complex;

/// `W_n^k = exp(-2*pi*i*k/n)`, exact at the four quadrant points.
///
/// `k` is reduced modulo `n` first, so callers may pass any non-negative
/// exponent (e.g. `2*n_quarter` without pre-reducing).
pub(crate) fn principal_root<T: FftFloat>(k: usize, n: usize) -> Complex<T> {
    debug_assert!(n > 0);
    let k = k % n;
    if n % 4 == 0 {
        let quarter = n / 4;
        if k == 0 {
            return Complex::new(T::one(), T::zero());
        } else if k == quarter {
            return Complex::new(T::zero(), -T::one());
        } else if k == 2 * quarter {
            return Complex::new(-T::one(), T::zero());
        } else if k == 3 * quarter {
            return Complex::new(T::zero(), T::one());
        }
    } else if k == 0 {
        return Complex::new(T::one(), T::zero());
    }
    let angle = -T::pi() * T::from_usize(2 * k) / T::from_usize(n);
    let (sin, cos) = FftFloat::sin_cos(angle);
    Complex::new(cos, sin)
}

/// Negates the imaginary part, turning a forward twiddle into its inverse
/// counterpart (§4.1: "For the inverse direction, the twiddle's imaginary
/// part is negated").
#[inline]
pub(crate) fn conj_for_inverse<T: FftFloat>(w: Complex<T>, inverse: bool) -> Complex<T> {
    if inverse {
        w.conj()
    } else {
        w
    }
}

/// Builds the `3*(stage_size/4)`-length twiddle table a generic radix-4
/// pass or final-stage leaf of size `stage_size` consumes, in the order
/// `(W^n, W^2n, W^3n)` per block (§4.2).
pub(crate) fn build_radix4_twiddles<T: FftFloat>(stage_size: usize, inverse: bool) -> alloc::vec::Vec<Complex<T>> {
    let quarter = stage_size / 4;
    let mut table = alloc::vec::Vec::with_capacity(quarter * 3);
    for n in 0..quarter {
        let w1 = conj_for_inverse(principal_root(n, stage_size), inverse);
        let w2 = conj_for_inverse(principal_root(2 * n, stage_size), inverse);
        let w3 = conj_for_inverse(principal_root(3 * n, stage_size), inverse);
        table.push(w1);
        table.push(w2);
        table.push(w3);
    }
    table
}

/// Builds the `n/2`-length twiddle table a plain radix-2 DIT core consumes
/// (the small-FFT leaf / specialization engine), mirroring the teacher's
/// `precompute_twiddles` generalized to `T`.
pub(crate) fn build_radix2_twiddles<T: FftFloat>(n: usize, inverse: bool) -> alloc::vec::Vec<Complex<T>> {
    let half = n / 2;
    let mut table = alloc::vec::Vec::with_capacity(half);
    for k in 0..half {
        table.push(conj_for_inverse(principal_root(k, n), inverse));
    }
    table
}

/// Builds `rtwiddle`, the real-plan's `n/4`-length repack table (§4.6):
/// `rtwiddle[i] = W_n^{i + n/4}` for `i` in `[0, n/4)`, direction-independent
/// — `to_fmt` uses it as-is, `from_fmt` conjugates it per entry instead of
/// building a second table.
pub(crate) fn build_real_twiddles<T: FftFloat>(n: usize) -> alloc::vec::Vec<Complex<T>> {
    let quarter = n / 4;
    let mut table = alloc::vec::Vec::with_capacity(quarter);
    for i in 0..quarter {
        table.push(principal_root(i + quarter, n));
    }
    table
}

#[cfg(test)]
#[path = "twiddle_tests.rs"]
mod tests;
