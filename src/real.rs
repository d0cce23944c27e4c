// src/real.rs
//
// The real-input wrapper (§4.6): a complex `Plan<T>` of size N/2 plus a
// post-processing repack step that splits the N/2 interleaved complex bins
// the complex plan produces into the N/2 (Perm) or N/2+1 (CCs) unique real
// spectrum bins. Formula taken index-by-index from the original source's
// `to_fmt`/`from_fmt` (see SPEC_FULL.md §4.6); `to_fmt`/`from_fmt` are built
// here as exact mutual inverses rather than copying the original's literal
// scaling constants, which are tied to a normalization convention this
// crate's `Plan` does not use (see DESIGN.md).

use crate::common::{Direction, FftError, PackFormat};
use crate::plan::Plan;
use crate::trig::FftFloat;
use crate::twiddle::build_real_twiddles;
use alloc::vec::Vec;
use num_complex::Complex;

/// A compiled real-input transform of fixed even size `n`.
///
/// Internally a complex plan of size `n/2` plus the `rtwiddle` repack
/// table; construction validates `n` the same way `Plan::new` does, with
/// the added constraint that `n` must be even.
pub struct RealPlan<T> {
    n: usize,
    complex_size: usize,
    rtwiddle: Vec<Complex<T>>,
    forward: Option<Plan<T>>,
    inverse: Option<Plan<T>>,
}

impl<T: FftFloat> RealPlan<T> {
    pub fn new(n: usize, direction: Direction) -> Result<Self, FftError> {
        if n % 2 != 0 {
            return Err(FftError::NotPowerOfTwo);
        }
        let complex_size = n / 2;

        let forward = direction
            .wants_forward()
            .then(|| Plan::<T>::new(complex_size, Direction::Forward))
            .transpose()?;
        let inverse = direction
            .wants_inverse()
            .then(|| Plan::<T>::new(complex_size, Direction::Inverse))
            .transpose()?;

        Ok(Self {
            n,
            complex_size,
            rtwiddle: build_real_twiddles(n),
            forward,
            inverse,
        })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn complex_size(&self) -> usize {
        self.complex_size
    }

    fn packed_len(&self, fmt: PackFormat) -> usize {
        match fmt {
            PackFormat::Perm => self.complex_size,
            PackFormat::CCs => self.complex_size + 1,
        }
    }

    /// Transforms `real_in` (length `n`) into `complex_out` (length
    /// `n/2` for `Perm`, `n/2+1` for `CCs`).
    pub fn execute_forward(
        &self,
        complex_out: &mut [Complex<T>],
        real_in: &[T],
        temp: &mut [T],
        fmt: PackFormat,
    ) -> Result<(), FftError> {
        if real_in.len() != self.n || complex_out.len() != self.packed_len(fmt) {
            return Err(FftError::SizeMismatch);
        }
        let plan = self
            .forward
            .as_ref()
            .expect("RealPlan was not built for the forward direction");

        let mut packed = alloc::vec![Complex::new(T::zero(), T::zero()); self.complex_size];
        for (c, pair) in packed.iter_mut().zip(real_in.chunks_exact(2)) {
            *c = Complex::new(pair[0], pair[1]);
        }
        plan.execute_in_place(&mut packed, temp, false)?;
        self.to_fmt(complex_out, &packed, fmt);
        Ok(())
    }

    /// Transforms `complex_in` (packed per `fmt`) into `real_out` (length
    /// `n`).
    pub fn execute_inverse(
        &self,
        real_out: &mut [T],
        complex_in: &[Complex<T>],
        temp: &mut [T],
        fmt: PackFormat,
    ) -> Result<(), FftError> {
        if real_out.len() != self.n || complex_in.len() != self.packed_len(fmt) {
            return Err(FftError::SizeMismatch);
        }
        let plan = self
            .inverse
            .as_ref()
            .expect("RealPlan was not built for the inverse direction");

        let mut packed = alloc::vec![Complex::new(T::zero(), T::zero()); self.complex_size];
        self.from_fmt(&mut packed, complex_in, fmt);
        plan.execute_in_place(&mut packed, temp, true)?;
        for (pair, c) in real_out.chunks_exact_mut(2).zip(packed.iter()) {
            pair[0] = c.re;
            pair[1] = c.im;
        }
        Ok(())
    }

    /// Splits the complex plan's raw output (`in[k]`, treating the real
    /// input as `N/2` interleaved complex samples) into the real
    /// spectrum's unique bins, in place into `out`.
    ///
    /// At `i` in `[1, N/4)`: `fpk = in[i]`, `fpnk = conj(in[N/2-i])`,
    /// `out[i] = ((fpk+fpnk) + rtwiddle[i]*(fpk-fpnk)) / 2`, and
    /// `out[N/2-i]` is the conjugate of the same expression with the
    /// twiddle term subtracted. `N/4` is its own conjugate mate; DC and
    /// Nyquist come out of `in[0].re +/- in[0].im`.
    fn to_fmt(&self, out: &mut [Complex<T>], packed: &[Complex<T>], fmt: PackFormat) {
        let m = self.complex_size;
        let half = T::from_usize(2).recip();
        let quarter = m / 2;

        for i in 1..quarter {
            let tw = self.rtwiddle[i];
            let fpk = packed[i];
            let fpnk = packed[m - i].conj();
            let f1k = fpk + fpnk;
            let f2k = fpk - fpnk;
            let t = f2k * tw;
            out[i] = (f1k + t) * half;
            out[m - i] = ((f1k - t) * half).conj();
        }
        out[quarter] = packed[quarter].conj();

        let dc = packed[0];
        match fmt {
            PackFormat::CCs => {
                out[0] = Complex::new(dc.re + dc.im, T::zero());
                out[m] = Complex::new(dc.re - dc.im, T::zero());
            }
            PackFormat::Perm => {
                out[0] = Complex::new(dc.re + dc.im, dc.re - dc.im);
            }
        }
    }

    /// Exact inverse of `to_fmt`: recovers the `N/2`-sample packed complex
    /// sequence the complex plan's inverse expects from a real spectrum in
    /// either format.
    fn from_fmt(&self, packed: &mut [Complex<T>], input: &[Complex<T>], fmt: PackFormat) {
        let m = self.complex_size;
        let half = T::from_usize(2).recip();
        let quarter = m / 2;

        let (x0, xm) = match fmt {
            PackFormat::CCs => (input[0].re, input[m].re),
            PackFormat::Perm => (input[0].re, input[0].im),
        };
        packed[0] = Complex::new((x0 + xm) * half, (x0 - xm) * half);

        for i in 1..quarter {
            let tw = self.rtwiddle[i].conj();
            let a = input[i];
            let b = input[m - i].conj();
            let f1k = a + b;
            let s = (a - b) * tw;
            packed[i] = (f1k + s) * half;
            packed[m - i] = ((f1k - s) * half).conj();
        }

        packed[quarter] = input[quarter].conj();
    }
}

#[cfg(test)]
#[path = "real_tests.rs"]
mod tests;
