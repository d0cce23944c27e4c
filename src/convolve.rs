// src/convolve.rs
//
// The partitioned overlap-save filter and the `convolve`/`correlate`/
// `autocorrelate` free functions (§4.7). Both are grounded in the original
// source's `convolve_filter<T>` (`process_buffer`, `set_data`) and its
// `internal::convolve`/`correlate`/`autocorrelate`
// (`examples/original_source/include/kfr/dft/dft-src.cpp`); the filter's
// fill/transform/emit state machine, the `premul` incremental
// accumulation, and the `position` ring's decrement-on-wrap direction are
// taken verbatim from `process_buffer` since spec.md only describes their
// shape. The free functions are rebuilt over `RealPlan` rather than the
// original's raw complex `dft_plan` (per spec.md §6: "built over
// `real_plan`"), so their normalization constant is this crate's own
// (derived in DESIGN.md), not the original's literal `1/size`.

use crate::common::{Direction, FftError, PackFormat};
use crate::real::RealPlan;
use crate::trig::FftFloat;
use alloc::vec::Vec;
use num_complex::Complex;

/// `Perm` format packs a real signal's DC and Nyquist bins into the real
/// and imaginary parts of bin 0 as two independent real scalars, not one
/// complex number — multiplying two such spectra must multiply those
/// scalars separately rather than as a complex product.
#[inline]
fn multiply_bin0<T: FftFloat>(a: Complex<T>, b: Complex<T>) -> Complex<T> {
    Complex::new(a.re * b.re, a.im * b.im)
}

fn multiply_into_perm<T: FftFloat>(dst: &mut [Complex<T>], a: &[Complex<T>], b: &[Complex<T>]) {
    dst[0] = multiply_bin0(a[0], b[0]);
    for i in 1..dst.len() {
        dst[i] = a[i] * b[i];
    }
}

fn multiply_accumulate_perm<T: FftFloat>(dst: &mut [Complex<T>], a: &[Complex<T>], b: &[Complex<T>]) {
    dst[0] = dst[0] + multiply_bin0(a[0], b[0]);
    for i in 1..dst.len() {
        dst[i] = dst[i] + a[i] * b[i];
    }
}

/// `dst[i] = base[i] + a[i]*b[i]`, with the `Perm` bin-0 special case.
fn multiply_add_perm<T: FftFloat>(dst: &mut [Complex<T>], base: &[Complex<T>], a: &[Complex<T>], b: &[Complex<T>]) {
    dst[0] = base[0] + multiply_bin0(a[0], b[0]);
    for i in 1..dst.len() {
        dst[i] = base[i] + a[i] * b[i];
    }
}

/// Streaming partitioned (overlap-save) FIR filter over an arbitrary-length
/// impulse response, processed `block_size`-samples at a time (§4.7).
///
/// The impulse response is split into `ceil(L/block_size)` segments, each
/// forward-transformed once at construction. `process` accumulates input
/// into the current block, transforms it, multiply-accumulates it against
/// every impulse-response segment via a ring of past input spectra, and
/// inverse-transforms and overlap-adds the result — the classic
/// overlap-save structure, partitioned so long impulse responses don't
/// force one enormous transform per block.
pub struct ConvolveFilter<T> {
    fft: RealPlan<T>,
    block_size: usize,
    segments: Vec<Vec<Complex<T>>>,
    ir_segments: Vec<Vec<Complex<T>>>,
    saved_input: Vec<T>,
    scratch: Vec<T>,
    premul: Vec<Complex<T>>,
    cscratch: Vec<Complex<T>>,
    overlap: Vec<T>,
    input_position: usize,
    position: usize,
}

impl<T: FftFloat> ConvolveFilter<T> {
    /// Builds a filter for `impulse_response`, processing `block_size`
    /// input samples per internal transform (rounded up to a power of two).
    pub fn new(impulse_response: &[T], block_size: usize) -> Result<Self, FftError> {
        let block_size = block_size.max(1).next_power_of_two();
        let fft = RealPlan::<T>::new(2 * block_size, Direction::Both)?;
        let segment_count = impulse_response.len().div_ceil(block_size).max(1);

        let inv_norm = T::one() / T::from_usize(block_size);
        let mut temp: Vec<T> = Vec::new();
        let mut ir_segments = Vec::with_capacity(segment_count);
        for i in 0..segment_count {
            let start = i * block_size;
            let end = (start + block_size).min(impulse_response.len());
            let mut padded = alloc::vec![T::zero(); 2 * block_size];
            if start < end {
                padded[..end - start].copy_from_slice(&impulse_response[start..end]);
            }
            let mut spectrum = alloc::vec![Complex::new(T::zero(), T::zero()); block_size];
            fft.execute_forward(&mut spectrum, &padded, &mut temp, PackFormat::Perm)?;
            for c in spectrum.iter_mut() {
                *c = *c * inv_norm;
            }
            ir_segments.push(spectrum);
        }

        let segments = (0..segment_count)
            .map(|_| alloc::vec![Complex::new(T::zero(), T::zero()); block_size])
            .collect();

        Ok(Self {
            fft,
            block_size,
            segments,
            ir_segments,
            saved_input: alloc::vec![T::zero(); block_size],
            scratch: alloc::vec![T::zero(); 2 * block_size],
            premul: alloc::vec![Complex::new(T::zero(), T::zero()); block_size],
            cscratch: alloc::vec![Complex::new(T::zero(), T::zero()); block_size],
            overlap: alloc::vec![T::zero(); block_size],
            input_position: 0,
            position: 0,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Filters `input` into `output` (equal length, any length — internally
    /// chunked at the filter's block boundary), continuing the streaming
    /// state from the previous call.
    pub fn process(&mut self, output: &mut [T], input: &[T]) {
        assert_eq!(output.len(), input.len());
        let mut temp: Vec<T> = Vec::new();
        let mut processed = 0;
        while processed < input.len() {
            let remaining_in_block = self.block_size - self.input_position;
            let processing = (input.len() - processed).min(remaining_in_block);

            self.saved_input[self.input_position..self.input_position + processing]
                .copy_from_slice(&input[processed..processed + processing]);

            self.scratch[..self.block_size].copy_from_slice(&self.saved_input);
            for v in &mut self.scratch[self.block_size..] {
                *v = T::zero();
            }
            self.fft
                .execute_forward(&mut self.segments[self.position], &self.scratch, &mut temp, PackFormat::Perm)
                .expect("scratch and segment slot are sized to the filter's real plan");

            if self.input_position == 0 {
                for c in &mut self.premul {
                    *c = Complex::new(T::zero(), T::zero());
                }
                let segment_count = self.segments.len();
                for i in 1..segment_count {
                    let n = (self.position + i) % segment_count;
                    multiply_accumulate_perm(&mut self.premul, &self.ir_segments[i], &self.segments[n]);
                }
            }
            multiply_add_perm(&mut self.cscratch, &self.premul, &self.ir_segments[0], &self.segments[self.position]);

            self.fft
                .execute_inverse(&mut self.scratch, &self.cscratch, &mut temp, PackFormat::Perm)
                .expect("cscratch and scratch are sized to the filter's real plan");

            for ((o, s), ov) in output[processed..processed + processing]
                .iter_mut()
                .zip(&self.scratch[self.input_position..])
                .zip(&self.overlap[self.input_position..])
            {
                *o = *s + *ov;
            }

            self.input_position += processing;
            if self.input_position == self.block_size {
                self.input_position = 0;
                for v in &mut self.saved_input {
                    *v = T::zero();
                }
                self.overlap.copy_from_slice(&self.scratch[self.block_size..]);
                self.position = if self.position > 0 {
                    self.position - 1
                } else {
                    self.segments.len() - 1
                };
            }

            processed += processing;
        }
    }
}

/// Linear convolution of `a` and `b` via a single zero-padded real FFT pair
/// (not partitioned — for the streaming, arbitrary-length-impulse-response
/// case, use [`ConvolveFilter`]).
pub fn convolve<T: FftFloat>(a: &[T], b: &[T]) -> Result<Vec<T>, FftError> {
    let out_len = a.len() + b.len() - 1;
    let size = out_len.next_power_of_two().max(2);

    let mut apad = alloc::vec![T::zero(); size];
    apad[..a.len()].copy_from_slice(a);
    let mut bpad = alloc::vec![T::zero(); size];
    bpad[..b.len()].copy_from_slice(b);

    let plan = RealPlan::<T>::new(size, Direction::Both)?;
    let complex_size = size / 2;
    let mut temp: Vec<T> = Vec::new();

    let mut aspec = alloc::vec![Complex::new(T::zero(), T::zero()); complex_size];
    let mut bspec = alloc::vec![Complex::new(T::zero(), T::zero()); complex_size];
    plan.execute_forward(&mut aspec, &apad, &mut temp, PackFormat::Perm)?;
    plan.execute_forward(&mut bspec, &bpad, &mut temp, PackFormat::Perm)?;

    let mut product = alloc::vec![Complex::new(T::zero(), T::zero()); complex_size];
    multiply_into_perm(&mut product, &aspec, &bspec);

    let mut result = alloc::vec![T::zero(); size];
    plan.execute_inverse(&mut result, &product, &mut temp, PackFormat::Perm)?;

    let scale = T::one() / T::from_usize(complex_size);
    for v in result.iter_mut() {
        *v = *v * scale;
    }
    result.truncate(out_len);
    Ok(result)
}

/// Cross-correlation of `a` and `b`: convolution of `a` with `b` reversed.
pub fn correlate<T: FftFloat>(a: &[T], b: &[T]) -> Result<Vec<T>, FftError> {
    let reversed: Vec<T> = b.iter().rev().copied().collect();
    convolve(a, &reversed)
}

/// Full two-sided autocorrelation of `a` (`correlate(a, a)`).
pub fn autocorrelate<T: FftFloat>(a: &[T]) -> Result<Vec<T>, FftError> {
    correlate(a, a)
}

#[cfg(test)]
#[path = "convolve_tests.rs"]
mod tests;
