// src/plan.rs
//
// The plan compiler and public `Plan<T>` type (§4.4, §6). `Plan::new`
// decomposes a size into a stage list exactly as described: k in 1..=8 is
// one opaque `Specialization`; k >= 9 cascades `Radix4Stage`s down to a
// fixed leaf size, then a `FinalStage`, then a `ReorderStage`. Everything
// downstream (twiddle construction, the executor) is reused verbatim from
// `twiddle.rs`/`executor.rs`.

use crate::common::{log2_checked, Direction, FftError, FftProcess};
use crate::executor::execute_stages;
use crate::stage::{FinalStage, Radix4Stage, ReorderStage, Specialization, Stage};
use crate::trig::FftFloat;
use alloc::boxed::Box;
use alloc::vec::Vec;
use num_complex::Complex;

/// A compiled, reusable plan for complex FFTs of a fixed power-of-two size.
///
/// Construction is the only fallible operation; `execute` is infallible
/// given correctly-sized buffers (checked, not merely assumed — see
/// `FftError::SizeMismatch`/`BufferTooSmall`).
pub struct Plan<T> {
    size: usize,
    temp_size: usize,
    data_size: usize,
    forward: Option<Vec<Box<dyn Stage<T>>>>,
    inverse: Option<Vec<Box<dyn Stage<T>>>>,
}

impl<T> core::fmt::Debug for Plan<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Plan")
            .field("size", &self.size)
            .field("temp_size", &self.temp_size)
            .field("data_size", &self.data_size)
            .finish()
    }
}

impl<T: FftFloat> Plan<T> {
    /// Builds a plan for `n` (must be a power of two, `2 <= n <= 2^24`).
    pub fn new(n: usize, direction: Direction) -> Result<Self, FftError> {
        let k = log2_checked(n)?;

        let forward = direction
            .wants_forward()
            .then(|| build_stages::<T>(n, k, false));
        let inverse = direction
            .wants_inverse()
            .then(|| build_stages::<T>(n, k, true));

        let data_size = forward.as_deref().map(stage_list_data_size).unwrap_or(0)
            + inverse.as_deref().map(stage_list_data_size).unwrap_or(0);

        Ok(Self {
            size: n,
            temp_size: 0,
            data_size,
            forward,
            inverse,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Minimum length of the `temp` scratch buffer `execute` requires.
    /// Always `0` for this crate's stage set (§3) — kept for interface
    /// parity with stages that might need scratch in the future.
    pub fn temp_size(&self) -> usize {
        self.temp_size
    }

    /// Combined length of every table this plan's stages own, for
    /// diagnostics parity with the original `plan.data_size` field.
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Transforms `input` into `out`, using `temp` as scratch (must be at
    /// least `temp_size()` long). `out` and `input` may be the same slice;
    /// when they are not, `input` is copied into `out` once up front and
    /// every stage then runs strictly in place (§4.5).
    pub fn execute(
        &self,
        out: &mut [Complex<T>],
        input: &[Complex<T>],
        temp: &mut [T],
        inverse: bool,
    ) -> Result<(), FftError> {
        self.check_sizes(out.len(), input.len(), temp.len())?;
        if out.as_ptr() != input.as_ptr() {
            out.copy_from_slice(input);
        }
        execute_stages(self.stages_for(inverse), out);
        Ok(())
    }

    /// Transforms `buf` in place.
    pub fn execute_in_place(
        &self,
        buf: &mut [Complex<T>],
        temp: &mut [T],
        inverse: bool,
    ) -> Result<(), FftError> {
        self.check_sizes(buf.len(), buf.len(), temp.len())?;
        execute_stages(self.stages_for(inverse), buf);
        Ok(())
    }

    fn check_sizes(&self, out_len: usize, in_len: usize, temp_len: usize) -> Result<(), FftError> {
        if out_len != self.size || in_len != self.size {
            return Err(FftError::SizeMismatch);
        }
        if temp_len < self.temp_size {
            return Err(FftError::BufferTooSmall);
        }
        Ok(())
    }

    fn stages_for(&self, inverse: bool) -> &[Box<dyn Stage<T>>] {
        let list = if inverse { &self.inverse } else { &self.forward };
        list.as_deref()
            .expect("Plan was not built for the requested direction")
    }
}

impl<T: FftFloat> FftProcess<Complex<T>> for Plan<T> {
    fn process(&self, buffer: &mut [Complex<T>], inverse: bool) -> Result<(), FftError> {
        let mut temp: [T; 0] = [];
        self.execute_in_place(buffer, &mut temp, inverse)
    }
}

fn stage_list_data_size<T>(stages: &[Box<dyn Stage<T>>]) -> usize {
    stages.iter().map(|s| s.data_size()).sum()
}

/// Fixed terminal leaf size for the cascade path: 1024 when `k` is even,
/// 512 when `k` is odd (§4.4), reached exactly because each radix-4 pass
/// divides the remaining size by `4 = 2^2`, preserving `k`'s parity.
fn leaf_size_for(k: u32) -> usize {
    if k % 2 == 0 {
        1024
    } else {
        512
    }
}

fn build_stages<T: FftFloat>(n: usize, k: u32, inverse: bool) -> Vec<Box<dyn Stage<T>>> {
    if k <= 8 {
        return alloc::vec![Box::new(Specialization::<T>::new(n, inverse)) as Box<dyn Stage<T>>];
    }

    let leaf_size = leaf_size_for(k);
    let mut stages: Vec<Box<dyn Stage<T>>> = Vec::new();
    let mut size = n;
    while size >= 2048 {
        stages.push(Box::new(Radix4Stage::<T>::new(size, inverse)));
        size /= 4;
    }
    debug_assert_eq!(size, leaf_size);

    stages.push(Box::new(FinalStage::<T>::new(leaf_size, inverse)));
    stages.push(Box::new(ReorderStage::<T>::new(n, leaf_size)));
    stages
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
