// src/stage.rs
//
// Stage contract (§3, §4.3): a uniform, small interface every pass in a
// plan's pipeline implements, so the executor (`executor.rs`) can walk an
// arbitrary mix of them without knowing which kind it is holding — the
// "polymorphic stage" design note in §9, realized here as a trait object
// (`Box<dyn Stage<T>>`) rather than a tagged union, since the stage count
// per plan is small (at most ~12 for k = 24) and the dynamic dispatch cost
// is irrelevant next to the O(N) work each stage does.

use crate::smallfft::SmallFft;
use crate::trig::FftFloat;
use crate::twiddle::build_radix4_twiddles;
use alloc::vec::Vec;
use core::marker::PhantomData;
use num_complex::Complex;

/// One pass of a plan's pipeline. See §3 for the field contract this
/// mirrors (`stage_size`, `repeats`, `out_offset`, `recursion`) and §4.5 for
/// how the executor interprets them.
pub(crate) trait Stage<T>: Send + Sync {
    /// Length, in complex samples, of the sub-range this stage operates on.
    fn stage_size(&self) -> usize;

    /// How many times the executor invokes this stage per enclosing
    /// recursive level. `1` for non-recursive stages.
    fn repeats(&self) -> usize {
        1
    }

    /// Complex-sample stride the executor's output cursor advances by
    /// after each invocation. Nonzero only for the cascade's leaf stage
    /// (see module docs on why zero is correct everywhere else).
    fn out_offset(&self) -> usize {
        0
    }

    /// Whether the executor should treat this stage as a recursive level
    /// (entering the counter-stack loop) rather than a single flat call.
    fn recursion(&self) -> bool {
        false
    }

    /// Heap footprint of tables this stage owns (twiddles, bit-reversal),
    /// summed across a plan's stages for `Plan::data_size` diagnostics.
    fn data_size(&self) -> usize {
        0
    }

    /// Executes this stage in place over `buf[0..stage_size()]`.
    fn execute(&self, buf: &mut [Complex<T>]);
}

/// Radix-4 DIF combine for `stage_size >= 2048` (a multiple of 2048).
///
/// One call performs exactly one level of the decomposition over the
/// *entire* `stage_size`-length sub-range: it reads four `stage_size/4`
/// strided groups and writes four contiguous `stage_size/4` blocks back,
/// each pre-multiplied by its twiddle (§4.1's butterfly equations,
/// `use_br2` pre-swap omitted — see SPEC_FULL.md §4.1).
pub(crate) struct Radix4Stage<T> {
    stage_size: usize,
    inverse: bool,
    twiddles: Vec<Complex<T>>,
}

impl<T: FftFloat> Radix4Stage<T> {
    pub(crate) fn new(stage_size: usize, inverse: bool) -> Self {
        debug_assert!(stage_size >= 2048 && stage_size % 2048 == 0);
        Self {
            stage_size,
            inverse,
            twiddles: build_radix4_twiddles(stage_size, inverse),
        }
    }
}

impl<T: FftFloat> Stage<T> for Radix4Stage<T> {
    fn stage_size(&self) -> usize {
        self.stage_size
    }
    fn repeats(&self) -> usize {
        4
    }
    fn out_offset(&self) -> usize {
        0
    }
    fn recursion(&self) -> bool {
        true
    }
    fn data_size(&self) -> usize {
        self.twiddles.len()
    }
    fn execute(&self, buf: &mut [Complex<T>]) {
        let s4 = self.stage_size / 4;
        debug_assert_eq!(buf.len(), self.stage_size);
        for n in 0..s4 {
            let a0 = buf[n];
            let a1 = buf[n + s4];
            let a2 = buf[n + 2 * s4];
            let a3 = buf[n + 3 * s4];

            let s02 = a0 + a2;
            let d02 = a0 - a2;
            let s13 = a1 + a3;
            let d13 = a1 - a3;
            let j_d13 = Complex::new(-d13.im, d13.re);

            let b0 = s02 + s13;
            let b2 = s02 - s13;
            // Forward: S_1 = a0 - i*a1 - a2 + i*a3 = d02 - i*d13, S_3 = d02 + i*d13
            // (derived from W_N^{N/4} = -i for the forward kernel, W_N = exp(-2*pi*i/N)).
            // Inverse conjugates the base root (W_N^{N/4} = +i), swapping the two.
            let (b1, b3) = if self.inverse {
                (d02 + j_d13, d02 - j_d13)
            } else {
                (d02 - j_d13, d02 + j_d13)
            };

            let tw0 = self.twiddles[3 * n];
            let tw1 = self.twiddles[3 * n + 1];
            let tw2 = self.twiddles[3 * n + 2];

            buf[n] = b0;
            buf[n + s4] = b1 * tw0;
            buf[n + 2 * s4] = b2 * tw1;
            buf[n + 3 * s4] = b3 * tw2;
        }
    }
}

/// The cascade's terminal stage: a complete, correctly-ordered transform of
/// a fixed size (512 or 1024, per §4.4) wrapped to satisfy the `Stage`
/// contract. `out_offset = stage_size` is the one nonzero offset in the
/// whole pipeline — see `executor.rs` for why that is sufficient to walk
/// every leaf block in order.
pub(crate) struct FinalStage<T> {
    inner: SmallFft<T>,
}

impl<T: FftFloat> FinalStage<T> {
    pub(crate) fn new(size: usize, inverse: bool) -> Self {
        Self {
            inner: SmallFft::new(size, inverse),
        }
    }
}

impl<T: FftFloat> Stage<T> for FinalStage<T> {
    fn stage_size(&self) -> usize {
        self.inner.len()
    }
    fn repeats(&self) -> usize {
        4
    }
    fn out_offset(&self) -> usize {
        self.inner.len()
    }
    fn recursion(&self) -> bool {
        true
    }
    fn data_size(&self) -> usize {
        self.inner.data_size()
    }
    fn execute(&self, buf: &mut [Complex<T>]) {
        self.inner.execute(buf);
    }
}

/// A whole plan in one non-recursive call, for `k = 1..=8` (`N <= 256`).
/// No reorder stage follows it in the plan (its output is already natural
/// order).
pub(crate) struct Specialization<T> {
    inner: SmallFft<T>,
}

impl<T: FftFloat> Specialization<T> {
    pub(crate) fn new(size: usize, inverse: bool) -> Self {
        Self {
            inner: SmallFft::new(size, inverse),
        }
    }
}

impl<T: FftFloat> Stage<T> for Specialization<T> {
    fn stage_size(&self) -> usize {
        self.inner.len()
    }
    fn data_size(&self) -> usize {
        self.inner.data_size()
    }
    fn execute(&self, buf: &mut [Complex<T>]) {
        self.inner.execute(buf);
    }
}

/// Maps the scrambled order a radix-4 DIF cascade leaves its output in back
/// to natural order, in place. No twiddles (§4.3). The permutation is a
/// closed form derived from the cascade's own layout (SPEC_FULL.md §4.1),
/// precomputed once as a cycle decomposition so `execute` does no
/// allocation.
pub(crate) struct ReorderStage<T> {
    size: usize,
    cycles: Vec<Vec<usize>>,
    _marker: PhantomData<T>,
}

impl<T> ReorderStage<T> {
    pub(crate) fn new(size: usize, leaf_size: usize) -> Self {
        let levels = cascade_levels(size, leaf_size);
        let perm = stored_positions(size, leaf_size, levels);
        let cycles = decompose_cycles(&perm);
        Self {
            size,
            cycles,
            _marker: PhantomData,
        }
    }
}

impl<T: FftFloat> Stage<T> for ReorderStage<T> {
    fn stage_size(&self) -> usize {
        self.size
    }
    fn execute(&self, buf: &mut [Complex<T>]) {
        for cycle in &self.cycles {
            if cycle.len() < 2 {
                continue;
            }
            let saved = buf[cycle[0]];
            for w in cycle.windows(2) {
                buf[w[0]] = buf[w[1]];
            }
            let last = *cycle.last().expect("checked len >= 2 above");
            buf[last] = saved;
        }
    }
}

/// Number of radix-4 cascade levels `L` such that `size == leaf_size * 4^L`.
fn cascade_levels(size: usize, leaf_size: usize) -> u32 {
    debug_assert!(size % leaf_size == 0);
    let mut remaining = size / leaf_size;
    let mut levels = 0u32;
    while remaining > 1 {
        debug_assert_eq!(remaining % 4, 0, "cascade ratio must be a power of four");
        remaining /= 4;
        levels += 1;
    }
    levels
}

/// Where the cascade's in-place DIF layout stores the true-order bin `k`
/// (SPEC_FULL.md §4.1: fold the low `2*levels` bits into a reversed base-4
/// digit string scaled by `leaf_size`, and keep the remaining high bits —
/// the leaf-local index — as the low-order part unchanged).
fn stored_position(k: usize, size: usize, leaf_size: usize, levels: u32) -> usize {
    let top = k >> (2 * levels);
    let mut pos = top;
    for i in 0..levels {
        let digit = (k >> (2 * i)) & 3;
        let weight = size >> (2 * (i + 1));
        pos += digit * weight;
    }
    pos
}

fn stored_positions(size: usize, leaf_size: usize, levels: u32) -> Vec<usize> {
    (0..size)
        .map(|k| stored_position(k, size, leaf_size, levels))
        .collect()
}

fn decompose_cycles(perm: &[usize]) -> Vec<Vec<usize>> {
    let n = perm.len();
    let mut visited = alloc::vec![false; n];
    let mut cycles = Vec::new();
    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        if perm[start] == start {
            continue;
        }
        let mut cycle = alloc::vec![start];
        let mut cur = perm[start];
        while cur != start {
            visited[cur] = true;
            cycle.push(cur);
            cur = perm[cur];
        }
        cycles.push(cycle);
    }
    cycles
}

#[cfg(test)]
#[path = "stage_tests.rs"]
mod tests;
