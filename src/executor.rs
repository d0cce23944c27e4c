// src/executor.rs
//
// The recursive counter-stack machine (§4.5). A plan's stage list is split
// into a leading run of mutually-recursive stages (radix-4 passes plus the
// terminal final stage) and a trailing run of flat stages (the reorder
// pass, or nothing for a `Specialization` plan). The recursive run is
// walked by `run_recursive`, whose call stack *is* the counter stack: each
// activation is one `stack[d]` slot from the original description, and
// `buf` narrows to the current sub-block on every descent instead of a
// shared cursor advancing through a separate output array, since every
// stage here runs strictly in place (see `plan.rs` on why in/out aliasing
// is resolved before this ever runs).

use crate::stage::Stage;
use crate::trig::FftFloat;
use alloc::boxed::Box;
use num_complex::Complex;

pub(crate) fn execute_stages<T: FftFloat>(stages: &[Box<dyn Stage<T>>], buf: &mut [Complex<T>]) {
    let chain_end = stages.iter().take_while(|s| s.recursion()).count();
    if chain_end > 0 {
        run_recursive(&stages[..chain_end], 0, buf);
    }
    for stage in &stages[chain_end..] {
        stage.execute(buf);
    }
}

/// Executes `stages[depth]` over `buf`, then, if the following stage in the
/// chain is itself recursive, splits `buf` into `repeats()` equal
/// sub-blocks and recurses into each. `depth` only ever advances by one at
/// a time; the four-way fan-out per level is what gives each leaf call its
/// `4^levels` multiplicity (see SPEC_FULL.md §4.5's N = 8192 trace).
fn run_recursive<T: FftFloat>(stages: &[Box<dyn Stage<T>>], depth: usize, buf: &mut [Complex<T>]) {
    let stage = stages[depth].as_ref();
    debug_assert_eq!(buf.len(), stage.stage_size());
    stage.execute(buf);

    if let Some(next) = stages.get(depth + 1) {
        if next.recursion() {
            let repeats = stage.repeats();
            let chunk = stage.stage_size() / repeats;
            debug_assert_eq!(chunk, next.stage_size());
            for (i, sub) in buf.chunks_exact_mut(chunk).enumerate() {
                debug_assert!(i < repeats);
                run_recursive(stages, depth + 1, sub);
            }
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
