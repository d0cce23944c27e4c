use super::*;
use crate::stage::Stage;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use num_complex::Complex32;

struct CountingStage {
    size: usize,
    repeats: usize,
    recursion: bool,
    calls: Arc<AtomicUsize>,
}

impl Stage<f32> for CountingStage {
    fn stage_size(&self) -> usize {
        self.size
    }
    fn repeats(&self) -> usize {
        self.repeats
    }
    fn recursion(&self) -> bool {
        self.recursion
    }
    fn execute(&self, buf: &mut [Complex32]) {
        assert_eq!(buf.len(), self.size);
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn telescoping_multiplicities_match_8192_trace() {
    let c0 = Arc::new(AtomicUsize::new(0));
    let c1 = Arc::new(AtomicUsize::new(0));
    let c2 = Arc::new(AtomicUsize::new(0));
    let stages: Vec<Box<dyn Stage<f32>>> = alloc::vec![
        Box::new(CountingStage {
            size: 8192,
            repeats: 4,
            recursion: true,
            calls: c0.clone(),
        }),
        Box::new(CountingStage {
            size: 2048,
            repeats: 4,
            recursion: true,
            calls: c1.clone(),
        }),
        Box::new(CountingStage {
            size: 512,
            repeats: 4,
            recursion: true,
            calls: c2.clone(),
        }),
    ];
    let mut buf = alloc::vec![Complex32::new(0.0, 0.0); 8192];
    execute_stages(&stages, &mut buf);
    assert_eq!(c0.load(Ordering::SeqCst), 1);
    assert_eq!(c1.load(Ordering::SeqCst), 4);
    assert_eq!(c2.load(Ordering::SeqCst), 16);
}

#[test]
fn trailing_non_recursive_stage_runs_once_over_full_buffer() {
    let leaf = Arc::new(AtomicUsize::new(0));
    let reorder = Arc::new(AtomicUsize::new(0));
    let stages: Vec<Box<dyn Stage<f32>>> = alloc::vec![
        Box::new(CountingStage {
            size: 16,
            repeats: 4,
            recursion: true,
            calls: leaf.clone(),
        }),
        Box::new(CountingStage {
            size: 16,
            repeats: 1,
            recursion: false,
            calls: reorder.clone(),
        }),
    ];
    let mut buf = alloc::vec![Complex32::new(0.0, 0.0); 16];
    execute_stages(&stages, &mut buf);
    assert_eq!(leaf.load(Ordering::SeqCst), 1);
    assert_eq!(reorder.load(Ordering::SeqCst), 1);
}

#[test]
fn specialization_only_list_executes_once_and_nothing_more() {
    let calls = Arc::new(AtomicUsize::new(0));
    let stages: Vec<Box<dyn Stage<f32>>> = alloc::vec![Box::new(CountingStage {
        size: 8,
        repeats: 1,
        recursion: false,
        calls: calls.clone(),
    })];
    let mut buf = alloc::vec![Complex32::new(0.0, 0.0); 8];
    execute_stages(&stages, &mut buf);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
