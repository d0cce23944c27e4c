#![no_std]

//! A planned, power-of-two complex FFT engine with a real-input variant
//! and a partitioned (overlap-save) frequency-domain convolution filter.
//!
//! A [`Plan`] is built once per transform size and direction and reused
//! across calls; [`RealPlan`] wraps a half-size complex plan with the
//! real-spectrum repack, and [`ConvolveFilter`] streams an FIR impulse
//! response block-by-block over it. `f32` and `f64` are both supported via
//! the [`FftFloat`] trait.

extern crate alloc;

// `std` is needed for the process-wide plan cache; pulled in for tests
// even without that feature so `#[test]` modules can use `std::vec` etc.
#[cfg(any(feature = "std", test))]
extern crate std;

pub(crate) mod common;
pub(crate) mod executor;
pub(crate) mod plan;
pub(crate) mod real;
pub(crate) mod smallfft;
pub(crate) mod stage;
pub(crate) mod trig;
pub(crate) mod twiddle;

mod convolve;

#[cfg(feature = "std")]
pub mod cache;

pub use common::{Direction, FftError, FftProcess, PackFormat};
pub use convolve::{autocorrelate, correlate, convolve, ConvolveFilter};
pub use plan::Plan;
pub use real::RealPlan;
pub use trig::FftFloat;