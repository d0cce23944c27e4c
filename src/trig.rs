// src/trig.rs
//
// Generalizes the teacher's per-precision `sin_cos` free function (see
// `float/complex.rs`) into a trait so twiddle construction can be written
// once for both f32 and f64.

/// Minimal numeric surface the plan compiler needs from its floating-point
/// type: trigonometry for twiddle construction plus the handful of
/// constants/conversions used throughout (`Complex<T>` itself is supplied by
/// `num_complex` and already gives us `+ - * conj`).
pub trait FftFloat: num_traits::Float + Copy + Send + Sync + 'static {
    fn sin_cos(self) -> (Self, Self);
    fn pi() -> Self;
    fn from_usize(n: usize) -> Self;
}

impl FftFloat for f32 {
    fn sin_cos(self) -> (Self, Self) {
        #[cfg(feature = "std")]
        {
            (self.sin(), self.cos())
        }
        #[cfg(not(feature = "std"))]
        {
            (libm::sinf(self), libm::cosf(self))
        }
    }
    fn pi() -> Self {
        core::f32::consts::PI
    }
    fn from_usize(n: usize) -> Self {
        n as f32
    }
}

impl FftFloat for f64 {
    fn sin_cos(self) -> (Self, Self) {
        #[cfg(feature = "std")]
        {
            (self.sin(), self.cos())
        }
        #[cfg(not(feature = "std"))]
        {
            (libm::sin(self), libm::cos(self))
        }
    }
    fn pi() -> Self {
        core::f64::consts::PI
    }
    fn from_usize(n: usize) -> Self {
        n as f64
    }
}
