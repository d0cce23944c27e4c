// src/common.rs

use core::fmt;

/// Failure modes recognised by plan/filter construction (see §7 of the design doc).
///
/// Execution (`execute`/`process`) is infallible once a plan exists; every
/// variant here is reported at construction time.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FftError {
    SizeMismatch,
    NotPowerOfTwo,
    BufferTooSmall,
    InvalidStride,
    /// `N` is a power of two but outside the stage repertoire (k outside 1..=24).
    UnsupportedSize,
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftError::SizeMismatch => write!(f, "Data buffer size does not match FFT size"),
            FftError::NotPowerOfTwo => write!(f, "Size must be a power of 2"),
            FftError::BufferTooSmall => write!(f, "Auxiliary buffers are too small"),
            FftError::InvalidStride => write!(f, "Invalid stride configuration"),
            FftError::UnsupportedSize => write!(f, "Size is outside the supported stage repertoire"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Uniform in-place process contract shared by `Plan` and `RealPlan`.
pub trait FftProcess<T> {
    fn process(&self, buffer: &mut [T], inverse: bool) -> Result<(), FftError>;
}

/// The two half-spectrum packings for a real-input transform.
///
/// `Perm` folds DC and Nyquist into the real/imag parts of bin 0 (length
/// N/2 complex samples, no wasted storage). `CCs` carries them as separate
/// complex samples (DC at bin 0, Nyquist at bin N/2; length N/2+1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackFormat {
    Perm,
    CCs,
}

/// Which direction(s) a plan is built for.
///
/// Building only the direction(s) you need halves twiddle-table memory and
/// construction time for one-directional use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Inverse,
    Both,
}

impl Direction {
    pub(crate) fn wants_forward(self) -> bool {
        matches!(self, Direction::Forward | Direction::Both)
    }
    pub(crate) fn wants_inverse(self) -> bool {
        matches!(self, Direction::Inverse | Direction::Both)
    }
}

/// `log2(n)` for a power-of-two `n`, or an error otherwise.
///
/// Also rejects sizes outside the stage repertoire (k = 0 or k > 24): k = 0
/// has no meaningful FFT (a single sample), and k > 24 is well beyond any
/// twiddle table this crate is prepared to build in one contiguous `Vec`.
pub(crate) fn log2_checked(n: usize) -> Result<u32, FftError> {
    if n < 2 || !n.is_power_of_two() {
        return Err(FftError::NotPowerOfTwo);
    }
    let k = n.trailing_zeros();
    if k > 24 {
        return Err(FftError::UnsupportedSize);
    }
    Ok(k)
}
