use thiserror::Error;

/// Errors from setting up or reconfiguring the reverb.
///
/// All of these are configuration errors. Once an engine is constructed the
/// per-sample path cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("failed to allocate delay line of {capacity} samples")]
    Allocation { capacity: usize },

    #[error("delay length must be at least one sample")]
    ZeroLength,

    #[error("delay length {len} exceeds capacity of {capacity} samples")]
    CapacityExceeded { len: usize, capacity: usize },

    #[error("gain {0} outside [0, 1)")]
    InvalidGain(f32),

    #[error("slew step must be positive, got {0}")]
    InvalidSlewStep(f32),

    #[error("unsupported channel count {0}, expected 1 or 2")]
    UnsupportedChannels(usize),

    #[error("block of {len} samples is not a whole number of {channels} channel frames")]
    IncompleteFrame { len: usize, channels: usize },
}
