//! The filter network.
//!
//! ```text
//!            ┌────┐  ┌────┐  ┌────┐      ┌──── comb 1 ────┐
//! (L+R)/2 ─▶ │ AP │─▶│ AP │─▶│ AP │──┬──▶├──── comb 2 ────┤──▶ sum ──▶ dry/wet ──▶ L, R
//!            └────┘  └────┘  └────┘  │   ├──── comb 3 ────┤          ▲
//!                                    │   └──── comb 4 ────┘          │
//!                                    └──────────── dry ──────────────┘
//! ```
//!
//! Samples are `f32` in 16-bit PCM scale, and every stage hard clips to
//! [`FULL_SCALE`].

mod allpass;
mod comb;
mod delay;
mod mix;
mod reverb;

pub use allpass::AllPass;
pub use comb::{FeedBackComb, FeedForwardComb};
pub use delay::{Delay, HeapDelay, MemoryDelay};
pub use mix::{mix_matrix, transform_mix};
pub use reverb::{LengthClamp, LengthClamps, SchroederReverb};

use crate::Error;

/// Positive full scale of a 16-bit PCM sample.
pub const FULL_SCALE: f32 = 32767.0;

pub trait AudioNode<const C: usize> {
    fn process(&mut self, input: [f32; C]) -> [f32; C];
}

/// A single channel filter stage backed by one delay line.
pub trait Filter {
    /// Process one sample.
    fn process(&mut self, x: f32) -> f32;

    /// Active delay length in samples.
    fn len(&self) -> usize;

    /// Allocated delay capacity in samples.
    fn capacity(&self) -> usize;

    /// Change the active delay length. See [`Delay::set_len`].
    fn set_len(&mut self, len: usize) -> Result<(), Error>;

    /// Back to silence.
    fn reset(&mut self);
}

/// Hard symmetric clamp to ±[`FULL_SCALE`].
#[inline(always)]
pub fn hard_clip(x: f32) -> f32 {
    if x > FULL_SCALE {
        FULL_SCALE
    } else if x < -FULL_SCALE {
        -FULL_SCALE
    } else {
        x
    }
}

/// Gains must lie in `[0, 1)`.
pub(crate) fn check_gain(gain: f32) -> Result<f32, Error> {
    if (0.0..1.0).contains(&gain) {
        Ok(gain)
    } else {
        Err(Error::InvalidGain(gain))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hard_clip() {
        assert_eq!(hard_clip(0.0), 0.0);
        assert_eq!(hard_clip(-1234.5), -1234.5);
        assert_eq!(hard_clip(32767.0), 32767.0);
        assert_eq!(hard_clip(40000.0), 32767.0);
        assert_eq!(hard_clip(-40000.0), -32767.0);
        assert_eq!(hard_clip(f32::INFINITY), 32767.0);
    }

    #[test]
    fn test_check_gain() {
        assert!(check_gain(0.0).is_ok());
        assert!(check_gain(0.999).is_ok());
        assert_eq!(check_gain(1.0), Err(Error::InvalidGain(1.0)));
        assert_eq!(check_gain(-0.1), Err(Error::InvalidGain(-0.1)));
        assert!(check_gain(f32::NAN).is_err());
    }
}
