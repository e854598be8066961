use const_soft_float::soft_f32::SoftF32;

use super::delay::Delay;
use super::{check_gain, hard_clip, Filter};
use crate::Error;

/// Schroeder all-pass stage.
///
/// Diffuses transients before they hit the comb bank. This variant feeds back
/// from the slot *before* the cursor, which couples the feedback path with a one
/// sample lag:
///
/// ```text
/// y        = (-g·x + s[i]) · (1 - g²)
/// s[i]     = clip(g·s[i-1] + g·x)
/// ```
///
/// The `(1 - g²)` factor keeps high gains from building up into clipping.
pub struct AllPass<D> {
    delay: D,
    gain: f32,
    compensation: f32,
}

/// Output compensation for a feedback gain.
pub const fn compensation(gain: f32) -> f32 {
    // Soft32 so this can be evaluated for const gains.
    SoftF32(1.0)
        .sub(SoftF32(gain).mul(SoftF32(gain)))
        .to_f32()
}

impl<D: Delay> AllPass<D> {
    /// Creates an all-pass over `delay` with active length `len` and feedback `gain`.
    pub fn new(mut delay: D, len: usize, gain: f32) -> Result<Self, Error> {
        let gain = check_gain(gain)?;
        delay.set_len(len)?;

        Ok(AllPass {
            delay,
            gain,
            compensation: compensation(gain),
        })
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl<D: Delay> Filter for AllPass<D> {
    fn process(&mut self, x: f32) -> f32 {
        let g = self.gain;

        let y = (-g * x + self.delay.read()) * self.compensation;

        let feedback = self.delay.read_previous();
        self.delay.write(hard_clip(g * feedback + g * x));
        self.delay.advance();

        hard_clip(y)
    }

    fn len(&self) -> usize {
        self.delay.len()
    }

    fn capacity(&self) -> usize {
        self.delay.capacity()
    }

    fn set_len(&mut self, len: usize) -> Result<(), Error> {
        self.delay.set_len(len)
    }

    fn reset(&mut self) {
        self.delay.clear();
    }
}
