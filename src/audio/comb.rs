use super::delay::Delay;
use super::{check_gain, hard_clip, Filter};
use crate::Error;

/// Feed-forward (FIR) comb filter.
///
/// Stores the unprocessed input, so each input comes back exactly once as an
/// echo `len` samples later.
///
/// ```text
/// y    = clip(g·x + g·s[i])
/// s[i] = x
/// ```
pub struct FeedForwardComb<D> {
    delay: D,
    gain: f32,
}

impl<D: Delay> FeedForwardComb<D> {
    pub fn new(mut delay: D, len: usize, gain: f32) -> Result<Self, Error> {
        let gain = check_gain(gain)?;
        delay.set_len(len)?;

        Ok(FeedForwardComb { delay, gain })
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl<D: Delay> Filter for FeedForwardComb<D> {
    fn process(&mut self, x: f32) -> f32 {
        let y = self.gain * x + self.gain * self.delay.read();

        self.delay.write(x);
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

/// Feed-backward (IIR) comb filter.
///
/// Recirculates its own output, giving a train of echoes decaying by `g` each
/// round trip. Not part of the default reverb but usable for other topologies.
///
/// ```text
/// y    = clip(x + g·s[i])
/// s[i] = y
/// ```
pub struct FeedBackComb<D> {
    delay: D,
    gain: f32,
}

impl<D: Delay> FeedBackComb<D> {
    pub fn new(mut delay: D, len: usize, gain: f32) -> Result<Self, Error> {
        let gain = check_gain(gain)?;
        delay.set_len(len)?;

        Ok(FeedBackComb { delay, gain })
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl<D: Delay> Filter for FeedBackComb<D> {
    fn process(&mut self, x: f32) -> f32 {
        let y = hard_clip(x + self.gain * self.delay.read());

        self.delay.write(y);
        self.delay.advance();

        y
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
