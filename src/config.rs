//! Reverb configuration.
//!
//! Lengths are tuned for 48kHz. [`ReverbConfig::for_sample_rate`] scales them,
//! and the delay capacity, to another rate.

use gcd::Gcd;

use micromath::F32Ext;

use crate::audio::check_gain;
use crate::Error;

/// Sample rate the default lengths are tuned for.
pub const REFERENCE_SAMPLE_RATE: u32 = 48_000;

/// Longest reverb a delay line can hold.
pub const MAX_DELAY_SECS: usize = 2;

pub const ALL_PASS_LENGTHS: [usize; 3] = [347, 113, 37];
pub const ALL_PASS_GAINS: [f32; 3] = [0.7, 0.7, 0.7];

pub const COMB_LENGTHS: [usize; 4] = [1687, 1601, 2053, 2251];
pub const COMB_GAINS: [f32; 4] = [0.773, 0.802, 0.753, 0.733];

/// Max change of a normalized control per update.
pub const SLEW_STEP: f32 = 0.1;

/// Length and gain of one filter stage.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stage {
    /// Delay length in samples.
    pub len: usize,
    /// Gain in `[0, 1)`.
    pub gain: f32,
}

/// How the room size control maps onto the delay lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoomMapping {
    /// `base · e^(2.9·room)`, from 1x up to about 18x.
    #[default]
    Exponential,
    /// `base · 4 · room`, from nothing up to 4x.
    Linear,
}

impl RoomMapping {
    /// Room size that leaves the base lengths unchanged.
    pub fn neutral(&self) -> f32 {
        match self {
            RoomMapping::Exponential => 0.0,
            RoomMapping::Linear => 0.25,
        }
    }

    /// Scale a base length by room size (`[0, 1]`). Never below one sample.
    ///
    /// Always uses the micromath `exp`, so `std` and `no_std` builds agree on
    /// the lengths.
    pub fn scale(&self, base: usize, room_size: f32) -> usize {
        let factor = match self {
            RoomMapping::Exponential => F32Ext::exp(2.9 * room_size),
            RoomMapping::Linear => room_size * 4.0,
        };

        ((base as f32 * factor) as usize).max(1)
    }
}

/// What feeds the comb outputs into the dry/wet blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputStage {
    /// Running clipped sum of the four combs.
    #[default]
    Sum,
    /// The `A` output of the mix matrix.
    MixMatrix,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReverbConfig {
    pub sample_rate: u32,
    /// Samples allocated per delay line.
    pub capacity: usize,
    pub all_pass: [Stage; 3],
    pub combs: [Stage; 4],
    /// Initial wet share, `[0, 1]`.
    pub dry_wet: f32,
    /// Initial room size, `[0, 1]`. `None` keeps the configured lengths.
    pub room_size: Option<f32>,
    pub room_mapping: RoomMapping,
    pub output: OutputStage,
    /// Step for the control slew limiters.
    pub slew_step: f32,
}

impl Default for ReverbConfig {
    fn default() -> Self {
        ReverbConfig {
            sample_rate: REFERENCE_SAMPLE_RATE,
            capacity: MAX_DELAY_SECS * REFERENCE_SAMPLE_RATE as usize,
            all_pass: stages(ALL_PASS_LENGTHS, ALL_PASS_GAINS),
            combs: stages(COMB_LENGTHS, COMB_GAINS),
            dry_wet: 0.0,
            room_size: None,
            room_mapping: RoomMapping::default(),
            output: OutputStage::default(),
            slew_step: SLEW_STEP,
        }
    }
}

fn stages<const C: usize>(lengths: [usize; C], gains: [f32; C]) -> [Stage; C] {
    core::array::from_fn(|i| Stage {
        len: lengths[i],
        gain: gains[i],
    })
}

impl ReverbConfig {
    /// Default configuration with lengths and capacity scaled to `sample_rate`.
    pub fn for_sample_rate(sample_rate: u32) -> Self {
        let mut config = ReverbConfig::default();

        config.sample_rate = sample_rate;
        config.capacity = MAX_DELAY_SECS * sample_rate as usize;

        for stage in config.all_pass.iter_mut().chain(config.combs.iter_mut()) {
            stage.len = rescale_rate(stage.len, sample_rate);
        }

        config
    }

    pub fn with_dry_wet(mut self, dry_wet: f32) -> Self {
        self.dry_wet = dry_wet;
        self
    }

    pub fn with_room_size(mut self, room_size: Option<f32>) -> Self {
        self.room_size = room_size;
        self
    }

    pub fn with_room_mapping(mut self, room_mapping: RoomMapping) -> Self {
        self.room_mapping = room_mapping;
        self
    }

    pub fn with_output(mut self, output: OutputStage) -> Self {
        self.output = output;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Check stage lengths and gains, and the slew step.
    ///
    /// Control values are not checked here, they are saturated when applied.
    pub fn validate(&self) -> Result<(), Error> {
        if self.capacity == 0 {
            return Err(Error::ZeroLength);
        }

        for stage in self.all_pass.iter().chain(self.combs.iter()) {
            check_gain(stage.gain)?;

            if stage.len == 0 {
                return Err(Error::ZeroLength);
            }
            if stage.len > self.capacity {
                return Err(Error::CapacityExceeded {
                    len: stage.len,
                    capacity: self.capacity,
                });
            }
        }

        if self.slew_step.is_nan() || self.slew_step <= 0.0 {
            return Err(Error::InvalidSlewStep(self.slew_step));
        }

        Ok(())
    }
}

/// Scale a length tuned at the reference rate to `sample_rate`, rounding down.
pub fn rescale_rate(len: usize, sample_rate: u32) -> usize {
    let g = sample_rate.gcd(REFERENCE_SAMPLE_RATE);
    let nom = (sample_rate / g) as u64;
    let denom = (REFERENCE_SAMPLE_RATE / g) as u64;

    ((len as u64 * nom) / denom).max(1) as usize
}
