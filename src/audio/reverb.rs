use core::array;

use heapless::Vec;

use super::allpass::AllPass;
use super::comb::FeedForwardComb;
use super::delay::{Delay, HeapDelay};
use super::mix::mix_matrix;
use super::{hard_clip, AudioNode, Filter};
use crate::config::{OutputStage, ReverbConfig, RoomMapping};
use crate::control::{clamp_control, Controls};
use crate::slew::SlewLimiter;
use crate::Error;

/// A rescaled length that didn't fit the delay line and was cut to capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LengthClamp {
    /// Index in processing order, all-passes `0..3` then combs `3..7`.
    pub filter: usize,
    pub requested: usize,
    pub capacity: usize,
}

/// All clamps from one rescale. Seven filters, so it never overflows.
pub type LengthClamps = Vec<LengthClamp, 7>;

/// Schroeder reverb.
///
/// Three all-passes in series diffuse the input, then four feed-forward combs in
/// parallel make the echo density. The comb outputs are summed (or mixed, see
/// [`OutputStage`]) and blended with the dry input.
///
/// The output is mono, duplicated onto both channels.
pub struct SchroederReverb<D = HeapDelay> {
    all_passes: [AllPass<D>; 3],
    combs: [FeedForwardComb<D>; 4],
    /// Lengths before room size scaling.
    base_lengths: [usize; 7],
    room_mapping: RoomMapping,
    output: OutputStage,
    dry_wet: f32,
    room_size: Option<f32>,
    dry_wet_slew: SlewLimiter<f32>,
    room_size_slew: SlewLimiter<f32>,
}

impl<D: Delay> SchroederReverb<D> {
    /// Allocate all delay lines and set up the filters.
    ///
    /// Fails on an invalid configuration or if any delay line can't be allocated.
    /// Nothing is returned in that case, so a half built reverb can't be used.
    pub fn new(config: &ReverbConfig) -> Result<Self, Error> {
        config.validate()?;

        let all_passes = try_array(|i| {
            let stage = config.all_pass[i];
            AllPass::new(D::with_capacity(config.capacity)?, stage.len, stage.gain)
        })?;

        let combs = try_array(|i| {
            let stage = config.combs[i];
            FeedForwardComb::new(D::with_capacity(config.capacity)?, stage.len, stage.gain)
        })?;

        let base_lengths = array::from_fn(|i| {
            if i < 3 {
                config.all_pass[i].len
            } else {
                config.combs[i - 3].len
            }
        });

        let dry_wet = clamp_control("dry/wet", config.dry_wet, 1.0);

        let mut reverb = SchroederReverb {
            all_passes,
            combs,
            base_lengths,
            room_mapping: config.room_mapping,
            output: config.output,
            dry_wet,
            room_size: None,
            dry_wet_slew: SlewLimiter::new(dry_wet, config.slew_step),
            room_size_slew: SlewLimiter::new(config.room_mapping.neutral(), config.slew_step),
        };

        if let Some(room_size) = config.room_size {
            reverb.set_room_size(room_size)?;
        }

        log::debug!(
            "Reverb at {}Hz, capacity {}, lengths {:?}",
            config.sample_rate,
            config.capacity,
            reverb.lengths()
        );

        Ok(reverb)
    }

    /// Process one mono sample.
    pub fn process_mono(&mut self, input: f32) -> f32 {
        let mut diffused = input;
        for all_pass in &mut self.all_passes {
            diffused = all_pass.process(diffused);
        }

        let combed: [f32; 4] = array::from_fn(|i| self.combs[i].process(diffused));

        let wet = match self.output {
            OutputStage::Sum => combed[1..]
                .iter()
                .fold(hard_clip(combed[0]), |acc, c| hard_clip(acc + c)),
            OutputStage::MixMatrix => mix_matrix(combed),
        };

        hard_clip(wet * self.dry_wet + input * (1.0 - self.dry_wet))
    }

    /// Process a block of interleaved samples in place.
    ///
    /// Stereo frames are averaged to mono, and the result is written to both
    /// channels. A block must hold whole frames, otherwise nothing is processed.
    pub fn process_interleaved(
        &mut self,
        samples: &mut [f32],
        channels: usize,
    ) -> Result<(), Error> {
        if channels == 0 || channels > 2 {
            return Err(Error::UnsupportedChannels(channels));
        }
        if samples.len() % channels != 0 {
            return Err(Error::IncompleteFrame {
                len: samples.len(),
                channels,
            });
        }

        match channels {
            1 => {
                for s in samples.iter_mut() {
                    *s = self.process_mono(*s);
                }
            }
            2 => {
                for frame in samples.chunks_exact_mut(2) {
                    let [l, r] = self.process([frame[0], frame[1]]);
                    frame[0] = l;
                    frame[1] = r;
                }
            }
            n => return Err(Error::UnsupportedChannels(n)),
        }

        Ok(())
    }

    /// Set the wet share directly, without slewing.
    pub fn set_dry_wet(&mut self, dry_wet: f32) {
        self.dry_wet = clamp_control("dry/wet", dry_wet, 1.0);
        self.dry_wet_slew.reset(self.dry_wet);
    }

    /// Set the room size directly, without slewing, and rescale the delays.
    pub fn set_room_size(&mut self, room_size: f32) -> Result<LengthClamps, Error> {
        let room_size = clamp_control("room size", room_size, 1.0);
        self.room_size_slew.reset(room_size);
        self.apply_room_size(room_size)
    }

    /// Move the controls towards `controls` by at most one slew step each.
    ///
    /// Meant to be called once per block from the control path. Delays are only
    /// rescaled when the slewed room size actually moved.
    pub fn update_controls(&mut self, controls: Controls) -> Result<LengthClamps, Error> {
        let dry_wet = self.dry_wet_slew.step(controls.dry_wet);
        self.dry_wet = dry_wet.clamp(0.0, 1.0);

        let Some(target) = controls.room_size else {
            return Ok(LengthClamps::new());
        };

        let room_size = self.room_size_slew.step(target).clamp(0.0, 1.0);

        if self.room_size == Some(room_size) {
            return Ok(LengthClamps::new());
        }

        self.apply_room_size(room_size)
    }

    fn apply_room_size(&mut self, room_size: f32) -> Result<LengthClamps, Error> {
        let mut clamps = LengthClamps::new();
        let mapping = self.room_mapping;
        let base_lengths = self.base_lengths;

        for (i, filter) in self.filters_mut().into_iter().enumerate() {
            let requested = mapping.scale(base_lengths[i], room_size);
            let capacity = filter.capacity();

            let len = if requested > capacity {
                log::warn!(
                    "Delay {} length {} exceeds capacity {}, clamping",
                    i,
                    requested,
                    capacity
                );
                // Seven filters, seven slots.
                let _ = clamps.push(LengthClamp {
                    filter: i,
                    requested,
                    capacity,
                });
                capacity
            } else {
                requested
            };

            filter.set_len(len)?;
        }

        self.room_size = Some(room_size);

        log::debug!("Room size {}, lengths {:?}", room_size, self.lengths());

        Ok(clamps)
    }

    fn filters_mut(&mut self) -> [&mut dyn Filter; 7] {
        let [a1, a2, a3] = &mut self.all_passes;
        let [c1, c2, c3, c4] = &mut self.combs;
        [a1, a2, a3, c1, c2, c3, c4]
    }

    /// Current delay lengths, all-passes then combs.
    pub fn lengths(&self) -> [usize; 7] {
        array::from_fn(|i| {
            if i < 3 {
                self.all_passes[i].len()
            } else {
                self.combs[i - 3].len()
            }
        })
    }

    pub fn dry_wet(&self) -> f32 {
        self.dry_wet
    }

    /// Applied room size, `None` if never set.
    pub fn room_size(&self) -> Option<f32> {
        self.room_size
    }

    /// Silence all delay lines. Lengths and controls are kept.
    pub fn reset(&mut self) {
        for filter in self.filters_mut() {
            filter.reset();
        }
    }

    /// Tear down, releasing the delay lines.
    pub fn release(self) {
        log::debug!("Releasing reverb delay lines");
    }
}

impl<D: Delay> AudioNode<2> for SchroederReverb<D> {
    fn process(&mut self, input: [f32; 2]) -> [f32; 2] {
        let mono = (input[0] + input[1]) * 0.5;
        let out = self.process_mono(mono);
        [out, out]
    }
}

impl<D: Delay> AudioNode<1> for SchroederReverb<D> {
    fn process(&mut self, input: [f32; 1]) -> [f32; 1] {
        [self.process_mono(input[0])]
    }
}

/// `array::from_fn` for fallible constructors.
fn try_array<T, const N: usize>(
    mut f: impl FnMut(usize) -> Result<T, Error>,
) -> Result<[T; N], Error> {
    let mut v: Vec<T, N> = Vec::new();

    for i in 0..N {
        if v.push(f(i)?).is_err() {
            unreachable!("N pushes into capacity N");
        }
    }

    match v.into_array() {
        Ok(a) => Ok(a),
        Err(_) => unreachable!("vector is full"),
    }
}
