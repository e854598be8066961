//! Helpers shared by the tests.

use core::num::Wrapping as w;

/// Samples are in PCM scale, so a hundredth is well below one LSB.
const TOLERANCE: f32 = 0.01;

/// Tolerant sample comparison for results that went through `exp` and friends.
#[derive(Debug, Clone, Copy)]
pub struct SampleCmp(pub f32);

fn eq(a: f32, b: f32) -> bool {
    (a - b).abs() < TOLERANCE
}

impl PartialEq for SampleCmp {
    fn eq(&self, other: &Self) -> bool {
        eq(self.0, other.0)
    }
}

impl PartialEq<f32> for SampleCmp {
    fn eq(&self, other: &f32) -> bool {
        eq(self.0, *other)
    }
}

/// Deterministic noise source, a 32-bit variant on the 63-bit Thrust PRNG.
#[derive(Debug)]
pub struct Noise(u32);

impl Noise {
    pub fn new(seed: u32) -> Self {
        Noise(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut z = w(self.0) + w(0x6D2B79F5);
        self.0 = z.0;
        z = (z ^ (z >> 15)) * (z | w(1));
        z ^= z + (z ^ (z >> 7)) * (z | w(61));
        (z ^ (z >> 14)).0
    }

    /// Uniform sample in `[-amplitude, amplitude]`.
    pub fn next_sample(&mut self, amplitude: f32) -> f32 {
        let unit = self.next_u32() as f32 / u32::MAX as f32;
        (unit * 2.0 - 1.0) * amplitude
    }
}

#[test]
fn noise_is_bounded_and_repeatable() {
    let mut a = Noise::new(3);
    let mut b = Noise::new(3);

    for _ in 0..1000 {
        let x = a.next_sample(100.0);
        assert!(x.abs() <= 100.0);
        assert_eq!(x.to_bits(), b.next_sample(100.0).to_bits());
    }
}
