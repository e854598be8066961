//! Step limiting of control values.
//!
//! Knob readings jump around and move in big leaps. Feeding them straight into
//! the delay lengths or the mix gives clicks, so the applied value only moves by
//! a fixed step per update.
//!
//! The rules are not symmetric. For a non-negative target:
//!
//! * increase by `range` once the target reaches `held + range`
//! * decrease by `range` as soon as the target is below `held`
//!
//! For a negative target both directions are gated by `range`:
//!
//! * decrease by `range` once the target reaches `held - range`
//! * increase by `range` once the target reaches `held + range`
//!
//! So going down a non-negative range can end up to one step below the target,
//! while going up always stops short of it by less than one step.

use core::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlewLimiter<T> {
    held: T,
    range: T,
}

impl<T> SlewLimiter<T>
where
    T: Copy + PartialOrd + Default + Add<Output = T> + Sub<Output = T>,
{
    /// Creates a limiter holding `initial`, moving `range` per step.
    pub fn new(initial: T, range: T) -> Self {
        SlewLimiter {
            held: initial,
            range,
        }
    }

    /// Move the held value towards `target` and return it.
    pub fn step(&mut self, target: T) -> T {
        let zero = T::default();

        if target < zero {
            if target <= self.held - self.range {
                self.held = self.held - self.range;
            } else if target >= self.held + self.range {
                self.held = self.held + self.range;
            }
        } else if target >= self.held + self.range {
            self.held = self.held + self.range;
        } else if target < self.held {
            self.held = self.held - self.range;
        }

        self.held
    }

    pub fn held(&self) -> T {
        self.held
    }

    pub fn range(&self) -> T {
        self.range
    }

    /// Jump straight to `value`.
    pub fn reset(&mut self, value: T) {
        self.held = value;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn converges_upwards() {
        let mut s = SlewLimiter::new(0.0_f32, 0.25);

        assert_eq!(s.step(0.75), 0.25);
        assert_eq!(s.step(0.75), 0.5);
        assert_eq!(s.step(0.75), 0.75);

        // Settled
        for _ in 0..10 {
            assert_eq!(s.step(0.75), 0.75);
        }
    }

    #[test]
    fn converges_downwards_with_overshoot() {
        let mut s = SlewLimiter::new(1.0_f32, 0.25);

        // ceil(0.7 / 0.25) = 3 steps
        assert_eq!(s.step(0.3), 0.75);
        assert_eq!(s.step(0.3), 0.5);
        assert_eq!(s.step(0.3), 0.25);

        // Below target, but less than a step away so nothing more happens.
        for _ in 0..10 {
            assert_eq!(s.step(0.3), 0.25);
        }
    }

    #[test]
    fn converges_within_bound() {
        let range = 0.125_f32;

        let cases: [(f32, f32); 4] = [(0.0, 1.0), (1.0, 0.0), (0.5, 0.875), (0.875, 0.0625)];

        for (initial, target) in cases {
            let mut s = SlewLimiter::new(initial, range);
            let steps = (target - initial).abs() / range;
            let steps = steps.ceil() as usize;

            for _ in 0..steps {
                s.step(target);
            }
            let settled = s.held();

            assert!((settled - target).abs() <= range, "{} -> {}", initial, target);

            // Never moves further once settled.
            for _ in 0..5 {
                assert_eq!(s.step(target), settled);
            }
        }
    }

    #[test]
    fn small_decrease_not_gated() {
        let mut s = SlewLimiter::new(0.5_f32, 0.25);

        // Just below held, still takes a full step down.
        assert_eq!(s.step(0.45), 0.25);

        // Just above held but inside the range, no change.
        let mut s = SlewLimiter::new(0.5_f32, 0.25);
        assert_eq!(s.step(0.7), 0.5);
    }

    #[test]
    fn negative_target_gated_both_ways() {
        let mut s = SlewLimiter::new(0.0_f32, 0.25);

        assert_eq!(s.step(-0.6), -0.25);
        assert_eq!(s.step(-0.6), -0.5);
        assert_eq!(s.step(-0.6), -0.5);

        // Slightly above held but within range: no change.
        assert_eq!(s.step(-0.4), -0.5);

        // Far enough above: step up.
        assert_eq!(s.step(-0.1), -0.25);
    }

    #[test]
    fn integer_values() {
        let mut s = SlewLimiter::new(0_i32, 10);

        assert_eq!(s.step(35), 10);
        assert_eq!(s.step(35), 20);
        assert_eq!(s.step(35), 30);
        assert_eq!(s.step(35), 30);

        assert_eq!(s.step(29), 20);
        assert_eq!(s.step(-25), 10);
        assert_eq!(s.step(-25), 0);
        assert_eq!(s.step(-25), -10);
        assert_eq!(s.step(-25), -20);
        assert_eq!(s.step(-25), -20);
    }

    #[test]
    fn reset_jumps() {
        let mut s = SlewLimiter::new(0.0_f32, 0.1);
        s.reset(0.9);
        assert_eq!(s.held(), 0.9);
        assert_eq!(s.range(), 0.1);
    }
}
