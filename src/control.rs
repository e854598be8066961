//! User facing knobs.
//!
//! Knobs come in as percentages `0..=100`. Anything outside is saturated to the
//! nearest bound with a warning; processing carries on.

/// Normalized control values, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Controls {
    /// Wet share of the output.
    pub dry_wet: f32,
    /// Room size. `None` leaves the delay lengths alone.
    pub room_size: Option<f32>,
}

impl Controls {
    /// Controls from percentages, clamped into range.
    pub fn from_percent(dry_wet: f32, room_size: Option<f32>) -> Self {
        Controls {
            dry_wet: percent_to_ratio("dry/wet", dry_wet),
            room_size: room_size.map(|r| percent_to_ratio("room size", r)),
        }
    }
}

/// Convert a percentage to `[0, 1]`, saturating out of range values.
pub fn percent_to_ratio(name: &str, percent: f32) -> f32 {
    let clamped = clamp_control(name, percent, 100.0);
    clamped / 100.0
}

/// Saturate `value` into `[0, max]`. NaN reads as 0.
pub(crate) fn clamp_control(name: &str, value: f32, max: f32) -> f32 {
    if value.is_nan() {
        log::warn!("{} is NaN, using 0", name);
        0.0
    } else if value > max {
        log::warn!("{} {} > {}, saturating to {}", name, value, max, max);
        max
    } else if value < 0.0 {
        log::warn!("{} {} < 0, saturating to 0", name, value);
        0.0
    } else {
        value
    }
}
