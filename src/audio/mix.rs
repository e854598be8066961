use super::hard_clip;

/// A 4 point orthogonal mix of the comb outputs.
///
/// Each output is a signed sum of all inputs, so the four outputs are
/// decorrelated alternatives to straight summation.
///
/// ```text
///              ┌──────────────────┐
/// x1 ────────▶ │  s1 = x1 + x3    │ ─────────▶ A =  s1 + s2
///              │                  │
/// x2 ────────▶ │  s2 = x2 + x4    │ ─────────▶ B = -A
///              │                  │
/// x3 ────────▶ │                  │ ─────────▶ C = -D
///              │                  │
/// x4 ────────▶ │                  │ ─────────▶ D =  s1 - s2
///              └──────────────────┘
/// ```
///
/// The samples are replaced in place by `[A, B, C, D]`. No scaling is applied,
/// the caller clips.
pub fn transform_mix(samples: &mut [f32; 4]) {
    let [x1, x2, x3, x4] = *samples;

    let s1 = x1 + x3;
    let s2 = x2 + x4;

    let a = s1 + s2;
    let d = s1 - s2;

    *samples = [a, -a, -d, d];
}

/// The mix matrix output used by the reverb, `clip(A)`.
pub fn mix_matrix(samples: [f32; 4]) -> f32 {
    let mut mixed = samples;
    transform_mix(&mut mixed);
    hard_clip(mixed[0])
}
