//! Decibel helpers for gain computation

/// Convert decibels to linear gain factor
///
/// Linear gain multiplier (1.0 = unity, 2.0 = +6dB, 0.5 = -6dB)
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert linear gain factor to decibels
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    20.0 * linear.log10()
}

/// Gain in dB needed to move `measured_lufs` to `target_lufs`
///
/// Positive = boost, negative = cut.
#[inline]
pub fn gain_for_target(measured_lufs: f64, target_lufs: f64) -> f64 {
    target_lufs - measured_lufs
}
