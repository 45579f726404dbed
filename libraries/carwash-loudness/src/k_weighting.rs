//! K-weighting pre-filter (ITU-R BS.1770)
//!
//! Two cascaded second-order sections: a high-frequency shelf (+4 dB above
//! roughly 1.5 kHz, modelling the acoustic effect of the head) followed by a
//! ~38 Hz high-pass (the "RLB" curve). Coefficients are derived from the
//! analogue prototype for the requested sample rate, which reproduces the
//! published 48 kHz table to within 1e-6.

use std::f64::consts::PI;

/// Shelf stage centre frequency (Hz)
const SHELF_F0: f64 = 1681.974450955533;
/// Shelf stage gain (dB)
const SHELF_GAIN_DB: f64 = 3.999843853973347;
/// Shelf stage quality factor
const SHELF_Q: f64 = 0.7071752369554196;
/// Exponent relating the shelf's band gain to its high-frequency gain
const SHELF_VB_EXPONENT: f64 = 0.4996667741545416;

/// High-pass stage corner frequency (Hz)
const HIGHPASS_F0: f64 = 38.13547087602444;
/// High-pass stage quality factor
const HIGHPASS_Q: f64 = 0.5003270373238773;

/// Normalised biquad (a0 = 1), transposed direct form II
#[derive(Debug, Clone, Copy, PartialEq)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    z1: f64,
    z2: f64,
}

impl Biquad {
    fn new(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0,
            b1,
            b2,
            a1,
            a2,
            z1: 0.0,
            z2: 0.0,
        }
    }

    #[inline]
    fn process(&mut self, x: f64) -> f64 {
        let y = self.b0 * x + self.z1;
        self.z1 = self.b1 * x - self.a1 * y + self.z2;
        self.z2 = self.b2 * x - self.a2 * y;
        y
    }

    fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}

/// K-weighting filter for a single channel
///
/// Stateful: feed samples in order with [`process`](Self::process). Build one
/// per channel; a fresh filter starts from silence.
#[derive(Debug, Clone, PartialEq)]
pub struct KWeightingFilter {
    shelf: Biquad,
    highpass: Biquad,
}

impl KWeightingFilter {
    /// Design the filter pair for `sample_rate` Hz
    pub fn new(sample_rate: u32) -> Self {
        let rate = f64::from(sample_rate);

        // Stage 1: high shelf
        let k = (PI * SHELF_F0 / rate).tan();
        let vh = 10.0_f64.powf(SHELF_GAIN_DB / 20.0);
        let vb = vh.powf(SHELF_VB_EXPONENT);
        let a0 = 1.0 + k / SHELF_Q + k * k;
        let shelf = Biquad::new(
            (vh + vb * k / SHELF_Q + k * k) / a0,
            2.0 * (k * k - vh) / a0,
            (vh - vb * k / SHELF_Q + k * k) / a0,
            2.0 * (k * k - 1.0) / a0,
            (1.0 - k / SHELF_Q + k * k) / a0,
        );

        // Stage 2: high-pass, numerator fixed at (1, -2, 1)
        let k = (PI * HIGHPASS_F0 / rate).tan();
        let a0 = 1.0 + k / HIGHPASS_Q + k * k;
        let highpass = Biquad::new(
            1.0,
            -2.0,
            1.0,
            2.0 * (k * k - 1.0) / a0,
            (1.0 - k / HIGHPASS_Q + k * k) / a0,
        );

        Self { shelf, highpass }
    }

    /// Filter one sample
    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        self.highpass.process(self.shelf.process(x))
    }

    /// Clear filter memory
    pub fn reset(&mut self) {
        self.shelf.reset();
        self.highpass.reset();
    }
}
