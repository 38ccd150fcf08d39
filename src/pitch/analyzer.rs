use rustfft::{num_complex::Complex, Fft, FftPlanner};
use serde::Deserialize;
use std::sync::Arc;

use super::PitchEstimator;

pub const DEFAULT_UMAXNORM: f32 = 0.5;
pub const DEFAULT_U1NORM: f32 = 0.4;
pub const DEFAULT_POTH: f32 = -16.0;
pub const DEFAULT_MIN_F0: f32 = 50.0;
pub const DEFAULT_MAX_F0: f32 = 500.0;

/// Autocorrelation value substituted for an all-zero frame, so the
/// normalised ratios stay finite.
const MIN_POWER: f32 = 1e-10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WindowKind {
    Rectangular,
    #[default]
    Hamming,
}

impl WindowKind {
    pub fn coefficients(self, size: usize) -> Vec<f32> {
        match self {
            WindowKind::Rectangular => vec![1.0; size],
            WindowKind::Hamming if size < 2 => vec![1.0; size],
            WindowKind::Hamming => (0..size)
                .map(|i| {
                    0.54 - 0.46
                        * (2.0 * std::f32::consts::PI * i as f32 / (size - 1) as f32).cos()
                })
                .collect(),
        }
    }
}

/// Voicing thresholds and candidate range for [`PitchAnalyzer`].
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzerSettings {
    pub window: WindowKind,
    /// Minimum `r[lag] / r[0]` at the chosen pitch lag.
    pub umaxnorm: f32,
    /// Minimum `r[1] / r[0]`.
    pub u1norm: f32,
    /// Minimum frame power in dB.
    pub poth: f32,
    pub min_f0: f32,
    pub max_f0: f32,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            window: WindowKind::default(),
            umaxnorm: DEFAULT_UMAXNORM,
            u1norm: DEFAULT_U1NORM,
            poth: DEFAULT_POTH,
            min_f0: DEFAULT_MIN_F0,
            max_f0: DEFAULT_MAX_F0,
        }
    }
}

/// Autocorrelation pitch estimator for frames of one fixed length.
pub struct PitchAnalyzer {
    frame_len: usize,
    sample_rate: u32,
    settings: AnalyzerSettings,
    window: Vec<f32>,
    lag_min: usize,
    lag_max: usize,
    fft_len: usize,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
}

impl PitchAnalyzer {
    pub fn new(frame_len: usize, sample_rate: u32, settings: &AnalyzerSettings) -> Self {
        let rate = sample_rate as f32;
        let lag_min = ((rate / settings.max_f0) as usize).max(2);
        let lag_max = ((rate / settings.min_f0) as usize)
            .saturating_add(1)
            .min(frame_len / 2);

        // Zero padding to at least 2N keeps the circular correlation from
        // wrapping into the lags we read.
        let fft_len = frame_len.saturating_mul(2).max(2).next_power_of_two();
        let mut planner = FftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(fft_len);
        let inverse = planner.plan_fft_inverse(fft_len);

        log::debug!(
            "Pitch analyzer: frame={} fft={} lags=[{}, {}) window={:?}",
            frame_len,
            fft_len,
            lag_min,
            lag_max,
            settings.window
        );

        Self {
            frame_len,
            sample_rate,
            settings: settings.clone(),
            window: settings.window.coefficients(frame_len),
            lag_min,
            lag_max,
            fft_len,
            forward,
            inverse,
        }
    }

    /// Normalised autocorrelation `r[l] = 1/N * sum x[n] x[n-l]` of the
    /// windowed frame, for `l` in `0..lags`.
    fn autocorrelation(&self, frame: &[f32], lags: usize) -> Vec<f32> {
        let mut buffer = vec![Complex::new(0.0f32, 0.0); self.fft_len];
        for ((slot, &x), &w) in buffer.iter_mut().zip(frame).zip(&self.window) {
            slot.re = x * w;
        }

        self.forward.process(&mut buffer);
        for c in buffer.iter_mut() {
            *c = Complex::new(c.norm_sqr(), 0.0);
        }
        self.inverse.process(&mut buffer);

        let scale = 1.0 / (self.fft_len as f32 * self.frame_len as f32);
        let mut r: Vec<f32> = buffer[..lags].iter().map(|c| c.re * scale).collect();
        if r[0] <= 0.0 {
            r[0] = MIN_POWER;
        }
        r
    }

    fn is_voiced(&self, pot: f32, r1norm: f32, rmaxnorm: f32) -> bool {
        pot >= self.settings.poth
            && r1norm >= self.settings.u1norm
            && rmaxnorm >= self.settings.umaxnorm
    }
}

impl PitchEstimator for PitchAnalyzer {
    fn estimate(&self, frame: &[f32]) -> f32 {
        if frame.len() != self.frame_len || self.lag_max <= self.lag_min {
            return 0.0;
        }

        let r = self.autocorrelation(frame, self.lag_max);

        let mut lag = self.lag_min;
        for l in self.lag_min + 1..self.lag_max {
            if r[l] > r[lag] {
                lag = l;
            }
        }

        let pot = 10.0 * r[0].log10();
        let r1norm = r[1] / r[0];
        let rmaxnorm = r[lag] / r[0];

        if self.is_voiced(pot, r1norm, rmaxnorm) {
            self.sample_rate as f32 / lag as f32
        } else {
            0.0
        }
    }
}
