pub mod analyzer;

/// Per-frame fundamental frequency estimation.
///
/// Implementations receive one fixed-length window of samples and return the
/// estimated f0 in Hz, or `0.0` when the frame is judged unvoiced. Any
/// analysis context (sample rate, thresholds, window) is fixed when the
/// estimator is built, so repeated calls on the same frame agree.
pub trait PitchEstimator: Send + Sync {
    fn estimate(&self, frame: &[f32]) -> f32;
}

impl<F> PitchEstimator for F
where
    F: Fn(&[f32]) -> f32 + Send + Sync,
{
    fn estimate(&self, frame: &[f32]) -> f32 {
        self(frame)
    }
}
