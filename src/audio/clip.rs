/// Fraction of the peak magnitude below which samples are gated to zero.
pub const CLIP_RATIO: f32 = 0.027;

/// Central clipping as a hard gate: every sample whose magnitude is below
/// `ratio * peak` is set to zero, louder samples pass through untouched.
///
/// The threshold is taken from the whole signal once. Returns it so callers
/// can report it.
pub fn clip(samples: &mut [f32], ratio: f32) -> f32 {
    let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
    let threshold = ratio * peak;

    for sample in samples.iter_mut() {
        if sample.abs() < threshold {
            *sample = 0.0;
        }
    }

    threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gates_low_samples_and_keeps_loud_ones() {
        let original = vec![1.0, -0.02, 0.5, 0.027, -0.03, 0.0, -1.0];
        let mut samples = original.clone();
        let threshold = clip(&mut samples, CLIP_RATIO);

        assert!((threshold - 0.027).abs() < 1e-7);
        assert_eq!(samples.len(), original.len());
        assert_eq!(samples[0], 1.0);
        assert_eq!(samples[1], 0.0);
        assert_eq!(samples[2], 0.5);
        assert_eq!(samples[4], -0.03);
        assert_eq!(samples[6], -1.0);
    }

    #[test]
    fn surviving_samples_are_not_shifted() {
        let mut samples = vec![0.2, -0.8, 0.4];
        clip(&mut samples, 0.3);
        // threshold = 0.24: 0.2 is gated, the others keep their exact value
        assert_eq!(samples, vec![0.0, -0.8, 0.4]);
    }

    #[test]
    fn peak_uses_magnitude() {
        let mut samples = vec![0.01, -2.0, 0.05];
        let threshold = clip(&mut samples, CLIP_RATIO);
        assert!((threshold - 0.054).abs() < 1e-6);
        assert_eq!(samples, vec![0.0, -2.0, 0.0]);
    }

    #[test]
    fn gate_properties_hold_for_every_sample() {
        let original: Vec<f32> = (0..500)
            .map(|i| ((i as f32) * 0.37).sin() * (i as f32 / 500.0))
            .collect();
        let peak = original.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
        let mut samples = original.clone();
        clip(&mut samples, CLIP_RATIO);

        for (after, before) in samples.iter().zip(&original) {
            if *after != 0.0 {
                assert_eq!(after, before);
                assert!(after.abs() >= CLIP_RATIO * peak);
            } else if *before != 0.0 {
                assert!(before.abs() < CLIP_RATIO * peak);
            }
        }
    }

    #[test]
    fn silence_is_left_alone() {
        let mut samples = vec![0.0; 64];
        assert_eq!(clip(&mut samples, CLIP_RATIO), 0.0);
        assert!(samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn single_sample_survives() {
        let mut samples = vec![-0.3];
        clip(&mut samples, CLIP_RATIO);
        assert_eq!(samples, vec![-0.3]);
    }

    #[test]
    fn empty_signal() {
        let mut samples: Vec<f32> = Vec::new();
        assert_eq!(clip(&mut samples, CLIP_RATIO), 0.0);
    }
}
