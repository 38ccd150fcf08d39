/// Middle value of three, computed as the sum minus both extremes. Duplicates
/// are fine: exactly one minimum and one maximum are removed.
pub fn median3(a: f32, b: f32, c: f32) -> f32 {
    let lo = a.min(b).min(c);
    let hi = a.max(b).max(c);
    a + b + c - lo - hi
}

/// Median-of-3 filter over the interior of a pitch contour.
///
/// Indices `2..len-1` are replaced by the median of their neighbourhood in the
/// *unfiltered* input. The first two values and the last value are copied
/// through as they are, so contours shorter than four frames come back
/// unchanged.
pub fn smooth(raw: &[f32]) -> Vec<f32> {
    let mut out = raw.to_vec();
    for i in 2..raw.len().saturating_sub(1) {
        out[i] = median3(raw[i - 1], raw[i], raw[i + 1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_three() {
        assert_eq!(median3(5.0, 2.0, 8.0), 5.0);
        assert_eq!(median3(8.0, 5.0, 2.0), 5.0);
        assert_eq!(median3(2.0, 2.0, 9.0), 2.0);
        assert_eq!(median3(9.0, 0.0, 9.0), 9.0);
        assert_eq!(median3(4.0, 4.0, 4.0), 4.0);
    }

    #[test]
    fn short_contours_pass_through() {
        assert!(smooth(&[]).is_empty());
        assert_eq!(smooth(&[3.0]), vec![3.0]);
        assert_eq!(smooth(&[3.0, 0.0]), vec![3.0, 0.0]);
        assert_eq!(smooth(&[1.0, 9.0, 2.0]), vec![1.0, 9.0, 2.0]);
    }

    #[test]
    fn interior_outlier_is_replaced() {
        // indices 2 and 3 are filtered, index 4 is the last one
        assert_eq!(
            smooth(&[1.0, 5.0, 2.0, 8.0, 3.0]),
            vec![1.0, 5.0, 5.0, 3.0, 3.0]
        );
        assert_eq!(smooth(&[7.0, 1.0, 9.0, 2.0]), vec![7.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn leading_and_trailing_frames_are_untouched() {
        // index 1 and the last index are isolated spikes but lie outside the
        // filtered range
        let raw = [100.0, 0.0, 100.0, 100.0, 100.0, 0.0];
        assert_eq!(smooth(&raw), vec![100.0, 0.0, 100.0, 100.0, 100.0, 0.0]);
    }

    #[test]
    fn removes_unvoiced_flip_and_octave_jump() {
        let raw = [0.0, 0.0, 120.0, 0.0, 120.0, 120.0, 240.0, 120.0, 120.0, 0.0];
        assert_eq!(
            smooth(&raw),
            vec![0.0, 0.0, 0.0, 120.0, 120.0, 120.0, 120.0, 120.0, 120.0, 0.0]
        );
    }

    #[test]
    fn reads_from_the_unfiltered_contour() {
        // a cascading filter would turn index 3 into 0 after index 2 changed
        let raw = [0.0, 0.0, 10.0, 0.0, 10.0, 10.0];
        assert_eq!(smooth(&raw), vec![0.0, 0.0, 0.0, 10.0, 10.0, 10.0]);
    }

    #[test]
    fn monotonic_contour_is_unchanged() {
        let raw = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(smooth(&raw), raw.to_vec());
    }

    #[test]
    fn second_pass_is_stable_once_spikes_are_gone() {
        let raw = [0.0, 0.0, 150.0, 150.0, 0.0, 150.0, 150.0, 155.0, 300.0, 160.0, 160.0, 0.0];
        let once = smooth(&raw);
        let twice = smooth(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn second_pass_can_still_change_values() {
        // alternating values are not fixed points of a single pass
        let raw = [0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        let once = smooth(&raw);
        assert_ne!(smooth(&once), once);
    }
}
