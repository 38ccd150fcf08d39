use std::path::Path;

use crate::error::PitchError;

/// Render a contour as text: a leading `0` for t=0, one value per frame, and a
/// trailing `0` for the end of the recording.
pub fn render_contour(contour: &[f32]) -> String {
    let mut text = String::with_capacity((contour.len() + 2) * 8);
    text.push_str("0\n");
    for f0 in contour {
        text.push_str(&f0.to_string());
        text.push('\n');
    }
    text.push_str("0\n");
    text
}

/// Write the rendered contour to `path` in one go.
pub fn save_contour(path: &Path, contour: &[f32]) -> Result<(), PitchError> {
    let text = render_contour(contour);
    std::fs::write(path, text).map_err(|source| PitchError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Wrote {} lines to {}", contour.len() + 2, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_contour_is_two_zeros() {
        assert_eq!(render_contour(&[]), "0\n0\n");
    }

    #[test]
    fn values_are_framed_by_zeros() {
        let text = render_contour(&[0.0, 200.0, 133.33333, 0.0]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["0", "0", "200", "133.33333", "0", "0"]);
    }

    #[test]
    fn line_count_is_len_plus_two() {
        let contour: Vec<f32> = (0..37).map(|i| i as f32 * 2.5).collect();
        assert_eq!(render_contour(&contour).lines().count(), 39);
    }

    #[test]
    fn saves_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f0.txt");
        save_contour(&path, &[150.0, 0.0]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0\n150\n0\n0\n");
    }

    #[test]
    fn unwritable_destination_is_an_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("f0.txt");
        let err = save_contour(&path, &[100.0]).unwrap_err();
        assert!(matches!(err, PitchError::Output { .. }));
        assert_eq!(err.exit_code(), 253);
    }
}
