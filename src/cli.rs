use clap::Parser;
use std::path::PathBuf;

use crate::pitch::analyzer::{
    WindowKind, DEFAULT_MAX_F0, DEFAULT_MIN_F0, DEFAULT_POTH, DEFAULT_U1NORM, DEFAULT_UMAXNORM,
};

#[derive(Parser, Debug)]
#[command(name = "pitchline", version, about = "Pitch (f0) contour estimator for mono recordings")]
pub struct Cli {
    /// Wave file with the audio signal
    pub input: PathBuf,

    /// Output text file: one estimated f0 per frame (0 when unvoiced),
    /// framed by a 0 for t=0 and a 0 for the end of the recording
    pub output: PathBuf,

    /// Long-term autocorrelation threshold (r[lag]/r[0])
    #[arg(short = 'm', long, default_value_t = DEFAULT_UMAXNORM)]
    pub umaxnorm: f32,

    /// Short-term autocorrelation threshold (r[1]/r[0])
    #[arg(short = 'u', long, default_value_t = DEFAULT_U1NORM)]
    pub u1norm: f32,

    /// Power threshold in dB
    #[arg(short = 'p', long, default_value_t = DEFAULT_POTH, allow_negative_numbers = true)]
    pub poth: f32,

    /// Analysis window applied to each frame [default: hamming]
    #[arg(long, value_enum)]
    pub window: Option<WindowKind>,

    /// Lowest candidate pitch in Hz
    #[arg(long, default_value_t = DEFAULT_MIN_F0)]
    pub min_f0: f32,

    /// Highest candidate pitch in Hz
    #[arg(long, default_value_t = DEFAULT_MAX_F0)]
    pub max_f0: f32,

    /// Config file (defaults to ./pitchline.toml or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the median-of-3 postprocessing
    #[arg(long)]
    pub no_median: bool,

    /// Estimate frames on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["pitchline", "in.wav", "out.f0"]);
        assert_eq!(cli.input, PathBuf::from("in.wav"));
        assert_eq!(cli.output, PathBuf::from("out.f0"));
        assert_eq!(cli.umaxnorm, 0.5);
        assert_eq!(cli.u1norm, 0.4);
        assert_eq!(cli.poth, -16.0);
        assert_eq!(cli.window, None);
        assert!(!cli.no_median);
        assert!(!cli.sequential);
    }

    #[test]
    fn thresholds_and_negative_power() {
        let cli = Cli::parse_from([
            "pitchline", "-m", "0.6", "-u", "0.3", "-p", "-30", "--window", "rectangular",
            "in.wav", "out.f0",
        ]);
        assert_eq!(cli.umaxnorm, 0.6);
        assert_eq!(cli.u1norm, 0.3);
        assert_eq!(cli.poth, -30.0);
        assert_eq!(cli.window, Some(WindowKind::Rectangular));
    }

    #[test]
    fn both_paths_are_required() {
        assert!(Cli::try_parse_from(["pitchline", "in.wav"]).is_err());
    }
}
