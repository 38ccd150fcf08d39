use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::audio::clip::CLIP_RATIO;
use crate::audio::frames::{FRAME_LEN_SEC, FRAME_SHIFT_SEC};
use crate::cli::Cli;
use crate::error::PitchError;
use crate::pipeline::PipelineConfig;
use crate::pitch::analyzer::{
    AnalyzerSettings, WindowKind, DEFAULT_MAX_F0, DEFAULT_MIN_F0, DEFAULT_POTH, DEFAULT_U1NORM,
    DEFAULT_UMAXNORM,
};

/// Longest accepted frame length or shift, in seconds.
const MAX_FRAME_SEC: f64 = 1.0;
/// Lowest accepted candidate pitch, in Hz.
const MIN_F0_FLOOR: f32 = 1.0;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub estimator: EstimatorConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_frame_len")]
    pub frame_len: f64,
    #[serde(default = "default_frame_shift")]
    pub frame_shift: f64,
    #[serde(default = "default_clip_ratio")]
    pub clip_ratio: f32,
    #[serde(default = "default_median_filter")]
    pub median_filter: bool,
}

#[derive(Debug, Deserialize)]
pub struct EstimatorConfig {
    #[serde(default = "default_umaxnorm")]
    pub umaxnorm: f32,
    #[serde(default = "default_u1norm")]
    pub u1norm: f32,
    #[serde(default = "default_poth")]
    pub poth: f32,
    #[serde(default = "default_min_f0")]
    pub min_f0: f32,
    #[serde(default = "default_max_f0")]
    pub max_f0: f32,
    #[serde(default)]
    pub window: WindowKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_len: default_frame_len(),
            frame_shift: default_frame_shift(),
            clip_ratio: default_clip_ratio(),
            median_filter: default_median_filter(),
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            umaxnorm: default_umaxnorm(),
            u1norm: default_u1norm(),
            poth: default_poth(),
            min_f0: default_min_f0(),
            max_f0: default_max_f0(),
            window: WindowKind::default(),
        }
    }
}

fn default_frame_len() -> f64 { FRAME_LEN_SEC }
fn default_frame_shift() -> f64 { FRAME_SHIFT_SEC }
fn default_clip_ratio() -> f32 { CLIP_RATIO }
fn default_median_filter() -> bool { true }
fn default_umaxnorm() -> f32 { DEFAULT_UMAXNORM }
fn default_u1norm() -> f32 { DEFAULT_U1NORM }
fn default_poth() -> f32 { DEFAULT_POTH }
fn default_min_f0() -> f32 { DEFAULT_MIN_F0 }
fn default_max_f0() -> f32 { DEFAULT_MAX_F0 }

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Explicit path first, then `pitchline.toml` in the working directory, then
/// the per-user config locations.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from("pitchline.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("pitchline").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("pitchline").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

/// Merge command line and config file into validated run settings. A config
/// value applies only where the command line was left at its default.
pub fn resolve(
    cli: &Cli,
    file: Option<Config>,
) -> std::result::Result<(PipelineConfig, AnalyzerSettings), PitchError> {
    let file = file.unwrap_or_default();

    let mut settings = AnalyzerSettings {
        window: cli.window.unwrap_or(file.estimator.window),
        umaxnorm: cli.umaxnorm,
        u1norm: cli.u1norm,
        poth: cli.poth,
        min_f0: cli.min_f0,
        max_f0: cli.max_f0,
    };
    if cli.umaxnorm == DEFAULT_UMAXNORM { settings.umaxnorm = file.estimator.umaxnorm; }
    if cli.u1norm == DEFAULT_U1NORM { settings.u1norm = file.estimator.u1norm; }
    if cli.poth == DEFAULT_POTH { settings.poth = file.estimator.poth; }
    if cli.min_f0 == DEFAULT_MIN_F0 { settings.min_f0 = file.estimator.min_f0; }
    if cli.max_f0 == DEFAULT_MAX_F0 { settings.max_f0 = file.estimator.max_f0; }

    let pipeline = PipelineConfig {
        frame_len: file.analysis.frame_len,
        frame_shift: file.analysis.frame_shift,
        clip_ratio: file.analysis.clip_ratio,
        median_filter: file.analysis.median_filter && !cli.no_median,
        parallel: !cli.sequential,
    };

    validate(&pipeline, &settings)?;
    Ok((pipeline, settings))
}

fn validate(pipeline: &PipelineConfig, settings: &AnalyzerSettings) -> std::result::Result<(), PitchError> {
    let invalid = |msg: String| Err(PitchError::Config(msg));

    if !(pipeline.frame_len > 0.0 && pipeline.frame_len <= MAX_FRAME_SEC) {
        return invalid(format!(
            "frame_len must be in (0, {}] seconds, got {}",
            MAX_FRAME_SEC, pipeline.frame_len
        ));
    }
    if !(pipeline.frame_shift > 0.0 && pipeline.frame_shift <= MAX_FRAME_SEC) {
        return invalid(format!(
            "frame_shift must be in (0, {}] seconds, got {}",
            MAX_FRAME_SEC, pipeline.frame_shift
        ));
    }
    if !(0.0..1.0).contains(&pipeline.clip_ratio) {
        return invalid(format!("clip_ratio must be in [0, 1), got {}", pipeline.clip_ratio));
    }
    if !(settings.min_f0 >= MIN_F0_FLOOR) {
        return invalid(format!(
            "min_f0 must be at least {} Hz, got {}",
            MIN_F0_FLOOR, settings.min_f0
        ));
    }
    if !(settings.max_f0 > settings.min_f0 && settings.max_f0.is_finite()) {
        return invalid(format!(
            "max_f0 ({}) must be above min_f0 ({})",
            settings.max_f0, settings.min_f0
        ));
    }
    for (name, value) in [
        ("umaxnorm", settings.umaxnorm),
        ("u1norm", settings.u1norm),
        ("poth", settings.poth),
    ] {
        if !value.is_finite() {
            return invalid(format!("{} must be a finite number", name));
        }
    }
    Ok(())
}
