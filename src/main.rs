mod audio;
mod cli;
mod config;
mod contour;
mod error;
mod pipeline;
mod pitch;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;

use cli::Cli;
use error::PitchError;
use pipeline::Pipeline;
use pitch::analyzer::PitchAnalyzer;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), PitchError> {
    // Load config: explicit --config path, or auto-detect pitchline.toml / user config
    let file_config = config::find_config(cli.config.as_deref()).and_then(|path| {
        match config::load_config(&path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                Some(cfg)
            }
            Err(err) => {
                log::warn!("{:#}", err);
                None
            }
        }
    });
    let (pipeline_config, settings) = config::resolve(cli, file_config)?;

    log::info!("Input: {}", cli.input.display());
    log::info!("Output: {}", cli.output.display());
    log::info!(
        "Thresholds: umaxnorm={} u1norm={} poth={}dB, f0 range {}-{}Hz",
        settings.umaxnorm,
        settings.u1norm,
        settings.poth,
        settings.min_f0,
        settings.max_f0
    );

    // 1. Decode audio
    let mut signal =
        audio::decode::decode_audio(&cli.input).map_err(|err| PitchError::Input {
            path: cli.input.clone(),
            message: format!("{:#}", err),
        })?;

    // 2. Build the per-frame estimator for this sample rate
    let layout = pipeline_config.layout(signal.sample_rate);
    let analyzer = PitchAnalyzer::new(layout.length, signal.sample_rate, &settings);

    // 3. Clip, frame, estimate, smooth
    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta} remaining)")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    };
    let contour = Pipeline::new(pipeline_config, analyzer)
        .with_progress(progress)
        .run(&mut signal);

    // 4. Write contour
    contour::write::save_contour(&cli.output, &contour)?;

    log::info!("Done! Output: {}", cli.output.display());
    Ok(())
}
