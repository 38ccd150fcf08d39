use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::audio::clip::{clip, CLIP_RATIO};
use crate::audio::decode::Signal;
use crate::audio::frames::{Frame, FrameLayout, FRAME_LEN_SEC, FRAME_SHIFT_SEC};
use crate::contour::smooth::smooth;
use crate::pitch::PitchEstimator;

/// Settings for the clip → frame → estimate → smooth chain.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Frame length in seconds.
    pub frame_len: f64,
    /// Hop between frames in seconds.
    pub frame_shift: f64,
    pub clip_ratio: f32,
    pub median_filter: bool,
    /// Run the estimator on rayon's thread pool. Output order is unaffected.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            frame_len: FRAME_LEN_SEC,
            frame_shift: FRAME_SHIFT_SEC,
            clip_ratio: CLIP_RATIO,
            median_filter: true,
            parallel: true,
        }
    }
}

impl PipelineConfig {
    pub fn layout(&self, sample_rate: u32) -> FrameLayout {
        FrameLayout::from_duration(sample_rate, self.frame_len, self.frame_shift)
    }
}

pub struct Pipeline<E> {
    config: PipelineConfig,
    estimator: E,
    progress: ProgressBar,
}

impl<E: PitchEstimator> Pipeline<E> {
    pub fn new(config: PipelineConfig, estimator: E) -> Self {
        Self {
            config,
            estimator,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Turn a signal into its final pitch contour, one value per frame.
    ///
    /// The signal is clipped in place first; nothing keeps the unclipped
    /// samples.
    pub fn run(&self, signal: &mut Signal) -> Vec<f32> {
        let threshold = clip(&mut signal.samples, self.config.clip_ratio);
        log::debug!("Central clipping threshold: {:.6}", threshold);

        let layout = self.config.layout(signal.sample_rate);
        let samples: &[f32] = &signal.samples;
        log::info!(
            "Framing: {} samples/frame, {} samples shift, {} frames",
            layout.length,
            layout.shift,
            layout.count(samples.len())
        );

        let raw = self.estimate_frames(samples, layout);

        let contour = if self.config.median_filter {
            smooth(&raw)
        } else {
            raw
        };

        let voiced = contour.iter().filter(|&&f0| f0 > 0.0).count();
        log::info!("Contour: {} frames, {} voiced", contour.len(), voiced);

        contour
    }

    /// One estimator call per frame, collected in frame order.
    fn estimate_frames(&self, samples: &[f32], layout: FrameLayout) -> Vec<f32> {
        let count = layout.count(samples.len());
        self.progress.set_length(count as u64);

        let estimate = |frame: Frame| {
            let f0 = self.estimator.estimate(frame.samples);
            log::trace!("frame {} @ {}: {} Hz", frame.index, frame.start, f0);
            self.progress.inc(1);
            f0
        };

        let raw: Vec<f32> = if self.config.parallel {
            (0..count)
                .into_par_iter()
                .filter_map(|index| layout.frame(samples, index))
                .map(estimate)
                .collect()
        } else {
            layout.frames(samples).map(estimate).collect()
        };

        self.progress.finish_and_clear();
        raw
    }
}
