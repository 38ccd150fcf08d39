/// Analysis frame length in seconds.
pub const FRAME_LEN_SEC: f64 = 0.030;
/// Hop between consecutive frame starts in seconds.
pub const FRAME_SHIFT_SEC: f64 = 0.015;

/// Frame length and hop, in samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLayout {
    pub length: usize,
    pub shift: usize,
}

/// One analysis window: a borrowed view into the signal.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub index: usize,
    pub start: usize,
    pub samples: &'a [f32],
}

impl FrameLayout {
    pub fn new(length: usize, shift: usize) -> Self {
        Self { length, shift }
    }

    /// Convert frame length and hop from seconds to (rounded) sample counts.
    pub fn from_duration(sample_rate: u32, frame_len: f64, frame_shift: f64) -> Self {
        let rate = sample_rate as f64;
        Self::new(
            (rate * frame_len).round() as usize,
            (rate * frame_shift).round() as usize,
        )
    }

    /// Number of complete frames that fit in `signal_len` samples. A trailing
    /// partial frame is not counted.
    pub fn count(&self, signal_len: usize) -> usize {
        if self.length == 0 || self.shift == 0 || signal_len < self.length {
            return 0;
        }
        (signal_len - self.length) / self.shift + 1
    }

    /// The `index`-th frame, or `None` if it would run past the end.
    pub fn frame<'a>(&self, samples: &'a [f32], index: usize) -> Option<Frame<'a>> {
        if index >= self.count(samples.len()) {
            return None;
        }
        let start = index * self.shift;
        Some(Frame {
            index,
            start,
            samples: &samples[start..start + self.length],
        })
    }

    /// Lazily walk every complete frame in order of start offset.
    pub fn frames<'a>(&self, samples: &'a [f32]) -> Frames<'a> {
        Frames {
            samples,
            layout: *self,
            next: 0,
            count: self.count(samples.len()),
        }
    }
}

/// Iterator over the frames of a signal. Call [`FrameLayout::frames`] again
/// for a fresh pass.
#[derive(Clone, Debug)]
pub struct Frames<'a> {
    samples: &'a [f32],
    layout: FrameLayout,
    next: usize,
    count: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let frame = self.layout.frame(self.samples, self.next);
        self.next += 1;
        frame
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}
