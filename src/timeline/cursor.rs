use crate::foundation::core::{Fps, FrameIndex};

/// Map a normalized scrub position to a frame: `floor(position * duration)`
/// clamped to `[0, duration]`. Non-finite positions map to frame 0.
pub fn frame_from_scrub(position: f64, duration: FrameIndex) -> FrameIndex {
    let raw = (position * duration.0 as f64).floor();
    if raw.is_nan() || raw <= 0.0 {
        return FrameIndex(0);
    }
    if raw >= duration.0 as f64 {
        return duration;
    }
    FrameIndex(raw as u64)
}

/// Current playhead position on a timeline of fixed length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimelineCursor {
    frame: FrameIndex,
    duration: FrameIndex,
}

impl TimelineCursor {
    /// Cursor at frame 0.
    pub fn new(duration: FrameIndex) -> Self {
        Self {
            frame: FrameIndex(0),
            duration,
        }
    }

    /// Current frame.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Timeline length in frames.
    pub fn duration(&self) -> FrameIndex {
        self.duration
    }

    /// Move to `frame`, clamped to `[0, duration]`.
    pub fn seek(&mut self, frame: i64) -> FrameIndex {
        self.frame = FrameIndex::from_i64_clamped(frame).min(self.duration);
        self.frame
    }

    /// Move to the frame under a normalized scrub position.
    pub fn scrub(&mut self, position: f64) -> FrameIndex {
        self.frame = frame_from_scrub(position, self.duration);
        self.frame
    }

    /// Change the timeline length, pulling the playhead in if needed.
    pub fn set_duration(&mut self, duration: FrameIndex) {
        self.duration = duration;
        self.frame = self.frame.min(duration);
    }

    /// Playhead position as a fraction of the duration (0 for an empty timeline).
    pub fn progress(&self) -> f64 {
        if self.duration.0 == 0 {
            return 0.0;
        }
        self.frame.0 as f64 / self.duration.0 as f64
    }

    /// `"Frame: 12 / 300"`.
    pub fn label(&self) -> String {
        format!("Frame: {} / {}", self.frame.0, self.duration.0)
    }

    /// `"Time: 0.40s / 10.00s"`.
    pub fn time_label(&self, fps: Fps) -> String {
        format!(
            "Time: {:.2}s / {:.2}s",
            fps.frames_to_secs(self.frame.0),
            fps.frames_to_secs(self.duration.0)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/cursor.rs"]
mod tests;
