use std::{collections::BTreeSet, fmt, path::Path, str::FromStr};

use anyhow::Context as _;

use crate::{
    animation::{anim::KeyframeSequence, ops::FrameEditPolicy},
    eval::evaluator::ResolvedTransform,
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{StudioError, StudioResult},
};

/// One of the seven scalar channels of a [`Transform`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Channel {
    /// Horizontal translation in pixels.
    #[serde(rename = "position.x")]
    PositionX,
    /// Vertical translation in pixels.
    #[serde(rename = "position.y")]
    PositionY,
    /// Depth translation in pixels.
    #[serde(rename = "position.z")]
    PositionZ,
    /// Rotation around X in degrees.
    #[serde(rename = "rotation.x")]
    RotationX,
    /// Rotation around Y in degrees.
    #[serde(rename = "rotation.y")]
    RotationY,
    /// Rotation around Z in degrees.
    #[serde(rename = "rotation.z")]
    RotationZ,
    /// Uniform scale factor.
    #[serde(rename = "scale")]
    Scale,
}

impl Channel {
    /// All channels in canonical order.
    pub const ALL: [Channel; 7] = [
        Channel::PositionX,
        Channel::PositionY,
        Channel::PositionZ,
        Channel::RotationX,
        Channel::RotationY,
        Channel::RotationZ,
        Channel::Scale,
    ];

    /// Dotted property path, e.g. `"rotation.z"`.
    pub fn key(self) -> &'static str {
        match self {
            Self::PositionX => "position.x",
            Self::PositionY => "position.y",
            Self::PositionZ => "position.z",
            Self::RotationX => "rotation.x",
            Self::RotationY => "rotation.y",
            Self::RotationZ => "rotation.z",
            Self::Scale => "scale",
        }
    }

    /// Value of a freshly created channel.
    pub fn default_value(self) -> f64 {
        match self {
            Self::Scale => 1.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Channel {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StudioError::validation(format!("unknown channel '{s}'")))
    }
}

/// Keyframed spatial state of one screenshot.
///
/// Each field is an independent [`KeyframeSequence`]. Cloning is cheap since
/// sequences share their storage, so edits build a new `Transform` with one
/// field replaced.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// `position.x` keyframes.
    #[serde(rename = "position.x")]
    pub position_x: KeyframeSequence,
    /// `position.y` keyframes.
    #[serde(rename = "position.y")]
    pub position_y: KeyframeSequence,
    /// `position.z` keyframes.
    #[serde(rename = "position.z")]
    pub position_z: KeyframeSequence,
    /// `rotation.x` keyframes.
    #[serde(rename = "rotation.x")]
    pub rotation_x: KeyframeSequence,
    /// `rotation.y` keyframes.
    #[serde(rename = "rotation.y")]
    pub rotation_y: KeyframeSequence,
    /// `rotation.z` keyframes.
    #[serde(rename = "rotation.z")]
    pub rotation_z: KeyframeSequence,
    /// `scale` keyframes.
    pub scale: KeyframeSequence,
}

impl Default for Transform {
    /// One keyframe at frame 0 per channel holding the channel default.
    fn default() -> Self {
        let zero = KeyframeSequence::constant(0.0);
        Self {
            position_x: zero.clone(),
            position_y: zero.clone(),
            position_z: zero.clone(),
            rotation_x: zero.clone(),
            rotation_y: zero.clone(),
            rotation_z: zero,
            scale: KeyframeSequence::constant(Channel::Scale.default_value()),
        }
    }
}

impl Transform {
    /// Sequence backing `channel`.
    pub fn channel(&self, channel: Channel) -> &KeyframeSequence {
        match channel {
            Channel::PositionX => &self.position_x,
            Channel::PositionY => &self.position_y,
            Channel::PositionZ => &self.position_z,
            Channel::RotationX => &self.rotation_x,
            Channel::RotationY => &self.rotation_y,
            Channel::RotationZ => &self.rotation_z,
            Channel::Scale => &self.scale,
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut KeyframeSequence {
        match channel {
            Channel::PositionX => &mut self.position_x,
            Channel::PositionY => &mut self.position_y,
            Channel::PositionZ => &mut self.position_z,
            Channel::RotationX => &mut self.rotation_x,
            Channel::RotationY => &mut self.rotation_y,
            Channel::RotationZ => &mut self.rotation_z,
            Channel::Scale => &mut self.scale,
        }
    }

    /// Copy of `self` with `channel` replaced by `seq`.
    pub fn with_channel(&self, channel: Channel, seq: KeyframeSequence) -> Self {
        let mut out = self.clone();
        *out.channel_mut(channel) = seq;
        out
    }

    /// `(channel, sequence)` pairs in canonical order.
    pub fn channels(&self) -> impl Iterator<Item = (Channel, &KeyframeSequence)> + '_ {
        Channel::ALL.into_iter().map(|c| (c, self.channel(c)))
    }

    /// Static pose from each channel's first keyframe, falling back to the
    /// channel default when a channel is empty.
    pub fn rest_pose(&self) -> ResolvedTransform {
        let v = |c: Channel| self.channel(c).first().map_or(c.default_value(), |k| k.value);
        ResolvedTransform {
            translate: [
                v(Channel::PositionX),
                v(Channel::PositionY),
                v(Channel::PositionZ),
            ],
            rotate_deg: [
                v(Channel::RotationX),
                v(Channel::RotationY),
                v(Channel::RotationZ),
            ],
            scale: v(Channel::Scale),
        }
    }
}

/// Stable identifier of a screenshot within a project.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct ScreenshotId(pub String);

impl fmt::Display for ScreenshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScreenshotId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque image handle (path, URL or data URI). Never inspected.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ImageSource(pub String);

impl From<&str> for ImageSource {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ImageSource {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A still image placed on the timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Screenshot {
    /// Identifier, unique within the project.
    pub id: ScreenshotId,
    /// Image handle passed through to the preview surface.
    pub image: ImageSource,
    /// Keyframed transform.
    #[serde(default)]
    pub transform: Transform,
    /// Hidden screenshots are skipped by frame evaluation.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Screenshot {
    /// Screenshot with the initial transform, visible.
    pub fn new(id: ScreenshotId, image: ImageSource) -> Self {
        Self {
            id,
            image,
            transform: Transform::default(),
            visible: true,
        }
    }
}

/// Timeline and editing configuration of a project.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectSettings {
    /// Playback frame rate.
    #[serde(default)]
    pub fps: Fps,
    /// Preview canvas size.
    #[serde(default)]
    pub canvas: Canvas,
    /// Timeline length in frames.
    #[serde(default = "default_duration")]
    pub duration: FrameIndex,
    /// Ordering behaviour of in-place frame edits.
    #[serde(default)]
    pub frame_edit_policy: FrameEditPolicy,
}

fn default_duration() -> FrameIndex {
    FrameIndex(300)
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            canvas: Canvas::default(),
            duration: default_duration(),
            frame_edit_policy: FrameEditPolicy::default(),
        }
    }
}

impl ProjectSettings {
    /// Validate settings invariants.
    pub fn validate(&self) -> StudioResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(StudioError::validation("canvas dimensions must be > 0"));
        }
        if self.duration.0 == 0 {
            return Err(StudioError::validation("duration must be > 0 frames"));
        }
        Ok(())
    }
}

/// The screenshot collection and its settings.
///
/// Screenshots keep insertion order, which is also the preview paint order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    /// Timeline configuration.
    #[serde(default)]
    pub settings: ProjectSettings,
    /// Screenshots in paint order.
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
    #[serde(default)]
    next_id: u64,
}

impl Project {
    /// Empty project with the given settings.
    pub fn new(settings: ProjectSettings) -> Self {
        Self {
            settings,
            screenshots: Vec::new(),
            next_id: 0,
        }
    }

    /// Parse a project from JSON text.
    pub fn from_json_str(s: &str) -> StudioResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a project JSON file.
    pub fn from_path(path: &Path) -> StudioResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read project '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Pretty JSON form of the project.
    pub fn to_json_pretty(&self) -> StudioResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a screenshot.
    pub fn screenshot(&self, id: &ScreenshotId) -> Option<&Screenshot> {
        self.screenshots.iter().find(|s| &s.id == id)
    }

    pub(crate) fn screenshot_mut(&mut self, id: &ScreenshotId) -> StudioResult<&mut Screenshot> {
        self.screenshots
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| StudioError::edit(format!("unknown screenshot '{id}'")))
    }

    /// Screenshots that take part in frame evaluation.
    pub fn visible_screenshots(&self) -> impl Iterator<Item = &Screenshot> + '_ {
        self.screenshots.iter().filter(|s| s.visible)
    }

    /// Append a screenshot with the initial transform and return its id.
    ///
    /// Fails when the id counter is exhausted.
    #[tracing::instrument(skip(self, image))]
    pub fn add_screenshot(
        &mut self,
        image: impl Into<ImageSource>,
    ) -> StudioResult<ScreenshotId> {
        let id = loop {
            self.next_id = self
                .next_id
                .checked_add(1)
                .ok_or_else(|| StudioError::validation("screenshot id counter exhausted"))?;
            let candidate = ScreenshotId(format!("shot-{}", self.next_id));
            if self.screenshot(&candidate).is_none() {
                break candidate;
            }
        };
        self.screenshots.push(Screenshot::new(id.clone(), image.into()));
        tracing::debug!(%id, "screenshot added");
        Ok(id)
    }

    /// Remove a screenshot, returning it if it existed.
    pub fn remove_screenshot(&mut self, id: &ScreenshotId) -> Option<Screenshot> {
        let pos = self.screenshots.iter().position(|s| &s.id == id)?;
        Some(self.screenshots.remove(pos))
    }

    /// Flip visibility and return the new state.
    pub fn toggle_visibility(&mut self, id: &ScreenshotId) -> StudioResult<bool> {
        let shot = self.screenshot_mut(id)?;
        shot.visible = !shot.visible;
        Ok(shot.visible)
    }

    /// Validate settings, identifiers and keyframe values.
    pub fn validate(&self) -> StudioResult<()> {
        self.settings.validate()?;

        let mut seen = BTreeSet::new();
        for shot in &self.screenshots {
            if shot.id.0.trim().is_empty() {
                return Err(StudioError::validation("screenshot id must be non-empty"));
            }
            if !seen.insert(&shot.id) {
                return Err(StudioError::validation(format!(
                    "duplicate screenshot id '{}'",
                    shot.id
                )));
            }
            for (channel, seq) in shot.transform.channels() {
                if seq.keys().iter().any(|k| !k.value.is_finite()) {
                    return Err(StudioError::validation(format!(
                        "screenshot '{}' channel {channel} has a non-finite value",
                        shot.id
                    )));
                }
                if !seq.is_sorted() {
                    tracing::warn!(
                        id = %shot.id,
                        %channel,
                        "keyframes are not sorted by frame; edit indices follow stored order"
                    );
                }
                if seq.keys().iter().any(|k| k.frame > self.settings.duration) {
                    tracing::warn!(
                        id = %shot.id,
                        %channel,
                        "keyframe lies beyond the timeline duration"
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
