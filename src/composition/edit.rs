use crate::{
    animation::ops::{self, FrameEditPolicy, KeyframeField},
    composition::model::{Channel, Project, ScreenshotId, Transform},
    foundation::core::FrameIndex,
    foundation::error::{StudioError, StudioResult},
};

/// A keyframe mutation on one channel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Insert a keyframe at `frame` holding the channel's last value.
    Add {
        /// Target frame.
        frame: FrameIndex,
    },
    /// Replace the frame or value of the keyframe at `index`.
    Update {
        /// Positional keyframe index.
        index: usize,
        /// Field and new value.
        field: KeyframeField,
    },
    /// Remove the keyframe at `index`.
    Delete {
        /// Positional keyframe index.
        index: usize,
    },
}

/// An [`EditOp`] addressed to one channel of one screenshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeEdit {
    /// Target screenshot.
    pub id: ScreenshotId,
    /// Target channel.
    pub channel: Channel,
    /// Mutation to perform.
    pub op: EditOp,
}

/// Whether an edit changed anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOutcome {
    /// The transform was replaced.
    Applied,
    /// The keyframe index was out of range; nothing changed.
    NotApplied,
}

impl EditOutcome {
    /// `true` for [`EditOutcome::Applied`].
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl Transform {
    /// Apply `op` to `channel`. `None` when the op addressed a missing keyframe.
    pub fn try_edit(&self, channel: Channel, op: EditOp, policy: FrameEditPolicy) -> Option<Self> {
        let seq = self.channel(channel);
        let edited = match op {
            EditOp::Add { frame } => ops::add_keyframe(seq, frame),
            EditOp::Update { index, field } => ops::update_keyframe(seq, index, field, policy)?,
            EditOp::Delete { index } => ops::delete_keyframe(seq, index)?,
        };
        Some(self.with_channel(channel, edited))
    }

    /// Transform with a keyframe added on `channel`.
    pub fn with_keyframe_added(&self, channel: Channel, frame: FrameIndex) -> Self {
        self.with_channel(channel, ops::add_keyframe(self.channel(channel), frame))
    }

    /// Transform with one keyframe field replaced; unchanged copy when `index`
    /// is out of range.
    pub fn with_keyframe_updated(
        &self,
        channel: Channel,
        index: usize,
        field: KeyframeField,
        policy: FrameEditPolicy,
    ) -> Self {
        self.try_edit(channel, EditOp::Update { index, field }, policy)
            .unwrap_or_else(|| self.clone())
    }

    /// Transform with one keyframe removed; unchanged copy when `index` is out
    /// of range.
    pub fn with_keyframe_deleted(&self, channel: Channel, index: usize) -> Self {
        self.try_edit(channel, EditOp::Delete { index }, FrameEditPolicy::default())
            .unwrap_or_else(|| self.clone())
    }
}

impl Project {
    /// Compute the transform `edit` would produce without committing it.
    ///
    /// Out-of-range indices yield the current transform unchanged.
    pub fn edit_transform(&self, edit: &KeyframeEdit) -> StudioResult<Transform> {
        let current = &self
            .screenshot(&edit.id)
            .ok_or_else(|| StudioError::edit(format!("unknown screenshot '{}'", edit.id)))?
            .transform;
        Ok(current
            .try_edit(edit.channel, edit.op, self.settings.frame_edit_policy)
            .unwrap_or_else(|| current.clone()))
    }

    /// Apply `edit` and commit the new transform to the screenshot.
    #[tracing::instrument(skip(self), fields(id = %edit.id, channel = %edit.channel))]
    pub fn apply_edit(&mut self, edit: &KeyframeEdit) -> StudioResult<EditOutcome> {
        let policy = self.settings.frame_edit_policy;
        let shot = self.screenshot_mut(&edit.id)?;
        match shot.transform.try_edit(edit.channel, edit.op, policy) {
            Some(next) => {
                shot.transform = next;
                Ok(EditOutcome::Applied)
            }
            None => {
                tracing::debug!(op = ?edit.op, "keyframe index out of range, edit not applied");
                Ok(EditOutcome::NotApplied)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/edit.rs"]
mod tests;
