//! keyframe-studio is the timeline engine behind a screenshot video editor.
//!
//! Users place still images ("screenshots") in 3D space and animate them with
//! keyframes. This crate owns the part of that editor with real semantics:
//!
//! 1. **Model**: every [`Screenshot`] owns a [`Transform`] made of seven
//!    independent [`KeyframeSequence`]s, one per [`Channel`].
//! 2. **Interpolate**: [`evaluate`] maps `(sequence, frame) -> value` with
//!    piecewise-linear interpolation, clamped at both ends.
//! 3. **Edit**: add / update / delete keyframes through [`KeyframeEdit`]s; edits
//!    build new values and never mutate shared data.
//! 4. **Evaluate frames**: [`Evaluator::eval_frame`] resolves every visible
//!    screenshot for a frame.
//! 5. **Scrub**: [`frame_from_scrub`] and [`TimelineCursor`] map playhead
//!    interactions to frame indices.
//!
//! Upload widgets, list rendering and the preview surface live outside this
//! crate and call into it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod composition;
mod eval;
mod foundation;
mod timeline;

pub use animation::anim::{Keyframe, KeyframeSequence, evaluate};
pub use animation::ops::{
    FrameEditPolicy, KeyframeField, add_keyframe, delete_keyframe, update_keyframe,
};
pub use composition::edit::{EditOp, EditOutcome, KeyframeEdit};
pub use composition::model::{
    Channel, ImageSource, Project, ProjectSettings, Screenshot, ScreenshotId, Transform,
};
pub use eval::evaluator::{EvaluatedFrame, EvaluatedScreenshot, Evaluator, ResolvedTransform};
pub use foundation::core::{Canvas, Fps, FrameIndex};
pub use foundation::error::{StudioError, StudioResult};
pub use timeline::cursor::{TimelineCursor, frame_from_scrub};
