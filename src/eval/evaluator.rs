use crate::composition::model::{Channel, ImageSource, Project, ScreenshotId, Transform};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Spatial state of a screenshot at one frame.
pub struct ResolvedTransform {
    /// Translation `[x, y, z]` in pixels.
    pub translate: [f64; 3],
    /// Rotation `[x, y, z]` in degrees, applied in X, Y, Z order.
    pub rotate_deg: [f64; 3],
    /// Uniform scale.
    pub scale: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
/// One visible screenshot resolved for a frame.
pub struct EvaluatedScreenshot {
    /// Screenshot identifier.
    pub id: ScreenshotId,
    /// Image handle, passed through untouched.
    pub image: ImageSource,
    /// Resolved transform.
    pub transform: ResolvedTransform,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Everything the preview surface needs to draw one frame.
pub struct EvaluatedFrame {
    /// Queried frame, as requested.
    pub frame: i64,
    /// Visible screenshots in paint order.
    pub nodes: Vec<EvaluatedScreenshot>,
}

/// Stateless evaluator from project timeline to per-frame transforms.
pub struct Evaluator;

impl Evaluator {
    /// Resolve all seven channels of `transform` at `frame`.
    pub fn eval_transform(transform: &Transform, frame: i64) -> ResolvedTransform {
        let v = |c: Channel| transform.channel(c).sample(frame);
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

    #[tracing::instrument(skip(project), fields(screenshots = project.screenshots.len()))]
    /// Evaluate every visible screenshot at `frame`.
    ///
    /// Any frame may be queried, including negative frames and frames past the
    /// project duration; channels clamp to their first/last keyframe.
    pub fn eval_frame(project: &Project, frame: i64) -> EvaluatedFrame {
        let nodes = project
            .visible_screenshots()
            .map(|shot| EvaluatedScreenshot {
                id: shot.id.clone(),
                image: shot.image.clone(),
                transform: Self::eval_transform(&shot.transform, frame),
            })
            .collect();
        EvaluatedFrame { frame, nodes }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
