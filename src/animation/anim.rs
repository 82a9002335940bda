use std::{borrow::Cow, sync::Arc};

use crate::foundation::core::FrameIndex;

/// One sample of a scalar channel at a specific frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    /// Frame the sample is anchored to.
    pub frame: FrameIndex,
    /// Channel value at `frame`.
    pub value: f64,
}

impl Keyframe {
    /// Build a keyframe.
    pub fn new(frame: u64, value: f64) -> Self {
        Self {
            frame: FrameIndex(frame),
            value,
        }
    }
}

/// Keyframes of one scalar channel, in positional order.
///
/// The backing storage is immutable and shared: cloning a sequence is a
/// reference-count bump, and every edit produces a new sequence. Constructors
/// and `add` keep the keys sorted by frame; a positional frame edit may leave
/// them unsorted, which [`evaluate`] tolerates.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct KeyframeSequence {
    keys: Arc<[Keyframe]>,
}

impl KeyframeSequence {
    /// Build a sequence, stable-sorting the keys by frame.
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by_key(|k| k.frame);
        Self { keys: keys.into() }
    }

    /// Single keyframe at frame 0.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![Keyframe::new(0, value)])
    }

    /// Keep the given order as-is.
    pub(crate) fn from_positional(keys: Vec<Keyframe>) -> Self {
        Self { keys: keys.into() }
    }

    /// Keys in positional order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// `true` when the sequence holds no keyframes.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keyframe at a positional index.
    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.keys.get(index)
    }

    /// First keyframe in positional order.
    pub fn first(&self) -> Option<&Keyframe> {
        self.keys.first()
    }

    /// Last keyframe in positional order.
    pub fn last(&self) -> Option<&Keyframe> {
        self.keys.last()
    }

    /// Whether the keys are ascending by frame.
    pub fn is_sorted(&self) -> bool {
        self.keys.is_sorted_by_key(|k| k.frame)
    }

    /// Whether two sequences share the same backing storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.keys, &other.keys)
    }

    /// Value of this channel at `frame`. See [`evaluate`].
    pub fn sample(&self, frame: i64) -> f64 {
        evaluate(&self.keys, frame)
    }
}

impl From<Vec<Keyframe>> for KeyframeSequence {
    fn from(keys: Vec<Keyframe>) -> Self {
        Self::new(keys)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Piecewise-linear value of `keys` at `frame`.
///
/// - no keys: `0.0`
/// - one key: its value for every frame
/// - otherwise keys are stable-sorted by frame and the result is clamped to the
///   first/last value outside their range, linearly interpolated inside it
///
/// Keys sharing a frame keep their positional order, so at a duplicated frame
/// the later one wins. Never panics and never divides by zero.
pub fn evaluate(keys: &[Keyframe], frame: i64) -> f64 {
    match keys {
        [] => return 0.0,
        [only] => return only.value,
        _ => {}
    }

    let sorted: Cow<'_, [Keyframe]> = if keys.is_sorted_by_key(|k| k.frame) {
        Cow::Borrowed(keys)
    } else {
        let mut owned = keys.to_vec();
        owned.sort_by_key(|k| k.frame);
        Cow::Owned(owned)
    };
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return 0.0;
    };

    if frame >= last.frame.as_i64() {
        return last.value;
    }
    if frame < first.frame.as_i64() {
        return first.value;
    }

    let f = FrameIndex::from_i64_clamped(frame).0;
    let idx = sorted.partition_point(|k| k.frame.0 <= f);
    if idx == 0 || idx >= sorted.len() {
        return first.value;
    }

    let a = &sorted[idx - 1];
    let b = &sorted[idx];
    let denom = b.frame.0.saturating_sub(a.frame.0);
    if denom == 0 {
        return b.value;
    }

    let t = ((f - a.frame.0) as f64) / (denom as f64);
    lerp(a.value, b.value, t)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
