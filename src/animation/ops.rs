use crate::{
    animation::anim::{Keyframe, KeyframeSequence},
    foundation::core::FrameIndex,
};

/// Which field of a keyframe an update replaces, with its new value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeField {
    /// Move the keyframe to another frame.
    Frame(FrameIndex),
    /// Change the keyframe value.
    Value(f64),
}

/// Ordering behaviour after a keyframe's frame is edited in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameEditPolicy {
    /// Keep positional order; only `add` re-sorts.
    #[default]
    Positional,
    /// Re-sort after every frame edit.
    Resort,
}

/// Append a keyframe at `frame` carrying the last keyframe's value (or `0.0`)
/// and re-sort.
pub fn add_keyframe(seq: &KeyframeSequence, frame: FrameIndex) -> KeyframeSequence {
    let value = seq.last().map_or(0.0, |k| k.value);
    let mut keys = seq.keys().to_vec();
    keys.push(Keyframe { frame, value });
    KeyframeSequence::new(keys)
}

/// Replace one field of the keyframe at `index`. `None` when out of range.
pub fn update_keyframe(
    seq: &KeyframeSequence,
    index: usize,
    field: KeyframeField,
    policy: FrameEditPolicy,
) -> Option<KeyframeSequence> {
    let mut keys = seq.keys().to_vec();
    let key = keys.get_mut(index)?;
    match field {
        KeyframeField::Frame(frame) => key.frame = frame,
        KeyframeField::Value(value) => key.value = value,
    }

    match (field, policy) {
        (KeyframeField::Frame(_), FrameEditPolicy::Resort) => Some(KeyframeSequence::new(keys)),
        _ => Some(KeyframeSequence::from_positional(keys)),
    }
}

/// Remove the keyframe at `index`. `None` when out of range.
pub fn delete_keyframe(seq: &KeyframeSequence, index: usize) -> Option<KeyframeSequence> {
    if index >= seq.len() {
        return None;
    }
    let mut keys = seq.keys().to_vec();
    keys.remove(index);
    Some(KeyframeSequence::from_positional(keys))
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
