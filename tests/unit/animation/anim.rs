use super::*;

fn seq(keys: &[(u64, f64)]) -> Vec<Keyframe> {
    keys.iter().map(|&(f, v)| Keyframe::new(f, v)).collect()
}

#[test]
fn empty_sequence_is_zero() {
    assert_eq!(evaluate(&[], 42), 0.0);
    assert_eq!(KeyframeSequence::default().sample(-3), 0.0);
}

#[test]
fn single_key_is_constant_everywhere() {
    let keys = seq(&[(12, 7.5)]);
    for f in [i64::MIN, -100, 0, 12, 13, 10_000, i64::MAX] {
        assert_eq!(evaluate(&keys, f), 7.5);
    }
}

#[test]
fn linear_between_two_keys_and_clamped_outside() {
    let keys = seq(&[(0, 10.0), (10, 20.0)]);
    assert_eq!(evaluate(&keys, 5), 15.0);
    assert_eq!(evaluate(&keys, -5), 10.0);
    assert_eq!(evaluate(&keys, 20), 20.0);
    assert_eq!(evaluate(&keys, 0), 10.0);
    assert_eq!(evaluate(&keys, 10), 20.0);
}

#[test]
fn query_below_first_key_returns_first_value() {
    let keys = seq(&[(10, -4.0), (20, 6.0)]);
    assert_eq!(evaluate(&keys, 3), -4.0);
    assert_eq!(evaluate(&keys, 15), 1.0);
}

#[test]
fn unsorted_input_is_sorted_before_sampling() {
    let keys = seq(&[(10, 20.0), (0, 10.0)]);
    assert_eq!(evaluate(&keys, 5), 15.0);
    assert_eq!(evaluate(&keys, 100), 20.0);
}

#[test]
fn interpolated_values_stay_between_neighbours() {
    let keys = seq(&[(0, 3.0), (4, -5.0), (9, 100.0)]);
    for f in 0..=4 {
        let v = evaluate(&keys, f);
        assert!((-5.0..=3.0).contains(&v), "frame {f} -> {v}");
    }
    for f in 4..=9 {
        let v = evaluate(&keys, f);
        assert!((-5.0..=100.0).contains(&v), "frame {f} -> {v}");
    }
}

#[test]
fn duplicate_frames_resolve_to_later_key() {
    let keys = seq(&[(5, 1.0), (5, 9.0)]);
    assert_eq!(evaluate(&keys, 5), 9.0);
    assert_eq!(evaluate(&keys, 4), 1.0);

    let keys = seq(&[(5, 1.0), (5, 9.0), (10, 19.0)]);
    assert_eq!(evaluate(&keys, 5), 9.0);
    assert_eq!(evaluate(&keys, 4), 1.0);
    assert_eq!(evaluate(&keys, 6), 11.0);
}

#[test]
fn new_sorts_stably_and_clone_shares_storage() {
    let s = KeyframeSequence::new(seq(&[(8, 1.0), (2, 2.0), (8, 3.0)]));
    assert!(s.is_sorted());
    let frames: Vec<u64> = s.keys().iter().map(|k| k.frame.0).collect();
    assert_eq!(frames, vec![2, 8, 8]);
    assert_eq!(s.get(1).unwrap().value, 1.0);
    assert_eq!(s.get(2).unwrap().value, 3.0);

    let c = s.clone();
    assert!(c.ptr_eq(&s));
}

#[test]
fn serializes_as_plain_array() {
    let s = KeyframeSequence::constant(1.0);
    let json = serde_json::to_string(&s).unwrap();
    assert_eq!(json, r#"[{"frame":0,"value":1.0}]"#);
    let back: KeyframeSequence = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s);
}
