use super::*;
use crate::animation::anim::Keyframe;

#[test]
fn channel_keys_roundtrip_through_from_str() {
    for c in Channel::ALL {
        assert_eq!(c.key().parse::<Channel>().unwrap(), c);
        assert_eq!(c.to_string(), c.key());
    }
    assert_eq!(" Position.Y ".parse::<Channel>().unwrap(), Channel::PositionY);
    assert!("position.w".parse::<Channel>().is_err());
}

#[test]
fn channel_serde_uses_dotted_keys() {
    assert_eq!(
        serde_json::to_string(&Channel::RotationZ).unwrap(),
        r#""rotation.z""#
    );
    let c: Channel = serde_json::from_str(r#""scale""#).unwrap();
    assert_eq!(c, Channel::Scale);
}

#[test]
fn default_transform_has_one_key_per_channel() {
    let t = Transform::default();
    for (c, seq) in t.channels() {
        assert_eq!(seq.keys(), &[Keyframe::new(0, c.default_value())], "{c}");
    }
    assert_eq!(t.scale.sample(1_000), 1.0);
    assert_eq!(t.position_z.sample(-1), 0.0);
}

#[test]
fn with_channel_replaces_only_target() {
    let t = Transform::default();
    let seq = KeyframeSequence::new(vec![Keyframe::new(0, 1.0), Keyframe::new(9, 2.0)]);
    let out = t.with_channel(Channel::RotationY, seq.clone());
    assert!(out.rotation_y.ptr_eq(&seq));
    for c in Channel::ALL.into_iter().filter(|c| *c != Channel::RotationY) {
        assert!(out.channel(c).ptr_eq(t.channel(c)), "{c}");
    }
}

#[test]
fn rest_pose_uses_first_keys_and_defaults() {
    let t = Transform {
        position_x: KeyframeSequence::new(vec![Keyframe::new(3, 12.0), Keyframe::new(9, 0.0)]),
        scale: KeyframeSequence::default(),
        ..Transform::default()
    };
    let pose = t.rest_pose();
    assert_eq!(pose.translate, [12.0, 0.0, 0.0]);
    assert_eq!(pose.rotate_deg, [0.0, 0.0, 0.0]);
    assert_eq!(pose.scale, 1.0);
}

#[test]
fn add_screenshot_assigns_unique_ids() {
    let mut p = Project::default();
    p.screenshots.push(Screenshot::new("shot-1".into(), "a.png".into()));
    let id = p.add_screenshot("b.png").unwrap();
    assert_eq!(id, ScreenshotId::from("shot-2"));
    let id2 = p.add_screenshot(String::from("c.png")).unwrap();
    assert_ne!(id, id2);
    assert_eq!(p.screenshots.len(), 3);
    let shot = p.screenshot(&id).unwrap();
    assert!(shot.visible);
    assert_eq!(shot.transform, Transform::default());
    p.validate().unwrap();
}

#[test]
fn add_screenshot_reports_exhausted_id_counter() {
    let mut p = Project::from_json_str(r#"{"next_id":18446744073709551615}"#).unwrap();
    p.validate().unwrap();
    let err = p.add_screenshot("x.png").unwrap_err();
    assert!(err.to_string().starts_with("validation error:"), "{err}");
    assert!(p.screenshots.is_empty());
}

#[test]
fn toggle_and_remove() {
    let mut p = Project::default();
    let id = p.add_screenshot("a.png").unwrap();
    assert!(!p.toggle_visibility(&id).unwrap());
    assert_eq!(p.visible_screenshots().count(), 0);
    assert!(p.toggle_visibility(&id).unwrap());
    assert!(p.toggle_visibility(&"missing".into()).is_err());

    assert!(p.remove_screenshot(&id).is_some());
    assert!(p.remove_screenshot(&id).is_none());
    assert!(p.screenshots.is_empty());
}

#[test]
fn validate_rejects_bad_data() {
    let mut p = Project::default();
    p.screenshots.push(Screenshot::new("x".into(), "a.png".into()));
    p.screenshots.push(Screenshot::new("x".into(), "b.png".into()));
    assert!(p.validate().unwrap_err().to_string().contains("duplicate"));

    let mut p = Project::default();
    let id = p.add_screenshot("a.png").unwrap();
    let shot = p.screenshot_mut(&id).unwrap();
    shot.transform.scale = KeyframeSequence::constant(f64::NAN);
    assert!(p.validate().is_err());

    let mut p = Project::default();
    p.settings.duration = FrameIndex(0);
    assert!(p.validate().is_err());

    let mut p = Project::default();
    p.settings.fps.den = 0;
    assert!(p.validate().is_err());
}

#[test]
fn validate_accepts_unsorted_stored_keys() {
    let mut p = Project::default();
    let id = p.add_screenshot("a.png").unwrap();
    let shot = p.screenshot_mut(&id).unwrap();
    shot.transform.position_x = KeyframeSequence::from_positional(vec![
        Keyframe::new(100, 50.0),
        Keyframe::new(40, 10.0),
    ]);
    assert!(!shot.transform.position_x.is_sorted());
    p.validate().unwrap();
}

#[test]
fn settings_default_when_missing_from_json() {
    let p = Project::from_json_str(r#"{"screenshots":[{"id":"a","image":"a.png"}]}"#).unwrap();
    assert_eq!(p.settings, ProjectSettings::default());
    assert_eq!(p.settings.duration, FrameIndex(300));
    assert_eq!(p.screenshots[0].transform, Transform::default());
    assert!(p.screenshots[0].visible);
}

#[test]
fn json_roundtrip_preserves_project() {
    let mut p = Project::default();
    let id = p.add_screenshot("a.png").unwrap();
    p.screenshot_mut(&id).unwrap().transform.position_x =
        KeyframeSequence::new(vec![Keyframe::new(0, -5.0), Keyframe::new(30, 5.0)]);
    let json = p.to_json_pretty().unwrap();
    assert!(json.contains("\"position.x\""));
    let back = Project::from_json_str(&json).unwrap();
    assert_eq!(back, p);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Project::from_json_str("{").unwrap_err();
    assert!(matches!(err, StudioError::Serde(_)));
}
