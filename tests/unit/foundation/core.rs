use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(30, 1).unwrap(), Fps::default());
}

#[test]
fn fps_frames_to_secs_uses_rational_rate() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.frames_to_secs(45), 1.5);
    let ntsc = Fps::new(30000, 1001).unwrap();
    assert!((ntsc.frames_to_secs(30000) - 1001.0).abs() < 1e-9);
}

#[test]
fn frame_index_signed_conversions_clamp() {
    assert_eq!(FrameIndex::from_i64_clamped(-7), FrameIndex(0));
    assert_eq!(FrameIndex::from_i64_clamped(42), FrameIndex(42));
    assert_eq!(FrameIndex(u64::MAX).as_i64(), i64::MAX);
    assert_eq!(FrameIndex(9).as_i64(), 9);
}

#[test]
fn canvas_defaults_to_full_hd() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (1920, 1080));
}
