use super::*;

#[test]
fn empty_json_uses_defaults() {
    let cfg = DialogConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg.background, None);
    assert_eq!(cfg.box_size, BoxSize::default());
    assert_eq!(cfg.text, TextStyle::default());
    cfg.validate().unwrap();
    assert_eq!(cfg.font_path(), None);
}

#[test]
fn full_json_round_trips_fields() {
    let cfg = DialogConfig::from_json_str(
        r#"{
            "background": "dialog.png",
            "window": { "x": 70, "y": 70, "width": 1355, "height": 325 },
            "font": "fonts/pokemon.ttf",
            "text": { "size_ratio": 0.3, "color": { "r": 0, "g": 0, "b": 255, "a": 255 } }
        }"#,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.window, Some(FrameWindow::new(70, 70, 1355, 325)));
    assert!((cfg.text.size_ratio - 0.3).abs() < 1e-6);
    assert!((cfg.text.line_spacing - 1.5).abs() < 1e-6);
    assert_eq!(cfg.text.color.b, 255);
}

#[test]
fn unknown_fields_and_bad_windows_are_rejected() {
    assert!(DialogConfig::from_json_str(r#"{ "colour": 1 }"#).is_err());

    let no_window = DialogConfig::from_json_str(r#"{ "background": "bg.png" }"#).unwrap();
    assert!(no_window.validate().is_err());

    let empty_window = DialogConfig::from_json_str(
        r#"{ "window": { "x": 0, "y": 0, "width": 0, "height": 10 } }"#,
    )
    .unwrap();
    assert!(empty_window.validate().is_err());
}

#[test]
fn paths_resolve_against_config_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dialog.json");
    std::fs::write(&path, r#"{ "font": "font.ttf", "background": "/abs/bg.png", "window": { "x": 1, "y": 1, "width": 2, "height": 2 } }"#).unwrap();

    let cfg = DialogConfig::from_json_file(&path).unwrap();
    assert_eq!(cfg.root, dir.path());
    assert_eq!(cfg.font_path(), Some(dir.path().join("font.ttf")));
    assert_eq!(cfg.background_path(), Some(PathBuf::from("/abs/bg.png")));
}
