use super::*;

#[test]
fn defaults_validate() {
    PreviewConfig::default().validate().unwrap();
}

#[test]
fn partial_json_overrides_defaults() {
    let cfg = PreviewConfig::from_json(r#"{"fov_deg": 60.0, "auto_rotate": false}"#).unwrap();
    assert_eq!(cfg.fov_deg, 60.0);
    assert!(!cfg.auto_rotate);
    assert_eq!(cfg.mm_to_world, PreviewConfig::default().mm_to_world);
}

#[test]
fn rejects_out_of_range_values() {
    assert!(PreviewConfig::from_json(r#"{"fov_deg": 0.0}"#).is_err());
    assert!(PreviewConfig::from_json(r#"{"mm_to_world": -1.0}"#).is_err());
    assert!(PreviewConfig::from_json(r#"{"min_pitch": 1.0, "max_pitch": 0.5}"#).is_err());
    assert!(PreviewConfig::from_json(r#"{"light_dir": {"x": 0, "y": 0, "z": 0}}"#).is_err());
    assert!(PreviewConfig::from_json(r#"{"min_fit_fraction": 1.5}"#).is_err());
    assert!(PreviewConfig::from_json("not json").is_err());
}

#[test]
fn ease_choices_deserialize() {
    let cfg = PreviewConfig::from_json(r#"{"convergence_ease": "in_out_cubic"}"#).unwrap();
    assert_eq!(cfg.convergence_ease, Ease::InOutCubic);
    assert_eq!(cfg.fade_ease, Ease::Linear);
}
