use std::path::Path;

use vera_core::errors::{ErrorInfo, VeraError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("bin", "3")
        .with_context("reason", "example")
}

#[test]
fn invalid_range_surface() {
    let err = VeraError::InvalidRange(sample_info("mass_max", "max below min"));
    assert_eq!(err.info().code, "mass_max");
    assert!(err.info().context.contains_key("bin"));
}

#[test]
fn label_collision_surface() {
    let err = VeraError::LabelCollision(sample_info("label", "duplicate label"));
    assert_eq!(err.info().code, "label");
    assert!(err.to_string().starts_with("label collision:"));
}

#[test]
fn directory_creation_carries_path_and_hint() {
    let err = VeraError::directory_creation(Path::new("/no/such/root"), "permission denied");
    assert_eq!(err.info().code, "mkdir");
    assert_eq!(err.info().context["path"], "/no/such/root");
    assert!(err.info().hint.is_some());
    let rendered = err.to_string();
    assert!(rendered.contains("permission denied"));
    assert!(rendered.contains("path=/no/such/root"));
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = VeraError::MissingExecutable(ErrorInfo::new("simulator", "not a file"));
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["family"], "MissingExecutable");
    assert_eq!(value["detail"]["code"], "simulator");
    let back: VeraError = serde_json::from_value(value).unwrap();
    assert_eq!(back, err);
}
