use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DialogError::resource_load("x")
            .to_string()
            .contains("resource load error:")
    );
    assert!(
        DialogError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        DialogError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DialogError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
