use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KinetypeError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        KinetypeError::layout("x")
            .to_string()
            .contains("layout error:")
    );
    assert!(
        KinetypeError::timeline("x")
            .to_string()
            .contains("timeline error:")
    );
    assert!(
        KinetypeError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KinetypeError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
