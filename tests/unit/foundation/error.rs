use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PaintError::invalid_color("#12")
            .to_string()
            .contains("invalid color:")
    );
    assert!(
        PaintError::unknown_tool("brush")
            .to_string()
            .contains("unknown tool:")
    );
    assert!(
        PaintError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn out_of_bounds_reports_coordinates_and_size() {
    let err = PaintError::OutOfBounds {
        x: -1,
        y: 7,
        width: 4,
        height: 3,
    };
    assert_eq!(err.to_string(), "out of bounds: (-1, 7) outside 4x3");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PaintError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
