use super::*;

#[test]
fn window_from_corners_matches_rect_semantics() {
    let w = FrameWindow::from_corners((70, 70), (1425, 395)).unwrap();
    assert_eq!(w, FrameWindow::new(70, 70, 1355, 325));
    assert_eq!(w.right(), 1425);
    assert_eq!(w.bottom(), 395);

    assert!(FrameWindow::from_corners((10, 10), (5, 20)).is_err());
}

#[test]
fn window_validation_rejects_empty_and_out_of_bounds() {
    assert!(FrameWindow::new(0, 0, 0, 4).validate_within(8, 8).is_err());
    assert!(FrameWindow::new(4, 4, 5, 2).validate_within(8, 8).is_err());
    FrameWindow::new(4, 4, 4, 4).validate_within(8, 8).unwrap();
}

#[test]
fn distance_is_zero_for_equal_colors() {
    assert_eq!(Rgba8::BLACK.distance_sq(Rgba8::BLACK), 0);
    assert_eq!(
        Rgba8::BLACK.distance_sq(Rgba8::WHITE),
        3 * 255 * 255
    );
    assert_eq!(
        Rgba8::TRANSPARENT.distance_sq(Rgba8::BLACK),
        255 * 255
    );
}

#[test]
fn under_premul_blends_over_opaque_background() {
    assert_eq!(Rgba8::WHITE.under_premul([0, 0, 0, 255]), Rgba8::BLACK);
    assert_eq!(Rgba8::WHITE.under_premul([0, 0, 0, 0]), Rgba8::WHITE);

    let half = Rgba8::WHITE.under_premul([0, 0, 0, 128]);
    assert_eq!(half.a, 255);
    assert!(half.r > 120 && half.r < 135);
}
