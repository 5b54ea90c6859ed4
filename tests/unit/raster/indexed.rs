use super::*;

#[test]
fn classic_palette_reserves_transparent_index() {
    let p = Palette::classic();
    assert_eq!(p.len(), 9);
    assert_eq!(p.color(TRANSPARENT_INDEX), Rgba8::TRANSPARENT);
    assert_eq!(p.color(1), Rgba8::BLACK);
    assert_eq!(p.color(8), Rgba8::WHITE);
    assert_eq!(p.color(200), Rgba8::TRANSPARENT);
}

#[test]
fn custom_palette_prepends_sentinel_and_caps_size() {
    let p = Palette::new([Rgba8::WHITE]).unwrap();
    assert_eq!(p.colors(), &[Rgba8::TRANSPARENT, Rgba8::WHITE]);

    let too_many = (0..256u32).map(|i| Rgba8::opaque(i as u8, 0, 0));
    assert!(Palette::new(too_many).is_err());
}

#[test]
fn nearest_maps_to_closest_entry() {
    let p = Palette::classic();
    assert_eq!(p.nearest(Rgba8::opaque(250, 250, 245)), 8);
    assert_eq!(p.nearest(Rgba8::opaque(10, 12, 8)), 1);
    assert_eq!(p.nearest(Rgba8::opaque(240, 20, 20)), 5);
    assert_eq!(p.nearest(Rgba8::new(0, 0, 0, 0)), TRANSPARENT_INDEX);
    assert_eq!(p.nearest(Rgba8::new(3, 3, 3, 10)), TRANSPARENT_INDEX);
}

#[test]
fn quantize_and_expand() {
    let p = Palette::classic();
    let rgba = [255, 255, 255, 255, 0, 0, 0, 255, 0, 0, 0, 0, 0, 0, 250, 255];
    let img = IndexedImage::quantize_rgba8(2, 2, &rgba, &p).unwrap();
    assert_eq!(img.pixels(), &[8, 1, 0, 2]);

    let back = img.to_rgba8(&p);
    assert_eq!(&back[0..4], &[255, 255, 255, 255]);
    assert_eq!(&back[8..12], &[0, 0, 0, 0]);
    assert_eq!(&back[12..16], &[0, 0, 255, 255]);

    assert!(IndexedImage::quantize_rgba8(2, 2, &rgba[..8], &p).is_err());
}

#[test]
fn fill_rect_clips_to_bounds() {
    let mut img = IndexedImage::filled(4, 3, 8);
    img.fill_rect(FrameWindow::new(2, 1, 10, 10), 1);
    assert_eq!(img.pixels(), &[8, 8, 8, 8, 8, 8, 1, 1, 8, 8, 1, 1]);

    img.fill_rect(FrameWindow::new(9, 9, 2, 2), 5);
    assert!(!img.pixels().contains(&5));
}

#[test]
fn get_set_and_raw() {
    let mut img = IndexedImage::from_raw(2, 1, vec![1, 2]).unwrap();
    img.set(1, 0, 7);
    img.set(5, 5, 7);
    assert_eq!(img.get(1, 0), Some(7));
    assert_eq!(img.get(2, 0), None);
    assert!(IndexedImage::from_raw(2, 2, vec![0]).is_err());
}
