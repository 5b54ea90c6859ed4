use std::{io::Cursor, time::Duration};

use image::AnimationDecoder as _;

use super::*;
use crate::{
    animation::planner::{AnimateConfig, AnimationPlanner},
    raster::indexed::IndexedImage,
};

fn bar_plan(text: &str) -> AnimationPlan {
    let render = |visible: &[String]| {
        let typed: usize = visible.iter().map(|l| l.chars().count()).sum();
        let mut img = IndexedImage::filled(12, 2, 8);
        for x in 0..(typed as u32).min(12) {
            img.set(x, 1, 1);
        }
        img
    };
    let mut planner = AnimationPlanner::new(|s: &str| s.len() as f32, render, 100.0);
    planner.plan(
        text,
        &AnimateConfig {
            frame_count: 0,
            duration: Duration::from_secs(2),
            end_paragraph_frames: Some(2),
        },
    )
}

fn decode_frames(bytes: &[u8]) -> Vec<image::Frame> {
    let decoder = image::codecs::gif::GifDecoder::new(Cursor::new(bytes)).unwrap();
    decoder.into_frames().collect_frames().unwrap()
}

#[test]
fn encoded_frames_and_delays_survive_decoding() {
    let plan = bar_plan("hey");
    let mut buf = Vec::new();
    encode_gif(&plan, &Palette::classic(), &mut buf).unwrap();

    assert_eq!(&buf[..6], b"GIF89a");
    let frames = decode_frames(&buf);
    assert_eq!(frames.len(), plan.len());
    for (decoded, planned) in frames.iter().zip(&plan.frames) {
        let (num, den) = decoded.delay().numer_denom_ms();
        let ms = f64::from(num) / f64::from(den);
        assert!((ms - f64::from(planned.delay_cs) * 10.0).abs() < 1.0);
    }
}

#[test]
fn optimized_frames_composite_back_to_the_originals() {
    let palette = Palette::classic();
    let original = bar_plan("ab\ncd");
    let mut optimized = original.clone();
    optimized.optimize();
    assert_ne!(optimized.frames[1].image, original.frames[1].image);

    let mut buf = Vec::new();
    encode_gif(&optimized, &palette, &mut buf).unwrap();

    let frames = decode_frames(&buf);
    assert_eq!(frames.len(), original.len());
    for (i, (decoded, planned)) in frames.iter().zip(&original.frames).enumerate() {
        assert_eq!(
            decoded.buffer().as_raw(),
            &planned.image.to_rgba8(&palette),
            "frame {i}"
        );
    }
}

#[test]
fn empty_plan_is_an_encode_error() {
    let mut plan = bar_plan("x");
    plan.frames.clear();
    let err = encode_gif(&plan, &Palette::classic(), Vec::new()).unwrap_err();
    assert!(matches!(err, DialogError::Encode(_)));
}

#[test]
fn writes_file_into_new_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = gif_path_in(&dir.path().join("nested"), "hello");
    write_gif_file(&bar_plan("hello"), &Palette::classic(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(decode_frames(&bytes).len(), 5 + 2);
}

#[test]
fn parent_dir_of_bare_name_or_blocked_path() {
    ensure_parent_dir(Path::new("hello.gif")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("taken");
    std::fs::write(&file, b"").unwrap();
    let err = ensure_parent_dir(&file.join("hello.gif")).unwrap_err();
    assert!(matches!(err, DialogError::Encode(_)), "{err}");
}
