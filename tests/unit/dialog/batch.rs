use super::*;

use crate::raster::indexed::IndexedImage;

fn fake_planner() -> DialogResult<AnimationPlanner<impl TextMeasure, impl FrameRenderer>> {
    let render = |visible: &[String]| {
        let typed: usize = visible.iter().map(|l| l.chars().count()).sum();
        IndexedImage::filled(4, 1, (typed % 8) as u8 + 1)
    };
    Ok(AnimationPlanner::new(|s: &str| s.len() as f32, render, 40.0))
}

fn job(name: &str, text: &str) -> BatchJob {
    BatchJob {
        name: name.to_owned(),
        text: text.to_owned(),
        frames: 0,
        duration: None,
        end_paragraph_frames: Some(0),
    }
}

#[test]
fn results_keep_job_order() {
    let jobs: Vec<_> = (1..=12)
        .map(|n| job(&format!("j{n}"), &"x".repeat(n)))
        .collect();
    let results = render_batch_with(fake_planner, &jobs, Some(3)).unwrap();

    assert_eq!(results.len(), jobs.len());
    for (n, r) in (1..=12).zip(&results) {
        assert_eq!(r.as_ref().unwrap().len(), n);
    }
}

#[test]
fn planner_setup_failure_is_reported_per_job() {
    let failing = || -> DialogResult<AnimationPlanner<fn(&str) -> f32, fn(&[String]) -> IndexedImage>> {
        Err(DialogError::resource_load("no font"))
    };
    let results = render_batch_with(failing, &[job("a", "ab")], Some(1)).unwrap();
    let err = results[0].as_ref().unwrap_err();
    assert!(matches!(err, DialogError::ResourceLoad(_)));
    assert!(err.to_string().contains("no font"));
}

#[test]
fn zero_threads_is_rejected() {
    let err = render_batch_with(fake_planner, &[], Some(0)).unwrap_err();
    assert!(matches!(err, DialogError::Validation(_)));
}

#[test]
fn more_threads_than_jobs_still_renders_everything() {
    let jobs = vec![job("a", "ab"), job("b", "abc")];
    let results = render_batch_with(fake_planner, &jobs, Some(64)).unwrap();
    assert_eq!(results[0].as_ref().unwrap().len(), 2);
    assert_eq!(results[1].as_ref().unwrap().len(), 3);
}

#[test]
fn job_config_carries_knobs() {
    let mut j = job("a", "hello");
    j.frames = 4;
    j.duration = Some(std::time::Duration::from_millis(1500));
    let cfg = j.animate_config();
    assert_eq!(cfg.frame_count, 4);
    assert_eq!(cfg.duration, std::time::Duration::from_millis(1500));
    assert_eq!(cfg.end_paragraph_frames, Some(0));
}

#[test]
fn jobs_file_rejects_duplicates_and_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");

    std::fs::write(
        &path,
        r#"[{ "name": "intro", "text": "Hi!", "duration": "1m 30s" }, { "name": "outro", "text": "Bye" }]"#,
    )
    .unwrap();
    let jobs = read_jobs_json(&path).unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].duration, Some(std::time::Duration::from_secs(90)));
    assert_eq!(jobs[1].duration, None);
    assert_eq!(jobs[1].animate_config().duration, std::time::Duration::ZERO);
    assert_eq!(jobs[1].end_paragraph_frames, None);

    std::fs::write(&path, r#"[{ "name": "a", "text": "", "duration": "soon" }]"#).unwrap();
    let err = read_jobs_json(&path).unwrap_err();
    assert!(matches!(err, DialogError::Validation(_)), "{err}");

    std::fs::write(&path, r#"[{ "name": "a", "text": "" }, { "name": "a", "text": "" }]"#).unwrap();
    assert!(read_jobs_json(&path).is_err());

    std::fs::write(&path, r#"[{ "name": "../a", "text": "" }]"#).unwrap();
    assert!(read_jobs_json(&path).is_err());
}
