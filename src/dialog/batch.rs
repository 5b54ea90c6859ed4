use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use rayon::prelude::*;

use crate::{
    animation::planner::{AnimateConfig, AnimationPlan, AnimationPlanner, FrameRenderer},
    dialog::drawer::{DialogDrawer, animate_with},
    encode::gif::{gif_path_in, write_gif_file},
    foundation::error::{DialogError, DialogResult},
    text::wrap::TextMeasure,
};

/// One independent animation request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchJob {
    /// Output stem; `<name>.gif` in the output directory.
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub frames: usize,
    /// Total duration such as `10s` or `1m 30s`; absent or `0` means automatic.
    #[serde(default, with = "humantime_serde")]
    pub duration: Option<Duration>,
    #[serde(default)]
    pub end_paragraph_frames: Option<usize>,
}

impl BatchJob {
    pub fn animate_config(&self) -> AnimateConfig {
        AnimateConfig {
            frame_count: self.frames,
            duration: self.duration.unwrap_or_default(),
            end_paragraph_frames: self.end_paragraph_frames,
        }
    }
}

pub fn read_jobs_json(path: &Path) -> DialogResult<Vec<BatchJob>> {
    use anyhow::Context as _;
    let bytes = std::fs::read(path).with_context(|| format!("read jobs '{}'", path.display()))?;
    let jobs: Vec<BatchJob> = serde_json::from_slice(&bytes)
        .map_err(|e| DialogError::validation(format!("parse jobs '{}': {e}", path.display())))?;

    let mut seen = std::collections::HashSet::new();
    for job in &jobs {
        if job.name.is_empty() || job.name.contains(['/', '\\']) {
            return Err(DialogError::validation(format!(
                "job name '{}' must be a plain non-empty file stem",
                job.name
            )));
        }
        if !seen.insert(job.name.as_str()) {
            return Err(DialogError::validation(format!(
                "duplicate job name '{}'",
                job.name
            )));
        }
    }
    Ok(jobs)
}

/// Worker pool for one batch, never larger than the job count.
fn batch_pool(threads: Option<usize>, jobs: usize) -> DialogResult<rayon::ThreadPool> {
    let workers = match threads {
        Some(0) => {
            return Err(DialogError::validation(
                "batch needs at least one worker thread",
            ));
        }
        Some(n) => n,
        None => rayon::current_num_threads(),
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers.min(jobs.max(1)))
        .thread_name(|i| format!("pokedialog-batch-{i}"))
        .build()
        .map_err(|e| anyhow::Error::new(e).context("start batch workers").into())
}

/// Animate every job on a dedicated pool of at most `threads` workers, each with its own
/// planner from `make_planner`. Results keep job order; one job failing does not stop the
/// others.
pub fn render_batch_with<F, M, R>(
    make_planner: F,
    jobs: &[BatchJob],
    threads: Option<usize>,
) -> DialogResult<Vec<DialogResult<AnimationPlan>>>
where
    F: Fn() -> DialogResult<AnimationPlanner<M, R>> + Sync + Send,
    M: TextMeasure,
    R: FrameRenderer,
{
    let pool = batch_pool(threads, jobs.len())?;
    tracing::debug!(jobs = jobs.len(), threads = pool.current_num_threads(), "batch start");

    let results = pool.install(|| {
        jobs.par_iter()
            .map_init(&make_planner, |planner, job| -> DialogResult<AnimationPlan> {
                let planner = planner
                    .as_mut()
                    .map_err(|e| DialogError::resource_load(e.to_string()))?;
                Ok(animate_with(planner, &job.text, &job.animate_config()))
            })
            .collect::<Vec<_>>()
    });
    Ok(results)
}

/// [`render_batch_with`] using planners from `drawer`.
pub fn render_batch(
    drawer: &DialogDrawer,
    jobs: &[BatchJob],
    threads: Option<usize>,
) -> DialogResult<Vec<DialogResult<AnimationPlan>>> {
    render_batch_with(|| drawer.planner(), jobs, threads)
}

/// Render every job to `<out_dir>/<name>.gif`.
#[tracing::instrument(skip_all, fields(jobs = jobs.len()))]
pub fn write_batch(
    drawer: &DialogDrawer,
    jobs: &[BatchJob],
    out_dir: &Path,
    threads: Option<usize>,
) -> DialogResult<Vec<DialogResult<PathBuf>>> {
    let plans = render_batch(drawer, jobs, threads)?;
    let written = plans
        .into_iter()
        .zip(jobs)
        .map(|(plan, job)| {
            let plan = plan?;
            let path = gif_path_in(out_dir, &job.name);
            write_gif_file(&plan, drawer.palette(), &path)?;
            tracing::info!(job = %job.name, frames = plan.len(), path = %path.display(), "wrote");
            Ok(path)
        })
        .collect();
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/dialog/batch.rs"]
mod tests;
