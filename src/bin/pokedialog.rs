use std::{
    io::Read as _,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pokedialog", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a text as a looping GIF.
    Render(RenderArgs),
    /// Render one frame of a paragraph as a PNG.
    Frame(FrameArgs),
    /// Render every job of a JSON job list into a directory.
    Batch(BatchArgs),
}

/// Dialog look shared by all subcommands. Flags override the config file.
#[derive(Args, Debug)]
struct DialogArgs {
    /// Dialog config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file (TTF/OTF).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Background PNG. Needs `--window` unless the config provides one.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Writable window as `x,y,width,height`.
    #[arg(long, value_parser = parse_window)]
    window: Option<pokedialog::FrameWindow>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Text to animate; `-` reads standard input.
    #[arg(long)]
    text: String,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Reveal frame count (0 = one per character).
    #[arg(long, default_value_t = 0)]
    frames: usize,

    /// Total duration such as `10s` or `1m30s` (default: 250ms per character).
    #[arg(long, value_parser = humantime::parse_duration)]
    duration: Option<Duration>,

    /// Hold frames after each paragraph.
    #[arg(long)]
    end_paragraph_frames: Option<usize>,

    #[command(flatten)]
    dialog: DialogArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Text; `-` reads standard input.
    #[arg(long)]
    text: String,

    /// Paragraph index (0-based) within the text.
    #[arg(long, default_value_t = 0)]
    paragraph: usize,

    /// Characters of the paragraph revealed.
    #[arg(long)]
    cursor: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    dialog: DialogArgs,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// JSON array of jobs: `{ "name", "text", "frames"?, "duration"?, "end_paragraph_frames"? }`.
    #[arg(long)]
    jobs: PathBuf,

    /// Directory receiving `<name>.gif` for every job.
    #[arg(long)]
    out_dir: PathBuf,

    /// Worker threads (default: all cores).
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    dialog: DialogArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn parse_window(s: &str) -> Result<pokedialog::FrameWindow, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("window '{s}': {e}"))?;
    match parts.as_slice() {
        [x, y, w, h] => Ok(pokedialog::FrameWindow::new(*x, *y, *w, *h)),
        _ => Err(format!("window '{s}': expected x,y,width,height")),
    }
}

fn read_text(arg: &str) -> anyhow::Result<String> {
    if arg != "-" {
        return Ok(arg.to_owned());
    }
    let mut s = String::new();
    std::io::stdin()
        .read_to_string(&mut s)
        .context("read text from stdin")?;
    // A trailing newline from `echo` or a file is not an extra empty paragraph.
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    Ok(s)
}

fn make_drawer(args: &DialogArgs) -> anyhow::Result<pokedialog::DialogDrawer> {
    let mut cfg = match &args.config {
        Some(path) => pokedialog::DialogConfig::from_json_file(path)?,
        None => pokedialog::DialogConfig::default(),
    };
    // Flag paths are relative to the working directory, not the config file.
    if let Some(font) = &args.font {
        cfg.font = Some(absolutize(font)?);
    }
    if let Some(bg) = &args.background {
        cfg.background = Some(absolutize(bg)?);
    }
    if let Some(window) = args.window {
        cfg.window = Some(window);
    }

    let drawer = pokedialog::DialogDrawer::from_config(&cfg)?;
    tracing::debug!(window = ?drawer.window(), "dialog ready");
    Ok(drawer)
}

fn absolutize(p: &Path) -> anyhow::Result<PathBuf> {
    if p.is_absolute() {
        return Ok(p.to_path_buf());
    }
    let cwd = std::env::current_dir().context("resolve current directory")?;
    Ok(cwd.join(p))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let text = read_text(&args.text)?;
    let drawer = make_drawer(&args.dialog)?;

    let cfg = pokedialog::AnimateConfig {
        frame_count: args.frames,
        duration: args.duration.unwrap_or(Duration::ZERO),
        end_paragraph_frames: args.end_paragraph_frames,
    };
    let plan = drawer.render_gif_file(&text, &cfg, &args.out)?;

    for notice in &plan.notices {
        eprintln!("note: {notice}");
    }
    eprintln!(
        "wrote {} ({} frames, {:.2}s)",
        args.out.display(),
        plan.len(),
        plan.total_delay().as_secs_f64()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let text = read_text(&args.text)?;
    let paragraphs = pokedialog::split_paragraphs(&text);
    let paragraph = paragraphs.get(args.paragraph).with_context(|| {
        format!(
            "paragraph {} out of range (text has {})",
            args.paragraph,
            paragraphs.len()
        )
    })?;

    let drawer = make_drawer(&args.dialog)?;
    let frame = drawer.frame_at(paragraph, args.cursor)?;

    pokedialog::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.to_rgba8(drawer.palette()),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let jobs = pokedialog::read_jobs_json(&args.jobs)?;
    let drawer = make_drawer(&args.dialog)?;

    let results = pokedialog::write_batch(&drawer, &jobs, &args.out_dir, args.threads)?;

    let mut failed = 0usize;
    for (job, result) in jobs.iter().zip(&results) {
        match result {
            Ok(path) => eprintln!("wrote {}", path.display()),
            Err(e) => {
                failed += 1;
                eprintln!("job '{}' failed: {e}", job.name);
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} jobs failed", jobs.len());
    }
    Ok(())
}
