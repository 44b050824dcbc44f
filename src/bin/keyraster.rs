use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use keyraster::{Ease, FrameIndex, FrameRange, Point, RenderSettings};

#[derive(Parser, Debug)]
#[command(name = "keyraster", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of the demo animation.
    Frame(FrameArgs),
    /// Render a frame range of the demo animation into a directory.
    Sequence(SequenceArgs),
    /// Plot an easing curve.
    PreviewEase(PreviewArgs),
    /// Print the demo animation's tracks sampled over a time range as JSON.
    Sample(SampleArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Timeline time, in frames.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output image path; the extension selects the format.
    #[arg(long)]
    out: PathBuf,

    /// Optional image drawn on a textured rectangle.
    #[arg(long)]
    texture: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive). Defaults to the end of the demo.
    #[arg(long)]
    end: Option<u64>,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Frame file extension.
    #[arg(long, default_value = "tif")]
    ext: String,

    /// Optional image drawn on a textured rectangle.
    #[arg(long)]
    texture: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Control point `x,y`; none for linear, one for quadratic, two for cubic.
    #[arg(long = "control", value_parser = parse_point)]
    controls: Vec<Point>,

    /// Side length of the square plot.
    #[arg(long, default_value_t = keyraster::DEFAULT_PREVIEW_RES)]
    res: u32,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    #[arg(long, default_value_t = 0.0)]
    start: f64,

    #[arg(long, default_value_t = 48.0)]
    end: f64,

    #[arg(long, default_value_t = 1.0)]
    step: f64,
}

#[derive(serde::Serialize)]
struct TrackSamples {
    track: usize,
    samples: Vec<[f64; 2]>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::PreviewEase(args) => cmd_preview(args),
        Command::Sample(args) => cmd_sample(args),
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{s}'"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate '{v}': {e}"))
    };
    Ok(Point::new(coord(x)?, coord(y)?))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (scene, root) = keyraster::demo::demo_scene(args.texture.as_deref())?;
    let grid = keyraster::render_frame(&scene, root, args.time, &RenderSettings::default())?;
    keyraster::write_image(&grid, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let (scene, root) = keyraster::demo::demo_scene(args.texture.as_deref())?;
    let end = args.end.unwrap_or(keyraster::demo::DEMO_FRAMES.end.0);
    anyhow::ensure!(
        end > args.start,
        "--end ({end}) must be greater than --start ({})",
        args.start
    );
    let range = FrameRange::new(FrameIndex(args.start), FrameIndex(end))?;
    let settings = RenderSettings {
        file_extension: args.ext,
        ..RenderSettings::default()
    };

    let written = keyraster::render_frames_to_dir(&scene, root, range, &args.out_dir, &settings)?;
    eprintln!(
        "wrote {} frames to {}",
        written.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let ease = match args.controls.as_slice() {
        [] => Ease::Linear,
        [p] => Ease::quadratic(*p),
        [p1, p2] => Ease::cubic(*p1, *p2),
        more => anyhow::bail!("at most two control points, got {}", more.len()),
    };
    let grid = keyraster::preview_ease(&ease, args.res);
    keyraster::write_image(&grid, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.step > 0.0, "--step must be positive");
    anyhow::ensure!(args.end >= args.start, "--end must not precede --start");

    let (scene, _) = keyraster::demo::demo_scene(None)?;
    let steps = ((args.end - args.start) / args.step).floor() as usize;
    let out: Vec<TrackSamples> = scene
        .tracks()
        .map(|(id, track)| -> keyraster::KeyrasterResult<TrackSamples> {
            let samples = (0..=steps)
                .map(|i| {
                    let t = args.start + i as f64 * args.step;
                    track.sample(t).map(|v| [t, v])
                })
                .collect::<keyraster::KeyrasterResult<Vec<_>>>()?;
            Ok(TrackSamples {
                track: id.index(),
                samples,
            })
        })
        .collect::<keyraster::KeyrasterResult<_>>()?;

    let json = serde_json::to_string_pretty(&out).context("serialize samples")?;
    println!("{json}");
    Ok(())
}
