use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sketchreel::encode::ffmpeg::ensure_parent_dir;
use sketchreel::{
    DrawingDirection, DrawingMode, ElementDirection, FfmpegSinkOpts, FrameGenerator,
    GenerateRequest, HandLibrary, HandStyle, OutputFormat, Settings,
};

#[derive(Parser, Debug)]
#[command(name = "sketchreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a reveal animation to MP4 or GIF (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame of the animation as a PNG.
    Frame(FrameArgs),
    /// Write a PNG showing detected elements and their draw order.
    Elements(ElementsArgs),
}

#[derive(Args, Debug)]
struct GenArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Animation length in seconds, before the trailing hold.
    #[arg(long, default_value_t = 5.0)]
    duration: f64,

    /// Frames per second (overrides the settings file).
    #[arg(long)]
    fps: Option<u32>,

    #[arg(long, default_value = "hand_1")]
    hand: HandStyle,

    #[arg(long, default_value = "left_to_right")]
    direction: DrawingDirection,

    /// Element order for `element_by_element` (`default`, `row_wise`, `column_wise`).
    #[arg(long, default_value = "default")]
    element_direction: ElementDirection,

    #[arg(long, default_value = "normal")]
    mode: DrawingMode,

    /// Settings JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory with hand sprites (overrides the settings file).
    #[arg(long)]
    hands_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    gen_args: GenArgs,

    /// Output video path.
    #[arg(long)]
    out: PathBuf,

    /// Output format; inferred from the `--out` extension when omitted.
    #[arg(long)]
    format: Option<OutputFormat>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    gen_args: GenArgs,

    /// Frame index (0-based).
    #[arg(long)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ElementsArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value = "default")]
    element_direction: ElementDirection,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Elements(args) => cmd_elements(args),
    }
}

struct Prepared {
    settings: Settings,
    generator: FrameGenerator,
    request: GenerateRequest,
    image: image::RgbImage,
}

fn prepare(args: &GenArgs) -> anyhow::Result<Prepared> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_path(path)?,
        None => Settings::default(),
    };
    if let Some(fps) = args.fps {
        settings.fps = fps;
    }
    if let Some(dir) = &args.hands_dir {
        settings.hands_dir = Some(dir.clone());
    }
    settings.validate()?;

    let hands = match &settings.hands_dir {
        Some(dir) => HandLibrary::load(dir),
        None => HandLibrary::builtin(),
    };
    let generator = FrameGenerator::new(Arc::new(hands), settings.generator_opts());
    let request = GenerateRequest::new(args.duration, settings.fps()?)
        .with_hand(args.hand)
        .with_direction(args.direction)
        .with_element_direction(args.element_direction)
        .with_mode(args.mode);
    let image = load_rgb(&args.in_path)?;

    Ok(Prepared {
        settings,
        generator,
        request,
        image,
    })
}

fn load_rgb(path: &Path) -> anyhow::Result<image::RgbImage> {
    let img = image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img.to_rgb8())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let p = prepare(&args.gen_args)?;
    let frames = p.generator.generate(&p.image, &p.request)?;

    let mut opts = FfmpegSinkOpts::new(&args.out);
    if let Some(format) = args.format {
        opts = opts.with_format(format);
    }
    opts.crf = p.settings.video_crf;
    opts.gif_max_fps = p.settings.gif_max_fps;

    let summary = sketchreel::encode_to_file(&frames, p.request.fps, &opts)?;
    eprintln!(
        "wrote {} ({} frames, {:.2}s, {} bytes)",
        summary.path.display(),
        summary.frame_count,
        summary.duration_secs,
        summary.file_size_bytes
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let p = prepare(&args.gen_args)?;
    let frames = p.generator.generate(&p.image, &p.request)?;
    let frame = frames.get(args.index).with_context(|| {
        format!(
            "frame index {} out of range (sequence has {} frames)",
            args.index,
            frames.len()
        )
    })?;

    ensure_parent_dir(&args.out)?;
    frame
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_elements(args: ElementsArgs) -> anyhow::Result<()> {
    let image = load_rgb(&args.in_path)?;
    let generator = FrameGenerator::default();
    let ordered = generator
        .plan_elements(&image, args.element_direction)?
        .unwrap_or_default();
    let overlay = sketchreel::render_element_overlay(&image, &ordered, args.element_direction);

    ensure_parent_dir(&args.out)?;
    overlay
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("{} elements", ordered.len());
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
