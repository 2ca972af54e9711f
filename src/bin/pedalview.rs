use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use pedalview::{
    Fps, FrameIndex, FrameSurface, FsImageLoader, HeadlessHost, PreviewConfig, PreviewController,
    SceneInput, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "pedalview", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the settled, fully open preview as a PNG.
    Frame(FrameArgs),
    /// Render the opening animation as numbered PNGs.
    Sequence(SequenceArgs),
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Input arrangement JSON (array of canvas objects or `{"objects": [...]}`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Optional preview config JSON; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in CSS pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Viewport height in CSS pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Camera yaw in radians.
    #[arg(long, default_value_t = 0.6)]
    yaw: f64,

    /// Camera pitch in radians (defaults to the configured base pitch).
    #[arg(long)]
    pitch: Option<f64>,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Output directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Number of frames to render.
    #[arg(long, default_value_t = 60)]
    frames: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn make_controller(
    view: &ViewArgs,
) -> anyhow::Result<(PreviewController<HeadlessHost>, FrameSurface)> {
    let cfg = match &view.config {
        Some(path) => PreviewConfig::from_path(path)?,
        None => PreviewConfig::default(),
    };
    let input = SceneInput::from_path(&view.in_path)?;
    let images_root = view
        .in_path
        .parent()
        .unwrap_or_else(|| Path::new("."));

    let mut ctl = PreviewController::new(
        cfg,
        HeadlessHost::default(),
        Box::new(FsImageLoader::new(images_root)),
    )?;
    let viewport = Viewport::new(view.width, view.height, view.dpr);
    ctl.resize(viewport);
    ctl.set_objects(input.objects);
    ctl.poll_images();

    let surface = FrameSurface::new(viewport)?;
    Ok((ctl, surface))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut ctl, mut surface) = make_controller(&args.view)?;
    ctl.set_auto_rotate(false);
    ctl.open_immediately();
    let pitch = args.pitch.unwrap_or(ctl.config().base_pitch);
    ctl.set_view_angles(args.yaw, pitch);

    let stats = ctl.render_frame(0.0, &mut surface);
    write_png(&args.out, &surface)?;
    tracing::info!(
        out = %args.out.display(),
        boxes = stats.boxes,
        faces = stats.faces,
        textured = stats.textured_faces,
        "frame written"
    );
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, 1)?;
    let (mut ctl, mut surface) = make_controller(&args.view)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    ctl.open(0.0);
    for i in 0..args.frames {
        let frame = FrameIndex(i);
        let now = fps.frames_to_secs(frame.0);
        ctl.render_frame(now, &mut surface);
        let out = args.out_dir.join(format!("frame_{:05}.png", frame.0));
        write_png(&out, &surface)?;
    }

    tracing::info!(
        frames = args.frames,
        out_dir = %args.out_dir.display(),
        "sequence written"
    );
    Ok(())
}

fn write_png(path: &Path, surface: &FrameSurface) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let frame = surface.readback().into_straight_alpha();
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
