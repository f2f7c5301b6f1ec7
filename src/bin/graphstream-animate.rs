use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use graphstream_animate::{
    AnimateConfig, AnimationScheduler, FileFrameSink, FrameFormat, HighlightMode,
    JsonLinesSource, LayoutKind, OutputMode, RunReport,
};

#[derive(Parser, Debug)]
#[command(name = "graphstream-animate", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame bundle per step boundary into an output directory.
    Frames(FramesArgs),
    /// Lay out the whole stream and write one Graphviz snapshot.
    Snapshot(SnapshotArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Event log, one JSON event per line.
    #[arg(long)]
    events: PathBuf,

    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout provider.
    #[arg(long, value_enum)]
    layout: Option<LayoutChoice>,

    /// Layout seed. Derived from the clock (and logged) when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Global force multiplier (linlog).
    #[arg(long)]
    force: Option<f64>,

    /// Attraction exponent (linlog).
    #[arg(long, allow_negative_numbers = true)]
    attraction: Option<f64>,

    /// Repulsion exponent (linlog).
    #[arg(long, allow_negative_numbers = true)]
    repulsion: Option<f64>,

    /// Barnes–Hut angle (linlog, 0 = exact).
    #[arg(long)]
    theta: Option<f64>,

    /// Quality level in [0, 1] (springbox).
    #[arg(long)]
    quality: Option<f64>,

    /// Highlight mode for newly added nodes.
    #[arg(long, value_enum)]
    highlight: Option<HighlightChoice>,

    /// Highlight window length in frames.
    #[arg(long)]
    highlight_frames: Option<u32>,

    /// Size multiplier at the end of the highlight window.
    #[arg(long)]
    highlight_min: Option<f64>,

    /// Size multiplier at the start of the highlight window.
    #[arg(long)]
    highlight_max: Option<f64>,

    /// Halo color for highlighted nodes; empty disables it.
    #[arg(long)]
    shadow_color: Option<String>,

    /// Default node size.
    #[arg(long)]
    node_size: Option<u32>,

    /// Edge size.
    #[arg(long)]
    edge_size: Option<u32>,

    /// Label text size, 0 disables labels.
    #[arg(long)]
    label_size: Option<u32>,

    /// Frame background color.
    #[arg(long)]
    background: Option<String>,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Keep rewriting this SVG with the latest frame while running.
    #[arg(long)]
    live: Option<PathBuf>,

    /// More log output (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Existing output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Frame encodings (repeatable).
    #[arg(long = "format", value_enum)]
    formats: Vec<FormatChoice>,

    /// Frame file name prefix.
    #[arg(long)]
    prefix: Option<String>,

    /// Zero-pad width of the frame index.
    #[arg(long)]
    digits: Option<usize>,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Snapshot destination.
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Multiplier applied to layout coordinates.
    #[arg(long)]
    scale: Option<f64>,

    /// Graph name written into the snapshot.
    #[arg(long)]
    graph_name: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LayoutChoice {
    Linlog,
    Springbox,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HighlightChoice {
    FixedSize,
    HighlightNew,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Svg,
    Png,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Snapshot(args) => cmd_snapshot(args),
    }
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    init_tracing(&args.common);
    let mut cfg = load_config(&args.common)?;
    cfg.output.mode = OutputMode::Frames;
    if let Some(out) = args.out {
        cfg.output.dir = out;
    }
    if !args.formats.is_empty() {
        cfg.output.formats = args
            .formats
            .iter()
            .map(|f| match f {
                FormatChoice::Svg => FrameFormat::Svg,
                FormatChoice::Png => FrameFormat::Png,
            })
            .collect();
    }
    if let Some(prefix) = args.prefix {
        cfg.output.prefix = prefix;
    }
    if let Some(digits) = args.digits {
        cfg.output.index_digits = digits;
    }

    let report = run(cfg, &args.common)?;
    eprintln!(
        "wrote {} frames ({} nodes, {} edges), fingerprint {}",
        report.frames_emitted, report.nodes, report.edges, report.fingerprint
    );
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    init_tracing(&args.common);
    let mut cfg = load_config(&args.common)?;
    cfg.output.mode = OutputMode::Snapshot;
    if let Some(dot) = args.dot {
        cfg.output.snapshot_path = Some(dot);
    }
    if let Some(scale) = args.scale {
        cfg.output.snapshot_scale = scale;
    }
    if let Some(name) = args.graph_name {
        cfg.output.graph_name = name;
    }

    let dest = cfg.output.snapshot_path.clone();
    let report = run(cfg, &args.common)?;
    if let Some(dest) = dest {
        eprintln!(
            "wrote {} ({} nodes, {} edges)",
            dest.display(),
            report.nodes,
            report.edges
        );
    }
    Ok(())
}

fn run(cfg: AnimateConfig, common: &CommonArgs) -> anyhow::Result<RunReport> {
    cfg.validate()?;
    let sink = FileFrameSink::new(&cfg)?;
    let mut scheduler = AnimationScheduler::new(cfg, sink)?;
    let mut source = JsonLinesSource::open(&common.events)?;
    let report = scheduler
        .run(&mut source)
        .with_context(|| format!("animate '{}'", common.events.display()))?;
    Ok(report)
}

fn load_config(args: &CommonArgs) -> anyhow::Result<AnimateConfig> {
    let mut cfg = match &args.config {
        Some(path) => AnimateConfig::from_path(path)?,
        None => AnimateConfig::default(),
    };

    let l = &mut cfg.layout;
    if let Some(kind) = args.layout {
        l.kind = match kind {
            LayoutChoice::Linlog => LayoutKind::Linlog,
            LayoutChoice::Springbox => LayoutKind::Springbox,
        };
    }
    // An explicit seed in the config file wins over the clock.
    l.seed = match (args.seed, args.config.is_some()) {
        (Some(seed), _) => seed,
        (None, true) => l.seed,
        (None, false) => clock_seed()?,
    };
    tracing::info!(seed = l.seed, "layout seed");
    set(&mut l.force, args.force);
    set(&mut l.attraction, args.attraction);
    set(&mut l.repulsion, args.repulsion);
    set(&mut l.theta, args.theta);
    set(&mut l.quality, args.quality);

    let h = &mut cfg.highlight;
    if let Some(mode) = args.highlight {
        h.mode = match mode {
            HighlightChoice::FixedSize => HighlightMode::FixedSize,
            HighlightChoice::HighlightNew => HighlightMode::HighlightNew,
        };
    }
    set(&mut h.frame_count, args.highlight_frames);
    set(&mut h.size_min, args.highlight_min);
    set(&mut h.size_max, args.highlight_max);
    if let Some(color) = &args.shadow_color {
        h.shadow_color = Some(color.clone());
    }

    set(&mut cfg.style.node_size, args.node_size);
    set(&mut cfg.style.edge_size, args.edge_size);
    set(&mut cfg.style.label_size, args.label_size);
    if let Some(bg) = &args.background {
        cfg.style.background = bg.clone();
    }
    set(&mut cfg.output.width, args.width);
    set(&mut cfg.output.height, args.height);
    if let Some(live) = &args.live {
        cfg.live_preview = Some(live.clone());
    }
    Ok(cfg)
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn clock_seed() -> anyhow::Result<u64> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    Ok(now.as_millis() as u64)
}

fn init_tracing(args: &CommonArgs) {
    let level = if args.quiet {
        tracing::Level::ERROR
    } else {
        match args.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}
