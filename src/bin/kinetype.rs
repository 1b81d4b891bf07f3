use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "kinetype", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the character grid with per-line start times.
    Layout(LayoutArgs),
    /// List clip slots in a time window with the clip selected for each.
    Schedule(ScheduleArgs),
    /// Run the engine headless and log clip and transition changes.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Content JSON (title, films, body, credits).
    #[arg(long)]
    content: PathBuf,

    /// Optional engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Available width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Cell width in pixels.
    #[arg(long, default_value_t = 10.0)]
    char_width: f64,

    /// Cell height in pixels.
    #[arg(long, default_value_t = 18.0)]
    line_height: f64,

    /// Header gutter width in pixels.
    #[arg(long, default_value_t = 0.0)]
    gutter: f64,
}

impl SceneArgs {
    fn params(&self) -> kinetype::LayoutParams {
        kinetype::LayoutParams {
            char_width_px: self.char_width,
            line_height_px: self.line_height,
            max_width_px: self.width,
            gutter_width_px: self.gutter,
        }
    }
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    #[command(flatten)]
    scene: SceneArgs,
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Clip manifest JSON (array of `{url, image, duration}`).
    #[arg(long)]
    manifest: PathBuf,

    /// Window start in seconds.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Window end in seconds.
    #[arg(long, default_value_t = 60.0)]
    to: f64,

    /// Session seed (overrides the config).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Clip manifest JSON (array of `{url, image, duration}`).
    #[arg(long)]
    manifest: PathBuf,

    /// Simulated duration in seconds.
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,

    /// Ticks per simulated second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Session seed (overrides the config).
    #[arg(long)]
    seed: Option<u64>,

    /// Click the first film link at this time.
    #[arg(long)]
    exit_at: Option<f64>,
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
        Command::Layout(args) => cmd_layout(args),
        Command::Schedule(args) => cmd_schedule(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<kinetype::EngineConfig> {
    let Some(path) = path else {
        return Ok(kinetype::EngineConfig::default());
    };
    kinetype::EngineConfig::from_path(path)
        .with_context(|| format!("load config '{}'", path.display()))
}

fn read_content(path: &Path) -> anyhow::Result<kinetype::Content> {
    let content = kinetype::Content::from_path(path)
        .with_context(|| format!("load content '{}'", path.display()))?;
    content.validate()?;
    Ok(content)
}

fn read_manifest(path: &Path) -> anyhow::Result<kinetype::ClipCatalog> {
    let catalog = kinetype::ClipCatalog::from_path(path)
        .with_context(|| format!("load manifest '{}'", path.display()))?;
    catalog.validate()?;
    Ok(catalog)
}

fn make_orchestrator(
    scene: &SceneArgs,
    manifest: &Path,
    seed: Option<u64>,
) -> anyhow::Result<kinetype::Orchestrator> {
    let mut config = read_config(scene.config.as_deref())?;
    if seed.is_some() {
        config.seed = seed;
    }
    let content = read_content(&scene.content)?;
    let catalog = read_manifest(manifest)?;

    let mut orch = kinetype::Orchestrator::new(config, content, catalog)?;
    orch.set_layout_params(scene.params())
        .context("apply layout params")?;
    Ok(orch)
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let config = read_config(args.scene.config.as_deref())?;
    let content = read_content(&args.scene.content)?;
    let layout = kinetype::TextLayout::new(args.scene.params(), &content, &config.layout)?;

    eprintln!(
        "breakpoint {:?}, {}x{} cells, {:.3}s",
        layout.breakpoint(),
        layout.width_chars(),
        layout.height_chars(),
        layout.duration()
    );
    for i in 0..layout.line_count() {
        let text: String = layout.line(i).iter().map(|c| c.value.as_str()).collect();
        println!("{:>9.3} |{}|", layout.line_delay(i), text);
    }
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.from.is_finite() && args.to.is_finite(),
        "--from and --to must be finite"
    );
    let orch = make_orchestrator(&args.scene, &args.manifest, args.seed)?;
    let timeline = orch
        .timeline()
        .context("layout produced no timeline (bug)")?;

    eprintln!("global seed {}", orch.selector().global_seed());
    for slot in timeline.sample(args.from, args.to) {
        let clip = orch
            .selector()
            .select(orch.catalog(), slot.index, slot.duration, None);
        println!(
            "{:>6} {:>9.3} {:>8.3}  {}",
            slot.index,
            slot.start_time,
            slot.duration,
            clip.map_or("-", |c| c.url.as_str())
        );
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");
    anyhow::ensure!(
        args.seconds.is_finite() && args.seconds >= 0.0,
        "--seconds must be finite and >= 0"
    );
    let mut orch = make_orchestrator(&args.scene, &args.manifest, args.seed)?;

    let layout = orch.layout().context("layout missing after sizing (bug)")?;
    let text = kinetype::Rect::new(0.0, 0.0, layout.width_px(), layout.height_px());
    orch.set_rects(kinetype::ViewRects {
        viewport: text,
        player: kinetype::Rect::new(0.0, -1.0e6, 0.0, 0.0),
        text,
    });

    let dt = 1.0 / f64::from(args.fps);
    let frames = (args.seconds * f64::from(args.fps)).ceil() as u64;
    let mut exit_requested = false;
    let mut last_clip: Option<String> = None;
    let mut last_kind = orch.transition_kind();
    let exit_link = orch.content().links().next().cloned();

    for _ in 0..frames {
        if let Some(at) = args.exit_at
            && !exit_requested
            && orch.time() >= at
        {
            exit_requested = true;
            let clicked = exit_link.clone().is_some_and(|link| orch.click_link(link));
            if !clicked {
                orch.transition_out(exit_link.clone());
            }
        }

        orch.tick(dt);

        let clip = orch.current_clip().map(|c| c.url.clone());
        if clip != last_clip {
            println!(
                "{:>9.3} clip {}",
                orch.time(),
                clip.as_deref().unwrap_or("-")
            );
            last_clip = clip;
        }
        let kind = orch.transition_kind();
        if kind != last_kind {
            println!("{:>9.3} transition {kind:?}", orch.time());
            last_kind = kind;
        }
        if let Some(link) = orch.exit_complete() {
            println!("{:>9.3} exit complete -> {}", orch.time(), link.url);
            break;
        }
    }

    let lit = orch.lit_chars().count();
    eprintln!(
        "simulated {:.3}s, {} visible cells, {} lit",
        orch.time(),
        orch.visible_chars().len(),
        lit
    );
    Ok(())
}
