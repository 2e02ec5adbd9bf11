use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use svgstep::{Animator, NodeId, Script, SnapshotOpts, SvgDocument};

#[derive(Parser, Debug)]
#[command(name = "svgstep", version)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a script's labels, steps and scheduled entries as JSON.
    Inspect(Input),
    /// Seek to a time or step and write the diagram as PNG or SVG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct Input {
    /// Input SVG diagram.
    #[arg(long)]
    svg: PathBuf,

    /// Sequence script JSON.
    #[arg(long)]
    script: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: Input,

    /// Timeline position in seconds.
    #[arg(long, conflicts_with = "step", required_unless_present = "step")]
    time: Option<f64>,

    /// Step index (0-based); the playhead lands on that step's label.
    #[arg(long)]
    step: Option<usize>,

    /// Output path; `.svg` writes markup, anything else a PNG.
    #[arg(long)]
    out: PathBuf,

    /// Pixels per SVG unit (PNG only).
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Opaque white background instead of transparency (PNG only).
    #[arg(long, default_value_t = false)]
    opaque: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(input: &Input) -> anyhow::Result<Animator> {
    let text = std::fs::read_to_string(&input.svg)
        .with_context(|| format!("read svg '{}'", input.svg.display()))?;
    let doc = SvgDocument::parse(&text)?;
    let script = Script::from_path(&input.script)?;
    let mut animator = Animator::new(doc);
    script.apply(&mut animator)?;
    Ok(animator)
}

fn node_label(doc: &SvgDocument, id: NodeId) -> String {
    match doc.attr(id, "id") {
        Some(name) => format!("#{name}"),
        None => format!("{}@{}", doc.tag(id).unwrap_or("?"), id.0),
    }
}

fn cmd_inspect(args: Input) -> anyhow::Result<()> {
    let animator = load(&args)?;
    let doc = animator.document();
    let timeline = animator.timeline();

    let labels: Vec<_> = timeline
        .labels()
        .map(|(name, time)| json!({ "name": name, "time": time }))
        .collect();
    let steps: Vec<_> = animator
        .navigator()
        .steps()
        .map(|(name, time)| json!({ "name": name, "time": time }))
        .collect();
    let entries: Vec<_> = timeline
        .entries()
        .iter()
        .map(|e| {
            let targets: Vec<String> = e
                .targets()
                .into_iter()
                .map(|n| node_label(doc, n))
                .collect();
            json!({
                "kind": e.kind(),
                "span": e.span(),
                "ease": e.timing().ease,
                "stagger": e.timing().stagger,
                "targets": targets,
            })
        })
        .collect();

    let report = json!({
        "duration": timeline.duration(),
        "labels": labels,
        "steps": steps,
        "entries": entries,
        "warnings": animator.warnings(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut animator = load(&args.input)?;
    let time = match (args.time, args.step) {
        (Some(t), _) => t,
        (None, Some(step)) => {
            let total = animator.total_steps();
            animator
                .navigator()
                .steps()
                .nth(step)
                .map(|(_, t)| t)
                .with_context(|| format!("step {step} out of range (script has {total})"))?
        }
        (None, None) => anyhow::bail!("either --time or --step is required"),
    };
    animator.seek(time);
    tracing::debug!(time, "seeked");

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    if is_svg(&args.out) {
        std::fs::write(&args.out, svgstep::write_svg(animator.document()))
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        let opts = SnapshotOpts {
            scale: args.scale,
            background: args.opaque.then_some([255, 255, 255, 255]),
        };
        svgstep::rasterize(animator.document(), &opts)?.save_png(&args.out)?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}
