use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use emergraph::{GraphRevealEngine, GraphSpec, RevealConfig, SimulateOpts, TimeMs};

#[derive(Parser, Debug)]
#[command(name = "emergraph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a graph JSON file.
    Validate(ValidateArgs),
    /// Replay the reveal cycle on a virtual clock and write sampled frames as JSON.
    Simulate(SimulateArgs),
    /// Drive the engine from the real clock, logging reveals as they happen.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input graph JSON. Omit to use the built-in demo graph.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input graph JSON. Omit to use the built-in demo graph.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output JSON path (array of sampled frames).
    #[arg(long)]
    out: PathBuf,

    /// Simulated time in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    duration_ms: u64,

    /// Virtual host tick granularity in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Snapshot cadence in milliseconds.
    #[arg(long, default_value_t = 100)]
    sample_ms: u64,

    #[command(flatten)]
    timing: TimingArgs,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input graph JSON. Omit to use the built-in demo graph.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// How long to play, in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    duration_ms: u64,

    /// Host tick granularity in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    #[command(flatten)]
    timing: TimingArgs,
}

#[derive(Parser, Debug)]
struct TimingArgs {
    /// Delay between revealing consecutive nodes.
    #[arg(long, default_value_t = 400)]
    node_interval_ms: u64,

    /// Delay between attempts to reveal the next edge.
    #[arg(long, default_value_t = 300)]
    edge_interval_ms: u64,

    /// Delay after a reveal before the entrance progress flips to 1.
    #[arg(long, default_value_t = 50)]
    entrance_delay_ms: u64,

    /// Pause after the full sequence before the cycle restarts.
    #[arg(long, default_value_t = 3000)]
    quiescence_ms: u64,
}

impl TimingArgs {
    fn to_config(&self) -> RevealConfig {
        RevealConfig {
            node_interval_ms: self.node_interval_ms,
            edge_interval_ms: self.edge_interval_ms,
            entrance_delay_ms: self.entrance_delay_ms,
            quiescence_ms: self.quiescence_ms,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_graph_json(path: Option<&Path>) -> anyhow::Result<GraphSpec> {
    let Some(path) = path else {
        return Ok(GraphSpec::demo());
    };
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open graph '{}'", path.display()))?;
    let graph = GraphSpec::from_json_str(&s).with_context(|| "parse graph JSON")?;
    Ok(graph)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let graph = read_graph_json(args.in_path.as_deref())?;
    graph.validate()?;
    eprintln!(
        "ok: {} node(s), {} edge(s)",
        graph.nodes.len(),
        graph.edges.len()
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let graph = read_graph_json(args.in_path.as_deref())?;

    let opts = SimulateOpts {
        tick_ms: args.tick_ms,
        duration_ms: args.duration_ms,
        sample_every_ms: args.sample_ms,
        ..SimulateOpts::default()
    };
    let frames = emergraph::simulate(graph, args.timing.to_config(), opts)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = std::fs::File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    serde_json::to_writer_pretty(f, &frames).with_context(|| "write frames JSON")?;

    eprintln!("wrote {} ({} frames)", args.out.display(), frames.len());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let graph = read_graph_json(args.in_path.as_deref())?;
    let mut engine = GraphRevealEngine::new(graph, args.timing.to_config())?;

    let start = Instant::now();
    loop {
        let now = TimeMs(u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX));
        engine.tick(now);
        if now.0 >= args.duration_ms {
            break;
        }
        std::thread::sleep(Duration::from_millis(args.tick_ms.max(1)));
    }

    eprintln!(
        "played {} ms: {} cycle(s) completed, {} node(s) / {} edge(s) currently revealed",
        args.duration_ms,
        engine.cycles_completed(),
        engine.state().revealed_nodes.len(),
        engine.state().revealed_edges.len()
    );
    Ok(())
}
