use std::io;
use std::path::PathBuf;

use circlehough::image::io::{load_color_image, load_edge_image};
use circlehough::render::render_detections;
use circlehough::{detect, dist, DetectConfig, Detection, DistStrategy, ExecMode};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Count circles in a binary edge image")]
struct Cli {
    /// Binary edge image (output of an external edge detector).
    image: Option<PathBuf>,
    /// Voting execution mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Seq)]
    imp: ModeArg,
    /// Data distribution for process-parallel runs.
    #[arg(long, value_enum, default_value_t = StrategyArg::Full)]
    strategy: StrategyArg,
    /// Minimum circle radius.
    #[arg(long, default_value_t = 15)]
    min_radius: usize,
    /// Maximum circle radius.
    #[arg(long, default_value_t = 30)]
    max_radius: usize,
    /// Accumulator peak threshold.
    #[arg(long, default_value_t = 125)]
    peak_thresh: u32,
    /// Reduce each spatial bin to one local maximum.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    use_binning: bool,
    /// Bin size in pixels.
    #[arg(long, default_value_t = 32)]
    bin_size: usize,
    /// Drop detections closer than the spacing distance.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    use_spacing: bool,
    /// Spacing distance in pixels.
    #[arg(long, default_value_t = 40)]
    spacing_size: usize,
    /// Thread pool size for --imp threads.
    #[arg(long, default_value_t = 4)]
    threads: usize,
    /// Worker process count for --imp processes.
    #[arg(long, default_value_t = 2)]
    workers: usize,
    /// Grayscale value from which a pixel counts as an edge.
    #[arg(long, default_value_t = 255)]
    edge_thresh: u8,
    /// Write the input image with outlined detections to this path.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
    /// Internal: run as a spawned voting worker on stdin/stdout.
    #[arg(long, hide = true)]
    worker: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Seq,
    Threads,
    Processes,
}

impl From<ModeArg> for ExecMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Seq => ExecMode::Sequential,
            ModeArg::Threads => ExecMode::Threads,
            ModeArg::Processes => ExecMode::Processes,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Full,
    Crop,
}

impl From<StrategyArg> for DistStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Full => DistStrategy::ReplicateFull,
            StrategyArg::Crop => DistStrategy::CropWithHalo,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.worker {
        dist::run_worker(io::stdin().lock(), io::stdout().lock())?;
        return Ok(());
    }

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("circlehough=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    let image_path = cli.image.as_ref().ok_or("an input image path is required")?;
    let edges = load_edge_image(image_path, cli.edge_thresh)?;

    let config = DetectConfig {
        min_radius: cli.min_radius,
        max_radius: cli.max_radius,
        peak_threshold: cli.peak_thresh,
        use_binning: cli.use_binning,
        bin_size: cli.bin_size,
        use_spacing: cli.use_spacing,
        spacing_size: cli.spacing_size,
        mode: cli.imp.into(),
        thread_count: cli.threads,
        worker_count: cli.workers,
        strategy: cli.strategy.into(),
    };

    let detection = match config.mode {
        ExecMode::Processes => {
            let launcher = dist::WorkerLauncher::current_exe(vec!["--worker".into()])?;
            dist::detect(&edges, &config, &launcher)?
        }
        _ => detect(&edges, &config)?,
    };

    report(&detection);

    if let Some(output) = &cli.output {
        let base = load_color_image(image_path)?;
        let rendered = render_detections(&base, &detection.circles);
        rendered.save(output)?;
    }

    Ok(())
}

fn report(detection: &Detection) {
    for circle in &detection.circles {
        println!(
            "circle: x: {} y: {} r: {}",
            circle.x, circle.y, circle.radius
        );
    }
    println!("circle count: {}", detection.count());
    println!(
        "time elapsed (total): {:.3}ms",
        detection.timing.total.as_secs_f64() * 1000.0
    );
    println!(
        "time elapsed (voting): {:.3}ms",
        detection.timing.voting.as_secs_f64() * 1000.0
    );
    println!(
        "time elapsed (voting, no comm): {:.3}ms",
        detection.timing.voting_compute.as_secs_f64() * 1000.0
    );
}
