use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use facecrop_core::aesthetics::domain::quality_distribution::QualityDistribution;
use facecrop_core::aesthetics::domain::score_aggregator::ScoreAggregator;
use facecrop_core::aesthetics::domain::score_config::ScoreConfig;
use facecrop_core::alignment::domain::alignment_config::AlignmentConfig;
use facecrop_core::alignment::domain::geometric_aligner::GeometricAligner;
use facecrop_core::pipeline::batch_executor::{
    BatchConfig, BatchExecutor, BatchItem, SequentialBatchExecutor,
};
use facecrop_core::pipeline::infrastructure::threaded_batch_executor::ThreadedBatchExecutor;
use facecrop_core::shared::constants::DEFAULT_CROP_SIZE;
use facecrop_core::shared::json_file::read_json;

/// Face alignment transforms and aesthetic scores from detector output.
#[derive(Parser)]
#[command(name = "facecrop")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute crop transforms for detection record files.
    Align(AlignArgs),
    /// Reduce a quality distribution to a mean score.
    Score(ScoreArgs),
}

#[derive(Args)]
struct AlignArgs {
    /// JSON files, each an array of detection records.
    #[arg(required = true)]
    records: Vec<PathBuf>,

    /// Crop width in pixels.
    #[arg(long, default_value_t = DEFAULT_CROP_SIZE)]
    width: u32,

    /// Crop height in pixels.
    #[arg(long, default_value_t = DEFAULT_CROP_SIZE)]
    height: u32,

    /// Left eye x target as a fraction of the width (overrides --config).
    #[arg(long)]
    left_eye_x: Option<f64>,

    /// Eye line y target as a fraction of the height (overrides --config).
    #[arg(long)]
    left_eye_y: Option<f64>,

    /// Skip faces below this detection probability (0.0-1.0).
    #[arg(long, default_value = "0.0")]
    min_probability: f32,

    /// Worker threads (1 = run on the main thread; default: all cores).
    #[arg(long)]
    threads: Option<usize>,

    /// Alignment config JSON file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct ScoreArgs {
    /// Comma-separated bucket probabilities.
    #[arg(long, value_delimiter = ',', conflicts_with = "file")]
    probabilities: Option<Vec<f32>>,

    /// JSON file holding an array of bucket probabilities.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Reject distributions that do not have exactly this many buckets.
    #[arg(long)]
    buckets: Option<usize>,

    /// Score config JSON file (overrides --buckets).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct FileReport {
    source: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    faces: Option<Vec<FaceReport>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct FaceReport {
    probability: f32,
    width: u32,
    height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    transform: Option<[[f64; 3]; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Align(args) => run_align(&args),
        Command::Score(args) => run_score(&args),
    }
}

fn run_align(args: &AlignArgs) -> Result<(), Box<dyn std::error::Error>> {
    validate_align(args)?;

    let aligner = GeometricAligner::new(alignment_config(args)?)?;
    let config = BatchConfig {
        width: args.width,
        height: args.height,
        min_probability: args.min_probability,
    };
    let executor: Box<dyn BatchExecutor> = match args.threads {
        Some(1) => Box::new(SequentialBatchExecutor),
        Some(n) => Box::new(ThreadedBatchExecutor::with_workers(n)),
        None => Box::new(ThreadedBatchExecutor::new()),
    };

    let items = executor.execute(&args.records, &aligner, config)?;
    let reports: Vec<FileReport> = items.into_iter().map(|item| to_report(item, config)).collect();
    let failed = reports.iter().filter(|r| r.error.is_some()).count();

    println!("{}", serde_json::to_string_pretty(&reports)?);
    if failed > 0 {
        log::warn!("{failed} of {} files could not be read", reports.len());
    }
    Ok(())
}

fn run_score(args: &ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    validate_score(args)?;

    let config = match &args.config {
        Some(path) => ScoreConfig::load(path)?,
        None => ScoreConfig {
            bucket_count: args.buckets,
            ..ScoreConfig::default()
        },
    };
    let aggregator = ScoreAggregator::new(config)?;
    let distribution = match (&args.probabilities, &args.file) {
        (Some(values), _) => QualityDistribution::new(values.clone()),
        (None, Some(path)) => QualityDistribution::new(read_json(path)?),
        (None, None) => return Err("Either --probabilities or --file is required".into()),
    };

    let score = aggregator.aggregate(&distribution)?;
    println!("{score:.4}");
    Ok(())
}

/// File config first, then any explicit eye target flags on top.
fn alignment_config(args: &AlignArgs) -> Result<AlignmentConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => AlignmentConfig::load(path)?,
        None => AlignmentConfig::default(),
    };
    if let Some(x) = args.left_eye_x {
        config.desired_left_eye_x = x;
    }
    if let Some(y) = args.left_eye_y {
        config.desired_left_eye_y = y;
    }
    config.validate()?;
    Ok(config)
}

fn to_report(item: BatchItem, config: BatchConfig) -> FileReport {
    match item.faces {
        Ok(faces) => FileReport {
            source: item.path,
            faces: Some(
                faces
                    .into_iter()
                    .map(|face| {
                        let (transform, error) = match face.spec {
                            Ok(spec) => (Some(spec.transform.as_array()), None),
                            Err(e) => (None, Some(e.to_string())),
                        };
                        FaceReport {
                            probability: face.detection.probability(),
                            width: config.width,
                            height: config.height,
                            transform,
                            error,
                        }
                    })
                    .collect(),
            ),
            error: None,
        },
        Err(e) => FileReport {
            source: item.path,
            faces: None,
            error: Some(e.to_string()),
        },
    }
}

fn validate_align(args: &AlignArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(missing) = args.records.iter().find(|p| !p.exists()) {
        return Err(format!("Input file not found: {}", missing.display()).into());
    }
    if args.width == 0 || args.height == 0 {
        return Err(format!(
            "Crop size must be positive, got {}x{}",
            args.width, args.height
        )
        .into());
    }
    if !(0.0..=1.0).contains(&args.min_probability) {
        return Err(format!(
            "Min probability must be between 0.0 and 1.0, got {}",
            args.min_probability
        )
        .into());
    }
    if args.threads == Some(0) {
        return Err("Threads must be at least 1".into());
    }
    if let Some(config) = &args.config {
        ensure_exists(config)?;
    }
    Ok(())
}

fn validate_score(args: &ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.probabilities.is_none() && args.file.is_none() {
        return Err("Either --probabilities or --file is required".into());
    }
    if args.buckets == Some(0) {
        return Err("Buckets must be at least 1".into());
    }
    if let Some(file) = &args.file {
        ensure_exists(file)?;
    }
    if let Some(config) = &args.config {
        ensure_exists(config)?;
    }
    Ok(())
}

fn ensure_exists(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    Ok(())
}
