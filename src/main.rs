mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clip_sim::config::SimConfig;
use clip_sim::features::FeatureSetRegistry;
use clip_sim::predictor::AnyPredictor;
use clip_sim::simulation::{Scenario, SimulationRunner};
use clip_sim::{format_float, format_percent, AiContentAnalysis, ContentRecord};

#[derive(Parser)]
#[command(name = "clip-sim", about = "Short-video virality feature extraction and simulation")]
struct Cli {
    /// Path to a TOML config file; falls back to SIM_CONFIG_PATH, then
    /// config/simulation.toml, then built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a feature vector from a content record
    Extract(ExtractArgs),
    /// Simulate publication scenarios for a content record
    Simulate(SimulateArgs),
    /// Run the HTTP API server
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct ExtractArgs {
    /// Content record JSON file, or "-" for stdin
    #[arg(long)]
    content: String,
    /// Optional AI analysis JSON file
    #[arg(long)]
    analysis: Option<PathBuf>,
    /// Comma-separated feature-set pipeline override
    #[arg(long)]
    sets: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct SimulateArgs {
    /// Content record JSON file, or "-" for stdin
    #[arg(long)]
    content: String,
    /// Scenarios JSON file (array of scenarios); omit to build one scenario
    /// from the flags below
    #[arg(long)]
    scenarios: Option<PathBuf>,
    #[arg(long, default_value = "plan")]
    name: String,
    #[arg(long, default_value_t = 12)]
    hour: u8,
    #[arg(long, default_value = "wednesday")]
    day: String,
    /// Comma-separated hashtags
    #[arg(long)]
    hashtags: Option<String>,
    #[arg(long)]
    text_overlays: bool,
    #[arg(long)]
    transitions: bool,
    #[arg(long)]
    call_to_action: bool,
    #[arg(long, default_value_t = 1.0)]
    engagement_multiplier: f64,
    #[arg(long, default_value_t = 1.0)]
    reach_multiplier: f64,
    #[arg(long)]
    video_length: Option<f64>,
    #[arg(long)]
    trials: Option<usize>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Use the offline heuristic scorer instead of the model service
    #[arg(long)]
    offline: bool,
    /// Print the full report as JSON instead of the summary
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    /// Use the offline heuristic scorer instead of the model service
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, _path) = SimConfig::load(cli.config)?;

    match cli.command {
        Command::Extract(args) => run_extract(args, config),
        Command::Simulate(args) => run_simulate(args, config).await,
        Command::Serve(args) => server::serve(args, config).await,
    }
}

fn run_extract(args: ExtractArgs, config: SimConfig) -> Result<(), String> {
    let content: ContentRecord = read_json_input(&args.content)?;
    let analysis: Option<AiContentAnalysis> = match args.analysis {
        Some(path) => Some(read_json_file(&path)?),
        None => None,
    };

    let requested: Option<Vec<String>> = args.sets.map(|sets| {
        sets.split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    });

    let registry = FeatureSetRegistry::with_defaults(&config);
    let response = api::extract(
        &registry,
        api::ExtractRequest {
            content,
            analysis,
            feature_sets: requested,
        },
        &config.pipeline,
    )
    .map_err(|err| err.to_string())?;

    let payload = serde_json::to_string_pretty(&response)
        .map_err(|err| format!("failed to serialize features: {}", err))?;
    println!("{}", payload);
    Ok(())
}

async fn run_simulate(args: SimulateArgs, config: SimConfig) -> Result<(), String> {
    let content: ContentRecord = read_json_input(&args.content)?;
    let scenarios: Vec<Scenario> = match &args.scenarios {
        Some(path) => read_json_file(path)?,
        None => vec![scenario_from_args(&args)?],
    };

    let predictor = AnyPredictor::from_config(&config.predictor, args.offline)
        .map_err(|err| err.to_string())?;
    let runner = SimulationRunner::new(&config, &predictor);
    let report = runner
        .run(&content, &scenarios, args.trials, args.seed)
        .await
        .map_err(|err| err.to_string())?;

    if args.json {
        let payload = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("failed to serialize report: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    println!("Baseline score: {}", format_float(report.baseline_score, 3));
    println!(
        "Best plan: {} ({})",
        report.best_scenario_name,
        format_float(report.best_score, 3)
    );
    println!(
        "Improvement potential: {}",
        format_percent(report.summary.improvement_potential)
    );
    println!(
        "Scenarios tested: {} | trials: {}",
        report.summary.scenarios_tested, report.summary.total_trials
    );
    println!();
    for scenario in &report.scenarios {
        println!(
            "  {:<40} avg {} (worst {} | best {})",
            scenario.name,
            format_float(scenario.average_score, 3),
            format_float(scenario.worst_score, 3),
            format_float(scenario.best_score, 3)
        );
        for variation in &scenario.variations {
            println!(
                "    {:<38} avg {}",
                variation.name,
                format_float(variation.average_score, 3)
            );
        }
        for recommendation in &scenario.recommendations {
            println!("    * {}", recommendation);
        }
    }
    if !report.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for recommendation in &report.recommendations {
            println!("  - {}", recommendation);
        }
    }
    Ok(())
}

fn scenario_from_args(args: &SimulateArgs) -> Result<Scenario, String> {
    let day = clip_sim::DayOfWeek::from_str(&args.day)
        .ok_or_else(|| format!("invalid day: {}", args.day))?;
    let hashtags = args
        .hashtags
        .as_deref()
        .map(|tags| {
            tags.split(',')
                .map(|tag| tag.trim().trim_start_matches('#').to_string())
                .filter(|tag| !tag.is_empty())
                .collect()
        })
        .unwrap_or_default();

    Ok(Scenario {
        name: args.name.clone(),
        description: String::new(),
        publication_hour: args.hour,
        publication_day: day,
        hashtags,
        has_text_overlays: args.text_overlays,
        has_transitions: args.transitions,
        has_call_to_action: args.call_to_action,
        engagement_multiplier: args.engagement_multiplier,
        reach_multiplier: args.reach_multiplier,
        video_length_seconds: args.video_length,
    })
}

fn read_json_input<T: serde::de::DeserializeOwned>(source: &str) -> Result<T, String> {
    let contents = if source == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|err| format!("failed reading stdin: {}", err))?;
        buffer
    } else {
        std::fs::read_to_string(source)
            .map_err(|err| format!("failed to read {}: {}", source, err))?
    };
    serde_json::from_str(&contents).map_err(|err| format!("failed to parse {}: {}", source, err))
}

fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    serde_json::from_str(&contents)
        .map_err(|err| format!("failed to parse {}: {}", path.display(), err))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
