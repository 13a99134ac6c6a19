//! Command-line front end for the busy-hour analysis engine.
//!
//! Two data sources are supported: stochastic simulation from a pair of
//! distribution files, or a folder of measured day-profile CSVs. Settings
//! may also come from a TOML configuration file.

use std::path::PathBuf;
use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;

use bha_rust::algorithms::{AnalysisResult, SimulationOptions};
use bha_rust::services::{AppConfig, EngineError, EngineResult, LoadSummary, TrafficEngine};

#[derive(Debug)]
enum Source {
    Simulate {
        holding_path: PathBuf,
        intensity_path: PathBuf,
    },
    Folder(PathBuf),
}

#[derive(Debug)]
struct CliArgs {
    source: Option<Source>,
    config_path: Option<PathBuf>,
    day_count: Option<usize>,
    start_hour: Option<f64>,
    end_hour: Option<f64>,
    seed: Option<u64>,
    json: bool,
}

const USAGE: &str = "\
Usage:
  traffic_report --simulate <holding_times> <intensity> [options]
  traffic_report --folder <dir> [options]
  traffic_report --config <app.toml> [options]

Options:
  --days <n>     Number of days to simulate (default 31)
  --from <hour>  Analysis window start, fractional hours (default 0)
  --to <hour>    Analysis window end, fractional hours (default 24)
  --seed <n>     Seed for a reproducible simulation
  --json         Emit the result as JSON instead of a report
";

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs {
        source: None,
        config_path: None,
        day_count: None,
        start_hour: None,
        end_hour: None,
        seed: None,
        json: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--simulate" => {
                let holding = iter
                    .next()
                    .ok_or("--simulate requires <holding_times> <intensity>")?;
                let intensity = iter
                    .next()
                    .ok_or("--simulate requires <holding_times> <intensity>")?;
                parsed.source = Some(Source::Simulate {
                    holding_path: PathBuf::from(holding),
                    intensity_path: PathBuf::from(intensity),
                });
            }
            "--folder" => {
                let dir = iter.next().ok_or("--folder requires <dir>")?;
                parsed.source = Some(Source::Folder(PathBuf::from(dir)));
            }
            "--config" => {
                let path = iter.next().ok_or("--config requires <app.toml>")?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "--days" => {
                let value = iter.next().ok_or("--days requires a number")?;
                parsed.day_count =
                    Some(value.parse().map_err(|_| format!("Invalid --days: {}", value))?);
            }
            "--from" => {
                let value = iter.next().ok_or("--from requires an hour")?;
                parsed.start_hour =
                    Some(value.parse().map_err(|_| format!("Invalid --from: {}", value))?);
            }
            "--to" => {
                let value = iter.next().ok_or("--to requires an hour")?;
                parsed.end_hour =
                    Some(value.parse().map_err(|_| format!("Invalid --to: {}", value))?);
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed requires a number")?;
                parsed.seed =
                    Some(value.parse().map_err(|_| format!("Invalid --seed: {}", value))?);
            }
            "--json" => parsed.json = true,
            "--help" | "-h" => return Err(String::new()),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    if parsed.source.is_none() && parsed.config_path.is_none() {
        return Err("One of --simulate, --folder or --config is required".to_string());
    }
    Ok(parsed)
}

/// Merges the config file (if any) with command-line overrides.
fn resolve(args: &CliArgs) -> EngineResult<(Source, SimulationOptions, f64, f64, Option<u64>)> {
    let config = match &args.config_path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    let source = match &args.source {
        Some(Source::Simulate {
            holding_path,
            intensity_path,
        }) => Source::Simulate {
            holding_path: holding_path.clone(),
            intensity_path: intensity_path.clone(),
        },
        Some(Source::Folder(dir)) => Source::Folder(dir.clone()),
        None if !config.input.profile_folder.is_empty() => {
            Source::Folder(PathBuf::from(&config.input.profile_folder))
        }
        None if !config.input.holding_times.is_empty()
            && !config.input.intensity.is_empty() =>
        {
            Source::Simulate {
                holding_path: PathBuf::from(&config.input.holding_times),
                intensity_path: PathBuf::from(&config.input.intensity),
            }
        }
        None => {
            return Err(EngineError::Configuration(
                "Config file names no input source".to_string(),
            ))
        }
    };

    let mut options = SimulationOptions::from(&config.simulation);
    if let Some(days) = args.day_count {
        options.day_count = days;
    }
    let start_hour = args.start_hour.unwrap_or(config.analysis.start_hour);
    let end_hour = args.end_hour.unwrap_or(config.analysis.end_hour);
    let seed = args.seed.or(config.simulation.seed);

    Ok((source, options, start_hour, end_hour, seed))
}

fn run(args: &CliArgs) -> EngineResult<(LoadSummary, AnalysisResult)> {
    let (source, options, start_hour, end_hour, seed) = resolve(args)?;

    let mut engine = TrafficEngine::new();
    let summary = match &source {
        Source::Simulate {
            holding_path,
            intensity_path,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            engine.load_and_simulate(holding_path, intensity_path, options, &mut rng)?
        }
        Source::Folder(dir) => engine.load_folder(dir)?,
    };

    let result = engine.analyze(start_hour, end_hour).ok_or_else(|| {
        EngineError::InvalidInput(
            "Analysis window must span at least one full hour".to_string(),
        )
    })?;

    Ok((summary, result))
}

fn print_report(summary: &LoadSummary, result: &AnalysisResult) {
    println!("=== Busy-Hour Traffic Report ===");
    println!("Days analyzed:     {}", result.day_count);
    if summary.skipped_files > 0 {
        println!("Files skipped:     {}", summary.skipped_files);
    }
    println!("Loaded at:         {}", summary.loaded_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();
    println!("Busy hour (TCBH):  {}", result.tcbh_label);
    println!("TCBH traffic:      {:.4} Erl", result.tcbh_erl);
    println!("ADPH traffic:      {:.4} Erl", result.adph_erl);
    println!("FDMH traffic:      {:.4} Erl", result.fdmh_erl);
    println!(
        "95% margin:        +/- {:.4} Erl ({:.1}%)",
        result.confidence_margin_erl,
        result.margin_percent()
    );
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("{}", message);
                eprintln!();
            }
            eprint!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match run(&parsed) {
        Ok((summary, result)) => {
            if parsed.json {
                match serde_json::to_string_pretty(&result) {
                    Ok(json) => println!("{}", json),
                    Err(err) => {
                        eprintln!("Failed to serialize result: {}", err);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_report(&summary, &result);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Analysis failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
