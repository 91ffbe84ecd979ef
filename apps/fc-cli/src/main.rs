use clap::{Parser, Subcommand, ValueEnum};
use fc_app::{AppError, AppResult, ReferenceOutcome, RunOutcome, run_reference, run_scenario};
use fc_project::{
    BUILTIN_NAMES, ControllerDef, LATEST_VERSION, PlantDef, Scenario, SetpointDef,
    SetpointStepDef, builtin, from_json_str, from_yaml_str, validate_scenario,
};
use fc_results::{to_csv, to_json, to_table};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "fc-cli")]
#[command(about = "flowctl CLI - PI control of a stochastic work buffer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum OutputFormat {
    /// Headline numbers and per-segment convergence
    #[default]
    Summary,
    /// One `t r e u y` row per tick
    Table,
    /// CSV with a header row
    Csv,
    /// Parallel arrays as JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Open loop then closed loop on one shared plant
    Reference {
        /// Fixed seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Ticks per phase (default 1000)
        #[arg(long)]
        ticks: Option<usize>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Run a scenario file (YAML or JSON) or a built-in scenario by name
    Run {
        /// Path to the scenario file, or a built-in name
        scenario: String,
        /// Seed overriding the scenario's own
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Validate a scenario file
    Validate {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// List built-in scenarios
    Builtins,
    /// Drive the buffer directly with a constant target
    OpenLoop {
        #[arg(long, default_value_t = 50)]
        max_wip: i64,
        #[arg(long, default_value_t = 10)]
        max_flow: i64,
        #[arg(long, default_value_t = 1000)]
        ticks: i64,
        #[arg(long, default_value_t = 5.0)]
        target: f64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Drive the buffer through a PI controller
    ClosedLoop {
        #[arg(long, default_value_t = 50)]
        max_wip: i64,
        #[arg(long, default_value_t = 10)]
        max_flow: i64,
        #[arg(long, default_value_t = 1000)]
        ticks: i64,
        #[arg(long, default_value_t = 1.25)]
        kp: f64,
        #[arg(long, default_value_t = 0.01)]
        ki: f64,
        /// Schedule as `initial[,tick:value...]`
        #[arg(long, default_value = "0,100:50,300:10")]
        setpoint: String,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Reference {
            seed,
            ticks,
            format,
        } => cmd_reference(seed, ticks, format),
        Commands::Run {
            scenario,
            seed,
            format,
        } => cmd_run(&scenario, seed, format),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Builtins => {
            for name in BUILTIN_NAMES {
                println!("{name}");
            }
            Ok(())
        }
        Commands::OpenLoop {
            max_wip,
            max_flow,
            ticks,
            target,
            seed,
            format,
        } => {
            let scenario = Scenario {
                version: LATEST_VERSION,
                name: "open-loop".to_string(),
                seed,
                total_ticks: ticks,
                plant: PlantDef { max_wip, max_flow },
                controller: None,
                setpoint: SetpointDef::Constant { value: target },
            };
            let outcome = run_scenario(&scenario, None)?;
            render(&outcome, format)
        }
        Commands::ClosedLoop {
            max_wip,
            max_flow,
            ticks,
            kp,
            ki,
            setpoint,
            seed,
            format,
        } => {
            let scenario = Scenario {
                version: LATEST_VERSION,
                name: "closed-loop".to_string(),
                seed,
                total_ticks: ticks,
                plant: PlantDef { max_wip, max_flow },
                controller: Some(ControllerDef { kp, ki }),
                setpoint: parse_schedule(&setpoint)?,
            };
            let outcome = run_scenario(&scenario, None)?;
            render(&outcome, format)
        }
    }
}

fn cmd_reference(seed: Option<u64>, ticks: Option<usize>, format: OutputFormat) -> AppResult<()> {
    let outcome = run_reference(seed, ticks)?;
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome)
                .map_err(|e| AppError::Results(e.to_string()))?;
            println!("{json}");
            Ok(())
        }
        _ => {
            let ReferenceOutcome { open, closed } = outcome;
            println!("# open loop");
            render(&open, format)?;
            println!();
            println!("# closed loop");
            render(&closed, format)
        }
    }
}

fn cmd_run(scenario: &str, seed: Option<u64>, format: OutputFormat) -> AppResult<()> {
    let scenario = match builtin(scenario) {
        Some(s) => s,
        None => load_scenario(Path::new(scenario))?,
    };
    let outcome = run_scenario(&scenario, seed)?;
    render(&outcome, format)
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = load_scenario(scenario_path)?;
    validate_scenario(&scenario)?;
    let mode = if scenario.is_closed_loop() {
        "closed loop"
    } else {
        "open loop"
    };
    println!(
        "✓ Scenario '{}' is valid ({mode}, {} ticks)",
        scenario.name, scenario.total_ticks
    );
    Ok(())
}

fn load_scenario(path: &Path) -> AppResult<Scenario> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let scenario = if is_json {
        from_json_str(&content)?
    } else {
        from_yaml_str(&content)?
    };
    info!(path = %path.display(), name = %scenario.name, "loaded scenario");
    Ok(scenario)
}

/// Parse `initial[,tick:value...]` into a piecewise schedule.
fn parse_schedule(text: &str) -> AppResult<SetpointDef> {
    let mut parts = text.split(',').map(str::trim);
    let initial = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InvalidInput("empty setpoint schedule".to_string()))
        .and_then(|s| parse_number::<f64>(s, "setpoint initial value"))?;

    let mut steps = Vec::new();
    for part in parts {
        let (tick, value) = part.split_once(':').ok_or_else(|| {
            AppError::InvalidInput(format!("setpoint step '{part}' is not tick:value"))
        })?;
        steps.push(SetpointStepDef {
            from_tick: parse_number(tick.trim(), "setpoint step tick")?,
            value: parse_number(value.trim(), "setpoint step value")?,
        });
    }
    Ok(SetpointDef::Piecewise { initial, steps })
}

fn parse_number<T: std::str::FromStr>(text: &str, what: &str) -> AppResult<T> {
    text.parse()
        .map_err(|_| AppError::InvalidInput(format!("invalid {what}: '{text}'")))
}

fn render(outcome: &RunOutcome, format: OutputFormat) -> AppResult<()> {
    let series = &outcome.result.series;
    match format {
        OutputFormat::Summary => print_summary(outcome),
        OutputFormat::Table => print!("{}", to_table(series)),
        OutputFormat::Csv => print!("{}", to_csv(series)),
        OutputFormat::Json => println!("{}", to_json(series)?),
    }
    Ok(())
}

fn print_summary(outcome: &RunOutcome) {
    let s = &outcome.summary;
    println!("Scenario:        {}", outcome.result.name);
    println!("Mode:            {:?}", outcome.result.mode);
    match outcome.seed {
        Some(seed) => println!("Seed:            {seed}"),
        None => println!("Seed:            (entropy)"),
    }
    println!("Ticks:           {}", s.ticks);
    if let (Some(min), Some(max), Some(mean)) = (s.output_min, s.output_max, s.output_mean) {
        println!("Output:          min {min}, max {max}, mean {mean:.2}");
    }
    if let Some(y) = s.final_output {
        println!("Final output:    {y}");
    }
    if let Some(mae) = s.mean_abs_residue {
        println!("Mean |residue|:  {mae:.3}");
    }
    if let Some(integral) = outcome.final_integral {
        println!("Final integral:  {integral:.3}");
    }
    println!(
        "Plant pools:     queued {}, wip {}",
        outcome.final_plant_state.queued, outcome.final_plant_state.work_in_progress
    );
    if !s.segments.is_empty() {
        println!("Segments:");
        for c in &s.segments {
            let late = c
                .late_mae
                .map_or_else(|| "-".to_string(), |v| format!("{v:.3}"));
            let mark = if c.is_converging() { "✓" } else { "✗" };
            println!(
                "  {mark} t={:>5}..{:<5} r={:<8} early |e| {:.3}, late |e| {late}",
                c.segment.start, c.segment.end, c.segment.set_point, c.early_mae
            );
        }
    }
}
