use std::process::ExitCode;

use crate::commands::base_commands::{OutputFormat, SimulateArgs};
use crate::commands::report_format::{build_workbook, format_master_report, format_workbook};
use crate::services::config_yaml::{ConfigYamlError, load_simulation_config_from_yaml_file};
use crate::services::histogram::write_histogram_png;
use crate::services::simulation::run_simulation;
use crate::services::simulation_types::{SimulationConfig, SimulationExport};

pub fn simulate_command(args: SimulateArgs) -> ExitCode {
    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load simulation config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let simulation = match run_simulation(&config) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Failed to run simulation: {e}");
            return ExitCode::FAILURE;
        }
    };

    let export = SimulationExport::new(&simulation, args.include_iterations);
    let serialized = match args.format {
        OutputFormat::Yaml => serde_yaml::to_string(&export).map_err(|e| e.to_string()),
        OutputFormat::Json => serde_json::to_string_pretty(&export).map_err(|e| e.to_string()),
    };
    let contents = match serialized {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to serialize simulation output: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = std::fs::write(&args.output, contents) {
        eprintln!("Failed to write simulation output: {e}");
        return ExitCode::FAILURE;
    }

    println!("{}", format_master_report(&simulation));
    println!("Simulation result written to {}", args.output);

    if let Some(sheets_path) = &args.sheets {
        let workbook = format_workbook(&build_workbook(&simulation));
        if let Err(e) = std::fs::write(sheets_path, workbook) {
            eprintln!("Failed to write sheets: {e}");
            return ExitCode::FAILURE;
        }
        println!("Sheets written to {sheets_path}");
    }

    if let Some(histogram_path) = &args.histogram {
        if let Err(e) = write_histogram_png(histogram_path, &simulation.daily_outputs()) {
            eprintln!("Failed to write simulation histogram: {e}");
            return ExitCode::FAILURE;
        }
        println!("Simulation histogram written to {histogram_path}");
    }

    ExitCode::SUCCESS
}

/// Starts from the config file (or the defaults) and applies the flags on top.
fn build_config(args: &SimulateArgs) -> Result<SimulationConfig, ConfigYamlError> {
    let mut config = match &args.config {
        Some(path) => load_simulation_config_from_yaml_file(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(days) = args.days {
        config.days = days;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(low) = args.low {
        config.roll_range.low = low;
    }
    if let Some(high) = args.high {
        config.roll_range.high = high;
    }
    if args.decimals {
        config.roll_range.integer_only = false;
    }
    config.seed = args.seed.or(config.seed);
    config.fixed_roll = args.fixed_roll.or(config.fixed_roll);
    Ok(config)
}
