use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::grid::GridError;
use crate::services::capacity_source::{
    CapacityError, CapacitySource, FixedCapacitySource, UniformCapacitySource, populate_grid,
};
use crate::services::iteration::summarize;
use crate::services::percentiles::OutputPercentiles;
use crate::services::run_aggregator::{AggregationError, reduce};
use crate::services::simulation_types::{SimulationConfig, SimulationOutput, daily_outputs};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("number of days must be greater than zero")]
    InvalidDays,
    #[error("number of workers must be greater than zero")]
    InvalidWorkers,
    #[error("iterations must be greater than zero")]
    InvalidIterations,
    #[error("invalid capacity settings: {0}")]
    Capacity(#[from] CapacityError),
    #[error("failed to build grid: {0}")]
    Grid(#[from] GridError),
    #[error("failed to aggregate iterations: {0}")]
    Aggregation(#[from] AggregationError),
}

/// Runs the configured number of iterations with rolls drawn from the
/// configured range, seeded when `config.seed` is set.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationOutput, SimulationError> {
    validate_config(config)?;
    if let Some(roll) = config.fixed_roll {
        let mut source = FixedCapacitySource::new(roll)?;
        return run_simulation_with_source(config, &mut source);
    }
    match config.seed {
        Some(seed) => run_simulation_with_rng(config, StdRng::seed_from_u64(seed)),
        None => run_simulation_with_rng(config, rand::thread_rng()),
    }
}

pub fn run_simulation_with_rng<R: Rng>(
    config: &SimulationConfig,
    rng: R,
) -> Result<SimulationOutput, SimulationError> {
    let mut source = UniformCapacitySource::new(config.roll_range, rng)?;
    run_simulation_with_source(config, &mut source)
}

pub fn run_simulation_with_source<S: CapacitySource + ?Sized>(
    config: &SimulationConfig,
    source: &mut S,
) -> Result<SimulationOutput, SimulationError> {
    validate_config(config)?;
    info!(
        days = config.days,
        workers = config.workers,
        iterations = config.iterations,
        "starting simulation"
    );

    let mut iterations = Vec::with_capacity(config.iterations);
    for iteration in 1..=config.iterations {
        let grid = populate_grid(config.days, config.workers, source)?;
        let result = summarize(grid);
        debug!(
            iteration,
            total_roll = result.totals.total_roll,
            total_wip = result.totals.total_wip,
            "iteration resolved"
        );
        iterations.push(result);
    }

    let master = reduce(&iterations, config.iterations)?;
    let daily_output = OutputPercentiles::from_values(&daily_outputs(&iterations));
    info!(
        avg_daily_output = master.totals.avg_daily_output,
        overall_avg_wip = master.totals.overall_avg_wip,
        "simulation finished"
    );

    Ok(SimulationOutput {
        config: config.clone(),
        master,
        iterations,
        daily_output,
    })
}

fn validate_config(config: &SimulationConfig) -> Result<(), SimulationError> {
    if config.days == 0 {
        return Err(SimulationError::InvalidDays);
    }
    if config.workers == 0 {
        return Err(SimulationError::InvalidWorkers);
    }
    if config.iterations == 0 {
        return Err(SimulationError::InvalidIterations);
    }
    config.roll_range.validate()?;
    Ok(())
}
