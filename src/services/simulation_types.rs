use serde::Serialize;

use crate::domain::summary::{IterationResult, MasterResult};
use crate::services::capacity_source::RollRange;
use crate::services::percentiles::OutputPercentiles;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub days: usize,
    pub workers: usize,
    pub iterations: usize,
    pub roll_range: RollRange,
    pub seed: Option<u64>,
    /// Replaces random rolls with this capacity for every cell.
    pub fixed_roll: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 10,
            workers: 6,
            iterations: 100,
            roll_range: RollRange::default(),
            seed: None,
            fixed_roll: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub config: SimulationConfig,
    pub master: MasterResult,
    pub iterations: Vec<IterationResult>,
    /// Spread of the average daily output over all iterations.
    pub daily_output: OutputPercentiles,
}

impl SimulationOutput {
    pub fn daily_outputs(&self) -> Vec<f64> {
        daily_outputs(&self.iterations)
    }
}

/// Average daily output of each iteration, in run order.
pub fn daily_outputs(iterations: &[IterationResult]) -> Vec<f64> {
    iterations
        .iter()
        .map(|result| result.totals.avg_daily_output)
        .collect()
}

/// Serialized form of a run written to the output file.
#[derive(Serialize, Debug)]
pub struct SimulationExport<'a> {
    pub config: &'a SimulationConfig,
    pub master: &'a MasterResult,
    pub daily_output: &'a OutputPercentiles,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<&'a [IterationResult]>,
}

impl<'a> SimulationExport<'a> {
    pub fn new(output: &'a SimulationOutput, include_iterations: bool) -> Self {
        Self {
            config: &output.config,
            master: &output.master,
            daily_output: &output.daily_output,
            iterations: include_iterations.then_some(output.iterations.as_slice()),
        }
    }
}
