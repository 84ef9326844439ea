use serde::Serialize;

use crate::domain::grid::Grid;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WorkerSummary {
    pub worker: usize,
    pub total_roll: f64,
    pub average_roll: f64,
    pub average_wip: f64,
}

impl WorkerSummary {
    pub fn empty(worker: usize) -> Self {
        Self {
            worker,
            total_roll: 0.0,
            average_roll: 0.0,
            average_wip: 0.0,
        }
    }
}

/// Line-level figures of one iteration, or their mean over a run.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct IterationTotals {
    /// WIP of the last worker summed over all days, i.e. realized output.
    pub total_roll: f64,
    /// WIP of every worker on the final day.
    pub total_wip: f64,
    pub avg_daily_output: f64,
    pub overall_avg_wip: f64,
    pub overall_avg_roll: f64,
    pub overall_avg_roll_total: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IterationResult {
    pub grid: Grid,
    pub worker_summaries: Vec<WorkerSummary>,
    pub totals: IterationTotals,
}

impl IterationResult {
    pub fn worker_summary(&self, worker: usize) -> Option<&WorkerSummary> {
        self.worker_summaries.iter().find(|s| s.worker == worker)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MasterResult {
    pub iterations: usize,
    pub worker_summaries: Vec<WorkerSummary>,
    pub totals: IterationTotals,
}
