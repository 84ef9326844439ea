use crate::domain::grid::Grid;
use crate::domain::summary::{IterationResult, IterationTotals, WorkerSummary};
use crate::services::capacity_source::CapacitySource;

// A CapacitySource that replays a fixed list of rolls and records each request
pub struct ScriptedCapacitySource {
    rolls: Vec<f64>,
    next: usize,
    pub requested: Vec<(usize, usize)>,
}

impl ScriptedCapacitySource {
    pub fn new(rolls: Vec<f64>) -> Self {
        Self {
            rolls,
            next: 0,
            requested: Vec::new(),
        }
    }
}

impl CapacitySource for ScriptedCapacitySource {
    fn next_roll(&mut self, day: usize, worker: usize) -> f64 {
        self.requested.push((day, worker));
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}

pub fn worker_summary(worker: usize, total_roll: f64, average_roll: f64, average_wip: f64) -> WorkerSummary {
    WorkerSummary {
        worker,
        total_roll,
        average_roll,
        average_wip,
    }
}

pub fn totals_with_total_roll(total_roll: f64) -> IterationTotals {
    IterationTotals {
        total_roll,
        ..IterationTotals::default()
    }
}

pub fn build_iteration_result(
    worker_summaries: Vec<WorkerSummary>,
    totals: IterationTotals,
) -> IterationResult {
    IterationResult {
        grid: Grid::from_rolls(1, 1, &[1.0]).unwrap(),
        worker_summaries,
        totals,
    }
}
