use crate::domain::grid::Grid;
use crate::domain::summary::{IterationResult, IterationTotals, WorkerSummary};

/// Resolves every cell of `grid` and reduces it to per-worker summaries and
/// line totals. Averages are taken over the grid's days and workers.
pub fn summarize(mut grid: Grid) -> IterationResult {
    grid.resolve_all();
    debug_assert!(grid.is_resolved());

    let days = grid.days() as f64;
    let workers = grid.workers();

    let worker_summaries: Vec<WorkerSummary> = (1..=workers)
        .map(|worker| {
            let total_roll: f64 = grid.column(worker).map(|cell| cell.roll).sum();
            let total_wip: f64 = grid.column(worker).map(|cell| wip_of(cell.wip())).sum();
            WorkerSummary {
                worker,
                total_roll,
                average_roll: total_roll / days,
                average_wip: total_wip / days,
            }
        })
        .collect();

    let total_roll: f64 = grid.column(workers).map(|cell| wip_of(cell.wip())).sum();
    let total_wip: f64 = grid
        .row(grid.days())
        .unwrap_or_default()
        .iter()
        .map(|cell| wip_of(cell.wip()))
        .sum();

    let worker_count = workers as f64;
    let totals = IterationTotals {
        total_roll,
        total_wip,
        avg_daily_output: total_roll / days,
        overall_avg_wip: worker_summaries.iter().map(|s| s.average_wip).sum::<f64>() / worker_count,
        overall_avg_roll: worker_summaries.iter().map(|s| s.average_roll).sum::<f64>() / worker_count,
        overall_avg_roll_total: worker_summaries.iter().map(|s| s.total_roll).sum::<f64>()
            / worker_count,
    };

    IterationResult {
        grid,
        worker_summaries,
        totals,
    }
}

// Cells are resolved before aggregation.
fn wip_of(wip: Option<f64>) -> f64 {
    wip.unwrap_or(0.0)
}
