use thiserror::Error;

use crate::domain::summary::{IterationResult, IterationTotals, MasterResult, WorkerSummary};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregationError {
    #[error("iteration count must be greater than zero")]
    NoIterations,
    #[error("iteration {iteration} has no summary for worker {worker}")]
    MissingWorkerSummary { iteration: usize, worker: usize },
}

/// Averages iteration results into a single master result.
///
/// Every field is summed across `results` and divided by `num_iterations`.
/// Workers are taken from the first result; each other result must carry a
/// summary for each of them.
pub fn reduce(
    results: &[IterationResult],
    num_iterations: usize,
) -> Result<MasterResult, AggregationError> {
    if num_iterations == 0 {
        return Err(AggregationError::NoIterations);
    }

    let workers = results
        .first()
        .map(|first| first.worker_summaries.len())
        .unwrap_or(0);

    let mut worker_sums: Vec<WorkerSummary> = (1..=workers).map(WorkerSummary::empty).collect();
    let mut totals = IterationTotals::default();

    for (position, result) in results.iter().enumerate() {
        add_totals(&mut totals, &result.totals);

        for sum in worker_sums.iter_mut() {
            let summary = result.worker_summary(sum.worker).ok_or(
                AggregationError::MissingWorkerSummary {
                    iteration: position + 1,
                    worker: sum.worker,
                },
            )?;
            sum.total_roll += summary.total_roll;
            sum.average_roll += summary.average_roll;
            sum.average_wip += summary.average_wip;
        }
    }

    let count = num_iterations as f64;
    let worker_summaries = worker_sums
        .into_iter()
        .map(|sum| WorkerSummary {
            worker: sum.worker,
            total_roll: sum.total_roll / count,
            average_roll: sum.average_roll / count,
            average_wip: sum.average_wip / count,
        })
        .collect();

    Ok(MasterResult {
        iterations: num_iterations,
        worker_summaries,
        totals: IterationTotals {
            total_roll: totals.total_roll / count,
            total_wip: totals.total_wip / count,
            avg_daily_output: totals.avg_daily_output / count,
            overall_avg_wip: totals.overall_avg_wip / count,
            overall_avg_roll: totals.overall_avg_roll / count,
            overall_avg_roll_total: totals.overall_avg_roll_total / count,
        },
    })
}

fn add_totals(sum: &mut IterationTotals, totals: &IterationTotals) {
    sum.total_roll += totals.total_roll;
    sum.total_wip += totals.total_wip;
    sum.avg_daily_output += totals.avg_daily_output;
    sum.overall_avg_wip += totals.overall_avg_wip;
    sum.overall_avg_roll += totals.overall_avg_roll;
    sum.overall_avg_roll_total += totals.overall_avg_roll_total;
}
