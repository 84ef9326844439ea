use crate::domain::summary::{IterationResult, IterationTotals, MasterResult, WorkerSummary};
use crate::services::simulation_types::{SimulationConfig, SimulationOutput};

pub type Row = Vec<String>;

/// A named table of display rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

fn number(value: f64) -> String {
    format!("{value:.2}")
}

fn row<const N: usize>(cells: [&str; N]) -> Row {
    cells.iter().map(|cell| cell.to_string()).collect()
}

/// Rows for one iteration: worker header, a rolls row and a WIPs row per
/// day, worker summaries and the line totals.
pub fn iteration_rows(result: &IterationResult) -> Vec<Row> {
    let grid = &result.grid;
    let mut rows = vec![worker_header_row(grid.workers())];

    for (offset, cells) in grid.cells().chunks(grid.workers()).enumerate() {
        let day = offset + 1;
        let mut rolls = vec![format!("Day {day} Rolls")];
        let mut wips = vec![format!("Day {day} WIPs")];
        for cell in cells {
            rolls.extend([number(cell.roll), String::new()]);
            wips.extend([
                number(cell.temp_wip().unwrap_or_default()),
                number(cell.wip().unwrap_or_default()),
            ]);
        }
        rows.push(rolls);
        rows.push(wips);
    }

    rows.push(row([""]));
    rows.extend(summary_rows(&result.worker_summaries, &result.totals));
    rows
}

/// Rows for the averaged result, preceded by the run parameters.
pub fn master_rows(config: &SimulationConfig, master: &MasterResult) -> Vec<Row> {
    let (dice_type, dice_range) = dice_description(config);
    let mut rows = vec![
        vec!["Number of Workers:".to_string(), config.workers.to_string()],
        vec!["Number of Days:".to_string(), config.days.to_string()],
        vec![
            "Number of Iterations Run:".to_string(),
            master.iterations.to_string(),
        ],
        vec!["Dice Type".to_string(), dice_type],
        vec!["Dice Range:".to_string(), dice_range],
        row([""]),
        worker_header_row(config.workers),
        row([""]),
    ];
    rows.extend(summary_rows(&master.worker_summaries, &master.totals));
    rows
}

/// The master sheet followed by one sheet per iteration.
pub fn build_workbook(output: &SimulationOutput) -> Vec<Sheet> {
    let mut sheets = vec![Sheet {
        name: "Master Summary".to_string(),
        rows: master_rows(&output.config, &output.master),
    }];
    sheets.extend(
        output
            .iterations
            .iter()
            .enumerate()
            .map(|(index, result)| Sheet {
                name: format!("Iteration {}", index + 1),
                rows: iteration_rows(result),
            }),
    );
    sheets
}

/// Renders sheets as tab-separated text, one heading per sheet.
pub fn format_workbook(sheets: &[Sheet]) -> String {
    let mut lines = Vec::new();
    for sheet in sheets {
        lines.push(format!("== {} ==", sheet.name));
        lines.extend(sheet.rows.iter().map(|row| row.join("\t")));
        lines.push(String::new());
    }
    lines.join("\n")
}

pub fn format_master_report(output: &SimulationOutput) -> String {
    let config = &output.config;
    let master = &output.master;
    let (dice_type, dice_range) = dice_description(config);

    let mut lines = Vec::new();
    lines.push("Simulation Report".to_string());
    lines.push(format!("Workers: {}", config.workers));
    lines.push(format!("Days: {}", config.days));
    lines.push(format!("Iterations: {}", master.iterations));
    lines.push(format!("Dice: {dice_type} ({dice_range})"));
    lines.push(String::new());
    lines.push("Worker | Total Roll | Avg Roll | Avg WIP".to_string());
    lines.push("-------|------------|----------|--------".to_string());
    for summary in &master.worker_summaries {
        lines.push(format!(
            "{} | {} | {} | {}",
            summary.worker,
            number(summary.total_roll),
            number(summary.average_roll),
            number(summary.average_wip)
        ));
    }
    lines.push(String::new());
    for (label, value) in labeled_totals(&master.totals) {
        lines.push(format!("{label} {}", number(value)));
    }
    let spread = &output.daily_output;
    lines.push(format!(
        "Daily output P0 | P50 | P85 | P100: {} | {} | {} | {}",
        number(spread.p0),
        number(spread.p50),
        number(spread.p85),
        number(spread.p100)
    ));

    lines.join("\n")
}

fn worker_header_row(workers: usize) -> Row {
    let mut header = vec![String::new()];
    for worker in 1..=workers {
        header.extend([format!("Worker {worker}"), String::new()]);
    }
    header
}

fn summary_rows(summaries: &[WorkerSummary], totals: &IterationTotals) -> Vec<Row> {
    let mut rows = vec![
        per_worker_row(summaries, "Total Roll:", |s| s.total_roll),
        per_worker_row(summaries, "Avg Roll:", |s| s.average_roll),
        per_worker_row(summaries, "Avg WIP:", |s| s.average_wip),
        row([""]),
    ];
    rows.extend(
        labeled_totals(totals)
            .into_iter()
            .map(|(label, value)| vec![label.to_string(), number(value)]),
    );
    rows
}

fn per_worker_row(summaries: &[WorkerSummary], label: &str, value: fn(&WorkerSummary) -> f64) -> Row {
    let mut cells = vec![String::new()];
    for summary in summaries {
        cells.extend([label.to_string(), number(value(summary))]);
    }
    cells
}

fn labeled_totals(totals: &IterationTotals) -> [(&'static str, f64); 6] {
    [
        ("Total Roll:", totals.total_roll),
        ("Total WIP:", totals.total_wip),
        ("Avg. Daily Output:", totals.avg_daily_output),
        ("Avg. WIP:", totals.overall_avg_wip),
        ("Avg. Roll:", totals.overall_avg_roll),
        ("Avg. Roll. Total:", totals.overall_avg_roll_total),
    ]
}

fn dice_description(config: &SimulationConfig) -> (String, String) {
    if let Some(roll) = config.fixed_roll {
        return ("Fixed roll".to_string(), format!("{roll}-{roll}"));
    }
    let range = config.roll_range;
    let dice_type = if range.integer_only {
        "Integers only"
    } else {
        "Decimals allowed"
    };
    (dice_type.to_string(), format!("{}-{}", range.low, range.high))
}
