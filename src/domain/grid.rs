use serde::Serialize;
use thiserror::Error;

use crate::domain::cell::{Cell, Resolution};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid needs at least one day and one worker (got {days} days, {workers} workers)")]
    EmptyGrid { days: usize, workers: usize },
    #[error("expected {expected} rolls for the grid, got {actual}")]
    RollCountMismatch { expected: usize, actual: usize },
    #[error("cell day {day}, worker {worker} is outside the grid")]
    CellOutOfRange { day: usize, worker: usize },
}

/// All cells of one simulation iteration, stored day-major.
///
/// Cells are addressed 1-based by `(day, worker)`. Every cell carries its
/// roll from construction on, so a grid can always be resolved.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Grid {
    days: usize,
    workers: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid by asking `roll` for each cell, day by day and worker
    /// by worker within a day.
    pub fn generate<F>(days: usize, workers: usize, mut roll: F) -> Result<Self, GridError>
    where
        F: FnMut(usize, usize) -> f64,
    {
        if days == 0 || workers == 0 {
            return Err(GridError::EmptyGrid { days, workers });
        }
        let mut cells = Vec::with_capacity(days * workers);
        for day in 1..=days {
            for worker in 1..=workers {
                cells.push(Cell::new(day, worker, roll(day, worker)));
            }
        }
        Ok(Self {
            days,
            workers,
            cells,
        })
    }

    /// Builds a grid from rolls listed day-major.
    pub fn from_rolls(days: usize, workers: usize, rolls: &[f64]) -> Result<Self, GridError> {
        let expected = days * workers;
        if rolls.len() != expected {
            return Err(GridError::RollCountMismatch {
                expected,
                actual: rolls.len(),
            });
        }
        Self::generate(days, workers, |day, worker| {
            rolls[(day - 1) * workers + (worker - 1)]
        })
    }

    pub fn days(&self) -> usize {
        self.days
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, day: usize, worker: usize) -> Option<&Cell> {
        self.index_of(day, worker).map(|index| &self.cells[index])
    }

    /// Cells of one day, ordered by worker.
    pub fn row(&self, day: usize) -> Option<&[Cell]> {
        if day == 0 || day > self.days {
            return None;
        }
        let start = (day - 1) * self.workers;
        Some(&self.cells[start..start + self.workers])
    }

    /// Cells of one worker, ordered by day.
    pub fn column(&self, worker: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(move |cell| cell.worker == worker)
    }

    pub fn is_resolved(&self) -> bool {
        self.cells.iter().all(Cell::is_resolved)
    }

    /// Resolves one cell, resolving the cells it depends on first.
    ///
    /// A cell needs the temp WIP of its left neighbour (same day, previous
    /// worker) and the WIP of the cell above (previous day, same worker).
    /// The right neighbour only contributes its roll. Each cell is computed
    /// at most once; later calls return the stored values.
    pub fn resolve(&mut self, day: usize, worker: usize) -> Result<Resolution, GridError> {
        let target = self
            .index_of(day, worker)
            .ok_or(GridError::CellOutOfRange { day, worker })?;
        Ok(self.resolve_index(target))
    }

    /// Resolves every cell of the grid. Calling it again is a no-op.
    pub fn resolve_all(&mut self) {
        // Day-major storage makes index order the row-major order.
        for index in 0..self.cells.len() {
            self.resolve_index(index);
        }
    }

    fn resolve_index(&mut self, target: usize) -> Resolution {
        if let Some(resolution) = self.cells[target].resolution() {
            return resolution;
        }

        let mut pending = vec![target];
        while let Some(&index) = pending.last() {
            if self.cells[index].is_resolved() {
                pending.pop();
                continue;
            }

            let (left, above) = self.dependencies(index);
            let waiting: Vec<usize> = [left, above]
                .into_iter()
                .flatten()
                .filter(|&dependency| !self.cells[dependency].is_resolved())
                .collect();
            if !waiting.is_empty() {
                pending.extend(waiting);
                continue;
            }

            let computed = self.compute(index);
            let resolution = self.cells[index].settle(computed);
            pending.pop();
            if index == target {
                return resolution;
            }
        }

        unreachable!("the target cell is the last one to leave the stack")
    }

    fn index_of(&self, day: usize, worker: usize) -> Option<usize> {
        if day == 0 || day > self.days || worker == 0 || worker > self.workers {
            return None;
        }
        Some((day - 1) * self.workers + (worker - 1))
    }

    fn dependencies(&self, index: usize) -> (Option<usize>, Option<usize>) {
        let cell = &self.cells[index];
        let left = self.index_of(cell.day, cell.worker - 1);
        let above = self.index_of(cell.day - 1, cell.worker);
        (left, above)
    }

    /// Left and above neighbours must already be resolved.
    fn compute(&self, index: usize) -> Resolution {
        let cell = &self.cells[index];
        let left = self.get(cell.day, cell.worker - 1);
        let above = self.get(cell.day - 1, cell.worker);
        let right = self.get(cell.day, cell.worker + 1);

        let last_worker_cap = left.and_then(Cell::temp_wip).unwrap_or(cell.roll);
        let yesterday_wip = above.and_then(Cell::wip).unwrap_or(0.0);
        let next_worker_cap = right.map(|next| next.roll).unwrap_or(0.0);

        let temp_wip = last_worker_cap.min(cell.roll) + yesterday_wip;
        let wip = if next_worker_cap >= temp_wip {
            0.0
        } else {
            temp_wip - next_worker_cap
        };
        Resolution { temp_wip, wip }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn random_grid(days: usize, workers: usize, seed: u64) -> Grid {
        let mut rng = StdRng::seed_from_u64(seed);
        Grid::generate(days, workers, |_, _| rng.gen_range(1..=6) as f64).unwrap()
    }

    fn resolution(grid: &Grid, day: usize, worker: usize) -> Resolution {
        grid.get(day, worker).unwrap().resolution().unwrap()
    }

    #[test]
    fn generate_rejects_empty_dimensions() {
        assert_eq!(
            Grid::generate(0, 3, |_, _| 1.0),
            Err(GridError::EmptyGrid { days: 0, workers: 3 })
        );
        assert!(Grid::generate(2, 0, |_, _| 1.0).is_err());
    }

    #[test]
    fn from_rolls_rejects_wrong_roll_count() {
        assert_eq!(
            Grid::from_rolls(2, 2, &[1.0, 2.0, 3.0]),
            Err(GridError::RollCountMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn cells_are_stored_day_major() {
        let grid = Grid::from_rolls(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let keys: Vec<(usize, usize)> = grid.cells().iter().map(|c| (c.day, c.worker)).collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3)]);
        assert_eq!(grid.get(2, 1).unwrap().roll, 4.0);
        assert_eq!(grid.row(2).unwrap().len(), 3);
        assert_eq!(grid.column(3).map(|c| c.roll).collect::<Vec<_>>(), vec![3.0, 6.0]);
    }

    #[test]
    fn out_of_range_lookups_are_absent() {
        let mut grid = Grid::from_rolls(1, 1, &[3.0]).unwrap();
        assert!(grid.get(0, 1).is_none());
        assert!(grid.get(1, 2).is_none());
        assert!(grid.row(2).is_none());
        assert_eq!(
            grid.resolve(2, 1),
            Err(GridError::CellOutOfRange { day: 2, worker: 1 })
        );
    }

    #[test]
    fn one_day_two_workers() {
        let mut grid = Grid::from_rolls(1, 2, &[4.0, 6.0]).unwrap();
        grid.resolve_all();

        assert_eq!(resolution(&grid, 1, 1), Resolution { temp_wip: 4.0, wip: 0.0 });
        // Worker 2 can only work what worker 1 handed over, min(4, 6).
        assert_eq!(resolution(&grid, 1, 2), Resolution { temp_wip: 4.0, wip: 4.0 });
    }

    #[test]
    fn two_days_one_worker_carries_backlog() {
        let mut grid = Grid::from_rolls(2, 1, &[5.0, 3.0]).unwrap();
        grid.resolve_all();

        assert_eq!(resolution(&grid, 1, 1), Resolution { temp_wip: 5.0, wip: 5.0 });
        assert_eq!(resolution(&grid, 2, 1), Resolution { temp_wip: 8.0, wip: 8.0 });
    }

    #[test]
    fn first_cell_is_throttled_by_right_neighbour_roll() {
        let mut grid = Grid::from_rolls(1, 3, &[5.0, 2.0, 6.0]).unwrap();
        let first = grid.resolve(1, 1).unwrap();
        assert_eq!(first, Resolution { temp_wip: 5.0, wip: 3.0 });

        // Worker 2 can only take min(5, 2) and pushes both to worker 3.
        let second = grid.resolve(1, 2).unwrap();
        assert_eq!(second, Resolution { temp_wip: 2.0, wip: 0.0 });
    }

    #[test]
    fn resolving_deep_cell_resolves_its_dependencies() {
        let mut grid = random_grid(40, 30, 7);
        grid.resolve(40, 30).unwrap();

        for day in 1..=40 {
            for worker in 1..=30 {
                assert!(grid.get(day, worker).unwrap().is_resolved());
            }
        }
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut grid = random_grid(5, 4, 11);
        let first = grid.resolve(5, 3).unwrap();
        let snapshot = grid.clone();
        let second = grid.resolve(5, 3).unwrap();

        assert_eq!(first.temp_wip.to_bits(), second.temp_wip.to_bits());
        assert_eq!(first.wip.to_bits(), second.wip.to_bits());
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn resolution_order_does_not_matter() {
        let base = random_grid(8, 6, 3);

        let mut row_major = base.clone();
        row_major.resolve_all();

        let mut column_major = base.clone();
        for worker in 1..=6 {
            for day in 1..=8 {
                column_major.resolve(day, worker).unwrap();
            }
        }

        let mut shuffled = base.clone();
        let mut keys: Vec<(usize, usize)> = (1..=8)
            .flat_map(|day| (1..=6).map(move |worker| (day, worker)))
            .collect();
        keys.shuffle(&mut StdRng::seed_from_u64(99));
        for (day, worker) in keys {
            shuffled.resolve(day, worker).unwrap();
        }

        let mut reversed = base;
        for day in (1..=8).rev() {
            for worker in (1..=6).rev() {
                reversed.resolve(day, worker).unwrap();
            }
        }

        assert_eq!(row_major, column_major);
        assert_eq!(row_major, shuffled);
        assert_eq!(row_major, reversed);
    }

    #[test]
    fn resolved_values_are_never_negative() {
        for seed in 0..20 {
            let mut grid = random_grid(10, 6, seed);
            grid.resolve_all();
            for cell in grid.cells() {
                let resolution = cell.resolution().unwrap();
                assert!(resolution.temp_wip >= 0.0);
                assert!(resolution.wip >= 0.0);
            }
        }
    }

    #[test]
    fn last_worker_keeps_all_temp_wip() {
        let mut grid = random_grid(10, 6, 5);
        grid.resolve_all();
        for cell in grid.column(6) {
            assert_eq!(cell.wip(), cell.temp_wip());
        }
    }

    #[test]
    fn first_day_first_worker_matches_closed_form() {
        for seed in 0..10 {
            let mut grid = random_grid(3, 4, seed);
            let roll = grid.get(1, 1).unwrap().roll;
            let next = grid.get(1, 2).unwrap().roll;
            let resolution = grid.resolve(1, 1).unwrap();

            assert_eq!(resolution.temp_wip, roll);
            assert_eq!(resolution.wip, (roll - next).max(0.0));
        }

        let mut single = Grid::from_rolls(1, 1, &[4.0]).unwrap();
        assert_eq!(single.resolve(1, 1).unwrap(), Resolution { temp_wip: 4.0, wip: 4.0 });
    }

    #[test]
    fn resolve_all_keeps_cells_resolved_earlier() {
        let base = random_grid(6, 5, 21);

        let mut partial = base.clone();
        let early = partial.resolve(4, 3).unwrap();
        partial.resolve_all();

        let mut fresh = base;
        fresh.resolve_all();

        assert_eq!(resolution(&partial, 4, 3), early);
        assert_eq!(partial, fresh);
    }

    #[test]
    fn resolve_all_marks_grid_resolved() {
        let mut grid = random_grid(4, 4, 1);
        assert!(!grid.is_resolved());
        grid.resolve_all();
        assert!(grid.is_resolved());
    }
}
