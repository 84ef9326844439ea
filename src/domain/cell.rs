use serde::Serialize;

/// Derived values of a resolved cell.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub temp_wip: f64,
    pub wip: f64,
}

/// One day/worker pair of a simulation iteration.
///
/// `roll` is fixed at construction. `resolution` stays `None` until the
/// owning grid resolves the cell and never changes afterwards.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Cell {
    pub day: usize,
    pub worker: usize,
    pub roll: f64,
    resolution: Option<Resolution>,
}

impl Cell {
    pub fn new(day: usize, worker: usize, roll: f64) -> Self {
        Self {
            day,
            worker,
            roll,
            resolution: None,
        }
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    pub fn temp_wip(&self) -> Option<f64> {
        self.resolution.map(|r| r.temp_wip)
    }

    pub fn wip(&self) -> Option<f64> {
        self.resolution.map(|r| r.wip)
    }

    /// Stores the derived values unless the cell was already resolved.
    /// Returns whatever the cell holds afterwards.
    pub(crate) fn settle(&mut self, resolution: Resolution) -> Resolution {
        *self.resolution.get_or_insert(resolution)
    }
}
