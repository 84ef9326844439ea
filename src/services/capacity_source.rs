use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::Serialize;
use thiserror::Error;

use crate::domain::grid::{Grid, GridError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapacityError {
    #[error("roll bounds must be finite numbers (got {low}-{high})")]
    NonFiniteRange { low: f64, high: f64 },
    #[error("roll bounds must not be negative (got {low}-{high})")]
    NegativeRange { low: f64, high: f64 },
    #[error("lowest roll {low} is above highest roll {high}")]
    InvertedRange { low: f64, high: f64 },
    #[error("integer-only rolls need whole-number bounds (got {low}-{high})")]
    FractionalIntegerRange { low: f64, high: f64 },
    #[error("fixed roll must be a finite, non-negative number (got {0})")]
    InvalidFixedRoll(f64),
}

/// Produces the capacity of a worker on a given day.
pub trait CapacitySource {
    fn next_roll(&mut self, day: usize, worker: usize) -> f64;
}

/// Inclusive roll bounds, optionally rounded to whole numbers.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RollRange {
    pub low: f64,
    pub high: f64,
    pub integer_only: bool,
}

impl Default for RollRange {
    fn default() -> Self {
        Self {
            low: 1.0,
            high: 6.0,
            integer_only: true,
        }
    }
}

impl RollRange {
    pub fn validate(&self) -> Result<(), CapacityError> {
        let (low, high) = (self.low, self.high);
        if !low.is_finite() || !high.is_finite() {
            return Err(CapacityError::NonFiniteRange { low, high });
        }
        if low < 0.0 || high < 0.0 {
            return Err(CapacityError::NegativeRange { low, high });
        }
        if low > high {
            return Err(CapacityError::InvertedRange { low, high });
        }
        // Rounded rolls stay inside the range only when both ends are whole.
        if self.integer_only && (low.fract() != 0.0 || high.fract() != 0.0) {
            return Err(CapacityError::FractionalIntegerRange { low, high });
        }
        Ok(())
    }
}

/// Draws rolls uniformly from a [`RollRange`].
pub struct UniformCapacitySource<R: Rng> {
    rng: R,
    distribution: Uniform<f64>,
    integer_only: bool,
}

impl<R: Rng> UniformCapacitySource<R> {
    pub fn new(range: RollRange, rng: R) -> Result<Self, CapacityError> {
        range.validate()?;
        Ok(Self {
            rng,
            distribution: Uniform::new_inclusive(range.low, range.high),
            integer_only: range.integer_only,
        })
    }
}

impl<R: Rng> CapacitySource for UniformCapacitySource<R> {
    fn next_roll(&mut self, _day: usize, _worker: usize) -> f64 {
        let roll = self.distribution.sample(&mut self.rng);
        if self.integer_only {
            // Halves go to the even neighbour, so 2.5 becomes 2.
            roll.round_ties_even()
        } else {
            roll
        }
    }
}

/// Gives every cell the same capacity.
#[derive(Debug, Clone, Copy)]
pub struct FixedCapacitySource {
    roll: f64,
}

impl FixedCapacitySource {
    pub fn new(roll: f64) -> Result<Self, CapacityError> {
        if !roll.is_finite() || roll < 0.0 {
            return Err(CapacityError::InvalidFixedRoll(roll));
        }
        Ok(Self { roll })
    }
}

impl CapacitySource for FixedCapacitySource {
    fn next_roll(&mut self, _day: usize, _worker: usize) -> f64 {
        self.roll
    }
}

/// Builds a grid with one roll per cell, drawn day by day.
pub fn populate_grid<S: CapacitySource + ?Sized>(
    days: usize,
    workers: usize,
    source: &mut S,
) -> Result<Grid, GridError> {
    Grid::generate(days, workers, |day, worker| source.next_roll(day, worker))
}
