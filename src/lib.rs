//! Monte Carlo simulation of the production line dice game.
//!
//! Each iteration rolls a capacity for every day/worker cell of a [`Grid`],
//! resolves the cells' temp WIP and WIP from their neighbours, and reduces
//! the grid to an [`IterationResult`]. [`reduce`] averages the iterations
//! into a [`MasterResult`].
//!
//! [`Grid`]: domain::grid::Grid
//! [`IterationResult`]: domain::summary::IterationResult
//! [`MasterResult`]: domain::summary::MasterResult
//! [`reduce`]: services::run_aggregator::reduce

pub mod commands;
pub mod domain;
pub mod services;
#[cfg(test)]
mod test_support;
