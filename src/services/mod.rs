pub mod capacity_source;
pub mod config_yaml;
pub mod histogram;
pub mod iteration;
pub mod percentiles;
pub mod run_aggregator;
pub mod simulation;
pub mod simulation_types;
