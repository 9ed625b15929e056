//! Weighted-sum cost heuristics for steering the external planner's search, and the factories
//! that assemble named presets (§4.6).

pub mod factory;
pub mod heuristic;
pub mod library;
pub mod weighted;

pub use factory::{SequentialHeuristicFactory, TemporalHeuristicFactory};
pub use heuristic::Heuristic;
pub use weighted::WeightedHeuristic;
