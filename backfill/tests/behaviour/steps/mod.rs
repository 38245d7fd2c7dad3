//! Step definitions for the behavioural scenarios.

mod graph_steps;
mod merge_steps;
mod pipeline_steps;
