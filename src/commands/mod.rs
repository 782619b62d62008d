//! CLI commands for ppa-gate
//!
//! - **gate**: validate a source upload against its target channel, then publish it

pub mod gate;

pub use gate::{GateOptions, run_gate};
