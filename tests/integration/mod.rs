//! Integration tests for ppa-gate

mod helpers;
mod test_config;
mod test_gate;
