//! Command-line front end for tradesim_core
//!
//! Loads a return series from a delimited file, merges YAML and command-line
//! settings, runs the actual-vs-simulated comparison and writes the results
//! as a terminal table plus optional TSV, JSON and chart exports.

pub mod chart;
pub mod loader;
pub mod logging;
pub mod report;
pub mod settings;
pub mod worker;

pub use chart::ChartFile;
pub use logging::init_logging;
