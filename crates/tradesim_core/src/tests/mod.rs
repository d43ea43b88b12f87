//! Scenario tests for the tradesim_core engine
//!
//! Tests are organized by topic:
//! - `scenarios` - Hand-checked metric values on small fixed paths
//! - `engine` - Reproducibility, cancellation and interval behaviour of full runs
//! - `properties` - proptest invariants over random series and trial vectors

mod engine;
