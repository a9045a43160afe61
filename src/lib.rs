//! Driver for TPCx-BB style queries on the polars lazy engine.
//!
//! `tables` resolves the benchmark tables to lazy scans, `queries` maps a
//! query id to the function that builds its plan and `bench` times repeated
//! runs, optionally persisting each result through `writer`.

pub mod bench;
pub mod config;
pub mod error;
pub mod queries;
pub mod tables;
pub mod writer;

pub mod prelude {
    pub use crate::bench::{run_benchmark, BenchmarkReport, RunStatus, TimingSummary};
    pub use crate::config::{BenchArgs, BenchConfig, ConvertArgs};
    pub use crate::error::{BenchError, Result};
    pub use crate::queries::{get_query, supported_queries, Query, QueryId};
    pub use crate::tables::{load_tables, InputFormat, TableCatalog, TableInput};
    pub use crate::writer::{write_result, OutputFormat};
}

use prelude::*;

/// Resolves the configured query, loads the input tables and runs the
/// benchmark.
pub fn run(config: &BenchConfig) -> Result<BenchmarkReport> {
    let query = get_query(*config.query())?;
    let catalog = TableCatalog::load(config.input(), *config.input_format())?;
    run_benchmark(&catalog, &query, config)
}
