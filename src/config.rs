use getset::Getters;
use std::path::PathBuf;
use structopt::StructOpt;

use crate::error::{BenchError, Result};
use crate::queries::QueryId;
use crate::tables::{InputFormat, TPCXBB_TABLES};
use crate::writer::OutputFormat;

/// Command line of the `tpcxbb-bench` driver.
#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "tpcxbb-bench", about = "Runs one TPCx-BB query and times it.")]
pub struct BenchArgs {
    /// Base directory with one dataset per table
    #[structopt(long, parse(from_os_str))]
    pub input: PathBuf,

    /// Format of the input tables (csv or parquet)
    #[structopt(long, default_value = "parquet")]
    pub input_format: InputFormat,

    /// Query to run, e.g. 5, q5 or Q05
    #[structopt(long)]
    pub query: String,

    /// Number of timed executions
    #[structopt(long, default_value = "1")]
    pub iterations: usize,

    /// Directory each iteration writes its result to; results are only
    /// collected when unset
    #[structopt(long, parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Format of the written result (csv or parquet)
    #[structopt(long, default_value = "parquet")]
    pub output_format: OutputFormat,

    /// Write a JSON report to <prefix>-q<NN>-<start_ms>.json
    #[structopt(long)]
    pub summary_file_prefix: Option<String>,
}

/// Validated benchmark settings.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct BenchConfig {
    input: PathBuf,
    input_format: InputFormat,
    query: QueryId,
    iterations: usize,
    output: Option<PathBuf>,
    output_format: OutputFormat,
    summary_file_prefix: Option<String>,
}

impl BenchConfig {
    pub fn new(input: PathBuf, input_format: InputFormat, query: QueryId) -> Self {
        BenchConfig {
            input,
            input_format,
            query,
            iterations: 1,
            output: None,
            output_format: OutputFormat::Parquet,
            summary_file_prefix: None,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Result<Self> {
        if iterations == 0 {
            return Err(BenchError::InvalidArgument(
                "iterations must be at least 1".to_string(),
            ));
        }
        self.iterations = iterations;
        Ok(self)
    }

    pub fn with_output(mut self, output: PathBuf, format: OutputFormat) -> Self {
        self.output = Some(output);
        self.output_format = format;
        self
    }

    pub fn with_summary_file_prefix(mut self, prefix: String) -> Self {
        self.summary_file_prefix = Some(prefix);
        self
    }
}

impl BenchArgs {
    pub fn into_config(self) -> Result<BenchConfig> {
        let query = QueryId::parse(&self.query)?;
        let mut config = BenchConfig::new(self.input, self.input_format, query)
            .with_iterations(self.iterations)?;
        // The output format only matters with an output directory.
        config.output = self.output;
        config.output_format = self.output_format;
        config.summary_file_prefix = self.summary_file_prefix;
        Ok(config)
    }
}

/// Command line of the `tpcxbb-convert` tool.
#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "tpcxbb-convert",
    about = "Converts |-delimited TPCx-BB tables to Parquet."
)]
pub struct ConvertArgs {
    /// Directory with the generated text tables
    #[structopt(long, parse(from_os_str))]
    pub input: PathBuf,

    /// Directory the Parquet tables are written to
    #[structopt(long, parse(from_os_str))]
    pub output: PathBuf,

    /// Comma separated tables to convert; all tables when omitted
    #[structopt(long, use_delimiter = true)]
    pub tables: Vec<String>,
}

impl ConvertArgs {
    /// Tables to convert, checked against the TPCx-BB table list.
    pub fn selected_tables(&self) -> Result<Vec<String>> {
        if self.tables.is_empty() {
            return Ok(TPCXBB_TABLES.iter().map(|t| t.to_string()).collect());
        }
        self.tables
            .iter()
            .map(|table| {
                let table = table.trim();
                if TPCXBB_TABLES.contains(&table) {
                    Ok(table.to_string())
                } else {
                    Err(BenchError::UnknownTable(table.to_string()))
                }
            })
            .collect()
    }
}
