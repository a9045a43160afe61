use polars::prelude::*;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{BenchError, Result};

pub const OUTPUT_FILE_STEM: &str = "part-00000";
pub const OUTPUT_CSV_DELIMITER: u8 = b',';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            _ => Err(BenchError::InvalidFormat("output", s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Path of the single result file written under `directory`.
pub fn output_path(directory: &Path, format: OutputFormat) -> PathBuf {
    directory.join(format!("{}.{}", OUTPUT_FILE_STEM, format.extension()))
}

/// Writes `df` under `directory`, replacing any previous result of the same
/// format. The directory is created if missing.
pub fn write_result(df: &mut DataFrame, directory: &Path, format: OutputFormat) -> Result<PathBuf> {
    std::fs::create_dir_all(directory)?;
    let file_path = output_path(directory, format);
    let mut output_file = File::create(&file_path)?;
    match format {
        OutputFormat::Csv => CsvWriter::new(&mut output_file)
            .include_header(true)
            .with_separator(OUTPUT_CSV_DELIMITER)
            .finish(df)?,
        OutputFormat::Parquet => {
            ParquetWriter::new(output_file).finish(df)?;
        }
    }
    log::debug!("Wrote {} rows to {}", df.height(), file_path.display());
    Ok(file_path)
}
