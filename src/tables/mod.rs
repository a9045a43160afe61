mod schema;

pub use schema::*;

use getset::Getters;
use glob::glob;
use polars::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{BenchError, Result};

pub const CSV_DELIMITER: u8 = b'|';
pub const CSV_EXTENSIONS: [&str; 3] = ["dat", "csv", "tbl"];
pub const PARQUET_EXTENSION: &str = "parquet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Parquet,
}

impl InputFormat {
    pub fn accepts(&self, path: &Path) -> bool {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match (self, extension) {
            (InputFormat::Csv, Some(ext)) => CSV_EXTENSIONS.contains(&ext.as_str()),
            (InputFormat::Parquet, Some(ext)) => ext == PARQUET_EXTENSION,
            (_, None) => false,
        }
    }
}

impl FromStr for InputFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "parquet" => Ok(InputFormat::Parquet),
            _ => Err(BenchError::InvalidFormat("input", s.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Parquet => write!(f, "parquet"),
        }
    }
}

#[derive(Debug, Clone, Getters)]
pub struct TableInput {
    #[getset(get = "pub")]
    input_files: Vec<PathBuf>,
    #[getset(get = "pub")]
    format: InputFormat,
}

impl TableInput {
    pub fn new(input_files: Vec<PathBuf>, format: InputFormat) -> Self {
        TableInput {
            input_files,
            format,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input_files.is_empty()
    }
}

fn discover_files(directory: &Path, table: &str, format: InputFormat) -> Result<Vec<PathBuf>> {
    let base = glob::Pattern::escape(&directory.to_string_lossy());
    let mut input_files = vec![];
    for pattern in [format!("{}/{}/*", base, table), format!("{}/{}.*", base, table)] {
        for entry in glob(&pattern)? {
            match entry {
                Ok(path) if path.is_file() && format.accepts(&path) => {
                    input_files.push(path.to_string_lossy().to_string())
                }
                Ok(_) => {}
                Err(e) => log::warn!("Skipping unreadable path: {:?}", e),
            }
        }
    }
    // To sort slices correctly taking into account the partition numbers.
    alphanumeric_sort::sort_str_slice(&mut input_files);
    Ok(input_files.into_iter().map(PathBuf::from).collect())
}

/// Finds the files of every TPCx-BB table under `directory`.
///
/// A table may be a single file (`store_sales.dat`) or a directory of
/// partitions (`store_sales/part-0.parquet`). Tables without files are kept with
/// an empty file list and only fail once a query scans them.
pub fn load_tables(directory: &Path, format: InputFormat) -> Result<HashMap<String, TableInput>> {
    log::info!("Specified Input Directory: {}", directory.display());
    let mut table_input = HashMap::new();
    for table in TPCXBB_TABLES {
        let input_files = discover_files(directory, table, format)?;
        log::debug!("{}: {:?}", table, input_files);
        table_input.insert(table.to_string(), TableInput::new(input_files, format));
    }
    let found = table_input.values().filter(|t| !t.is_empty()).count();
    log::info!(
        "Found {} of {} tables as {}",
        found,
        TPCXBB_TABLES.len(),
        format
    );
    Ok(table_input)
}

fn scan_file(path: &Path, table: &str, format: InputFormat) -> Result<LazyFrame> {
    let frame = match format {
        InputFormat::Csv => LazyCsvReader::new(path)
            .with_has_header(false)
            .with_separator(CSV_DELIMITER)
            .with_schema(Some(Arc::new(tpcxbb_schema(table)?)))
            .with_truncate_ragged_lines(true)
            .finish()?,
        InputFormat::Parquet => LazyFrame::scan_parquet(path, ScanArgsParquet::default())?,
    };
    Ok(frame)
}

/// Resolves table names to lazy frames, either from discovered files or from
/// frames registered in memory.
#[derive(Default)]
pub struct TableCatalog {
    inputs: HashMap<String, TableInput>,
    frames: HashMap<String, LazyFrame>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(directory: &Path, format: InputFormat) -> Result<Self> {
        Ok(Self::from_inputs(load_tables(directory, format)?))
    }

    pub fn from_inputs(inputs: HashMap<String, TableInput>) -> Self {
        TableCatalog {
            inputs,
            frames: HashMap::new(),
        }
    }

    pub fn register(&mut self, table: &str, frame: LazyFrame) -> &mut Self {
        self.frames.insert(table.to_string(), frame);
        self
    }

    pub fn contains(&self, table: &str) -> bool {
        self.frames.contains_key(table)
            || self.inputs.get(table).map_or(false, |t| !t.is_empty())
    }

    /// Full scan of `table`. Registered frames take precedence over files.
    pub fn scan(&self, table: &str) -> Result<LazyFrame> {
        if let Some(frame) = self.frames.get(table) {
            return Ok(frame.clone());
        }
        let input = self
            .inputs
            .get(table)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BenchError::MissingTable(table.to_string()))?;
        let mut frames = input
            .input_files()
            .iter()
            .map(|path| scan_file(path, table, *input.format()))
            .collect::<Result<Vec<LazyFrame>>>()?;
        if frames.len() == 1 {
            return Ok(frames.remove(0));
        }
        Ok(concat(frames, UnionArgs::default())?)
    }

    /// Scan of `table` projected to `columns`, each cast to its TPCx-BB type.
    pub fn table(&self, table: &str, columns: &[&str]) -> Result<LazyFrame> {
        let kinds = table_columns(table).ok_or_else(|| BenchError::UnknownTable(table.to_string()))?;
        let projection = columns
            .iter()
            .map(|name| {
                let kind = kinds
                    .iter()
                    .find(|(column, _)| column == name)
                    .map(|(_, kind)| *kind)
                    .ok_or_else(|| {
                        BenchError::InvalidArgument(format!("{} has no column {}", table, name))
                    })?;
                Ok(col(name).cast(kind.data_type()))
            })
            .collect::<Result<Vec<Expr>>>()?;
        Ok(self.scan(table)?.select(projection))
    }
}
