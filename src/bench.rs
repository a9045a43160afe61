use getset::Getters;
use nanoid::nanoid;
use serde::Serialize;
use statrs::statistics::{Data, Distribution, Max, Min};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::config::BenchConfig;
use crate::error::Result;
use crate::queries::Query;
use crate::tables::TableCatalog;
use crate::writer::{output_path, write_result};

pub const RUN_ID_ALPHABET: [char; 16] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f',
];

pub const RUN_ID_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    Completed,
    Failed,
}

/// Where the run happened and how it was invoked.
#[derive(Debug, Clone, Serialize, Getters)]
#[getset(get = "pub")]
pub struct RunEnvironment {
    args: Vec<String>,
    available_parallelism: usize,
    input: String,
    input_format: String,
}

impl RunEnvironment {
    fn capture(config: &BenchConfig) -> Self {
        RunEnvironment {
            args: std::env::args().collect(),
            available_parallelism: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            input: config.input().display().to_string(),
            input_format: config.input_format().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Getters)]
#[getset(get = "pub")]
pub struct TimingSummary {
    min_ms: f64,
    max_ms: f64,
    mean_ms: f64,
    /// Absent with fewer than two iterations.
    std_dev_ms: Option<f64>,
}

impl TimingSummary {
    pub fn from_times(query_times_ms: &[f64]) -> Option<Self> {
        if query_times_ms.is_empty() {
            return None;
        }
        let data = Data::new(query_times_ms.to_vec());
        Some(TimingSummary {
            min_ms: data.min(),
            max_ms: data.max(),
            mean_ms: data.mean()?,
            std_dev_ms: data.std_dev().filter(|sd| sd.is_finite()),
        })
    }
}

/// Outcome of one benchmark run, serialized as the summary file.
#[derive(Debug, Clone, Serialize, Getters)]
#[getset(get = "pub")]
pub struct BenchmarkReport {
    run_id: String,
    query: String,
    description: String,
    action: String,
    start_time_ms: u64,
    iterations: usize,
    query_times_ms: Vec<f64>,
    row_counts: Vec<usize>,
    status: RunStatus,
    exceptions: Vec<String>,
    env: RunEnvironment,
    summary: Option<TimingSummary>,
}

impl BenchmarkReport {
    fn new(query: &Query, config: &BenchConfig) -> Self {
        let start_time_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        BenchmarkReport {
            run_id: nanoid!(RUN_ID_LEN, &RUN_ID_ALPHABET),
            query: query.id().to_string(),
            description: query.description().to_string(),
            action: describe_action(config),
            start_time_ms,
            iterations: *config.iterations(),
            query_times_ms: vec![],
            row_counts: vec![],
            status: RunStatus::Completed,
            exceptions: vec![],
            env: RunEnvironment::capture(config),
            summary: None,
        }
    }

    fn record(&mut self, elapsed_ms: f64, rows: usize) {
        self.query_times_ms.push(elapsed_ms);
        self.row_counts.push(rows);
    }

    fn finish(&mut self) {
        self.summary = TimingSummary::from_times(&self.query_times_ms);
    }

    /// File name `<prefix>-q<NN>-<start_ms>.json`.
    pub fn summary_path(&self, prefix: &str) -> PathBuf {
        PathBuf::from(format!(
            "{}-{}-{}.json",
            prefix, self.query, self.start_time_ms
        ))
    }

    pub fn save(&self, prefix: &str) -> Result<PathBuf> {
        let summary_path = self.summary_path(prefix);
        if let Some(parent) = summary_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let report_json = serde_json::to_string_pretty(self)?;
        let mut report_file = File::create(&summary_path)?;
        report_file.write_all(report_json.as_bytes())?;
        log::info!("Wrote benchmark report to {}", summary_path.display());
        Ok(summary_path)
    }
}

fn describe_action(config: &BenchConfig) -> String {
    match config.output() {
        Some(directory) => format!(
            "{}:{}",
            config.output_format(),
            output_path(directory, *config.output_format()).display()
        ),
        None => "collect".to_string(),
    }
}

fn run_iteration(catalog: &TableCatalog, query: &Query, config: &BenchConfig) -> Result<usize> {
    let mut df = query.plan(catalog)?.collect()?;
    if let Some(directory) = config.output() {
        write_result(&mut df, directory, *config.output_format())?;
    }
    Ok(df.height())
}

/// Runs `query` the configured number of times and reports every iteration.
///
/// Each timed iteration covers building the plan, executing it and, when an
/// output directory is set, writing the result. The first failure stops the
/// run; the report is still written before the error is returned.
pub fn run_benchmark(
    catalog: &TableCatalog,
    query: &Query,
    config: &BenchConfig,
) -> Result<BenchmarkReport> {
    let mut report = BenchmarkReport::new(query, config);
    log::info!(
        "Running {} ({}) for {} iterations, action {}",
        report.query,
        report.description,
        report.iterations,
        report.action
    );

    for iteration in 1..=*config.iterations() {
        let start_time = Instant::now();
        match run_iteration(catalog, query, config) {
            Ok(rows) => {
                let elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0;
                log::info!("Iteration {} took {:.2} ms", iteration, elapsed_ms);
                report.record(elapsed_ms, rows);
            }
            Err(err) => {
                log::error!("Iteration {} failed: {}", iteration, err);
                report.status = RunStatus::Failed;
                report.exceptions.push(err.to_string());
                report.finish();
                if let Some(prefix) = config.summary_file_prefix() {
                    report.save(prefix)?;
                }
                return Err(err);
            }
        }
    }

    report.finish();
    if let Some(summary) = &report.summary {
        log::info!(
            "{} min {:.2} ms, max {:.2} ms, mean {:.2} ms",
            report.query,
            summary.min_ms,
            summary.max_ms,
            summary.mean_ms
        );
    }
    if let Some(prefix) = config.summary_file_prefix() {
        report.save(prefix)?;
    }
    Ok(report)
}
