use polars::prelude::PolarsError;
use quick_error::quick_error;

quick_error! {
    #[derive(Debug)]
    pub enum BenchError {
        UnknownQuery(query: String) {
            display("Unrecognized query: {}", query)
        }
        UnsupportedQuery(index: usize, reason: &'static str) {
            display("Query {} is not supported: {}", index, reason)
        }
        InvalidFormat(kind: &'static str, value: String) {
            display("Invalid {} format: {} (expected csv or parquet)", kind, value)
        }
        InvalidArgument(message: String) {
            display("Invalid argument: {}", message)
        }
        UnknownTable(table: String) {
            display("Schema not defined for table {}", table)
        }
        MissingTable(table: String) {
            display("No input found for table {}", table)
        }
        Io(err: std::io::Error) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
        Polars(err: PolarsError) {
            from()
            source(err)
            display("Engine error: {}", err)
        }
        Json(err: serde_json::Error) {
            from()
            source(err)
            display("Failed to serialize report: {}", err)
        }
        Pattern(err: glob::PatternError) {
            from()
            source(err)
            display("Invalid glob pattern: {}", err)
        }
    }
}

pub type Result<T> = std::result::Result<T, BenchError>;
