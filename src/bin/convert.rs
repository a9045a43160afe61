#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

use std::path::Path;
use std::time::Instant;
use structopt::StructOpt;
use tpcxbb::prelude::*;

/// Converts one table and returns the number of rows written.
fn convert_table(catalog: &TableCatalog, table: &str, output: &Path) -> Result<usize> {
    let mut df = catalog.scan(table)?.collect()?;
    write_result(&mut df, &output.join(table), OutputFormat::Parquet)?;
    Ok(df.height())
}

fn convert(args: &ConvertArgs) -> Result<()> {
    let tables = args.selected_tables()?;
    let catalog = TableCatalog::load(&args.input, InputFormat::Csv)?;
    for table in tables {
        if !catalog.contains(&table) {
            log::warn!("No input files for {}, skipping", table);
            continue;
        }
        let start_time = Instant::now();
        let rows = convert_table(&catalog, &table, &args.output)?;
        log::info!(
            "Converted {} ({} rows) in {:.2?}",
            table,
            rows,
            start_time.elapsed()
        );
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .init();

    if let Err(err) = convert(&ConvertArgs::from_args()) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
