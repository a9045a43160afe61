#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

use itertools::Itertools;
use structopt::StructOpt;
use tpcxbb::prelude::*;

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp_micros()
        .init();

    let args = BenchArgs::from_args();
    let result = args.into_config().and_then(|config| tpcxbb::run(&config));
    match result {
        Ok(report) => println!(
            "{} completed {} iterations: [{}] ms",
            report.query(),
            report.iterations(),
            report
                .query_times_ms()
                .iter()
                .map(|ms| format!("{:.2}", ms))
                .join(", ")
        ),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}
