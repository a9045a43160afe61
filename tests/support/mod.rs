#![allow(dead_code)]

use nanoid::nanoid;
use polars::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tpcxbb::prelude::*;
use tpcxbb::tables::{table_columns, tpcxbb_schema, TPCXBB_TABLES};

/// ctor runs this `init()` function once per test binary.
#[ctor::ctor]
fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fresh directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tpcxbb-{}-{}", name, nanoid!(8)));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Every TPCx-BB table registered as an empty frame with its full schema.
pub fn empty_catalog() -> TableCatalog {
    let mut catalog = TableCatalog::new();
    for table in TPCXBB_TABLES {
        let schema = tpcxbb_schema(table).unwrap();
        catalog.register(table, DataFrame::empty_with_schema(&schema).lazy());
    }
    catalog
}

pub fn i64_values(df: &DataFrame, column: &str) -> Vec<Option<i64>> {
    df.column(column)
        .unwrap()
        .cast(&DataType::Int64)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn f64_values(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    df.column(column)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

pub fn str_values(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect()
}

/// Writes `rows` as a `|`-delimited `<dir>/<table>/<file>` with a trailing
/// delimiter, the way the data generator does. Columns missing from a row are
/// left empty.
pub fn write_tbl(dir: &Path, table: &str, file: &str, rows: &[Vec<(&str, &str)>]) {
    let columns = table_columns(table).unwrap();
    let table_dir = dir.join(table);
    std::fs::create_dir_all(&table_dir).unwrap();
    let mut out = std::fs::File::create(table_dir.join(file)).unwrap();
    for row in rows {
        for (column, _) in columns {
            let value = row
                .iter()
                .find(|(name, _)| name == column)
                .map(|(_, value)| *value)
                .unwrap_or("");
            write!(out, "{}|", value).unwrap();
        }
        writeln!(out).unwrap();
    }
}

/// Store sales of books by class: customer 1 buys six books, customer 2
/// only three.
pub fn book_purchases() -> TableCatalog {
    let mut catalog = TableCatalog::new();
    catalog
        .register(
            "item",
            df!(
                "i_item_sk" => &[1i64, 2, 3, 4],
                "i_category" => &["Books", "Books", "Music", "Books"],
                "i_class_id" => &[1i64, 3, 1, 15]
            )
            .unwrap()
            .lazy(),
        )
        .register(
            "store_sales",
            df!(
                "ss_customer_sk" => &[Some(1i64), Some(1), Some(1), Some(1), Some(1), Some(1), Some(1), Some(2), Some(2), Some(2), None],
                "ss_item_sk" => &[1i64, 1, 1, 1, 2, 2, 3, 1, 2, 4, 1]
            )
            .unwrap()
            .lazy(),
        );
    catalog
}

/// Catalog holding exactly `tables`, each as an in-memory frame.
pub fn catalog_of(tables: Vec<(&str, DataFrame)>) -> TableCatalog {
    let mut catalog = TableCatalog::new();
    for (table, df) in tables {
        catalog.register(table, df.lazy());
    }
    catalog
}

pub fn run_query(query: &str, catalog: &TableCatalog) -> DataFrame {
    get_query(QueryId::parse(query).unwrap())
        .unwrap()
        .execute(catalog)
        .unwrap()
}

pub fn assert_close(actual: &[Option<f64>], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{:?} vs {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected) {
        let a = a.unwrap_or_else(|| panic!("null where {} expected", e));
        assert!((a - e).abs() < 1e-6, "{:?} vs {:?}", actual, expected);
    }
}
