mod q01;
mod q05;
mod q06;
mod q07;
mod q09;
mod q11;
mod q12;
mod q13;
mod q14;
mod q15;
mod q16;
mod q17;
mod q20;
mod q21;
mod q22;
mod q23;
mod q24;
mod q25;
mod q26;
mod q29;

use polars::prelude::*;
use std::fmt;

use crate::error::{BenchError, Result};
use crate::tables::TableCatalog;

pub const MAX_QUERY: usize = 30;

const SESSIONIZE: &str = "requires a clickstream sessionization UDF";
const SENTIMENT: &str = "requires a sentiment extraction UDTF over review text";
const CLASSIFIER: &str = "requires training a text classifier";

pub type QueryFn = fn(&TableCatalog) -> Result<LazyFrame>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryId(usize);

impl QueryId {
    /// Accepts `5`, `q5`, `Q05`.
    pub fn parse(query: &str) -> Result<Self> {
        let trimmed = query.trim();
        let digits = trimmed
            .strip_prefix('q')
            .or_else(|| trimmed.strip_prefix('Q'))
            .unwrap_or(trimmed);
        match digits.parse::<usize>() {
            Ok(index) if (1..=MAX_QUERY).contains(&index) => Ok(QueryId(index)),
            _ => Err(BenchError::UnknownQuery(query.to_string())),
        }
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{:02}", self.0)
    }
}

#[derive(Clone, Copy)]
pub struct Query {
    id: QueryId,
    description: &'static str,
    build: QueryFn,
}

impl Query {
    pub fn id(&self) -> QueryId {
        self.id
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Builds the lazy plan. Nothing is read until the plan is collected.
    pub fn plan(&self, catalog: &TableCatalog) -> Result<LazyFrame> {
        (self.build)(catalog)
    }

    pub fn execute(&self, catalog: &TableCatalog) -> Result<DataFrame> {
        Ok(self.plan(catalog)?.collect()?)
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish()
    }
}

pub fn get_query(id: QueryId) -> Result<Query> {
    let index = id.index();
    let (description, build): (&'static str, QueryFn) = match index {
        1 => ("Item pairs frequently sold together in stores", q01::query),
        2 | 3 | 4 | 8 | 30 => return Err(BenchError::UnsupportedQuery(index, SESSIONIZE)),
        5 => ("Per-user category click features for logistic regression", q05::query),
        6 => ("Customers shifting spend from store to web", q06::query),
        7 => ("States buying items priced above their category average", q07::query),
        9 => ("Store quantity across demographic and geographic bands", q09::query),
        10 | 18 | 19 | 27 => return Err(BenchError::UnsupportedQuery(index, SENTIMENT)),
        11 => ("Correlation of review count and rating for web sales", q11::query),
        12 => ("Web category views followed by in-store purchases", q12::query),
        13 => ("Customers with faster web than store growth", q13::query),
        14 => ("Morning to evening web sales ratio", q14::query),
        15 => ("Categories with declining store sales", q15::query),
        16 => ("Web sales around a price change per warehouse state", q16::query),
        17 => ("Promotional share of store sales", q17::query),
        20 => ("Customer return behaviour features", q20::query),
        21 => ("Store returns later bought on the web", q21::query),
        22 => ("Inventory change around a price change", q22::query),
        23 => ("Items with volatile inventory in consecutive months", q23::query),
        24 => ("Cross-price elasticity of demand", q24::query),
        25 => ("Customer recency, frequency and spend", q25::query),
        26 => ("Customer book purchases by class", q26::query),
        28 => return Err(BenchError::UnsupportedQuery(index, CLASSIFIER)),
        29 => ("Category pairs bought together on the web", q29::query),
        _ => return Err(BenchError::UnknownQuery(id.to_string())),
    };
    Ok(Query {
        id,
        description,
        build,
    })
}

/// Identifiers that resolve to a runnable query.
pub fn supported_queries() -> Vec<QueryId> {
    (1..=MAX_QUERY)
        .map(QueryId)
        .filter(|id| get_query(*id).is_ok())
        .collect()
}

pub(crate) fn i32_list(values: &[i32]) -> Expr {
    lit(Series::new("", values))
}

pub(crate) fn i64_list(values: &[i64]) -> Expr {
    lit(Series::new("", values))
}

pub(crate) fn str_list(values: &[&str]) -> Expr {
    lit(Series::new("", values))
}

pub(crate) fn descending_first(count: usize) -> SortMultipleOptions {
    let mut descending = vec![false; count];
    if let Some(first) = descending.first_mut() {
        *first = true;
    }
    SortMultipleOptions::default().with_order_descending_multi(descending)
}

/// Counts how often two distinct members share a basket.
///
/// Each basket contributes every unordered pair once, with `first < second`.
pub(crate) fn frequent_pairs(
    baskets: LazyFrame,
    basket: &str,
    member: &str,
    first: &str,
    second: &str,
) -> LazyFrame {
    let distinct = baskets
        .select([col(basket), col(member)])
        .unique(None, UniqueKeepStrategy::Any);
    let left = distinct.clone().select([col(basket), col(member).alias(first)]);
    let right = distinct.select([col(basket).alias("pair_basket"), col(member).alias(second)]);
    left.inner_join(right, col(basket), col("pair_basket"))
        .filter(col(first).lt(col(second)))
        .group_by([col(first), col(second)])
        .agg([len().alias("cnt")])
}

/// Per-customer totals for the first and second year, keeping customers who
/// spent something in the first year.
pub(crate) fn yearly_totals(
    sales: LazyFrame,
    dates: LazyFrame,
    date_key: &str,
    customer_key: &str,
    amount: Expr,
    first_year: i32,
) -> LazyFrame {
    let in_year = |year: i32| {
        when(col("d_year").eq(lit(year)))
            .then(amount.clone())
            .otherwise(lit(0.0))
            .sum()
    };
    sales
        .inner_join(dates, col(date_key), col("d_date_sk"))
        .with_column(col(customer_key).alias("customer_sk"))
        .group_by([col("customer_sk")])
        .agg([
            in_year(first_year).alias("first_year_total"),
            in_year(first_year + 1).alias("second_year_total"),
        ])
        .filter(col("first_year_total").gt(lit(0.0)))
}
