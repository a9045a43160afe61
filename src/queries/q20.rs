use polars::prelude::*;

use crate::error::Result;
use crate::tables::TableCatalog;

const RATIO_DECIMALS: u32 = 7;

/// `returned / ordered`, 0 when either side is missing or nothing was ordered.
fn ratio(returned: &str, ordered: &str) -> Expr {
    let ordered_value = col(ordered).cast(DataType::Float64);
    when(ordered_value.clone().eq(lit(0.0)))
        .then(lit(0.0))
        .otherwise(col(returned).cast(DataType::Float64) / ordered_value)
        .fill_null(lit(0.0))
        .round(RATIO_DECIMALS)
}

/// Per-customer return behaviour, the feature table for k-means clustering.
// SELECT
//   ss_customer_sk AS user_sk,
//   round(CASE WHEN ((returns_count IS NULL) OR (orders_count IS NULL)
//     OR ((returns_count / orders_count) IS NULL)) THEN 0.0
//     ELSE (returns_count / orders_count) END, 7) AS orderRatio,
//   round(... returns_items / orders_items ..., 7) AS itemsRatio,
//   round(... returns_money / orders_money ..., 7) AS monetaryRatio,
//   round(CASE WHEN (returns_count IS NULL) THEN 0.0 ELSE returns_count END, 0) AS frequency
// FROM (
//   SELECT ss_customer_sk, COUNT(distinct(ss_ticket_number)) AS orders_count,
//     COUNT(ss_item_sk) AS orders_items, SUM(ss_net_paid) AS orders_money
//   FROM store_sales s GROUP BY ss_customer_sk
// ) orders
// LEFT OUTER JOIN (
//   SELECT sr_customer_sk, count(distinct(sr_ticket_number)) as returns_count,
//     COUNT(sr_item_sk) as returns_items, SUM(sr_return_amt) AS returns_money
//   FROM store_returns GROUP BY sr_customer_sk
// ) returned ON ss_customer_sk = sr_customer_sk
// ORDER BY user_sk
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let orders = catalog
        .table(
            "store_sales",
            &["ss_customer_sk", "ss_ticket_number", "ss_item_sk", "ss_net_paid"],
        )?
        .group_by([col("ss_customer_sk")])
        .agg([
            col("ss_ticket_number").n_unique().alias("orders_count"),
            col("ss_item_sk").count().alias("orders_items"),
            col("ss_net_paid").sum().alias("orders_money"),
        ]);
    let returned = catalog
        .table(
            "store_returns",
            &["sr_customer_sk", "sr_ticket_number", "sr_item_sk", "sr_return_amt"],
        )?
        .group_by([col("sr_customer_sk")])
        .agg([
            col("sr_ticket_number").n_unique().alias("returns_count"),
            col("sr_item_sk").count().alias("returns_items"),
            col("sr_return_amt").sum().alias("returns_money"),
        ]);

    Ok(orders
        .left_join(returned, col("ss_customer_sk"), col("sr_customer_sk"))
        .select([
            col("ss_customer_sk").alias("user_sk"),
            ratio("returns_count", "orders_count").alias("orderRatio"),
            ratio("returns_items", "orders_items").alias("itemsRatio"),
            ratio("returns_money", "orders_money").alias("monetaryRatio"),
            col("returns_count")
                .cast(DataType::Float64)
                .fill_null(lit(0.0))
                .round(0)
                .alias("frequency"),
        ])
        .sort_by_exprs([col("user_sk")], SortMultipleOptions::default()))
}
