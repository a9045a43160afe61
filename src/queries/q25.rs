use polars::prelude::*;

use crate::error::Result;
use crate::tables::TableCatalog;

const START_DATE: &str = "2002-01-02";
const RECENT_DATE_SK: i64 = 37621;
const RECENT_DAYS: i64 = 60;

fn customer_activity(
    sales: LazyFrame,
    dates: LazyFrame,
    customer_key: &str,
    date_key: &str,
    order_key: &str,
    amount: &str,
) -> LazyFrame {
    sales
        .filter(col(customer_key).is_not_null())
        .inner_join(dates, col(date_key), col("d_date_sk"))
        .group_by([col(customer_key)])
        .agg([
            col(order_key)
                .n_unique()
                .cast(DataType::Int64)
                .alias("frequency"),
            col(date_key).max().alias("most_recent_date"),
            col(amount).sum().alias("amount"),
        ])
        .select([
            col(customer_key).alias("cid"),
            col("frequency"),
            col("most_recent_date"),
            col("amount"),
        ])
}

/// Recency, frequency and monetary value of every customer across store and
/// web, the feature table for customer segmentation.
// WITH store_part AS (
//   SELECT ss_customer_sk AS cid, count(distinct ss_ticket_number) AS frequency,
//     max(ss_sold_date_sk) AS most_recent_date, SUM(ss_net_paid) AS amount
//   FROM store_sales ss JOIN date_dim d ON ss.ss_sold_date_sk = d.d_date_sk
//   WHERE d.d_date > '2002-01-02' AND ss_customer_sk IS NOT NULL
//   GROUP BY ss_customer_sk
// ), web_part AS ( -- same over web_sales / ws_bill_customer_sk / ws_order_number )
// SELECT cid,
//   CASE WHEN 37621 - max(most_recent_date) < 60 THEN 1.0 ELSE 0.0 END AS recency,
//   SUM(frequency) AS frequency,
//   SUM(amount) AS totalspend
// FROM (SELECT * FROM store_part UNION ALL SELECT * FROM web_part)
// GROUP BY cid
// ORDER BY cid
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_date"])?
        .filter(col("d_date").gt(lit(START_DATE)))
        .select([col("d_date_sk")]);

    let store = customer_activity(
        catalog.table(
            "store_sales",
            &["ss_sold_date_sk", "ss_customer_sk", "ss_ticket_number", "ss_net_paid"],
        )?,
        dates.clone(),
        "ss_customer_sk",
        "ss_sold_date_sk",
        "ss_ticket_number",
        "ss_net_paid",
    );
    let web = customer_activity(
        catalog.table(
            "web_sales",
            &["ws_sold_date_sk", "ws_bill_customer_sk", "ws_order_number", "ws_net_paid"],
        )?,
        dates,
        "ws_bill_customer_sk",
        "ws_sold_date_sk",
        "ws_order_number",
        "ws_net_paid",
    );

    Ok(concat([store, web], UnionArgs::default())?
        .group_by([col("cid")])
        .agg([
            col("most_recent_date").max().alias("most_recent_date"),
            col("frequency").sum().alias("frequency"),
            col("amount").sum().alias("totalspend"),
        ])
        .select([
            col("cid"),
            when((lit(RECENT_DATE_SK) - col("most_recent_date")).lt(lit(RECENT_DAYS)))
                .then(lit(1.0))
                .otherwise(lit(0.0))
                .alias("recency"),
            col("frequency"),
            col("totalspend"),
        ])
        .sort_by_exprs([col("cid")], SortMultipleOptions::default()))
}
