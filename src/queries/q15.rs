use polars::prelude::*;

use crate::error::Result;
use crate::tables::TableCatalog;

const STORE_SK: i64 = 10;
const START_DATE: &str = "2001-09-02";
const END_DATE: &str = "2002-09-02";

/// Categories whose daily store revenue has a flat or negative trend, from a
/// least squares fit of revenue against the date key.
// SELECT * FROM (
//   SELECT cat,
//     ((count(x) * SUM(xy) - SUM(x) * SUM(y)) / (count(x) * SUM(xx) - SUM(x) * SUM(x))) AS slope,
//     (SUM(y) - ((count(x) * SUM(xy) - SUM(x) * SUM(y))
//       / (count(x) * SUM(xx) - SUM(x) * SUM(x))) * SUM(x)) / count(x) AS intercept
//   FROM (
//     SELECT i.i_category_id AS cat, s.ss_sold_date_sk AS x, SUM(s.ss_net_paid) AS y,
//       s.ss_sold_date_sk * SUM(s.ss_net_paid) AS xy,
//       s.ss_sold_date_sk * s.ss_sold_date_sk AS xx
//     FROM store_sales s
//     LEFT SEMI JOIN (SELECT d_date_sk FROM date_dim d
//       WHERE d.d_date >= '2001-09-02' AND d.d_date <= '2002-09-02') dd
//     ON (s.ss_sold_date_sk = dd.d_date_sk)
//     INNER JOIN item i ON s.ss_item_sk = i.i_item_sk
//     WHERE i.i_category_id IS NOT NULL AND s.ss_store_sk = 10
//     GROUP BY i.i_category_id, s.ss_sold_date_sk
//   ) temp
//   GROUP BY cat
// ) regression
// WHERE slope <= 0
// ORDER BY cat
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_date"])?
        .filter(
            col("d_date")
                .gt_eq(lit(START_DATE))
                .and(col("d_date").lt_eq(lit(END_DATE))),
        );
    let items = catalog
        .table("item", &["i_item_sk", "i_category_id"])?
        .filter(col("i_category_id").is_not_null());

    let daily = catalog
        .table(
            "store_sales",
            &["ss_sold_date_sk", "ss_item_sk", "ss_store_sk", "ss_net_paid"],
        )?
        .filter(col("ss_store_sk").eq(lit(STORE_SK)))
        .join(
            dates,
            [col("ss_sold_date_sk")],
            [col("d_date_sk")],
            JoinArgs::new(JoinType::Semi),
        )
        .inner_join(items, col("ss_item_sk"), col("i_item_sk"))
        .group_by([col("i_category_id"), col("ss_sold_date_sk")])
        .agg([col("ss_net_paid").sum().alias("y")])
        .with_column(col("ss_sold_date_sk").cast(DataType::Float64).alias("x"))
        .with_columns([
            (col("x") * col("y")).alias("xy"),
            (col("x") * col("x")).alias("xx"),
        ]);

    let slope = (col("n") * col("sum_xy") - col("sum_x") * col("sum_y"))
        / (col("n") * col("sum_xx") - col("sum_x") * col("sum_x"));

    Ok(daily
        .group_by([col("i_category_id")])
        .agg([
            len().cast(DataType::Float64).alias("n"),
            col("x").sum().alias("sum_x"),
            col("y").sum().alias("sum_y"),
            col("xy").sum().alias("sum_xy"),
            col("xx").sum().alias("sum_xx"),
        ])
        .with_column(slope.alias("slope"))
        .select([
            col("i_category_id").alias("cat"),
            col("slope"),
            ((col("sum_y") - col("slope") * col("sum_x")) / col("n")).alias("intercept"),
        ])
        .filter(col("slope").lt_eq(lit(0.0)))
        .sort_by_exprs([col("cat")], SortMultipleOptions::default()))
}
