use polars::prelude::*;

use super::i32_list;
use crate::error::Result;
use crate::tables::TableCatalog;

const DEP_COUNT: i32 = 5;
const MIN_CHAR_COUNT: i32 = 5000;
const MAX_CHAR_COUNT: i32 = 6000;
const MORNING: (i32, i32) = (7, 8);
const EVENING: (i32, i32) = (19, 20);

fn sales_between(hours: (i32, i32)) -> Expr {
    when(
        col("t_hour")
            .gt_eq(lit(hours.0))
            .and(col("t_hour").lt_eq(lit(hours.1))),
    )
    .then(lit(1i64))
    .otherwise(lit(0i64))
    .sum()
}

/// Ratio of morning to evening web sales for households with five dependents
/// on content heavy pages. -1 when there were no evening sales.
// SELECT CASE WHEN pmc > 0 THEN amc / pmc ELSE -1.00 END AS am_pm_ratio
// FROM (
//   SELECT SUM(amc1) AS amc, SUM(pmc1) AS pmc
//   FROM (
//     SELECT
//       CASE WHEN t_hour BETWEEN 7 AND 8 THEN COUNT(1) ELSE 0 END AS amc1,
//       CASE WHEN t_hour BETWEEN 19 AND 20 THEN COUNT(1) ELSE 0 END AS pmc1
//     FROM web_sales ws
//     JOIN household_demographics hd ON (hd.hd_demo_sk = ws.ws_ship_hdemo_sk AND hd.hd_dep_count = 5)
//     JOIN web_page wp ON (wp.wp_web_page_sk = ws.ws_web_page_sk AND wp.wp_char_count BETWEEN 5000 AND 6000)
//     JOIN time_dim td ON (td.t_time_sk = ws.ws_sold_time_sk AND td.t_hour IN (7, 8, 19, 20))
//     GROUP BY t_hour
//   ) cnt_am_pm
// ) sum_am_pm
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let households = catalog
        .table("household_demographics", &["hd_demo_sk", "hd_dep_count"])?
        .filter(col("hd_dep_count").eq(lit(DEP_COUNT)));
    let pages = catalog
        .table("web_page", &["wp_web_page_sk", "wp_char_count"])?
        .filter(
            col("wp_char_count")
                .gt_eq(lit(MIN_CHAR_COUNT))
                .and(col("wp_char_count").lt_eq(lit(MAX_CHAR_COUNT))),
        );
    let times = catalog
        .table("time_dim", &["t_time_sk", "t_hour"])?
        .filter(col("t_hour").is_in(i32_list(&[MORNING.0, MORNING.1, EVENING.0, EVENING.1])));

    Ok(catalog
        .table(
            "web_sales",
            &["ws_ship_hdemo_sk", "ws_web_page_sk", "ws_sold_time_sk"],
        )?
        .inner_join(households, col("ws_ship_hdemo_sk"), col("hd_demo_sk"))
        .inner_join(pages, col("ws_web_page_sk"), col("wp_web_page_sk"))
        .inner_join(times, col("ws_sold_time_sk"), col("t_time_sk"))
        .select([
            sales_between(MORNING).alias("amc"),
            sales_between(EVENING).alias("pmc"),
        ])
        .select([when(col("pmc").gt(lit(0i64)))
            .then(col("amc").cast(DataType::Float64) / col("pmc").cast(DataType::Float64))
            .otherwise(lit(-1.0))
            .alias("am_pm_ratio")]))
}
