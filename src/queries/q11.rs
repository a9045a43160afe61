use polars::prelude::*;

use crate::error::Result;
use crate::tables::TableCatalog;

const START_DATE: &str = "2003-01-02";
const END_DATE: &str = "2003-02-02";

/// Pearson correlation computed from sums. Null for fewer than two rows or a
/// constant input, like SQL `corr`.
fn correlation(x: Expr, y: Expr) -> Expr {
    let n = len().cast(DataType::Float64);
    let numerator = n.clone() * (x.clone() * y.clone()).sum() - x.clone().sum() * y.clone().sum();
    let x_spread = n.clone() * (x.clone() * x.clone()).sum() - x.clone().sum() * x.sum();
    let y_spread = n.clone() * (y.clone() * y.clone()).sum() - y.clone().sum() * y.sum();
    let spread = x_spread * y_spread;
    when(n.lt(lit(2.0)).or(spread.clone().eq(lit(0.0))))
        .then(lit(NULL).cast(DataType::Float64))
        .otherwise(numerator / spread.sqrt())
}

/// Correlation between the number of reviews and the average rating of items
/// that sold on the web in a given month.
// SELECT corr(reviews_count, avg_rating)
// FROM (
//   SELECT p.pr_item_sk AS pid, p.r_count AS reviews_count, p.avg_rating AS avg_rating,
//     s.revenue AS m_revenue
//   FROM (
//     SELECT pr_item_sk, count(*) AS r_count, avg(pr_review_rating) AS avg_rating
//     FROM product_reviews WHERE pr_item_sk IS NOT NULL GROUP BY pr_item_sk
//   ) p
//   INNER JOIN (
//     SELECT ws_item_sk, SUM(ws_net_paid) AS revenue
//     FROM web_sales ws
//     LEFT SEMI JOIN (SELECT d_date_sk FROM date_dim d
//       WHERE d.d_date >= '2003-01-02' AND d.d_date <= '2003-02-02') dd
//     ON (ws.ws_sold_date_sk = dd.d_date_sk)
//     WHERE ws_item_sk IS NOT NULL
//     GROUP BY ws_item_sk
//   ) s
//   ON p.pr_item_sk = s.ws_item_sk
// ) q11_review_stats
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let reviews = catalog
        .table("product_reviews", &["pr_item_sk", "pr_review_rating"])?
        .filter(col("pr_item_sk").is_not_null())
        .group_by([col("pr_item_sk")])
        .agg([
            len().cast(DataType::Float64).alias("reviews_count"),
            col("pr_review_rating")
                .cast(DataType::Float64)
                .mean()
                .alias("avg_rating"),
        ]);

    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_date"])?
        .filter(
            col("d_date")
                .gt_eq(lit(START_DATE))
                .and(col("d_date").lt_eq(lit(END_DATE))),
        );
    let revenue = catalog
        .table("web_sales", &["ws_sold_date_sk", "ws_item_sk", "ws_net_paid"])?
        .join(
            dates,
            [col("ws_sold_date_sk")],
            [col("d_date_sk")],
            JoinArgs::new(JoinType::Semi),
        )
        .filter(col("ws_item_sk").is_not_null())
        .group_by([col("ws_item_sk")])
        .agg([col("ws_net_paid").sum().alias("m_revenue")]);

    Ok(reviews
        .inner_join(revenue, col("pr_item_sk"), col("ws_item_sk"))
        .select([
            correlation(col("reviews_count"), col("avg_rating"))
                .alias("corr_reviews_count_avg_rating"),
        ]))
}
