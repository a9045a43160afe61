use polars::prelude::*;

use crate::error::Result;
use crate::tables::TableCatalog;

const ITEM_SK: i64 = 10000;

/// Quantity sold in the competitor price window and in the window of equal
/// length right before it.
fn window_quantities(
    sales: LazyFrame,
    prices: LazyFrame,
    item_key: &str,
    date_key: &str,
    quantity: &str,
    prefix: &str,
) -> LazyFrame {
    let sold = col(date_key);
    let start = col("imp_start_date");
    let days = col("no_days");
    let in_window = |condition: Expr| {
        when(condition)
            .then(col(quantity).cast(DataType::Int64))
            .otherwise(lit(0i64))
            .sum()
    };
    sales
        .inner_join(prices, col(item_key), col("i_item_sk"))
        .group_by([col(item_key), col("imp_sk"), col("price_change")])
        .agg([
            in_window(
                sold.clone()
                    .gt_eq(start.clone())
                    .and(sold.clone().lt(start.clone() + days.clone())),
            )
            .alias(&format!("current_{}_quant", prefix)),
            in_window(sold.clone().gt_eq(start.clone() - days).and(sold.lt(start)))
                .alias(&format!("prev_{}_quant", prefix)),
        ])
}

/// Cross-price elasticity of demand for one item, from the competitor price
/// cuts recorded for it.
// WITH temp_table AS (
//   SELECT i_item_sk, imp_sk,
//     (imp_competitor_price - i_current_price) / i_current_price AS price_change,
//     imp_start_date, (imp_end_date - imp_start_date) AS no_days
//   FROM item i, item_marketprices imp
//   WHERE i.i_item_sk = imp.imp_item_sk AND i.i_item_sk = 10000
//   AND imp.imp_competitor_price < i.i_current_price
// )
// SELECT ws_item_sk,
//   avg((current_ss_quant + current_ws_quant - prev_ss_quant - prev_ws_quant)
//     / ((prev_ss_quant + prev_ws_quant) * ws.price_change)) AS cross_price_elasticity
// FROM (
//   SELECT ws_item_sk, imp_sk, price_change,
//     SUM(CASE WHEN ws_sold_date_sk >= c.imp_start_date
//       AND ws_sold_date_sk < c.imp_start_date + c.no_days
//       THEN ws_quantity ELSE 0 END) AS current_ws_quant,
//     SUM(CASE WHEN ws_sold_date_sk >= c.imp_start_date - c.no_days
//       AND ws_sold_date_sk < c.imp_start_date
//       THEN ws_quantity ELSE 0 END) AS prev_ws_quant
//   FROM web_sales ws JOIN temp_table c ON ws.ws_item_sk = c.i_item_sk
//   GROUP BY ws_item_sk, imp_sk, price_change
// ) ws
// JOIN ( -- same over store_sales
// ) ss ON (ws.ws_item_sk = ss.ss_item_sk AND ws.imp_sk = ss.imp_sk)
// GROUP BY ws.ws_item_sk
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let prices = catalog
        .table("item", &["i_item_sk", "i_current_price"])?
        .filter(col("i_item_sk").eq(lit(ITEM_SK)))
        .inner_join(
            catalog.table(
                "item_marketprices",
                &[
                    "imp_sk",
                    "imp_item_sk",
                    "imp_competitor_price",
                    "imp_start_date",
                    "imp_end_date",
                ],
            )?,
            col("i_item_sk"),
            col("imp_item_sk"),
        )
        .filter(col("imp_competitor_price").lt(col("i_current_price")))
        .select([
            col("i_item_sk"),
            col("imp_sk"),
            ((col("imp_competitor_price") - col("i_current_price")) / col("i_current_price"))
                .alias("price_change"),
            col("imp_start_date"),
            (col("imp_end_date") - col("imp_start_date")).alias("no_days"),
        ]);

    let web = window_quantities(
        catalog.table("web_sales", &["ws_item_sk", "ws_sold_date_sk", "ws_quantity"])?,
        prices.clone(),
        "ws_item_sk",
        "ws_sold_date_sk",
        "ws_quantity",
        "ws",
    );
    let store = window_quantities(
        catalog.table("store_sales", &["ss_item_sk", "ss_sold_date_sk", "ss_quantity"])?,
        prices,
        "ss_item_sk",
        "ss_sold_date_sk",
        "ss_quantity",
        "ss",
    )
    .select([
        col("ss_item_sk"),
        col("imp_sk").alias("ss_imp_sk"),
        col("current_ss_quant"),
        col("prev_ss_quant"),
    ]);

    let previous = (col("prev_ss_quant") + col("prev_ws_quant")).cast(DataType::Float64);
    let change = (col("current_ss_quant") + col("current_ws_quant")
        - col("prev_ss_quant")
        - col("prev_ws_quant"))
    .cast(DataType::Float64);
    let denominator = previous * col("price_change");
    // Undefined elasticities are skipped by the average.
    let elasticity = when(denominator.clone().eq(lit(0.0)))
        .then(lit(NULL).cast(DataType::Float64))
        .otherwise(change / denominator);

    Ok(web
        .join(
            store,
            [col("ws_item_sk"), col("imp_sk")],
            [col("ss_item_sk"), col("ss_imp_sk")],
            JoinArgs::new(JoinType::Inner),
        )
        .group_by([col("ws_item_sk")])
        .agg([elasticity.mean().alias("cross_price_elasticity")])
        .sort_by_exprs([col("ws_item_sk")], SortMultipleOptions::default()))
}
