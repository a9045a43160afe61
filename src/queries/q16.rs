use polars::prelude::*;

use crate::error::Result;
use crate::tables::TableCatalog;

const PRICE_CHANGE_DATE: &str = "2001-03-16";
/// 30 days either side of the price change.
const WINDOW_START: &str = "2001-02-14";
const WINDOW_END: &str = "2001-04-15";
const LIMIT: IdxSize = 100;

/// Web sales net of refunds before and after a price change, per warehouse
/// state and item.
// SELECT w_state, i_item_id,
//   SUM(CASE WHEN d_date < '2001-03-16'
//     THEN ws_sales_price - COALESCE(wr_refunded_cash, 0) ELSE 0.0 END) AS sales_before,
//   SUM(CASE WHEN d_date >= '2001-03-16'
//     THEN ws_sales_price - COALESCE(wr_refunded_cash, 0) ELSE 0.0 END) AS sales_after
// FROM (
//   SELECT * FROM web_sales ws
//   LEFT OUTER JOIN web_returns wr ON (ws.ws_order_number = wr.wr_order_number
//     AND ws.ws_item_sk = wr.wr_item_sk)
// ) a1
// JOIN item i ON a1.ws_item_sk = i.i_item_sk
// JOIN warehouse w ON a1.ws_warehouse_sk = w.w_warehouse_sk
// JOIN date_dim d ON a1.ws_sold_date_sk = d.d_date_sk
// AND d.d_date BETWEEN '2001-03-16' - 30 days AND '2001-03-16' + 30 days
// GROUP BY w_state, i_item_id
// ORDER BY w_state, i_item_id
// LIMIT 100
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let web_sales = catalog.table(
        "web_sales",
        &[
            "ws_order_number",
            "ws_item_sk",
            "ws_warehouse_sk",
            "ws_sold_date_sk",
            "ws_sales_price",
        ],
    )?;
    let web_returns = catalog.table(
        "web_returns",
        &["wr_order_number", "wr_item_sk", "wr_refunded_cash"],
    )?;
    let items = catalog.table("item", &["i_item_sk", "i_item_id"])?;
    let warehouses = catalog.table("warehouse", &["w_warehouse_sk", "w_state"])?;
    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_date"])?
        .filter(
            col("d_date")
                .gt_eq(lit(WINDOW_START))
                .and(col("d_date").lt_eq(lit(WINDOW_END))),
        );

    let net_sales = col("ws_sales_price") - col("wr_refunded_cash").fill_null(lit(0.0));
    let sales_when = |condition: Expr| {
        when(condition)
            .then(net_sales.clone())
            .otherwise(lit(0.0))
            .sum()
    };

    Ok(web_sales
        .join(
            web_returns,
            [col("ws_order_number"), col("ws_item_sk")],
            [col("wr_order_number"), col("wr_item_sk")],
            JoinArgs::new(JoinType::Left),
        )
        .inner_join(items, col("ws_item_sk"), col("i_item_sk"))
        .inner_join(warehouses, col("ws_warehouse_sk"), col("w_warehouse_sk"))
        .inner_join(dates, col("ws_sold_date_sk"), col("d_date_sk"))
        .group_by([col("w_state"), col("i_item_id")])
        .agg([
            sales_when(col("d_date").lt(lit(PRICE_CHANGE_DATE))).alias("sales_before"),
            sales_when(col("d_date").gt_eq(lit(PRICE_CHANGE_DATE))).alias("sales_after"),
        ])
        .sort_by_exprs(
            [col("w_state"), col("i_item_id")],
            SortMultipleOptions::default(),
        )
        .limit(LIMIT))
}
