use polars::prelude::*;

use crate::error::Result;
use crate::tables::TableCatalog;

const PRICE_CHANGE_DATE: &str = "2001-05-08";
/// 30 days either side of the price change.
const WINDOW_START: &str = "2001-04-08";
const WINDOW_END: &str = "2001-06-07";
const MIN_PRICE: f64 = 0.98;
const MAX_PRICE: f64 = 1.5;
const MIN_RATIO: f64 = 2.0 / 3.0;
const MAX_RATIO: f64 = 3.0 / 2.0;
const LIMIT: IdxSize = 100;

/// Inventory on hand before and after a price change, for items whose stock
/// moved by less than a third either way.
// SELECT w_warehouse_name, i_item_id,
//   SUM(CASE WHEN datediff(d_date, '2001-05-08') < 0
//     THEN inv_quantity_on_hand ELSE 0 END) AS inv_before,
//   SUM(CASE WHEN datediff(d_date, '2001-05-08') >= 0
//     THEN inv_quantity_on_hand ELSE 0 END) AS inv_after
// FROM inventory inv, item i, warehouse w, date_dim d
// WHERE i_current_price BETWEEN 0.98 AND 1.5
// AND i_item_sk = inv_item_sk
// AND inv_warehouse_sk = w_warehouse_sk
// AND inv_date_sk = d_date_sk
// AND datediff(d_date, '2001-05-08') >= -30
// AND datediff(d_date, '2001-05-08') <= 30
// GROUP BY w_warehouse_name, i_item_id
// HAVING inv_before > 0
// AND inv_after / inv_before >= 2.0 / 3.0
// AND inv_after / inv_before <= 3.0 / 2.0
// ORDER BY w_warehouse_name, i_item_id
// LIMIT 100
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let items = catalog
        .table("item", &["i_item_sk", "i_item_id", "i_current_price"])?
        .filter(
            col("i_current_price")
                .gt_eq(lit(MIN_PRICE))
                .and(col("i_current_price").lt_eq(lit(MAX_PRICE))),
        );
    let warehouses = catalog.table("warehouse", &["w_warehouse_sk", "w_warehouse_name"])?;
    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_date"])?
        .filter(
            col("d_date")
                .gt_eq(lit(WINDOW_START))
                .and(col("d_date").lt_eq(lit(WINDOW_END))),
        );

    let on_hand = |condition: Expr| {
        when(condition)
            .then(col("inv_quantity_on_hand").cast(DataType::Int64))
            .otherwise(lit(0i64))
            .sum()
    };
    let change = col("inv_after").cast(DataType::Float64) / col("inv_before").cast(DataType::Float64);

    Ok(catalog
        .table(
            "inventory",
            &["inv_date_sk", "inv_item_sk", "inv_warehouse_sk", "inv_quantity_on_hand"],
        )?
        .inner_join(items, col("inv_item_sk"), col("i_item_sk"))
        .inner_join(warehouses, col("inv_warehouse_sk"), col("w_warehouse_sk"))
        .inner_join(dates, col("inv_date_sk"), col("d_date_sk"))
        .group_by([col("w_warehouse_name"), col("i_item_id")])
        .agg([
            on_hand(col("d_date").lt(lit(PRICE_CHANGE_DATE))).alias("inv_before"),
            on_hand(col("d_date").gt_eq(lit(PRICE_CHANGE_DATE))).alias("inv_after"),
        ])
        .filter(
            col("inv_before")
                .gt(lit(0i64))
                .and(change.clone().gt_eq(lit(MIN_RATIO)))
                .and(change.lt_eq(lit(MAX_RATIO))),
        )
        .sort_by_exprs(
            [col("w_warehouse_name"), col("i_item_id")],
            SortMultipleOptions::default(),
        )
        .limit(LIMIT))
}
