use polars::prelude::*;

use super::{descending_first, frequent_pairs};
use crate::error::Result;
use crate::tables::TableCatalog;

const LIMIT: IdxSize = 100;

/// Category pairs that appear together in web orders.
// SELECT category_id_1, category_id_2, COUNT(*) AS cnt
// FROM (
//   SELECT DISTINCT ws_order_number, i_category_id
//   FROM web_sales ws, item i
//   WHERE ws.ws_item_sk = i.i_item_sk
//   AND i.i_category_id IS NOT NULL
// ) -- expanded to (category_id_1 < category_id_2) pairs per order
// GROUP BY category_id_1, category_id_2
// ORDER BY cnt DESC, category_id_1, category_id_2
// LIMIT 100
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let items = catalog
        .table("item", &["i_item_sk", "i_category_id"])?
        .filter(col("i_category_id").is_not_null());
    let orders = catalog
        .table("web_sales", &["ws_order_number", "ws_item_sk"])?
        .inner_join(items, col("ws_item_sk"), col("i_item_sk"))
        .select([col("ws_order_number"), col("i_category_id")]);

    Ok(
        frequent_pairs(
            orders,
            "ws_order_number",
            "i_category_id",
            "category_id_1",
            "category_id_2",
        )
        .sort_by_exprs(
            [col("cnt"), col("category_id_1"), col("category_id_2")],
            descending_first(3),
        )
        .limit(LIMIT),
    )
}
