use polars::prelude::*;

use super::{descending_first, frequent_pairs, i32_list, i64_list};
use crate::error::Result;
use crate::tables::TableCatalog;

const CATEGORY_IDS: [i32; 3] = [1, 2, 3];
const STORE_SKS: [i64; 5] = [10, 20, 33, 40, 50];
const VIEWED_TOGETHER_COUNT: u32 = 50;
const LIMIT: IdxSize = 100;

/// Item pairs bought together in the same store ticket.
// SELECT item_sk_1, item_sk_2, COUNT(*) AS cnt
// FROM (
//   SELECT ss_ticket_number, ss_item_sk
//   FROM store_sales s, item i
//   WHERE s.ss_item_sk = i.i_item_sk
//   AND i.i_category_id IN (1, 2, 3)
//   AND s.ss_store_sk IN (10, 20, 33, 40, 50)
// ) -- expanded to distinct (item_sk_1 < item_sk_2) pairs per ticket
// GROUP BY item_sk_1, item_sk_2
// HAVING cnt > 50
// ORDER BY cnt DESC, item_sk_1, item_sk_2
// LIMIT 100
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let items = catalog
        .table("item", &["i_item_sk", "i_category_id"])?
        .filter(col("i_category_id").is_in(i32_list(&CATEGORY_IDS)));
    let sales = catalog
        .table("store_sales", &["ss_item_sk", "ss_store_sk", "ss_ticket_number"])?
        .filter(col("ss_store_sk").is_in(i64_list(&STORE_SKS)));

    let baskets = sales
        .inner_join(items, col("ss_item_sk"), col("i_item_sk"))
        .select([col("ss_ticket_number"), col("ss_item_sk")]);

    Ok(
        frequent_pairs(baskets, "ss_ticket_number", "ss_item_sk", "item_sk_1", "item_sk_2")
            .filter(col("cnt").gt(lit(VIEWED_TOGETHER_COUNT)))
            .sort_by_exprs(
                [col("cnt"), col("item_sk_1"), col("item_sk_2")],
                descending_first(3),
            )
            .limit(LIMIT),
    )
}
