use polars::prelude::*;

use crate::error::Result;
use crate::tables::TableCatalog;

const CATEGORY: &str = "Books";
const CLASS_IDS: std::ops::RangeInclusive<i32> = 1..=15;
const MIN_PURCHASES: u32 = 5;

/// Customers clustered by how many books of each class they bought in store.
// SELECT ss.ss_customer_sk AS cid,
//   count(CASE WHEN i.i_class_id = 1 THEN 1 ELSE NULL END) AS id1,
//   ...
//   count(CASE WHEN i.i_class_id = 15 THEN 1 ELSE NULL END) AS id15
// FROM store_sales ss
// INNER JOIN item i ON (ss.ss_item_sk = i.i_item_sk
//   AND i.i_category IN ('Books') AND ss.ss_customer_sk IS NOT NULL)
// GROUP BY ss.ss_customer_sk
// HAVING count(ss.ss_item_sk) > 5
// ORDER BY cid
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let items = catalog
        .table("item", &["i_item_sk", "i_category", "i_class_id"])?
        .filter(col("i_category").eq(lit(CATEGORY)));

    let mut aggregates = vec![col("ss_item_sk").count().alias("purchases")];
    aggregates.extend(CLASS_IDS.map(|class_id| {
        when(col("i_class_id").eq(lit(class_id)))
            .then(lit(1i64))
            .otherwise(lit(0i64))
            .sum()
            .alias(&format!("id{}", class_id))
    }));

    let mut projection = vec![col("ss_customer_sk").alias("cid")];
    projection.extend(CLASS_IDS.map(|class_id| col(&format!("id{}", class_id))));

    Ok(catalog
        .table("store_sales", &["ss_customer_sk", "ss_item_sk"])?
        .filter(col("ss_customer_sk").is_not_null())
        .inner_join(items, col("ss_item_sk"), col("i_item_sk"))
        .group_by([col("ss_customer_sk")])
        .agg(aggregates)
        .filter(col("purchases").gt(lit(MIN_PURCHASES)))
        .select(projection)
        .sort_by_exprs([col("cid")], SortMultipleOptions::default()))
}
