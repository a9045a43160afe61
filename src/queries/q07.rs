use polars::prelude::*;

use super::descending_first;
use crate::error::Result;
use crate::tables::TableCatalog;

const YEAR: i32 = 2004;
const MONTH: i32 = 7;
const PRICE_FACTOR: f64 = 1.2;
const MIN_CUSTOMERS: u32 = 10;
const LIMIT: IdxSize = 10;

/// States with many purchases of items priced well above their category average.
// WITH temp_table AS (
//   SELECT k.i_item_sk
//   FROM item k,
//   (SELECT i_category, AVG(j.i_current_price) * 1.2 AS avg_price
//    FROM item j GROUP BY j.i_category) avgCategoryPrice
//   WHERE avgCategoryPrice.i_category = k.i_category
//   AND k.i_current_price > avgCategoryPrice.avg_price
// )
// SELECT ca_state, COUNT(*) AS cnt
// FROM customer_address a, customer c, store_sales s, temp_table highPriceItems
// WHERE a.ca_address_sk = c.c_current_addr_sk
// AND c.c_customer_sk = s.ss_customer_sk
// AND ca_state IS NOT NULL
// AND ss_item_sk = highPriceItems.i_item_sk
// AND s.ss_sold_date_sk IN (SELECT d_date_sk FROM date_dim WHERE d_year = 2004 AND d_moy = 7)
// GROUP BY ca_state
// HAVING cnt >= 10
// ORDER BY cnt DESC, ca_state
// LIMIT 10
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let items = catalog.table("item", &["i_item_sk", "i_category", "i_current_price"])?;
    let category_price = items
        .clone()
        .group_by([col("i_category")])
        .agg([(col("i_current_price").mean() * lit(PRICE_FACTOR)).alias("avg_price")]);
    let high_price_items = items
        .inner_join(category_price, col("i_category"), col("i_category"))
        .filter(col("i_current_price").gt(col("avg_price")))
        .select([col("i_item_sk")]);

    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_year", "d_moy"])?
        .filter(col("d_year").eq(lit(YEAR)).and(col("d_moy").eq(lit(MONTH))))
        .select([col("d_date_sk")]);

    let sales = catalog
        .table("store_sales", &["ss_sold_date_sk", "ss_customer_sk", "ss_item_sk"])?
        .join(
            dates,
            [col("ss_sold_date_sk")],
            [col("d_date_sk")],
            JoinArgs::new(JoinType::Semi),
        )
        .inner_join(high_price_items, col("ss_item_sk"), col("i_item_sk"));

    let customers = catalog.table("customer", &["c_customer_sk", "c_current_addr_sk"])?;
    let addresses = catalog
        .table("customer_address", &["ca_address_sk", "ca_state"])?
        .filter(col("ca_state").is_not_null());

    Ok(sales
        .inner_join(customers, col("ss_customer_sk"), col("c_customer_sk"))
        .inner_join(addresses, col("c_current_addr_sk"), col("ca_address_sk"))
        .group_by([col("ca_state")])
        .agg([len().alias("cnt")])
        .filter(col("cnt").gt_eq(lit(MIN_CUSTOMERS)))
        .sort_by_exprs([col("cnt"), col("ca_state")], descending_first(2))
        .limit(LIMIT))
}
