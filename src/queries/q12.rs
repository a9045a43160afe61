use polars::prelude::*;

use super::str_list;
use crate::error::Result;
use crate::tables::TableCatalog;

const CATEGORIES: [&str; 2] = ["Books", "Electronics"];
const START_DATE_SK: i64 = 37134;
const WEB_WINDOW_DAYS: i64 = 30;
const STORE_WINDOW_DAYS: i64 = 90;

fn in_range(column: &str, start: i64, days: i64) -> Expr {
    col(column)
        .gt_eq(lit(start))
        .and(col(column).lt_eq(lit(start + days)))
}

/// Users who viewed a category online and later bought from it in store.
// SELECT DISTINCT wcs_user_sk
// FROM (
//   SELECT DISTINCT wcs_user_sk, wcs_click_date_sk
//   FROM web_clickstreams, item
//   WHERE wcs_click_date_sk BETWEEN 37134 AND (37134 + 30)
//   AND i_category IN ('Books', 'Electronics')
//   AND wcs_item_sk = i_item_sk
//   AND wcs_user_sk IS NOT NULL
//   AND wcs_sales_sk IS NULL
// ) webInRange,
// (
//   SELECT DISTINCT ss_sold_date_sk, ss_customer_sk
//   FROM store_sales, item
//   WHERE ss_sold_date_sk BETWEEN 37134 AND (37134 + 90)
//   AND i_category IN ('Books', 'Electronics')
//   AND ss_item_sk = i_item_sk
//   AND ss_customer_sk IS NOT NULL
// ) storeInRange
// WHERE wcs_user_sk = ss_customer_sk
// AND wcs_click_date_sk < ss_sold_date_sk
// ORDER BY wcs_user_sk
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let items = catalog
        .table("item", &["i_item_sk", "i_category"])?
        .filter(col("i_category").is_in(str_list(&CATEGORIES)))
        .select([col("i_item_sk")]);

    let web_in_range = catalog
        .table(
            "web_clickstreams",
            &["wcs_click_date_sk", "wcs_sales_sk", "wcs_item_sk", "wcs_user_sk"],
        )?
        .filter(
            in_range("wcs_click_date_sk", START_DATE_SK, WEB_WINDOW_DAYS)
                .and(col("wcs_user_sk").is_not_null())
                .and(col("wcs_sales_sk").is_null()),
        )
        .inner_join(items.clone(), col("wcs_item_sk"), col("i_item_sk"))
        .select([col("wcs_user_sk"), col("wcs_click_date_sk")])
        .unique(None, UniqueKeepStrategy::Any);

    let store_in_range = catalog
        .table("store_sales", &["ss_sold_date_sk", "ss_item_sk", "ss_customer_sk"])?
        .filter(
            in_range("ss_sold_date_sk", START_DATE_SK, STORE_WINDOW_DAYS)
                .and(col("ss_customer_sk").is_not_null()),
        )
        .inner_join(items, col("ss_item_sk"), col("i_item_sk"))
        .select([col("ss_sold_date_sk"), col("ss_customer_sk")])
        .unique(None, UniqueKeepStrategy::Any);

    Ok(web_in_range
        .inner_join(store_in_range, col("wcs_user_sk"), col("ss_customer_sk"))
        .filter(col("wcs_click_date_sk").lt(col("ss_sold_date_sk")))
        .select([col("wcs_user_sk")])
        .unique(None, UniqueKeepStrategy::Any)
        .sort_by_exprs([col("wcs_user_sk")], SortMultipleOptions::default()))
}
