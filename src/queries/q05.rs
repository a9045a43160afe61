use polars::prelude::*;

use super::str_list;
use crate::error::Result;
use crate::tables::TableCatalog;

const TARGET_CATEGORY: &str = "Books";
const CATEGORY_IDS: std::ops::RangeInclusive<i32> = 1..=7;
const COLLEGE_EDUCATION: [&str; 4] = ["Advanced Degree", "College", "4 yr Degree", "2 yr Degree"];

fn flag(condition: Expr) -> Expr {
    when(condition).then(lit(1i64)).otherwise(lit(0i64))
}

/// Logistic-regression input: clicks per category for every known web user,
/// plus education and gender flags.
// SELECT
//   clicks_in_category,
//   CASE WHEN cd_education_status IN ('Advanced Degree', 'College', '4 yr Degree', '2 yr Degree')
//     THEN 1 ELSE 0 END AS college_education,
//   CASE WHEN cd_gender = 'M' THEN 1 ELSE 0 END AS male,
//   clicks_in_1, ..., clicks_in_7
// FROM (
//   SELECT wcs_user_sk,
//     SUM(CASE WHEN i_category = 'Books' THEN 1 ELSE 0 END) AS clicks_in_category,
//     SUM(CASE WHEN i_category_id = 1 THEN 1 ELSE 0 END) AS clicks_in_1,
//     ...
//   FROM web_clickstreams
//   INNER JOIN item it ON (wcs_item_sk = i_item_sk AND wcs_user_sk IS NOT NULL)
//   GROUP BY wcs_user_sk
// ) q05_user_clicks_in_cat
// INNER JOIN customer ct ON wcs_user_sk = ct.c_customer_sk
// INNER JOIN customer_demographics ON c_current_cdemo_sk = cd_demo_sk
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let clicks = catalog
        .table("web_clickstreams", &["wcs_item_sk", "wcs_user_sk"])?
        .filter(col("wcs_user_sk").is_not_null());
    let items = catalog.table("item", &["i_item_sk", "i_category", "i_category_id"])?;

    let mut aggregates = vec![flag(col("i_category").eq(lit(TARGET_CATEGORY)))
        .sum()
        .alias("clicks_in_category")];
    for category_id in CATEGORY_IDS {
        aggregates.push(
            flag(col("i_category_id").eq(lit(category_id)))
                .sum()
                .alias(&format!("clicks_in_{}", category_id)),
        );
    }
    let user_clicks = clicks
        .inner_join(items, col("wcs_item_sk"), col("i_item_sk"))
        .group_by([col("wcs_user_sk")])
        .agg(aggregates);

    let customers = catalog.table("customer", &["c_customer_sk", "c_current_cdemo_sk"])?;
    let demographics = catalog.table(
        "customer_demographics",
        &["cd_demo_sk", "cd_gender", "cd_education_status"],
    )?;

    let mut projection = vec![
        col("clicks_in_category"),
        flag(col("cd_education_status").is_in(str_list(&COLLEGE_EDUCATION)))
            .alias("college_education"),
        flag(col("cd_gender").eq(lit("M"))).alias("male"),
    ];
    projection.extend(CATEGORY_IDS.map(|id| col(&format!("clicks_in_{}", id))));

    Ok(user_clicks
        .inner_join(customers, col("wcs_user_sk"), col("c_customer_sk"))
        .inner_join(demographics, col("c_current_cdemo_sk"), col("cd_demo_sk"))
        .sort_by_exprs([col("wcs_user_sk")], SortMultipleOptions::default())
        .select(projection))
}
