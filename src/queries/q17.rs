use polars::prelude::*;

use super::str_list;
use crate::error::Result;
use crate::tables::TableCatalog;

const YEAR: i32 = 2001;
const MONTH: i32 = 12;
const GMT_OFFSET: f64 = -5.0;
const CATEGORIES: [&str; 2] = ["Books", "Music"];

fn semi_join(left: LazyFrame, right: LazyFrame, left_on: &str, right_on: &str) -> LazyFrame {
    left.join(
        right,
        [col(left_on)],
        [col(right_on)],
        JoinArgs::new(JoinType::Semi),
    )
}

/// Share of store sales that went through a promotion channel, for Books and
/// Music in December 2001 in one time zone.
// SELECT sum(promotional) AS promotional, sum(total) AS total,
//   CASE WHEN sum(total) > 0 THEN 100 * sum(promotional) / sum(total)
//   ELSE 0.0 END AS promo_percent
// FROM (
//   SELECT p_channel_email, p_channel_dmail, p_channel_tv,
//     CASE WHEN (p_channel_dmail = 'Y' OR p_channel_email = 'Y' OR p_channel_tv = 'Y')
//       THEN SUM(ss_ext_sales_price) ELSE 0 END AS promotional,
//     SUM(ss_ext_sales_price) total
//   FROM store_sales ss
//   LEFT SEMI JOIN date_dim dd ON ss.ss_sold_date_sk = dd.d_date_sk
//     AND dd.d_year = 2001 AND dd.d_moy = 12
//   LEFT SEMI JOIN item i ON ss.ss_item_sk = i.i_item_sk
//     AND i.i_category IN ('Books', 'Music')
//   LEFT SEMI JOIN store s ON ss.ss_store_sk = s.s_store_sk AND s.s_gmt_offset = -5
//   LEFT SEMI JOIN (SELECT c.c_customer_sk FROM customer c
//     LEFT SEMI JOIN customer_address ca ON c.c_current_addr_sk = ca.ca_address_sk
//     AND ca.ca_gmt_offset = -5) sub_c ON ss.ss_customer_sk = sub_c.c_customer_sk
//   JOIN promotion p ON ss.ss_promo_sk = p.p_promo_sk
//   GROUP BY p_channel_email, p_channel_dmail, p_channel_tv
// ) sum_promotional
// ORDER BY promotional, total
// LIMIT 100
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_year", "d_moy"])?
        .filter(col("d_year").eq(lit(YEAR)).and(col("d_moy").eq(lit(MONTH))));
    let items = catalog
        .table("item", &["i_item_sk", "i_category"])?
        .filter(col("i_category").is_in(str_list(&CATEGORIES)));
    let stores = catalog
        .table("store", &["s_store_sk", "s_gmt_offset"])?
        .filter(col("s_gmt_offset").eq(lit(GMT_OFFSET)));
    let addresses = catalog
        .table("customer_address", &["ca_address_sk", "ca_gmt_offset"])?
        .filter(col("ca_gmt_offset").eq(lit(GMT_OFFSET)));
    let customers = semi_join(
        catalog.table("customer", &["c_customer_sk", "c_current_addr_sk"])?,
        addresses,
        "c_current_addr_sk",
        "ca_address_sk",
    );
    let promotions = catalog.table(
        "promotion",
        &["p_promo_sk", "p_channel_email", "p_channel_dmail", "p_channel_tv"],
    )?;

    let sales = catalog.table(
        "store_sales",
        &[
            "ss_sold_date_sk",
            "ss_item_sk",
            "ss_store_sk",
            "ss_customer_sk",
            "ss_promo_sk",
            "ss_ext_sales_price",
        ],
    )?;
    let sales = semi_join(sales, dates, "ss_sold_date_sk", "d_date_sk");
    let sales = semi_join(sales, items, "ss_item_sk", "i_item_sk");
    let sales = semi_join(sales, stores, "ss_store_sk", "s_store_sk");
    let sales = semi_join(sales, customers, "ss_customer_sk", "c_customer_sk");

    let promoted = col("p_channel_dmail")
        .eq(lit("Y"))
        .or(col("p_channel_email").eq(lit("Y")))
        .or(col("p_channel_tv").eq(lit("Y")));

    Ok(sales
        .inner_join(promotions, col("ss_promo_sk"), col("p_promo_sk"))
        .select([
            when(promoted)
                .then(col("ss_ext_sales_price"))
                .otherwise(lit(0.0))
                .sum()
                .alias("promotional"),
            col("ss_ext_sales_price").sum().alias("total"),
        ])
        .with_column(
            when(col("total").gt(lit(0.0)))
                .then(lit(100.0) * col("promotional") / col("total"))
                .otherwise(lit(0.0))
                .alias("promo_percent"),
        ))
}
