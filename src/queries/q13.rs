use polars::prelude::*;

use super::{descending_first, yearly_totals};
use crate::error::Result;
use crate::tables::TableCatalog;

const FIRST_YEAR: i32 = 2001;
const LIMIT: IdxSize = 100;

/// Customers whose web net paid grew faster than their store net paid.
// WITH q13_temp_table1 AS (
//   SELECT ss_customer_sk AS customer_sk,
//     sum(case when (d_year = 2001) THEN ss_net_paid ELSE 0 END) first_year_total,
//     sum(case when (d_year = 2002) THEN ss_net_paid ELSE 0 END) second_year_total
//   FROM store_sales ss JOIN date_dim d ON ss.ss_sold_date_sk = d.d_date_sk
//   WHERE d.d_year in (2001, 2002)
//   GROUP BY ss_customer_sk
//   HAVING first_year_total > 0
// ), q13_temp_table2 AS ( -- same over web_sales / ws_bill_customer_sk / ws_net_paid )
// SELECT c_customer_sk, c_first_name, c_last_name,
//   (store.second_year_total / store.first_year_total) AS storeSalesIncreaseRatio,
//   (web.second_year_total / web.first_year_total) AS webSalesIncreaseRatio
// FROM q13_temp_table1 store, q13_temp_table2 web, customer c
// WHERE store.customer_sk = web.customer_sk AND web.customer_sk = c.c_customer_sk
// AND (web.second_year_total / web.first_year_total)
//   > (store.second_year_total / store.first_year_total)
// ORDER BY webSalesIncreaseRatio DESC, c_customer_sk, c_first_name, c_last_name
// LIMIT 100
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_year"])?
        .filter(
            col("d_year")
                .eq(lit(FIRST_YEAR))
                .or(col("d_year").eq(lit(FIRST_YEAR + 1))),
        );

    let store_sales = catalog.table(
        "store_sales",
        &["ss_sold_date_sk", "ss_customer_sk", "ss_net_paid"],
    )?;
    let store = yearly_totals(
        store_sales,
        dates.clone(),
        "ss_sold_date_sk",
        "ss_customer_sk",
        col("ss_net_paid"),
        FIRST_YEAR,
    )
    .select([
        col("customer_sk"),
        (col("second_year_total") / col("first_year_total")).alias("storeSalesIncreaseRatio"),
    ]);

    let web_sales = catalog.table(
        "web_sales",
        &["ws_sold_date_sk", "ws_bill_customer_sk", "ws_net_paid"],
    )?;
    let web = yearly_totals(
        web_sales,
        dates,
        "ws_sold_date_sk",
        "ws_bill_customer_sk",
        col("ws_net_paid"),
        FIRST_YEAR,
    )
    .select([
        col("customer_sk").alias("web_customer_sk"),
        (col("second_year_total") / col("first_year_total")).alias("webSalesIncreaseRatio"),
    ]);

    let customers = catalog.table("customer", &["c_customer_sk", "c_first_name", "c_last_name"])?;

    Ok(store
        .inner_join(web, col("customer_sk"), col("web_customer_sk"))
        .filter(col("webSalesIncreaseRatio").gt(col("storeSalesIncreaseRatio")))
        .inner_join(customers, col("customer_sk"), col("c_customer_sk"))
        .select([
            col("customer_sk").alias("c_customer_sk"),
            col("c_first_name"),
            col("c_last_name"),
            col("storeSalesIncreaseRatio"),
            col("webSalesIncreaseRatio"),
        ])
        .sort_by_exprs(
            [
                col("webSalesIncreaseRatio"),
                col("c_customer_sk"),
                col("c_first_name"),
                col("c_last_name"),
            ],
            descending_first(4),
        )
        .limit(LIMIT))
}
