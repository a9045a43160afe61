use polars::prelude::*;

use super::{descending_first, yearly_totals};
use crate::error::Result;
use crate::tables::TableCatalog;

const FIRST_YEAR: i32 = 2001;
const LIMIT: IdxSize = 100;

fn ratio(second: &str, first: &str) -> Expr {
    col(second) / col(first)
}

/// Customers whose web spending grew faster than their store spending.
// WITH temp_table_1 AS (
//   SELECT ss_customer_sk AS customer_sk,
//     SUM(CASE WHEN d_year = 2001 THEN ((ss_ext_list_price - ss_ext_wholesale_cost
//       - ss_ext_discount_amt) + ss_ext_sales_price) / 2 ELSE 0 END) first_year_total,
//     SUM(CASE WHEN d_year = 2002 THEN ... ELSE 0 END) second_year_total
//   FROM store_sales, date_dim
//   WHERE ss_sold_date_sk = d_date_sk AND d_year BETWEEN 2001 AND 2002
//   GROUP BY ss_customer_sk
//   HAVING first_year_total > 0
// ), temp_table_2 AS ( -- same over web_sales / ws_bill_customer_sk )
// SELECT web.second_year_total / web.first_year_total AS web_sales_increase_ratio,
//   c_customer_sk, c_first_name, c_last_name, c_preferred_cust_flag, c_birth_country,
//   c_login, c_email_address
// FROM temp_table_1 store, temp_table_2 web, customer c
// WHERE store.customer_sk = web.customer_sk AND web.customer_sk = c_customer_sk
// AND web ratio > store ratio
// ORDER BY web_sales_increase_ratio DESC, c_customer_sk, c_first_name, c_last_name,
//   c_preferred_cust_flag, c_birth_country, c_login
// LIMIT 100
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_year"])?
        .filter(
            col("d_year")
                .gt_eq(lit(FIRST_YEAR))
                .and(col("d_year").lt_eq(lit(FIRST_YEAR + 1))),
        );

    let store_sales = catalog.table(
        "store_sales",
        &[
            "ss_sold_date_sk",
            "ss_customer_sk",
            "ss_ext_list_price",
            "ss_ext_wholesale_cost",
            "ss_ext_discount_amt",
            "ss_ext_sales_price",
        ],
    )?;
    let store_amount = ((col("ss_ext_list_price")
        - col("ss_ext_wholesale_cost")
        - col("ss_ext_discount_amt"))
        + col("ss_ext_sales_price"))
        / lit(2.0);
    let store = yearly_totals(
        store_sales,
        dates.clone(),
        "ss_sold_date_sk",
        "ss_customer_sk",
        store_amount,
        FIRST_YEAR,
    )
    .select([
        col("customer_sk"),
        col("first_year_total").alias("store_first_year_total"),
        col("second_year_total").alias("store_second_year_total"),
    ]);

    let web_sales = catalog.table(
        "web_sales",
        &[
            "ws_sold_date_sk",
            "ws_bill_customer_sk",
            "ws_ext_list_price",
            "ws_ext_wholesale_cost",
            "ws_ext_discount_amt",
            "ws_ext_sales_price",
        ],
    )?;
    let web_amount = ((col("ws_ext_list_price")
        - col("ws_ext_wholesale_cost")
        - col("ws_ext_discount_amt"))
        + col("ws_ext_sales_price"))
        / lit(2.0);
    let web = yearly_totals(
        web_sales,
        dates,
        "ws_sold_date_sk",
        "ws_bill_customer_sk",
        web_amount,
        FIRST_YEAR,
    )
    .select([
        col("customer_sk").alias("web_customer_sk"),
        col("first_year_total").alias("web_first_year_total"),
        col("second_year_total").alias("web_second_year_total"),
    ]);

    let customers = catalog.table(
        "customer",
        &[
            "c_customer_sk",
            "c_first_name",
            "c_last_name",
            "c_preferred_cust_flag",
            "c_birth_country",
            "c_login",
            "c_email_address",
        ],
    )?;

    Ok(store
        .inner_join(web, col("customer_sk"), col("web_customer_sk"))
        .filter(
            ratio("web_second_year_total", "web_first_year_total").gt(ratio(
                "store_second_year_total",
                "store_first_year_total",
            )),
        )
        .inner_join(customers, col("customer_sk"), col("c_customer_sk"))
        .select([
            ratio("web_second_year_total", "web_first_year_total")
                .alias("web_sales_increase_ratio"),
            col("customer_sk").alias("c_customer_sk"),
            col("c_first_name"),
            col("c_last_name"),
            col("c_preferred_cust_flag"),
            col("c_birth_country"),
            col("c_login"),
            col("c_email_address"),
        ])
        .sort_by_exprs(
            [
                col("web_sales_increase_ratio"),
                col("c_customer_sk"),
                col("c_first_name"),
                col("c_last_name"),
                col("c_preferred_cust_flag"),
                col("c_birth_country"),
                col("c_login"),
            ],
            descending_first(7),
        )
        .limit(LIMIT))
}
