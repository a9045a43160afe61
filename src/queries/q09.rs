use polars::prelude::*;

use super::str_list;
use crate::error::Result;
use crate::tables::TableCatalog;

const YEAR: i32 = 2001;
const COUNTRY: &str = "United States";

/// (marital status, education status, min sales price, max sales price)
const DEMOGRAPHIC_BANDS: [(&str, &str, f64, f64); 3] = [
    ("M", "4 yr Degree", 100.0, 150.0),
    ("M", "4 yr Degree", 50.0, 200.0),
    ("M", "4 yr Degree", 150.0, 200.0),
];

/// (states, min net profit, max net profit)
const GEOGRAPHIC_BANDS: [([&str; 3], f64, f64); 3] = [
    (["KY", "GA", "NM"], 0.0, 2000.0),
    (["MT", "OR", "IN"], 150.0, 3000.0),
    (["WI", "MO", "WV"], 50.0, 25000.0),
];

fn between(column: &str, low: f64, high: f64) -> Expr {
    col(column).gt_eq(lit(low)).and(col(column).lt_eq(lit(high)))
}

fn any_of(conditions: impl Iterator<Item = Expr>) -> Expr {
    conditions.fold(lit(false), |acc, condition| acc.or(condition))
}

/// Total store quantity sold in 2001 within three demographic and three geographic bands.
// SELECT SUM(ss1.ss_quantity)
// FROM store_sales ss1, date_dim dd, customer_address ca1, store s, customer_demographics cd
// WHERE ss1.ss_sold_date_sk = dd.d_date_sk AND dd.d_year = 2001
// AND ss1.ss_addr_sk = ca1.ca_address_sk
// AND s.s_store_sk = ss1.ss_store_sk
// AND cd.cd_demo_sk = ss1.ss_cdemo_sk
// AND ((cd_marital_status = 'M' AND cd_education_status = '4 yr Degree'
//       AND 100 <= ss_sales_price AND ss_sales_price <= 150)
//   OR (... 50 <= ss_sales_price <= 200) OR (... 150 <= ss_sales_price <= 200))
// AND ((ca_country = 'United States' AND ca_state IN ('KY', 'GA', 'NM')
//       AND 0 <= ss_net_profit AND ss_net_profit <= 2000)
//   OR (... ('MT', 'OR', 'IN') 150..3000) OR (... ('WI', 'MO', 'WV') 50..25000))
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_year"])?
        .filter(col("d_year").eq(lit(YEAR)));
    let sales = catalog.table(
        "store_sales",
        &[
            "ss_sold_date_sk",
            "ss_addr_sk",
            "ss_store_sk",
            "ss_cdemo_sk",
            "ss_quantity",
            "ss_sales_price",
            "ss_net_profit",
        ],
    )?;
    let addresses = catalog.table("customer_address", &["ca_address_sk", "ca_state", "ca_country"])?;
    let stores = catalog.table("store", &["s_store_sk"])?;
    let demographics = catalog.table(
        "customer_demographics",
        &["cd_demo_sk", "cd_marital_status", "cd_education_status"],
    )?;

    let demographic_filter = any_of(DEMOGRAPHIC_BANDS.iter().map(
        |(marital_status, education_status, low, high)| {
            col("cd_marital_status")
                .eq(lit(*marital_status))
                .and(col("cd_education_status").eq(lit(*education_status)))
                .and(between("ss_sales_price", *low, *high))
        },
    ));
    let geographic_filter = any_of(GEOGRAPHIC_BANDS.iter().map(|(states, low, high)| {
        col("ca_country")
            .eq(lit(COUNTRY))
            .and(col("ca_state").is_in(str_list(states)))
            .and(between("ss_net_profit", *low, *high))
    }));

    Ok(sales
        .inner_join(dates, col("ss_sold_date_sk"), col("d_date_sk"))
        .inner_join(addresses, col("ss_addr_sk"), col("ca_address_sk"))
        .inner_join(stores, col("ss_store_sk"), col("s_store_sk"))
        .inner_join(demographics, col("ss_cdemo_sk"), col("cd_demo_sk"))
        .filter(demographic_filter.and(geographic_filter))
        .select([col("ss_quantity")
            .cast(DataType::Int64)
            .sum()
            .alias("sum_ss_quantity")]))
}
