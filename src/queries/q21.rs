use polars::prelude::*;

use crate::error::Result;
use crate::tables::TableCatalog;

const YEAR: i32 = 2003;
const MONTH: i32 = 1;
const RETURN_MONTHS: i32 = 6;
const WEB_YEARS: i32 = 1;
const LIMIT: IdxSize = 100;

fn within(
    catalog: &TableCatalog,
    sales: LazyFrame,
    date_key: &str,
    condition: Expr,
) -> Result<LazyFrame> {
    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_year", "d_moy"])?
        .filter(condition);
    Ok(sales.join(
        dates,
        [col(date_key)],
        [col("d_date_sk")],
        JoinArgs::new(JoinType::Semi),
    ))
}

/// Items bought in store, returned within six months and then bought by the
/// same customer on the web, per item and store.
// SELECT part_i.i_item_id, part_i.i_item_desc, part_s.s_store_id, part_s.s_store_name,
//   SUM(part_ss.ss_quantity) AS store_sales_quantity,
//   SUM(part_sr.sr_return_quantity) AS store_returns_quantity,
//   SUM(part_ws.ws_quantity) AS web_sales_quantity
// FROM (
//   SELECT sr_item_sk, sr_customer_sk, sr_ticket_number, sr_return_quantity
//   FROM store_returns sr, date_dim d2
//   WHERE d2.d_year = 2003 AND d2.d_moy BETWEEN 1 AND 1 + 6
//   AND sr.sr_returned_date_sk = d2.d_date_sk
// ) part_sr
// INNER JOIN (
//   SELECT ws_item_sk, ws_bill_customer_sk, ws_quantity
//   FROM web_sales ws, date_dim d3
//   WHERE d3.d_year BETWEEN 2003 AND 2003 + 1 AND ws.ws_sold_date_sk = d3.d_date_sk
// ) part_ws ON (part_sr.sr_item_sk = part_ws.ws_item_sk
//   AND part_sr.sr_customer_sk = part_ws.ws_bill_customer_sk)
// INNER JOIN (
//   SELECT ss_item_sk, ss_store_sk, ss_customer_sk, ss_ticket_number, ss_quantity
//   FROM store_sales ss, date_dim d1
//   WHERE d1.d_year = 2003 AND d1.d_moy = 1 AND ss.ss_sold_date_sk = d1.d_date_sk
// ) part_ss ON (part_ss.ss_ticket_number = part_sr.sr_ticket_number
//   AND part_ss.ss_item_sk = part_sr.sr_item_sk
//   AND part_ss.ss_customer_sk = part_sr.sr_customer_sk)
// INNER JOIN store part_s ON (part_s.s_store_sk = part_ss.ss_store_sk)
// INNER JOIN item part_i ON (part_i.i_item_sk = part_ss.ss_item_sk)
// GROUP BY part_i.i_item_id, part_i.i_item_desc, part_s.s_store_id, part_s.s_store_name
// ORDER BY part_i.i_item_id, part_i.i_item_desc, part_s.s_store_id, part_s.s_store_name
// LIMIT 100
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let part_sr = within(
        catalog,
        catalog.table(
            "store_returns",
            &[
                "sr_returned_date_sk",
                "sr_item_sk",
                "sr_customer_sk",
                "sr_ticket_number",
                "sr_return_quantity",
            ],
        )?,
        "sr_returned_date_sk",
        col("d_year").eq(lit(YEAR)).and(
            col("d_moy")
                .gt_eq(lit(MONTH))
                .and(col("d_moy").lt_eq(lit(MONTH + RETURN_MONTHS))),
        ),
    )?;
    let part_ws = within(
        catalog,
        catalog.table(
            "web_sales",
            &["ws_sold_date_sk", "ws_item_sk", "ws_bill_customer_sk", "ws_quantity"],
        )?,
        "ws_sold_date_sk",
        col("d_year")
            .gt_eq(lit(YEAR))
            .and(col("d_year").lt_eq(lit(YEAR + WEB_YEARS))),
    )?;
    let part_ss = within(
        catalog,
        catalog.table(
            "store_sales",
            &[
                "ss_sold_date_sk",
                "ss_item_sk",
                "ss_store_sk",
                "ss_customer_sk",
                "ss_ticket_number",
                "ss_quantity",
            ],
        )?,
        "ss_sold_date_sk",
        col("d_year").eq(lit(YEAR)).and(col("d_moy").eq(lit(MONTH))),
    )?;
    let stores = catalog.table("store", &["s_store_sk", "s_store_id", "s_store_name"])?;
    let items = catalog.table("item", &["i_item_sk", "i_item_id", "i_item_desc"])?;

    let keys = [
        col("i_item_id"),
        col("i_item_desc"),
        col("s_store_id"),
        col("s_store_name"),
    ];
    Ok(part_sr
        .join(
            part_ws,
            [col("sr_item_sk"), col("sr_customer_sk")],
            [col("ws_item_sk"), col("ws_bill_customer_sk")],
            JoinArgs::new(JoinType::Inner),
        )
        .join(
            part_ss,
            [col("sr_ticket_number"), col("sr_item_sk"), col("sr_customer_sk")],
            [col("ss_ticket_number"), col("ss_item_sk"), col("ss_customer_sk")],
            JoinArgs::new(JoinType::Inner),
        )
        .inner_join(stores, col("ss_store_sk"), col("s_store_sk"))
        .inner_join(items, col("sr_item_sk"), col("i_item_sk"))
        .group_by(keys.clone())
        .agg([
            col("ss_quantity")
                .cast(DataType::Int64)
                .sum()
                .alias("store_sales_quantity"),
            col("sr_return_quantity")
                .cast(DataType::Int64)
                .sum()
                .alias("store_returns_quantity"),
            col("ws_quantity")
                .cast(DataType::Int64)
                .sum()
                .alias("web_sales_quantity"),
        ])
        .sort_by_exprs(keys, SortMultipleOptions::default())
        .limit(LIMIT))
}
