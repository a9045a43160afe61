use polars::prelude::*;

use crate::error::Result;
use crate::tables::TableCatalog;

const YEAR: i32 = 2001;
const MONTH: i32 = 1;
const MIN_COEFFICIENT: f64 = 1.3;

/// Warehouse items whose monthly inventory has a coefficient of variation of
/// at least 1.3 in two consecutive months.
// WITH q23_tmp_inv AS (
//   SELECT w_warehouse_name, w_warehouse_sk, i_item_sk, d_moy, stdev, mean,
//     CASE mean WHEN 0.0 THEN NULL ELSE stdev / mean END cov
//   FROM (
//     SELECT w_warehouse_name, w_warehouse_sk, i_item_sk, d_moy,
//       stddev_samp(inv_quantity_on_hand) stdev, avg(inv_quantity_on_hand) mean
//     FROM inventory inv, item i, warehouse w, date_dim d
//     WHERE inv.inv_date_sk = d.d_date_sk
//     AND inv.inv_item_sk = i.i_item_sk
//     AND inv.inv_warehouse_sk = w.w_warehouse_sk
//     AND d.d_year = 2001 AND d_moy BETWEEN 1 AND (1 + 1)
//     GROUP BY w_warehouse_name, w_warehouse_sk, i_item_sk, d_moy
//   ) q23_tmp_inv_part
//   WHERE CASE mean WHEN 0.0 THEN 0.0 ELSE stdev / mean END >= 1.3
// )
// SELECT inv1.inv_warehouse_sk, inv1.inv_item_sk, inv1.d_moy, inv1.cov,
//   inv2.d_moy, inv2.cov
// FROM q23_tmp_inv inv1
// JOIN q23_tmp_inv inv2 ON (inv1.inv_warehouse_sk = inv2.inv_warehouse_sk
//   AND inv1.inv_item_sk = inv2.inv_item_sk
//   AND inv1.d_moy = 1 AND inv2.d_moy = 1 + 1)
// ORDER BY inv1.inv_warehouse_sk, inv1.inv_item_sk
pub fn query(catalog: &TableCatalog) -> Result<LazyFrame> {
    let dates = catalog
        .table("date_dim", &["d_date_sk", "d_year", "d_moy"])?
        .filter(
            col("d_year").eq(lit(YEAR)).and(
                col("d_moy")
                    .eq(lit(MONTH))
                    .or(col("d_moy").eq(lit(MONTH + 1))),
            ),
        );
    let items = catalog.table("item", &["i_item_sk"])?;
    let warehouses = catalog.table("warehouse", &["w_warehouse_sk", "w_warehouse_name"])?;

    let quantity = col("inv_quantity_on_hand").cast(DataType::Float64);
    let volatile = catalog
        .table(
            "inventory",
            &["inv_date_sk", "inv_item_sk", "inv_warehouse_sk", "inv_quantity_on_hand"],
        )?
        .inner_join(dates, col("inv_date_sk"), col("d_date_sk"))
        .inner_join(items, col("inv_item_sk"), col("i_item_sk"))
        .inner_join(warehouses, col("inv_warehouse_sk"), col("w_warehouse_sk"))
        .group_by([
            col("w_warehouse_name"),
            col("inv_warehouse_sk"),
            col("inv_item_sk"),
            col("d_moy"),
        ])
        .agg([
            quantity.clone().std(1).alias("stdev"),
            quantity.mean().alias("mean"),
        ])
        // A zero mean can never reach the threshold.
        .filter(col("mean").neq(lit(0.0)))
        .with_column((col("stdev") / col("mean")).alias("cov"))
        .filter(col("cov").gt_eq(lit(MIN_COEFFICIENT)));

    let first = volatile
        .clone()
        .filter(col("d_moy").eq(lit(MONTH)))
        .select([
            col("inv_warehouse_sk"),
            col("inv_item_sk"),
            col("d_moy"),
            col("cov"),
        ]);
    let second = volatile
        .filter(col("d_moy").eq(lit(MONTH + 1)))
        .select([
            col("inv_warehouse_sk").alias("inv2_warehouse_sk"),
            col("inv_item_sk").alias("inv2_item_sk"),
            col("d_moy").alias("inv2_d_moy"),
            col("cov").alias("inv2_cov"),
        ]);

    Ok(first
        .join(
            second,
            [col("inv_warehouse_sk"), col("inv_item_sk")],
            [col("inv2_warehouse_sk"), col("inv2_item_sk")],
            JoinArgs::new(JoinType::Inner),
        )
        .sort_by_exprs(
            [col("inv_warehouse_sk"), col("inv_item_sk")],
            SortMultipleOptions::default(),
        ))
}
