mod support;

use polars::prelude::*;
use support::*;
use tpcxbb::prelude::*;

#[test]
fn every_supported_query_runs_on_empty_tables() {
    let catalog = empty_catalog();
    for id in supported_queries() {
        let query = get_query(id).unwrap();
        let result = query.execute(&catalog);
        assert!(result.is_ok(), "{} failed: {:?}", id, result.err());
    }
}

#[test]
fn unsupported_queries_explain_why() {
    let err = get_query(QueryId::parse("q10").unwrap()).unwrap_err();
    assert!(err.to_string().contains("sentiment"), "{}", err);
}

#[test]
fn query_only_needs_the_tables_it_reads() {
    // q26 reads item and store_sales only.
    let catalog = book_purchases();
    let query = get_query(QueryId::parse("26").unwrap()).unwrap();
    assert!(query.execute(&catalog).is_ok());

    let q25 = get_query(QueryId::parse("25").unwrap()).unwrap();
    assert!(matches!(q25.execute(&catalog), Err(BenchError::MissingTable(_))));
}

#[test]
fn q26_counts_books_per_class() {
    let df = get_query(QueryId::parse("q26").unwrap())
        .unwrap()
        .execute(&book_purchases())
        .unwrap();
    assert_eq!(df.height(), 1);
    assert_eq!(df.width(), 16);
    assert_eq!(i64_values(&df, "cid"), vec![Some(1)]);
    assert_eq!(i64_values(&df, "id1"), vec![Some(4)]);
    assert_eq!(i64_values(&df, "id2"), vec![Some(0)]);
    assert_eq!(i64_values(&df, "id3"), vec![Some(2)]);
    assert_eq!(i64_values(&df, "id15"), vec![Some(0)]);
}

#[test]
fn q25_combines_store_and_web_activity() {
    let mut catalog = TableCatalog::new();
    catalog
        .register(
            "date_dim",
            df!(
                "d_date_sk" => &[37000i64, 37500, 37600, 37615],
                "d_date" => &["2001-04-20", "2002-08-12", "2002-12-11", "2002-12-26"]
            )
            .unwrap()
            .lazy(),
        )
        .register(
            "store_sales",
            df!(
                "ss_sold_date_sk" => &[37600i64, 37600, 37600, 37000, 37500],
                "ss_customer_sk" => &[1i64, 1, 1, 2, 2],
                "ss_ticket_number" => &[1i64, 1, 2, 3, 4],
                "ss_net_paid" => &[10.0f64, 20.0, 30.0, 100.0, 8.0]
            )
            .unwrap()
            .lazy(),
        )
        .register(
            "web_sales",
            df!(
                "ws_sold_date_sk" => &[37615i64],
                "ws_bill_customer_sk" => &[1i64],
                "ws_order_number" => &[7i64],
                "ws_net_paid" => &[5.0f64]
            )
            .unwrap()
            .lazy(),
        );

    let df = get_query(QueryId::parse("25").unwrap())
        .unwrap()
        .execute(&catalog)
        .unwrap();
    assert_eq!(i64_values(&df, "cid"), vec![Some(1), Some(2)]);
    assert_eq!(f64_values(&df, "recency"), vec![Some(1.0), Some(0.0)]);
    assert_eq!(i64_values(&df, "frequency"), vec![Some(3), Some(1)]);
    assert_eq!(f64_values(&df, "totalspend"), vec![Some(65.0), Some(8.0)]);
}

#[test]
fn q29_counts_category_pairs_per_order() {
    let mut catalog = TableCatalog::new();
    catalog
        .register(
            "item",
            df!(
                "i_item_sk" => &[1i64, 2, 3, 4],
                "i_category_id" => &[Some(1i64), Some(2), Some(3), None]
            )
            .unwrap()
            .lazy(),
        )
        .register(
            "web_sales",
            df!(
                "ws_order_number" => &[1i64, 1, 1, 1, 2, 2, 2, 3],
                "ws_item_sk" => &[1i64, 2, 3, 4, 1, 2, 2, 3]
            )
            .unwrap()
            .lazy(),
        );

    let df = get_query(QueryId::parse("29").unwrap())
        .unwrap()
        .execute(&catalog)
        .unwrap();
    assert_eq!(i64_values(&df, "category_id_1"), vec![Some(1), Some(1), Some(2)]);
    assert_eq!(i64_values(&df, "category_id_2"), vec![Some(2), Some(3), Some(3)]);
    assert_eq!(i64_values(&df, "cnt"), vec![Some(2), Some(1), Some(1)]);
}

#[test]
fn q22_keeps_items_with_stable_inventory() {
    let mut catalog = TableCatalog::new();
    catalog
        .register(
            "item",
            df!(
                "i_item_sk" => &[1i64, 2, 3],
                "i_item_id" => &["AAAA1", "AAAA2", "AAAA3"],
                "i_current_price" => &[1.0f64, 2.0, 1.2]
            )
            .unwrap()
            .lazy(),
        )
        .register(
            "warehouse",
            df!(
                "w_warehouse_sk" => &[1i64],
                "w_warehouse_name" => &["Central"]
            )
            .unwrap()
            .lazy(),
        )
        .register(
            "date_dim",
            df!(
                "d_date_sk" => &[1i64, 2, 3],
                "d_date" => &["2001-04-20", "2001-05-20", "2001-07-01"]
            )
            .unwrap()
            .lazy(),
        )
        .register(
            "inventory",
            df!(
                "inv_date_sk" => &[1i64, 2, 3, 1, 2, 1, 2],
                "inv_item_sk" => &[1i64, 1, 1, 2, 2, 3, 3],
                "inv_warehouse_sk" => &[1i64, 1, 1, 1, 1, 1, 1],
                "inv_quantity_on_hand" => &[100i64, 120, 1000, 100, 100, 100, 10]
            )
            .unwrap()
            .lazy(),
        );

    let df = get_query(QueryId::parse("22").unwrap())
        .unwrap()
        .execute(&catalog)
        .unwrap();
    assert_eq!(str_values(&df, "i_item_id"), vec![Some("AAAA1".to_string())]);
    assert_eq!(str_values(&df, "w_warehouse_name"), vec![Some("Central".to_string())]);
    assert_eq!(i64_values(&df, "inv_before"), vec![Some(100)]);
    assert_eq!(i64_values(&df, "inv_after"), vec![Some(120)]);
}

#[test]
fn q22_ratio_and_window_bounds_are_inclusive() {
    let catalog = catalog_of(vec![
        (
            "item",
            df!(
                "i_item_sk" => &[1i64, 2, 3, 4, 5, 6],
                "i_item_id" => &["A1", "A2", "A3", "A4", "A5", "A6"],
                "i_current_price" => &[0.98f64, 1.5, 1.0, 1.0, 0.97, 1.0]
            )
            .unwrap(),
        ),
        (
            "warehouse",
            df!("w_warehouse_sk" => &[1i64], "w_warehouse_name" => &["Central"]).unwrap(),
        ),
        (
            "date_dim",
            df!(
                "d_date_sk" => &[1i64, 2, 3, 4, 5, 6],
                "d_date" => &["2001-04-07", "2001-04-08", "2001-05-07", "2001-05-08", "2001-06-07", "2001-06-08"]
            )
            .unwrap(),
        ),
        (
            "inventory",
            df!(
                "inv_date_sk" => &[1i64, 2, 4, 6, 3, 5, 3, 4, 3, 4, 3, 4, 4],
                "inv_item_sk" => &[1i64, 1, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6],
                "inv_warehouse_sk" => &[1i64; 13],
                "inv_quantity_on_hand" => &[1000i64, 150, 100, 1000, 100, 150, 100, 151, 150, 99, 100, 100, 100]
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("q22", &catalog);
    assert_eq!(
        str_values(&df, "i_item_id"),
        vec![Some("A1".to_string()), Some("A2".to_string())]
    );
    assert_eq!(i64_values(&df, "inv_before"), vec![Some(150), Some(100)]);
    assert_eq!(i64_values(&df, "inv_after"), vec![Some(100), Some(150)]);
}

#[test]
fn q01_keeps_pairs_seen_more_than_fifty_times() {
    let (mut ticket, mut item, mut store) = (vec![], vec![], vec![]);
    let mut sell = |t: i64, i: i64, s: i64| {
        ticket.push(t);
        item.push(i);
        store.push(s);
    };
    for t in 1..=51 {
        sell(t, 1, 10);
        sell(t, 2, 10);
        // Category 9 is outside the query.
        sell(t, 4, 10);
        if t <= 50 {
            sell(t, 3, 10);
        }
    }
    for t in 100..=160 {
        sell(t, 1, 11);
        sell(t, 3, 11);
    }
    let catalog = catalog_of(vec![
        (
            "item",
            df!("i_item_sk" => &[1i64, 2, 3, 4], "i_category_id" => &[1i64, 2, 3, 9]).unwrap(),
        ),
        (
            "store_sales",
            df!(
                "ss_ticket_number" => ticket,
                "ss_item_sk" => item,
                "ss_store_sk" => store
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("1", &catalog);
    assert_eq!(i64_values(&df, "item_sk_1"), vec![Some(1)]);
    assert_eq!(i64_values(&df, "item_sk_2"), vec![Some(2)]);
    assert_eq!(i64_values(&df, "cnt"), vec![Some(51)]);
}

#[test]
fn q05_builds_click_features_per_user() {
    let catalog = catalog_of(vec![
        (
            "item",
            df!(
                "i_item_sk" => &[1i64, 2, 3],
                "i_category" => &["Books", "Music", "Books"],
                "i_category_id" => &[1i64, 2, 7]
            )
            .unwrap(),
        ),
        (
            "web_clickstreams",
            df!(
                "wcs_user_sk" => &[Some(1i64), Some(1), Some(1), Some(1), Some(2), None],
                "wcs_item_sk" => &[1i64, 1, 2, 3, 2, 1]
            )
            .unwrap(),
        ),
        (
            "customer",
            df!("c_customer_sk" => &[1i64, 2], "c_current_cdemo_sk" => &[10i64, 20]).unwrap(),
        ),
        (
            "customer_demographics",
            df!(
                "cd_demo_sk" => &[10i64, 20],
                "cd_gender" => &["M", "F"],
                "cd_education_status" => &["College", "Primary"]
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("q5", &catalog);
    assert_eq!(df.width(), 10);
    assert_eq!(i64_values(&df, "clicks_in_category"), vec![Some(3), Some(0)]);
    assert_eq!(i64_values(&df, "college_education"), vec![Some(1), Some(0)]);
    assert_eq!(i64_values(&df, "male"), vec![Some(1), Some(0)]);
    assert_eq!(i64_values(&df, "clicks_in_1"), vec![Some(2), Some(0)]);
    assert_eq!(i64_values(&df, "clicks_in_2"), vec![Some(1), Some(1)]);
    assert_eq!(i64_values(&df, "clicks_in_7"), vec![Some(1), Some(0)]);
}

fn yearly_dates() -> DataFrame {
    df!("d_date_sk" => &[1i64, 2, 3], "d_year" => &[2001i64, 2002, 2003]).unwrap()
}

#[test]
fn q06_finds_customers_moving_to_the_web() {
    let store_sales = df!(
        "ss_sold_date_sk" => &[1i64, 2, 1, 2, 1, 2],
        "ss_customer_sk" => &[1i64, 1, 2, 2, 3, 3],
        "ss_ext_list_price" => &[0.0f64; 6],
        "ss_ext_wholesale_cost" => &[0.0f64; 6],
        "ss_ext_discount_amt" => &[0.0f64; 6],
        "ss_ext_sales_price" => &[20.0f64, 20.0, 20.0, 40.0, 20.0, 20.0]
    )
    .unwrap();
    let web_sales = df!(
        "ws_sold_date_sk" => &[1i64, 2, 3, 1, 2, 2],
        "ws_bill_customer_sk" => &[1i64, 1, 1, 2, 2, 3],
        "ws_ext_list_price" => &[0.0f64; 6],
        "ws_ext_wholesale_cost" => &[0.0f64; 6],
        "ws_ext_discount_amt" => &[0.0f64; 6],
        "ws_ext_sales_price" => &[20.0f64, 60.0, 1000.0, 20.0, 20.0, 50.0]
    )
    .unwrap();
    let customer = df!(
        "c_customer_sk" => &[1i64, 2, 3],
        "c_first_name" => &["Ada", "Bo", "Cy"],
        "c_last_name" => &["A", "B", "C"],
        "c_preferred_cust_flag" => &["Y", "N", "N"],
        "c_birth_country" => &["PERU", "CHILE", "FIJI"],
        "c_login" => &["a", "b", "c"],
        "c_email_address" => &["a@x", "b@x", "c@x"]
    )
    .unwrap();
    let catalog = catalog_of(vec![
        ("date_dim", yearly_dates()),
        ("store_sales", store_sales),
        ("web_sales", web_sales),
        ("customer", customer),
    ]);

    let df = run_query("6", &catalog);
    assert_eq!(i64_values(&df, "c_customer_sk"), vec![Some(1)]);
    assert_close(&f64_values(&df, "web_sales_increase_ratio"), &[3.0]);
    assert_eq!(str_values(&df, "c_first_name"), vec![Some("Ada".to_string())]);
}

#[test]
fn q07_needs_ten_customers_per_state() {
    let customers: Vec<i64> = (1..=12).collect();
    let addresses: Vec<i64> = customers.iter().map(|c| if *c <= 10 { 100 } else { 200 }).collect();
    let mut sold_date = vec![1i64; 12];
    let mut sold_customer = customers.clone();
    let mut sold_item = vec![3i64; 12];
    // Cheap item, and the expensive item outside 2004-07.
    sold_date.extend([1, 2]);
    sold_customer.extend([1, 1]);
    sold_item.extend([1, 3]);

    let catalog = catalog_of(vec![
        (
            "item",
            df!(
                "i_item_sk" => &[1i64, 2, 3, 4],
                "i_category" => &["A", "A", "A", "B"],
                "i_current_price" => &[1.0f64, 1.0, 10.0, 5.0]
            )
            .unwrap(),
        ),
        (
            "date_dim",
            df!("d_date_sk" => &[1i64, 2], "d_year" => &[2004i64, 2004], "d_moy" => &[7i64, 8]).unwrap(),
        ),
        (
            "store_sales",
            df!(
                "ss_sold_date_sk" => sold_date,
                "ss_customer_sk" => sold_customer,
                "ss_item_sk" => sold_item
            )
            .unwrap(),
        ),
        (
            "customer",
            df!("c_customer_sk" => &customers, "c_current_addr_sk" => &addresses).unwrap(),
        ),
        (
            "customer_address",
            df!("ca_address_sk" => &[100i64, 200], "ca_state" => &["CA", "NY"]).unwrap(),
        ),
    ]);

    let df = run_query("7", &catalog);
    assert_eq!(str_values(&df, "ca_state"), vec![Some("CA".to_string())]);
    assert_eq!(i64_values(&df, "cnt"), vec![Some(10)]);
}

#[test]
fn q09_sums_quantity_inside_the_bands() {
    let catalog = catalog_of(vec![
        ("date_dim", yearly_dates()),
        ("store", df!("s_store_sk" => &[1i64]).unwrap()),
        (
            "customer_demographics",
            df!(
                "cd_demo_sk" => &[1i64, 2],
                "cd_marital_status" => &["M", "S"],
                "cd_education_status" => &["4 yr Degree", "4 yr Degree"]
            )
            .unwrap(),
        ),
        (
            "customer_address",
            df!(
                "ca_address_sk" => &[1i64, 2, 3],
                "ca_state" => &["KY", "WI", "KY"],
                "ca_country" => &["United States", "United States", "Canada"]
            )
            .unwrap(),
        ),
        (
            "store_sales",
            df!(
                "ss_sold_date_sk" => &[1i64, 1, 1, 2, 1, 1, 1],
                "ss_addr_sk" => &[1i64, 2, 1, 1, 3, 1, 1],
                "ss_store_sk" => &[1i64; 7],
                "ss_cdemo_sk" => &[1i64, 1, 2, 1, 1, 1, 1],
                "ss_quantity" => &[5i64, 7, 100, 1000, 10_000, 100_000, 1_000_000],
                "ss_sales_price" => &[100.0f64, 200.0, 120.0, 120.0, 120.0, 40.0, 120.0],
                "ss_net_profit" => &[2000.0f64, 50.0, 100.0, 100.0, 100.0, 100.0, 2000.01]
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("9", &catalog);
    assert_eq!(i64_values(&df, "sum_ss_quantity"), vec![Some(12)]);
}

fn review_catalog(
    review_items: &[i64],
    ratings: &[i64],
    sold_items: &[i64],
    sold_dates: &[i64],
) -> TableCatalog {
    catalog_of(vec![
        (
            "product_reviews",
            df!("pr_item_sk" => review_items, "pr_review_rating" => ratings).unwrap(),
        ),
        (
            "date_dim",
            df!(
                "d_date_sk" => &[1i64, 2, 3],
                "d_date" => &["2003-01-02", "2003-02-02", "2003-02-03"]
            )
            .unwrap(),
        ),
        (
            "web_sales",
            df!(
                "ws_sold_date_sk" => sold_dates,
                "ws_item_sk" => sold_items,
                "ws_net_paid" => vec![1.0f64; sold_items.len()]
            )
            .unwrap(),
        ),
    ])
}

#[test]
fn q11_correlates_reviews_of_items_sold_in_the_window() {
    // Item 4 would break the correlation but sold after the window.
    let catalog = review_catalog(
        &[1, 2, 2, 3, 3, 3, 4, 4, 4, 4],
        &[1, 2, 2, 3, 3, 3, 1, 1, 1, 1],
        &[1, 2, 3, 4],
        &[1, 2, 1, 3],
    );
    let df = run_query("11", &catalog);
    assert_close(&f64_values(&df, "corr_reviews_count_avg_rating"), &[1.0]);
}

#[test]
fn q11_correlation_is_null_without_two_items() {
    let single = review_catalog(&[1, 1], &[4, 5], &[1], &[1]);
    let df = run_query("11", &single);
    assert_eq!(f64_values(&df, "corr_reviews_count_avg_rating"), vec![None]);

    let df = run_query("11", &empty_catalog());
    assert_eq!(f64_values(&df, "corr_reviews_count_avg_rating"), vec![None]);
}

#[test]
fn q12_matches_views_to_later_store_purchases() {
    let catalog = catalog_of(vec![
        (
            "item",
            df!("i_item_sk" => &[1i64, 2], "i_category" => &["Books", "Music"]).unwrap(),
        ),
        (
            "web_clickstreams",
            df!(
                "wcs_user_sk" => &[Some(1i64), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)],
                "wcs_click_date_sk" => &[37134i64, 37164, 37165, 37140, 37140, 37140, 37150],
                "wcs_item_sk" => &[1i64, 1, 1, 1, 2, 1, 1],
                "wcs_sales_sk" => &[None, None, None, None, None, Some(99i64), None]
            )
            .unwrap(),
        ),
        (
            "store_sales",
            df!(
                "ss_customer_sk" => &[Some(1i64), Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)],
                "ss_sold_date_sk" => &[37224i64, 37200, 37200, 37225, 37200, 37200, 37140],
                "ss_item_sk" => &[1i64, 1, 1, 1, 2, 1, 1]
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("12", &catalog);
    assert_eq!(i64_values(&df, "wcs_user_sk"), vec![Some(1), Some(2)]);
}

#[test]
fn q13_compares_yearly_growth() {
    let catalog = catalog_of(vec![
        ("date_dim", yearly_dates()),
        (
            "store_sales",
            df!(
                "ss_sold_date_sk" => &[1i64, 2, 1, 2, 1, 2],
                "ss_customer_sk" => &[1i64, 1, 2, 2, 3, 3],
                "ss_net_paid" => &[10.0f64, 20.0, 10.0, 20.0, 10.0, 40.0]
            )
            .unwrap(),
        ),
        (
            "web_sales",
            df!(
                "ws_sold_date_sk" => &[1i64, 2, 1, 2, 1, 2],
                "ws_bill_customer_sk" => &[1i64, 1, 2, 2, 3, 3],
                "ws_net_paid" => &[10.0f64, 50.0, 10.0, 30.0, 10.0, 20.0]
            )
            .unwrap(),
        ),
        (
            "customer",
            df!(
                "c_customer_sk" => &[1i64, 2, 3],
                "c_first_name" => &["Ada", "Bo", "Cy"],
                "c_last_name" => &["A", "B", "C"]
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("13", &catalog);
    assert_eq!(i64_values(&df, "c_customer_sk"), vec![Some(1), Some(2)]);
    assert_close(&f64_values(&df, "storeSalesIncreaseRatio"), &[2.0, 2.0]);
    assert_close(&f64_values(&df, "webSalesIncreaseRatio"), &[5.0, 3.0]);
}

fn web_sales_by_hour(sales: &[(i64, i64, i64)]) -> TableCatalog {
    catalog_of(vec![
        (
            "household_demographics",
            df!("hd_demo_sk" => &[1i64, 2], "hd_dep_count" => &[5i64, 3]).unwrap(),
        ),
        (
            "web_page",
            df!("wp_web_page_sk" => &[1i64, 2, 3], "wp_char_count" => &[5000i64, 6000, 6001]).unwrap(),
        ),
        (
            "time_dim",
            df!("t_time_sk" => &[1i64, 2, 3, 4, 5], "t_hour" => &[7i64, 8, 19, 20, 12]).unwrap(),
        ),
        (
            "web_sales",
            df!(
                "ws_ship_hdemo_sk" => sales.iter().map(|s| s.0).collect::<Vec<_>>(),
                "ws_web_page_sk" => sales.iter().map(|s| s.1).collect::<Vec<_>>(),
                "ws_sold_time_sk" => sales.iter().map(|s| s.2).collect::<Vec<_>>()
            )
            .unwrap(),
        ),
    ])
}

#[test]
fn q14_divides_morning_by_evening_sales() {
    let catalog = web_sales_by_hour(&[
        (1, 1, 1),
        (1, 2, 2),
        (1, 1, 2),
        (1, 1, 3),
        (1, 2, 4),
        (2, 1, 1),
        (1, 3, 1),
        (1, 1, 5),
    ]);
    let df = run_query("14", &catalog);
    assert_close(&f64_values(&df, "am_pm_ratio"), &[1.5]);
}

#[test]
fn q14_without_evening_sales_is_minus_one() {
    let catalog = web_sales_by_hour(&[(1, 1, 1), (1, 2, 2)]);
    let df = run_query("14", &catalog);
    assert_close(&f64_values(&df, "am_pm_ratio"), &[-1.0]);
}

#[test]
fn q15_reports_declining_categories() {
    let catalog = catalog_of(vec![
        (
            "date_dim",
            df!(
                "d_date_sk" => &[1i64, 2, 3, 4],
                "d_date" => &["2001-09-02", "2002-01-01", "2002-09-02", "2002-09-03"]
            )
            .unwrap(),
        ),
        (
            "item",
            df!("i_item_sk" => &[1i64, 2], "i_category_id" => &[1i64, 2]).unwrap(),
        ),
        (
            "store_sales",
            df!(
                "ss_sold_date_sk" => &[1i64, 1, 2, 3, 4, 2, 1, 2, 3],
                "ss_item_sk" => &[1i64, 1, 1, 1, 1, 1, 2, 2, 2],
                "ss_store_sk" => &[10i64, 10, 10, 10, 10, 11, 10, 10, 10],
                "ss_net_paid" => &[15.0f64, 15.0, 20.0, 10.0, 1000.0, 1000.0, 10.0, 20.0, 30.0]
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("15", &catalog);
    assert_eq!(i64_values(&df, "cat"), vec![Some(1)]);
    assert_close(&f64_values(&df, "slope"), &[-10.0]);
    assert_close(&f64_values(&df, "intercept"), &[40.0]);
}

#[test]
fn q16_splits_net_sales_at_the_price_change() {
    let catalog = catalog_of(vec![
        (
            "date_dim",
            df!(
                "d_date_sk" => &[1i64, 2, 3, 4, 5, 6],
                "d_date" => &["2001-02-13", "2001-02-14", "2001-03-15", "2001-03-16", "2001-04-15", "2001-04-16"]
            )
            .unwrap(),
        ),
        ("item", df!("i_item_sk" => &[1i64], "i_item_id" => &["AAAA1"]).unwrap()),
        (
            "warehouse",
            df!("w_warehouse_sk" => &[1i64], "w_state" => &["CA"]).unwrap(),
        ),
        (
            "web_sales",
            df!(
                "ws_order_number" => &[1i64, 2, 3, 4, 5, 6],
                "ws_item_sk" => &[1i64; 6],
                "ws_warehouse_sk" => &[1i64; 6],
                "ws_sold_date_sk" => &[1i64, 2, 3, 4, 5, 6],
                "ws_sales_price" => &[100.0f64; 6]
            )
            .unwrap(),
        ),
        (
            "web_returns",
            df!(
                "wr_order_number" => &[3i64],
                "wr_item_sk" => &[1i64],
                "wr_refunded_cash" => &[40.0f64]
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("16", &catalog);
    assert_eq!(str_values(&df, "w_state"), vec![Some("CA".to_string())]);
    assert_close(&f64_values(&df, "sales_before"), &[160.0]);
    assert_close(&f64_values(&df, "sales_after"), &[200.0]);
}

#[test]
fn q17_computes_promotional_share() {
    let catalog = catalog_of(vec![
        (
            "date_dim",
            df!("d_date_sk" => &[1i64, 2], "d_year" => &[2001i64, 2001], "d_moy" => &[12i64, 11]).unwrap(),
        ),
        (
            "item",
            df!("i_item_sk" => &[1i64, 2, 3], "i_category" => &["Books", "Music", "Home"]).unwrap(),
        ),
        (
            "store",
            df!("s_store_sk" => &[1i64, 2], "s_gmt_offset" => &[-5.0f64, -6.0]).unwrap(),
        ),
        (
            "customer_address",
            df!("ca_address_sk" => &[1i64, 2], "ca_gmt_offset" => &[-5.0f64, -7.0]).unwrap(),
        ),
        (
            "customer",
            df!("c_customer_sk" => &[1i64, 2], "c_current_addr_sk" => &[1i64, 2]).unwrap(),
        ),
        (
            "promotion",
            df!(
                "p_promo_sk" => &[1i64, 2],
                "p_channel_email" => &["Y", "N"],
                "p_channel_dmail" => &["N", "N"],
                "p_channel_tv" => &["N", "N"]
            )
            .unwrap(),
        ),
        (
            "store_sales",
            df!(
                "ss_sold_date_sk" => &[1i64, 1, 2, 1, 1, 1],
                "ss_item_sk" => &[1i64, 2, 1, 3, 1, 1],
                "ss_store_sk" => &[1i64, 1, 1, 1, 2, 1],
                "ss_customer_sk" => &[1i64, 1, 1, 1, 1, 2],
                "ss_promo_sk" => &[1i64, 2, 1, 1, 1, 1],
                "ss_ext_sales_price" => &[30.0f64, 70.0, 1000.0, 1000.0, 1000.0, 1000.0]
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("17", &catalog);
    assert_close(&f64_values(&df, "promotional"), &[30.0]);
    assert_close(&f64_values(&df, "total"), &[100.0]);
    assert_close(&f64_values(&df, "promo_percent"), &[30.0]);
}

#[test]
fn q17_without_sales_is_zero_percent() {
    let df = run_query("17", &empty_catalog());
    assert_close(&f64_values(&df, "promo_percent"), &[0.0]);
}

#[test]
fn q20_ratios_default_to_zero() {
    let catalog = catalog_of(vec![
        (
            "store_sales",
            df!(
                "ss_customer_sk" => &[1i64, 1, 1, 2, 3],
                "ss_ticket_number" => &[1i64, 1, 2, 3, 4],
                "ss_item_sk" => &[1i64, 2, 1, 1, 1],
                "ss_net_paid" => &[10.0f64, 20.0, 30.0, 0.0, 15.0]
            )
            .unwrap(),
        ),
        (
            "store_returns",
            df!(
                "sr_customer_sk" => &[1i64, 2],
                "sr_ticket_number" => &[1i64, 3],
                "sr_item_sk" => &[2i64, 1],
                "sr_return_amt" => &[20.0f64, 5.0]
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("20", &catalog);
    assert_eq!(i64_values(&df, "user_sk"), vec![Some(1), Some(2), Some(3)]);
    assert_close(&f64_values(&df, "orderRatio"), &[0.5, 1.0, 0.0]);
    assert_close(&f64_values(&df, "itemsRatio"), &[0.3333333, 1.0, 0.0]);
    // Customer 2 paid nothing, so the money ratio falls back to zero.
    assert_close(&f64_values(&df, "monetaryRatio"), &[0.3333333, 0.0, 0.0]);
    assert_close(&f64_values(&df, "frequency"), &[1.0, 1.0, 0.0]);
}

#[test]
fn q21_follows_returns_to_later_web_purchases() {
    let catalog = catalog_of(vec![
        (
            "date_dim",
            df!(
                "d_date_sk" => &[1i64, 2, 3, 4, 5],
                "d_year" => &[2003i64, 2003, 2003, 2004, 2005],
                "d_moy" => &[1i64, 7, 8, 12, 1]
            )
            .unwrap(),
        ),
        (
            "store_sales",
            df!(
                "ss_sold_date_sk" => &[1i64, 1, 1, 2],
                "ss_item_sk" => &[1i64; 4],
                "ss_store_sk" => &[1i64; 4],
                "ss_customer_sk" => &[1i64, 2, 3, 4],
                "ss_ticket_number" => &[10i64, 20, 30, 40],
                "ss_quantity" => &[5i64, 5, 5, 5]
            )
            .unwrap(),
        ),
        (
            "store_returns",
            df!(
                "sr_returned_date_sk" => &[2i64, 3, 2, 2],
                "sr_item_sk" => &[1i64; 4],
                "sr_customer_sk" => &[1i64, 2, 3, 4],
                "sr_ticket_number" => &[10i64, 20, 30, 40],
                "sr_return_quantity" => &[2i64, 2, 2, 2]
            )
            .unwrap(),
        ),
        (
            "web_sales",
            df!(
                "ws_sold_date_sk" => &[4i64, 4, 5, 4],
                "ws_item_sk" => &[1i64; 4],
                "ws_bill_customer_sk" => &[1i64, 2, 3, 4],
                "ws_quantity" => &[3i64, 3, 3, 3]
            )
            .unwrap(),
        ),
        (
            "store",
            df!("s_store_sk" => &[1i64], "s_store_id" => &["S1"], "s_store_name" => &["ought"]).unwrap(),
        ),
        (
            "item",
            df!("i_item_sk" => &[1i64], "i_item_id" => &["AAAA1"], "i_item_desc" => &["book"]).unwrap(),
        ),
    ]);

    let df = run_query("21", &catalog);
    assert_eq!(str_values(&df, "s_store_id"), vec![Some("S1".to_string())]);
    assert_eq!(i64_values(&df, "store_sales_quantity"), vec![Some(5)]);
    assert_eq!(i64_values(&df, "store_returns_quantity"), vec![Some(2)]);
    assert_eq!(i64_values(&df, "web_sales_quantity"), vec![Some(3)]);
}

#[test]
fn q23_pairs_volatile_months_and_skips_zero_means() {
    let catalog = catalog_of(vec![
        (
            "date_dim",
            df!(
                "d_date_sk" => &[1i64, 2, 3, 4, 5],
                "d_year" => &[2001i64; 5],
                "d_moy" => &[1i64, 1, 2, 2, 3]
            )
            .unwrap(),
        ),
        ("item", df!("i_item_sk" => &[1i64, 2, 3]).unwrap()),
        (
            "warehouse",
            df!("w_warehouse_sk" => &[1i64], "w_warehouse_name" => &["Central"]).unwrap(),
        ),
        (
            "inventory",
            df!(
                "inv_date_sk" => &[1i64, 2, 3, 4, 5, 1, 2, 3, 4, 1, 2, 3, 4],
                "inv_item_sk" => &[1i64, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3],
                "inv_warehouse_sk" => &[1i64; 13],
                "inv_quantity_on_hand" => &[0i64, 10, 0, 20, 500, 0, 10, 10, 10, 0, 0, 0, 20]
            )
            .unwrap(),
        ),
    ]);

    let df = run_query("23", &catalog);
    assert_eq!(i64_values(&df, "inv_item_sk"), vec![Some(1)]);
    assert_eq!(i64_values(&df, "d_moy"), vec![Some(1)]);
    assert_eq!(i64_values(&df, "inv2_d_moy"), vec![Some(2)]);
    assert_close(&f64_values(&df, "cov"), &[std::f64::consts::SQRT_2]);
    assert_close(&f64_values(&df, "inv2_cov"), &[std::f64::consts::SQRT_2]);
}

#[test]
fn q24_averages_defined_elasticities() {
    let catalog = catalog_of(vec![
        (
            "item",
            df!("i_item_sk" => &[10000i64, 9999], "i_current_price" => &[10.0f64, 10.0]).unwrap(),
        ),
        (
            "item_marketprices",
            df!(
                "imp_sk" => &[1i64, 2, 3, 4],
                "imp_item_sk" => &[10000i64, 10000, 10000, 9999],
                "imp_competitor_price" => &[8.0f64, 12.0, 9.0, 1.0],
                "imp_start_date" => &[100i64, 100, 200, 100],
                "imp_end_date" => &[110i64, 110, 205, 110]
            )
            .unwrap(),
        ),
        (
            "web_sales",
            df!(
                "ws_item_sk" => &[10000i64, 10000, 10000, 10000, 9999],
                "ws_sold_date_sk" => &[95i64, 105, 110, 201, 105],
                "ws_quantity" => &[10i64, 20, 1000, 5, 7]
            )
            .unwrap(),
        ),
        (
            "store_sales",
            df!(
                "ss_item_sk" => &[10000i64, 10000, 10000, 9999],
                "ss_sold_date_sk" => &[90i64, 100, 202, 100],
                "ss_quantity" => &[10i64, 10, 5, 7]
            )
            .unwrap(),
        ),
    ]);

    // Promotion 3 has no earlier sales, so its elasticity is undefined.
    let df = run_query("24", &catalog);
    assert_eq!(i64_values(&df, "ws_item_sk"), vec![Some(10000)]);
    assert_close(&f64_values(&df, "cross_price_elasticity"), &[-2.5]);
}
