use polars::prelude::{DataType, Field, Schema};

use crate::error::{BenchError, Result};

/// Physical kind of a TPCx-BB column.
///
/// Surrogate keys are 64-bit, small counters 32-bit. Decimal columns are read as
/// doubles and dates stay ISO `yyyy-mm-dd` strings so they compare lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Key,
    Integer,
    Decimal,
    Text,
}

impl ColumnKind {
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnKind::Key => DataType::Int64,
            ColumnKind::Integer => DataType::Int32,
            ColumnKind::Decimal => DataType::Float64,
            ColumnKind::Text => DataType::String,
        }
    }
}

use ColumnKind::*;

pub const TPCXBB_TABLES: [&str; 23] = [
    "customer",
    "customer_address",
    "customer_demographics",
    "date_dim",
    "household_demographics",
    "income_band",
    "inventory",
    "item",
    "item_marketprices",
    "product_reviews",
    "promotion",
    "reason",
    "ship_mode",
    "store",
    "store_returns",
    "store_sales",
    "time_dim",
    "warehouse",
    "web_clickstreams",
    "web_page",
    "web_returns",
    "web_sales",
    "web_site",
];

pub fn table_columns(table: &str) -> Option<&'static [(&'static str, ColumnKind)]> {
    let columns: &'static [(&'static str, ColumnKind)] = match table {
        "customer" => &[
            ("c_customer_sk", Key),
            ("c_customer_id", Text),
            ("c_current_cdemo_sk", Key),
            ("c_current_hdemo_sk", Key),
            ("c_current_addr_sk", Key),
            ("c_first_shipto_date_sk", Key),
            ("c_first_sales_date_sk", Key),
            ("c_salutation", Text),
            ("c_first_name", Text),
            ("c_last_name", Text),
            ("c_preferred_cust_flag", Text),
            ("c_birth_day", Integer),
            ("c_birth_month", Integer),
            ("c_birth_year", Integer),
            ("c_birth_country", Text),
            ("c_login", Text),
            ("c_email_address", Text),
            ("c_last_review_date", Text),
        ],
        "customer_address" => &[
            ("ca_address_sk", Key),
            ("ca_address_id", Text),
            ("ca_street_number", Text),
            ("ca_street_name", Text),
            ("ca_street_type", Text),
            ("ca_suite_number", Text),
            ("ca_city", Text),
            ("ca_county", Text),
            ("ca_state", Text),
            ("ca_zip", Text),
            ("ca_country", Text),
            ("ca_gmt_offset", Decimal),
            ("ca_location_type", Text),
        ],
        "customer_demographics" => &[
            ("cd_demo_sk", Key),
            ("cd_gender", Text),
            ("cd_marital_status", Text),
            ("cd_education_status", Text),
            ("cd_purchase_estimate", Integer),
            ("cd_credit_rating", Text),
            ("cd_dep_count", Integer),
            ("cd_dep_employed_count", Integer),
            ("cd_dep_college_count", Integer),
        ],
        "date_dim" => &[
            ("d_date_sk", Key),
            ("d_date_id", Text),
            ("d_date", Text),
            ("d_month_seq", Integer),
            ("d_week_seq", Integer),
            ("d_quarter_seq", Integer),
            ("d_year", Integer),
            ("d_dow", Integer),
            ("d_moy", Integer),
            ("d_dom", Integer),
            ("d_qoy", Integer),
            ("d_fy_year", Integer),
            ("d_fy_quarter_seq", Integer),
            ("d_fy_week_seq", Integer),
            ("d_day_name", Text),
            ("d_quarter_name", Text),
            ("d_holiday", Text),
            ("d_weekend", Text),
            ("d_following_holiday", Text),
            ("d_first_dom", Integer),
            ("d_last_dom", Integer),
            ("d_same_day_ly", Integer),
            ("d_same_day_lq", Integer),
            ("d_current_day", Text),
            ("d_current_week", Text),
            ("d_current_month", Text),
            ("d_current_quarter", Text),
            ("d_current_year", Text),
        ],
        "household_demographics" => &[
            ("hd_demo_sk", Key),
            ("hd_income_band_sk", Key),
            ("hd_buy_potential", Text),
            ("hd_dep_count", Integer),
            ("hd_vehicle_count", Integer),
        ],
        "income_band" => &[
            ("ib_income_band_sk", Key),
            ("ib_lower_bound", Integer),
            ("ib_upper_bound", Integer),
        ],
        "inventory" => &[
            ("inv_date_sk", Key),
            ("inv_item_sk", Key),
            ("inv_warehouse_sk", Key),
            ("inv_quantity_on_hand", Integer),
        ],
        "item" => &[
            ("i_item_sk", Key),
            ("i_item_id", Text),
            ("i_rec_start_date", Text),
            ("i_rec_end_date", Text),
            ("i_item_desc", Text),
            ("i_current_price", Decimal),
            ("i_wholesale_cost", Decimal),
            ("i_brand_id", Integer),
            ("i_brand", Text),
            ("i_class_id", Integer),
            ("i_class", Text),
            ("i_category_id", Integer),
            ("i_category", Text),
            ("i_manufact_id", Integer),
            ("i_manufact", Text),
            ("i_size", Text),
            ("i_formulation", Text),
            ("i_color", Text),
            ("i_units", Text),
            ("i_container", Text),
            ("i_manager_id", Integer),
            ("i_product_name", Text),
        ],
        "item_marketprices" => &[
            ("imp_sk", Key),
            ("imp_item_sk", Key),
            ("imp_competitor", Text),
            ("imp_competitor_price", Decimal),
            ("imp_start_date", Key),
            ("imp_end_date", Key),
        ],
        "product_reviews" => &[
            ("pr_review_sk", Key),
            ("pr_review_date", Text),
            ("pr_review_time", Text),
            ("pr_review_rating", Integer),
            ("pr_item_sk", Key),
            ("pr_user_sk", Key),
            ("pr_order_sk", Key),
            ("pr_review_content", Text),
        ],
        "promotion" => &[
            ("p_promo_sk", Key),
            ("p_promo_id", Text),
            ("p_start_date_sk", Key),
            ("p_end_date_sk", Key),
            ("p_item_sk", Key),
            ("p_cost", Decimal),
            ("p_response_target", Integer),
            ("p_promo_name", Text),
            ("p_channel_dmail", Text),
            ("p_channel_email", Text),
            ("p_channel_catalog", Text),
            ("p_channel_tv", Text),
            ("p_channel_radio", Text),
            ("p_channel_press", Text),
            ("p_channel_event", Text),
            ("p_channel_demo", Text),
            ("p_channel_details", Text),
            ("p_purpose", Text),
            ("p_discount_active", Text),
        ],
        "reason" => &[
            ("r_reason_sk", Key),
            ("r_reason_id", Text),
            ("r_reason_desc", Text),
        ],
        "ship_mode" => &[
            ("sm_ship_mode_sk", Key),
            ("sm_ship_mode_id", Text),
            ("sm_type", Text),
            ("sm_code", Text),
            ("sm_carrier", Text),
            ("sm_contract", Text),
        ],
        "store" => &[
            ("s_store_sk", Key),
            ("s_store_id", Text),
            ("s_rec_start_date", Text),
            ("s_rec_end_date", Text),
            ("s_closed_date_sk", Key),
            ("s_store_name", Text),
            ("s_number_employees", Integer),
            ("s_floor_space", Integer),
            ("s_hours", Text),
            ("s_manager", Text),
            ("s_market_id", Integer),
            ("s_geography_class", Text),
            ("s_market_desc", Text),
            ("s_market_manager", Text),
            ("s_division_id", Integer),
            ("s_division_name", Text),
            ("s_company_id", Integer),
            ("s_company_name", Text),
            ("s_street_number", Text),
            ("s_street_name", Text),
            ("s_street_type", Text),
            ("s_suite_number", Text),
            ("s_city", Text),
            ("s_county", Text),
            ("s_state", Text),
            ("s_zip", Text),
            ("s_country", Text),
            ("s_gmt_offset", Decimal),
            ("s_tax_precentage", Decimal),
        ],
        "store_returns" => &[
            ("sr_returned_date_sk", Key),
            ("sr_return_time_sk", Key),
            ("sr_item_sk", Key),
            ("sr_customer_sk", Key),
            ("sr_cdemo_sk", Key),
            ("sr_hdemo_sk", Key),
            ("sr_addr_sk", Key),
            ("sr_store_sk", Key),
            ("sr_reason_sk", Key),
            ("sr_ticket_number", Key),
            ("sr_return_quantity", Integer),
            ("sr_return_amt", Decimal),
            ("sr_return_tax", Decimal),
            ("sr_return_amt_inc_tax", Decimal),
            ("sr_fee", Decimal),
            ("sr_return_ship_cost", Decimal),
            ("sr_refunded_cash", Decimal),
            ("sr_reversed_charge", Decimal),
            ("sr_store_credit", Decimal),
            ("sr_net_loss", Decimal),
        ],
        "store_sales" => &[
            ("ss_sold_date_sk", Key),
            ("ss_sold_time_sk", Key),
            ("ss_item_sk", Key),
            ("ss_customer_sk", Key),
            ("ss_cdemo_sk", Key),
            ("ss_hdemo_sk", Key),
            ("ss_addr_sk", Key),
            ("ss_store_sk", Key),
            ("ss_promo_sk", Key),
            ("ss_ticket_number", Key),
            ("ss_quantity", Integer),
            ("ss_wholesale_cost", Decimal),
            ("ss_list_price", Decimal),
            ("ss_sales_price", Decimal),
            ("ss_ext_discount_amt", Decimal),
            ("ss_ext_sales_price", Decimal),
            ("ss_ext_wholesale_cost", Decimal),
            ("ss_ext_list_price", Decimal),
            ("ss_ext_tax", Decimal),
            ("ss_coupon_amt", Decimal),
            ("ss_net_paid", Decimal),
            ("ss_net_paid_inc_tax", Decimal),
            ("ss_net_profit", Decimal),
        ],
        "time_dim" => &[
            ("t_time_sk", Key),
            ("t_time_id", Text),
            ("t_time", Integer),
            ("t_hour", Integer),
            ("t_minute", Integer),
            ("t_second", Integer),
            ("t_am_pm", Text),
            ("t_shift", Text),
            ("t_sub_shift", Text),
            ("t_meal_time", Text),
        ],
        "warehouse" => &[
            ("w_warehouse_sk", Key),
            ("w_warehouse_id", Text),
            ("w_warehouse_name", Text),
            ("w_warehouse_sq_ft", Integer),
            ("w_street_number", Text),
            ("w_street_name", Text),
            ("w_street_type", Text),
            ("w_suite_number", Text),
            ("w_city", Text),
            ("w_county", Text),
            ("w_state", Text),
            ("w_zip", Text),
            ("w_country", Text),
            ("w_gmt_offset", Decimal),
        ],
        "web_clickstreams" => &[
            ("wcs_click_date_sk", Key),
            ("wcs_click_time_sk", Key),
            ("wcs_sales_sk", Key),
            ("wcs_item_sk", Key),
            ("wcs_web_page_sk", Key),
            ("wcs_user_sk", Key),
        ],
        "web_page" => &[
            ("wp_web_page_sk", Key),
            ("wp_web_page_id", Text),
            ("wp_rec_start_date", Text),
            ("wp_rec_end_date", Text),
            ("wp_creation_date_sk", Key),
            ("wp_access_date_sk", Key),
            ("wp_autogen_flag", Text),
            ("wp_customer_sk", Key),
            ("wp_url", Text),
            ("wp_type", Text),
            ("wp_char_count", Integer),
            ("wp_link_count", Integer),
            ("wp_image_count", Integer),
            ("wp_max_ad_count", Integer),
        ],
        "web_returns" => &[
            ("wr_returned_date_sk", Key),
            ("wr_returned_time_sk", Key),
            ("wr_item_sk", Key),
            ("wr_refunded_customer_sk", Key),
            ("wr_refunded_cdemo_sk", Key),
            ("wr_refunded_hdemo_sk", Key),
            ("wr_refunded_addr_sk", Key),
            ("wr_returning_customer_sk", Key),
            ("wr_returning_cdemo_sk", Key),
            ("wr_returning_hdemo_sk", Key),
            ("wr_returning_addr_sk", Key),
            ("wr_web_page_sk", Key),
            ("wr_reason_sk", Key),
            ("wr_order_number", Key),
            ("wr_return_quantity", Integer),
            ("wr_return_amt", Decimal),
            ("wr_return_tax", Decimal),
            ("wr_return_amt_inc_tax", Decimal),
            ("wr_fee", Decimal),
            ("wr_return_ship_cost", Decimal),
            ("wr_refunded_cash", Decimal),
            ("wr_reversed_charge", Decimal),
            ("wr_account_credit", Decimal),
            ("wr_net_loss", Decimal),
        ],
        "web_sales" => &[
            ("ws_sold_date_sk", Key),
            ("ws_sold_time_sk", Key),
            ("ws_ship_date_sk", Key),
            ("ws_item_sk", Key),
            ("ws_bill_customer_sk", Key),
            ("ws_bill_cdemo_sk", Key),
            ("ws_bill_hdemo_sk", Key),
            ("ws_bill_addr_sk", Key),
            ("ws_ship_customer_sk", Key),
            ("ws_ship_cdemo_sk", Key),
            ("ws_ship_hdemo_sk", Key),
            ("ws_ship_addr_sk", Key),
            ("ws_web_page_sk", Key),
            ("ws_web_site_sk", Key),
            ("ws_ship_mode_sk", Key),
            ("ws_warehouse_sk", Key),
            ("ws_promo_sk", Key),
            ("ws_order_number", Key),
            ("ws_quantity", Integer),
            ("ws_wholesale_cost", Decimal),
            ("ws_list_price", Decimal),
            ("ws_sales_price", Decimal),
            ("ws_ext_discount_amt", Decimal),
            ("ws_ext_sales_price", Decimal),
            ("ws_ext_wholesale_cost", Decimal),
            ("ws_ext_list_price", Decimal),
            ("ws_ext_tax", Decimal),
            ("ws_coupon_amt", Decimal),
            ("ws_ext_ship_cost", Decimal),
            ("ws_net_paid", Decimal),
            ("ws_net_paid_inc_tax", Decimal),
            ("ws_net_paid_inc_ship", Decimal),
            ("ws_net_paid_inc_ship_tax", Decimal),
            ("ws_net_profit", Decimal),
        ],
        "web_site" => &[
            ("web_site_sk", Key),
            ("web_site_id", Text),
            ("web_rec_start_date", Text),
            ("web_rec_end_date", Text),
            ("web_name", Text),
            ("web_open_date_sk", Key),
            ("web_close_date_sk", Key),
            ("web_class", Text),
            ("web_manager", Text),
            ("web_mkt_id", Integer),
            ("web_mkt_class", Text),
            ("web_mkt_desc", Text),
            ("web_market_manager", Text),
            ("web_company_id", Integer),
            ("web_company_name", Text),
            ("web_street_number", Text),
            ("web_street_name", Text),
            ("web_street_type", Text),
            ("web_suite_number", Text),
            ("web_city", Text),
            ("web_county", Text),
            ("web_state", Text),
            ("web_zip", Text),
            ("web_country", Text),
            ("web_gmt_offset", Decimal),
            ("web_tax_percentage", Decimal),
        ],
        _ => return None,
    };
    Some(columns)
}

pub fn tpcxbb_schema(table: &str) -> Result<Schema> {
    let columns =
        table_columns(table).ok_or_else(|| BenchError::UnknownTable(table.to_string()))?;
    Ok(Schema::from_iter(
        columns
            .iter()
            .map(|(name, kind)| Field::new(name, kind.data_type())),
    ))
}
