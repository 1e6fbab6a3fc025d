//! Report rows shared by export tests.

use cefnav_primitives::{Date, ReportRow, Symbol};

pub(crate) fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn sample_rows() -> Vec<ReportRow> {
    vec![
        ReportRow {
            fund_name: "FUNDX".to_string(),
            broad_category: "Equity".to_string(),
            fund_type: "Equity".to_string(),
            subcategory: "Global Equity".to_string(),
            region: "Global".to_string(),
            date: date(2024, 6, 28),
            fund_ticker: Symbol::new("FUNDX"),
            fund_price: Some(9.5),
            nav_ticker: Symbol::new("NAVX"),
            nav_price: Some(10.0),
            discount: Some(0.95),
            shares_outstanding_m: Some(20.0),
            total_debt_m: None,
            outside_equity_m: None,
        },
        ReportRow {
            fund_name: "PIMCO Dynamic Income Fund".to_string(),
            broad_category: "Taxable Bond".to_string(),
            fund_type: "Fixed Income".to_string(),
            subcategory: "Multisector".to_string(),
            region: "U.S.".to_string(),
            date: date(2024, 6, 28),
            fund_ticker: Symbol::new("PDI"),
            fund_price: Some(19.1),
            nav_ticker: Symbol::new("XPDIX"),
            nav_price: None,
            discount: None,
            shares_outstanding_m: Some(231.5),
            total_debt_m: Some(0.0),
            outside_equity_m: Some(-7.51),
        },
    ]
}
