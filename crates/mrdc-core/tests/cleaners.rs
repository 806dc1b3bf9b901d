//! End-to-end tests for the per-table cleaners.

use mrdc_common::column_text_values;
use mrdc_core::{CleanError, clean_table};
use mrdc_model::{CleaningOptions, ErrorPolicy, StepStatus, TableKind};
use mrdc_standards::countries;
use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};

fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| {
            Series::new(
                name.into(),
                values
                    .iter()
                    .map(|v| v.map(String::from))
                    .collect::<Vec<_>>(),
            )
            .into_column()
        })
        .collect();
    DataFrame::new(cols).unwrap()
}

fn text(df: &DataFrame, column: &str) -> Vec<Option<String>> {
    column_text_values(df, column).unwrap()
}

fn owned(values: &[Option<&str>]) -> Vec<Option<String>> {
    values.iter().map(|v| v.map(String::from)).collect()
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

fn users() -> DataFrame {
    test_df(vec![
        ("first_name", vec![Some("john"), Some("ada")]),
        ("last_name", vec![Some("SMITH"), Some("lovelace")]),
        ("date_of_birth", vec![Some("1968 October 16"), Some("not a date")]),
        ("company", vec![Some("Acme"), Some("Engines")]),
        ("email_address", vec![Some("john@example.com"), Some("ada@example.com")]),
        ("address", vec![Some("1 High Street\nLondon"), Some("2 Low Road")]),
        ("country", vec![Some("united kingdom"), Some("Germany")]),
        ("country_code", vec![Some("GGB"), Some("DE")]),
        ("phone_number", vec![Some("020 7946 0958"), Some("030 901820")]),
        ("join_date", vec![Some("2005-03-12"), Some("2010/01/02")]),
        ("user_uuid", vec![Some("u-1"), Some("u-2")]),
    ])
}

#[test]
fn users_are_normalized_and_incomplete_rows_dropped() {
    let cleaned = clean_table(TableKind::Users, users(), &CleaningOptions::default()).unwrap();
    let df = &cleaned.frame;

    assert_eq!(df.height(), 1);
    assert_eq!(text(df, "first_name"), owned(&[Some("John")]));
    assert_eq!(text(df, "last_name"), owned(&[Some("Smith")]));
    assert_eq!(text(df, "date_of_birth"), owned(&[Some("1968-10-16")]));
    assert_eq!(text(df, "join_date"), owned(&[Some("2005-03-12")]));
    assert_eq!(text(df, "address"), owned(&[Some("1 High Street, London")]));
    assert_eq!(text(df, "country"), owned(&[Some("United Kingdom")]));
    assert_eq!(text(df, "country_code"), owned(&[Some("GB")]));
    assert_eq!(text(df, "phone_number"), owned(&[Some("+442079460958")]));

    let report = &cleaned.report;
    assert!(!report.has_failed_steps());
    assert_eq!(report.rows_in, 2);
    assert_eq!(report.rows_out, 1);
    assert_eq!(report.failures_by_column().get("date_of_birth"), Some(&1));
}

#[test]
fn user_country_codes_are_iso_or_sentinel() {
    let mut df = users();
    df.with_column(
        Series::new(
            "country".into(),
            vec![Some("Atlantis".to_string()), Some("germany".to_string())],
        )
        .into_column(),
    )
    .unwrap();
    df.with_column(
        Series::new(
            "date_of_birth".into(),
            vec![Some("1970-01-01".to_string()), Some("1980-02-02".to_string())],
        )
        .into_column(),
    )
    .unwrap();

    let cleaned = clean_table(TableKind::Users, df, &CleaningOptions::default()).unwrap();
    let codes = text(&cleaned.frame, "country_code");
    assert_eq!(codes, owned(&[Some("N/A"), Some("DE")]));
    for code in codes.iter().flatten() {
        assert!(code == "N/A" || countries().is_valid_alpha2(code));
    }
}

fn cards() -> DataFrame {
    test_df(vec![
        ("Unnamed: 0", vec![Some("0"), Some("1"), Some("2")]),
        (
            "card_number",
            vec![
                Some("4111111111111111"),
                Some("1234567890123456"),
                Some("??5105105105105100"),
            ],
        ),
        ("expiry_date", vec![Some("09/26"), Some("01/25"), Some("12/99")]),
        (
            "card_provider",
            vec![Some("VISA"), Some("VISA 16 digit"), Some("Mastercard")],
        ),
        (
            "date_payment_confirmed",
            vec![Some("2015-11-25"), Some("2019-01-01"), Some("December 2001 17")],
        ),
        ("card_number expiry_date", vec![None, None, None]),
    ])
}

#[test]
fn cards_keep_valid_numbers_only() {
    let cleaned = clean_table(TableKind::Cards, cards(), &CleaningOptions::default()).unwrap();
    let df = &cleaned.frame;

    let names = column_names(df);
    assert!(!names.iter().any(|n| n == "card_number expiry_date"));
    assert!(!names.iter().any(|n| n == "Unnamed: 0"));

    assert_eq!(df.column("card_number").unwrap().dtype(), &DataType::Int64);
    let numbers: Vec<i64> = df
        .column("card_number")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(numbers, vec![4_111_111_111_111_111, 5_105_105_105_105_100]);
    assert_eq!(
        text(df, "expiry_date"),
        owned(&[Some("2026-09"), Some("1999-12")])
    );
    assert_eq!(
        text(df, "date_payment_confirmed"),
        owned(&[Some("2015-11-25"), Some("2001-12-17")])
    );
    assert!(!cleaned.report.has_failed_steps());
}

#[test]
fn cards_drop_merged_column_even_without_index_column() {
    let mut df = cards();
    df.drop_in_place("Unnamed: 0").unwrap();

    let cleaned = clean_table(TableKind::Cards, df, &CleaningOptions::default()).unwrap();
    let names = column_names(&cleaned.frame);
    assert!(!names.iter().any(|n| n == "card_number expiry_date"));

    let failed: Vec<&str> = cleaned
        .report
        .failed_steps()
        .map(|s| s.step.as_str())
        .collect();
    assert_eq!(failed, vec!["drop Unnamed: 0"]);
}

#[test]
fn abort_policy_stops_at_failed_step() {
    let mut df = cards();
    df.drop_in_place("Unnamed: 0").unwrap();
    let options = CleaningOptions::new().with_error_policy(ErrorPolicy::Abort);

    let err = clean_table(TableKind::Cards, df, &options).unwrap_err();
    let CleanError::StepFailed { table, step, .. } = err;
    assert_eq!(table, TableKind::Cards);
    assert_eq!(step, "drop Unnamed: 0");
}

fn stores() -> DataFrame {
    test_df(vec![
        ("index", vec![Some("0"), Some("1"), Some("2"), Some("3")]),
        (
            "address",
            vec![None, Some("Flat 1\nBerlin"), Some("NULL"), Some("Depot")],
        ),
        ("longitude", vec![Some("-0.1"), Some("13.4"), None, Some("1.0")]),
        ("lat", vec![None, None, None, None]),
        ("locality", vec![None, Some("Berlin"), None, Some("Leeds")]),
        (
            "store_code",
            vec![Some("WEB-1388012W"), Some("DE-1"), Some("NULL"), Some("GB-9")],
        ),
        ("staff_numbers", vec![Some("J78"), Some("34"), None, Some("12")]),
        (
            "opening_date",
            vec![Some("2010-06-12"), Some("October 2012 08"), None, Some("2001-01-01")],
        ),
        (
            "store_type",
            vec![Some("Web Portal"), Some("Local"), Some("NULL"), Some("Warehouse")],
        ),
        ("latitude", vec![None, Some("52.5"), None, Some("53.8")]),
        ("country_code", vec![Some("GB"), Some("DE"), None, Some("GB")]),
        ("continent", vec![Some("eeEurope"), Some("Europe"), None, Some("Europe")]),
    ])
}

#[test]
fn stores_filter_types_and_fill_continents() {
    let cleaned = clean_table(TableKind::Stores, stores(), &CleaningOptions::default()).unwrap();
    let df = &cleaned.frame;

    assert_eq!(df.height(), 2);
    assert!(!column_names(df).iter().any(|n| n == "lat"));
    assert_eq!(
        text(df, "store_type"),
        owned(&[Some("Web Portal"), Some("Local")])
    );
    assert_eq!(text(df, "longitude"), owned(&[None, Some("13.4")]));
    assert_eq!(text(df, "continent"), owned(&[Some("Europe"), Some("Europe")]));
    assert_eq!(text(df, "address"), owned(&[None, Some("Flat 1, Berlin")]));
    assert_eq!(
        text(df, "opening_date"),
        owned(&[Some("2010-06-12"), Some("2012-10-08")])
    );
    let staff: Vec<Option<i64>> = df
        .column("staff_numbers")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(staff, vec![Some(78), Some(34)]);
    assert!(!cleaned.report.has_failed_steps());
}

fn products() -> DataFrame {
    test_df(vec![
        ("Unnamed: 0", vec![Some("0"), Some("1"), Some("2")]),
        ("product_name", vec![Some("fun TOY"), Some("big box"), Some("XYZ")]),
        ("product_price", vec![Some("£9.99"), Some("£39.50"), Some("ABC")]),
        ("weight", vec![Some("12 x 100g"), Some("500ml"), Some("VLPCU81M30")]),
        ("category", vec![Some("toys-and-games"), Some("homeware"), Some("XYZ")]),
        ("EAN", vec![Some("1234567890123"), Some("9876543210987"), Some("ABC")]),
        ("date_added", vec![Some("2018-10-22"), Some("2019 May 3"), Some("XYZ")]),
        ("uuid", vec![Some("p-1"), Some("p-2"), Some("XYZ")]),
        ("removed", vec![Some("Still_avaliable"), Some("Removed"), Some("XYZ")]),
        ("product_code", vec![Some("R7-3126933h"), Some("C2-7287916l"), Some("XYZ")]),
    ])
}

#[test]
fn products_convert_weights_and_prices() {
    let cleaned = clean_table(TableKind::Products, products(), &CleaningOptions::default())
        .unwrap();
    let df = &cleaned.frame;

    assert_eq!(df.height(), 2);
    let names = column_names(df);
    assert!(!names.iter().any(|n| n == "unit" || n == "Unnamed: 0"));

    let weights: Vec<f64> = df
        .column("weight")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(weights.len(), 2);
    assert!((weights[0] - 1.2).abs() < 1e-9);
    assert!((weights[1] - 0.5).abs() < 1e-9);

    let prices: Vec<f64> = df
        .column("product_price")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(prices, vec![9.99, 39.5]);
    assert_eq!(df.column("EAN").unwrap().dtype(), &DataType::Int64);
    assert_eq!(
        text(df, "product_name"),
        owned(&[Some("Fun Toy"), Some("Big Box")])
    );
    assert_eq!(
        text(df, "date_added"),
        owned(&[Some("2018-10-22"), Some("2019-05-03")])
    );

    let category = cleaned
        .report
        .steps
        .iter()
        .find(|s| s.step == "categorize category")
        .and_then(|s| s.outcome())
        .unwrap();
    assert_eq!(category.levels, vec!["homeware", "toys-and-games"]);
    assert!(!cleaned.report.has_failed_steps());
}

#[test]
fn continue_policy_runs_steps_after_a_failure() {
    let mut df = products();
    df.with_column(
        Series::new(
            "product_price".into(),
            vec![
                Some("£9.99".to_string()),
                Some("about £40".to_string()),
                Some("ABC".to_string()),
            ],
        )
        .into_column(),
    )
    .unwrap();

    let cleaned = clean_table(TableKind::Products, df, &CleaningOptions::default()).unwrap();
    let report = &cleaned.report;

    let failed: Vec<&str> = report.failed_steps().map(|s| s.step.as_str()).collect();
    assert_eq!(failed, vec!["float product_price"]);
    let last = report.steps.last().unwrap();
    assert_eq!(last.step, "text product_code");
    assert!(matches!(last.status, StepStatus::Applied(_)));

    assert_eq!(
        cleaned.frame.column("product_price").unwrap().dtype(),
        &DataType::String
    );
    assert_eq!(
        text(&cleaned.frame, "product_price"),
        owned(&[Some("9.99"), Some("about 40")])
    );
}

#[test]
fn abort_policy_reports_failing_cast() {
    let mut df = products();
    df.with_column(
        Series::new(
            "product_price".into(),
            vec![
                Some("£9.99".to_string()),
                Some("about £40".to_string()),
                Some("ABC".to_string()),
            ],
        )
        .into_column(),
    )
    .unwrap();
    let options = CleaningOptions::new().with_error_policy(ErrorPolicy::Abort);

    let err = clean_table(TableKind::Products, df, &options).unwrap_err();
    assert_eq!(err.step(), "float product_price");
}

#[test]
fn orders_lose_personal_columns() {
    let df = test_df(vec![
        ("level_0", vec![Some("0")]),
        ("index", vec![Some("0")]),
        ("date_uuid", vec![Some("d-1")]),
        ("first_name", vec![None]),
        ("last_name", vec![None]),
        ("user_uuid", vec![Some("u-1")]),
        ("card_number", vec![Some("4111111111111111")]),
        ("store_code", vec![Some("GB-9")]),
        ("product_code", vec![Some("R7-3126933h")]),
        ("1", vec![None]),
        ("product_quantity", vec![Some("3")]),
    ]);

    let cleaned = clean_table(TableKind::Orders, df, &CleaningOptions::default()).unwrap();
    assert_eq!(
        column_names(&cleaned.frame),
        vec![
            "index",
            "date_uuid",
            "user_uuid",
            "card_number",
            "store_code",
            "product_code",
            "product_quantity",
        ]
    );
    assert_eq!(cleaned.report.steps.len(), 4);
}

#[test]
fn order_dates_combine_parts_and_drop_junk() {
    let df = test_df(vec![
        (
            "timestamp",
            vec![Some("22:00:06"), Some("SAAZHF87TI"), Some("13:21:07")],
        ),
        ("month", vec![Some("9"), Some("NULL"), Some("5")]),
        ("year", vec![Some("2012"), Some("NULL"), Some("2020")]),
        ("day", vec![Some("19"), Some("NULL"), Some("NULL")]),
        ("time_period", vec![Some("Evening"), Some("NULL"), Some("Midday")]),
        ("date_uuid", vec![Some("d-1"), Some("d-2"), Some("d-3")]),
    ]);

    let cleaned = clean_table(TableKind::OrderDates, df, &CleaningOptions::default()).unwrap();
    let df = &cleaned.frame;

    assert_eq!(df.height(), 1);
    let names = column_names(df);
    for part in ["year", "month", "day"] {
        assert!(!names.iter().any(|n| n == part));
    }
    assert_eq!(text(df, "date"), owned(&[Some("2012-09-19")]));
    assert_eq!(text(df, "timestamp"), owned(&[Some("22:00:06")]));
    assert!(!cleaned.report.has_failed_steps());
}
