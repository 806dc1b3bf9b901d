//! Integration tests for frame-level transforms.

use mrdc_common::{any_to_string_opt, column_text_values};
use mrdc_standards::countries;
use mrdc_transform::{
    TransformError, combine_date_parts, drop_columns, drop_null_rows, drop_rows_in,
    drop_rows_with_any_null, drop_rows_with_value, extract_first_integer, extract_weight_units,
    fill_continents, fill_country_codes, format_phone_numbers, keep_rows_in, normalize_dates,
    normalize_weights, null_where_equals, reformat_month_year, reformat_time,
    resolve_country_names, revalidate_country_codes, strip_currency, strip_non_digits,
    to_category, to_float64, to_int64, to_text, upper_case, validate_card_numbers,
};
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

#[test]
fn dates_normalize_and_count_failures() {
    let mut df = test_df(vec![(
        "join_date",
        vec![
            Some("2005-11-26"),
            Some("1968 October 16"),
            Some("GFVY5ASK0R"),
            None,
        ],
    )]);
    let outcome = normalize_dates(&mut df, "join_date").unwrap();
    assert_eq!(
        text(&df, "join_date"),
        owned(&[Some("2005-11-26"), Some("1968-10-16"), None, None])
    );
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.changed, 1);
}

#[test]
fn expiry_dates_and_times() {
    let mut df = test_df(vec![
        ("expiry_date", vec![Some("09/26"), Some("2026-09")]),
        ("timestamp", vec![Some("22:00:06"), Some("nonsense")]),
    ]);
    reformat_month_year(&mut df, "expiry_date").unwrap();
    let outcome = reformat_time(&mut df, "timestamp").unwrap();
    assert_eq!(text(&df, "expiry_date"), owned(&[Some("2026-09"), None]));
    assert_eq!(text(&df, "timestamp"), owned(&[Some("22:00:06"), None]));
    assert_eq!(outcome.failed, 1);
}

#[test]
fn country_codes_are_valid_or_sentinel() {
    let mut df = test_df(vec![
        (
            "country",
            vec![Some("United Kingdom"), Some("germany"), Some("Atlantis"), None],
        ),
        ("country_code", vec![Some("GGB"), Some("DE"), Some("XX"), None]),
    ]);
    resolve_country_names(&mut df, "country").unwrap();
    let outcome = fill_country_codes(&mut df, "country", "country_code").unwrap();
    assert_eq!(outcome.failed, 2);
    for code in text(&df, "country_code").into_iter().flatten() {
        assert!(code == "N/A" || countries().is_valid_alpha2(&code), "{code}");
    }
    assert_eq!(
        text(&df, "country"),
        owned(&[Some("United Kingdom"), Some("Germany"), Some("N/A"), Some("N/A")])
    );
}

#[test]
fn store_codes_and_continents() {
    let mut df = test_df(vec![
        ("country_code", vec![Some("GB"), Some("us"), Some("YELVM536YT")]),
        ("continent", vec![Some("eeEurope"), Some("America"), Some("Europe")]),
    ]);
    revalidate_country_codes(&mut df, "country_code").unwrap();
    let outcome = fill_continents(&mut df, "country_code", "continent").unwrap();
    assert_eq!(
        text(&df, "country_code"),
        owned(&[Some("GB"), Some("US"), Some("N/A")])
    );
    assert_eq!(
        text(&df, "continent"),
        owned(&[Some("Europe"), Some("North America"), Some("Unknown")])
    );
    assert_eq!(outcome.failed, 1);
}

#[test]
fn phone_numbers_use_row_region() {
    let mut df = test_df(vec![
        ("phone_number", vec![Some("020 7946 0958"), Some("garbage"), None]),
        ("country_code", vec![Some("GB"), Some("GB"), Some("GB")]),
    ]);
    let outcome = format_phone_numbers(&mut df, "phone_number", "country_code").unwrap();
    assert_eq!(
        text(&df, "phone_number"),
        owned(&[Some("+442079460958"), Some("garbage"), None])
    );
    assert_eq!(outcome.failed, 1);
}

#[test]
fn store_type_filter() {
    let mut df = test_df(vec![(
        "store_type",
        vec![Some("Local"), Some("Warehouse"), Some("Web Portal"), None],
    )]);
    let outcome = keep_rows_in(
        &mut df,
        "store_type",
        &["Web Portal", "Local", "Super Store", "Mall Kiosk", "Outlet"],
    )
    .unwrap();
    assert_eq!(outcome.dropped, 2);
    assert_eq!(text(&df, "store_type"), owned(&[Some("Local"), Some("Web Portal")]));
}

#[test]
fn exclusion_filters_keep_nulls() {
    let mut df = test_df(vec![(
        "timestamp",
        vec![Some("SAAZHF87TI"), Some("10:00:00"), None],
    )]);
    drop_rows_in(&mut df, "timestamp", &["SAAZHF87TI"]).unwrap();
    assert_eq!(df.height(), 2);
    drop_rows_with_value(&mut df, "timestamp", "10:00:00").unwrap();
    assert_eq!(text(&df, "timestamp"), owned(&[None]));
    let outcome = drop_null_rows(&mut df, "timestamp").unwrap();
    assert_eq!(outcome.dropped, 1);
    assert_eq!(df.height(), 0);
}

#[test]
fn any_null_filter() {
    let mut df = test_df(vec![
        ("a", vec![Some("1"), None, Some("3")]),
        ("b", vec![Some("x"), Some("y"), None]),
    ]);
    let outcome = drop_rows_with_any_null(&mut df).unwrap();
    assert_eq!(outcome.dropped, 2);
    assert_eq!(df.height(), 1);
}

#[test]
fn card_numbers_validated_against_provider() {
    let mut df = test_df(vec![
        (
            "card_number",
            vec![
                Some("?4111111111111111"),
                Some("1234567890123456"),
                Some("5555555555554444"),
                Some("4111111111111111"),
            ],
        ),
        (
            "card_provider",
            vec![Some("VISA"), Some("VISA"), Some("Mastercard"), Some("NULL")],
        ),
    ]);
    strip_non_digits(&mut df, "card_number").unwrap();
    let outcome = validate_card_numbers(&mut df, "card_number", "card_provider").unwrap();
    assert_eq!(outcome.dropped, 2);
    to_int64(&mut df, "card_number").unwrap();
    let numbers: Vec<i64> = df
        .column("card_number")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(numbers, vec![4111111111111111, 5555555555554444]);
}

#[test]
fn weights_convert_to_kilograms() {
    let mut df = test_df(vec![(
        "weight",
        vec![
            Some("12 x 100g"),
            Some("500ml"),
            Some("1.5kg"),
            Some("16oz"),
            Some("9GO9NZ5JTL"),
            Some("100"),
        ],
    )]);
    extract_weight_units(&mut df, "weight", "unit").unwrap();
    let outcome = normalize_weights(&mut df, "weight", "unit").unwrap();
    assert_eq!(outcome.dropped, 2);
    assert_eq!(outcome.failed, 0);
    assert_eq!(df.column("weight").unwrap().dtype(), &DataType::Float64);
    let kg: Vec<f64> = df
        .column("weight")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    let expected = [1.2, 0.5, 1.5, 0.45359237];
    assert_eq!(kg.len(), expected.len());
    for (got, want) in kg.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
}

#[test]
fn prices_strip_currency_and_cast() {
    let mut df = test_df(vec![("product_price", vec![Some("£39.99"), Some("£9.00")])]);
    strip_currency(&mut df, "product_price", "£").unwrap();
    to_float64(&mut df, "product_price").unwrap();
    let prices: Vec<f64> = df
        .column("product_price")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(prices, vec![39.99, 9.0]);
}

#[test]
fn failing_cast_leaves_frame_unchanged() {
    let mut df = test_df(vec![("EAN", vec![Some("7425710935115"), Some("ZTDGUZVU9K")])]);
    let before = df.clone();
    let err = to_int64(&mut df, "EAN").unwrap_err();
    assert!(matches!(err, TransformError::Cast { .. }));
    assert!(df.equals_missing(&before));
}

#[test]
fn missing_column_drop_leaves_frame_unchanged() {
    let mut df = test_df(vec![
        ("first_name", vec![Some("a")]),
        ("level_0", vec![Some("0")]),
    ]);
    let err = drop_columns(&mut df, &["first_name", "1"]).unwrap_err();
    assert!(matches!(err, TransformError::ColumnNotFound { ref column } if column == "1"));
    assert_eq!(df.width(), 2);
    drop_columns(&mut df, &["first_name", "level_0"]).unwrap();
    assert_eq!(df.width(), 0);
}

#[test]
fn staff_numbers_keep_first_integer() {
    let mut df = test_df(vec![("staff_numbers", vec![Some("J78"), Some("34"), Some("n/a")])]);
    let outcome = extract_first_integer(&mut df, "staff_numbers").unwrap();
    assert_eq!(outcome.failed, 1);
    let values: Vec<Option<i64>> = df
        .column("staff_numbers")
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(values, vec![Some(78), Some(34), None]);
}

#[test]
fn date_parts_combine() {
    let mut df = test_df(vec![
        ("year", vec![Some("2012"), Some("1999"), None]),
        ("month", vec![Some("9"), Some("NULL"), Some("1")]),
        ("day", vec![Some("19"), Some("3"), Some("1")]),
    ]);
    combine_date_parts(&mut df, &["year", "month", "day"], "date").unwrap();
    assert_eq!(
        text(&df, "date"),
        owned(&[Some("2012-9-19"), Some("1999-NULL-3"), None])
    );
    let outcome = normalize_dates(&mut df, "date").unwrap();
    assert_eq!(outcome.failed, 1);
    assert_eq!(text(&df, "date"), owned(&[Some("2012-09-19"), None, None]));
}

#[test]
fn web_portal_longitude_nulled() {
    let mut df = DataFrame::new(vec![
        Column::new("longitude".into(), vec![Some(-0.12f64), Some(1.5), None]),
        Column::new(
            "store_type".into(),
            vec![Some("Web Portal"), Some("Local"), Some("Web Portal")],
        ),
    ])
    .unwrap();
    let outcome = null_where_equals(&mut df, "longitude", "store_type", "Web Portal").unwrap();
    assert_eq!(outcome.changed, 1);
    let column = df.column("longitude").unwrap();
    assert_eq!(column.dtype(), &DataType::Float64);
    assert_eq!(column.null_count(), 2);
}

#[test]
fn categories_record_levels() {
    let mut df = test_df(vec![(
        "category",
        vec![Some("toys-and-games"), Some("diy"), Some("diy"), None],
    )]);
    let outcome = to_category(&mut df, "category").unwrap();
    assert_eq!(outcome.levels, vec!["diy".to_string(), "toys-and-games".to_string()]);
}

#[test]
fn text_casts_keep_nulls() {
    let mut df = DataFrame::new(vec![Column::new(
        "uuid".into(),
        vec![Some(1i64), None],
    )])
    .unwrap();
    to_text(&mut df, "uuid").unwrap();
    upper_case(&mut df, "uuid").unwrap();
    let column = df.column("uuid").unwrap();
    assert_eq!(column.dtype(), &DataType::String);
    assert_eq!(any_to_string_opt(column.get(1).unwrap()), None);
}
