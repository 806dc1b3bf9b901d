//! Loading `mrdc.toml` from disk.

use std::fs;

use mrdc_cli::config::Config;
use mrdc_model::{ErrorPolicy, TableKind};

const CONFIG: &str = r#"
[pipeline]
error_policy = "abort"
tables = ["order_dates", "users"]
currency_symbol = "$"

[sources]
database_credentials = "db_creds.yaml"
card_details_pdf = "https://example.com/card_details.pdf"
products = "s3://data-handling-public/products.csv"
date_details = "data/date_details.json"
s3_region = "eu-west-1"

[sources.store_api]
base_url = "https://api.example.com/prod"
api_key = "secret"
requests_per_second = 5
first_store = 10

[warehouse]
credentials = "/etc/mrdc/sales_data_creds.yaml"
"#;

#[test]
fn loads_and_resolves_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mrdc.toml");
    fs::write(&path, CONFIG).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.pipeline.error_policy, ErrorPolicy::Abort);
    assert_eq!(
        config.selected_tables(&[]),
        vec![TableKind::Users, TableKind::OrderDates]
    );
    assert_eq!(
        config.sources.database_credentials,
        Some(dir.path().join("db_creds.yaml"))
    );
    assert_eq!(
        config.sources.date_details.as_deref(),
        Some(dir.path().join("data/date_details.json").to_str().unwrap())
    );
    assert_eq!(
        config.sources.card_details_pdf.as_deref(),
        Some("https://example.com/card_details.pdf")
    );
    assert_eq!(
        config.warehouse.credentials.as_deref(),
        Some(std::path::Path::new("/etc/mrdc/sales_data_creds.yaml"))
    );

    let options = config.cleaning_options();
    assert_eq!(options.error_policy, ErrorPolicy::Abort);
    assert_eq!(options.currency_symbol, "$");

    let api = config.sources.store_api.as_ref().unwrap();
    assert_eq!(api.first_store, 10);
    assert_eq!(api.last_store, None);
    assert_eq!(api.requests_per_second, Some(5));
    assert_eq!(api.resolve_api_key().unwrap(), "secret");
}

#[test]
fn api_key_needs_a_value_or_variable() {
    let config = Config::from_toml_str(
        "[sources.store_api]\nbase_url = \"https://api.example.com\"\n",
    )
    .unwrap();
    let api = config.sources.store_api.unwrap();
    assert!(api.resolve_api_key().is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = Config::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(format!("{error:#}").contains("absent.toml"));
}
