use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use mrdc_cli::config::Config;
use mrdc_cli::pipeline::{Pipeline, RunResult, SourceLocations, SourceSlot};
use mrdc_core::{CleanedTable, clean_table};
use mrdc_ingest::{
    DatabaseSource, ObjectSource, ObjectStoreSource, PdfSource, PostgresSource, StoreApi,
    StoreApiClient, TabulaPdfSource,
};
use mrdc_model::{
    CleaningOptions, ErrorPolicy, SourceCredentials, TableKind, TableSource, WarehouseCredentials,
};
use mrdc_output::{CsvDirectorySink, TableSink, WarehouseSink, write_csv_file};

use crate::cli::{CleanArgs, RunArgs, TablesArgs};
use crate::summary::apply_table_style;

pub fn run_pipeline(args: &RunArgs) -> Result<RunResult> {
    let config = Config::load(&args.config)?;
    let tables = config.selected_tables(&args.tables);
    let mut options = config.cleaning_options();
    if args.abort_on_error {
        options = options.with_error_policy(ErrorPolicy::Abort);
    }
    let span = info_span!("run", policy = %options.error_policy);
    let _guard = span.enter();

    let (sink, destination) = open_sink(&config, args)?;
    let mut pipeline = build_pipeline(&config, &tables, sink, options);
    let results = pipeline.run(&tables);
    info!(
        tables = results.len(),
        failed = results.iter().filter(|r| !r.is_loaded()).count(),
        "run finished"
    );
    Ok(RunResult {
        tables: results,
        destination,
    })
}

fn open_sink(config: &Config, args: &RunArgs) -> Result<(Box<dyn TableSink>, String)> {
    if let Some(dir) = &args.output_dir {
        let sink = CsvDirectorySink::new(dir);
        return Ok((Box::new(sink), dir.display().to_string()));
    }
    let path = config
        .warehouse
        .credentials
        .as_deref()
        .context("warehouse.credentials is not configured (use --output-dir for a dry run)")?;
    let credentials = WarehouseCredentials::load(path)
        .with_context(|| format!("failed to load warehouse credentials {}", path.display()))?;
    let params = credentials.connection_params();
    let sink = WarehouseSink::connect(&params).context("failed to connect to the warehouse")?;
    Ok((
        Box::new(sink),
        format!("{}/{}", params.host, params.database),
    ))
}

/// Opens only the sources the selected tables read from.
fn build_pipeline(
    config: &Config,
    tables: &[TableKind],
    sink: Box<dyn TableSink>,
    options: CleaningOptions,
) -> Pipeline {
    let needs = |wanted: fn(TableSource) -> bool| tables.iter().any(|kind| wanted(kind.source()));
    let sources = &config.sources;
    let mut pipeline = Pipeline::new(sink, options);

    if needs(|source| matches!(source, TableSource::Database { .. })) {
        pipeline = pipeline.with_database(open_database(config));
    }
    if needs(|source| source == TableSource::CardPdf) {
        pipeline = pipeline.with_pdf(open_pdf(config));
    }
    if needs(|source| {
        matches!(
            source,
            TableSource::ProductsObject | TableSource::DateDetailsObject
        )
    }) {
        pipeline = pipeline.with_objects(open_objects(config));
    }
    if needs(|source| source == TableSource::StoreApi) {
        pipeline = pipeline.with_store_api(open_store_api(config));
    }

    let store_api = sources.store_api.as_ref();
    pipeline.with_locations(SourceLocations {
        card_details_pdf: sources.card_details_pdf.clone(),
        products: sources.products.clone(),
        date_details: sources.date_details.clone(),
        first_store: store_api.map_or(0, |api| api.first_store),
        last_store: store_api.and_then(|api| api.last_store),
        requests_per_second: store_api.and_then(|api| api.requests_per_second),
    })
}

fn open_database(config: &Config) -> SourceSlot<dyn DatabaseSource> {
    let connect = || -> Result<PostgresSource> {
        let path = config
            .sources
            .database_credentials
            .as_deref()
            .context("sources.database_credentials is not configured")?;
        let credentials = SourceCredentials::load(path)
            .with_context(|| format!("failed to load database credentials {}", path.display()))?;
        let mut source = PostgresSource::connect(&credentials.connection_params())
            .context("failed to connect to the source database")?;
        source.list_tables()?;
        Ok(source)
    };
    connect()
        .map(|source| Box::new(source) as Box<dyn DatabaseSource>)
        .map_err(|error| format!("{error:#}"))
}

fn open_pdf(config: &Config) -> SourceSlot<dyn PdfSource> {
    TabulaPdfSource::new(config.tabula_command())
        .map(|source| Box::new(source) as Box<dyn PdfSource>)
        .map_err(|error| error.to_string())
}

fn open_objects(config: &Config) -> SourceSlot<dyn ObjectSource> {
    ObjectStoreSource::new()
        .map(|source| match &config.sources.s3_region {
            Some(region) => source.with_region(region.clone()),
            None => source,
        })
        .map(|source| Box::new(source) as Box<dyn ObjectSource>)
        .map_err(|error| error.to_string())
}

fn open_store_api(config: &Config) -> SourceSlot<dyn StoreApi> {
    let open = || -> Result<StoreApiClient> {
        let section = config
            .sources
            .store_api
            .as_ref()
            .context("sources.store_api is not configured")?;
        let api_key = section.resolve_api_key()?;
        Ok(StoreApiClient::new(section.base_url.clone(), api_key)?)
    };
    open()
        .map(|client| Box::new(client) as Box<dyn StoreApi>)
        .map_err(|error| format!("{error:#}"))
}

pub fn run_clean(args: &CleanArgs) -> Result<CleanedTable> {
    let location = args.input.to_string_lossy();
    let frame = ObjectStoreSource::new()?
        .read_object(&location)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let policy = if args.abort_on_error {
        ErrorPolicy::Abort
    } else {
        ErrorPolicy::Continue
    };
    let options = CleaningOptions::new().with_error_policy(policy);
    let cleaned = clean_table(args.table, frame, &options)?;
    write_csv_file(&args.output, &cleaned.frame, args.table.destination())?;
    info!(
        table = %args.table,
        rows = cleaned.frame.height(),
        output = %args.output.display(),
        "cleaned table written"
    );
    Ok(cleaned)
}

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Table", "Source", "Destination"]);
    apply_table_style(&mut table);
    for kind in TableKind::ALL {
        table.add_row(vec![
            kind.to_string(),
            kind.source().to_string(),
            kind.destination().to_string(),
        ]);
    }
    println!("{table}");

    if args.database {
        let path = args
            .config
            .as_deref()
            .context("--database needs --config")?;
        let config = Config::load(path)?;
        let mut database = open_database(&config).map_err(anyhow::Error::msg)?;
        let mut listing = Table::new();
        listing.set_header(vec!["Source database table"]);
        apply_table_style(&mut listing);
        for name in database.list_tables()? {
            listing.add_row(vec![name]);
        }
        println!();
        println!("{listing}");
    }
    Ok(())
}
