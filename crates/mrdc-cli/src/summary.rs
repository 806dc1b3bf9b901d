use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mrdc_cli::pipeline::{RunResult, TableResult};
use mrdc_core::CleanedTable;
use mrdc_model::{CleanReport, StepStatus};

pub fn print_summary(result: &RunResult) {
    println!("Destination: {}", result.destination);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Destination"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Failed steps"),
        header_cell("Failures"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);

    let mut total_in = 0usize;
    let mut total_out = 0usize;
    for summary in &result.tables {
        let report = summary.report.as_ref();
        total_in += summary.rows_extracted.unwrap_or(0);
        if summary.is_loaded() {
            total_out += report.map_or(0, |r| r.rows_out);
        }
        table.add_row(vec![
            Cell::new(summary.table.as_str())
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.table.destination()),
            optional_count(summary.rows_extracted),
            optional_count(report.map(|r| r.rows_out)),
            count_cell(report.map(CleanReport::failed_step_count), Color::Red),
            count_cell(report.map(CleanReport::total_failures), Color::Yellow),
            status_cell(summary),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_in).add_attribute(Attribute::Bold),
        Cell::new(total_out).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_width_table(&result.tables);
    print_step_failures(&result.tables);
    print_table_failures(result);
}

pub fn print_clean_summary(cleaned: &CleanedTable, output: &Path) {
    let report = &cleaned.report;
    println!("Output: {}", output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Column"),
        header_cell("Changed"),
        header_cell("Failed"),
        header_cell("Dropped"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for step in &report.steps {
        match &step.status {
            StepStatus::Applied(outcome) => table.add_row(vec![
                Cell::new(&step.step),
                Cell::new(outcome.column.as_deref().unwrap_or("-")),
                Cell::new(outcome.changed),
                count_cell(Some(outcome.failed), Color::Yellow),
                count_cell(Some(outcome.dropped), Color::Yellow),
            ]),
            StepStatus::Failed { reason } => table.add_row(vec![
                Cell::new(&step.step).fg(Color::Red),
                Cell::new(reason).fg(Color::Red),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]),
        };
    }
    println!("{table}");
    println!(
        "{}: {} rows in, {} rows out",
        report.table, report.rows_in, report.rows_out
    );
}

fn print_width_table(results: &[TableResult]) {
    let rows: Vec<_> = results
        .iter()
        .flat_map(|summary| {
            summary
                .column_widths
                .iter()
                .map(move |(column, width)| (summary.table, column, *width))
        })
        .collect();
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Column"),
        header_cell("Longest value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (kind, column, width) in rows {
        table.add_row(vec![
            Cell::new(kind.destination()),
            Cell::new(column),
            optional_count(width),
        ]);
    }
    println!();
    println!("Column widths:");
    println!("{table}");
}

fn print_step_failures(results: &[TableResult]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Step"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    let mut any = false;
    for summary in results {
        let Some(report) = &summary.report else {
            continue;
        };
        for step in report.failed_steps() {
            if let StepStatus::Failed { reason } = &step.status {
                any = true;
                table.add_row(vec![
                    Cell::new(summary.table.as_str()),
                    Cell::new(&step.step).fg(Color::Red),
                    Cell::new(reason),
                ]);
            }
        }
    }
    if any {
        println!();
        println!("Failed steps:");
        println!("{table}");
    }
}

fn print_table_failures(result: &RunResult) {
    let failures: Vec<_> = result.failed_tables().collect();
    if failures.is_empty() {
        return;
    }
    eprintln!("Errors:");
    for summary in failures {
        if let Some(failure) = &summary.failure {
            eprintln!("- {} ({}): {}", summary.table, failure.stage, failure.message);
        }
    }
}

fn status_cell(summary: &TableResult) -> Cell {
    match &summary.failure {
        None => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(failure) => Cell::new(format!("✗ {}", failure.stage))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn optional_count(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
