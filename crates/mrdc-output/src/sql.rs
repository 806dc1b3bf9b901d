//! SQL statements for replacing a warehouse table.

use mrdc_common::quote_identifier;
use polars::prelude::{DataFrame, DataType};

/// Warehouse column type for a frame column type.
pub fn sql_type(dtype: &DataType) -> &'static str {
    match dtype {
        DataType::Boolean => "BOOLEAN",
        DataType::Float32 | DataType::Float64 => "DOUBLE PRECISION",
        dtype if dtype.is_integer() => "BIGINT",
        _ => "TEXT",
    }
}

pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", quote_identifier(table))
}

/// `CREATE TABLE` with one column per frame column, in frame order.
pub fn create_table_sql(table: &str, df: &DataFrame) -> String {
    let columns: Vec<String> = df
        .get_columns()
        .iter()
        .map(|column| {
            format!(
                "    {} {}",
                quote_identifier(column.name()),
                sql_type(column.dtype())
            )
        })
        .collect();
    format!(
        "CREATE TABLE {} (\n{}\n)",
        quote_identifier(table),
        columns.join(",\n")
    )
}

/// `COPY ... FROM STDIN` for CSV with a header line.
pub fn copy_sql(table: &str, df: &DataFrame) -> String {
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| quote_identifier(name))
        .collect();
    format!(
        "COPY {} ({}) FROM STDIN WITH (FORMAT csv, HEADER true)",
        quote_identifier(table),
        columns.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_types() {
        assert_eq!(sql_type(&DataType::Int64), "BIGINT");
        assert_eq!(sql_type(&DataType::UInt32), "BIGINT");
        assert_eq!(sql_type(&DataType::Float64), "DOUBLE PRECISION");
        assert_eq!(sql_type(&DataType::Boolean), "BOOLEAN");
        assert_eq!(sql_type(&DataType::String), "TEXT");
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(
            drop_table_sql("dim_users"),
            "DROP TABLE IF EXISTS \"dim_users\""
        );
    }
}
