use std::fs::File;
use std::path::Path;

use arrow::array::{Array, ArrayRef};
use arrow::util::display::array_value_to_string;
use calamine::{open_workbook_auto, Data, Range, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{Column, Engagement, EngagementTable};
use crate::error::LoadError;

/// Sheet read from workbooks when none is configured otherwise.
pub const DEFAULT_SHEET_NAME: &str = "m16j_supplier_analytics (2).csv";

/// Only the leading columns `A:C` are read; anything to the right is ignored.
pub const DEFAULT_COLUMN_SPAN: usize = 3;

/// Data rows past this cap are dropped.
pub const DEFAULT_MAX_ROWS: usize = 50_000;

// ---------------------------------------------------------------------------
// Loader settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Worksheet to read. `None` reads the first sheet.
    pub sheet_name: Option<String>,
    /// Number of leading columns searched for the required headers.
    pub column_span: usize,
    /// Maximum number of data rows kept.
    pub max_rows: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            sheet_name: Some(DEFAULT_SHEET_NAME.to_string()),
            column_span: DEFAULT_COLUMN_SPAN,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an engagement table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – header row plus records on the configured sheet
/// * `.csv`     – header row plus records
/// * `.parquet` – one column per field, any type (rendered as text)
/// * `.json`    – `[{ "Supplier Name": ..., "Company Name": ..., "Product Name": ... }, ...]`
pub fn load_file(path: &Path, config: &LoaderConfig) -> Result<EngagementTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_spreadsheet(path, config),
        "csv" => load_csv(path, config),
        "parquet" | "pq" => load_parquet(path, config),
        "json" => load_json(path, config),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }?;

    log::debug!(
        "{}: {} rows, {} suppliers, {} companies, {} products",
        path.display(),
        table.len(),
        table.unique_values(Column::Supplier).len(),
        table.unique_values(Column::Company).len(),
        table.unique_values(Column::Product).len(),
    );
    Ok(table)
}

/// Find each required header among the first `span` headers.
///
/// Returns the position of Supplier, Company and Product, in that order.
fn locate_columns(headers: &[String], span: usize) -> Result<[usize; 3], LoadError> {
    let visible = &headers[..headers.len().min(span)];
    let mut positions = [0usize; 3];
    for column in Column::ALL {
        positions[column.index()] = visible
            .iter()
            .position(|h| h.trim() == column.header())
            .ok_or(LoadError::MissingColumn {
                column: column.header(),
                span,
            })?;
    }
    Ok(positions)
}

fn row_from<F>(positions: &[usize; 3], mut cell: F) -> Engagement
where
    F: FnMut(usize) -> String,
{
    Engagement::new(cell(positions[0]), cell(positions[1]), cell(positions[2]))
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_spreadsheet(path: &Path, config: &LoaderConfig) -> Result<EngagementTable, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(LoadError::NoSheets);
    }

    let range = match &config.sheet_name {
        Some(name) => {
            if !sheet_names.iter().any(|n| n == name) {
                return Err(LoadError::SheetNotFound(name.clone()));
            }
            workbook.worksheet_range(name)?
        }
        None => workbook.worksheet_range_at(0).ok_or(LoadError::NoSheets)??,
    };

    table_from_range(&range, config)
}

/// Interpret a sheet range whose first row holds the headers.
///
/// Calamine ranges start at the first used cell, so column positions are
/// shifted back to absolute sheet columns before applying the span.
fn table_from_range(range: &Range<Data>, config: &LoaderConfig) -> Result<EngagementTable, LoadError> {
    let first_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    let cell_text = |row: &[Data], abs_col: usize| -> String {
        abs_col
            .checked_sub(first_col)
            .and_then(|i| row.get(i))
            .map(data_to_string)
            .unwrap_or_default()
    };

    let mut rows = range.rows();
    let header_row = rows.next().ok_or(LoadError::MissingHeader)?;
    let headers: Vec<String> = (0..config.column_span)
        .map(|abs_col| cell_text(header_row, abs_col))
        .collect();
    let positions = locate_columns(&headers, config.column_span)?;

    let engagements = rows
        .take(config.max_rows)
        .map(|row| row_from(&positions, |col| cell_text(row, col)))
        .collect();

    Ok(EngagementTable::from_rows(engagements))
}

fn data_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path, config: &LoaderConfig) -> Result<EngagementTable, LoadError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.is_empty() {
        return Err(LoadError::MissingHeader);
    }
    let positions = locate_columns(&headers, config.column_span)?;

    let mut engagements = Vec::new();
    for result in reader.records().take(config.max_rows) {
        let record = result?;
        engagements.push(row_from(&positions, |col| {
            record.get(col).unwrap_or("").to_string()
        }));
    }

    Ok(EngagementTable::from_rows(engagements))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file; the schema's leading fields play the role of headers.
///
/// Only the three required columns are decoded.
fn load_parquet(path: &Path, config: &LoaderConfig) -> Result<EngagementTable, LoadError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let positions = locate_columns(&headers, config.column_span)?;

    // Projected batches keep the file's column order, not the order of `positions`.
    let mut projected = positions;
    projected.sort_unstable();
    let slots = positions.map(|p| projected.partition_point(|&q| q < p));

    let mask = ProjectionMask::roots(builder.parquet_schema(), projected);
    let reader = builder.with_projection(mask).build()?;

    let mut engagements = Vec::new();
    'batches: for batch_result in reader {
        let batch = batch_result?;
        let columns: Vec<&ArrayRef> = slots.iter().map(|&i| batch.column(i)).collect();

        for row in 0..batch.num_rows() {
            if engagements.len() >= config.max_rows {
                break 'batches;
            }
            let supplier = arrow_cell(columns[0], row)?;
            let company = arrow_cell(columns[1], row)?;
            let product = arrow_cell(columns[2], row)?;
            engagements.push(Engagement::new(supplier, company, product));
        }
    }

    Ok(EngagementTable::from_rows(engagements))
}

fn arrow_cell(col: &ArrayRef, row: usize) -> Result<String, LoadError> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    Ok(array_value_to_string(col.as_ref(), row)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`).
///
/// JSON objects have no column order, so the required keys are looked up by
/// name; the first record must carry all three of them.
fn load_json(path: &Path, config: &LoaderConfig) -> Result<EngagementTable, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::InvalidStructure("expected top-level JSON array".into()))?;

    let first = records.first().ok_or(LoadError::MissingHeader)?;
    let first = first
        .as_object()
        .ok_or_else(|| LoadError::InvalidStructure("record 0 is not a JSON object".into()))?;
    for column in Column::ALL {
        if !first.contains_key(column.header()) {
            return Err(LoadError::MissingColumn {
                column: column.header(),
                span: config.column_span,
            });
        }
    }

    let mut engagements = Vec::with_capacity(records.len().min(config.max_rows));
    for (i, rec) in records.iter().take(config.max_rows).enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::InvalidStructure(format!("record {i} is not a JSON object")))?;
        let field = |column: Column| obj.get(column.header()).map(json_to_string).unwrap_or_default();
        engagements.push(Engagement::new(
            field(Column::Supplier),
            field(Column::Company),
            field(Column::Product),
        ));
    }

    Ok(EngagementTable::from_rows(engagements))
}

fn json_to_string(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
