//! Return loading from delimited text files.
//!
//! Only the second column is read. Blank cells, `-` and `NaN` count as missing
//! and are dropped; a first row whose second cell is not numeric is treated as
//! a header.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tradesim_core::error::InputError;
use tradesim_core::model::ReturnSeries;

/// Zero-based index of the returns column
const RETURNS_COLUMN: usize = 1;

#[derive(Debug)]
pub enum LoadError {
    Io(String),
    Csv(String),
    Input(InputError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "IO error: {msg}"),
            LoadError::Csv(msg) => write!(f, "CSV error: {msg}"),
            LoadError::Input(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Input(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InputError> for LoadError {
    fn from(e: InputError) -> Self {
        LoadError::Input(e)
    }
}

/// `.tsv`/`.tab` files are tab separated, everything else comma separated
#[must_use]
pub fn delimiter_for(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("tsv" | "tab") => b'\t',
        _ => b',',
    }
}

pub fn load_returns(path: &Path) -> Result<ReturnSeries, LoadError> {
    let file = File::open(path)
        .map_err(|e| LoadError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let series = read_returns(file, delimiter_for(path))?;
    tracing::info!(
        path = %path.display(),
        periods = series.len(),
        "loaded return series"
    );
    Ok(series)
}

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || cell == "-" || cell.eq_ignore_ascii_case("nan")
}

/// Parse the returns column from any delimited reader
pub fn read_returns<R: Read>(reader: R, delimiter: u8) -> Result<ReturnSeries, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut max_columns = 0;
    let mut cells = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| LoadError::Csv(e.to_string()))?;
        max_columns = max_columns.max(record.len());

        let Some(cell) = record.get(RETURNS_COLUMN) else {
            cells.push(None);
            continue;
        };
        if is_missing(cell) {
            cells.push(None);
            continue;
        }
        match cell.parse::<f64>() {
            Ok(value) => cells.push(Some(value)),
            Err(_) if row == 0 => tracing::debug!(header = cell, "skipping header row"),
            Err(_) => {
                return Err(InputError::Parse(format!(
                    "row {}: {cell:?} is not a number",
                    row + 1
                ))
                .into());
            }
        }
    }

    if max_columns <= RETURNS_COLUMN {
        return Err(InputError::MissingColumn {
            columns: max_columns,
        }
        .into());
    }
    Ok(ReturnSeries::from_optional(cells)?)
}
