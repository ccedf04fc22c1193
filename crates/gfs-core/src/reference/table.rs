//! Reference table loaded from a CSV export or the workbook itself.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{Reader, open_workbook_auto_from_rs};
use csv::{ReaderBuilder, Trim};
use tracing::{debug, info, warn};

use crate::error::ReferenceError;
use crate::invoice::ReferenceLookup;
use crate::models::config::ReferenceConfig;
use crate::models::record::GlAccount;

/// Item code to GL account table, read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<String, GlAccount>,
}

impl ReferenceTable {
    /// Build a table in memory. On duplicate codes the first entry wins.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, GlAccount)>,
        K: Into<String>,
    {
        let mut table = Self::default();
        for (code, account) in entries {
            table.insert(code.into(), account);
        }
        table
    }

    /// Load the table from a file using the configured column names.
    ///
    /// Spreadsheet extensions are read from their first worksheet; anything
    /// else is parsed as CSV.
    pub fn from_path(path: &Path, config: &ReferenceConfig) -> Result<Self, ReferenceError> {
        let table = if is_workbook(path) {
            Self::from_workbook(path, config)?
        } else {
            let file = File::open(path).map_err(|source| ReferenceError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_reader(file, config)?
        };

        info!("Loaded {} reference entries from {}", table.len(), path.display());
        Ok(table)
    }

    /// Load the table from any CSV source.
    pub fn from_reader<R: Read>(reader: R, config: &ReferenceConfig) -> Result<Self, ReferenceError> {
        let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers: Vec<String> = csv.headers()?.iter().map(str::to_string).collect();
        let columns = Columns::locate(&headers, config)?;

        let mut table = Self::default();
        for row in csv.records() {
            let row = row?;
            table.insert_row(&columns, |idx| row.get(idx).unwrap_or_default().to_string());
        }

        debug!("Reference table has {} entries", table.len());
        Ok(table)
    }

    /// Load the table from the first worksheet of an xlsx, xlsm, xlsb, xls or ods file.
    pub fn from_workbook(path: &Path, config: &ReferenceConfig) -> Result<Self, ReferenceError> {
        let data = std::fs::read(path).map_err(|source| ReferenceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ReferenceError::NoWorksheet(path.to_path_buf()))??;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|cells| cells.iter().map(|c| c.to_string().trim().to_string()).collect())
            .unwrap_or_default();
        let columns = Columns::locate(&headers, config)?;

        let mut table = Self::default();
        for cells in rows {
            table.insert_row(&columns, |idx| {
                cells.get(idx).map(|c| c.to_string()).unwrap_or_default()
            });
        }

        debug!("Reference workbook has {} entries", table.len());
        Ok(table)
    }

    /// Number of distinct item codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_row<F>(&mut self, columns: &Columns, cell: F)
    where
        F: Fn(usize) -> String,
    {
        let code = normalize_item_code(&cell(columns.item_code));
        if code.is_empty() {
            return;
        }

        let account = GlAccount::new(
            normalize_item_code(&cell(columns.gl_code)),
            cell(columns.gl_description).trim(),
        );
        self.insert(code, account);
    }

    fn insert(&mut self, code: String, account: GlAccount) {
        if self.entries.contains_key(&code) {
            warn!("Duplicate item code {} in reference table, keeping first", code);
            return;
        }
        self.entries.insert(code, account);
    }
}

impl ReferenceLookup for ReferenceTable {
    fn lookup(&self, item_code: &str) -> Option<&GlAccount> {
        self.entries.get(item_code)
    }
}

/// Header positions of the three columns the table needs.
struct Columns {
    item_code: usize,
    gl_code: usize,
    gl_description: usize,
}

impl Columns {
    fn locate(headers: &[String], config: &ReferenceConfig) -> Result<Self, ReferenceError> {
        Ok(Self {
            item_code: column_index(headers, &config.item_code_column)?,
            gl_code: column_index(headers, &config.gl_code_column)?,
            gl_description: column_index(headers, &config.gl_description_column)?,
        })
    }
}

fn column_index(headers: &[String], name: &str) -> Result<usize, ReferenceError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ReferenceError::MissingColumn(name.to_string()))
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "xlsx" | "xlsm" | "xlsb" | "xls" | "ods"
            )
        })
        .unwrap_or(false)
}

/// Coerce a spreadsheet cell to an item code string.
///
/// Numeric cells exported as floats (`123456.0`) lose the `.0`.
pub fn normalize_item_code(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_suffix(".0") {
        Some(integer) if !integer.is_empty() && integer.bytes().all(|b| b.is_ascii_digit()) => {
            integer.to_string()
        }
        _ => trimmed.to_string(),
    }
}
