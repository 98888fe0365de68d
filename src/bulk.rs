use std::io::{Cursor, Write};
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use log::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::color::Color;
use crate::error::{Error, QrResult};
use crate::pipeline::QrRequest;
use crate::render::DEFAULT_MODULE_SIZE;

/// Column headers every dataset must carry, matched case-sensitively.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Name", "URL", "Category"];

// Dataset
//------------------------------------------------------------------------------

/// One spreadsheet row: a link to encode plus the name and category that
/// place it inside the archive as `<Category>/<Name>.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRow {
    pub name: String,
    pub url: String,
    pub category: String,
}

impl BulkRow {
    pub fn new(name: &str, url: &str, category: &str) -> Self {
        Self { name: name.to_string(), url: url.to_string(), category: category.to_string() }
    }

    /// Archive-internal path for this row's image, sanitized.
    pub fn archive_path(&self) -> String {
        format!("{}/{}.png", sanitize(&self.category), sanitize(&self.name))
    }
}

/// Maps a name or category cell to a safe archive path segment: spaces become
/// underscores (as the filenames always have), and path separators or all-dot
/// segments are neutralized so a hostile cell cannot escape its directory.
fn sanitize(segment: &str) -> String {
    let sanitized: String = segment
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() || sanitized.bytes().all(|b| b == b'.') {
        return "_".to_string();
    }
    sanitized
}

/// An ordered set of [`BulkRow`]s, schema-validated at construction.
#[derive(Debug, Clone, Default)]
pub struct BulkDataset {
    rows: Vec<BulkRow>,
}

impl BulkDataset {
    pub fn from_rows(rows: Vec<BulkRow>) -> Self {
        Self { rows }
    }

    /// Reads the first sheet of an .xlsx workbook. The header row must
    /// contain every column in [`REQUIRED_COLUMNS`] (extra columns are
    /// ignored); otherwise the whole dataset is rejected with
    /// [`Error::Schema`] and no rows are produced.
    pub fn from_xlsx_bytes(bytes: &[u8]) -> QrResult<Self> {
        let mut workbook = Xlsx::new(Cursor::new(bytes)).map_err(Error::Workbook)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(missing_all_columns)?
            .map_err(Error::Workbook)?;

        let mut rows = range.rows();
        let header = rows.next().ok_or_else(missing_all_columns)?;
        let [name, url, category] = column_indices(header)?;

        let rows = rows
            .filter(|cells| !cells.iter().all(|c| matches!(c, Data::Empty)))
            .map(|cells| BulkRow {
                name: cell_text(cells, name),
                url: cell_text(cells, url),
                category: cell_text(cells, category),
            })
            .collect();

        Ok(Self { rows })
    }

    pub fn from_xlsx_path<P: AsRef<Path>>(path: P) -> QrResult<Self> {
        let bytes = std::fs::read(path).map_err(Error::Io)?;
        Self::from_xlsx_bytes(&bytes)
    }

    pub fn rows(&self) -> &[BulkRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn missing_all_columns() -> Error {
    Error::Schema { missing: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect() }
}

/// Locates the required columns in the header row, collecting every absent
/// one into a single schema error.
fn column_indices(header: &[Data]) -> QrResult<[usize; 3]> {
    let mut indices = [0usize; 3];
    let mut missing = Vec::new();

    for (column, index) in REQUIRED_COLUMNS.iter().zip(indices.iter_mut()) {
        match header.iter().position(|cell| cell_str(cell) == *column) {
            Some(i) => *index = i,
            None => missing.push(column.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(Error::Schema { missing })
    }
}

fn cell_str(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_text(cells: &[Data], index: usize) -> String {
    cells.get(index).map(cell_str).unwrap_or_default()
}

// Bulk pipeline
//------------------------------------------------------------------------------

/// Rendering options shared by every row of a bulk run.
#[derive(Debug, Clone)]
pub struct BulkOptions {
    pub foreground: Color,
    pub background: Color,
    pub logo: Option<Vec<u8>>,
    pub module_sz: u32,
}

impl Default for BulkOptions {
    fn default() -> Self {
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
            logo: None,
            module_sz: DEFAULT_MODULE_SIZE,
        }
    }
}

/// A finished bulk run: deflate-compressed ZIP bytes plus the number of
/// images inside.
#[derive(Debug, Clone)]
pub struct BulkArchive {
    pub bytes: Vec<u8>,
    pub count: usize,
}

/// Runs the single-item pipeline for every dataset row and packages the
/// results into one in-memory ZIP at `<Category>/<Name>.png`, preserving row
/// order. The first failing row aborts the whole run with [`Error::Row`];
/// no partial archive is returned and the staging buffer is dropped.
pub fn run(dataset: &BulkDataset, options: &BulkOptions) -> QrResult<BulkArchive> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let entry_options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0;
    for (index, row) in dataset.rows().iter().enumerate() {
        let png = render_row(row, options).map_err(|e| Error::row(index, e))?;

        let path = row.archive_path();
        debug!("staging {path} ({} bytes)", png.len());
        writer.start_file(path, entry_options).map_err(Error::Archive)?;
        writer.write_all(&png).map_err(Error::Io)?;
        count += 1;
    }

    let staged = writer.finish().map_err(Error::Archive)?;
    info!("bulk run complete: {count} images archived");

    Ok(BulkArchive { bytes: staged.into_inner(), count })
}

fn render_row(row: &BulkRow, options: &BulkOptions) -> QrResult<Vec<u8>> {
    let mut request = QrRequest::new(&row.url);
    request
        .foreground(options.foreground)
        .background(options.background)
        .module_size(options.module_sz);
    if let Some(logo) = &options.logo {
        request.logo(logo);
    }
    request.png()
}

#[cfg(test)]
mod schema_tests {
    use calamine::Data;

    use super::column_indices;
    use crate::error::Error;

    fn header(columns: &[&str]) -> Vec<Data> {
        columns.iter().map(|c| Data::String(c.to_string())).collect()
    }

    #[test]
    fn test_columns_located_in_any_order() {
        let header = header(&["Category", "URL", "Notes", "Name"]);
        assert_eq!(column_indices(&header).unwrap(), [3, 1, 0]);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let header = header(&["name", "url", "category"]);
        match column_indices(&header) {
            Err(Error::Schema { missing }) => assert_eq!(missing, ["Name", "URL", "Category"]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_single_missing_column_reported() {
        let header = header(&["Name", "Link", "Category"]);
        match column_indices(&header) {
            Err(Error::Schema { missing }) => assert_eq!(missing, ["URL"]),
            other => panic!("expected schema error, got {other:?}"),
        }
    }
}

#[cfg(test)]
mod sanitize_tests {
    use test_case::test_case;

    use super::{sanitize, BulkRow};

    #[test_case("Coffee Shop", "Coffee_Shop"; "spaces")]
    #[test_case("My  Site", "My__Site"; "consecutive spaces")]
    #[test_case("Food", "Food"; "untouched")]
    #[test_case("a/b", "a_b"; "forward slash")]
    #[test_case("a\\b", "a_b"; "backslash")]
    #[test_case("..", "_"; "dot dot")]
    #[test_case(".", "_"; "single dot")]
    #[test_case("", "_"; "empty")]
    #[test_case("   ", "_"; "blank")]
    #[test_case("../../etc/passwd", ".._.._etc_passwd"; "traversal attempt")]
    fn test_sanitize(raw: &str, expected: &str) {
        assert_eq!(sanitize(raw), expected);
    }

    #[test]
    fn test_archive_path() {
        let row = BulkRow::new("Coffee Shop", "https://example.com/coffee", "Food & Drink");
        assert_eq!(row.archive_path(), "Food_&_Drink/Coffee_Shop.png");
    }
}
