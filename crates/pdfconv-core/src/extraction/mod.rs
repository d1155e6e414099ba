pub mod pdftotext;
pub mod table;

use crate::error::ConvertError;
use crate::model::Table;
use std::path::Path;

/// Lines of a page where a table was located, `start_line..end_line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRegion {
    pub page_number: usize,
    pub start_line: usize,
    pub end_line: usize,
}

/// Trait for PDF extraction backends.
pub trait PdfBackend {
    /// Name of this extraction backend (for diagnostics and error messages).
    fn backend_name(&self) -> &str;

    /// Whether the backend can be used in this environment.
    fn is_available(&self) -> bool;

    /// Install instructions shown when the backend is unavailable.
    fn install_hint(&self) -> &str;

    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, ConvertError>;
}

/// An opened document. Dropping it releases whatever the backend holds.
pub trait PdfDocument {
    fn page_count(&self) -> usize;

    /// Plain text of the page at zero-based `page_index`.
    fn page_text(&self, page_index: usize) -> Result<String, ConvertError>;

    /// Locate table regions on the page at zero-based `page_index`.
    fn find_tables(&self, page_index: usize) -> Result<Vec<TableRegion>, ConvertError>;

    fn extract_table(&self, region: &TableRegion) -> Result<Table, ConvertError>;
}
