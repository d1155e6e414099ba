pub mod error;
pub mod extraction;
pub mod model;

use error::ConvertError;
use extraction::{PdfBackend, PdfDocument};
use log::debug;
use model::{DocumentResult, ExtractedDocument, PageResult, Table};
use std::path::Path;

/// Check once, before any document work, that the backend can run.
pub fn ensure_available(backend: &dyn PdfBackend) -> Result<(), ConvertError> {
    if backend.is_available() {
        Ok(())
    } else {
        Err(ConvertError::BackendUnavailable {
            backend: backend.backend_name().to_string(),
            hint: backend.install_hint().to_string(),
        })
    }
}

/// Main API entry point: convert a PDF into a [`DocumentResult`].
///
/// Document-level errors become the failure variant; this never fails.
pub fn convert_pdf(path: &Path, backend: &dyn PdfBackend) -> DocumentResult {
    match extract_document(path, backend) {
        Ok(doc) => DocumentResult::Success(doc),
        Err(e) => {
            debug!("conversion of {} failed: {e}", path.display());
            DocumentResult::Failure {
                error: e.to_string(),
            }
        }
    }
}

/// Open the document and extract text and tables page by page.
///
/// A failing page text is a document error. Table finding and extraction
/// failures only cost that page (or that table) its tables.
pub fn extract_document(
    path: &Path,
    backend: &dyn PdfBackend,
) -> Result<ExtractedDocument, ConvertError> {
    let document = backend.open(path)?;
    debug!(
        "{}: {} page(s) via {}",
        path.display(),
        document.page_count(),
        backend.backend_name()
    );

    let mut pages = Vec::with_capacity(document.page_count());
    for page_index in 0..document.page_count() {
        let text = document.page_text(page_index)?.trim().to_string();
        let tables = page_tables(&*document, page_index);
        pages.push(PageResult {
            page_number: page_index + 1,
            text,
            tables,
        });
    }
    drop(document);

    Ok(ExtractedDocument {
        total_pages: pages.len(),
        full_text: full_text(&pages),
        pages,
    })
}

/// Join the non-empty page texts with a blank line, in page order.
pub fn full_text(pages: &[PageResult]) -> String {
    pages
        .iter()
        .filter(|p| !p.text.is_empty())
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn page_tables(document: &dyn PdfDocument, page_index: usize) -> Vec<Table> {
    let regions = match document.find_tables(page_index) {
        Ok(regions) => regions,
        Err(e) => {
            debug!("page {}: no tables ({e})", page_index + 1);
            return Vec::new();
        }
    };

    regions
        .iter()
        .filter_map(|region| match document.extract_table(region) {
            Ok(table) if !table.is_empty() => Some(table),
            Ok(_) => None,
            Err(e) => {
                debug!(
                    "page {}: skipping table at line {} ({e})",
                    page_index + 1,
                    region.start_line
                );
                None
            }
        })
        .collect()
}
