use crate::error::ConvertError;
use crate::extraction::{table, PdfBackend, PdfDocument, TableRegion};
use crate::model::Table;
use log::{debug, warn};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::Command;

pub const DEFAULT_PROGRAM: &str = "pdftotext";

const INSTALL_HINT: &str =
    "Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)";

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Page text comes from the default reading-order mode; tables are located in
/// a second `pdftotext -layout` pass, which preserves column alignment.
pub struct PdftotextBackend {
    program: PathBuf,
}

impl PdftotextBackend {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        PdftotextBackend {
            program: program.into(),
        }
    }

    fn run(&self, pdf_path: &Path, layout: bool) -> Result<String, ConvertError> {
        let mut cmd = Command::new(&self.program);
        if layout {
            cmd.arg("-layout");
        }
        cmd.arg("-enc")
            .arg("UTF-8")
            .arg(&*input_arg(pdf_path))
            .arg("-"); // output to stdout
        debug!("running {:?}", cmd);

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConvertError::PdftotextNotFound
            } else {
                ConvertError::Extraction(format!("pdftotext failed: {}", e))
            }
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            return Err(ConvertError::PdftotextFailed {
                code,
                stderr: stderr.trim().to_string(),
            });
        }
        if !stderr.trim().is_empty() {
            debug!("pdftotext: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for PdftotextBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBackend for PdftotextBackend {
    fn backend_name(&self) -> &str {
        "pdftotext"
    }

    /// `pdftotext -v` prints its version banner on stderr; older poppler
    /// releases exit non-zero while doing so.
    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    fn install_hint(&self) -> &str {
        INSTALL_HINT
    }

    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, ConvertError> {
        let meta = std::fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConvertError::FileNotFound(path.to_path_buf())
            } else {
                ConvertError::Io(e)
            }
        })?;
        if !meta.is_file() {
            return Err(ConvertError::NotAFile(path.to_path_buf()));
        }

        let text = self.run(path, false)?;
        let layout = match self.run(path, true) {
            Ok(layout) => Some(layout),
            Err(e) => {
                warn!("layout pass failed, tables disabled for {}: {e}", path.display());
                None
            }
        };

        let document = PdftotextDocument::from_output(&text, layout.as_deref());
        debug!(
            "opened {} ({} page(s))",
            path.display(),
            document.page_count()
        );
        Ok(Box::new(document))
    }
}

/// Output of one pdftotext run pair, split per page.
#[derive(Debug, Clone)]
pub struct PdftotextDocument {
    pages: Vec<String>,
    layout_pages: Option<Vec<String>>,
}

impl PdftotextDocument {
    pub fn from_output(text: &str, layout: Option<&str>) -> Self {
        PdftotextDocument {
            pages: split_pages(text),
            layout_pages: layout.map(split_pages),
        }
    }

    fn layout_lines(&self, page_index: usize) -> Result<Vec<&str>, ConvertError> {
        let layout_pages = self
            .layout_pages
            .as_ref()
            .ok_or_else(|| ConvertError::Extraction("layout text unavailable".into()))?;
        let page = layout_pages.get(page_index).ok_or_else(|| {
            ConvertError::Extraction(format!("no layout text for page {}", page_index + 1))
        })?;
        Ok(page.lines().collect())
    }
}

impl PdfDocument for PdftotextDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page_index: usize) -> Result<String, ConvertError> {
        self.pages.get(page_index).cloned().ok_or_else(|| {
            ConvertError::Extraction(format!("page {} out of range", page_index + 1))
        })
    }

    fn find_tables(&self, page_index: usize) -> Result<Vec<TableRegion>, ConvertError> {
        let lines = self.layout_lines(page_index)?;
        Ok(table::find_table_regions(page_index + 1, &lines))
    }

    fn extract_table(&self, region: &TableRegion) -> Result<Table, ConvertError> {
        let page_index = region
            .page_number
            .checked_sub(1)
            .ok_or_else(|| ConvertError::Table("page numbers start at 1".into()))?;
        let lines = self.layout_lines(page_index)?;
        table::extract_table(region, &lines)
    }
}

/// poppler reads any argument starting with `-` as an option, so relative
/// paths like `-report.pdf` are passed as `./-report.pdf`.
fn input_arg(path: &Path) -> Cow<'_, Path> {
    if path.is_relative() && path.as_os_str().to_string_lossy().starts_with('-') {
        Cow::Owned(Path::new(".").join(path))
    } else {
        Cow::Borrowed(path)
    }
}

/// Split pdftotext output into pages. Every page is terminated by a form
/// feed (`\x0c`), so one trailing form feed is dropped first.
pub fn split_pages(text: &str) -> Vec<String> {
    text.strip_suffix('\x0c')
        .unwrap_or(text)
        .split('\x0c')
        .map(|page| page.to_string())
        .collect()
}
