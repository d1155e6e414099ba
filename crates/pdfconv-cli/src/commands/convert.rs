use log::debug;
use pdfconv_core::error::ConvertError;
use pdfconv_core::extraction::PdfBackend;
use pdfconv_core::model::BootstrapError;
use std::io::Write;
use std::path::Path;

use crate::output;

/// Kept verbatim: callers that shelled out to the old converter script match
/// on this message.
pub const USAGE: &str = "Usage: python pdf_converter.py <path_to_pdf>";

/// Convert `input_file` and write the JSON result to `out`.
///
/// A missing argument is reported before the backend is probed, so with no
/// argument and no backend the usage error wins.
///
/// Returns the process exit code: 1 for usage or missing-backend errors,
/// 0 otherwise (document failures are reported inside the JSON).
pub fn run(
    input_file: Option<&Path>,
    backend: &dyn PdfBackend,
    out: &mut dyn Write,
) -> Result<i32, ConvertError> {
    let Some(input_file) = input_file else {
        return usage(out);
    };

    if let Err(e) = pdfconv_core::ensure_available(backend) {
        output::json::write_line(out, &BootstrapError::new(e.to_string()))?;
        return Ok(1);
    }

    let result = pdfconv_core::convert_pdf(input_file, backend);
    debug!(
        "{}: success={}",
        input_file.display(),
        result.is_success()
    );
    output::json::write_line(out, &result)?;
    Ok(0)
}

pub fn usage(out: &mut dyn Write) -> Result<i32, ConvertError> {
    output::json::write_line(out, &BootstrapError::new(USAGE))?;
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfconv_core::extraction::{PdfDocument, TableRegion};
    use pdfconv_core::model::Table;
    use serde_json::{json, Value};

    struct StubBackend {
        available: bool,
    }

    struct StubDocument;

    impl PdfBackend for StubBackend {
        fn backend_name(&self) -> &str {
            "pdftotext"
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn install_hint(&self) -> &str {
            "Install poppler."
        }

        fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, ConvertError> {
            if !path.exists() {
                return Err(ConvertError::FileNotFound(path.to_path_buf()));
            }
            Ok(Box::new(StubDocument))
        }
    }

    impl PdfDocument for StubDocument {
        fn page_count(&self) -> usize {
            2
        }

        fn page_text(&self, page_index: usize) -> Result<String, ConvertError> {
            Ok(["Ärende 1\n", " "][page_index].to_string())
        }

        fn find_tables(&self, _page_index: usize) -> Result<Vec<TableRegion>, ConvertError> {
            Err(ConvertError::Extraction("no layout".into()))
        }

        fn extract_table(&self, _region: &TableRegion) -> Result<Table, ConvertError> {
            unreachable!("find_tables never returns regions")
        }
    }

    fn run_to_string(input: Option<&Path>, available: bool) -> (i32, String) {
        let mut out = Vec::new();
        let code = run(input, &StubBackend { available }, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn missing_argument_prints_usage() {
        let (code, out) = run_to_string(None, true);
        assert_eq!(code, 1);
        assert_eq!(
            out,
            "{\"error\":\"Usage: python pdf_converter.py <path_to_pdf>\"}\n"
        );
    }

    #[test]
    fn unavailable_backend_is_a_bootstrap_error() {
        let (code, out) = run_to_string(Some(Path::new("missing.pdf")), false);
        assert_eq!(code, 1);
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v, json!({"error": "pdftotext not installed. Install poppler."}));
    }

    #[test]
    fn usage_error_wins_over_missing_backend() {
        let (code, out) = run_to_string(None, false);
        assert_eq!(code, 1);
        assert!(out.contains(USAGE));
    }

    #[test]
    fn hyphen_path_is_opened_not_rejected() {
        let (code, out) = run_to_string(Some(Path::new("-missing-report.pdf")), true);
        assert_eq!(code, 0);
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            v,
            json!({"success": false, "error": "no such file: '-missing-report.pdf'"})
        );
    }

    #[test]
    fn nonexistent_file_exits_zero_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.pdf");
        let (code, out) = run_to_string(Some(path.as_path()), true);

        assert_eq!(code, 0);
        assert_eq!(out.lines().count(), 1);
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["success"], Value::Bool(false));
        assert!(v["error"].as_str().unwrap().starts_with("no such file"));
    }

    #[test]
    fn success_is_one_line_with_literal_non_ascii() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let (code, out) = run_to_string(Some(file.path()), true);

        assert_eq!(code, 0);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("Ärende 1"));

        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["success"], Value::Bool(true));
        assert_eq!(v["totalPages"], 2);
        assert_eq!(v["fullText"], "Ärende 1");
        assert_eq!(v["pages"][1]["text"], "");
        assert_eq!(v["pages"][0]["tables"], json!([]));
    }
}
