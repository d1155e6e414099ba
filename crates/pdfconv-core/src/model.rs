use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// A table as rows of cell strings. Row lengths are whatever the backend
/// produced; callers must not assume a rectangular shape.
pub type Table = Vec<Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub page_number: usize,
    pub text: String,
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub total_pages: usize,
    pub full_text: String,
    pub pages: Vec<PageResult>,
}

/// Outcome of converting one document. Serializes to
/// `{"success": true, "totalPages", "fullText", "pages"}` or
/// `{"success": false, "error"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentResult {
    Success(ExtractedDocument),
    Failure { error: String },
}

impl DocumentResult {
    pub fn is_success(&self) -> bool {
        matches!(self, DocumentResult::Success(_))
    }
}

impl Serialize for DocumentResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocumentResult::Success(doc) => {
                let mut s = serializer.serialize_struct("DocumentResult", 4)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("totalPages", &doc.total_pages)?;
                s.serialize_field("fullText", &doc.full_text)?;
                s.serialize_field("pages", &doc.pages)?;
                s.end()
            }
            DocumentResult::Failure { error } => {
                let mut s = serializer.serialize_struct("DocumentResult", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
                s.end()
            }
        }
    }
}

/// Emitted instead of a [`DocumentResult`] when the tool cannot start work:
/// bad usage or a missing extraction backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapError {
    pub error: String,
}

impl BootstrapError {
    pub fn new(error: impl Into<String>) -> Self {
        BootstrapError {
            error: error.into(),
        }
    }
}
