use pdfconv_core::error::ConvertError;
use serde::Serialize;
use std::io::Write;

/// Write `value` as a single line of JSON. serde_json leaves non-ASCII
/// characters unescaped and escapes embedded newlines, so the output is
/// always exactly one line.
pub fn write_line<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<(), ConvertError> {
    let json = serde_json::to_string(value)?;
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}
