use rc_core::{ConversionError, RedirectTable};

/// Serialize a table as a pretty-printed JSON array in evaluation order.
pub fn build_table_json(table: &RedirectTable) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(table)?;
    out.push('\n');
    Ok(out)
}

/// Serialize verification findings as a JSON array.
pub fn build_report_json(errors: &[ConversionError]) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(errors)?;
    out.push('\n');
    Ok(out)
}
