//! Export of synthesized advisor names
//!
//! Curators review the placeholder records by hand, so the names go out as a
//! one-column CSV sheet in creation order.

use lineage_common::errors::Result;
use lineage_common::store::write_atomic;
use std::path::Path;

/// Header of the exported column
pub const NEW_NAMES_HEADER: &str = "name";

/// Render a single-column CSV sheet
pub fn render_names_csv(names: &[String]) -> String {
    let mut out = String::new();
    out.push_str(NEW_NAMES_HEADER);
    out.push('\n');
    for name in names {
        out.push_str(&csv_field(name));
        out.push('\n');
    }
    out
}

/// Write the synthesized names sheet
pub fn write_new_names(path: &Path, names: &[String]) -> Result<()> {
    write_atomic(path, render_names_csv(names).as_bytes())
}

fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
