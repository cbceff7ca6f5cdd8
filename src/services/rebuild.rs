use crate::model::record::Record;
use crate::services::normalize;

/// Renders records as the on-disk `key, value` text, LF only, one line per record.
pub fn rebuild(records: &[Record]) -> String {
    let mut out = String::new();

    for r in records {
        out.push_str(&render_key(&r.key));
        out.push_str(", ");
        out.push_str(&render_value(&r.value));
        out.push('\n');
    }

    out
}

// A field already wrapped in a quote pair would lose that pair on the next read.
// A key starting with '#' would read back as a comment, and a leading BOM would be stripped.
fn render_key(key: &str) -> String {
    if normalize::is_quoted(key) || key.starts_with(['#', '\u{FEFF}']) {
        format!("\"{key}\"")
    } else {
        key.to_string()
    }
}

fn render_value(value: &str) -> String {
    if normalize::is_quoted(value) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}
