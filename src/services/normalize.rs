/// Full-width comma that users paste from CJK input methods.
pub const FULLWIDTH_COMMA: char = '\u{FF0C}';

const BOM: char = '\u{FEFF}';

pub fn unify_commas(text: &str) -> String {
    text.replace(FULLWIDTH_COMMA, ",")
}

pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Removes one symmetric pair of `"` or `'` around `text` and trims what is left.
/// A lone or mismatched quote is left alone.
pub fn strip_quotes(text: &str) -> &str {
    if let Some(inner) = quoted_interior(text) {
        inner.trim()
    } else {
        text
    }
}

pub fn is_quoted(text: &str) -> bool {
    quoted_interior(text).is_some()
}

fn quoted_interior(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;

    if first != last || !matches!(first, '"' | '\'') {
        return None;
    }

    // both quotes are one byte wide
    Some(&text[1..text.len() - 1])
}

/// The pass every field gets before it is persisted. A field is written on one
/// line, so any line break inside it becomes a space.
pub fn normalize_field(text: &str) -> String {
    unify_commas(text)
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullwidth_comma_becomes_ascii() {
        assert_eq!(unify_commas("사과， apple"), "사과, apple");
    }

    #[test]
    fn bom_only_stripped_at_start() {
        assert_eq!(strip_bom("\u{FEFF}key, v"), "key, v");
        assert_eq!(strip_bom("key\u{FEFF}"), "key\u{FEFF}");
    }

    #[test]
    fn strips_matching_quote_pairs() {
        assert_eq!(strip_quotes("\" spaced \""), "spaced");
        assert_eq!(strip_quotes("'single'"), "single");
        assert_eq!(strip_quotes("\"\""), "");
    }

    #[test]
    fn leaves_unmatched_quotes() {
        assert_eq!(strip_quotes("\"open"), "\"open");
        assert_eq!(strip_quotes("close'"), "close'");
        assert_eq!(strip_quotes("\"mixed'"), "\"mixed'");
        assert_eq!(strip_quotes("\""), "\"");
    }

    #[test]
    fn normalize_field_trims_and_unifies() {
        assert_eq!(normalize_field("  a，b  "), "a,b");
    }

    #[test]
    fn normalize_field_flattens_line_breaks() {
        assert_eq!(normalize_field("1\ninjected, evil"), "1 injected, evil");
        assert_eq!(normalize_field("a\r\nb\rc\n"), "a b c");
    }
}
