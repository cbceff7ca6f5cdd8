use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::record::Record;
use crate::services::normalize;

// The key stops at the first separator; the value keeps any later commas.
static RECORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(?P<key>[^,]*),(?P<value>.*)$").expect("valid record regex"));

/// Parses one `key, value` line. Returns `None` for blank lines, comments,
/// lines without a separator and lines without a key.
pub fn parse(raw_line: &str) -> Option<Record> {
    let logical = normalize::strip_bom(raw_line.trim()).trim();

    if logical.is_empty() || logical.starts_with('#') {
        return None;
    }

    let line = normalize::unify_commas(logical);

    let caps = RECORD_RE.captures(&line)?;
    let key = normalize::strip_quotes(caps.name("key")?.as_str().trim());
    let value = normalize::strip_quotes(caps.name("value")?.as_str().trim());

    if key.is_empty() {
        log::trace!("skipping line without key: {raw_line:?}");
        return None;
    }

    Some(Record::new(key, value))
}

/// Parses every line of a decoded file, keeping file order and duplicates.
pub fn parse_all<I, S>(lines: I) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| parse(line.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_and_value() {
        assert_eq!(parse("hello, 안녕"), Some(Record::new("hello", "안녕")));
        assert_eq!(parse("  spaced ,   out  "), Some(Record::new("spaced", "out")));
    }

    #[test]
    fn skips_blank_comment_and_malformed_lines() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("# comment"), None);
        assert_eq!(parse("   # indented, comment"), None);
        assert_eq!(parse("novalueseparator"), None);
        assert_eq!(parse(", onlyvalue"), None);
        assert_eq!(parse(" , "), None);
    }

    #[test]
    fn splits_only_at_first_comma() {
        assert_eq!(parse("a,b,c"), Some(Record::new("a", "b,c")));
        assert_eq!(parse("k, one, two"), Some(Record::new("k", "one, two")));
    }

    #[test]
    fn value_may_be_empty() {
        assert_eq!(parse("lonely,"), Some(Record::new("lonely", "")));
    }

    #[test]
    fn fullwidth_comma_separates() {
        assert_eq!(parse("사과，apple"), Some(Record::new("사과", "apple")));
    }

    #[test]
    fn strips_quotes_per_half() {
        assert_eq!(
            parse("\" key \", 'value, with comma'"),
            Some(Record::new("key", "value, with comma"))
        );
        assert_eq!(parse("\"open, close'"), Some(Record::new("\"open", "close'")));
    }

    #[test]
    fn strips_leading_bom() {
        assert_eq!(parse("\u{FEFF}first, line"), Some(Record::new("first", "line")));
        assert_eq!(parse("\u{FEFF}# comment, too"), None);
    }

    #[test]
    fn parse_all_keeps_order_and_duplicates() {
        let text = "# header\nb, 2\n\na, 1\nb, 3\r\n";
        let records = parse_all(text.lines());
        assert_eq!(
            records,
            vec![
                Record::new("b", "2"),
                Record::new("a", "1"),
                Record::new("b", "3"),
            ]
        );
    }
}
