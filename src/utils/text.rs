/// Removes angle-bracket markup. Brackets are not validated: an empty pair or
/// an unmatched `<` is left in place, matching the source data's loose HTML.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('>') {
            Some(end) if end > 0 => rest = &after[end + 1..],
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Cleans one raw CSV cell: strips markup, collapses interior whitespace when
/// the value is single-line, and localizes bare boolean tokens.
pub fn normalize(raw: &str) -> String {
    let mut cleaned = strip_tags(raw);
    if !cleaned.contains('\n') {
        cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    }
    match cleaned.as_str() {
        "True" => "Да".to_string(),
        "False" => "Нет".to_string(),
        _ => cleaned,
    }
}

/// Parses a localized yes/no token produced by `normalize`.
pub fn parse_yes_no(value: &str) -> Option<bool> {
    match value {
        "Да" => Some(true),
        "Нет" => Some(false),
        _ => None,
    }
}

/// Drops a leading UTF-8 byte-order marker, which HH exports carry.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup() {
        assert_eq!(normalize("<div>Файл</div>"), "Файл");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(normalize("qwerty"), "qwerty");
    }

    #[test]
    fn collapses_single_line_whitespace() {
        assert_eq!(normalize("AA          AAA"), "AA AAA");
        assert_eq!(normalize("  padded  "), "padded");
    }

    #[test]
    fn multiline_values_keep_their_line_structure() {
        assert_eq!(normalize("Python\nSQL  x\nGit"), "Python\nSQL  x\nGit");
    }

    #[test]
    fn localizes_boolean_tokens() {
        assert_eq!(normalize("True"), "Да");
        assert_eq!(normalize("False"), "Нет");
        assert_eq!(normalize("Truely"), "Truely");
    }

    #[test]
    fn unmatched_bracket_is_kept() {
        assert_eq!(normalize("a < b"), "a < b");
        assert_eq!(normalize("a <> b"), "a <> b");
        assert_eq!(normalize("a <b>c"), "a c");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in [
            "<div>Файл</div>",
            "AA          AAA",
            "True",
            "a < b and c > d",
            "Python\nSQL\nGit",
            "",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }
}
