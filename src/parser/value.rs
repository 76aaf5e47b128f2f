// Literal typing: turns one raw SQL literal into a SqlValue.
// Every input produces a value; anything that is neither NULL, a quoted
// string nor a number comes back as text.

use crate::parser::SqlValue;

pub fn parse_value(raw: &str) -> SqlValue {
    let raw = raw.trim();
    if raw == "NULL" {
        return SqlValue::Null;
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return SqlValue::Text(unescape(&raw[1..raw.len() - 1]));
    }

    let number = if raw.contains('.') {
        // Overflow to infinity would serialize as null; keep the literal instead.
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(SqlValue::Float)
    } else {
        raw.parse::<i64>().ok().map(SqlValue::Integer)
    };
    number.unwrap_or_else(|| SqlValue::Text(raw.to_string()))
}

// Resolve the two escape units MySQL dumps emit inside strings: \' and \\.
// Any other backslash pair is kept verbatim.
fn unescape(inner: &str) -> String {
    if !inner.contains('\\') {
        return inner.to_string();
    }
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_exact_and_case_sensitive() {
        assert_eq!(parse_value("NULL"), SqlValue::Null);
        assert_eq!(parse_value("  NULL \n"), SqlValue::Null);
        assert_eq!(parse_value("null"), SqlValue::Text("null".into()));
    }

    #[test]
    fn quoted_strings_are_unescaped() {
        assert_eq!(parse_value(r"'O\'Brien'"), SqlValue::Text("O'Brien".into()));
        assert_eq!(parse_value(r"'Q1\\Pack'"), SqlValue::Text(r"Q1\Pack".into()));
        assert_eq!(parse_value("''"), SqlValue::Text(String::new()));
        assert_eq!(parse_value("'A,B'"), SqlValue::Text("A,B".into()));
    }

    #[test]
    fn unknown_escapes_and_trailing_backslash_are_kept() {
        assert_eq!(parse_value(r"'a\nb'"), SqlValue::Text(r"a\nb".into()));
        assert_eq!(parse_value(r"'end\'"), SqlValue::Text(r"end\".into()));
        assert_eq!(unescape(r"tail\"), r"tail\");
    }

    #[test]
    fn integers_stay_integers() {
        assert_eq!(parse_value("42"), SqlValue::Integer(42));
        assert_eq!(parse_value("-7"), SqlValue::Integer(-7));
        assert_eq!(parse_value("0"), SqlValue::Integer(0));
    }

    #[test]
    fn decimal_point_means_float() {
        assert_eq!(parse_value("3.50"), SqlValue::Float(3.5));
        assert_eq!(parse_value("2.5"), SqlValue::Float(2.5));
        assert_eq!(parse_value("-0.25"), SqlValue::Float(-0.25));
        assert_eq!(parse_value("1.5e3"), SqlValue::Float(1500.0));
    }

    #[test]
    fn unparseable_numbers_fall_back_to_text() {
        assert_eq!(parse_value("1.2.3"), SqlValue::Text("1.2.3".into()));
        assert_eq!(parse_value("CURRENT_TIMESTAMP"), SqlValue::Text("CURRENT_TIMESTAMP".into()));
        assert_eq!(parse_value("1,000"), SqlValue::Text("1,000".into()));
        assert_eq!(parse_value(""), SqlValue::Text(String::new()));
        assert_eq!(parse_value("'"), SqlValue::Text("'".into()));
        // Out of f64 / i64 range.
        assert_eq!(parse_value("1.0e999"), SqlValue::Text("1.0e999".into()));
        assert_eq!(parse_value("-1.0e999"), SqlValue::Text("-1.0e999".into()));
        assert_eq!(
            parse_value("99999999999999999999"),
            SqlValue::Text("99999999999999999999".into())
        );
    }
}
