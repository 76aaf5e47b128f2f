// Row tokenizer: splits the body of one VALUES tuple on top-level commas.
// Quotes are tracked so commas inside strings never split a field. Escape
// pairs are passed through untouched; unescaping happens in parse_value.

use crate::parser::value::parse_value;
use crate::parser::SqlValue;

#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedRow {
    pub values: Vec<SqlValue>,
    // The scan ended inside a quoted string.
    pub unbalanced: bool,
}

// Split a tuple body into trimmed raw literals. The flag reports an
// unterminated quote; the split is still returned best-effort.
pub fn split_literals(row: &str) -> (Vec<&str>, bool) {
    let bytes = row.as_bytes();
    let mut literals = Vec::new();
    let mut start = 0usize;
    let mut in_quote = false;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => {
                i += 2;
                continue;
            }
            b'\'' => in_quote = !in_quote,
            b',' if !in_quote => {
                literals.push(row[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    let tail = row[start..].trim();
    if !tail.is_empty() {
        literals.push(tail);
    }
    (literals, in_quote)
}

pub fn tokenize_row(row: &str) -> TokenizedRow {
    let (literals, unbalanced) = split_literals(row);
    TokenizedRow {
        values: literals.into_iter().map(parse_value).collect(),
        unbalanced,
    }
}
