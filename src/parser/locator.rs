// Row locator: walks the VALUES lists of a table's INSERT statements and
// yields the body of each parenthesized tuple.
//
// Two strategies:
// - Balanced tracks parenthesis depth plus quote/escape state, so a tuple
//   ends only at its matching `)` outside quotes.
// - LeadingInteger matches `(<digits>,...)` up to the first `)` followed by
//   `,` or `;`. Tuples whose first field is not an unsigned integer are
//   skipped, and `),` inside a string ends a tuple early.

use regex::{CaptureMatches, Regex};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LocatorMode {
    #[default]
    Balanced,
    LeadingInteger,
}

// Tuple body without the enclosing parentheses, plus the byte offset in the
// dump just past its closing `)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRow<'a> {
    pub body: &'a str,
    pub end: usize,
}

pub struct RowLocator<'a> {
    inner: Strategy<'a>,
}

enum Strategy<'a> {
    Balanced(BalancedScanner<'a>),
    LeadingInteger {
        base: usize,
        matches: CaptureMatches<'static, 'a>,
    },
    Empty,
}

fn leading_integer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\(([0-9]+,.*?)\)(?:,|;)").expect("valid leading integer row regex")
    })
}

impl<'a> RowLocator<'a> {
    // `values_offsets` are the positions just past each statement's VALUES
    // keyword, in ascending order.
    pub fn new(text: &'a str, values_offsets: &[usize], mode: LocatorMode) -> Self {
        let inner = match (mode, values_offsets.first()) {
            (_, None) => Strategy::Empty,
            (LocatorMode::LeadingInteger, Some(&first)) => Strategy::LeadingInteger {
                base: first,
                matches: leading_integer_re().captures_iter(&text[first..]),
            },
            (LocatorMode::Balanced, Some(_)) => {
                Strategy::Balanced(BalancedScanner::new(text, values_offsets.to_vec()))
            }
        };
        Self { inner }
    }
}

impl<'a> Iterator for RowLocator<'a> {
    type Item = RawRow<'a>;

    fn next(&mut self) -> Option<RawRow<'a>> {
        match &mut self.inner {
            Strategy::Balanced(scanner) => scanner.next(),
            Strategy::LeadingInteger { base, matches } => {
                let cap = matches.next()?;
                let body = cap.get(1)?;
                let past_close = cap.get(0)?.end() - 1;
                Some(RawRow {
                    body: body.as_str(),
                    end: *base + past_close,
                })
            }
            Strategy::Empty => None,
        }
    }
}

struct BalancedScanner<'a> {
    text: &'a str,
    offsets: std::vec::IntoIter<usize>,
    // Position inside the current statement, None between statements.
    pos: Option<usize>,
    // Furthest byte already scanned; statements starting before it are
    // already consumed.
    scanned_to: usize,
}

impl<'a> BalancedScanner<'a> {
    fn new(text: &'a str, offsets: Vec<usize>) -> Self {
        Self {
            text,
            offsets: offsets.into_iter(),
            pos: None,
            scanned_to: 0,
        }
    }

    fn next_statement(&mut self) -> Option<usize> {
        loop {
            let offset = self.offsets.next()?;
            if offset >= self.scanned_to {
                return Some(offset);
            }
            tracing::debug!(offset, "LocateRows: statement overlaps previous scan, skipped");
        }
    }

    fn next(&mut self) -> Option<RawRow<'a>> {
        loop {
            let start = match self.pos {
                Some(p) => p,
                None => self.next_statement()?,
            };
            match self.scan_tuple(start) {
                Some(row) => return Some(row),
                None => self.pos = None,
            }
        }
    }

    // Scan from `start` for the next top-level tuple of this statement.
    // Returns None once the statement's VALUES list ends.
    fn scan_tuple(&mut self, start: usize) -> Option<RawRow<'a>> {
        let bytes = self.text.as_bytes();
        let mut depth = 0usize;
        let mut tuple_start = 0usize;
        let mut in_single = false;
        let mut in_double = false;
        let mut escape = false;
        let mut i = start;

        while i < bytes.len() {
            let c = bytes[i];
            i += 1;

            if depth == 0 {
                match c {
                    b'(' => {
                        depth = 1;
                        tuple_start = i;
                    }
                    b',' => {}
                    c if c.is_ascii_whitespace() => {}
                    _ => {
                        // `;` or anything else ends the VALUES list.
                        self.scanned_to = i;
                        return None;
                    }
                }
                continue;
            }

            if escape {
                escape = false;
                continue;
            }
            match c {
                b'\\' => escape = true,
                b'\'' if !in_double => in_single = !in_single,
                b'"' if !in_single => in_double = !in_double,
                b'(' if !in_single && !in_double => depth += 1,
                b')' if !in_single && !in_double => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos = Some(i);
                        self.scanned_to = i;
                        return Some(RawRow {
                            body: &self.text[tuple_start..i - 1],
                            end: i,
                        });
                    }
                }
                _ => {}
            }
        }

        self.scanned_to = bytes.len();
        if depth > 0 {
            tracing::debug!(offset = tuple_start, "LocateRows: unterminated tuple at end of input");
            // Flush the partial tuple; the caller's shape check decides its fate.
            self.pos = Some(bytes.len());
            return Some(RawRow {
                body: &self.text[tuple_start..],
                end: bytes.len(),
            });
        }
        None
    }
}
