// line-level parsing of the hand-edited trick list
use std::fmt;

use crate::catalog::document::TrickParameters;

pub const COMMENT_PREFIX: char = '#';
pub const MIN_FIELDS: usize = 5;

/// One parsed input line, before alias extraction.
///
/// The four numeric fields must fit in an `i32`; anything wider (e.g.
/// `3000000000`) is skipped as [`SkipReason::BadInteger`]. Catalog-space
/// geometry is `i64`, so every accepted value mirrors without overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrickRow {
    pub spin: i32,
    pub flip: i32,
    pub body: i32,
    pub active_stance: i32,
    pub raw_name: String,
}

impl RawTrickRow {
    pub fn new(spin: i32, flip: i32, body: i32, active_stance: i32, raw_name: impl Into<String>) -> Self {
        Self { spin, flip, body, active_stance, raw_name: raw_name.into() }
    }

    pub fn parameters(&self) -> TrickParameters {
        TrickParameters {
            spin: self.spin,
            flip: self.flip,
            body: self.body,
            active_stance: Some(self.active_stance),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewFields(usize),
    BadInteger { field: &'static str, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewFields(n) => write!(f, "expected at least {MIN_FIELDS} fields, found {n}"),
            SkipReason::BadInteger { field, value } => write!(f, "{field} is not an integer: '{value}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Blank,
    Comment,
    Row(RawTrickRow),
    Malformed(SkipReason),
}

/// Comma split where a `"` opens a quoted field only as the field's first
/// non-blank character. Inside quotes `""` is a literal quote and commas are
/// kept; a quote anywhere else is ordinary text.
///
/// Quoting lets a name carry commas, e.g. `"Pretzel (360 Shuv, Pretzel Flip)"`.
/// An unterminated quote runs to the end of the line.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    cur.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => cur.push(c),
            }
            continue;
        }
        match c {
            '"' if cur.trim().is_empty() => {
                cur.clear();
                in_quotes = true;
            }
            ',' => fields.push(std::mem::take(&mut cur)),
            _ => cur.push(c),
        }
    }
    fields.push(cur);
    fields
}

fn parse_int(field: &'static str, value: &str) -> Result<i32, SkipReason> {
    value
        .trim()
        .parse()
        .map_err(|_| SkipReason::BadInteger { field, value: value.trim().to_string() })
}

fn parse_fields(fields: &[String]) -> Result<RawTrickRow, SkipReason> {
    Ok(RawTrickRow {
        spin: parse_int("spin", &fields[0])?,
        flip: parse_int("flip", &fields[1])?,
        body: parse_int("body", &fields[2])?,
        active_stance: parse_int("activeStance", &fields[3])?,
        raw_name: fields[4].trim().to_string(),
    })
}

pub fn parse_line(line: &str) -> LineOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineOutcome::Blank;
    }
    if trimmed.starts_with(COMMENT_PREFIX) {
        return LineOutcome::Comment;
    }

    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS {
        return LineOutcome::Malformed(SkipReason::TooFewFields(fields.len()));
    }

    match parse_fields(&fields) {
        Ok(row) => LineOutcome::Row(row),
        Err(reason) => LineOutcome::Malformed(reason),
    }
}
