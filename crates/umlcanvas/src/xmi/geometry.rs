//! Diagram element geometry strings
//!
//! Geometry is written as `Left=10;Top=20;Right=110;Bottom=70;`. Parsing
//! never fails: malformed pairs are dropped and missing coordinates fall back
//! to defaults when read.

use std::collections::HashMap;

use crate::diagram::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Named integer coordinates parsed from a geometry string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Geometry {
    // `None` marks a key whose value had no leading digits.
    coords: HashMap<String, Option<i64>>,
}

/// Parse a `Key=Value;Key=Value` geometry string
///
/// Pairs without `=`, or with an empty key or value, are skipped. Text after
/// a second `=` in one pair is ignored. Values are read as a leading integer
/// (`"10px"` is 10); a value with no leading digits counts as absent. A key
/// given twice keeps its last value.
pub fn parse_geometry(input: &str) -> Geometry {
    let mut coords = HashMap::new();
    for part in input.split(';') {
        let mut pieces = part.split('=');
        let key = pieces.next().unwrap_or("").trim();
        let value = pieces.next().unwrap_or("");
        if key.is_empty() || value.is_empty() {
            continue;
        }
        coords.insert(key.to_string(), parse_leading_int(value));
    }
    Geometry { coords }
}

/// Read an optionally signed run of decimal digits after leading whitespace
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    rest[..digits_len].parse::<i64>().ok().map(|n| sign * n)
}

impl Geometry {
    /// Value of a coordinate, if present and numeric
    pub fn get(&self, key: &str) -> Option<i64> {
        self.coords.get(key).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// `Left`, or 0
    pub fn left(&self) -> i64 {
        self.get("Left").unwrap_or(0)
    }

    /// `Top`, or 0
    pub fn top(&self) -> i64 {
        self.get("Top").unwrap_or(0)
    }

    /// `Right - Left`; the default width when either is missing or the span is zero
    pub fn width(&self) -> i64 {
        span(self.get("Left"), self.get("Right")).unwrap_or(DEFAULT_WIDTH)
    }

    /// `Bottom - Top`; the default height when either is missing or the span is zero
    pub fn height(&self) -> i64 {
        span(self.get("Top"), self.get("Bottom")).unwrap_or(DEFAULT_HEIGHT)
    }
}

// A zero span is indistinguishable from a missing one.
fn span(start: Option<i64>, end: Option<i64>) -> Option<i64> {
    end?.checked_sub(start?).filter(|d| *d != 0)
}
