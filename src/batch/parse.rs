//! Order-list tokenizer.
//!
//! Splits on commas, trims whitespace, and reads each token as either a
//! single order (`6`) or an inclusive range (`4-7`). Bad tokens become
//! warnings and are skipped.

use alloc::string::ToString;
use alloc::vec::Vec;

use super::{OrderRange, ParseWarning};

/// Parse an order list into ranges + warnings.
pub(crate) fn parse_list(list: &str) -> (Vec<OrderRange>, Vec<ParseWarning>) {
    let mut ranges = Vec::new();
    let mut warnings = Vec::new();

    for token in list.split(',').map(str::trim) {
        if token.is_empty() {
            continue;
        }
        match parse_token(token) {
            Ok(range) if range.is_empty() => warnings.push(ParseWarning::EmptyRange {
                token: token.to_string(),
            }),
            Ok(range) => ranges.push(range),
            Err(reason) => warnings.push(ParseWarning::ValueInvalid {
                token: token.to_string(),
                reason,
            }),
        }
    }

    (ranges, warnings)
}

fn parse_token(token: &str) -> Result<OrderRange, &'static str> {
    match token.split_once('-') {
        Some((low, high)) => Ok(OrderRange::new(parse_order(low)?, parse_order(high)?)),
        None => parse_order(token).map(OrderRange::single),
    }
}

fn parse_order(text: &str) -> Result<usize, &'static str> {
    let text = text.trim();
    if text.is_empty() {
        return Err("missing matrix size");
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err("matrix size must be a non-negative integer");
    }
    text.parse::<usize>().map_err(|_| "matrix size is too large")
}
