//! Lifetime expression parsing.
//!
//! The satellite database records expected lifetime as free text:
//! `"15"`, `"10 yr."`, `"5-15 yrs."`, `"7,000 hrs."`. Parsing happens in two
//! steps. [`strip_noise_tokens`] removes unit suffixes and thousands
//! separators, then [`resolve_range`] turns the remainder into one number,
//! averaging the endpoints of an `"A-B"` range.
//!
//! # Sign handling
//!
//! A hyphen is a sign, not a range delimiter, when nothing but whitespace
//! precedes it or when it directly follows an exponent marker. So `"-5-10"`
//! resolves to `2.5` and `"1e-3"` to `0.001`. More than one delimiter is an
//! ambiguous split and is rejected.

use thiserror::Error;

/// Tokens removed from lifetime expressions, applied in this order.
pub const NOISE_TOKENS: [&str; 5] = [" yr.", " hrs.", " trs", "yrs.", ","];

/// Why a normalized lifetime expression could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifetimeParseError {
    /// Nothing left to parse.
    #[error("empty lifetime expression")]
    Empty,

    /// A piece is not a finite float literal.
    #[error("'{piece}' is not a number")]
    InvalidNumber { piece: String },

    /// A range with a missing endpoint, such as `"5-"`.
    #[error("range '{value}' is missing an endpoint")]
    IncompleteRange { value: String },

    /// More than one range delimiter.
    #[error("range '{value}' has {delimiters} delimiters, expected one")]
    AmbiguousRange { value: String, delimiters: usize },
}

/// Remove every noise token from a lifetime expression.
///
/// Each token is stripped globally before the next is applied. The ordered
/// pass repeats while removing a later token has exposed an earlier one
/// (`"1 yr,."`), so no token survives. Surrounding whitespace and letter
/// case are left alone.
///
/// # Examples
///
/// ```
/// use satlife_transform::strip_noise_tokens;
///
/// assert_eq!(strip_noise_tokens("10 yr."), "10");
/// assert_eq!(strip_noise_tokens("7,000 hrs."), "7000");
/// assert_eq!(strip_noise_tokens("5-15 yrs."), "5-15 ");
/// ```
pub fn strip_noise_tokens(value: &str) -> String {
    let mut stripped = value.to_string();
    while NOISE_TOKENS.iter().any(|token| stripped.contains(token)) {
        for token in NOISE_TOKENS {
            if stripped.contains(token) {
                stripped = stripped.replace(token, "");
            }
        }
    }
    stripped
}

/// Resolve a normalized lifetime expression to a single value.
///
/// Plain numbers parse directly; `"A-B"` yields `(A + B) / 2`.
pub fn resolve_range(value: &str) -> Result<f64, LifetimeParseError> {
    let delimiters = range_delimiters(value);
    match delimiters.as_slice() {
        [] => parse_piece(value),
        [idx] => {
            let (low, high) = (&value[..*idx], &value[idx + 1..]);
            if low.trim().is_empty() || high.trim().is_empty() {
                return Err(LifetimeParseError::IncompleteRange {
                    value: value.to_string(),
                });
            }
            Ok((parse_piece(low)? + parse_piece(high)?) / 2.0)
        }
        many => Err(LifetimeParseError::AmbiguousRange {
            value: value.to_string(),
            delimiters: many.len(),
        }),
    }
}

/// Strip noise tokens, then resolve the remainder.
///
/// # Examples
///
/// ```
/// use satlife_transform::parse_lifetime;
///
/// assert_eq!(parse_lifetime("5-15 yrs."), Ok(10.0));
/// assert!(parse_lifetime(" yr.").is_err());
/// ```
pub fn parse_lifetime(raw: &str) -> Result<f64, LifetimeParseError> {
    resolve_range(&strip_noise_tokens(raw))
}

fn range_delimiters(value: &str) -> Vec<usize> {
    let bytes = value.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(idx, &byte)| byte == b'-' && !is_sign_position(bytes, idx))
        .map(|(idx, _)| idx)
        .collect()
}

fn is_sign_position(bytes: &[u8], idx: usize) -> bool {
    let preceding = &bytes[..idx];
    match preceding.iter().rposition(|b| !b.is_ascii_whitespace()) {
        None => true,
        Some(prev) => prev + 1 == idx && matches!(bytes[prev], b'e' | b'E'),
    }
}

fn parse_piece(piece: &str) -> Result<f64, LifetimeParseError> {
    let trimmed = piece.trim();
    if trimmed.is_empty() {
        return Err(LifetimeParseError::Empty);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LifetimeParseError::InvalidNumber {
            piece: trimmed.to_string(),
        })
}
