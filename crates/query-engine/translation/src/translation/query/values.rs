//! Handle the translation of literal values.

use query_engine_metadata::metadata::AttributeKind;

/// A condition value, typed as far as the attribute kind allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Text(String),
    Number(String),
    Boolean(bool),
    Date(String),
    Guid(String),
}

/// Convert raw editor text into a literal of the attribute's kind.
///
/// Text that does not parse as the kind, and any value of an unknown kind, stays text.
pub fn translate_value(raw: &str, kind: AttributeKind) -> Literal {
    let text = raw.trim();
    let typed = match kind {
        AttributeKind::Number | AttributeKind::OptionSet => {
            is_number(text).then(|| Literal::Number(text.to_string()))
        }
        AttributeKind::Date => is_date(text).then(|| Literal::Date(text.to_string())),
        AttributeKind::Boolean => parse_bool(text).map(Literal::Boolean),
        AttributeKind::Lookup => uuid::Uuid::parse_str(text)
            .ok()
            .map(|guid| Literal::Guid(guid.hyphenated().to_string())),
        AttributeKind::String | AttributeKind::Unknown => None,
    };
    typed.unwrap_or_else(|| Literal::Text(raw.to_string()))
}

/// Whether the text is a number literal: `-?DIGITS(.DIGITS)?([eE][+-]?DIGITS)?`.
fn is_number(text: &str) -> bool {
    fn digits(part: &str) -> bool {
        !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit())
    }

    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let (whole, fraction) = match mantissa.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (mantissa, None),
    };
    digits(whole)
        && fraction.map_or(true, digits)
        && exponent.map_or(true, |exponent| {
            digits(exponent.strip_prefix(['+', '-']).unwrap_or(exponent))
        })
}

fn is_date(text: &str) -> bool {
    chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(text).is_ok()
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
