//! Money parsing and display using decimal arithmetic.
//!
//! The commerce backend hands prices over as localized currency strings
//! (`"20,00 €"`, `"€1.234,56"`). [`parse_catalog_price`] turns those into a
//! [`Decimal`] once, at the boundary, and [`format_euro`] renders results back
//! in the storefront's es-ES convention.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Errors that can occur when parsing a catalog price string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    /// The input is empty after trimming.
    #[error("price cannot be empty")]
    Empty,
    /// The input contains no digits.
    #[error("price contains no digits: {0:?}")]
    NoDigits(String),
    /// The digits and separators do not form a number.
    #[error("price is not a valid amount: {0:?}")]
    Invalid(String),
}

/// Non-breaking space placed between the amount and the euro sign.
const NBSP: char = '\u{a0}';

/// Parse a currency-formatted price from the commerce backend.
///
/// Currency symbols and surrounding text are ignored. When a range such as
/// `"10,00 € - 20,00 €"` is given, the first amount is returned. A minus
/// sign (`-` or `−`) ahead of the first digit makes the amount negative;
/// callers decide whether to reject it.
///
/// Separator rules:
/// - both `.` and `,` present: the later one is the decimal separator
/// - a single `.` or `,`: decimal separator
/// - a separator repeated more than once: thousands grouping
///
/// # Errors
///
/// Returns [`PriceParseError`] if the input is blank, has no digits, or the
/// extracted amount is not a number.
///
/// # Examples
///
/// ```
/// use promo_quote_core::parse_catalog_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_catalog_price("20,00 €").unwrap(), Decimal::new(20, 0));
/// assert_eq!(parse_catalog_price("€1.234,56").unwrap(), Decimal::new(123_456, 2));
/// assert_eq!(parse_catalog_price("19.99").unwrap(), Decimal::new(1999, 2));
/// ```
pub fn parse_catalog_price(text: &str) -> Result<Decimal, PriceParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PriceParseError::Empty);
    }

    let (negative, raw) =
        first_amount(trimmed).ok_or_else(|| PriceParseError::NoDigits(trimmed.to_owned()))?;
    let normalized = normalize_separators(raw.trim_end_matches(['.', ',']));

    let amount = Decimal::from_str(&normalized)
        .map_err(|_| PriceParseError::Invalid(trimmed.to_owned()))?;
    Ok(if negative { -amount } else { amount })
}

/// Extract the first run of digits and separators, allowing spaces used as
/// thousands grouping between digits (`"1 234,56"`).
///
/// The flag is set when a minus sign precedes the first digit.
fn first_amount(text: &str) -> Option<(bool, String)> {
    let chars: Vec<char> = text.chars().collect();
    let start = chars.iter().position(char::is_ascii_digit)?;
    let negative = chars.iter().take(start).any(|ch| matches!(ch, '-' | '\u{2212}'));

    let mut amount = String::new();
    let mut index = start;
    while let Some(&ch) = chars.get(index) {
        if ch.is_ascii_digit() || ch == '.' || ch == ',' {
            amount.push(ch);
        } else if is_group_space(ch) {
            let prev_digit = index
                .checked_sub(1)
                .and_then(|i| chars.get(i))
                .is_some_and(char::is_ascii_digit);
            let next_digit = chars.get(index + 1).is_some_and(char::is_ascii_digit);
            if !(prev_digit && next_digit) {
                break;
            }
        } else {
            break;
        }
        index += 1;
    }

    Some((negative, amount))
}

const fn is_group_space(ch: char) -> bool {
    matches!(ch, ' ' | '\u{a0}' | '\u{202f}')
}

fn normalize_separators(amount: &str) -> String {
    let dots = amount.matches('.').count();
    let commas = amount.matches(',').count();

    let decimal_separator = match (amount.rfind('.'), amount.rfind(',')) {
        (Some(dot), Some(comma)) => Some(if dot > comma { '.' } else { ',' }),
        (Some(_), None) if dots == 1 => Some('.'),
        (None, Some(_)) if commas == 1 => Some(','),
        _ => None,
    };

    amount
        .chars()
        .filter_map(|ch| match ch {
            '.' | ',' if Some(ch) == decimal_separator => Some('.'),
            '.' | ',' => None,
            other => Some(other),
        })
        .collect()
}

/// Format an amount as es-ES euro currency text.
///
/// Rounds half away from zero to two decimals, uses `,` as the decimal
/// separator and groups thousands with `.` only from five integer digits up,
/// matching the browser's `Intl.NumberFormat('es-ES')` output.
///
/// # Examples
///
/// ```
/// use promo_quote_core::format_euro;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_euro(Decimal::new(242_220_825, 5)), "2422,21\u{a0}€");
/// assert_eq!(format_euro(Decimal::new(1_234_567, 2)), "12.345,67\u{a0}€");
/// ```
#[must_use]
pub fn format_euro(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}{},{fraction}{NBSP}€", group_thousands(integer))
}

fn group_thousands(integer: &str) -> String {
    if integer.len() < 5 {
        return integer.to_owned();
    }

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_catalog_price("20").unwrap(), dec("20"));
        assert_eq!(parse_catalog_price("19.99").unwrap(), dec("19.99"));
        assert_eq!(parse_catalog_price("7,00").unwrap(), dec("7"));
    }

    #[test]
    fn test_parse_currency_decorations() {
        assert_eq!(parse_catalog_price("20,00 €").unwrap(), dec("20"));
        assert_eq!(parse_catalog_price("€ 3,45").unwrap(), dec("3.45"));
        assert_eq!(parse_catalog_price("EUR 12.50").unwrap(), dec("12.5"));
    }

    #[test]
    fn test_parse_thousands_grouping() {
        assert_eq!(parse_catalog_price("€1.234,56").unwrap(), dec("1234.56"));
        assert_eq!(parse_catalog_price("$1,234.56").unwrap(), dec("1234.56"));
        assert_eq!(parse_catalog_price("1.234.567").unwrap(), dec("1234567"));
        assert_eq!(parse_catalog_price("1 234,56 €").unwrap(), dec("1234.56"));
    }

    #[test]
    fn test_parse_range_takes_first_amount() {
        assert_eq!(parse_catalog_price("10,00 € - 20,00 €").unwrap(), dec("10"));
    }

    #[test]
    fn test_parse_keeps_leading_minus() {
        assert_eq!(parse_catalog_price("-5,00 €").unwrap(), dec("-5"));
        assert_eq!(parse_catalog_price("€ -1.234,56").unwrap(), dec("-1234.56"));
        assert_eq!(parse_catalog_price("\u{2212}5").unwrap(), dec("-5"));
        assert_eq!(parse_catalog_price("-0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_catalog_price("  "), Err(PriceParseError::Empty));
        assert!(matches!(
            parse_catalog_price("gratis"),
            Err(PriceParseError::NoDigits(_))
        ));
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_euro(dec("40.0365")), "40,04\u{a0}€");
        assert_eq!(format_euro(dec("0.005")), "0,01\u{a0}€");
        assert_eq!(format_euro(Decimal::ZERO), "0,00\u{a0}€");
    }

    #[test]
    fn test_format_grouping_starts_at_five_digits() {
        assert_eq!(format_euro(dec("2001.825")), "2001,83\u{a0}€");
        assert_eq!(format_euro(dec("12345")), "12.345,00\u{a0}€");
        assert_eq!(format_euro(dec("1234567.891")), "1.234.567,89\u{a0}€");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_euro(dec("-5.5")), "-5,50\u{a0}€");
    }
}
