use payroll_core::calculations::common::round_half_up;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes a user-typed amount to the `1234.56` form.
///
/// - An optional `R$` prefix and inner spaces are dropped.
/// - With both `.` and `,` present, whichever comes last is the decimal
///   separator (`1.234,56` and `1,234.56` are both 1234.56).
/// - With a single kind of separator: several of them, or one followed by
///   exactly three digits after a non-zero integer part, are thousands
///   separators (`1,234,567`, `1,234`, `5.000`); otherwise it is the decimal
///   separator (`1234,56`, `0,075`, `0.075`, `123.45`).
fn normalize_decimal_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed);
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();

    match (compact.rfind('.'), compact.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (None, Some(comma)) => {
            if is_thousands_separator(&compact, ',', comma) {
                compact.replace(',', "")
            } else {
                compact.replace(',', ".")
            }
        }
        (Some(dot), None) => {
            if is_thousands_separator(&compact, '.', dot) {
                compact.replace('.', "")
            } else {
                compact
            }
        }
        (None, None) => compact,
    }
}

fn is_thousands_separator(
    compact: &str,
    separator: char,
    last: usize,
) -> bool {
    let integer = compact[..last]
        .trim_start_matches(['-', '+'])
        .trim_start_matches('0');
    compact.matches(separator).count() > 1
        || (compact.len() - last - 1 == 3 && !integer.is_empty())
}

/// Parses a string into a [`Decimal`].
///
/// Accepts `1234.56`, `1,234.56` and the Brazilian `1.234,56`.
/// Empty or whitespace-only input is treated as 0.
/// Returns an error and logs when the input is invalid (non-empty but not parseable).
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a string into an optional [`Decimal`].
///
/// Returns `None` for empty or whitespace-only input. Non-empty input that
/// does not parse is an error, so a typo in a batch file is never silently
/// treated as "not provided".
pub fn parse_optional_decimal(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    if normalize_decimal_input(s).is_empty() {
        return Ok(None);
    }
    parse_decimal(s).map(Some)
}

/// Formats an amount as Brazilian currency, rounded half-up to cents.
///
/// `4155.552325` becomes `R$ 4.155,55`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (integer, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}R$ {grouped},{cents}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1,234,567.89").unwrap(), dec!(1234567.89));
        assert_eq!(parse_decimal("1,234").unwrap(), dec!(1234));
    }

    #[test]
    fn parse_decimal_accepts_brazilian_format() {
        assert_eq!(parse_decimal("1.234,56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("1.234.567,89").unwrap(), dec!(1234567.89));
        assert_eq!(parse_decimal("1234,56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("0,5").unwrap(), dec!(0.5));
        assert_eq!(parse_decimal("0,075").unwrap(), dec!(0.075));
    }

    #[test]
    fn parse_decimal_reads_lone_dot_thousands_as_brazilian() {
        assert_eq!(parse_decimal("5.000").unwrap(), dec!(5000));
        assert_eq!(parse_decimal("12.500").unwrap(), dec!(12500));
        assert_eq!(parse_decimal("-1.500").unwrap(), dec!(-1500));
        assert_eq!(parse_decimal("1.234.567").unwrap(), dec!(1234567));
    }

    #[test]
    fn parse_decimal_keeps_fractional_dot() {
        assert_eq!(parse_decimal("0.075").unwrap(), dec!(0.075));
        assert_eq!(parse_decimal("-0.500").unwrap(), dec!(-0.5));
        assert_eq!(parse_decimal("5000.5").unwrap(), dec!(5000.5));
        assert_eq!(parse_decimal("123.45").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_strips_currency_symbol() {
        assert_eq!(parse_decimal("R$ 5.000,00").unwrap(), dec!(5000));
        assert_eq!(parse_decimal("  R$5000  ").unwrap(), dec!(5000));
    }

    #[test]
    fn parse_decimal_plain_values() {
        assert_eq!(parse_decimal("5000").unwrap(), dec!(5000));
        assert_eq!(parse_decimal("0.075").unwrap(), dec!(0.075));
        assert_eq!(parse_decimal("-150.5").unwrap(), dec!(-150.5));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("12,34,5x").is_err());
    }

    #[test]
    fn parse_optional_decimal_handles_empty_and_invalid() {
        assert_eq!(parse_optional_decimal("1.234,56").unwrap(), Some(dec!(1234.56)));
        assert_eq!(parse_optional_decimal("").unwrap(), None);
        assert_eq!(parse_optional_decimal("   ").unwrap(), None);
        assert!(parse_optional_decimal("n/a").is_err());
    }

    #[test]
    fn format_brl_groups_thousands() {
        assert_eq!(format_brl(dec!(4155.552325)), "R$ 4.155,55");
        assert_eq!(format_brl(dec!(1234567.891)), "R$ 1.234.567,89");
        assert_eq!(format_brl(dec!(951.6344)), "R$ 951,63");
        assert_eq!(format_brl(dec!(0)), "R$ 0,00");
    }

    #[test]
    fn format_brl_negative_values() {
        assert_eq!(format_brl(dec!(-1500.005)), "-R$ 1.500,01");
        assert_eq!(format_brl(dec!(-0.001)), "R$ 0,00");
    }
}
