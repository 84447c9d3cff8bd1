//! Currency table and amount formatting

use crate::locale::NumberConvention;
use orderlens_common::{OrderLensError, Result};
use tracing::trace;

/// Currency descriptor: display symbol and number of minor-unit digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
    pub decimals: u32,
}

/// Currencies the summary output knows how to render
const CURRENCIES: &[Currency] = &[
    Currency { code: "BRL", symbol: "R$", decimals: 2 },
    Currency { code: "USD", symbol: "US$", decimals: 2 },
    Currency { code: "EUR", symbol: "\u{20ac}", decimals: 2 },
    Currency { code: "GBP", symbol: "\u{00a3}", decimals: 2 },
    Currency { code: "COP", symbol: "$", decimals: 2 },
];

impl Currency {
    /// Look up a currency by its ISO 4217 code (case-insensitive)
    pub fn lookup(code: &str) -> Result<Self> {
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .copied()
            .ok_or_else(|| OrderLensError::format(format!("unknown currency code {:?}", code)))
    }
}

/// Format a monetary amount for the given currency and locale, e.g.
/// `format_currency(137412.75, "BRL", "es-CO")` yields `"R$\u{a0}137.412,75"`.
///
/// The symbol precedes the amount, separated by a non-breaking space, and the
/// digits follow the locale's grouping and decimal conventions.
pub fn format_currency(amount: f64, currency_code: &str, locale: &str) -> Result<String> {
    let currency = Currency::lookup(currency_code)?;
    let convention = NumberConvention::for_locale(locale)?;

    if !amount.is_finite() {
        return Err(OrderLensError::format_with_locale(
            format!("non-finite amount for {}", currency.code),
            locale,
        ));
    }

    let scale = 10u64.pow(currency.decimals);
    let minor_units = (amount.abs() * scale as f64).round() as u64;
    let integer_part = (minor_units / scale).to_string();
    let fraction_part = format!(
        "{:0width$}",
        minor_units % scale,
        width = currency.decimals as usize
    );

    let number = convention.compose(&integer_part, &fraction_part);
    let sign = if amount < 0.0 { "-" } else { "" };

    trace!("Formatted {} {} as {}{}", amount, currency.code, sign, number);
    Ok(format!("{}{}\u{00a0}{}", sign, currency.symbol, number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brl_under_es_co() {
        assert_eq!(
            format_currency(137412.75, "BRL", "es-CO").unwrap(),
            "R$\u{a0}137.412,75"
        );
        assert_eq!(
            format_currency(4.5, "BRL", "es-CO").unwrap(),
            "R$\u{a0}4,50"
        );
    }

    #[test]
    fn test_usd_under_en_us() {
        assert_eq!(
            format_currency(1234.5, "USD", "en-US").unwrap(),
            "US$\u{a0}1,234.50"
        );
    }

    #[test]
    fn test_rounding_to_minor_units() {
        assert_eq!(
            format_currency(0.005, "BRL", "es-CO").unwrap(),
            "R$\u{a0}0,01"
        );
        assert_eq!(
            format_currency(9.999, "BRL", "es-CO").unwrap(),
            "R$\u{a0}10,00"
        );
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(
            format_currency(-12.3, "EUR", "de-DE").unwrap(),
            "-\u{20ac}\u{a0}12,30"
        );
    }

    #[test]
    fn test_zero_amount() {
        assert_eq!(format_currency(0.0, "BRL", "es-CO").unwrap(), "R$\u{a0}0,00");
    }

    #[test]
    fn test_unknown_currency_is_an_error() {
        assert!(format_currency(1.0, "XXX", "es-CO").is_err());
    }

    #[test]
    fn test_case_insensitive_code() {
        assert!(format_currency(1.0, "brl", "es-CO").is_ok());
    }

    #[test]
    fn test_non_finite_amount_is_an_error() {
        assert!(format_currency(f64::NAN, "BRL", "es-CO").is_err());
        assert!(format_currency(f64::INFINITY, "BRL", "es-CO").is_err());
    }
}
