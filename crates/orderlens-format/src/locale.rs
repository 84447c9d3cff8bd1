//! Per-locale number conventions

use orderlens_common::{OrderLensError, Result};
use unic_langid::LanguageIdentifier;

/// Digit-grouping and decimal-separator convention for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberConvention {
    /// Separator between groups of three integer digits
    pub group_separator: char,
    /// Separator before the fractional part
    pub decimal_separator: char,
}

impl NumberConvention {
    /// Resolve the convention for a BCP 47 locale tag (e.g. "es-CO", "en-US").
    ///
    /// Conventions key off the language subtag, with the handful of
    /// region-specific deviations this tool meets in practice.
    pub fn for_locale(tag: &str) -> Result<Self> {
        let langid: LanguageIdentifier = tag.parse().map_err(|_| {
            OrderLensError::format_with_locale(format!("unparseable locale tag {:?}", tag), tag)
        })?;

        let language = langid.language.as_str();
        let region = langid.region.map(|r| r.as_str().to_string());

        let convention = match (language, region.as_deref()) {
            // Swiss conventions group with an apostrophe
            ("de", Some("CH")) | ("fr", Some("CH")) | ("it", Some("CH")) => Self {
                group_separator: '\u{2019}',
                decimal_separator: '.',
            },
            ("en", _) => Self {
                group_separator: ',',
                decimal_separator: '.',
            },
            ("es", _) | ("pt", _) | ("de", _) | ("it", _) | ("nl", _) => Self {
                group_separator: '.',
                decimal_separator: ',',
            },
            ("fr", _) => Self {
                group_separator: '\u{00a0}',
                decimal_separator: ',',
            },
            _ => {
                return Err(OrderLensError::format_with_locale(
                    format!("no number convention for locale {:?}", tag),
                    tag,
                ))
            }
        };

        Ok(convention)
    }

    /// Group the integer digits and attach the fractional part
    pub fn compose(&self, integer_digits: &str, fraction_digits: &str) -> String {
        let mut grouped = String::new();
        let digits: Vec<char> = integer_digits.chars().collect();
        for (i, digit) in digits.iter().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.group_separator);
            }
            grouped.push(*digit);
        }

        if fraction_digits.is_empty() {
            grouped
        } else {
            format!("{}{}{}", grouped, self.decimal_separator, fraction_digits)
        }
    }
}
