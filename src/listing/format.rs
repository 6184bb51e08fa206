//! Display formatting shared by every listing.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(format!("unsupported currency {other:?}")),
        }
    }
}

/// Fixed two-decimal currency formatter: `$1,234.50`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriceFormatter {
    currency: Currency,
}

impl PriceFormatter {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Rounds half away from zero to cents and groups thousands.
    pub fn format(&self, amount: Decimal) -> String {
        let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = cents.is_sign_negative() && !cents.is_zero();
        cents = cents.abs();
        cents.rescale(2);

        let text = cents.to_string();
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        format!(
            "{}{}{}.{}",
            if negative { "-" } else { "" },
            self.currency.symbol(),
            group_thousands(whole),
            fraction
        )
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Long date with an ordinal day: `June 3rd, 2024`.
pub fn long_date(at: DateTime<Utc>) -> String {
    let day = at.day();
    format!("{} {}{}, {}", at.format("%B"), day, ordinal_suffix(day), at.year())
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_price_formatting() {
        let usd = PriceFormatter::default();
        assert_eq!(usd.format(Decimal::new(2499, 2)), "$24.99");
        assert_eq!(usd.format(Decimal::new(5, 0)), "$5.00");
        assert_eq!(usd.format(Decimal::new(123450, 2)), "$1,234.50");
        assert_eq!(usd.format(Decimal::new(1234567891, 3)), "$1,234,567.89");
        assert_eq!(usd.format(Decimal::new(10005, 3)), "$10.01");
        assert_eq!(PriceFormatter::new(Currency::Eur).format(Decimal::ZERO), "€0.00");
    }

    #[test]
    fn test_long_date_ordinals() {
        let date = |d| Utc.with_ymd_and_hms(2024, 6, d, 12, 0, 0).unwrap();
        assert_eq!(long_date(date(3)), "June 3rd, 2024");
        assert_eq!(long_date(date(1)), "June 1st, 2024");
        assert_eq!(long_date(date(12)), "June 12th, 2024");
        assert_eq!(long_date(date(22)), "June 22nd, 2024");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!("gbp".parse::<Currency>(), Ok(Currency::Gbp));
        assert!("JPY".parse::<Currency>().is_err());
    }
}
