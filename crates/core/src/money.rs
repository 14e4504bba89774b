//! Currency formatting keyed by ISO-4217 code.
//!
//! Amounts are rendered the way an en-US reader expects them on an invoice:
//! conventional symbol, comma thousands grouping, and the currency's minor
//! unit precision (`$1,234.50`, `¥1,235`, `-€5.00`). All arithmetic stays in
//! [`Decimal`]; nothing here goes through floating point.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DomainError, DomainResult};

/// Formatting rules for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    /// Prefix placed before the digits. Code-style prefixes carry their own trailing space.
    pub symbol: &'static str,
    /// Digits after the decimal separator.
    pub minor_units: u32,
}

const fn currency(code: &'static str, symbol: &'static str, minor_units: u32) -> Currency {
    Currency {
        code,
        symbol,
        minor_units,
    }
}

static CURRENCIES: &[Currency] = &[
    currency("USD", "$", 2),
    currency("EUR", "€", 2),
    currency("GBP", "£", 2),
    currency("JPY", "¥", 0),
    currency("CNY", "CN¥", 2),
    currency("CAD", "CA$", 2),
    currency("AUD", "A$", 2),
    currency("NZD", "NZ$", 2),
    currency("HKD", "HK$", 2),
    currency("TWD", "NT$", 2),
    currency("MXN", "MX$", 2),
    currency("BRL", "R$", 2),
    currency("INR", "₹", 2),
    currency("KRW", "₩", 0),
    currency("VND", "₫", 0),
    currency("ILS", "₪", 2),
    currency("PHP", "₱", 2),
    currency("CHF", "CHF ", 2),
    currency("SGD", "SGD ", 2),
    currency("SEK", "SEK ", 2),
    currency("NOK", "NOK ", 2),
    currency("DKK", "DKK ", 2),
    currency("PLN", "PLN ", 2),
    currency("CZK", "CZK ", 2),
    currency("HUF", "HUF ", 2),
    currency("ZAR", "ZAR ", 2),
    currency("AED", "AED ", 2),
    currency("SAR", "SAR ", 2),
    currency("TRY", "TRY ", 2),
    currency("THB", "THB ", 2),
    currency("PKR", "PKR ", 2),
    currency("CLP", "CLP ", 0),
    currency("ISK", "ISK ", 0),
    currency("KWD", "KWD ", 3),
    currency("BHD", "BHD ", 3),
];

impl Currency {
    /// Look up formatting rules for a 3-letter code (case-insensitive).
    pub fn from_code(code: &str) -> DomainResult<&'static Currency> {
        let code = code.trim();
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| DomainError::unknown_currency(code))
    }

    pub fn format(&self, amount: Decimal) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.minor_units, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!("{:.*}", self.minor_units as usize, rounded.abs());

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + self.symbol.len() + 4);
        if negative {
            out.push('-');
        }
        out.push_str(self.symbol);
        out.push_str(&group_thousands(int_part));
        if let Some(frac_part) = frac_part {
            out.push('.');
            out.push_str(frac_part);
        }
        out
    }
}

/// Format `amount` in the currency identified by `code`.
///
/// Fails with [`DomainError::UnknownCurrency`] when the code has no rules.
pub fn format_currency(amount: Decimal, code: &str) -> DomainResult<String> {
    Ok(Currency::from_code(code)?.format(amount))
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
