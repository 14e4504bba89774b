//! Date and payment-term strings as printed on an invoice.

use chrono::NaiveDate;

/// Long-form en-US date, e.g. `January 5, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Payment term for a net-days count. The count is not a calendar date.
pub fn net_terms(days: i32) -> String {
    format!("Net {days}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_date_has_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_long_date(date), "January 5, 2024");

        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(format_long_date(date), "December 31, 2023");
    }

    #[test]
    fn net_terms_are_rendered_literally() {
        assert_eq!(net_terms(30), "Net 30");
        assert_eq!(net_terms(0), "Net 0");
    }
}
