/// Currency assumed when the provider omits one.
const DEFAULT_CURRENCY: &str = "RUR";

/// Normalize a salary object into one of exactly four display forms:
/// both bounds, lower bound only, upper bound only, or "not specified".
pub fn format_salary(from: Option<i64>, to: Option<i64>, currency: Option<&str>) -> String {
    let currency = currency.unwrap_or(DEFAULT_CURRENCY);
    match (from, to) {
        (Some(from), Some(to)) => format!("{from} – {to} {currency}"),
        (Some(from), None) => format!("from {from} {currency}"),
        (None, Some(to)) => format!("up to {to} {currency}"),
        (None, None) => "not specified".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_bounds() {
        assert_eq!(
            format_salary(Some(50_000), Some(90_000), Some("RUR")),
            "50000 – 90000 RUR"
        );
    }

    #[test]
    fn lower_bound_only() {
        assert_eq!(format_salary(Some(50_000), None, Some("USD")), "from 50000 USD");
    }

    #[test]
    fn upper_bound_only() {
        assert_eq!(format_salary(None, Some(120_000), Some("EUR")), "up to 120000 EUR");
    }

    #[test]
    fn no_bounds() {
        assert_eq!(format_salary(None, None, Some("RUR")), "not specified");
        assert_eq!(format_salary(None, None, None), "not specified");
    }

    #[test]
    fn missing_currency_defaults_to_rur() {
        assert_eq!(format_salary(Some(1), Some(2), None), "1 – 2 RUR");
        assert_eq!(format_salary(Some(1), None, None), "from 1 RUR");
        assert_eq!(format_salary(None, Some(2), None), "up to 2 RUR");
    }
}
