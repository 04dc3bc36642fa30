//! Content-pattern predicates used by the sniffing phase.

use std::sync::LazyLock;

use regex::Regex;

use apc_model::NumberFormat;

/// Publication years are accepted from 2000 up to a little past the
/// current year, which leaves a margin for early-registered articles.
pub const PERIOD_MIN: i32 = 2000;
pub const PERIOD_MARGIN: i32 = 2;

/// Plausible APC range in euros.
pub const AMOUNT_MIN: f64 = 10.0;
pub const AMOUNT_MAX: f64 = 6000.0;

static DOI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^10\.\d{4,9}/[-._;()/:A-Za-z0-9]+$").expect("DOI pattern compiles")
});

/// True if the cell looks like a bare DOI.
pub fn looks_like_doi(cell: &str) -> bool {
    DOI_RE.is_match(cell.trim())
}

/// True if the cell parses as a year within `[2000, current_year + 2]`.
pub fn looks_like_period(cell: &str, current_year: i32) -> bool {
    match cell.trim().parse::<i32>() {
        Ok(year) => year >= PERIOD_MIN && year <= current_year + PERIOD_MARGIN,
        Err(_) => false,
    }
}

/// True if the cell parses as a monetary amount within the plausible APC
/// range under the given number format.
pub fn looks_like_amount(cell: &str, format: NumberFormat) -> bool {
    match format.parse(cell) {
        Some(amount) => (AMOUNT_MIN..=AMOUNT_MAX).contains(&amount),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doi_pattern_accepts_standard_forms() {
        assert!(looks_like_doi("10.1000/xyz123"));
        assert!(looks_like_doi("10.1371/journal.pone.0085871"));
        assert!(looks_like_doi(" 10.1/abc ".trim()));
        assert!(!looks_like_doi("doi:10.1000/xyz"));
        assert!(!looks_like_doi("https://doi.org/10.1000/xyz"));
        assert!(!looks_like_doi("Harvard"));
    }

    #[test]
    fn period_bounds_are_inclusive() {
        assert!(looks_like_period("2000", 2026));
        assert!(looks_like_period("2028", 2026));
        assert!(!looks_like_period("2029", 2026));
        assert!(!looks_like_period("1999", 2026));
        assert!(!looks_like_period("20.5", 2026));
    }

    #[test]
    fn amount_bounds_follow_the_format() {
        assert!(looks_like_amount("1500", NumberFormat::Point));
        assert!(looks_like_amount("1.234,56", NumberFormat::Comma));
        assert!(!looks_like_amount("6000.01", NumberFormat::Point));
        assert!(!looks_like_amount("9.99", NumberFormat::Point));
        assert!(!looks_like_amount("TRUE", NumberFormat::Point));
    }
}
