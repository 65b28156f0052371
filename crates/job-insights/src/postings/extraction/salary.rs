use crate::postings::domain::{
    SalaryFigures, SalaryMention, NEGOTIABLE, NOT_DISCLOSED, NOT_SPECIFIED,
};
use regex::Regex;
use std::sync::OnceLock;

/// A figure as it appears in a description: one or two leading digits,
/// optionally followed by comma-separated thousands (`15,000`).
const AMOUNT: &str = r"\d{1,2}(?:,\d{3})*";

/// A figure in cleaned salary text, where separators are already gone.
const CLEAN_AMOUNT: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+)";

/// How a matched pattern's captures become a salary mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryCapture {
    /// Capture 1 is the amount span or keyword, returned as-is.
    Composite,
    /// Captures 1 and 2 are the bounds of a range.
    Range,
    /// Capture 1 is a single figure subject to the salary floor.
    Single,
}

/// Salary patterns in priority order; the first one that yields a mention wins.
pub const SALARY_PATTERNS: &[(&str, SalaryCapture)] = &[
    (
        r"[A-Za-z\s]+\s+(Negotiable|Not disclosed|{AMOUNT}(?:\s*-\s*(?:{AMOUNT}))?)\s+(?:Permanent|Contract|Temporary)",
        SalaryCapture::Composite,
    ),
    (r"(?i)MUR\s*({AMOUNT})\s*-\s*({AMOUNT})", SalaryCapture::Range),
    (r"(?i)({AMOUNT})\s*-\s*({AMOUNT})\s*MUR", SalaryCapture::Range),
    (r"(?i)Rs\s*({AMOUNT})\s*-\s*({AMOUNT})", SalaryCapture::Range),
    (r"(?i)({AMOUNT})\s*-\s*({AMOUNT})\s*Rs", SalaryCapture::Range),
    (r"(?i)MUR\s*({AMOUNT})", SalaryCapture::Single),
    (r"(?i)Rs\s*({AMOUNT})", SalaryCapture::Single),
    (r"(?i)({AMOUNT})\s*MUR", SalaryCapture::Single),
    (r"(?i)({AMOUNT})\s*Rs", SalaryCapture::Single),
];

fn compiled_patterns() -> &'static [(Regex, SalaryCapture)] {
    static PATTERNS: OnceLock<Vec<(Regex, SalaryCapture)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        SALARY_PATTERNS
            .iter()
            .map(|(template, capture)| {
                let source = template.replace("{AMOUNT}", AMOUNT);
                let regex = Regex::new(&source).expect("salary pattern compiles");
                (regex, *capture)
            })
            .collect()
    })
}

fn range_regex() -> &'static Regex {
    static RANGE: OnceLock<Regex> = OnceLock::new();
    RANGE.get_or_init(|| {
        Regex::new(&format!(r"({CLEAN_AMOUNT})\s*-\s*({CLEAN_AMOUNT})")).expect("range pattern compiles")
    })
}

fn amount_regex() -> &'static Regex {
    static SINGLE: OnceLock<Regex> = OnceLock::new();
    SINGLE.get_or_init(|| Regex::new(CLEAN_AMOUNT).expect("amount pattern compiles"))
}

fn currency_regex() -> &'static Regex {
    static CURRENCY: OnceLock<Regex> = OnceLock::new();
    CURRENCY.get_or_init(|| Regex::new(r"(?i)MUR|Rs\.?").expect("currency pattern compiles"))
}

/// Finds the salary span of a description, falling back to keywords.
pub fn locate_salary(description: &str, salary_floor: u64) -> SalaryMention {
    for (regex, capture) in compiled_patterns() {
        let Some(captures) = regex.captures(description) else {
            continue;
        };

        let first = captures.get(1).map(|m| m.as_str().trim());
        match capture {
            SalaryCapture::Composite => {
                if let Some(span) = first {
                    return match span {
                        NEGOTIABLE => SalaryMention::Negotiable,
                        NOT_DISCLOSED => SalaryMention::NotDisclosed,
                        amount => SalaryMention::Amount(amount.to_string()),
                    };
                }
            }
            SalaryCapture::Range => {
                if let (Some(low), Some(high)) = (first, captures.get(2)) {
                    return SalaryMention::Amount(format!("{low} - {}", high.as_str()));
                }
            }
            SalaryCapture::Single => {
                let accepted = first.filter(|amount| {
                    parse_integer(amount).is_some_and(|value| value >= salary_floor)
                });
                if let Some(amount) = accepted {
                    return SalaryMention::Amount(amount.to_string());
                }
            }
        }
    }

    if description.contains(NEGOTIABLE) {
        SalaryMention::Negotiable
    } else if description.contains(NOT_DISCLOSED) {
        SalaryMention::NotDisclosed
    } else {
        SalaryMention::NotSpecified
    }
}

/// Normalises locator output into a bare figure string or a sentinel.
/// Applying it to its own output is a no-op.
pub fn clean_salary(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = clean_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn clean_once(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == NOT_SPECIFIED {
        return NOT_SPECIFIED.to_string();
    }
    if trimmed.contains(NEGOTIABLE) || trimmed.contains(NOT_DISCLOSED) {
        return NEGOTIABLE.to_string();
    }

    let stripped = currency_regex().replace_all(trimmed, "").replace(',', "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        collapsed
    }
}

pub fn is_sentinel(clean: &str) -> bool {
    clean.contains(NOT_SPECIFIED) || clean.contains(NEGOTIABLE)
}

/// Lower salary bound of cleaned salary text.
pub fn salary_min(clean: &str) -> Option<f64> {
    salary_bounds(clean).min
}

/// Upper salary bound of cleaned salary text.
pub fn salary_max(clean: &str) -> Option<f64> {
    salary_bounds(clean).max
}

/// Parses cleaned salary text into ordered bounds and their midpoint.
pub fn salary_bounds(clean: &str) -> SalaryFigures {
    if is_sentinel(clean) {
        return SalaryFigures::absent();
    }

    if let Some(captures) = range_regex().captures(clean) {
        let low = captures.get(1).and_then(|m| parse_amount(m.as_str()));
        let high = captures.get(2).and_then(|m| parse_amount(m.as_str()));
        if let (Some(low), Some(high)) = (low, high) {
            return SalaryFigures::from_bounds(low, high);
        }
    }

    amount_regex()
        .find(clean)
        .and_then(|m| parse_amount(m.as_str()))
        .map(|value| SalaryFigures::from_bounds(value, value))
        .unwrap_or_else(SalaryFigures::absent)
}

fn parse_integer(amount: &str) -> Option<u64> {
    amount.replace(',', "").parse::<u64>().ok()
}

fn parse_amount(amount: &str) -> Option<f64> {
    amount
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SALARY_FLOOR;

    fn locate(description: &str) -> SalaryMention {
        locate_salary(description, DEFAULT_SALARY_FLOOR)
    }

    #[test]
    fn composite_pattern_captures_range() {
        let mention = locate("Accountant Port Louis 15,000 - 25,000 Permanent Added 15/03/2023");
        assert_eq!(mention, SalaryMention::Amount("15,000 - 25,000".to_string()));
    }

    #[test]
    fn composite_pattern_captures_keyword() {
        assert_eq!(
            locate("Sales Executive Moka Negotiable Permanent"),
            SalaryMention::Negotiable
        );
        assert_eq!(
            locate("Driver Flacq Not disclosed Contract"),
            SalaryMention::NotDisclosed
        );
    }

    #[test]
    fn composite_pattern_outranks_currency_patterns() {
        let mention = locate("Pay MUR 40,000 - 50,000. Office Moka 18,000 Permanent");
        assert_eq!(mention, SalaryMention::Amount("18,000".to_string()));
    }

    #[test]
    fn currency_range_formats_both_bounds() {
        assert_eq!(
            locate("Salary: Rs 20,000-30,000 per month"),
            SalaryMention::Amount("20,000 - 30,000".to_string())
        );
        assert_eq!(
            locate("Offering 12,000 - 14,000 mur monthly"),
            SalaryMention::Amount("12,000 - 14,000".to_string())
        );
    }

    #[test]
    fn single_figure_below_floor_is_rejected() {
        assert_eq!(locate("Allowance of MUR 500 for transport"), SalaryMention::NotSpecified);
    }

    #[test]
    fn bare_digit_runs_are_not_amounts() {
        assert_eq!(locate("Allowance MUR 500 Permanent"), SalaryMention::NotSpecified);
        assert_eq!(locate("Team of 250 Permanent staff"), SalaryMention::NotSpecified);
        assert_eq!(
            locate("Office opened Moka 2023 Permanent"),
            SalaryMention::NotSpecified
        );
        // Only the leading `25` is an amount here, and it is under the floor.
        assert_eq!(locate("Salary MUR 2500 monthly"), SalaryMention::NotSpecified);
    }

    #[test]
    fn composite_amount_must_start_a_word() {
        assert_eq!(
            locate("Clerk Moka 12,500 Contract"),
            SalaryMention::Amount("12,500".to_string())
        );
        assert_eq!(locate("Clerk Moka 125,000 Contract"), SalaryMention::NotSpecified);
    }

    #[test]
    fn low_figure_falls_through_to_later_pattern() {
        let mention = locate("MUR 500 bonus, basic salary 32,000 Rs");
        assert_eq!(mention, SalaryMention::Amount("32,000".to_string()));
    }

    #[test]
    fn keyword_fallbacks_apply_in_order() {
        assert_eq!(locate("Salary Negotiable"), SalaryMention::Negotiable);
        assert_eq!(locate("salary: Not disclosed"), SalaryMention::NotDisclosed);
        assert_eq!(
            locate("Not disclosed at first, Negotiable later"),
            SalaryMention::Negotiable
        );
        assert_eq!(locate("negotiable"), SalaryMention::NotSpecified);
    }

    #[test]
    fn cleaning_collapses_keywords_and_strips_separators() {
        assert_eq!(clean_salary("Not disclosed"), NEGOTIABLE);
        assert_eq!(clean_salary("Negotiable"), NEGOTIABLE);
        assert_eq!(clean_salary("Not specified"), NOT_SPECIFIED);
        assert_eq!(clean_salary("MUR 15,000  -   25,000"), "15000 - 25000");
        assert_eq!(clean_salary("Rs. 9,500"), "9500");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let inputs = [
            "Not specified",
            "Negotiable",
            "Not disclosed",
            "15,000 - 25,000",
            " MUR 40,000 ",
            "MMURUR 12,000",
            "NegoMURtiable",
            "",
            "MUR",
        ];
        for input in inputs {
            let once = clean_salary(input);
            assert_eq!(clean_salary(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn bounds_parse_ranges_and_single_figures() {
        let range = salary_bounds("15000 - 25000");
        assert_eq!(range.min, Some(15_000.0));
        assert_eq!(range.max, Some(25_000.0));
        assert_eq!(range.average, Some(20_000.0));

        let single = salary_bounds("32000");
        assert_eq!(single.min, Some(32_000.0));
        assert_eq!(single.max, Some(32_000.0));

        assert_eq!(salary_min("15,000 - 25,000"), Some(15_000.0));
        assert_eq!(salary_max("15,000 - 25,000"), Some(25_000.0));
    }

    #[test]
    fn sentinels_have_no_bounds() {
        assert_eq!(salary_bounds(NEGOTIABLE), SalaryFigures::absent());
        assert_eq!(salary_bounds(NOT_SPECIFIED), SalaryFigures::absent());
        assert_eq!(salary_bounds("-"), SalaryFigures::absent());
    }
}
