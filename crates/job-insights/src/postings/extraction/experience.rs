use crate::config::ExperienceThresholds;
use crate::postings::domain::ExperienceBand;
use regex::Regex;
use std::sync::OnceLock;

/// Experience phrases in priority order; capture 1 is the number of years.
pub const EXPERIENCE_PATTERNS: &[&str] = &[
    r"(?i)([0-9]+)\+?\s*years?",
    r"(?i)([0-9]+)\s*ans?\b",
    r"(?i)minimum\s+([0-9]+)\s*years?",
    r"(?i)at\s+least\s+([0-9]+)\s*years?",
];

fn compiled_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        EXPERIENCE_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("experience pattern compiles"))
            .collect()
    })
}

pub fn locate_experience(description: &str, thresholds: &ExperienceThresholds) -> ExperienceBand {
    compiled_patterns()
        .iter()
        .find_map(|regex| {
            let years = regex.captures(description)?.get(1)?;
            Some(parse_years(years.as_str()))
        })
        .map(|years| band_for_years(years, thresholds))
        .unwrap_or(ExperienceBand::NotSpecified)
}

/// Figures too large for `u32` saturate rather than failing the match.
fn parse_years(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

pub fn band_for_years(years: u32, thresholds: &ExperienceThresholds) -> ExperienceBand {
    if years <= thresholds.entry_max {
        ExperienceBand::EntryLevel
    } else if years <= thresholds.mid_max {
        ExperienceBand::MidLevel
    } else if years <= thresholds.senior_max {
        ExperienceBand::SeniorLevel
    } else {
        ExperienceBand::ExecutiveLevel
    }
}
