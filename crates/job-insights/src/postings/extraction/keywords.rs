use super::vocabulary::{JOB_TYPE_RULES, REGIONS, SKILL_PHRASES};
use crate::postings::domain::{JobType, Location};
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// First region of the vocabulary mentioned anywhere in the text.
pub fn locate_location(description: &str) -> Location {
    let haystack = description.to_uppercase();
    REGIONS
        .iter()
        .find(|(name, _)| haystack.contains(&name.to_uppercase()))
        .map(|(_, location)| *location)
        .unwrap_or(Location::NotSpecified)
}

/// Employment type from the highest-priority keyword family present.
pub fn locate_job_type(description: &str) -> JobType {
    let haystack = description.to_uppercase();
    JOB_TYPE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| haystack.contains(keyword)))
        .map(|(_, job_type)| *job_type)
        .unwrap_or(JobType::NotSpecified)
}

/// Canonical labels of every vocabulary skill the text mentions.
pub fn locate_skills(description: &str) -> BTreeSet<String> {
    let haystack = description.to_lowercase();
    skill_vocabulary()
        .iter()
        .filter(|(phrase, _)| haystack.contains(*phrase))
        .map(|(_, label)| label.clone())
        .collect()
}

/// `(phrase, display label)` pairs, labels title-cased once.
pub fn skill_vocabulary() -> &'static [(&'static str, String)] {
    static VOCABULARY: OnceLock<Vec<(&'static str, String)>> = OnceLock::new();
    VOCABULARY.get_or_init(|| {
        SKILL_PHRASES
            .iter()
            .map(|phrase| (*phrase, title_case(phrase)))
            .collect()
    })
}

pub(crate) fn title_case(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                output.extend(ch.to_uppercase());
            } else {
                output.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            output.push(ch);
            at_word_start = true;
        }
    }
    output
}
