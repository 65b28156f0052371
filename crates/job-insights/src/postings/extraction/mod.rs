//! Field extraction from free-text job descriptions.
//!
//! Every locator is a pure function of the description. A locator that finds
//! nothing yields its field's default; no locator can fail the record.

mod experience;
mod keywords;
mod posted_date;
mod salary;
pub mod vocabulary;

use crate::config::ExtractionConfig;
use crate::postings::domain::{
    ExperienceBand, JobType, Location, SalaryFigures, SalaryMention,
};
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub use experience::{band_for_years, locate_experience, EXPERIENCE_PATTERNS};
pub use keywords::{locate_job_type, locate_location, locate_skills, skill_vocabulary};
pub use posted_date::locate_posted_date;
pub use salary::{
    clean_salary, is_sentinel, locate_salary, salary_bounds, salary_max, salary_min,
    SalaryCapture, SALARY_PATTERNS,
};

/// Everything derived from one description.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    pub salary_text_raw: SalaryMention,
    pub salary_text_clean: String,
    pub salary: SalaryFigures,
    pub location: Location,
    pub job_type: JobType,
    pub experience: ExperienceBand,
    pub skills: BTreeSet<String>,
    pub posted_date: Option<NaiveDate>,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        let salary_text_raw = SalaryMention::NotSpecified;
        let salary_text_clean = clean_salary(salary_text_raw.as_text());
        Self {
            salary_text_raw,
            salary_text_clean,
            salary: SalaryFigures::absent(),
            location: Location::NotSpecified,
            job_type: JobType::NotSpecified,
            experience: ExperienceBand::NotSpecified,
            skills: BTreeSet::new(),
            posted_date: None,
        }
    }
}

/// Applies the configured locators to descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    config: ExtractionConfig,
}

impl Extractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// A missing description yields every field's default.
    pub fn extract(&self, description: Option<&str>) -> ExtractedFields {
        let Some(description) = description else {
            return ExtractedFields::default();
        };

        let salary_text_raw = locate_salary(description, self.config.salary_floor);
        let salary_text_clean = clean_salary(salary_text_raw.as_text());
        let salary = salary_bounds(&salary_text_clean);

        ExtractedFields {
            salary_text_raw,
            salary_text_clean,
            salary,
            location: locate_location(description),
            job_type: locate_job_type(description),
            experience: locate_experience(description, &self.config.experience),
            skills: locate_skills(description),
            posted_date: locate_posted_date(description),
        }
    }
}
