use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NEGOTIABLE: &str = "Negotiable";
pub const NOT_DISCLOSED: &str = "Not disclosed";

/// Administrative regions recognised in posting text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    PortLouis,
    PlaineWilhems,
    Pamplemousses,
    BlackRiver,
    Moka,
    Flacq,
    RiviereDuRempart,
    GrandPort,
    Savanne,
    Mauritius,
    Rodrigues,
    NotSpecified,
}

impl Location {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PortLouis => "Port Louis",
            Self::PlaineWilhems => "Plaine Wilhems",
            Self::Pamplemousses => "Pamplemousses",
            Self::BlackRiver => "Black River",
            Self::Moka => "Moka",
            Self::Flacq => "Flacq",
            Self::RiviereDuRempart => "Riviere du Rempart",
            Self::GrandPort => "Grand Port",
            Self::Savanne => "Savanne",
            Self::Mauritius => "Mauritius",
            Self::Rodrigues => "Rodrigues",
            Self::NotSpecified => NOT_SPECIFIED,
        }
    }

    /// Accepts either the display label or the snake_case key, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        parse_labelled(value, &Self::all(), |location| location.label())
    }

    pub const fn all() -> [Self; 12] {
        [
            Self::PortLouis,
            Self::PlaineWilhems,
            Self::Pamplemousses,
            Self::BlackRiver,
            Self::Moka,
            Self::Flacq,
            Self::RiviereDuRempart,
            Self::GrandPort,
            Self::Savanne,
            Self::Mauritius,
            Self::Rodrigues,
            Self::NotSpecified,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Permanent,
    ContractTemporary,
    Trainee,
    PartTime,
    NotSpecified,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Permanent => "Permanent",
            Self::ContractTemporary => "Contract/Temporary",
            Self::Trainee => "Trainee",
            Self::PartTime => "Part-time",
            Self::NotSpecified => NOT_SPECIFIED,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_labelled(value, &Self::all(), |job_type| job_type.label())
    }

    pub const fn all() -> [Self; 5] {
        [
            Self::Permanent,
            Self::ContractTemporary,
            Self::Trainee,
            Self::PartTime,
            Self::NotSpecified,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceBand {
    EntryLevel,
    MidLevel,
    SeniorLevel,
    ExecutiveLevel,
    NotSpecified,
}

impl ExperienceBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::EntryLevel => "Entry Level (0-2 years)",
            Self::MidLevel => "Mid Level (3-5 years)",
            Self::SeniorLevel => "Senior Level (6-10 years)",
            Self::ExecutiveLevel => "Executive Level (10+ years)",
            Self::NotSpecified => NOT_SPECIFIED,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        parse_labelled(value, &Self::all(), |band| band.label())
    }

    pub const fn all() -> [Self; 5] {
        [
            Self::EntryLevel,
            Self::MidLevel,
            Self::SeniorLevel,
            Self::ExecutiveLevel,
            Self::NotSpecified,
        ]
    }
}

fn parse_labelled<T, F>(value: &str, candidates: &[T], label: F) -> Option<T>
where
    T: Copy + Serialize,
    F: Fn(T) -> &'static str,
{
    let wanted = value.trim();
    candidates.iter().copied().find(|candidate| {
        label(*candidate).eq_ignore_ascii_case(wanted)
            || serde_json::to_value(candidate)
                .ok()
                .and_then(|key| key.as_str().map(|key| key.eq_ignore_ascii_case(wanted)))
                .unwrap_or(false)
    })
}

/// What the salary locator found in a description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalaryMention {
    /// An amount or `"a - b"` range, exactly as captured.
    Amount(String),
    Negotiable,
    NotDisclosed,
    NotSpecified,
}

impl SalaryMention {
    pub fn as_text(&self) -> &str {
        match self {
            Self::Amount(text) => text,
            Self::Negotiable => NEGOTIABLE,
            Self::NotDisclosed => NOT_DISCLOSED,
            Self::NotSpecified => NOT_SPECIFIED,
        }
    }
}

impl fmt::Display for SalaryMention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Numeric salary bounds. Either both bounds are present or neither is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SalaryFigures {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub average: Option<f64>,
}

impl SalaryFigures {
    pub const fn absent() -> Self {
        Self {
            min: None,
            max: None,
            average: None,
        }
    }

    /// Orders the pair so `min <= max` and derives the midpoint.
    pub fn from_bounds(first: f64, second: f64) -> Self {
        let (min, max) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };

        Self {
            min: Some(min),
            max: Some(max),
            average: Some((min + max) / 2.0),
        }
    }
}

/// Salary-disclosure category; every posting falls in exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryDisclosure {
    HasNumericSalary,
    Negotiable,
    NotDisclosed,
}

impl SalaryDisclosure {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HasNumericSalary => "Numeric salary",
            Self::Negotiable => "Negotiable",
            Self::NotDisclosed => "Not disclosed / not specified",
        }
    }

    pub const fn ordered() -> [Self; 3] {
        [Self::HasNumericSalary, Self::Negotiable, Self::NotDisclosed]
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "numeric" | "has-numeric-salary" | "salary" => Some(Self::HasNumericSalary),
            "negotiable" => Some(Self::Negotiable),
            "not-disclosed" | "not-specified" | "none" => Some(Self::NotDisclosed),
            _ => None,
        }
    }
}

/// Header layout of the loaded export. Required columns are located by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceColumns {
    pub headers: Vec<String>,
    pub title: usize,
    pub company: usize,
    pub description: usize,
}

/// One source row, every column kept verbatim in header order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawPosting {
    pub fields: Vec<String>,
}

impl RawPosting {
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }
}

/// A deduplicated posting with every derived field populated.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub source: RawPosting,
    pub title: String,
    pub company: String,
    pub company_cleaned: String,
    pub description: Option<String>,
    pub salary_text_raw: SalaryMention,
    pub salary_text_clean: String,
    pub salary: SalaryFigures,
    pub location: Location,
    pub job_type: JobType,
    pub experience: ExperienceBand,
    pub skills: BTreeSet<String>,
    pub posted_date: Option<NaiveDate>,
}

impl JobPosting {
    pub fn disclosure(&self) -> SalaryDisclosure {
        if self.salary.average.is_some() {
            SalaryDisclosure::HasNumericSalary
        } else if self.salary_text_clean == NEGOTIABLE {
            SalaryDisclosure::Negotiable
        } else {
            SalaryDisclosure::NotDisclosed
        }
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }
}
