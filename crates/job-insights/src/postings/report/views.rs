use super::super::domain::{ExperienceBand, JobType, Location, SalaryDisclosure};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OverviewView {
    pub total_postings: usize,
    pub unique_companies: usize,
    pub unique_locations: usize,
    pub salaried_postings: usize,
    pub salaried_share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisclosureEntry {
    pub disclosure: SalaryDisclosure,
    pub disclosure_label: &'static str,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryBracketEntry {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalarySummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalaryStatsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SalarySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p25: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p75: Option<f64>,
    pub brackets: Vec<SalaryBracketEntry>,
    pub premium_threshold: f64,
    pub above_premium: usize,
    pub above_premium_share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobTypeSalaryEntry {
    pub job_type: JobType,
    pub job_type_label: &'static str,
    #[serde(flatten)]
    pub salary: SalarySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationSalaryEntry {
    pub location: Location,
    pub location_label: &'static str,
    #[serde(flatten)]
    pub salary: SalarySummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct HighPayingPostingView {
    pub title: String,
    pub company: String,
    pub location_label: &'static str,
    pub job_type_label: &'static str,
    pub experience_label: &'static str,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_average: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HighPayingView {
    pub threshold: f64,
    pub count: usize,
    pub share_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub unique_companies: usize,
    pub postings: Vec<HighPayingPostingView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobTypeCount {
    pub job_type: JobType,
    pub job_type_label: &'static str,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationCount {
    pub location: Location,
    pub location_label: &'static str,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperienceCount {
    pub experience: ExperienceBand,
    pub experience_label: &'static str,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyShareEntry {
    pub company: String,
    pub count: usize,
    pub market_share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillDemandEntry {
    pub skill: String,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillPayEntry {
    pub skill: String,
    pub postings: usize,
    pub salaried_postings: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Title-based pay band used when a posting gives no figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryTier {
    EntryLevel,
    MidLevel,
    Management,
}

impl SalaryTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::EntryLevel => "Entry Level",
            Self::MidLevel => "Mid Level",
            Self::Management => "Management",
        }
    }

    /// Expected monthly range in MUR.
    pub const fn range(self) -> (f64, f64) {
        match self {
            Self::EntryLevel => (15_000.0, 25_000.0),
            Self::MidLevel => (25_000.0, 45_000.0),
            Self::Management => (60_000.0, 120_000.0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpectedSalaryEntry {
    pub skill: String,
    pub postings: usize,
    pub tier: SalaryTier,
    pub tier_label: &'static str,
    pub expected_min: f64,
    pub expected_max: f64,
    pub expected_average: f64,
}

/// Postings in one location with and without a numeric salary.
#[derive(Debug, Clone, Serialize)]
pub struct LocationDisclosureEntry {
    pub location: Location,
    pub location_label: &'static str,
    pub has_salary: usize,
    pub no_salary: usize,
    pub no_salary_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobTypeDisclosureEntry {
    pub job_type: JobType,
    pub job_type_label: &'static str,
    pub has_salary: usize,
    pub no_salary: usize,
    pub no_salary_pct: f64,
    /// Share of all postings in the view that carry this job type.
    pub overall_share_pct: f64,
    /// Share of the postings without a salary that carry this job type.
    pub no_salary_share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReportSummary {
    pub overview: OverviewView,
    pub disclosure: Vec<DisclosureEntry>,
    pub salary: SalaryStatsView,
    pub salary_by_job_type: Vec<JobTypeSalaryEntry>,
    pub salary_by_location: Vec<LocationSalaryEntry>,
    pub high_paying: HighPayingView,
    pub job_types: Vec<JobTypeCount>,
    pub locations: Vec<LocationCount>,
    pub experience: Vec<ExperienceCount>,
    pub companies: Vec<CompanyShareEntry>,
    pub disclosure_by_location: Vec<LocationDisclosureEntry>,
    pub disclosure_by_job_type: Vec<JobTypeDisclosureEntry>,
    pub skill_demand: Vec<SkillDemandEntry>,
    pub skill_pay: Vec<SkillPayEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expected_salaries: Vec<ExpectedSalaryEntry>,
}
