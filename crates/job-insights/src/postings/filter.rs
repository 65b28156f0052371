use super::domain::{ExperienceBand, JobPosting, JobType, Location, SalaryDisclosure};
use serde::Deserialize;
use thiserror::Error;

/// Equality and salary-range predicates over a posting table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingFilter {
    pub disclosure: Option<SalaryDisclosure>,
    pub location: Option<Location>,
    pub job_type: Option<JobType>,
    pub experience: Option<ExperienceBand>,
    /// Inclusive bounds on the salary average. Postings without an average
    /// never match once either bound is set.
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
}

impl PostingFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, posting: &JobPosting) -> bool {
        if self.disclosure.is_some_and(|wanted| posting.disclosure() != wanted) {
            return false;
        }
        if self.location.is_some_and(|wanted| posting.location != wanted) {
            return false;
        }
        if self.job_type.is_some_and(|wanted| posting.job_type != wanted) {
            return false;
        }
        if self.experience.is_some_and(|wanted| posting.experience != wanted) {
            return false;
        }

        if self.min_salary.is_none() && self.max_salary.is_none() {
            return true;
        }

        match posting.salary.average {
            Some(average) => {
                self.min_salary.map_or(true, |min| average >= min)
                    && self.max_salary.map_or(true, |max| average <= max)
            }
            None => false,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("unknown salary disclosure `{0}` (expected numeric, negotiable or not-disclosed)")]
    UnknownDisclosure(String),
    #[error("unknown location `{0}`")]
    UnknownLocation(String),
    #[error("unknown job type `{0}`")]
    UnknownJobType(String),
    #[error("unknown experience band `{0}`")]
    UnknownExperience(String),
    #[error("{field} must be a non-negative number")]
    InvalidSalary { field: &'static str },
    #[error("min_salary ({min}) is greater than max_salary ({max})")]
    InvertedSalaryRange { min: f64, max: f64 },
}

/// Filter as received from a query string or the command line. Blank values
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub disclosure: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience: Option<String>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
}

impl TryFrom<FilterParams> for PostingFilter {
    type Error = FilterError;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        let disclosure = parse_option(params.disclosure, SalaryDisclosure::parse)
            .map_err(FilterError::UnknownDisclosure)?;
        let location =
            parse_option(params.location, Location::parse).map_err(FilterError::UnknownLocation)?;
        let job_type =
            parse_option(params.job_type, JobType::parse).map_err(FilterError::UnknownJobType)?;
        let experience = parse_option(params.experience, ExperienceBand::parse)
            .map_err(FilterError::UnknownExperience)?;

        let min_salary = validate_salary(params.min_salary, "min_salary")?;
        let max_salary = validate_salary(params.max_salary, "max_salary")?;
        if let (Some(min), Some(max)) = (min_salary, max_salary) {
            if min > max {
                return Err(FilterError::InvertedSalaryRange { min, max });
            }
        }

        Ok(Self {
            disclosure,
            location,
            job_type,
            experience,
            min_salary,
            max_salary,
        })
    }
}

fn parse_option<T>(value: Option<String>, parse: fn(&str) -> Option<T>) -> Result<Option<T>, String> {
    match value {
        Some(raw) if !raw.trim().is_empty() => parse(&raw).map(Some).ok_or(raw),
        _ => Ok(None),
    }
}

fn validate_salary(value: Option<f64>, field: &'static str) -> Result<Option<f64>, FilterError> {
    match value {
        Some(amount) if !amount.is_finite() || amount < 0.0 => {
            Err(FilterError::InvalidSalary { field })
        }
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postings::extraction::Extractor;
    use crate::postings::JobTable;
    use std::io::Cursor;

    fn table() -> JobTable {
        let csv = "title,company,description\n\
                   Clerk,Acme,\"Port Louis MUR 15,000 - 25,000 Permanent\"\n\
                   Analyst,Beta,\"Moka MUR 40,000 Contract\"\n\
                   Cashier,Gamma,Port Louis Negotiable Permanent\n\
                   Driver,Delta,Flacq part-time\n";
        JobTable::from_reader(Cursor::new(csv), &Extractor::default()).expect("table loads")
    }

    #[test]
    fn equality_predicates_combine() {
        let table = table();
        let filter = PostingFilter {
            location: Some(Location::PortLouis),
            job_type: Some(JobType::Permanent),
            ..PostingFilter::default()
        };
        let titles: Vec<&str> = table
            .filter(&filter)
            .iter()
            .map(|posting| posting.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Clerk", "Cashier"]);
    }

    #[test]
    fn salary_bounds_are_inclusive_and_drop_unsalaried() {
        let table = table();
        let filter = PostingFilter {
            min_salary: Some(20_000.0),
            max_salary: Some(40_000.0),
            ..PostingFilter::default()
        };
        let view = table.filter(&filter);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|posting| posting.salary.average.is_some()));
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let table = table();
        let filter = PostingFilter::default();
        assert!(filter.is_empty());
        assert_eq!(table.filter(&filter).len(), table.len());
    }

    #[test]
    fn params_parse_labels_and_keys() {
        let params = FilterParams {
            disclosure: Some("numeric".into()),
            location: Some("Port Louis".into()),
            job_type: Some("contract_temporary".into()),
            experience: Some(" ".into()),
            min_salary: Some(1_000.0),
            max_salary: None,
        };
        let filter = PostingFilter::try_from(params).expect("valid params");
        assert_eq!(filter.disclosure, Some(SalaryDisclosure::HasNumericSalary));
        assert_eq!(filter.location, Some(Location::PortLouis));
        assert_eq!(filter.job_type, Some(JobType::ContractTemporary));
        assert_eq!(filter.experience, None);
    }

    #[test]
    fn params_reject_unknown_values_and_bad_ranges() {
        let unknown = FilterParams {
            location: Some("Atlantis".into()),
            ..FilterParams::default()
        };
        assert_eq!(
            PostingFilter::try_from(unknown),
            Err(FilterError::UnknownLocation("Atlantis".into()))
        );

        let inverted = FilterParams {
            min_salary: Some(50_000.0),
            max_salary: Some(10_000.0),
            ..FilterParams::default()
        };
        assert!(matches!(
            PostingFilter::try_from(inverted),
            Err(FilterError::InvertedSalaryRange { .. })
        ));

        let negative = FilterParams {
            max_salary: Some(-1.0),
            ..FilterParams::default()
        };
        assert_eq!(
            PostingFilter::try_from(negative),
            Err(FilterError::InvalidSalary {
                field: "max_salary"
            })
        );
    }
}
