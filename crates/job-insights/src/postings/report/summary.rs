use super::super::domain::{ExperienceBand, JobType, Location, SalaryDisclosure};
use super::super::table::PostingView;
use super::stats::{bracket_counts, percentile, sample_std_dev, share_pct, sorted};
use super::views::{
    CompanyShareEntry, DisclosureEntry, ExperienceCount, JobTypeCount, JobTypeDisclosureEntry,
    JobTypeSalaryEntry, LocationCount, LocationDisclosureEntry, LocationSalaryEntry, OverviewView,
    SalaryStatsView, SalarySummary,
};
use crate::config::ReportConfig;
use std::collections::{BTreeMap, HashMap, HashSet};

pub const TOP_LOCATIONS: usize = 10;
pub const TOP_SALARY_LOCATIONS: usize = 10;
pub const TOP_COMPANIES: usize = 15;
pub const TOP_NO_SALARY_GROUPS: usize = 10;

pub(crate) fn overview(view: &PostingView<'_>) -> OverviewView {
    let unique_companies: HashSet<&str> = view
        .iter()
        .map(|posting| posting.company_cleaned.as_str())
        .collect();
    let unique_locations: HashSet<Location> = view.iter().map(|posting| posting.location).collect();
    let salaried_postings = view.salary_averages().len();

    OverviewView {
        total_postings: view.len(),
        unique_companies: unique_companies.len(),
        unique_locations: unique_locations.len(),
        salaried_postings,
        salaried_share_pct: share_pct(salaried_postings, view.len()),
    }
}

pub(crate) fn disclosure_breakdown(view: &PostingView<'_>) -> Vec<DisclosureEntry> {
    let mut counts: HashMap<SalaryDisclosure, usize> = HashMap::new();
    for posting in view.iter() {
        *counts.entry(posting.disclosure()).or_default() += 1;
    }

    SalaryDisclosure::ordered()
        .into_iter()
        .map(|disclosure| {
            let count = counts.get(&disclosure).copied().unwrap_or(0);
            DisclosureEntry {
                disclosure,
                disclosure_label: disclosure.label(),
                count,
                share_pct: share_pct(count, view.len()),
            }
        })
        .collect()
}

pub(crate) fn salary_statistics(view: &PostingView<'_>, config: &ReportConfig) -> SalaryStatsView {
    let averages = sorted(&view.salary_averages());
    let above_premium = averages
        .iter()
        .filter(|average| **average > config.premium_salary_threshold)
        .count();

    SalaryStatsView {
        summary: SalarySummary::from_values(&averages),
        std_dev: sample_std_dev(&averages),
        p25: percentile(&averages, 0.25),
        p75: percentile(&averages, 0.75),
        brackets: bracket_counts(&averages, &config.salary_brackets),
        premium_threshold: config.premium_salary_threshold,
        above_premium,
        above_premium_share_pct: share_pct(above_premium, averages.len()),
    }
}

pub(crate) fn salary_by_job_type(view: &PostingView<'_>) -> Vec<JobTypeSalaryEntry> {
    let mut groups: HashMap<JobType, Vec<f64>> = HashMap::new();
    for posting in view.iter() {
        if let Some(average) = posting.salary.average {
            groups.entry(posting.job_type).or_default().push(average);
        }
    }

    JobType::all()
        .into_iter()
        .filter_map(|job_type| {
            let values = groups.get(&job_type)?;
            Some(JobTypeSalaryEntry {
                job_type,
                job_type_label: job_type.label(),
                salary: SalarySummary::from_values(values)?,
                std_dev: sample_std_dev(values),
            })
        })
        .collect()
}

/// Locations ranked by mean salary, skipping those with too few salaried
/// postings to rank.
pub(crate) fn salary_by_location(
    view: &PostingView<'_>,
    config: &ReportConfig,
) -> Vec<LocationSalaryEntry> {
    let mut groups: BTreeMap<Location, Vec<f64>> = BTreeMap::new();
    for posting in view.iter() {
        if let Some(average) = posting.salary.average {
            groups.entry(posting.location).or_default().push(average);
        }
    }

    let mut entries: Vec<LocationSalaryEntry> = groups
        .into_iter()
        .filter(|(_, values)| values.len() >= config.min_location_sample)
        .filter_map(|(location, values)| {
            Some(LocationSalaryEntry {
                location,
                location_label: location.label(),
                salary: SalarySummary::from_values(&values)?,
            })
        })
        .collect();

    entries.sort_by(|left, right| right.salary.mean.total_cmp(&left.salary.mean));
    entries.truncate(TOP_SALARY_LOCATIONS);
    entries
}

pub(crate) fn job_type_distribution(view: &PostingView<'_>) -> Vec<JobTypeCount> {
    let counts = count_by(view, |posting| posting.job_type);
    ranked(counts)
        .into_iter()
        .map(|(job_type, count)| JobTypeCount {
            job_type,
            job_type_label: job_type.label(),
            count,
            share_pct: share_pct(count, view.len()),
        })
        .collect()
}

pub(crate) fn location_distribution(view: &PostingView<'_>) -> Vec<LocationCount> {
    let counts = count_by(view, |posting| posting.location);
    ranked(counts)
        .into_iter()
        .take(TOP_LOCATIONS)
        .map(|(location, count)| LocationCount {
            location,
            location_label: location.label(),
            count,
            share_pct: share_pct(count, view.len()),
        })
        .collect()
}

pub(crate) fn experience_distribution(view: &PostingView<'_>) -> Vec<ExperienceCount> {
    let counts = count_by(view, |posting| posting.experience);
    ExperienceBand::all()
        .into_iter()
        .filter_map(|experience| {
            let count = counts.get(&experience).copied()?;
            Some(ExperienceCount {
                experience,
                experience_label: experience.label(),
                count,
                share_pct: share_pct(count, view.len()),
            })
        })
        .collect()
}

pub(crate) fn company_distribution(view: &PostingView<'_>) -> Vec<CompanyShareEntry> {
    let counts = count_by(view, |posting| posting.company_cleaned.clone());
    ranked(counts)
        .into_iter()
        .take(TOP_COMPANIES)
        .map(|(company, count)| CompanyShareEntry {
            company,
            count,
            market_share_pct: share_pct(count, view.len()),
        })
        .collect()
}

/// Locations with the highest share of postings lacking a numeric salary.
pub(crate) fn disclosure_by_location(view: &PostingView<'_>) -> Vec<LocationDisclosureEntry> {
    disclosure_rates(view, |posting| posting.location)
        .into_iter()
        .take(TOP_NO_SALARY_GROUPS)
        .map(|(location, has_salary, no_salary)| LocationDisclosureEntry {
            location,
            location_label: location.label(),
            has_salary,
            no_salary,
            no_salary_pct: share_pct(no_salary, has_salary + no_salary),
        })
        .collect()
}

/// Job types ranked the same way, alongside how the postings without a
/// salary are spread across job types compared to the whole view.
pub(crate) fn disclosure_by_job_type(view: &PostingView<'_>) -> Vec<JobTypeDisclosureEntry> {
    let rates = disclosure_rates(view, |posting| posting.job_type);
    let total_no_salary: usize = rates.iter().map(|(_, _, no_salary)| no_salary).sum();

    rates
        .into_iter()
        .take(TOP_NO_SALARY_GROUPS)
        .map(|(job_type, has_salary, no_salary)| JobTypeDisclosureEntry {
            job_type,
            job_type_label: job_type.label(),
            has_salary,
            no_salary,
            no_salary_pct: share_pct(no_salary, has_salary + no_salary),
            overall_share_pct: share_pct(has_salary + no_salary, view.len()),
            no_salary_share_pct: share_pct(no_salary, total_no_salary),
        })
        .collect()
}

/// `(key, has_salary, no_salary)` sorted by the no-salary share, highest
/// first; ties keep key order.
fn disclosure_rates<K, F>(view: &PostingView<'_>, key: F) -> Vec<(K, usize, usize)>
where
    K: Ord,
    F: Fn(&super::super::domain::JobPosting) -> K,
{
    let mut groups: BTreeMap<K, (usize, usize)> = BTreeMap::new();
    for posting in view.iter() {
        let counts = groups.entry(key(posting)).or_insert((0, 0));
        if posting.salary.average.is_some() {
            counts.0 += 1;
        } else {
            counts.1 += 1;
        }
    }

    let mut rates: Vec<(K, usize, usize)> = groups
        .into_iter()
        .map(|(key, (has_salary, no_salary))| (key, has_salary, no_salary))
        .collect();
    rates.sort_by(|left, right| {
        let left_pct = share_pct(left.2, left.1 + left.2);
        let right_pct = share_pct(right.2, right.1 + right.2);
        right_pct.total_cmp(&left_pct)
    });
    rates
}

pub(crate) fn count_by<K, F>(view: &PostingView<'_>, key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&super::super::domain::JobPosting) -> K,
{
    let mut counts = BTreeMap::new();
    for posting in view.iter() {
        *counts.entry(key(posting)).or_insert(0) += 1;
    }
    counts
}

/// Highest count first; ties keep key order.
pub(crate) fn ranked<K>(counts: BTreeMap<K, usize>) -> Vec<(K, usize)> {
    let mut entries: Vec<(K, usize)> = counts.into_iter().collect();
    entries.sort_by(|left, right| right.1.cmp(&left.1));
    entries
}
