use super::super::domain::{JobPosting, SalaryDisclosure};
use super::super::extraction::vocabulary::{MID_TITLE_KEYWORDS, SENIOR_TITLE_KEYWORDS};
use super::super::table::PostingView;
use super::stats::{mean, share_pct};
use super::summary::ranked;
use super::views::{
    ExpectedSalaryEntry, HighPayingPostingView, HighPayingView, SalaryTier, SkillDemandEntry,
    SkillPayEntry,
};
use std::collections::{BTreeMap, HashSet};

pub const TOP_SKILLS: usize = 20;

pub(crate) fn high_paying(view: &PostingView<'_>, threshold: f64) -> HighPayingView {
    let postings: Vec<&JobPosting> = view
        .iter()
        .filter(|posting| posting.salary.average.is_some_and(|average| average > threshold))
        .collect();
    let averages: Vec<f64> = postings
        .iter()
        .filter_map(|posting| posting.salary.average)
        .collect();
    let unique_companies: HashSet<&str> = postings
        .iter()
        .map(|posting| posting.company_cleaned.as_str())
        .collect();

    HighPayingView {
        threshold,
        count: postings.len(),
        share_pct: share_pct(postings.len(), view.len()),
        mean: mean(&averages),
        max: averages.iter().copied().reduce(f64::max),
        unique_companies: unique_companies.len(),
        postings: postings
            .iter()
            .filter_map(|posting| {
                Some(HighPayingPostingView {
                    title: posting.title.clone(),
                    company: posting.company_cleaned.clone(),
                    location_label: posting.location.label(),
                    job_type_label: posting.job_type.label(),
                    experience_label: posting.experience.label(),
                    salary_min: posting.salary.min,
                    salary_max: posting.salary.max,
                    salary_average: posting.salary.average?,
                })
            })
            .collect(),
    }
}

/// Most frequent skills, ties broken alphabetically.
pub(crate) fn skill_demand(view: &PostingView<'_>) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for posting in view.iter() {
        for skill in &posting.skills {
            *counts.entry(skill.clone()).or_insert(0) += 1;
        }
    }

    let mut entries = ranked(counts);
    entries.truncate(TOP_SKILLS);
    entries
}

pub(crate) fn skill_demand_entries(
    demand: &[(String, usize)],
    total: usize,
) -> Vec<SkillDemandEntry> {
    demand
        .iter()
        .map(|(skill, count)| SkillDemandEntry {
            skill: skill.clone(),
            count: *count,
            share_pct: share_pct(*count, total),
        })
        .collect()
}

/// Pay among salaried postings for each in-demand skill, best paid first.
/// Skills never seen with a salary are left out.
pub(crate) fn skill_pay(view: &PostingView<'_>, demand: &[(String, usize)]) -> Vec<SkillPayEntry> {
    let mut entries: Vec<SkillPayEntry> = demand
        .iter()
        .filter_map(|(skill, postings)| {
            let averages: Vec<f64> = view
                .iter()
                .filter(|posting| posting.has_skill(skill))
                .filter_map(|posting| posting.salary.average)
                .collect();

            Some(SkillPayEntry {
                skill: skill.clone(),
                postings: *postings,
                salaried_postings: averages.len(),
                mean: mean(&averages)?,
                min: averages.iter().copied().reduce(f64::min)?,
                max: averages.iter().copied().reduce(f64::max)?,
            })
        })
        .collect();

    entries.sort_by(|left, right| right.mean.total_cmp(&left.mean));
    entries
}

/// Pay band suggested by a set of job titles: any senior keyword wins,
/// then any mid-level keyword.
pub fn title_tier<'a, I>(titles: I) -> SalaryTier
where
    I: IntoIterator<Item = &'a str>,
{
    let titles: Vec<String> = titles.into_iter().map(str::to_lowercase).collect();
    let mentions = |keywords: &[&str]| {
        titles
            .iter()
            .any(|title| keywords.iter().any(|keyword| title.contains(keyword)))
    };

    if mentions(SENIOR_TITLE_KEYWORDS) {
        SalaryTier::Management
    } else if mentions(MID_TITLE_KEYWORDS) {
        SalaryTier::MidLevel
    } else {
        SalaryTier::EntryLevel
    }
}

/// Expected pay for the in-demand skills of postings that give no figure.
pub(crate) fn expected_salaries(view: &PostingView<'_>) -> Vec<ExpectedSalaryEntry> {
    let undisclosed: Vec<&JobPosting> = view
        .iter()
        .filter(|posting| posting.disclosure() != SalaryDisclosure::HasNumericSalary)
        .collect();
    if undisclosed.is_empty() {
        return Vec::new();
    }

    let mut demand: BTreeMap<String, usize> = BTreeMap::new();
    for posting in &undisclosed {
        for skill in &posting.skills {
            *demand.entry(skill.clone()).or_insert(0) += 1;
        }
    }
    let mut demand = ranked(demand);
    demand.truncate(TOP_SKILLS);

    let mut entries: Vec<ExpectedSalaryEntry> = demand
        .into_iter()
        .map(|(skill, postings)| {
            let tier = title_tier(
                undisclosed
                    .iter()
                    .filter(|posting| posting.has_skill(&skill))
                    .map(|posting| posting.title.as_str()),
            );
            let (expected_min, expected_max) = tier.range();
            ExpectedSalaryEntry {
                skill,
                postings,
                tier,
                tier_label: tier.label(),
                expected_min,
                expected_max,
                expected_average: (expected_min + expected_max) / 2.0,
            }
        })
        .collect();

    entries.sort_by(|left, right| right.expected_average.total_cmp(&left.expected_average));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postings::extraction::Extractor;
    use crate::postings::JobTable;
    use std::io::Cursor;

    fn table() -> JobTable {
        let csv = "title,company,description\n\
                   Finance Officer,Acme,\"MUR 40,000 excel and accounting\"\n\
                   Clerk,Beta,\"MUR 9,000 excel\"\n\
                   Sales Manager,Gamma,Negotiable. sales\n\
                   Cashier,Delta,Not disclosed. sales\n\
                   Receptionist,Eta,Just excel\n";
        JobTable::from_reader(Cursor::new(csv), &Extractor::default()).expect("table loads")
    }

    #[test]
    fn high_paying_is_strictly_above_threshold() {
        let table = table();
        let view = high_paying(&table.view(), 9_000.0);
        assert_eq!(view.count, 1);
        assert_eq!(view.postings[0].title, "Finance Officer");
        assert_eq!(view.max, Some(40_000.0));
        assert_eq!(view.unique_companies, 1);
    }

    #[test]
    fn skill_demand_ranks_by_count_then_name() {
        let table = table();
        let demand = skill_demand(&table.view());
        assert_eq!(demand[0], ("Excel".to_string(), 3));
        assert_eq!(demand[1], ("Sales".to_string(), 2));
        assert_eq!(demand[2], ("Accounting".to_string(), 1));
    }

    #[test]
    fn skill_pay_uses_salaried_postings_only() {
        let table = table();
        let demand = skill_demand(&table.view());
        let pay = skill_pay(&table.view(), &demand);
        let excel = pay.iter().find(|entry| entry.skill == "Excel").expect("excel paid");
        assert_eq!(excel.postings, 3);
        assert_eq!(excel.salaried_postings, 2);
        assert_eq!(excel.mean, 24_500.0);
        assert_eq!(excel.min, 9_000.0);
        assert!(pay.iter().all(|entry| entry.skill != "Sales"));
        assert_eq!(pay[0].skill, "Accounting");
    }

    #[test]
    fn title_tier_prefers_senior_keywords() {
        assert_eq!(title_tier(["Clerk", "HEAD of Sales"]), SalaryTier::Management);
        assert_eq!(title_tier(["Data Analyst", "Clerk"]), SalaryTier::MidLevel);
        assert_eq!(title_tier(["Cashier"]), SalaryTier::EntryLevel);
        assert_eq!(title_tier(std::iter::empty::<&str>()), SalaryTier::EntryLevel);
    }

    #[test]
    fn expected_salaries_cover_undisclosed_postings() {
        let table = table();
        let expected = expected_salaries(&table.view());
        let skills: Vec<&str> = expected.iter().map(|entry| entry.skill.as_str()).collect();
        assert_eq!(skills, vec!["Sales", "Excel"]);
        assert_eq!(expected[0].tier, SalaryTier::Management);
        assert_eq!(expected[0].expected_average, 90_000.0);
        assert_eq!(expected[1].tier, SalaryTier::EntryLevel);
        assert_eq!(expected[1].postings, 1);
    }
}
