//! Tabular reports over a view of the posting table. Every report is a
//! serialisable value; rendering is left to callers.

mod insights;
pub mod stats;
mod summary;
pub mod views;

use super::table::PostingView;
use crate::config::ReportConfig;

pub use insights::{title_tier, TOP_SKILLS};
pub use summary::{TOP_COMPANIES, TOP_LOCATIONS, TOP_NO_SALARY_GROUPS, TOP_SALARY_LOCATIONS};
pub use views::*;

pub struct JobReport;

impl JobReport {
    pub fn build(view: &PostingView<'_>, config: &ReportConfig) -> JobReportSummary {
        let demand = insights::skill_demand(view);

        JobReportSummary {
            overview: summary::overview(view),
            disclosure: summary::disclosure_breakdown(view),
            salary: summary::salary_statistics(view, config),
            salary_by_job_type: summary::salary_by_job_type(view),
            salary_by_location: summary::salary_by_location(view, config),
            high_paying: insights::high_paying(view, config.high_salary_threshold),
            job_types: summary::job_type_distribution(view),
            locations: summary::location_distribution(view),
            experience: summary::experience_distribution(view),
            companies: summary::company_distribution(view),
            disclosure_by_location: summary::disclosure_by_location(view),
            disclosure_by_job_type: summary::disclosure_by_job_type(view),
            skill_demand: insights::skill_demand_entries(&demand, view.len()),
            skill_pay: insights::skill_pay(view, &demand),
            expected_salaries: insights::expected_salaries(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postings::extraction::Extractor;
    use crate::postings::{JobTable, SalaryDisclosure};
    use std::io::Cursor;

    #[test]
    fn report_serialises_with_labels() {
        let csv = "title,company,description\n\
                   Officer,Acme,\"Port Louis MUR 15,000 - 25,000 Permanent\"\n\
                   Manager,Beta,Moka Negotiable Permanent. Excel\n";
        let table =
            JobTable::from_reader(Cursor::new(csv), &Extractor::default()).expect("table loads");
        let report = JobReport::build(&table.view(), &ReportConfig::default());
        let json = serde_json::to_value(&report).expect("serialises");

        assert_eq!(json["overview"]["total_postings"], 2);
        assert_eq!(json["disclosure"][0]["disclosure"], "has_numeric_salary");
        assert_eq!(json["salary"]["summary"]["mean"], 20_000.0);
        assert_eq!(json["salary_by_job_type"][0]["job_type_label"], "Permanent");
        assert_eq!(json["salary_by_job_type"][0]["count"], 1);
        assert_eq!(json["expected_salaries"][0]["skill"], "Excel");
        assert_eq!(json["expected_salaries"][0]["tier"], "management");
        assert_eq!(json["disclosure_by_location"][0]["location_label"], "Moka");
        assert_eq!(json["disclosure_by_location"][0]["no_salary_pct"], 100.0);
        assert_eq!(json["disclosure_by_job_type"][0]["no_salary"], 1);
    }

    #[test]
    fn report_over_disclosure_view() {
        let csv = "title,company,description\n\
                   A,X,\"MUR 20,000\"\n\
                   B,Y,Negotiable\n";
        let table =
            JobTable::from_reader(Cursor::new(csv), &Extractor::default()).expect("table loads");
        let view = table.by_disclosure(SalaryDisclosure::Negotiable);
        let report = JobReport::build(&view, &ReportConfig::default());
        assert_eq!(report.overview.total_postings, 1);
        assert_eq!(report.overview.salaried_postings, 0);
        assert!(report.salary.summary.is_none());
        assert_eq!(report.high_paying.count, 0);
    }
}
