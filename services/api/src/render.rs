use job_insights::postings::report::JobReportSummary;
use job_insights::postings::PostingFilter;
use std::io::{self, Write};

const LIST_LIMIT: usize = 10;

pub(crate) fn render_report<W: Write>(
    out: &mut W,
    report: &JobReportSummary,
    filter: &PostingFilter,
) -> io::Result<()> {
    writeln!(out, "Job postings report")?;
    if !filter.is_empty() {
        writeln!(out, "Filters: {}", describe_filter(filter))?;
    }

    let overview = &report.overview;
    writeln!(
        out,
        "- {} postings | {} companies | {} locations",
        overview.total_postings, overview.unique_companies, overview.unique_locations
    )?;
    writeln!(
        out,
        "- {} with a salary figure ({:.1}%)",
        overview.salaried_postings, overview.salaried_share_pct
    )?;

    writeln!(out, "\nSalary disclosure")?;
    for entry in &report.disclosure {
        writeln!(
            out,
            "  - {}: {} ({:.1}%)",
            entry.disclosure_label, entry.count, entry.share_pct
        )?;
    }

    writeln!(out, "\nSalary statistics")?;
    match &report.salary.summary {
        Some(summary) => {
            writeln!(
                out,
                "  - mean {} | median {} | range {} to {}",
                mur(summary.mean),
                mur(summary.median),
                mur(summary.min),
                mur(summary.max)
            )?;
            if let (Some(p25), Some(p75)) = (report.salary.p25, report.salary.p75) {
                writeln!(out, "  - interquartile {} to {}", mur(p25), mur(p75))?;
            }
            if let Some(std_dev) = report.salary.std_dev {
                writeln!(out, "  - std dev {}", mur(std_dev))?;
            }
            for bracket in &report.salary.brackets {
                writeln!(out, "  - {}: {}", bracket.label, bracket.count)?;
            }
            writeln!(
                out,
                "  - {} pay above {} ({:.1}% of salaried postings)",
                report.salary.above_premium,
                mur(report.salary.premium_threshold),
                report.salary.above_premium_share_pct
            )?;
        }
        None => writeln!(out, "  - no postings with a salary figure")?,
    }

    if !report.salary_by_job_type.is_empty() {
        writeln!(out, "\nAverage salary by job type")?;
        for entry in &report.salary_by_job_type {
            writeln!(
                out,
                "  - {}: {} (n={})",
                entry.job_type_label,
                mur(entry.salary.mean),
                entry.salary.count
            )?;
        }
    }

    if !report.salary_by_location.is_empty() {
        writeln!(out, "\nAverage salary by location")?;
        for entry in &report.salary_by_location {
            writeln!(
                out,
                "  - {}: {} (n={})",
                entry.location_label,
                mur(entry.salary.mean),
                entry.salary.count
            )?;
        }
    }

    let high = &report.high_paying;
    writeln!(
        out,
        "\nPostings paying above {}: {} ({:.1}%)",
        mur(high.threshold),
        high.count,
        high.share_pct
    )?;
    for posting in high.postings.iter().take(LIST_LIMIT) {
        writeln!(
            out,
            "  - {} at {} ({}): {}",
            posting.title,
            posting.company,
            posting.location_label,
            mur(posting.salary_average)
        )?;
    }

    writeln!(out, "\nJob types")?;
    for entry in &report.job_types {
        writeln!(out, "  - {}: {} ({:.1}%)", entry.job_type_label, entry.count, entry.share_pct)?;
    }

    writeln!(out, "\nTop locations")?;
    for entry in &report.locations {
        writeln!(out, "  - {}: {}", entry.location_label, entry.count)?;
    }

    writeln!(out, "\nExperience")?;
    for entry in &report.experience {
        writeln!(out, "  - {}: {}", entry.experience_label, entry.count)?;
    }

    writeln!(out, "\nTop companies")?;
    for entry in &report.companies {
        writeln!(
            out,
            "  - {}: {} ({:.2}% of postings)",
            entry.company, entry.count, entry.market_share_pct
        )?;
    }

    writeln!(out, "\nSkills in demand")?;
    for entry in report.skill_demand.iter().take(LIST_LIMIT) {
        writeln!(out, "  - {}: {}", entry.skill, entry.count)?;
    }

    if report
        .disclosure_by_location
        .iter()
        .any(|entry| entry.no_salary > 0)
    {
        writeln!(out, "\nPostings without a salary by location")?;
        for entry in &report.disclosure_by_location {
            writeln!(
                out,
                "  - {}: {:.1}% ({} of {})",
                entry.location_label,
                entry.no_salary_pct,
                entry.no_salary,
                entry.has_salary + entry.no_salary
            )?;
        }

        writeln!(out, "\nPostings without a salary by job type")?;
        for entry in &report.disclosure_by_job_type {
            writeln!(
                out,
                "  - {}: {:.1}% ({:.1}% of unsalaried postings, {:.1}% overall)",
                entry.job_type_label,
                entry.no_salary_pct,
                entry.no_salary_share_pct,
                entry.overall_share_pct
            )?;
        }
    }

    if !report.skill_pay.is_empty() {
        writeln!(out, "\nBest paid skills")?;
        for entry in report.skill_pay.iter().take(LIST_LIMIT) {
            writeln!(
                out,
                "  - {}: {} ({} to {}, {} salaried postings)",
                entry.skill,
                mur(entry.mean),
                mur(entry.min),
                mur(entry.max),
                entry.salaried_postings
            )?;
        }
    }

    if !report.expected_salaries.is_empty() {
        writeln!(out, "\nExpected pay where no figure is given")?;
        for entry in report.expected_salaries.iter().take(LIST_LIMIT) {
            writeln!(
                out,
                "  - {}: {} to {} ({}, {} postings)",
                entry.skill,
                mur(entry.expected_min),
                mur(entry.expected_max),
                entry.tier_label,
                entry.postings
            )?;
        }
    }

    Ok(())
}

fn describe_filter(filter: &PostingFilter) -> String {
    let mut parts = Vec::new();
    if let Some(disclosure) = filter.disclosure {
        parts.push(format!("disclosure={}", disclosure.label()));
    }
    if let Some(location) = filter.location {
        parts.push(format!("location={}", location.label()));
    }
    if let Some(job_type) = filter.job_type {
        parts.push(format!("job type={}", job_type.label()));
    }
    if let Some(experience) = filter.experience {
        parts.push(format!("experience={}", experience.label()));
    }
    if let Some(min) = filter.min_salary {
        parts.push(format!("salary >= {}", mur(min)));
    }
    if let Some(max) = filter.max_salary {
        parts.push(format!("salary <= {}", mur(max)));
    }
    parts.join(", ")
}

/// Whole rupees with thousands separators, e.g. `MUR 25,000`.
fn mur(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if rounded < 0 {
        format!("MUR -{grouped}")
    } else {
        format!("MUR {grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use job_insights::config::ReportConfig;
    use job_insights::postings::report::JobReport;
    use job_insights::postings::{Extractor, JobTable, Location};

    #[test]
    fn amounts_use_thousands_separators() {
        assert_eq!(mur(0.0), "MUR 0");
        assert_eq!(mur(999.4), "MUR 999");
        assert_eq!(mur(25_000.0), "MUR 25,000");
        assert_eq!(mur(1_234_567.0), "MUR 1,234,567");
    }

    #[test]
    fn report_text_lists_sections() {
        let csv = "title,company,description\n\
                   Officer,Acme,\"Port Louis MUR 30,000 Permanent\"\n\
                   Clerk,Beta,Port Louis Negotiable Permanent\n";
        let table = JobTable::from_reader(csv.as_bytes(), &Extractor::default()).expect("loads");
        let filter = PostingFilter {
            location: Some(Location::PortLouis),
            ..PostingFilter::default()
        };
        let report = JobReport::build(&table.filter(&filter), &ReportConfig::default());
        let mut rendered = Vec::new();
        render_report(&mut rendered, &report, &filter).expect("report renders");
        let text = String::from_utf8(rendered).expect("utf-8 report");

        assert!(text.contains("Filters: location=Port Louis"));
        assert!(text.contains("- 2 postings | 2 companies | 1 locations"));
        assert!(text.contains("mean MUR 30,000"));
        assert!(text.contains("Postings paying above MUR 10,000: 1"));
        assert!(text.contains("  - Port Louis: 50.0% (1 of 2)"));
    }
}
