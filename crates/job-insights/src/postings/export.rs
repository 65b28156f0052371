//! CSV export of the cleaned postings.
//!
//! Source columns are written first, verbatim and in source order, followed by
//! the derived columns. Absent values are empty cells.

use super::domain::{JobPosting, SourceColumns};
use super::table::PostingView;
use super::DatasetError;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub const DERIVED_COLUMNS: [&str; 11] = [
    "salary_extracted",
    "salary_cleaned",
    "salary_min",
    "salary_max",
    "salary_average",
    "location_cleaned",
    "job_type_cleaned",
    "experience_cleaned",
    "skills",
    "company_cleaned",
    "posted_date_cleaned",
];

pub const SKILL_SEPARATOR: &str = "; ";

pub fn export_headers(columns: &SourceColumns) -> Vec<String> {
    columns
        .headers
        .iter()
        .cloned()
        .chain(DERIVED_COLUMNS.iter().map(|column| column.to_string()))
        .collect()
}

pub fn export_record(posting: &JobPosting, columns: &SourceColumns) -> Vec<String> {
    let mut record = Vec::with_capacity(columns.headers.len() + DERIVED_COLUMNS.len());
    record.extend(
        (0..columns.headers.len())
            .map(|index| posting.source.field(index).unwrap_or_default().to_string()),
    );

    record.push(posting.salary_text_raw.as_text().to_string());
    record.push(posting.salary_text_clean.clone());
    record.push(format_number(posting.salary.min));
    record.push(format_number(posting.salary.max));
    record.push(format_number(posting.salary.average));
    record.push(posting.location.label().to_string());
    record.push(posting.job_type.label().to_string());
    record.push(posting.experience.label().to_string());
    record.push(
        posting
            .skills
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(SKILL_SEPARATOR),
    );
    record.push(posting.company_cleaned.clone());
    record.push(
        posting
            .posted_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );
    record
}

pub fn write_csv<W: Write>(
    view: &PostingView<'_>,
    columns: &SourceColumns,
    writer: W,
) -> Result<(), DatasetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(export_headers(columns))?;
    for posting in view.iter() {
        csv_writer.write_record(export_record(posting, columns))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv_to_path<P: AsRef<Path>>(
    view: &PostingView<'_>,
    columns: &SourceColumns,
    path: P,
) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_csv(view, columns, file)?;
    info!(path = %path.display(), rows = view.len(), "exported cleaned job postings");
    Ok(())
}

fn format_number(value: Option<f64>) -> String {
    value.map(|number| number.to_string()).unwrap_or_default()
}
