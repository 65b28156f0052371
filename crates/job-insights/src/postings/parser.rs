use super::domain::{RawPosting, SourceColumns};
use super::normalizer::normalize_header;
use super::DatasetError;
use std::io::Read;

pub(crate) const TITLE_COLUMN: &str = "title";
pub(crate) const COMPANY_COLUMN: &str = "company";
pub(crate) const DESCRIPTION_COLUMN: &str = "description";

#[derive(Debug)]
pub(crate) struct ParsedExport {
    pub(crate) columns: SourceColumns,
    pub(crate) rows: Vec<RawPosting>,
}

/// Reads every row verbatim; only the header row is trimmed.
pub(crate) fn parse_export<R: Read>(reader: R) -> Result<ParsedExport, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.to_string())
        .collect();
    let columns = locate_columns(headers)?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let fields = record.iter().map(str::to_string).collect();
        rows.push(RawPosting { fields });
    }

    Ok(ParsedExport { columns, rows })
}

fn locate_columns(headers: Vec<String>) -> Result<SourceColumns, DatasetError> {
    let find = |wanted: &'static str| {
        headers
            .iter()
            .position(|header| normalize_header(header) == wanted)
            .ok_or(DatasetError::MissingColumn(wanted))
    };

    let title = find(TITLE_COLUMN)?;
    let company = find(COMPANY_COLUMN)?;
    let description = find(DESCRIPTION_COLUMN)?;

    Ok(SourceColumns {
        headers,
        title,
        company,
        description,
    })
}
