pub mod domain;
pub mod export;
pub mod extraction;
mod filter;
mod normalizer;
mod parser;
pub mod report;
mod table;

use std::path::PathBuf;

pub use domain::{
    ExperienceBand, JobPosting, JobType, Location, RawPosting, SalaryDisclosure, SalaryFigures,
    SalaryMention, SourceColumns, NEGOTIABLE, NOT_DISCLOSED, NOT_SPECIFIED,
};
pub use extraction::{ExtractedFields, Extractor};
pub use filter::{FilterError, FilterParams, PostingFilter};
pub use table::{deduplicate, JobTable, PostingView};

#[derive(Debug)]
pub enum DatasetError {
    MissingInput {
        path: PathBuf,
        source: std::io::Error,
    },
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::MissingInput { path, .. } => {
                write!(f, "job postings file not found: {}", path.display())
            }
            DatasetError::Io(err) => write!(f, "failed to read job postings: {}", err),
            DatasetError::Csv(err) => write!(f, "invalid job postings CSV data: {}", err),
            DatasetError::MissingColumn(column) => {
                write!(f, "job postings export has no `{}` column", column)
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::MissingInput { source, .. } => Some(source),
            DatasetError::Io(err) => Some(err),
            DatasetError::Csv(err) => Some(err),
            DatasetError::MissingColumn(_) => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
