use super::domain::{JobPosting, RawPosting, SalaryDisclosure, SourceColumns};
use super::extraction::Extractor;
use super::filter::PostingFilter;
use super::normalizer::{clean_company, non_blank};
use super::{parser, DatasetError};
use std::collections::HashSet;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, info};

/// Deduplicated postings with every derived field computed. Built once per
/// load and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct JobTable {
    columns: SourceColumns,
    postings: Vec<JobPosting>,
    source_rows: usize,
}

impl JobTable {
    pub fn from_path<P: AsRef<Path>>(path: P, extractor: &Extractor) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => DatasetError::MissingInput {
                path: path.to_path_buf(),
                source,
            },
            _ => DatasetError::Io(source),
        })?;

        let table = Self::from_reader(file, extractor)?;
        info!(
            path = %path.display(),
            rows = table.len(),
            duplicates = table.duplicates_removed(),
            "loaded job postings"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R, extractor: &Extractor) -> Result<Self, DatasetError> {
        let parsed = parser::parse_export(reader)?;
        Ok(Self::from_rows(parsed.columns, parsed.rows, extractor))
    }

    pub fn from_rows(columns: SourceColumns, rows: Vec<RawPosting>, extractor: &Extractor) -> Self {
        let source_rows = rows.len();
        let unique = deduplicate(rows);
        debug!(
            source_rows,
            unique_rows = unique.len(),
            "deduplicated job postings"
        );

        let postings = unique
            .into_iter()
            .map(|row| build_posting(&columns, row, extractor))
            .collect();

        Self {
            columns,
            postings,
            source_rows,
        }
    }

    pub fn columns(&self) -> &SourceColumns {
        &self.columns
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Rows read from the source before deduplication.
    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    pub fn duplicates_removed(&self) -> usize {
        self.source_rows - self.postings.len()
    }

    pub fn view(&self) -> PostingView<'_> {
        PostingView {
            postings: self.postings.iter().collect(),
        }
    }

    pub fn by_disclosure(&self, disclosure: SalaryDisclosure) -> PostingView<'_> {
        self.view().by_disclosure(disclosure)
    }

    pub fn filter(&self, filter: &PostingFilter) -> PostingView<'_> {
        self.view().filter(filter)
    }
}

/// Borrowed subset of a [`JobTable`], in table order.
#[derive(Debug, Clone, Default)]
pub struct PostingView<'a> {
    postings: Vec<&'a JobPosting>,
}

impl<'a> PostingView<'a> {
    pub fn from_postings(postings: &'a [JobPosting]) -> Self {
        Self {
            postings: postings.iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a JobPosting> + '_ {
        self.postings.iter().copied()
    }

    pub fn postings(&self) -> &[&'a JobPosting] {
        &self.postings
    }

    pub fn by_disclosure(&self, disclosure: SalaryDisclosure) -> PostingView<'a> {
        self.retain(|posting| posting.disclosure() == disclosure)
    }

    pub fn filter(&self, filter: &PostingFilter) -> PostingView<'a> {
        self.retain(|posting| filter.matches(posting))
    }

    /// Salary averages of the postings that have one.
    pub fn salary_averages(&self) -> Vec<f64> {
        self.iter().filter_map(|posting| posting.salary.average).collect()
    }

    fn retain<F>(&self, keep: F) -> PostingView<'a>
    where
        F: Fn(&JobPosting) -> bool,
    {
        PostingView {
            postings: self.iter().filter(|posting| keep(*posting)).collect(),
        }
    }
}

/// Drops rows equal to an earlier row across every column, keeping the
/// first occurrence in place.
pub fn deduplicate(rows: Vec<RawPosting>) -> Vec<RawPosting> {
    let mut seen: HashSet<RawPosting> = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect()
}

fn build_posting(columns: &SourceColumns, source: RawPosting, extractor: &Extractor) -> JobPosting {
    let title = source.field(columns.title).unwrap_or_default().to_string();
    let company = source.field(columns.company).unwrap_or_default().to_string();
    let description = non_blank(source.field(columns.description)).map(str::to_string);
    let fields = extractor.extract(description.as_deref());

    JobPosting {
        company_cleaned: clean_company(&company),
        title,
        company,
        description,
        salary_text_raw: fields.salary_text_raw,
        salary_text_clean: fields.salary_text_clean,
        salary: fields.salary,
        location: fields.location,
        job_type: fields.job_type,
        experience: fields.experience,
        skills: fields.skills,
        posted_date: fields.posted_date,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postings::domain::{Location, NOT_SPECIFIED};
    use std::io::Cursor;

    fn row(values: &[&str]) -> RawPosting {
        RawPosting {
            fields: values.iter().map(|value| value.to_string()).collect(),
        }
    }

    fn load(csv: &str) -> JobTable {
        JobTable::from_reader(Cursor::new(csv.to_string()), &Extractor::default())
            .expect("table loads")
    }

    #[test]
    fn deduplicate_keeps_first_occurrence_order() {
        let rows = vec![
            row(&["a", "1"]),
            row(&["b", "2"]),
            row(&["a", "1"]),
            row(&["a", "2"]),
            row(&["b", "2"]),
        ];
        let unique = deduplicate(rows);
        assert_eq!(
            unique,
            vec![row(&["a", "1"]), row(&["b", "2"]), row(&["a", "2"])]
        );
        assert_eq!(deduplicate(unique.clone()), unique);
    }

    #[test]
    fn rows_differing_in_any_column_are_kept() {
        let table = load(
            "title,company,description,url\n\
             Clerk,Acme,Port Louis,http://a\n\
             Clerk,Acme,Port Louis,http://b\n",
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.duplicates_removed(), 0);
    }

    #[test]
    fn table_counts_deduplicated_rows() {
        let table = load(
            "title,company,description\n\
             Clerk,Acme,Based in Moka\n\
             Clerk,Acme,Based in Moka\n\
             Driver,Beta,\n",
        );
        assert_eq!(table.source_rows(), 3);
        assert_eq!(table.len(), 2);
        assert_eq!(table.postings()[0].location, Location::Moka);
        let driver = &table.postings()[1];
        assert_eq!(driver.description, None);
        assert_eq!(driver.salary_text_clean, NOT_SPECIFIED);
    }

    #[test]
    fn disclosure_views_partition_the_table() {
        let table = load(
            "title,company,description\n\
             A,X,\"Pay MUR 20,000\"\n\
             B,X,Salary Negotiable\n\
             C,X,Salary Not disclosed\n\
             D,X,Nothing here\n",
        );
        let numeric = table.by_disclosure(SalaryDisclosure::HasNumericSalary);
        let negotiable = table.by_disclosure(SalaryDisclosure::Negotiable);
        let hidden = table.by_disclosure(SalaryDisclosure::NotDisclosed);
        assert_eq!(numeric.len(), 1);
        assert_eq!(negotiable.len(), 2);
        assert_eq!(hidden.len(), 1);
        assert_eq!(numeric.len() + negotiable.len() + hidden.len(), table.len());
    }

    #[test]
    fn company_is_trimmed_but_source_kept() {
        let table = load("title,company,description\nClerk,  Acme Ltd  ,text\n");
        let posting = &table.postings()[0];
        assert_eq!(posting.company, "  Acme Ltd  ");
        assert_eq!(posting.company_cleaned, "Acme Ltd");
    }

    #[test]
    fn missing_file_is_reported_as_missing_input() {
        let error = JobTable::from_path("/definitely/not/here.csv", &Extractor::default())
            .expect_err("missing file");
        assert!(matches!(error, DatasetError::MissingInput { .. }));
    }
}
