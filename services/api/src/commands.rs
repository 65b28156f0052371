use crate::infra::{apply_dataset_override, load_table};
use crate::render::render_report;
use clap::Args;
use job_insights::config::AppConfig;
use job_insights::error::AppError;
use job_insights::postings::export::write_csv_to_path;
use job_insights::postings::report::JobReport;
use job_insights::postings::{FilterParams, PostingFilter};
use job_insights::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct FilterArgs {
    /// Salary disclosure category: numeric, negotiable or not-disclosed
    #[arg(long)]
    pub(crate) disclosure: Option<String>,
    /// Region label, e.g. "Port Louis"
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Job type label, e.g. "Permanent" or "Contract/Temporary"
    #[arg(long)]
    pub(crate) job_type: Option<String>,
    /// Experience band label or key, e.g. mid_level
    #[arg(long)]
    pub(crate) experience: Option<String>,
    /// Lowest average salary to include (MUR)
    #[arg(long)]
    pub(crate) min_salary: Option<f64>,
    /// Highest average salary to include (MUR)
    #[arg(long)]
    pub(crate) max_salary: Option<f64>,
}

impl From<FilterArgs> for FilterParams {
    fn from(args: FilterArgs) -> Self {
        Self {
            disclosure: args.disclosure,
            location: args.location,
            job_type: args.job_type,
            experience: args.experience,
            min_salary: args.min_salary,
            max_salary: args.max_salary,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Job postings CSV (defaults to APP_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Job postings CSV (defaults to APP_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Destination of the cleaned CSV
    #[arg(long)]
    pub(crate) output: PathBuf,
    #[command(flatten)]
    pub(crate) filter: FilterArgs,
}

fn prepare(dataset: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    apply_dataset_override(&mut config, dataset);
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        dataset,
        filter,
        json,
    } = args;

    let filter = PostingFilter::try_from(FilterParams::from(filter))?;
    let config = prepare(dataset)?;
    let table = load_table(&config)?;
    let view = table.filter(&filter);
    let report = JobReport::build(&view, &config.report);

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|err| AppError::Io(err.into()))?;
        println!("{rendered}");
    } else {
        render_report(&mut std::io::stdout().lock(), &report, &filter)?;
    }

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        dataset,
        output,
        filter,
    } = args;

    let filter = PostingFilter::try_from(FilterParams::from(filter))?;
    let config = prepare(dataset)?;
    let table = load_table(&config)?;
    let view = table.filter(&filter);
    write_csv_to_path(&view, table.columns(), &output)?;

    println!("Wrote {} postings to {}", view.len(), output.display());
    Ok(())
}
