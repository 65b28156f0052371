use job_insights::config::{AppConfig, ReportConfig};
use job_insights::postings::{DatasetError, Extractor, JobTable};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loaded postings shared read-only by every request.
#[derive(Clone)]
pub(crate) struct JobData {
    pub(crate) table: Arc<JobTable>,
    pub(crate) report: Arc<ReportConfig>,
}

impl JobData {
    pub(crate) fn new(table: JobTable, report: ReportConfig) -> Self {
        Self {
            table: Arc::new(table),
            report: Arc::new(report),
        }
    }
}

pub(crate) fn apply_dataset_override(config: &mut AppConfig, dataset: Option<PathBuf>) {
    if let Some(path) = dataset {
        config.dataset.path = path;
    }
}

pub(crate) fn load_table(config: &AppConfig) -> Result<JobTable, DatasetError> {
    let extractor = Extractor::new(config.extraction);
    JobTable::from_path(&config.dataset.path, &extractor)
}
