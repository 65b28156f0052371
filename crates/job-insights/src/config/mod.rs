use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Single-figure salaries below this value are treated as counts, not pay.
pub const DEFAULT_SALARY_FLOOR: u64 = 1_000;

/// Postings whose average salary exceeds this are reported as high-paying.
pub const DEFAULT_HIGH_SALARY_THRESHOLD: f64 = 10_000.0;

pub const DEFAULT_DATASET_PATH: &str = "mauritius_jobs_1000.csv";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub dataset: DatasetConfig,
    pub extraction: ExtractionConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let path = env::var("APP_DATASET_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATASET_PATH));

        let salary_floor = match env::var("APP_SALARY_FLOOR") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    variable: "APP_SALARY_FLOOR",
                })?,
            Err(_) => DEFAULT_SALARY_FLOOR,
        };

        let high_salary_threshold = match env::var("APP_HIGH_SALARY_THRESHOLD") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or(ConfigError::InvalidNumber {
                    variable: "APP_HIGH_SALARY_THRESHOLD",
                })?,
            Err(_) => DEFAULT_HIGH_SALARY_THRESHOLD,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            dataset: DatasetConfig { path },
            extraction: ExtractionConfig {
                salary_floor,
                ..ExtractionConfig::default()
            },
            report: ReportConfig {
                high_salary_threshold,
                ..ReportConfig::default()
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the job-board export loaded at start-up.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

/// Upper bounds (inclusive, in years) of the entry, mid and senior bands.
/// Anything above `senior_max` is executive level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceThresholds {
    pub entry_max: u32,
    pub mid_max: u32,
    pub senior_max: u32,
}

impl Default for ExperienceThresholds {
    fn default() -> Self {
        Self {
            entry_max: 2,
            mid_max: 5,
            senior_max: 10,
        }
    }
}

/// Tunables of the extraction engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionConfig {
    pub salary_floor: u64,
    pub experience: ExperienceThresholds,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            salary_floor: DEFAULT_SALARY_FLOOR,
            experience: ExperienceThresholds::default(),
        }
    }
}

/// Business thresholds used by the salary reports. Values are MUR per month.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Right-closed bracket edges; one more bracket than edges is produced.
    pub salary_brackets: Vec<f64>,
    pub high_salary_threshold: f64,
    /// Reported separately as the "pays above" headline figure.
    pub premium_salary_threshold: f64,
    /// Locations with fewer salaried postings are left out of pay rankings.
    pub min_location_sample: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            salary_brackets: vec![15_000.0, 25_000.0, 35_000.0, 50_000.0],
            high_salary_threshold: DEFAULT_HIGH_SALARY_THRESHOLD,
            premium_salary_threshold: 35_000.0,
            min_location_sample: 3,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable } => {
                write!(f, "{variable} must be a non-negative number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

/// Serialises tests that read or write process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    static GUARD: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    GUARD.get_or_init(|| std::sync::Mutex::new(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_DATASET_PATH");
        env::remove_var("APP_SALARY_FLOOR");
        env::remove_var("APP_HIGH_SALARY_THRESHOLD");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.dataset.path, PathBuf::from(DEFAULT_DATASET_PATH));
        assert_eq!(config.extraction, ExtractionConfig::default());
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_extraction_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SALARY_FLOOR", "2500");
        env::set_var("APP_DATASET_PATH", "/tmp/jobs.csv");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.extraction.salary_floor, 2500);
        assert_eq!(config.dataset.path, PathBuf::from("/tmp/jobs.csv"));
        reset_env();
    }

    #[test]
    fn rejects_negative_salary_floor() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SALARY_FLOOR", "-5");
        let error = AppConfig::load().expect_err("negative floor rejected");
        assert!(matches!(
            error,
            ConfigError::InvalidNumber {
                variable: "APP_SALARY_FLOOR"
            }
        ));
        reset_env();
    }
}
