use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_EXPORT_FILE: &str = "bracket_snapshot.json";
const DEFAULT_REFRESH_SECS: u64 = 30;

/// Where the tournament comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    File(PathBuf),
    /// The sample bracket compiled into the binary.
    Embedded,
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::File(path) => path.display().to_string(),
            DataSource::Embedded => "built-in sample".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub source: DataSource,
    pub export_path: PathBuf,
    pub log_level: Option<LevelFilter>,
    /// How often a file source is re-read. `None` disables reloading.
    pub refresh_every: Option<Duration>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            source: DataSource::Embedded,
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
            log_level: None,
            refresh_every: Some(Duration::from_secs(DEFAULT_REFRESH_SECS)),
        }
    }
}

impl AppSettings {
    /// Settings from the environment, with a path from the command line taking
    /// precedence over `BRACKETVIEW_JSON`.
    pub fn load(cli_path: Option<PathBuf>) -> Self {
        Self::from_lookup(cli_path, |key| std::env::var(key).ok())
    }

    fn from_lookup(cli_path: Option<PathBuf>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut settings = Self::default();

        if let Some(path) = cli_path.or_else(|| var("BRACKETVIEW_JSON").map(PathBuf::from)) {
            settings.source = DataSource::File(path);
        }
        if let Some(path) = var("BRACKETVIEW_EXPORT") {
            settings.export_path = PathBuf::from(path);
        }
        settings.log_level = var("BRACKETVIEW_LOG").and_then(|v| v.trim().parse().ok());
        if let Some(secs) = var("BRACKETVIEW_REFRESH_SECS").and_then(|v| v.trim().parse::<u64>().ok()) {
            settings.refresh_every = (secs > 0).then(|| Duration::from_secs(secs));
        }

        settings
    }
}
