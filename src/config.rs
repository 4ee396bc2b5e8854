use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::color::DEFAULT_BAR_HEX;
use crate::data::loader::LoaderConfig;
use crate::error::ConfigError;

pub const DEFAULT_DATA_PATH: &str = "supplier_engagement.xlsx";
pub const DEFAULT_WINDOW_TITLE: &str = "Supplier Engagement Dashboard";

#[derive(Parser, Debug, Default)]
#[command(name = "engagement-dashboard")]
#[command(about = "Filter supplier engagements and chart them by supplier and company")]
#[command(version)]
pub struct Cli {
    #[arg(long, value_name = "FILE", help = "JSON settings file")]
    pub config: Option<PathBuf>,
    #[arg(long, value_name = "PATH", help = "Workbook, CSV, Parquet or JSON file to load")]
    pub data: Option<PathBuf>,
    #[arg(long, value_name = "NAME", help = "Worksheet holding the engagements")]
    pub sheet: Option<String>,
    #[arg(long, help = "Read the first worksheet instead of a named one")]
    pub first_sheet: bool,
    #[arg(long, value_name = "N", help = "Maximum number of data rows to read")]
    pub max_rows: Option<usize>,
}

/// Application settings: defaults, then the settings file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_path: PathBuf,
    pub window_title: String,
    /// Bar fill as `#rrggbb`.
    pub bar_color: String,
    pub loader: LoaderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            bar_color: DEFAULT_BAR_HEX.to_string(),
            loader: LoaderConfig::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_overrides(cli);
        Ok(settings)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(path) = &cli.data {
            self.data_path = path.clone();
        }
        if cli.first_sheet {
            self.loader.sheet_name = None;
        } else if let Some(sheet) = &cli.sheet {
            self.loader.sheet_name = Some(sheet.clone());
        }
        if let Some(max_rows) = cli.max_rows {
            self.loader.max_rows = max_rows;
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;
    use crate::data::loader::{DEFAULT_MAX_ROWS, DEFAULT_SHEET_NAME};

    #[test]
    fn defaults_match_the_shipped_workbook() {
        let settings = Settings::resolve(&Cli::default()).unwrap();
        assert_eq!(settings.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(settings.loader.sheet_name.as_deref(), Some(DEFAULT_SHEET_NAME));
        assert_eq!(settings.loader.max_rows, DEFAULT_MAX_ROWS);
        assert_eq!(settings.loader.column_span, 3);
    }

    #[test]
    fn file_values_are_partial_and_cli_wins() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{ "data_path": "from_file.csv", "loader": { "max_rows": 10 } }"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "engagement-dashboard",
            "--config",
            file.path().to_str().unwrap(),
            "--max-rows",
            "5",
        ]);
        let settings = Settings::resolve(&cli).unwrap();

        assert_eq!(settings.data_path, PathBuf::from("from_file.csv"));
        assert_eq!(settings.loader.max_rows, 5);
        assert_eq!(settings.loader.sheet_name.as_deref(), Some(DEFAULT_SHEET_NAME));
        assert_eq!(settings.window_title, DEFAULT_WINDOW_TITLE);
    }

    #[test]
    fn first_sheet_flag_clears_sheet_name() {
        let cli = Cli::parse_from(["engagement-dashboard", "--sheet", "Data", "--first-sheet"]);
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.loader.sheet_name, None);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{ not json").unwrap();

        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
