use std::path::PathBuf;

use crate::auth::password::FormPassword;

const NUHIL_RAW: &str = "https://raw.githubusercontent.com/nuhil/bangladesh-geocode/master";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Idle lifetime of a form session in seconds (default: one day).
    pub session_ttl_secs: u64,
    /// Extended-form password. `None` keeps the extended form locked for
    /// everyone.
    pub form_password: Option<FormPassword>,
    pub geo: GeoSourceConfig,
    pub sheet: SheetConfig,
}

/// Where the four geographic datasets are fetched from.
#[derive(Debug, Clone)]
pub struct GeoSourceConfig {
    pub divisions_url: String,
    pub districts_url: String,
    pub upazilas_url: String,
    pub unions_url: String,
    /// Per-request fetch timeout in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl Default for GeoSourceConfig {
    fn default() -> Self {
        Self {
            divisions_url: format!("{NUHIL_RAW}/divisions/divisions.json"),
            districts_url: format!("{NUHIL_RAW}/districts/districts.json"),
            upazilas_url: format!("{NUHIL_RAW}/upazilas/upazilas.json"),
            unions_url: format!("{NUHIL_RAW}/unions/unions.json"),
            timeout_secs: 30,
        }
    }
}

/// Spreadsheet backend receiving submissions.
#[derive(Debug, Clone)]
pub enum SheetConfig {
    /// `simple.csv` and `extended.csv` under `dir`.
    Csv { dir: PathBuf },
    /// One worksheet per form variant in a Google spreadsheet.
    GoogleSheets {
        spreadsheet_id: String,
        credentials_path: PathBuf,
        simple_worksheet: String,
        extended_worksheet: String,
    },
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                    |
    /// |------------------------------|----------------------------|
    /// | `HOST`                       | `0.0.0.0`                  |
    /// | `PORT`                       | `3000`                     |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                       |
    /// | `SESSION_TTL_SECS`           | `86400`                    |
    /// | `FORM_PASSWORD_HASH`         | unset                      |
    /// | `FORM_PASSWORD`              | unset (hashed at startup)  |
    /// | `GEO_DIVISIONS_URL` etc.     | nuhil/bangladesh-geocode   |
    /// | `GEO_FETCH_TIMEOUT_SECS`     | `30`                       |
    /// | `SHEET_BACKEND`              | `csv` (or `gsheets`)       |
    /// | `SHEET_CSV_DIR`              | `data`                     |
    /// | `GSHEETS_SPREADSHEET_ID`     | required for `gsheets`     |
    /// | `GSHEETS_CREDENTIALS_PATH`   | required for `gsheets`     |
    /// | `GSHEETS_SIMPLE_WORKSHEET`   | `Sheet1`                   |
    /// | `GSHEETS_EXTENDED_WORKSHEET` | `Extended`                 |
    ///
    /// # Panics
    ///
    /// Panics on unparseable numbers, a malformed `FORM_PASSWORD_HASH`, an
    /// unknown `SHEET_BACKEND`, or a `gsheets` backend without its required
    /// variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_ttl_secs: u64 = std::env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .expect("SESSION_TTL_SECS must be a valid u64");

        let form_password = match non_empty_var("FORM_PASSWORD_HASH") {
            Some(phc) => Some(
                FormPassword::from_phc(phc).expect("FORM_PASSWORD_HASH must be an Argon2 PHC string"),
            ),
            None => non_empty_var("FORM_PASSWORD")
                .map(|plain| FormPassword::from_plain(&plain).expect("Failed to hash FORM_PASSWORD")),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_ttl_secs,
            form_password,
            geo: GeoSourceConfig::from_env(),
            sheet: SheetConfig::from_env(),
        }
    }
}

impl GeoSourceConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            divisions_url: non_empty_var("GEO_DIVISIONS_URL").unwrap_or(defaults.divisions_url),
            districts_url: non_empty_var("GEO_DISTRICTS_URL").unwrap_or(defaults.districts_url),
            upazilas_url: non_empty_var("GEO_UPAZILAS_URL").unwrap_or(defaults.upazilas_url),
            unions_url: non_empty_var("GEO_UNIONS_URL").unwrap_or(defaults.unions_url),
            timeout_secs: std::env::var("GEO_FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.timeout_secs.to_string())
                .parse()
                .expect("GEO_FETCH_TIMEOUT_SECS must be a valid u64"),
        }
    }
}

impl SheetConfig {
    fn from_env() -> Self {
        let backend = std::env::var("SHEET_BACKEND").unwrap_or_else(|_| "csv".into());
        match backend.as_str() {
            "csv" => Self::Csv {
                dir: non_empty_var("SHEET_CSV_DIR")
                    .unwrap_or_else(|| "data".into())
                    .into(),
            },
            "gsheets" => Self::GoogleSheets {
                spreadsheet_id: non_empty_var("GSHEETS_SPREADSHEET_ID")
                    .expect("GSHEETS_SPREADSHEET_ID must be set when SHEET_BACKEND=gsheets"),
                credentials_path: non_empty_var("GSHEETS_CREDENTIALS_PATH")
                    .expect("GSHEETS_CREDENTIALS_PATH must be set when SHEET_BACKEND=gsheets")
                    .into(),
                simple_worksheet: non_empty_var("GSHEETS_SIMPLE_WORKSHEET")
                    .unwrap_or_else(|| "Sheet1".into()),
                extended_worksheet: non_empty_var("GSHEETS_EXTENDED_WORKSHEET")
                    .unwrap_or_else(|| "Extended".into()),
            },
            other => panic!("SHEET_BACKEND must be 'csv' or 'gsheets', got '{other}'"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
