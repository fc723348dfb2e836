use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::analysis::{AnalyzerError, Result};

pub const CREDENTIALS_FILE: &str = "credentials.json";
pub const CREDENTIALS_ENV: &str = "TONEANALYZER_CREDENTIALS";
pub const DEFAULT_VERSION: &str = "2017-09-20";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// How requests authenticate against the service.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey {
        key: String,
        url: String,
    },
    UserPassword {
        username: String,
        password: String,
        url: String,
    },
}

impl Credentials {
    pub fn url(&self) -> &str {
        match self {
            Self::ApiKey { url, .. } | Self::UserPassword { url, .. } => url,
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Self::ApiKey { .. } => "apikey",
            Self::UserPassword { .. } => "username/password",
        }
    }

    /// Picks the auth scheme from whichever fields are filled in. An API key
    /// wins over a username/password pair.
    pub fn resolve(file: CredentialsFile) -> Result<Self> {
        let CredentialsFile {
            apikey,
            url,
            username,
            password,
        } = file;
        let url = present(url).ok_or(AnalyzerError::InvalidCredentialConfiguration)?;
        if let Some(key) = present(apikey) {
            return Ok(Self::ApiKey { key, url });
        }
        match (present(username), present(password)) {
            (Some(username), Some(password)) => Ok(Self::UserPassword {
                username,
                password,
                url,
            }),
            _ => Err(AnalyzerError::InvalidCredentialConfiguration),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            if err.kind() != ErrorKind::NotFound {
                warn!(path = %path.display(), error = %err, "credentials file unreadable");
            }
            AnalyzerError::MissingCredentials
        })?;
        let file: CredentialsFile = serde_json::from_str(&raw).map_err(|err| {
            warn!(path = %path.display(), error = %err, "credentials file is not valid JSON");
            AnalyzerError::InvalidCredentialConfiguration
        })?;
        let credentials = Self::resolve(file)?;
        info!(
            path = %path.display(),
            auth = credentials.scheme(),
            "credentials resolved"
        );
        Ok(credentials)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey { url, .. } => f
                .debug_struct("ApiKey")
                .field("key", &"<redacted>")
                .field("url", url)
                .finish(),
            Self::UserPassword { username, url, .. } => f
                .debug_struct("UserPassword")
                .field("username", username)
                .field("password", &"<redacted>")
                .field("url", url)
                .finish(),
        }
    }
}

/// On-disk credentials as exported from the service dashboard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsFile {
    #[serde(default, rename = "toneanalyzerApikey")]
    pub apikey: Option<String>,
    #[serde(default, rename = "toneanalyzerUrl")]
    pub url: Option<String>,
    #[serde(default, rename = "toneanalyzerUsername")]
    pub username: Option<String>,
    #[serde(default, rename = "toneanalyzerPassword")]
    pub password: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// API version date sent with every request.
    pub version: String,
    pub timeout: Duration,
    /// Ask the service for per-sentence tones as well.
    pub sentences: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sentences: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where credentials were looked up; `None` when no candidate exists.
    pub credentials_path: Option<PathBuf>,
    /// Resolved once at startup; the error is shown to the user instead of
    /// attempting any request.
    pub credentials: Result<Credentials>,
    pub service: ServiceSettings,
}

impl AppConfig {
    pub fn load(path: Option<PathBuf>, service: ServiceSettings) -> Self {
        let credentials_path = path
            .or_else(|| std::env::var_os(CREDENTIALS_ENV).map(PathBuf::from))
            .or_else(default_credentials_path);
        let credentials = match &credentials_path {
            Some(path) => Credentials::from_path(path),
            None => {
                warn!("no {CREDENTIALS_FILE} found next to the binary or working directory");
                Err(AnalyzerError::MissingCredentials)
            }
        };
        Self {
            credentials_path,
            credentials,
            service,
        }
    }
}

fn default_credentials_path() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let exe = std::env::current_exe().ok();
    cwd.into_iter()
        .chain(exe.iter().flat_map(|exe| exe.ancestors().map(Path::to_path_buf)))
        .map(|dir| dir.join(CREDENTIALS_FILE))
        .find(|candidate| candidate.is_file())
}
