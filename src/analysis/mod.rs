pub mod alert;
pub mod client;
pub mod controller;
pub mod display;
pub mod mapper;

use thiserror::Error;

pub use alert::{Alert, AlertPresenter};
pub use client::WatsonClient;
pub use controller::{AnalysisRequestController, Completion, RequestState, SubmitOutcome, TagView};
pub use display::{opacity, DisplayMode, TagDisplayState};
pub use mapper::{MappingError, ResponseMapper, ToneResponse};

/// Convenient alias for results returned by the analysis modules.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Transport message that identifies rejected credentials.
pub const NOT_AUTHORIZED: &str = "Not Authorized";

const CREDENTIALS_HINT: &str =
    "Please check the readme for more information on credentials configuration.";

/// Every failure a user can see. Each one is terminal for the current operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    #[error("tone analyzer credentials are missing")]
    MissingCredentials,

    #[error("credentials file does not contain a usable credential set")]
    InvalidCredentialConfiguration,

    #[error("tone analyzer rejected the credentials")]
    InvalidCredentials,

    #[error("text was not provided")]
    EmptyInput,

    #[error("tone analyzer returned no result")]
    NoResult,

    #[error("tone analyzer returned no tone categories")]
    NoCategories,

    #[error("tone analyzer request failed: {0}")]
    TransportFailure(String),
}

impl AnalyzerError {
    /// Classifies a raw transport failure. Only an exact `"Not Authorized"`
    /// message is treated as a credentials problem.
    pub fn from_transport(error: &ServiceError) -> Self {
        if error.message == NOT_AUTHORIZED {
            Self::InvalidCredentials
        } else {
            Self::TransportFailure(error.message.clone())
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "Missing Tone Analyzer Credentials",
            Self::InvalidCredentials | Self::InvalidCredentialConfiguration => {
                "Invalid Tone Analyzer Credentials"
            }
            Self::NoResult | Self::NoCategories => "Bad Response",
            Self::EmptyInput | Self::TransportFailure(_) => "An error occurred",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MissingCredentials
            | Self::InvalidCredentials
            | Self::InvalidCredentialConfiguration => CREDENTIALS_HINT.to_string(),
            Self::NoCategories => "No Tone Analyzer data was received.".to_string(),
            Self::NoResult => "Failed to analyze the tone input.".to_string(),
            Self::EmptyInput => "Text was not provided".to_string(),
            Self::TransportFailure(message) => message.clone(),
        }
    }
}

impl From<MappingError> for AnalyzerError {
    fn from(error: MappingError) -> Self {
        match error {
            MappingError::NoResult => Self::NoResult,
            MappingError::NoCategories => Self::NoCategories,
        }
    }
}

/// Raw failure reported by a [`ToneService`] before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
    pub status: Option<u16>,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Outbound boundary to the remote tone-analysis service.
///
/// Implementations block; the controller calls them from a worker thread.
/// `Ok(None)` means the service answered without a payload.
pub trait ToneService: Send + Sync + 'static {
    fn analyze(&self, text: &str) -> std::result::Result<Option<ToneResponse>, ServiceError>;
}
