//! One-at-a-time user alerts derived from [`AnalyzerError`].

use tracing::debug;

use super::AnalyzerError;

pub const DISMISS_LABEL: &str = "Dismiss";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl From<&AnalyzerError> for Alert {
    fn from(error: &AnalyzerError) -> Self {
        Self {
            title: error.title().to_string(),
            message: error.message(),
        }
    }
}

/// Holds at most one alert; anything raised while one is visible is dropped.
#[derive(Debug, Default)]
pub struct AlertPresenter {
    current: Option<Alert>,
}

impl AlertPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the alert was shown.
    pub fn present(&mut self, error: &AnalyzerError) -> bool {
        if self.current.is_some() {
            debug!(suppressed = %error, "alert already showing");
            return false;
        }
        self.current = Some(Alert::from(error));
        true
    }

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) -> Option<Alert> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::{Alert, AlertPresenter};
    use crate::analysis::AnalyzerError;

    #[test]
    fn second_alert_is_suppressed_until_dismissed() {
        let mut alerts = AlertPresenter::new();
        assert!(alerts.present(&AnalyzerError::MissingCredentials));
        assert!(!alerts.present(&AnalyzerError::EmptyInput));
        assert_eq!(
            alerts.current().map(|alert| alert.title.as_str()),
            Some("Missing Tone Analyzer Credentials")
        );

        alerts.dismiss();
        assert!(alerts.present(&AnalyzerError::EmptyInput));
    }

    #[test]
    fn alert_carries_title_and_message() {
        let alert = Alert::from(&AnalyzerError::NoResult);
        assert_eq!(alert.title, "Bad Response");
        assert_eq!(alert.message, "Failed to analyze the tone input.");
    }
}
