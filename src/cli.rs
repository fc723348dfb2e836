use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::config::{ServiceSettings, DEFAULT_TIMEOUT_SECS, DEFAULT_VERSION, MAX_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "toneanalyzer",
    version,
    about = "Analyze the tone of text with the Watson Tone Analyzer service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive tone analyzer window.
    Window(WindowArgs),
    /// Analyze text once and print the resulting tone tags.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Path to the credentials JSON file.
    #[arg(long, value_name = "PATH")]
    pub credentials: Option<PathBuf>,
    /// Request timeout in seconds.
    #[arg(
        long = "timeout-secs",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub timeout_secs: u64,
    /// Service API version date.
    #[arg(long = "api-version", default_value = DEFAULT_VERSION)]
    pub api_version: String,
    /// Also request per-sentence tones.
    #[arg(long)]
    pub sentences: bool,
}

impl ServiceArgs {
    pub fn settings(&self) -> Result<ServiceSettings> {
        ensure!(
            !self.api_version.trim().is_empty(),
            "api-version must not be empty"
        );
        Ok(ServiceSettings {
            version: self.api_version.trim().to_string(),
            timeout: Duration::from_secs(self.timeout_secs),
            sentences: self.sentences,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    #[command(flatten)]
    pub service: ServiceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze.
    #[arg(value_name = "TEXT", conflicts_with = "file", required_unless_present = "file")]
    pub text: Option<String>,
    /// Read the text to analyze from a file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Show scores as percentages instead of tone names.
    #[arg(long)]
    pub percent: bool,
    /// Print the full result as JSON.
    #[arg(long, conflicts_with = "percent")]
    pub json: bool,
    #[command(flatten)]
    pub service: ServiceArgs,
}

impl AnalyzeArgs {
    pub fn input_text(&self) -> Result<String> {
        match (&self.text, &self.file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read input text from {:?}", path)),
            (None, None) => anyhow::bail!("provide TEXT or --file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use std::time::Duration;

    #[test]
    fn analyze_defaults() {
        let cli = Cli::try_parse_from(["toneanalyzer", "analyze", "I am happy"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze command");
        };
        assert_eq!(args.input_text().unwrap(), "I am happy");
        let settings = args.service.settings().unwrap();
        assert_eq!(settings.version, "2017-09-20");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(!settings.sentences);
    }

    #[test]
    fn analyze_requires_text_or_file() {
        assert!(Cli::try_parse_from(["toneanalyzer", "analyze"]).is_err());
        assert!(Cli::try_parse_from([
            "toneanalyzer",
            "analyze",
            "text",
            "--file",
            "input.txt"
        ])
        .is_err());
    }

    #[test]
    fn timeout_outside_bounds_is_rejected() {
        for value in ["0", "3601", "18446744073709551615"] {
            assert!(
                Cli::try_parse_from([
                    "toneanalyzer",
                    "analyze",
                    "text",
                    "--timeout-secs",
                    value,
                ])
                .is_err(),
                "timeout {value} should be rejected"
            );
        }
    }

    #[test]
    fn timeout_upper_bound_is_accepted() {
        let cli = Cli::try_parse_from([
            "toneanalyzer",
            "window",
            "--timeout-secs",
            "3600",
        ])
        .unwrap();
        let Command::Window(args) = cli.command else {
            panic!("expected window command");
        };
        let settings = args.service.settings().unwrap();
        assert_eq!(settings.timeout, Duration::from_secs(3600));
    }

    #[test]
    fn blank_api_version_is_rejected() {
        let cli = Cli::try_parse_from(["toneanalyzer", "window", "--api-version", " "]).unwrap();
        let Command::Window(args) = cli.command else {
            panic!("expected window command");
        };
        assert!(args.service.settings().is_err());
    }
}
