pub mod components;
pub mod screens;

use anyhow::{anyhow, Result};
use eframe::NativeOptions;

use crate::config::AppConfig;

const WINDOW_TITLE: &str = "Tone Analyzer";

pub fn launch_ui(config: AppConfig) -> Result<()> {
    let app = screens::analyzer::AnalyzerApp::new(config)?;
    let title = window_title(app.endpoint());
    let options = NativeOptions::default();
    eframe::run_native(&title, options, Box::new(move |_cc| Box::new(app)))
        .map_err(|err| anyhow!(err.to_string()))
}

fn window_title(endpoint: Option<&str>) -> String {
    endpoint
        .map(|endpoint| format!("{WINDOW_TITLE} – {endpoint}"))
        .unwrap_or_else(|| WINDOW_TITLE.to_string())
}
