use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use toneanalyzer::analysis::{
    AnalysisRequestController, AnalyzerError, Completion, SubmitOutcome, WatsonClient,
};
use toneanalyzer::cli::{AnalyzeArgs, Cli, Command, WindowArgs};
use toneanalyzer::config::AppConfig;
use toneanalyzer::ui::launch_ui;
use tracing_subscriber::EnvFilter;

/// Slack on top of the transport timeout before giving up on the worker.
const WAIT_SLACK: Duration = Duration::from_secs(5);

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Window(args) => handle_window(&args),
        Command::Analyze(args) => handle_analyze(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_window(args: &WindowArgs) -> Result<()> {
    let settings = args.service.settings()?;
    let config = AppConfig::load(args.service.credentials.clone(), settings);
    launch_ui(config).context("tone analyzer window exited with an error")
}

fn handle_analyze(args: &AnalyzeArgs) -> Result<()> {
    let settings = args.service.settings()?;
    let text = args.input_text()?;
    let wait = settings.timeout.saturating_add(WAIT_SLACK);
    let config = AppConfig::load(args.service.credentials.clone(), settings);

    let mut controller = match config.credentials {
        Ok(credentials) => AnalysisRequestController::new(WatsonClient::new(
            credentials,
            config.service,
        )
        .map_err(alert_error)?),
        Err(err) => AnalysisRequestController::unconfigured(err),
    };

    match controller.submit(&text).map_err(alert_error)? {
        SubmitOutcome::Dispatched => {}
        SubmitOutcome::Ignored => bail!("a tone request is already in flight"),
    }
    match controller.wait(wait) {
        Some(Completion::Updated) => {}
        Some(Completion::Failed(err)) => return Err(alert_error(err)),
        None => bail!("no response from the tone analyzer after {:?}", wait),
    }

    if args.json {
        let rendered = serde_json::to_string_pretty(controller.result())
            .context("failed to serialize analysis result")?;
        println!("{rendered}");
        return Ok(());
    }
    if args.percent {
        for index in 0..controller.count() {
            controller.toggle(index);
        }
    }
    print_tags(&controller);
    Ok(())
}

fn print_tags(controller: &AnalysisRequestController) {
    for section in controller.result().sections() {
        println!("{}", section.name);
        for index in section.range.clone() {
            let tag = controller.entry_at(index);
            println!("  {:<24} opacity {:.2}", tag.label, tag.opacity);
        }
    }
}

fn alert_error(err: AnalyzerError) -> anyhow::Error {
    anyhow::anyhow!("{}: {}", err.title(), err.message())
}
