use std::time::Duration;

use anyhow::Result;
use eframe::egui;
use tracing::{debug, error};

use crate::analysis::{
    AlertPresenter, AnalysisRequestController, Completion, SubmitOutcome, WatsonClient,
};
use crate::config::AppConfig;
use crate::ui::components::alert_modal::AlertModal;
use crate::ui::components::input_panel::InputPanel;
use crate::ui::components::tag_grid::{collect_tags, TagGrid};

const BUSY_REPAINT: Duration = Duration::from_millis(100);

pub struct AnalyzerApp {
    controller: AnalysisRequestController,
    alerts: AlertPresenter,
    input: String,
    endpoint: Option<String>,
}

impl AnalyzerApp {
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut alerts = AlertPresenter::new();
        let (controller, endpoint) = match config.credentials {
            Ok(credentials) => {
                let client = WatsonClient::new(credentials, config.service)?;
                let endpoint = client.endpoint().to_string();
                (AnalysisRequestController::new(client), Some(endpoint))
            }
            Err(err) => {
                error!(error = %err, "starting without usable credentials");
                alerts.present(&err);
                (AnalysisRequestController::unconfigured(err), None)
            }
        };
        Ok(Self::from_parts(controller, alerts, endpoint))
    }

    pub fn from_parts(
        controller: AnalysisRequestController,
        alerts: AlertPresenter,
        endpoint: Option<String>,
    ) -> Self {
        Self {
            controller,
            alerts,
            input: String::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn apply_completion(&mut self) {
        match self.controller.poll() {
            Some(Completion::Failed(err)) => {
                self.alerts.present(&err);
            }
            Some(Completion::Updated) => {
                debug!(tags = self.controller.count(), "refreshing tag grids");
            }
            None => {}
        }
    }

    fn submit(&mut self) {
        match self.controller.submit(&self.input) {
            Ok(SubmitOutcome::Dispatched) | Ok(SubmitOutcome::Ignored) => {}
            Err(err) => {
                self.alerts.present(&err);
            }
        }
    }

    fn show_input(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("input").show(ctx, |ui| {
            let output = InputPanel {
                text: &mut self.input,
                busy: self.controller.is_busy(),
            }
            .show(ui);
            if output.analyze {
                self.submit();
            }
        });
    }

    fn show_tags(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let mut toggled = None;
                for section in self.controller.result().sections() {
                    let tags = collect_tags(&self.controller, section);
                    if let Some(index) = (TagGrid {
                        section,
                        tags: &tags,
                    })
                    .show(ui)
                    {
                        toggled = Some(index);
                    }
                    ui.separator();
                }
                if let Some(index) = toggled {
                    self.controller.toggle(index);
                }
            });
        });
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let dismissed = self
            .alerts
            .current()
            .is_some_and(|alert| AlertModal { alert }.show(ctx));
        if dismissed {
            self.alerts.dismiss();
            self.controller.reset();
        }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_completion();
        self.show_input(ctx);
        self.show_tags(ctx);
        self.show_alert(ctx);
        if self.controller.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}
