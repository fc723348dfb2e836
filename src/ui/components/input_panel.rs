use eframe::egui;

pub const BUSY_MESSAGE: &str = "Watson is Analyzing Tone";

#[derive(Default, Debug)]
pub struct InputPanelOutput {
    pub analyze: bool,
}

pub struct InputPanel<'a> {
    pub text: &'a mut String,
    pub busy: bool,
}

impl<'a> InputPanel<'a> {
    pub fn show(self, ui: &mut egui::Ui) -> InputPanelOutput {
        let mut output = InputPanelOutput::default();
        ui.add(
            egui::TextEdit::multiline(self.text)
                .hint_text("Type or paste text to analyze")
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
        ui.horizontal(|ui| {
            let button = ui.add_enabled(!self.busy, egui::Button::new("Analyze Tone"));
            if button.clicked() {
                output.analyze = true;
            }
            if self.busy {
                ui.add(egui::Spinner::new());
                ui.label(BUSY_MESSAGE);
            }
        });
        output
    }
}
