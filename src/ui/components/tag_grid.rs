use eframe::egui;

use crate::analysis::{AnalysisRequestController, TagView};
use crate::types::ToneSection;

const TAG_HEIGHT: f32 = 30.0;
const TAG_PADDING: f32 = 30.0;
const TAG_SPACING: f32 = 5.0;
const TAG_RGB: (u8, u8, u8) = (66, 133, 244);

/// One wrapped row of tags for a response section.
pub struct TagGrid<'a> {
    pub section: &'a ToneSection,
    pub tags: &'a [(usize, TagView)],
}

impl<'a> TagGrid<'a> {
    /// Returns the flat index of the tag clicked this frame.
    pub fn show(self, ui: &mut egui::Ui) -> Option<usize> {
        let mut clicked = None;
        ui.heading(self.section.name.as_str());
        if self.tags.is_empty() {
            ui.weak("No tones in this category");
            return None;
        }
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(TAG_SPACING, TAG_SPACING);
            for (index, tag) in self.tags {
                if tag_button(ui, tag).clicked() {
                    clicked = Some(*index);
                }
            }
        });
        clicked
    }
}

/// Views for every tag in `section`, in response order.
pub fn collect_tags(
    controller: &AnalysisRequestController,
    section: &ToneSection,
) -> Vec<(usize, TagView)> {
    section
        .range
        .clone()
        .filter(|index| *index < controller.count())
        .map(|index| (index, controller.entry_at(index)))
        .collect()
}

/// Converts tag opacity to a color alpha. Opacity outside `[0, 1]` is
/// clamped here because colors cannot carry it.
pub fn tag_alpha(opacity: f64) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn tag_button(ui: &mut egui::Ui, tag: &TagView) -> egui::Response {
    let alpha = tag_alpha(tag.opacity);
    let (r, g, b) = TAG_RGB;
    let fill = egui::Color32::from_rgba_unmultiplied(r, g, b, alpha);
    let text = egui::RichText::new(&tag.label)
        .color(egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha.max(160)));
    ui.add(
        egui::Button::new(text)
            .fill(fill)
            .min_size(egui::vec2(TAG_PADDING * 2.0, TAG_HEIGHT)),
    )
    .on_hover_text("Click to switch between tone name and score")
}

#[cfg(test)]
mod tests {
    use super::tag_alpha;

    #[test]
    fn alpha_tracks_opacity() {
        assert_eq!(tag_alpha(1.0), 255);
        assert_eq!(tag_alpha(0.5), 128);
        assert_eq!(tag_alpha(0.0), 0);
    }

    #[test]
    fn alpha_clamps_out_of_range_opacity() {
        assert_eq!(tag_alpha(1.7), 255);
        assert_eq!(tag_alpha(-0.4), 0);
    }
}
