//! Control Panel Widget
//! Left side panel: point count input, rebuild and export controls.

use egui::{Color32, RichText};

/// Smallest point count the panel submits.
pub const MIN_COUNT: usize = 3;
/// Largest point count the panel submits.
pub const MAX_COUNT: usize = 100;

/// Result of interpreting the count field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountInput {
    Valid(usize),
    /// Out of range, clamped to the nearest bound.
    Corrected(usize),
    Empty,
    Invalid,
}

/// Parse the count field, clamping to [`MIN_COUNT`]..=[`MAX_COUNT`].
pub fn parse_count(text: &str) -> CountInput {
    let text = text.trim();
    if text.is_empty() {
        return CountInput::Empty;
    }
    match text.parse::<i64>() {
        Ok(n) if n < MIN_COUNT as i64 => CountInput::Corrected(MIN_COUNT),
        Ok(n) if n > MAX_COUNT as i64 => CountInput::Corrected(MAX_COUNT),
        Ok(n) => CountInput::Valid(n as usize),
        Err(_) => CountInput::Invalid,
    }
}

/// Action requested from the control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    /// Rebuild both charts with `count` random points; `corrected` when the
    /// typed count was clamped into range.
    Update { count: usize, corrected: bool },
    LoadConfig,
    ExportPng,
}

pub struct ControlPanel {
    pub count: usize,
    pub count_text: String,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            count: 6,
            count_text: "6".to_string(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    fn set_count(&mut self, count: usize) {
        self.count = count;
        self.count_text = count.to_string();
    }

    /// Validate the count field and turn it into an update request.
    pub fn submit(&mut self) -> ControlPanelAction {
        match parse_count(&self.count_text) {
            CountInput::Valid(count) => {
                self.set_count(count);
                ControlPanelAction::Update {
                    count,
                    corrected: false,
                }
            }
            CountInput::Corrected(count) => {
                self.set_count(count);
                ControlPanelAction::Update {
                    count,
                    corrected: true,
                }
            }
            CountInput::Empty => {
                self.set_status("Please enter the number of points");
                ControlPanelAction::None
            }
            CountInput::Invalid => {
                self.set_status(format!("'{}' is not a number", self.count_text.trim()));
                ControlPanelAction::None
            }
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Radarny")
                    .size(22.0)
                    .color(Color32::from_rgb(208, 71, 65)),
            );
            ui.label(RichText::new("Radar chart demo").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Point Count Section =====
        ui.label(RichText::new("Points").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("-").clicked() {
                        self.set_count(self.count.saturating_sub(1));
                    }
                    ui.add(egui::TextEdit::singleline(&mut self.count_text).desired_width(60.0));
                    if ui.button("+").clicked() {
                        self.set_count(self.count + 1);
                    }
                });
                ui.add_space(5.0);
                if ui.button("Update").clicked() {
                    action = self.submit();
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Style & Export Section =====
        ui.label(RichText::new("Style & Export").size(14.0).strong());
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.button("Load style...").clicked() {
                action = ControlPanelAction::LoadConfig;
            }
            if ui.button("Export PNG...").clicked() {
                action = ControlPanelAction::ExportPng;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_count_clamps_and_rejects() {
        assert_eq!(parse_count("7"), CountInput::Valid(7));
        assert_eq!(parse_count(" 100 "), CountInput::Valid(100));
        assert_eq!(parse_count("2"), CountInput::Corrected(MIN_COUNT));
        assert_eq!(parse_count("-4"), CountInput::Corrected(MIN_COUNT));
        assert_eq!(parse_count("250"), CountInput::Corrected(MAX_COUNT));
        assert_eq!(parse_count(""), CountInput::Empty);
        assert_eq!(parse_count("abc"), CountInput::Invalid);
    }

    #[test]
    fn submit_corrects_field_and_reports() {
        let mut panel = ControlPanel::new();
        panel.count_text = "1".to_string();
        assert_eq!(
            panel.submit(),
            ControlPanelAction::Update {
                count: 3,
                corrected: true
            }
        );
        assert_eq!(panel.count_text, "3");
        assert_eq!(panel.count, 3);
    }

    #[test]
    fn submit_empty_is_no_action() {
        let mut panel = ControlPanel::new();
        panel.count_text.clear();
        assert_eq!(panel.submit(), ControlPanelAction::None);
        assert_eq!(panel.count, 6);
    }
}
