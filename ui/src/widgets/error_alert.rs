//! Inline alert box for errors, warnings and notices.

use egui::{Color32, Frame, Margin, RichText, Stroke, Ui};

use crate::utils::colors::{COLOR_AMBER, COLOR_BLUE, COLOR_RED};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertKind {
    #[default]
    Error,
    Warning,
    Info,
}

impl AlertKind {
    fn color(self) -> Color32 {
        match self {
            Self::Error => COLOR_RED,
            Self::Warning => COLOR_AMBER,
            Self::Info => COLOR_BLUE,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Error => "⛔",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

/// Shows `message` in a bordered box. An empty message renders nothing.
///
/// Returns true on the frame the "Dismiss" button was clicked.
pub fn error_alert(ui: &mut Ui, message: &str, kind: AlertKind, dismissible: bool) -> bool {
    if message.is_empty() {
        return false;
    }

    let color = kind.color();
    Frame::NONE
        .stroke(Stroke::new(1.0, color))
        .fill(color.gamma_multiply(0.08))
        .inner_margin(Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(kind.icon()).color(color));
                ui.label(RichText::new(message).color(color));
                dismissible && ui.small_button("Dismiss").clicked()
            })
            .inner
        })
        .inner
}
