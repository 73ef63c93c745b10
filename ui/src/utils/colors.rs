//! Shared color constants for the UI.

use egui::Color32;

/// Red for errors.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber for warnings.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Blue for informational notices.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(13, 110, 253);

/// Muted gray for secondary text such as the version label.
pub const COLOR_MUTED: Color32 = Color32::from_rgb(140, 140, 140);
