use roster_business::{BusinessConfig, MemoryThemeStorage, ThemeManager, ThemeStorage, build_state_ctx};
use roster_states::StateCtx;

use crate::utils::theme_root::EguiThemeRoot;
use crate::widgets::FilterPanelState;

pub type AppThemeManager = ThemeManager<Box<dyn ThemeStorage>, EguiThemeRoot>;

/// The main application state.
///
/// Passed by reference to every page and widget. Nothing in the UI reaches for globals.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    pub theme: AppThemeManager,
    /// Filter inputs as typed, ahead of any debounce.
    pub filters: FilterPanelState,
}

impl State {
    pub fn new(
        config: BusinessConfig,
        egui_ctx: egui::Context,
        storage: Box<dyn ThemeStorage>,
    ) -> Self {
        let filters = FilterPanelState::new(config.filter_debounce);
        let theme = ThemeManager::new(storage, EguiThemeRoot::new(egui_ctx));

        Self {
            ctx: build_state_ctx(config),
            theme,
            filters,
        }
    }

    /// State pointed at a mock server, with in-memory theme storage.
    pub fn test(base_url: String, egui_ctx: egui::Context) -> Self {
        Self::test_with(BusinessConfig::new(base_url), egui_ctx)
    }

    pub fn test_with(config: BusinessConfig, egui_ctx: egui::Context) -> Self {
        Self::new(config, egui_ctx, Box::new(MemoryThemeStorage::default()))
    }
}
