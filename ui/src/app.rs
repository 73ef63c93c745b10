use std::time::Duration;

use chrono::Utc;
use egui::ViewportCommand;
use log::debug;
use roster_business::{Route, UserPipeline, navigate, sync_user_pipeline};

use crate::utils::theme_root::system_prefers_dark;
use crate::{pages, state::State, widgets};

/// Repaint cadence while requests are in flight, so results land without input events.
const TASK_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct RosterApp {
    pub state: State,
    initialized: bool,
    initial_route: Option<Route>,
    /// Last host color scheme seen, to react only to changes.
    system_dark: Option<bool>,
    /// Last title sent to the window.
    title: Option<&'static str>,
    /// Last path mirrored to the address bar.
    #[cfg(target_arch = "wasm32")]
    path: Option<String>,
}

impl RosterApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            initialized: false,
            initial_route: None,
            system_dark: None,
            title: None,
            #[cfg(target_arch = "wasm32")]
            path: None,
        }
    }

    /// Starts on `route` instead of the dashboard.
    pub fn with_route(mut self, route: Route) -> Self {
        self.initial_route = Some(route);
        self
    }

    fn first_frame(&mut self, ctx: &egui::Context) {
        self.system_dark = system_prefers_dark(ctx);
        self.state
            .theme
            .initialize(self.system_dark.unwrap_or(false));

        let route = self.initial_route.take().unwrap_or_default();
        navigate(&mut self.state.ctx, route);
        self.initialized = true;
    }

    fn follow_system_theme(&mut self, ctx: &egui::Context) {
        let current = system_prefers_dark(ctx);
        if current == self.system_dark {
            return;
        }
        self.system_dark = current;
        if let Some(dark) = current {
            if self.state.theme.on_system_change(dark) {
                debug!("Followed system theme change");
            }
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = self.state.ctx.state::<Route>().title();
        if self.title == Some(title) {
            return;
        }
        self.title = Some(title);
        ctx.send_viewport_cmd(ViewportCommand::Title(title.to_owned()));

        #[cfg(target_arch = "wasm32")]
        crate::utils::location::set_document_title(title);
    }

    /// Follows browser back/forward and mirrors app navigation into the address bar.
    #[cfg(target_arch = "wasm32")]
    fn sync_location(&mut self) {
        use crate::utils::location;

        let browser = location::current_path();
        if browser.is_some() && browser != self.path {
            if self.path.is_some() {
                let route = Route::from_path(browser.as_deref().unwrap_or("/"));
                navigate(&mut self.state.ctx, route);
            }
            self.path = browser;
            return;
        }

        let route = self.state.ctx.state::<Route>();
        if *route == Route::NotFound {
            return;
        }
        let path = route.path();
        if self.path.as_deref() != Some(path.as_str()) {
            location::push_path(&path);
            self.path = Some(path);
        }
    }
}

impl eframe::App for RosterApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Utc::now();
        if !self.initialized {
            self.first_frame(ctx);
        }

        // Sync Compute for render
        self.state.ctx.sync_computes();
        sync_user_pipeline(&mut self.state.ctx);

        self.follow_system_theme(ctx);
        if let Some(filters) = self.state.filters.poll(now) {
            debug!("Applying debounced filters: {filters:?}");
            self.state.ctx.state_mut::<UserPipeline>().set_filters(filters);
        }

        #[cfg(target_arch = "wasm32")]
        self.sync_location();
        self.sync_title(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            widgets::top_bar(ui, &mut self.state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let route = self.state.ctx.state::<Route>().clone();
            egui::ScrollArea::vertical().show(ui, |ui| match route {
                Route::Dashboard => {
                    pages::dashboard_page(&mut self.state, ui);
                }
                Route::UserDetails(id) => {
                    pages::user_details_page(&mut self.state, ui, &id);
                }
                Route::NotFound => {
                    pages::not_found_page(&mut self.state, ui);
                }
            });
        });

        if self.state.ctx.task_count() > 0 {
            ctx.request_repaint_after(TASK_POLL_INTERVAL);
        }
        if let Some(wait) = self.state.filters.remaining(now) {
            ctx.request_repaint_after(wait);
        }
    }
}
