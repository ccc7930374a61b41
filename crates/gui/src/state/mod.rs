pub mod grid;
pub mod notifications;
pub mod polygon;
pub mod scale;
pub mod settings;

pub use grid::Grid;
pub use notifications::{Notifications, Severity, Toast};
pub use polygon::{AddPointOutcome, EditorState, InputKind, PolygonChange, PolygonEditor};
pub use scale::{Scale, ScaleEngine};
pub use settings::{AppSettings, GridStyle, PolygonStyle};

use crate::session::ToolSession;

/// Panel visibility flags
pub struct PanelVisibility {
    pub controls: bool,
    pub status_bar: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            controls: true,
            status_bar: true,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub session: ToolSession,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
    /// Reset confirmation modal is open
    pub confirm_reset: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(AppSettings::load())
    }
}

impl AppState {
    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            session: ToolSession::with_settings(&settings),
            panels: PanelVisibility::default(),
            settings,
            show_settings_window: false,
            confirm_reset: false,
        }
    }

    /// Push edited settings into the session and persist them
    pub fn commit_settings(&mut self) {
        crate::i18n::set_lang(self.settings.language);
        self.session.apply_settings(&self.settings);
        self.settings.save();
    }
}
