use std::path::PathBuf;

use crate::i18n::Locale;
use crate::predict::PredictionOutcome;
use crate::theme::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    ImageSelected,
    Analyzing,
    Resolved,
}

/// Short-lived message surfaced next to the main controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ImageUnavailable(PathBuf),
    AnalysisInProgress,
    CameraUnavailable,
}

/// Everything the view needs to render one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub locale: Locale,
    pub theme: ThemeMode,
    pub image_path: Option<PathBuf>,
    pub phase: Phase,
    pub outcome: Option<PredictionOutcome>,
    pub notice: Option<Notice>,
}

impl SessionState {
    pub fn new(locale: Locale, theme: ThemeMode) -> Self {
        Self {
            locale,
            theme,
            image_path: None,
            phase: Phase::Idle,
            outcome: None,
            notice: None,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Locale::default(), ThemeMode::default())
    }
}
