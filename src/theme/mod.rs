use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Label for the toggle button: it names the mode a click switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Dark",
            Self::Dark => "Light",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

pub fn parse_theme_mode(value: &str) -> Option<ThemeMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

/// CSS color values for one theme mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTokens {
    pub window_background: String,
    pub panel_background: String,
    pub border_color: String,
    pub text_color: String,
    pub muted_text_color: String,
    pub accent_color: String,
    pub accent_text_color: String,
    pub danger_color: String,
}

pub fn tokens_for(mode: ThemeMode) -> ColorTokens {
    match mode {
        ThemeMode::Light => ColorTokens {
            window_background: "#FAF7F5".to_string(),
            panel_background: "#FFFFFF".to_string(),
            border_color: "rgba(0, 0, 0, 0.12)".to_string(),
            text_color: "#000000".to_string(),
            muted_text_color: "rgba(0, 0, 0, 0.60)".to_string(),
            accent_color: "#2E7D32".to_string(),
            accent_text_color: "#FFFFFF".to_string(),
            danger_color: "#C62828".to_string(),
        },
        ThemeMode::Dark => ColorTokens {
            window_background: "#1F1F1F".to_string(),
            panel_background: "#2A2A2A".to_string(),
            border_color: "rgba(255, 255, 255, 0.14)".to_string(),
            text_color: "#FFFFFF".to_string(),
            muted_text_color: "rgba(255, 255, 255, 0.64)".to_string(),
            accent_color: "#66BB6A".to_string(),
            accent_text_color: "#0D0D0D".to_string(),
            danger_color: "#EF5350".to_string(),
        },
    }
}
