use serde::{Deserialize, Serialize};

mod catalog;
pub mod shaping;

pub use catalog::{class_label, text, verify_catalog, MessageKey};
pub use shaping::shape;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog for {locale:?} is missing key {key:?}")]
    MissingKey { locale: Locale, key: MessageKey },
    #[error("catalog for {locale:?} has {found} class labels, expected {expected}")]
    LabelCount {
        locale: Locale,
        found: usize,
        expected: usize,
    },
}

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Ar];

    pub fn direction(self) -> TextDirection {
        match self {
            Self::En => TextDirection::Ltr,
            Self::Ar => TextDirection::Rtl,
        }
    }

    pub fn is_rtl(self) -> bool {
        self.direction() == TextDirection::Rtl
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    /// Config string used in `config.json`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }
}

/// Parse a config string into a [`Locale`]. Returns `None` for unrecognised
/// values so the caller can fall back to the default.
pub fn parse_locale(value: &str) -> Option<Locale> {
    match value.trim().to_ascii_lowercase().as_str() {
        "en" | "english" => Some(Locale::En),
        "ar" | "arabic" => Some(Locale::Ar),
        _ => None,
    }
}

pub fn resolve_locale(config_value: Option<&str>) -> Locale {
    config_value.and_then(parse_locale).unwrap_or_default()
}
