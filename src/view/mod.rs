//! Projection of [`SessionState`] into display-ready strings and flags.
//!
//! Everything here is pure. Strings come out already shaped for the active
//! locale, so a renderer only has to put them on screen.

use std::path::PathBuf;

use crate::i18n::{class_label, shape, text, Locale, MessageKey, TextDirection};
use crate::predict::{Prediction, PredictionOutcome};
use crate::state::{Notice, Phase, SessionState};
use crate::theme::{tokens_for, ColorTokens};

/// Placeholder shown in the result slot before any outcome exists.
pub const EMPTY_RESULT: &str = "-";

const LANGUAGE_TOGGLE_TO_ARABIC: &str = "ع";
const LANGUAGE_TOGGLE_TO_ENGLISH: &str = "EN";

/// Session facts that live outside [`SessionState`].
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub server_url: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AboutText {
    pub title: String,
    pub body: String,
    pub dismiss: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PickerText {
    pub title: String,
    pub accept: String,
    pub cancel: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub direction: TextDirection,
    pub colors: ColorTokens,
    pub title: String,
    pub beta: String,
    pub description: String,
    pub about_button: String,
    pub camera_button: String,
    pub upload_button: String,
    pub result_caption: String,
    pub result_value: String,
    pub confidence_text: String,
    pub confidence_fraction: f64,
    pub status_text: String,
    pub status_is_error: bool,
    pub reset_button: String,
    pub theme_toggle: String,
    pub language_toggle: String,
    pub notice: Option<String>,
    pub image_path: Option<PathBuf>,
    pub capture_enabled: bool,
    pub reset_enabled: bool,
    pub busy: bool,
    pub about: AboutText,
    pub picker: PickerText,
}

impl ViewModel {
    pub fn is_rtl(&self) -> bool {
        self.direction == TextDirection::Rtl
    }
}

pub fn project(state: &SessionState, context: &ViewContext<'_>) -> ViewModel {
    let locale = state.locale;
    let localized = |key: MessageKey| shape(locale, text(locale, key));

    let result = project_outcome(locale, state.phase, state.outcome.as_ref());

    ViewModel {
        direction: locale.direction(),
        colors: tokens_for(state.theme),
        title: localized(MessageKey::Title),
        beta: localized(MessageKey::Beta),
        description: localized(MessageKey::Description),
        about_button: localized(MessageKey::About),
        camera_button: localized(MessageKey::Camera),
        upload_button: localized(MessageKey::Upload),
        result_caption: localized(MessageKey::Result),
        result_value: result.value,
        confidence_text: result.confidence_text,
        confidence_fraction: result.confidence_fraction,
        status_text: result.status_text,
        status_is_error: result.status_is_error,
        reset_button: localized(MessageKey::Reset),
        theme_toggle: state.theme.toggle_label().to_string(),
        language_toggle: language_toggle(locale).to_string(),
        notice: state
            .notice
            .as_ref()
            .map(|notice| shape(locale, &notice_text(locale, notice))),
        image_path: state.image_path.clone(),
        capture_enabled: state.phase != Phase::Analyzing,
        reset_enabled: state.phase != Phase::Idle,
        busy: state.phase == Phase::Analyzing,
        about: AboutText {
            title: localized(MessageKey::AboutTitle),
            body: shape(locale, &about_body(locale, context.server_url)),
            dismiss: localized(MessageKey::Ok),
        },
        picker: PickerText {
            title: localized(MessageKey::PickImage),
            accept: localized(MessageKey::Ok),
            cancel: localized(MessageKey::Cancel),
        },
    }
}

struct ResultView {
    value: String,
    confidence_text: String,
    confidence_fraction: f64,
    status_text: String,
    status_is_error: bool,
}

fn project_outcome(
    locale: Locale,
    phase: Phase,
    outcome: Option<&PredictionOutcome>,
) -> ResultView {
    let status_text = if phase == Phase::Analyzing {
        shape(locale, text(locale, MessageKey::Analyzing))
    } else {
        String::new()
    };

    match outcome {
        None => ResultView {
            value: EMPTY_RESULT.to_string(),
            confidence_text: String::new(),
            confidence_fraction: 0.0,
            status_text,
            status_is_error: false,
        },
        Some(PredictionOutcome::Success(prediction)) => ResultView {
            value: shape(locale, &display_label(locale, prediction)),
            confidence_text: shape(locale, &confidence_text(locale, prediction.confidence)),
            confidence_fraction: prediction.confidence,
            status_text,
            status_is_error: false,
        },
        Some(PredictionOutcome::Failure(err)) => {
            let caption = text(locale, MessageKey::Error);
            ResultView {
                value: shape(locale, caption),
                confidence_text: String::new(),
                confidence_fraction: 0.0,
                status_text: shape(locale, &format!("{caption}: {err}")),
                status_is_error: true,
            }
        }
    }
}

/// Catalog name for an in-range class, the server's own label otherwise,
/// and the localized "unknown" text when neither exists.
pub fn display_label(locale: Locale, prediction: &Prediction) -> String {
    class_label(locale, prediction.class_index)
        .map(str::to_string)
        .or_else(|| prediction.label.clone())
        .unwrap_or_else(|| text(locale, MessageKey::Unknown).to_string())
}

pub fn confidence_percent(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

fn confidence_text(locale: Locale, confidence: f64) -> String {
    format!(
        "{}: {}",
        text(locale, MessageKey::Confidence),
        confidence_percent(confidence)
    )
}

fn notice_text(locale: Locale, notice: &Notice) -> String {
    match notice {
        Notice::ImageUnavailable(path) => format!(
            "{}: {}",
            text(locale, MessageKey::ImageUnavailable),
            path.display()
        ),
        Notice::AnalysisInProgress => text(locale, MessageKey::AnalysisInProgress).to_string(),
        Notice::CameraUnavailable => text(locale, MessageKey::CameraUnavailable).to_string(),
    }
}

fn about_body(locale: Locale, server_url: &str) -> String {
    format!(
        "{}\n\n{}: {server_url}",
        text(locale, MessageKey::AboutText),
        text(locale, MessageKey::Server)
    )
}

fn language_toggle(locale: Locale) -> &'static str {
    match locale {
        Locale::En => LANGUAGE_TOGGLE_TO_ARABIC,
        Locale::Ar => LANGUAGE_TOGGLE_TO_ENGLISH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::PredictionError;
    use crate::theme::ThemeMode;

    const SERVER: &str = "http://classifier.test";

    fn context() -> ViewContext<'static> {
        ViewContext { server_url: SERVER }
    }

    fn resolved(locale: Locale, outcome: PredictionOutcome) -> SessionState {
        SessionState {
            image_path: Some(PathBuf::from("/tmp/palm.jpg")),
            phase: Phase::Resolved,
            outcome: Some(outcome),
            ..SessionState::new(locale, ThemeMode::Light)
        }
    }

    fn success(class_index: Option<i64>, confidence: f64, label: Option<&str>) -> PredictionOutcome {
        PredictionOutcome::Success(Prediction {
            class_index,
            confidence,
            label: label.map(str::to_string),
        })
    }

    #[test]
    fn khalas_in_english() {
        let view = project(
            &resolved(Locale::En, success(Some(0), 0.97, Some("Khalas"))),
            &context(),
        );
        assert_eq!(view.result_value, "Khalas");
        assert_eq!(view.confidence_text, "Confidence: 97.0%");
        assert!((view.confidence_fraction - 0.97).abs() < f64::EPSILON);
        assert_eq!(view.status_text, "");
        assert!(view.capture_enabled);
        assert!(view.reset_enabled);
    }

    #[test]
    fn khalas_in_arabic_is_shaped() {
        let view = project(
            &resolved(Locale::Ar, success(Some(0), 0.97, Some("Khalas"))),
            &context(),
        );
        assert_eq!(view.result_value, "\u{FEB9}\u{FEFC}\u{FEA7}");
        assert_eq!(
            view.confidence_text,
            "%97.0 :\u{FE94}\u{FED7}\u{FEAA}\u{FEDF}\u{FE8D}"
        );
        assert_eq!(view.direction, TextDirection::Rtl);
        assert!(view.is_rtl());
    }

    #[test]
    fn every_known_class_uses_the_catalog_label() {
        let expected = [(0, "Khalas"), (1, "Razeez"), (2, "Shishi")];
        for (index, label) in expected {
            let view = project(
                &resolved(Locale::En, success(Some(index), 0.5, Some("server-label"))),
                &context(),
            );
            assert_eq!(view.result_value, label);
        }
    }

    #[test]
    fn out_of_range_class_falls_back_to_server_label() {
        for locale in Locale::ALL {
            let view = project(
                &resolved(locale, success(Some(7), 0.42, Some("Barhi"))),
                &context(),
            );
            assert_eq!(view.result_value, "Barhi", "{locale:?}");
        }
        let view = project(
            &resolved(Locale::En, success(Some(-1), 0.42, Some("Barhi"))),
            &context(),
        );
        assert_eq!(view.result_value, "Barhi");
    }

    #[test]
    fn missing_class_and_label_show_unknown() {
        let view = project(&resolved(Locale::En, success(None, 0.1, None)), &context());
        assert_eq!(view.result_value, "Unknown / Other");
    }

    #[test]
    fn idle_state_shows_placeholders() {
        let view = project(&SessionState::new(Locale::En, ThemeMode::Light), &context());
        assert_eq!(view.result_value, EMPTY_RESULT);
        assert_eq!(view.confidence_text, "");
        assert_eq!(view.confidence_fraction, 0.0);
        assert!(view.capture_enabled);
        assert!(!view.reset_enabled);
        assert!(!view.busy);
        assert!(view.notice.is_none());
    }

    #[test]
    fn analyzing_disables_capture_and_shows_status() {
        let state = SessionState {
            image_path: Some(PathBuf::from("/tmp/palm.jpg")),
            phase: Phase::Analyzing,
            ..SessionState::new(Locale::En, ThemeMode::Light)
        };
        let view = project(&state, &context());
        assert_eq!(view.status_text, "Analyzing...");
        assert!(view.busy);
        assert!(!view.capture_enabled);
        assert!(view.reset_enabled);
        assert_eq!(view.image_path, Some(PathBuf::from("/tmp/palm.jpg")));
    }

    #[test]
    fn failure_shows_error_status_with_server_details() {
        let outcome = PredictionOutcome::Failure(PredictionError::Server {
            status: 500,
            body: "internal error".to_string(),
        });
        let view = project(&resolved(Locale::En, outcome), &context());
        assert_eq!(view.result_value, "Error");
        assert_eq!(view.status_text, "Error: server error 500: internal error");
        assert!(view.status_is_error);
        assert_eq!(view.confidence_fraction, 0.0);
    }

    #[test]
    fn locale_switch_changes_strings_only() {
        let english = resolved(Locale::En, success(Some(1), 0.8, Some("Razeez")));
        let arabic = SessionState {
            locale: Locale::Ar,
            ..english.clone()
        };
        let en_view = project(&english, &context());
        let ar_view = project(&arabic, &context());

        assert_ne!(en_view.title, ar_view.title);
        assert_ne!(en_view.result_value, ar_view.result_value);
        assert_eq!(en_view.language_toggle, "ع");
        assert_eq!(ar_view.language_toggle, "EN");
        assert_eq!(en_view.confidence_fraction, ar_view.confidence_fraction);
        assert_eq!(en_view.image_path, ar_view.image_path);
        assert_eq!(en_view.colors, ar_view.colors);
    }

    #[test]
    fn theme_drives_colors_and_toggle_label() {
        let dark = SessionState::new(Locale::En, ThemeMode::Dark);
        let view = project(&dark, &context());
        assert_eq!(view.theme_toggle, "Light");
        assert_eq!(view.colors, tokens_for(ThemeMode::Dark));
    }

    #[test]
    fn notices_are_localized() {
        let state = SessionState {
            notice: Some(Notice::ImageUnavailable(PathBuf::from("/tmp/gone.jpg"))),
            ..SessionState::new(Locale::En, ThemeMode::Light)
        };
        let view = project(&state, &context());
        assert_eq!(view.notice.as_deref(), Some("File not found: /tmp/gone.jpg"));

        let state = SessionState {
            notice: Some(Notice::AnalysisInProgress),
            ..SessionState::new(Locale::En, ThemeMode::Light)
        };
        let view = project(&state, &context());
        assert_eq!(
            view.notice.as_deref(),
            Some("An image is already being analyzed.")
        );
    }

    #[test]
    fn about_body_ends_with_server_url() {
        let view = project(&SessionState::new(Locale::En, ThemeMode::Light), &context());
        assert_eq!(view.about.title, "About the Project");
        assert!(
            view.about.body.ends_with("Server: http://classifier.test"),
            "{}",
            view.about.body
        );
    }

    #[test]
    fn confidence_percent_uses_one_decimal() {
        assert_eq!(confidence_percent(0.97), "97.0%");
        assert_eq!(confidence_percent(0.0), "0.0%");
        assert_eq!(confidence_percent(1.0), "100.0%");
        assert_eq!(confidence_percent(0.12345), "12.3%");
    }
}
