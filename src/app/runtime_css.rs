use std::cell::RefCell;

use crate::ui::{ColorTokens, StyleTokens};
use gtk4::CssProvider;

/// The stylesheet currently installed on the default display.
#[derive(Default)]
pub(super) struct RuntimeCss {
    installed: RefCell<Option<(ColorTokens, CssProvider)>>,
}

impl RuntimeCss {
    /// Install CSS for `colors`, replacing the previous provider. Does nothing
    /// when the colors are unchanged.
    pub(super) fn apply(&self, tokens: StyleTokens, colors: &ColorTokens) {
        if matches!(self.installed.borrow().as_ref(), Some((current, _)) if current == colors) {
            return;
        }
        let Some(display) = gtk4::gdk::Display::default() else {
            tracing::warn!("no display available; skipping runtime css");
            return;
        };

        let provider = CssProvider::new();
        provider.load_from_data(&runtime_css(tokens, colors));
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );

        let previous = self.installed.replace(Some((colors.clone(), provider)));
        if let Some((_, old)) = previous {
            gtk4::style_context_remove_provider_for_display(&display, &old);
        }
        tracing::debug!(background = %colors.window_background, "installed runtime css");
    }
}

pub(super) fn runtime_css(tokens: StyleTokens, colors: &ColorTokens) -> String {
    format!(
        "
window.palm-root {{
  background: {window_background};
  color: {text_color};
}}
.palm-root label {{
  color: {text_color};
}}
.palm-title {{
  font-size: 20px;
  font-weight: 700;
}}
.palm-beta {{
  font-size: 11px;
  font-weight: 600;
  color: {danger_color};
}}
.palm-description {{
  color: {muted_text_color};
}}
.palm-card {{
  border-radius: {card_radius}px;
  border: {border_width}px solid {border_color};
  background: {panel_background};
  padding: {spacing_12}px;
}}
.palm-button {{
  border-radius: {control_radius}px;
  border: {border_width}px solid {border_color};
  background: {panel_background};
  color: {text_color};
  padding: 0 {spacing_16}px;
  transition: box-shadow {motion_hover_ms}ms cubic-bezier(0.4, 0, 0.2, 1);
}}
.palm-button.accent {{
  background: {accent_color};
  color: {accent_text_color};
  border-color: transparent;
}}
.palm-button.accent label {{
  color: {accent_text_color};
}}
.palm-button:disabled {{
  opacity: 0.38;
}}
.palm-result-value {{
  font-size: 24px;
  font-weight: 700;
  color: {accent_color};
}}
.palm-progress trough {{
  min-height: {progress_height}px;
  border-radius: {progress_height}px;
}}
.palm-progress progress {{
  min-height: {progress_height}px;
  border-radius: {progress_height}px;
  background: {accent_color};
}}
.palm-status.status-error {{
  color: {danger_color};
}}
.palm-notice {{
  border-radius: {control_radius}px;
  background: {panel_background};
  border: {border_width}px solid {border_color};
  padding: {spacing_8}px {spacing_16}px;
}}
",
        window_background = colors.window_background,
        panel_background = colors.panel_background,
        border_color = colors.border_color,
        text_color = colors.text_color,
        muted_text_color = colors.muted_text_color,
        accent_color = colors.accent_color,
        accent_text_color = colors.accent_text_color,
        danger_color = colors.danger_color,
        card_radius = tokens.card_radius,
        control_radius = tokens.control_radius,
        border_width = tokens.border_width,
        progress_height = tokens.progress_height,
        spacing_8 = tokens.spacing_8,
        spacing_12 = tokens.spacing_12,
        spacing_16 = tokens.spacing_16,
        motion_hover_ms = tokens.motion_hover_ms,
    )
}
