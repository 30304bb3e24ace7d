use gtk4::prelude::*;
use gtk4::{Button, Justification, Label};

use crate::i18n::TextDirection;

const LEFT_TO_RIGHT_OVERRIDE: char = '\u{202D}';
const POP_DIRECTIONAL_FORMATTING: char = '\u{202C}';

pub fn text_button(control_height: u16, extra_classes: &[&str]) -> Button {
    let button = Button::new();
    button.set_focus_on_click(false);
    button.add_css_class("palm-button");
    for css_class in extra_classes {
        button.add_css_class(css_class);
    }
    button.set_size_request(-1, i32::from(control_height));
    button
}

pub fn wrapping_label(extra_classes: &[&str]) -> Label {
    let label = Label::new(None);
    label.set_wrap(true);
    label.set_wrap_mode(gtk4::pango::WrapMode::WordChar);
    for css_class in extra_classes {
        label.add_css_class(css_class);
    }
    label
}

/// Pin already-reordered text so Pango lays it out exactly as given.
///
/// Shaped right-to-left strings are in visual order; without the override
/// the toolkit would run its own bidi pass and flip them back.
pub fn display_text(text: &str, direction: TextDirection) -> String {
    match direction {
        TextDirection::Ltr => text.to_string(),
        TextDirection::Rtl => text
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{LEFT_TO_RIGHT_OVERRIDE}{line}{POP_DIRECTIONAL_FORMATTING}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Align a label to the reading edge of `direction`.
pub fn align_label(label: &Label, direction: TextDirection) {
    let (justify, xalign) = match direction {
        TextDirection::Ltr => (Justification::Left, 0.0),
        TextDirection::Rtl => (Justification::Right, 1.0),
    };
    label.set_justify(justify);
    label.set_xalign(xalign);
}

pub fn set_label_text(label: &Label, text: &str, direction: TextDirection) {
    label.set_text(&display_text(text, direction));
}

pub fn set_button_text(button: &Button, text: &str, direction: TextDirection) {
    button.set_label(&display_text(text, direction));
}
