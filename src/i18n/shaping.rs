//! Display shaping for right-to-left text.
//!
//! Arabic strings are stored in logical order. Renderers without complex text
//! support need them joined into contextual letter forms and reordered into
//! visual order first; left-to-right locales pass through untouched.

use unicode_bidi::BidiInfo;

use super::{Locale, TextDirection};

/// Convert logical `text` into display-ready text for `locale`.
///
/// Lines are shaped independently so multi-line descriptions keep their
/// layout. The result depends only on the inputs; callers re-shape on every
/// locale or text change.
pub fn shape(locale: Locale, text: &str) -> String {
    match locale.direction() {
        TextDirection::Ltr => text.to_string(),
        TextDirection::Rtl => text
            .split('\n')
            .map(visual_line)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn visual_line(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }

    let reshaped = ar_reshaper::reshape_line(line);
    let bidi = BidiInfo::new(&reshaped, None);
    bidi.paragraphs
        .iter()
        .map(|paragraph| bidi.reorder_line(paragraph, paragraph.range.clone()))
        .collect()
}
