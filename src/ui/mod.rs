pub mod style;
pub mod widgets;

pub use crate::theme::{tokens_for, ColorTokens};
pub use style::{StyleTokens, LAYOUT_TOKENS};
pub use widgets::{
    align_label, display_text, set_button_text, set_label_text, text_button, wrapping_label,
};
