use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::ui::{
    align_label, set_button_text, set_label_text, text_button, wrapping_label, StyleTokens,
};
use crate::view::ViewModel;
use gtk4::prelude::*;
use gtk4::{
    Align, Box as GtkBox, Button, Frame, Label, Orientation, Picture, PolicyType, ProgressBar,
    ScrolledWindow,
};

#[derive(Clone)]
pub(super) struct ClassifierUi {
    pub(super) root: GtkBox,
    pub(super) theme_button: Button,
    pub(super) language_button: Button,
    pub(super) about_button: Button,
    pub(super) camera_button: Button,
    pub(super) upload_button: Button,
    pub(super) reset_button: Button,
    pub(super) notice_label: Label,
    title_label: Label,
    beta_label: Label,
    description_label: Label,
    preview_frame: Frame,
    preview: Picture,
    shown_image: Rc<RefCell<Option<PathBuf>>>,
    result_caption: Label,
    result_value: Label,
    progress: ProgressBar,
    confidence_label: Label,
    status_label: Label,
}

impl ClassifierUi {
    /// Put every string and flag of `view` on screen.
    pub(super) fn apply(&self, view: &ViewModel) {
        let direction = view.direction;

        self.theme_button.set_label(&view.theme_toggle);
        self.language_button.set_label(&view.language_toggle);
        set_label_text(&self.title_label, &view.title, direction);
        set_label_text(&self.beta_label, &view.beta, direction);
        set_label_text(&self.description_label, &view.description, direction);
        set_button_text(&self.about_button, &view.about_button, direction);
        set_button_text(&self.camera_button, &view.camera_button, direction);
        set_button_text(&self.upload_button, &view.upload_button, direction);
        set_label_text(&self.result_caption, &view.result_caption, direction);
        set_label_text(&self.result_value, &view.result_value, direction);
        set_label_text(&self.confidence_label, &view.confidence_text, direction);
        set_label_text(&self.status_label, &view.status_text, direction);
        set_button_text(&self.reset_button, &view.reset_button, direction);

        for label in [
            &self.description_label,
            &self.result_caption,
            &self.confidence_label,
            &self.status_label,
        ] {
            align_label(label, direction);
        }

        self.progress.set_fraction(view.confidence_fraction);
        self.confidence_label.set_visible(!view.confidence_text.is_empty());
        self.status_label.set_visible(!view.status_text.is_empty());
        if view.status_is_error {
            self.status_label.add_css_class("status-error");
        } else {
            self.status_label.remove_css_class("status-error");
        }

        self.camera_button.set_sensitive(view.capture_enabled);
        self.upload_button.set_sensitive(view.capture_enabled);
        self.reset_button.set_sensitive(view.reset_enabled);
        self.reset_button.set_visible(view.reset_enabled);

        self.show_image(view.image_path.as_ref());
    }

    fn show_image(&self, path: Option<&PathBuf>) {
        if self.shown_image.borrow().as_ref() == path {
            return;
        }
        self.preview.set_filename(path);
        self.preview_frame.set_visible(path.is_some());
        self.shown_image.replace(path.cloned());
    }
}

pub(super) fn build_classifier_ui(style_tokens: StyleTokens) -> ClassifierUi {
    let root = GtkBox::new(Orientation::Vertical, style_tokens.spacing_12);
    root.set_margin_top(style_tokens.spacing_16);
    root.set_margin_bottom(style_tokens.spacing_16);
    root.set_margin_start(style_tokens.spacing_16);
    root.set_margin_end(style_tokens.spacing_16);

    let theme_button = text_button(style_tokens.control_height, &["flat"]);
    let language_button = text_button(style_tokens.control_height, &["flat"]);
    let title_label = Label::new(None);
    title_label.add_css_class("palm-title");
    let beta_label = Label::new(None);
    beta_label.add_css_class("palm-beta");
    let title_column = GtkBox::new(Orientation::Vertical, style_tokens.spacing_4);
    title_column.set_hexpand(true);
    title_column.set_halign(Align::Center);
    title_column.append(&title_label);
    title_column.append(&beta_label);

    let top_bar = GtkBox::new(Orientation::Horizontal, style_tokens.spacing_8);
    top_bar.append(&theme_button);
    top_bar.append(&title_column);
    top_bar.append(&language_button);
    root.append(&top_bar);

    let description_label = wrapping_label(&["palm-description"]);
    description_label.set_hexpand(true);
    description_label.set_valign(Align::Start);
    let description_scroll = ScrolledWindow::new();
    description_scroll.set_policy(PolicyType::Never, PolicyType::Automatic);
    description_scroll.set_min_content_height(style_tokens.description_min_height);
    description_scroll.set_child(Some(&description_label));
    let about_button = text_button(style_tokens.control_height, &[]);
    about_button.set_halign(Align::Center);
    let description_box = GtkBox::new(Orientation::Vertical, style_tokens.spacing_8);
    description_box.append(&description_scroll);
    description_box.append(&about_button);
    let description_card = Frame::new(None);
    description_card.add_css_class("palm-card");
    description_card.set_child(Some(&description_box));
    root.append(&description_card);

    let camera_button = text_button(style_tokens.control_height, &["accent"]);
    camera_button.set_hexpand(true);
    let upload_button = text_button(style_tokens.control_height, &["accent"]);
    upload_button.set_hexpand(true);
    let action_row = GtkBox::new(Orientation::Horizontal, style_tokens.spacing_12);
    action_row.set_homogeneous(true);
    action_row.append(&camera_button);
    action_row.append(&upload_button);
    root.append(&action_row);

    let notice_label = wrapping_label(&["palm-notice"]);
    notice_label.set_visible(false);
    root.append(&notice_label);

    let preview = Picture::new();
    preview.set_can_shrink(true);
    preview.set_keep_aspect_ratio(true);
    preview.set_size_request(-1, style_tokens.preview_height);
    let preview_frame = Frame::new(None);
    preview_frame.add_css_class("palm-card");
    preview_frame.set_child(Some(&preview));
    preview_frame.set_visible(false);
    root.append(&preview_frame);

    let result_caption = Label::new(None);
    let result_value = Label::new(None);
    result_value.add_css_class("palm-result-value");
    let progress = ProgressBar::new();
    progress.add_css_class("palm-progress");
    let confidence_label = Label::new(None);
    let result_box = GtkBox::new(Orientation::Vertical, style_tokens.spacing_8);
    result_box.append(&result_caption);
    result_box.append(&result_value);
    result_box.append(&progress);
    result_box.append(&confidence_label);
    let result_card = Frame::new(None);
    result_card.add_css_class("palm-card");
    result_card.set_child(Some(&result_box));
    root.append(&result_card);

    let status_label = wrapping_label(&["palm-status"]);
    status_label.set_hexpand(true);
    let reset_button = text_button(style_tokens.control_height, &[]);
    let bottom_row = GtkBox::new(Orientation::Horizontal, style_tokens.spacing_12);
    bottom_row.set_vexpand(true);
    bottom_row.set_valign(Align::End);
    bottom_row.append(&status_label);
    bottom_row.append(&reset_button);
    root.append(&bottom_row);

    ClassifierUi {
        root,
        theme_button,
        language_button,
        about_button,
        camera_button,
        upload_button,
        reset_button,
        notice_label,
        title_label,
        beta_label,
        description_label,
        preview_frame,
        preview,
        shown_image: Rc::new(RefCell::new(None)),
        result_caption,
        result_value,
        progress,
        confidence_label,
        status_label,
    }
}
