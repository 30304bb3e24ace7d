//! Wires window controls to session events.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::state::{Notice, SessionEvent};
use crate::ui::display_text;
use crate::view::{project, ViewContext, ViewModel};
use gtk4::prelude::*;
use gtk4::{
    ApplicationWindow, ButtonsType, DialogFlags, FileChooserAction, FileChooserNative, FileFilter,
    MessageDialog, MessageType, ResponseType,
};

use super::layout::ClassifierUi;
use super::SharedSession;

const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

pub(super) fn submit(session: &SharedSession, event: SessionEvent) {
    match session.try_borrow_mut() {
        Ok(mut session) => session.submit(event),
        Err(_) => tracing::warn!(event = ?event.kind(), "session busy; dropping ui event"),
    }
}

fn current_view(session: &SharedSession) -> ViewModel {
    let session = session.borrow();
    project(
        session.state(),
        &ViewContext {
            server_url: session.server_url(),
        },
    )
}

pub(super) fn connect_controls(
    ui: &ClassifierUi,
    window: &ApplicationWindow,
    session: &SharedSession,
) {
    let picker_slot = Rc::new(RefCell::new(None::<FileChooserNative>));

    ui.theme_button.connect_clicked({
        let session = session.clone();
        move |_| submit(&session, SessionEvent::ToggleTheme)
    });
    ui.language_button.connect_clicked({
        let session = session.clone();
        move |_| submit(&session, SessionEvent::ToggleLocale)
    });
    ui.reset_button.connect_clicked({
        let session = session.clone();
        move |_| submit(&session, SessionEvent::Reset)
    });
    ui.camera_button.connect_clicked({
        let session = session.clone();
        move |_| {
            tracing::info!("camera capture requested; no capture source on desktop");
            submit(&session, SessionEvent::NoticeRaised(Notice::CameraUnavailable));
        }
    });
    ui.upload_button.connect_clicked({
        let session = session.clone();
        let window = window.clone();
        move |_| open_image_picker(&window, &session, &picker_slot)
    });
    ui.about_button.connect_clicked({
        let session = session.clone();
        let window = window.clone();
        move |_| show_about_dialog(&window, &current_view(&session))
    });
}

#[allow(deprecated)]
fn open_image_picker(
    window: &ApplicationWindow,
    session: &SharedSession,
    picker_slot: &Rc<RefCell<Option<FileChooserNative>>>,
) {
    let view = current_view(session);
    let dialog = FileChooserNative::new(
        Some(view.picker.title.as_str()),
        Some(window),
        FileChooserAction::Open,
        Some(view.picker.accept.as_str()),
        Some(view.picker.cancel.as_str()),
    );
    let filter = FileFilter::new();
    filter.set_name(Some("jpg / png"));
    for mime_type in IMAGE_MIME_TYPES {
        filter.add_mime_type(mime_type);
    }
    dialog.add_filter(&filter);

    dialog.connect_response({
        let session = session.clone();
        let picker_slot = picker_slot.clone();
        move |dialog, response| {
            if response == ResponseType::Accept {
                match dialog.file().and_then(|file| file.path()) {
                    Some(path) => choose_image(&session, path),
                    None => tracing::warn!("file picker returned a non-local file"),
                }
            }
            dialog.destroy();
            picker_slot.borrow_mut().take();
        }
    });

    dialog.show();
    picker_slot.borrow_mut().replace(dialog);
}

fn choose_image(session: &SharedSession, path: PathBuf) {
    tracing::info!(path = %path.display(), "image chosen");
    submit(session, SessionEvent::ImageChosen(path));
}

#[allow(deprecated)]
fn show_about_dialog(window: &ApplicationWindow, view: &ViewModel) {
    let dialog = MessageDialog::new(
        Some(window),
        DialogFlags::MODAL | DialogFlags::DESTROY_WITH_PARENT,
        MessageType::Info,
        ButtonsType::None,
        display_text(&view.about.title, view.direction),
    );
    dialog.set_secondary_text(Some(&display_text(&view.about.body, view.direction)));
    dialog.add_button(&display_text(&view.about.dismiss, view.direction), ResponseType::Ok);
    dialog.connect_response(|dialog, _| dialog.close());
    dialog.present();
}
