use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use gtk4::prelude::*;
use gtk4::Label;

use crate::i18n::TextDirection;
use crate::session::Session;
use crate::state::SessionEvent;
use crate::ui::{align_label, set_label_text};

/// Shows the session notice in a toast label and dismisses it after a delay.
#[derive(Clone)]
pub(super) struct NoticeRuntime {
    label: Label,
    duration_ms: u32,
    sequence: Rc<Cell<u64>>,
    shown: Rc<RefCell<Option<String>>>,
    session: Weak<RefCell<Session>>,
}

impl NoticeRuntime {
    pub(super) fn new(label: &Label, duration_ms: u32, session: Weak<RefCell<Session>>) -> Self {
        Self {
            label: label.clone(),
            duration_ms,
            sequence: Rc::new(Cell::new(0)),
            shown: Rc::new(RefCell::new(None)),
            session,
        }
    }

    pub(super) fn sync(&self, notice: Option<&str>, direction: TextDirection) {
        if self.shown.borrow().as_deref() == notice {
            return;
        }
        self.shown.replace(notice.map(str::to_string));
        let sequence = self.sequence.get().saturating_add(1);
        self.sequence.set(sequence);

        let Some(message) = notice else {
            self.label.set_visible(false);
            return;
        };
        set_label_text(&self.label, message, direction);
        align_label(&self.label, direction);
        self.label.set_visible(true);

        let latest_sequence = self.sequence.clone();
        let session = self.session.clone();
        gtk4::glib::timeout_add_local_once(
            Duration::from_millis(u64::from(self.duration_ms)),
            move || {
                if latest_sequence.get() != sequence {
                    return;
                }
                let Some(session) = session.upgrade() else {
                    return;
                };
                match session.try_borrow_mut() {
                    Ok(mut session) => session.submit(SessionEvent::DismissNotice),
                    Err(_) => tracing::debug!("session busy; notice stays until next change"),
                };
            },
        );
    }
}
