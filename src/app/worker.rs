use std::rc::Rc;

use crate::dispatch::DELIVERY_POLL_INTERVAL;

use super::SharedSession;

/// Poll the session for finished predictions on the GTK main loop. The
/// source stops once the session is dropped.
pub(super) fn attach_delivery_pump(session: &SharedSession) -> gtk4::glib::SourceId {
    let session = Rc::downgrade(session);
    gtk4::glib::timeout_add_local(DELIVERY_POLL_INTERVAL, move || {
        let Some(session) = session.upgrade() else {
            return gtk4::glib::ControlFlow::Break;
        };
        match session.try_borrow_mut() {
            Ok(mut session) => {
                let received = session.pump();
                if received > 0 {
                    tracing::debug!(received, "applied prediction deliveries");
                }
            }
            Err(_) => tracing::debug!("session busy; deferring delivery pump"),
        }
        gtk4::glib::ControlFlow::Continue
    })
}
