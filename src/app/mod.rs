use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use crate::config::StartupSettings;
use crate::dispatch::PredictionDispatcher;
use crate::error::AppResult;
use crate::i18n::{text, MessageKey};
use crate::predict::HttpClassifier;
use crate::session::Session;
use crate::state::{SessionState, StateMachine};
use crate::ui::{StyleTokens, LAYOUT_TOKENS};
use crate::view::{project, ViewContext};
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow};

mod actions;
mod layout;
mod notice;
mod runtime_css;
mod worker;

use self::actions::connect_controls;
use self::layout::{build_classifier_ui, ClassifierUi};
use self::notice::NoticeRuntime;
use self::runtime_css::RuntimeCss;
use self::worker::attach_delivery_pump;

const APP_ID: &str = "io.github.palmclassifier.PalmClassifier";
const BINARY_NAME: &str = "palm-classifier";

pub(crate) type SharedSession = Rc<RefCell<Session>>;

/// Everything that turns a [`SessionState`] into pixels.
struct Renderer {
    window: ApplicationWindow,
    ui: ClassifierUi,
    css: RuntimeCss,
    notices: NoticeRuntime,
    style_tokens: StyleTokens,
    server_url: String,
}

impl Renderer {
    fn render(&self, state: &SessionState) {
        let view = project(
            state,
            &ViewContext {
                server_url: &self.server_url,
            },
        );
        self.css.apply(self.style_tokens, &view.colors);
        self.window.set_title(Some(text(state.locale, MessageKey::Title)));
        self.ui.apply(&view);
        self.notices.sync(view.notice.as_deref(), view.direction);
    }
}

pub struct App {
    settings: StartupSettings,
}

impl App {
    pub fn new(settings: StartupSettings) -> Self {
        Self { settings }
    }

    pub fn start(&self) -> AppResult<()> {
        let classifier = HttpClassifier::new()?;
        let machine = StateMachine::new(
            self.settings.server_url.clone(),
            self.settings.locale,
            self.settings.theme,
        );
        let session: SharedSession = Rc::new(RefCell::new(Session::new(
            machine,
            PredictionDispatcher::new(Arc::new(classifier)),
        )));

        tracing::info!("starting gtk runtime");
        let application = Application::new(Some(APP_ID), gtk4::gio::ApplicationFlags::NON_UNIQUE);

        let activate_once = Rc::new(Cell::new(false));
        let session_for_activate = session.clone();
        application.connect_activate(move |app| {
            if activate_once.replace(true) {
                tracing::debug!("ignoring duplicate gtk activate signal");
                return;
            }
            let session = session_for_activate.clone();
            let style_tokens = LAYOUT_TOKENS;

            let window = ApplicationWindow::new(app);
            window.add_css_class("palm-root");
            window.set_default_size(
                style_tokens.window_default_width,
                style_tokens.window_default_height,
            );

            let ui = build_classifier_ui(style_tokens);
            window.set_child(Some(&ui.root));

            let renderer = Rc::new(Renderer {
                window: window.clone(),
                ui: ui.clone(),
                css: RuntimeCss::default(),
                notices: NoticeRuntime::new(
                    &ui.notice_label,
                    style_tokens.notice_duration_ms,
                    Rc::downgrade(&session),
                ),
                style_tokens,
                server_url: session.borrow().server_url().to_string(),
            });
            session.borrow_mut().subscribe({
                let renderer = renderer.clone();
                move |state| renderer.render(state)
            });
            connect_controls(&ui, &window, &session);
            renderer.render(session.borrow().state());
            attach_delivery_pump(&session);

            tracing::info!("presenting classifier window");
            window.present();
        });

        // Pass only argv[0] so GTK never sees flags meant for this binary.
        let program = std::env::args().next().unwrap_or_else(|| BINARY_NAME.to_string());
        application.run_with_args(&[program]);

        tracing::debug!(session = ?session.borrow(), "gtk runtime finished");
        Ok(())
    }
}
