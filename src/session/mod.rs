use std::time::Duration;

use crate::dispatch::{Delivery, PredictionDispatcher};
use crate::state::{SessionEvent, SessionState, StateMachine};

type Subscriber = Box<dyn Fn(&SessionState)>;

/// The presentation-thread side of a classification session.
///
/// Events go in through [`Session::submit`]; finished predictions are pulled
/// in through [`Session::pump`]. Subscribers see every state that differs
/// from the previous one.
pub struct Session {
    machine: StateMachine,
    dispatcher: PredictionDispatcher,
    subscribers: Vec<Subscriber>,
}

impl Session {
    pub fn new(machine: StateMachine, dispatcher: PredictionDispatcher) -> Self {
        Self {
            machine,
            dispatcher,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        self.machine.state()
    }

    pub fn server_url(&self) -> &str {
        self.machine.server_url()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&SessionState) + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Apply `event`, start any prediction it asks for and notify subscribers.
    /// A rejected event turns into a notice instead of an error.
    pub fn submit(&mut self, event: SessionEvent) {
        let before = self.machine.state().clone();

        match self.machine.handle(event) {
            Ok(Some(ticket)) => self.dispatcher.dispatch(ticket),
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%err, "session event rejected");
                if let Err(err) = self.machine.handle(SessionEvent::NoticeRaised(err.notice())) {
                    tracing::error!(%err, "failed to raise notice");
                }
            }
        }

        if self.machine.state() != &before {
            self.notify();
        }
    }

    /// Apply every prediction outcome that has arrived. Returns how many were
    /// received, stale ones included.
    pub fn pump(&mut self) -> usize {
        let deliveries = self.dispatcher.drain();
        let received = deliveries.len();
        for delivery in deliveries {
            self.deliver(delivery);
        }
        received
    }

    /// Block up to `timeout` for one outcome and apply it.
    pub fn pump_blocking(&mut self, timeout: Duration) -> bool {
        match self.dispatcher.wait_next(timeout) {
            Some(delivery) => {
                self.deliver(delivery);
                true
            }
            None => false,
        }
    }

    fn deliver(&mut self, delivery: Delivery) {
        let Delivery {
            generation,
            outcome,
        } = delivery;
        self.submit(SessionEvent::OutcomeDelivered {
            generation,
            outcome,
        });
    }

    fn notify(&self) {
        let state = self.machine.state();
        for subscriber in &self.subscribers {
            subscriber(state);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("machine", &self.machine)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use super::*;
    use crate::dispatch::testing::{khalas, FixedClassifier, GatedClassifier};
    use crate::i18n::Locale;
    use crate::predict::{
        Classifier, HttpClassifier, Prediction, PredictionError, PredictionOutcome,
    };
    use crate::state::{Notice, Phase};
    use crate::test_support::{
        unreachable_url, with_temp_root, write_fixture_image, CannedResponse, LoopbackServer,
    };
    use crate::theme::ThemeMode;

    const WAIT: Duration = Duration::from_secs(5);

    fn session_with(classifier: Arc<dyn Classifier>, server_url: &str) -> Session {
        Session::new(
            StateMachine::new(server_url, Locale::En, ThemeMode::Light),
            PredictionDispatcher::new(classifier),
        )
    }

    fn recorder(session: &mut Session) -> Rc<RefCell<Vec<SessionState>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |state| sink.borrow_mut().push(state.clone()));
        seen
    }

    #[test]
    fn choosing_an_image_resolves_through_the_classifier() {
        with_temp_root("session-resolve", |root| {
            let image = write_fixture_image(root, "palm.jpg");
            let mut session =
                session_with(Arc::new(FixedClassifier(khalas())), "http://classifier.test");
            let seen = recorder(&mut session);

            session.submit(SessionEvent::ImageChosen(image.clone()));
            assert_eq!(session.state().phase, Phase::Analyzing);

            assert!(session.pump_blocking(WAIT));
            assert_eq!(session.state().phase, Phase::Resolved);
            assert_eq!(session.state().outcome, Some(khalas()));
            assert_eq!(session.state().image_path.as_deref(), Some(image.as_path()));

            let phases: Vec<Phase> = seen.borrow().iter().map(|state| state.phase).collect();
            assert_eq!(phases, vec![Phase::Analyzing, Phase::Resolved]);
        });
    }

    #[test]
    fn reset_during_analysis_discards_the_late_outcome() {
        with_temp_root("session-reset", |root| {
            let image = write_fixture_image(root, "palm.jpg");
            let gated = Arc::new(GatedClassifier::new(khalas()));
            let mut session = session_with(gated.clone(), "http://classifier.test");

            session.submit(SessionEvent::ImageChosen(image));
            session.submit(SessionEvent::Reset);
            assert_eq!(session.state().phase, Phase::Idle);

            gated.open();
            assert!(session.pump_blocking(WAIT));
            assert_eq!(
                session.state(),
                &SessionState::new(Locale::En, ThemeMode::Light)
            );
        });
    }

    #[test]
    fn only_the_latest_generation_is_applied() {
        with_temp_root("session-generations", |root| {
            let image = write_fixture_image(root, "palm.jpg");
            let gated = Arc::new(GatedClassifier::new(khalas()));
            let mut session = session_with(gated.clone(), "http://classifier.test");

            session.submit(SessionEvent::ImageChosen(image.clone()));
            session.submit(SessionEvent::Reset);
            session.submit(SessionEvent::ImageChosen(image));
            assert_eq!(session.machine().generation(), 2);

            gated.open();
            assert!(session.pump_blocking(WAIT));
            assert!(session.pump_blocking(WAIT));
            assert_eq!(session.state().phase, Phase::Resolved);
            assert_eq!(session.state().outcome, Some(khalas()));
            assert!(!session.pump_blocking(Duration::from_millis(50)));
        });
    }

    #[test]
    fn second_image_while_analyzing_raises_notice() {
        with_temp_root("session-busy", |root| {
            let first = write_fixture_image(root, "first.jpg");
            let second = write_fixture_image(root, "second.jpg");
            let gated = Arc::new(GatedClassifier::new(khalas()));
            let mut session = session_with(gated.clone(), "http://classifier.test");

            session.submit(SessionEvent::ImageChosen(first.clone()));
            session.submit(SessionEvent::ImageChosen(second));

            assert_eq!(session.state().phase, Phase::Analyzing);
            assert_eq!(session.state().notice, Some(Notice::AnalysisInProgress));
            assert_eq!(session.state().image_path.as_deref(), Some(first.as_path()));
            gated.open();
            assert!(session.pump_blocking(WAIT));
        });
    }

    #[test]
    fn missing_image_raises_notice_and_stays_idle() {
        with_temp_root("session-missing", |root| {
            let missing = root.join("gone.jpg");
            let mut session =
                session_with(Arc::new(FixedClassifier(khalas())), "http://classifier.test");
            let seen = recorder(&mut session);

            session.submit(SessionEvent::ImageChosen(missing.clone()));

            assert_eq!(session.state().phase, Phase::Idle);
            assert_eq!(session.state().notice, Some(Notice::ImageUnavailable(missing)));
            assert_eq!(seen.borrow().len(), 1);
            assert_eq!(session.pump(), 0);
        });
    }

    #[test]
    fn locale_toggle_notifies_without_touching_outcome() {
        with_temp_root("session-locale", |root| {
            let image = write_fixture_image(root, "palm.jpg");
            let mut session =
                session_with(Arc::new(FixedClassifier(khalas())), "http://classifier.test");
            session.submit(SessionEvent::ImageChosen(image));
            assert!(session.pump_blocking(WAIT));
            let seen = recorder(&mut session);

            session.submit(SessionEvent::ToggleLocale);

            assert_eq!(seen.borrow().len(), 1);
            let state = &seen.borrow()[0];
            assert_eq!(state.locale, Locale::Ar);
            assert_eq!(state.phase, Phase::Resolved);
            assert_eq!(state.outcome, Some(khalas()));
        });
    }

    #[test]
    fn unchanged_state_does_not_notify() {
        let mut session =
            session_with(Arc::new(FixedClassifier(khalas())), "http://classifier.test");
        let seen = recorder(&mut session);

        session.submit(SessionEvent::Reset);
        session.submit(SessionEvent::DismissNotice);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn http_round_trip_resolves_with_server_prediction() {
        with_temp_root("session-http", |root| {
            let image = write_fixture_image(root, "palm.jpg");
            let server = LoopbackServer::serve_once(CannedResponse::json(
                r#"{"class_id": 0, "confidence": 0.97, "prediction": "Khalas"}"#,
            ));
            let classifier = HttpClassifier::new().expect("client builds");
            let mut session = session_with(Arc::new(classifier), &server.url);

            session.submit(SessionEvent::ImageChosen(image));
            assert!(session.pump_blocking(Duration::from_secs(20)));

            assert!(session
                .state()
                .outcome
                .as_ref()
                .is_some_and(PredictionOutcome::is_success));
            assert_eq!(
                session.state().outcome,
                Some(PredictionOutcome::Success(Prediction {
                    class_index: Some(0),
                    confidence: 0.97,
                    label: Some("Khalas".to_string()),
                }))
            );
            let request = String::from_utf8_lossy(&server.received_request()).into_owned();
            assert!(request.starts_with("POST /predict"), "{request}");
        });
    }

    #[test]
    fn timeout_resolves_once_with_failure() {
        with_temp_root("session-timeout", |root| {
            let image = write_fixture_image(root, "palm.jpg");
            let server =
                LoopbackServer::serve_once(CannedResponse::Silent(Duration::from_secs(2)));
            let classifier =
                HttpClassifier::with_timeout(Duration::from_millis(300)).expect("client builds");
            let mut session = session_with(Arc::new(classifier), &server.url);

            session.submit(SessionEvent::ImageChosen(image));
            assert!(session.pump_blocking(WAIT));

            assert_eq!(session.state().phase, Phase::Resolved);
            match &session.state().outcome {
                Some(PredictionOutcome::Failure(err)) => assert!(err.is_timeout(), "{err:?}"),
                other => panic!("expected timeout failure, got {other:?}"),
            }
            assert!(!session.pump_blocking(Duration::from_millis(100)));
            let _ = server.received_request();
        });
    }

    #[test]
    fn unreachable_server_resolves_with_connection_failure() {
        with_temp_root("session-unreachable", |root| {
            let image = write_fixture_image(root, "palm.jpg");
            let classifier = HttpClassifier::new().expect("client builds");
            let mut session = session_with(Arc::new(classifier), &unreachable_url());

            session.submit(SessionEvent::ImageChosen(image));
            assert!(session.pump_blocking(Duration::from_secs(20)));

            assert!(matches!(
                session.state().outcome,
                Some(PredictionOutcome::Failure(PredictionError::Connection { .. }))
            ));
        });
    }
}
