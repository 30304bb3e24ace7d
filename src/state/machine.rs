use std::path::PathBuf;

use crate::i18n::Locale;
use crate::predict::{PredictionOutcome, PredictionRequest};
use crate::theme::ThemeMode;

use super::error::{StateError, StateResult};
use super::event::{EventKind, PredictionTicket, SessionEvent, StateTransition};
use super::model::{Phase, SessionState};

/// Owns the session state. Every mutation goes through [`StateMachine::handle`].
#[derive(Debug)]
pub struct StateMachine {
    state: SessionState,
    server_url: String,
    generation: u64,
    #[cfg(test)]
    transition_history: Vec<StateTransition>,
}

impl StateMachine {
    pub fn new(server_url: impl Into<String>, locale: Locale, theme: ThemeMode) -> Self {
        Self {
            state: SessionState::new(locale, theme),
            server_url: server_url.into(),
            generation: 0,
            #[cfg(test)]
            transition_history: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Generation of the most recently started prediction; 0 before the first.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn accepts_image(&self) -> bool {
        matches!(self.state.phase, Phase::Idle | Phase::Resolved)
    }

    /// Apply `event`. Returns a ticket when the event started a prediction;
    /// a rejected event leaves the state untouched.
    pub fn handle(&mut self, event: SessionEvent) -> StateResult<Option<PredictionTicket>> {
        tracing::debug!(phase = ?self.state.phase, event = ?event.kind(), "handle session event");
        match event {
            SessionEvent::ImageChosen(path) => self.choose_image(path).map(Some),
            SessionEvent::OutcomeDelivered {
                generation,
                outcome,
            } => {
                self.resolve(generation, outcome);
                Ok(None)
            }
            SessionEvent::Reset => {
                self.reset();
                Ok(None)
            }
            SessionEvent::ToggleLocale => {
                self.state.locale = self.state.locale.toggled();
                Ok(None)
            }
            SessionEvent::ToggleTheme => {
                self.state.theme = self.state.theme.toggled();
                Ok(None)
            }
            SessionEvent::NoticeRaised(notice) => {
                self.state.notice = Some(notice);
                Ok(None)
            }
            SessionEvent::DismissNotice => {
                self.state.notice = None;
                Ok(None)
            }
        }
    }

    fn choose_image(&mut self, path: PathBuf) -> StateResult<PredictionTicket> {
        if !self.accepts_image() {
            tracing::warn!(
                phase = ?self.state.phase,
                generation = self.generation,
                "image chosen while a prediction is running"
            );
            return Err(StateError::PredictionInFlight {
                generation: self.generation,
            });
        }
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "chosen image does not exist");
            return Err(StateError::ImageUnavailable { path });
        }

        self.state.image_path = Some(path.clone());
        self.state.outcome = None;
        self.state.notice = None;
        self.enter(Phase::ImageSelected, EventKind::ImageChosen);

        self.generation += 1;
        self.enter(Phase::Analyzing, EventKind::AnalysisStarted);

        Ok(PredictionTicket {
            generation: self.generation,
            request: PredictionRequest::new(path, self.server_url.clone()),
        })
    }

    fn resolve(&mut self, generation: u64, outcome: PredictionOutcome) {
        if self.state.phase != Phase::Analyzing || generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                phase = ?self.state.phase,
                "discarding stale prediction outcome"
            );
            return;
        }

        if let PredictionOutcome::Failure(err) = &outcome {
            tracing::warn!(generation, %err, "prediction failed");
        } else {
            tracing::info!(generation, "prediction resolved");
        }
        self.state.outcome = Some(outcome);
        self.enter(Phase::Resolved, EventKind::OutcomeDelivered);
    }

    fn reset(&mut self) {
        if self.state.phase == Phase::Idle {
            return;
        }
        self.state.image_path = None;
        self.state.outcome = None;
        self.state.notice = None;
        self.enter(Phase::Idle, EventKind::Reset);
    }

    fn enter(&mut self, next: Phase, event: EventKind) {
        let record = StateTransition::new(self.state.phase, event, next);
        tracing::debug!(
            from = ?record.from,
            event = ?record.event,
            to = ?record.to,
            "phase transition"
        );
        self.state.phase = next;
        #[cfg(test)]
        self.transition_history.push(record);
    }
}

#[cfg(test)]
impl StateMachine {
    fn history(&self) -> &[StateTransition] {
        &self.transition_history
    }
}
