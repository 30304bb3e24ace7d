use std::path::PathBuf;

use crate::predict::{PredictionOutcome, PredictionRequest};

use super::model::{Notice, Phase};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    ImageChosen(PathBuf),
    OutcomeDelivered {
        generation: u64,
        outcome: PredictionOutcome,
    },
    Reset,
    ToggleLocale,
    ToggleTheme,
    NoticeRaised(Notice),
    DismissNotice,
}

impl SessionEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ImageChosen(_) => EventKind::ImageChosen,
            Self::OutcomeDelivered { .. } => EventKind::OutcomeDelivered,
            Self::Reset => EventKind::Reset,
            Self::ToggleLocale => EventKind::ToggleLocale,
            Self::ToggleTheme => EventKind::ToggleTheme,
            Self::NoticeRaised(_) => EventKind::NoticeRaised,
            Self::DismissNotice => EventKind::DismissNotice,
        }
    }
}

/// Payload-free event tag used in logs and transition history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ImageChosen,
    AnalysisStarted,
    OutcomeDelivered,
    Reset,
    ToggleLocale,
    ToggleTheme,
    NoticeRaised,
    DismissNotice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: Phase,
    pub event: EventKind,
    pub to: Phase,
}

impl StateTransition {
    pub fn new(from: Phase, event: EventKind, to: Phase) -> Self {
        Self { from, event, to }
    }
}

/// A prediction the session wants run, tagged with the generation that
/// started it. Only the outcome for the current generation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionTicket {
    pub generation: u64,
    pub request: PredictionRequest,
}
