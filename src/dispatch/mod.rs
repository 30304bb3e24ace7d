//! Runs predictions off the presentation thread.
//!
//! Each ticket gets its own worker thread. Outcomes come back over a channel
//! that the presentation thread drains on its own schedule, so session state
//! is only ever touched from one thread.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use crate::predict::{Classifier, PredictionError, PredictionOutcome, PredictionRequest};
use crate::state::PredictionTicket;

/// How often the presentation thread polls for finished predictions.
pub const DELIVERY_POLL_INTERVAL: Duration = Duration::from_millis(24);

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub generation: u64,
    pub outcome: PredictionOutcome,
}

pub struct PredictionDispatcher {
    classifier: Arc<dyn Classifier>,
    sender: Sender<Delivery>,
    receiver: Receiver<Delivery>,
}

impl PredictionDispatcher {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            classifier,
            sender,
            receiver,
        }
    }

    /// Start `ticket` on a worker thread. Exactly one [`Delivery`] per ticket
    /// reaches the channel, even when the thread cannot be started.
    pub fn dispatch(&self, ticket: PredictionTicket) {
        let PredictionTicket {
            generation,
            request,
        } = ticket;
        tracing::info!(
            generation,
            path = %request.image_path.display(),
            endpoint = %request.endpoint(),
            "dispatching prediction"
        );

        let classifier = Arc::clone(&self.classifier);
        let sender = self.sender.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("palm-predict-{generation}"))
            .spawn(move || {
                let outcome = run_prediction(classifier.as_ref(), &request);
                if sender.send(Delivery { generation, outcome }).is_err() {
                    tracing::debug!(generation, "delivery channel closed; dropping outcome");
                }
            });

        if let Err(err) = spawned {
            tracing::error!(generation, ?err, "failed to spawn prediction worker");
            let outcome = PredictionOutcome::Failure(PredictionError::Transport {
                message: format!("failed to start prediction worker: {err}"),
            });
            if self.sender.send(Delivery { generation, outcome }).is_err() {
                tracing::debug!(generation, "delivery channel closed; dropping outcome");
            }
        }
    }

    /// Every delivery that has arrived so far, oldest first.
    pub fn drain(&self) -> Vec<Delivery> {
        self.receiver.try_iter().collect()
    }

    /// Block up to `timeout` for the next delivery.
    pub fn wait_next(&self, timeout: Duration) -> Option<Delivery> {
        match self.receiver.recv_timeout(timeout) {
            Ok(delivery) => Some(delivery),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl std::fmt::Debug for PredictionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionDispatcher").finish_non_exhaustive()
    }
}

fn run_prediction(classifier: &dyn Classifier, request: &PredictionRequest) -> PredictionOutcome {
    panic::catch_unwind(AssertUnwindSafe(|| classifier.predict(request))).unwrap_or_else(|_| {
        tracing::error!(path = %request.image_path.display(), "prediction worker panicked");
        PredictionOutcome::Failure(PredictionError::Transport {
            message: "prediction worker panicked".to_string(),
        })
    })
}
