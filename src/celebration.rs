use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use crate::state::Event;

/// One-shot "hide celebration" task. Rescheduling, cancelling or dropping
/// the timer aborts whatever is still pending.
pub struct CelebrationTimer {
    delay: Duration,
    events: UnboundedSender<Event>,
    pending: Option<JoinHandle<()>>,
}

impl CelebrationTimer {
    pub fn new(delay: Duration, events: UnboundedSender<Event>) -> Self {
        Self {
            delay,
            events,
            pending: None,
        }
    }

    pub fn schedule(&mut self) {
        self.cancel();

        let delay = self.delay;
        let events = self.events.clone();
        debug!(?delay, "scheduling celebration hide");
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            // Receiver gone means the controller already shut down
            let _ = events.send(Event::CelebrationExpired);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("cancelling pending celebration hide");
            }
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CelebrationTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
