//! Fire-and-forget notification queue served by one worker thread.

use super::{Notice, NotificationBackend, NotifyError};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Hands notices to the worker without waiting for delivery.
pub struct Dispatcher {
    sender: Sender<Notice>,
    worker: JoinHandle<()>,
}

impl Dispatcher {
    /// Spawn the worker that owns `backend`.
    pub fn spawn<B: NotificationBackend>(backend: B) -> Result<Self, NotifyError> {
        let (sender, receiver) = channel();
        let worker = thread::Builder::new()
            .name("notify-worker".into())
            .spawn(move || run_worker(backend, receiver))
            .map_err(NotifyError::Spawn)?;

        Ok(Self { sender, worker })
    }

    /// Queue a notice. Never blocks on the backend.
    pub fn notify(&self, notice: Notice) -> Result<(), NotifyError> {
        debug!(message = %notice.message, "Dispatching notification");
        self.sender.send(notice).map_err(|_| NotifyError::WorkerGone)
    }

    /// Close the queue and wait for queued notices to finish.
    pub fn shutdown(self) {
        let Dispatcher { sender, worker } = self;
        drop(sender);
        if worker.join().is_err() {
            warn!("Notification worker panicked");
        }
    }
}

fn run_worker<B: NotificationBackend>(backend: B, receiver: Receiver<Notice>) {
    for notice in receiver {
        deliver(&backend, &notice);
    }
    debug!("Notification worker stopped");
}

/// Show one notice, containing errors and panics.
fn deliver<B: NotificationBackend>(backend: &B, notice: &Notice) {
    match panic::catch_unwind(AssertUnwindSafe(|| backend.show(notice))) {
        Ok(Ok(())) => debug!(title = %notice.title, "Notification shown"),
        Ok(Err(e)) => warn!("Notification error: {}", e),
        Err(_) => warn!("Notification backend panicked"),
    }
}
