//! Coalescing rapid input events (search-box typing)

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawn a task that applies only the last value of each burst.
///
/// A value is applied once `quiet` has passed without a newer one. Dropping
/// every sender flushes the pending value and ends the task.
pub fn spawn_debouncer<T, F>(
    quiet: Duration,
    mut apply: F,
) -> (mpsc::UnboundedSender<T>, JoinHandle<()>)
where
    T: Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<T>();

    let handle = tokio::spawn(async move {
        while let Some(first) = rx.recv().await {
            let mut pending = Some(first);
            loop {
                tokio::select! {
                    next = rx.recv() => match next {
                        Some(value) => pending = Some(value),
                        None => {
                            if let Some(value) = pending.take() {
                                apply(value);
                            }
                            return;
                        }
                    },
                    _ = tokio::time::sleep(quiet) => {
                        if let Some(value) = pending.take() {
                            apply(value);
                        }
                        break;
                    }
                }
            }
        }
    });

    (tx, handle)
}
