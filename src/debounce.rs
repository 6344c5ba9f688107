use std::future::Future;
use std::time::Duration;

use async_channel::Receiver;

/// Trailing-edge debounce: waits until `delay` passes without a new event,
/// then runs `action` with the last event of the burst. A pending event is
/// flushed when the channel closes.
pub async fn debounce<T, F, Fut>(events: Receiver<T>, delay: Duration, mut action: F)
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut pending: Option<T> = None;

    loop {
        match pending.take() {
            None => match events.recv().await {
                Ok(event) => pending = Some(event),
                Err(_) => break,
            },
            Some(event) => {
                tokio::select! {
                    next = events.recv() => match next {
                        Ok(newer) => pending = Some(newer),
                        Err(_) => {
                            action(event).await;
                            break;
                        }
                    },
                    _ = tokio::time::sleep(delay) => action(event).await,
                }
            }
        }
    }
}
