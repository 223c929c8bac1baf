//! Consumer loop for broadcast toasts.
//!
//! [`ToastListener::run`] drains a [`ToastService`](crate::ToastService)
//! subscription and hands every toast to a renderer. It runs as a
//! background task and stops once the service is dropped.

use tokio::sync::broadcast;

use crate::toast::Toast;

pub struct ToastListener;

impl ToastListener {
    /// Render toasts until the channel closes. Returns how many were rendered.
    pub async fn run<F>(mut receiver: broadcast::Receiver<Toast>, mut render: F) -> usize
    where
        F: FnMut(&Toast),
    {
        let mut rendered = 0;
        loop {
            match receiver.recv().await {
                Ok(toast) => {
                    render(&toast);
                    rendered += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Toast listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::debug!("Toast channel closed, listener shutting down");
                    break;
                }
            }
        }
        rendered
    }
}
