//! Toast notifications backed by a `tokio::sync::broadcast` channel.
//!
//! [`ToastService`] is shared via `Arc<ToastService>` with every component
//! that raises messages. Besides broadcasting, it keeps the toasts that are
//! still on screen in a bounded queue; each one expires after
//! [`ToastConfig::ttl`].

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

// ---------------------------------------------------------------------------
// Toast
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
            ToastKind::Warning => "warning",
        }
    }
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: uuid::Uuid,
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Fire-and-forget message sink used by page controllers.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, text: &str);
    fn notify_error(&self, text: &str);
}

// ---------------------------------------------------------------------------
// ToastService
// ---------------------------------------------------------------------------

/// Default lifetime of an active toast.
pub const DEFAULT_TTL: Duration = Duration::from_millis(3000);

/// Default number of toasts kept on screen at once.
pub const DEFAULT_CAPACITY: usize = 8;

/// Broadcast buffer; slow subscribers observe `RecvError::Lagged` past this.
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastConfig {
    pub ttl: Duration,
    pub capacity: usize,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

struct ActiveToast {
    toast: Toast,
    expires_at: Instant,
}

pub struct ToastService {
    sender: broadcast::Sender<Toast>,
    active: Mutex<VecDeque<ActiveToast>>,
    config: ToastConfig,
}

impl ToastService {
    pub fn new(config: ToastConfig) -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            sender,
            active: Mutex::new(VecDeque::with_capacity(config.capacity)),
            config,
        }
    }

    pub fn config(&self) -> ToastConfig {
        self.config
    }

    /// Publish a toast and add it to the active queue.
    ///
    /// When the queue is full the oldest active toast is evicted. A toast
    /// with no subscribers is still queued.
    pub fn show(&self, kind: ToastKind, message: impl Into<String>) -> Toast {
        let toast = Toast::new(kind, message);
        {
            let mut active = self.lock_active();
            while self.config.capacity > 0 && active.len() >= self.config.capacity {
                active.pop_front();
            }
            if self.config.capacity > 0 {
                active.push_back(ActiveToast {
                    toast: toast.clone(),
                    expires_at: Instant::now() + self.config.ttl,
                });
            }
        }
        // SendError only means there are zero receivers.
        let _ = self.sender.send(toast.clone());
        toast
    }

    pub fn show_success(&self, message: impl Into<String>) -> Toast {
        self.show(ToastKind::Success, message)
    }

    pub fn show_error(&self, message: impl Into<String>) -> Toast {
        self.show(ToastKind::Error, message)
    }

    pub fn show_info(&self, message: impl Into<String>) -> Toast {
        self.show(ToastKind::Info, message)
    }

    pub fn show_warning(&self, message: impl Into<String>) -> Toast {
        self.show(ToastKind::Warning, message)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.sender.subscribe()
    }

    /// Toasts still on screen, oldest first. Expired entries are pruned.
    pub fn active(&self) -> Vec<Toast> {
        self.prune_expired();
        self.lock_active().iter().map(|a| a.toast.clone()).collect()
    }

    /// Remove a toast before it expires (user closed it).
    pub fn dismiss(&self, id: uuid::Uuid) -> bool {
        let mut active = self.lock_active();
        let before = active.len();
        active.retain(|a| a.toast.id != id);
        active.len() != before
    }

    /// Drop every expired toast and return how many were removed.
    pub fn prune_expired(&self) -> usize {
        let now = Instant::now();
        let mut active = self.lock_active();
        let before = active.len();
        active.retain(|a| a.expires_at > now);
        before - active.len()
    }

    /// Periodically prune expired toasts until `cancel` fires.
    pub async fn run_reaper(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.reap_period());
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Toast reaper cancelled");
                    break;
                }
                _ = interval.tick() => {
                    let removed = self.prune_expired();
                    if removed > 0 {
                        tracing::debug!(removed, "Expired toasts pruned");
                    }
                }
            }
        }
    }

    fn reap_period(&self) -> Duration {
        (self.config.ttl / 4).max(Duration::from_millis(50))
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, VecDeque<ActiveToast>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new(ToastConfig::default())
    }
}

impl Notifier for ToastService {
    fn notify_success(&self, text: &str) {
        self.show_success(text);
    }

    fn notify_error(&self, text: &str) {
        self.show_error(text);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
