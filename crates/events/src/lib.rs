//! Toast notifications for the student tracker.
//!
//! - [`ToastService`]: broadcasts every toast to subscribers and keeps a
//!   bounded queue of active toasts that expire after a fixed delay.
//! - [`Notifier`]: the narrow interface page controllers raise messages
//!   through.
//! - [`ToastListener`]: consumer loop that renders broadcast toasts.

pub mod listener;
pub mod toast;

pub use listener::ToastListener;
pub use toast::{Notifier, Toast, ToastConfig, ToastKind, ToastService};
