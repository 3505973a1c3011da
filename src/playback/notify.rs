//! One-shot user notices raised by the session

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Sink for short, dismissable user-facing messages
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Forwards notices to the UI loop, which shows them as a toast
pub struct ToastNotifier {
    tx: UnboundedSender<String>,
}

impl ToastNotifier {
    pub fn new() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str) {
        if self.tx.send(message.to_string()).is_err() {
            tracing::debug!(message, "Notice dropped, UI receiver closed");
        }
    }
}
