//! User-facing notices.
//!
//! The cart reports failures through a [`Notifier`] and never waits on it. What
//! the notifier does with the message (toast, log line, UI event) is up to the host.

use std::fmt;

use tokio::sync::mpsc;
use tracing::warn;

use crate::error::CartError;

/// The cart operation a notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add"),
            Operation::Remove => write!(f, "remove"),
            Operation::Update => write!(f, "update"),
        }
    }
}

/// Fixed catalog of messages shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    OutOfStock,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::OutOfStock => "Quantidade solicitada fora de estoque",
            Notice::AddFailed => "Erro na adição do produto",
            Notice::RemoveFailed => "Erro na remoção do produto",
            Notice::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }

    /// Notice shown when `operation` fails with `error`.
    ///
    /// Stock shortfalls get their own message; everything else is reported as a
    /// generic failure of the operation.
    pub fn for_failure(operation: Operation, error: &CartError) -> Self {
        match (operation, error) {
            (_, CartError::StockInsufficient { .. }) => Notice::OutOfStock,
            (Operation::Add, _) => Notice::AddFailed,
            (Operation::Remove, _) => Notice::RemoveFailed,
            (Operation::Update, _) => Notice::UpdateFailed,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// One-way sink for notices. Must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Emits notices as `warn!` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(notice = ?notice, "{}", notice.message());
    }
}

/// Forwards notices to a UI over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        // nobody listening is fine
        let _ = self.sender.send(notice);
    }
}
