use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
    Success,
}

/// One line of setup progress, as shown to the user.
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub message: String,
    pub level: StatusLevel,
}

/// Ordered, fire-and-forget progress stream consumed by the UI layer.
/// No backpressure; publishing never blocks orchestration.
pub trait StatusSink: Send + Sync {
    fn publish(&self, update: StatusUpdate);

    fn info(&self, message: &str) {
        self.publish(StatusUpdate {
            message: message.to_string(),
            level: StatusLevel::Info,
        });
    }

    fn warning(&self, message: &str) {
        self.publish(StatusUpdate {
            message: message.to_string(),
            level: StatusLevel::Warning,
        });
    }

    fn error(&self, message: &str) {
        self.publish(StatusUpdate {
            message: message.to_string(),
            level: StatusLevel::Error,
        });
    }

    fn success(&self, message: &str) {
        self.publish(StatusUpdate {
            message: message.to_string(),
            level: StatusLevel::Success,
        });
    }
}

/// Sink that forwards updates straight to the log, used by the CLI.
#[derive(Debug, Default)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn publish(&self, update: StatusUpdate) {
        match update.level {
            StatusLevel::Info => info!(" {}", update.message),
            StatusLevel::Warning => warn!("  {}", update.message),
            StatusLevel::Error => error!(" {}", update.message),
            StatusLevel::Success => info!(" {}", update.message),
        }
    }
}

/// Sink that forwards updates into a channel, for consumers that render
/// progress elsewhere (splash screen, UI bridge). Dropped receivers are
/// ignored.
#[derive(Debug)]
pub struct ChannelSink {
    sender: UnboundedSender<StatusUpdate>,
}

impl ChannelSink {
    pub fn new(sender: UnboundedSender<StatusUpdate>) -> Self {
        Self { sender }
    }
}

impl StatusSink for ChannelSink {
    fn publish(&self, update: StatusUpdate) {
        let _ = self.sender.send(update);
    }
}
