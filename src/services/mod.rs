pub mod health;
pub mod orchestrator;
pub mod status;

pub use health::HttpHealth;
pub use orchestrator::{Orchestrator, ServiceStatus};
pub use status::{ChannelSink, LogSink, StatusLevel, StatusSink, StatusUpdate};
