pub mod config;
pub mod docker_adapter;
pub mod endpoint;
pub mod ledger;

pub use config::{LauncherConfig, RetryPolicy, default_config_dir};
pub use docker_adapter::DockerEngine;
pub use ledger::PullLedger;
