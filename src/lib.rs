pub mod cli;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
// In a real production crate, we might use a feature flag "test-utils"
pub mod test_support;

pub use domain::{
    ContainerEngine, ContainerSpec, ContainerState, ServiceDefinition, ServiceHealth,
};
pub use errors::{EngineError, SetupError};
pub use infra::{DockerEngine, LauncherConfig};
pub use services::{HttpHealth, LogSink, Orchestrator, StatusSink};
