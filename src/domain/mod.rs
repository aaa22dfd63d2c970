mod container;
mod service;
pub mod traits;

pub use container::{ContainerSpec, ContainerState};
pub use service::{
    AUTOMATION_KEY, BACKEND_KEY, HealthProbe, MODELS_KEY, NETWORK_NAME, SANDBOX_KEY,
    ServiceDefinition, registry,
};
pub use traits::{ContainerEngine, ServiceHealth};
