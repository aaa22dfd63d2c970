use super::{ContainerSpec, ContainerState, ServiceDefinition};
use crate::errors::EngineError;
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait for container engine control-plane operations.
///
/// Every call re-queries the engine; no container state is cached on
/// this side of the seam.
#[async_trait]
pub trait ContainerEngine: Send + Sync + Debug {
    /// Check that the engine control socket answers.
    async fn ping(&self) -> Result<(), EngineError>;

    /// Human-readable description of the engine behind the handle.
    fn describe(&self) -> String;

    /// Create a bridge network. Returns `Conflict` if it already exists.
    async fn create_network(&self, name: &str) -> Result<(), EngineError>;

    /// Remove a network.
    async fn remove_network(&self, name: &str) -> Result<(), EngineError>;

    /// Whether the image is available locally.
    async fn image_present(&self, image: &str) -> Result<bool, EngineError>;

    /// Pull an image, forwarding each progress status line.
    async fn pull_image(
        &self,
        image: &str,
        on_progress: &mut (dyn FnMut(String) + Send),
    ) -> Result<(), EngineError>;

    /// Current state of a named container.
    async fn container_state(&self, name: &str) -> Result<ContainerState, EngineError>;

    /// Create a new container from a spec.
    async fn create_container(&self, spec: &ContainerSpec<'_>) -> Result<(), EngineError>;

    /// Start a container.
    async fn start_container(&self, name: &str) -> Result<(), EngineError>;

    /// Stop a container.
    async fn stop_container(&self, name: &str) -> Result<(), EngineError>;

    /// Forcibly remove a container.
    async fn remove_container(&self, name: &str) -> Result<(), EngineError>;

    /// Last `tail` lines of a container's output, for diagnostics.
    async fn container_logs(&self, name: &str, tail: usize) -> Result<String, EngineError>;
}

/// Trait for service readiness probes against the host-side port.
///
/// A probe never fails: timeouts, transport errors and malformed bodies
/// all read as "not healthy".
#[async_trait]
pub trait ServiceHealth: Send + Sync + Debug {
    async fn probe(&self, definition: &ServiceDefinition) -> bool;
}
