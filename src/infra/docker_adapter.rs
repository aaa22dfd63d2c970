use crate::domain::{ContainerEngine, ContainerSpec, ContainerState};
use crate::errors::EngineError;
use crate::infra::endpoint::candidate_sockets;
use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, InspectContainerOptions, LogsOptions, RemoveContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use bollard::image::CreateImageOptions;
use bollard::models::{HostConfig, PortBinding};
use bollard::network::CreateNetworkOptions;
use bollard::{API_DEFAULT_VERSION, Docker};
use futures::StreamExt;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info, warn};

const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Engine adapter over the Docker/Podman control socket.
///
/// The handle is replaced, never mutated, when endpoint discovery finds
/// a different working socket; every operation reads the current handle
/// through [`DockerEngine::handle`].
#[derive(Debug)]
pub struct DockerEngine {
    client: RwLock<Docker>,
    endpoint: RwLock<PathBuf>,
    candidates: Vec<PathBuf>,
}

impl DockerEngine {
    pub fn new() -> Result<Self, EngineError> {
        Self::with_candidates(candidate_sockets())
    }

    /// Injectable candidate list, first existing socket wins. Discovery
    /// proper (existence + ping) only happens on the first failed ping.
    pub fn with_candidates(candidates: Vec<PathBuf>) -> Result<Self, EngineError> {
        let endpoint = candidates
            .iter()
            .find(|path| path.exists())
            .cloned()
            .unwrap_or_else(|| PathBuf::from("/var/run/docker.sock"));

        let client = connect(&endpoint)?;
        Ok(Self {
            client: RwLock::new(client),
            endpoint: RwLock::new(endpoint),
            candidates,
        })
    }

    fn handle(&self) -> Docker {
        self.client.read().expect("client lock poisoned").clone()
    }

    fn current_endpoint(&self) -> PathBuf {
        self.endpoint.read().expect("endpoint lock poisoned").clone()
    }

    /// Walks the candidate list and keeps the first endpoint that
    /// answers a ping.
    async fn rediscover(&self) -> Result<(), EngineError> {
        for candidate in &self.candidates {
            if !candidate.exists() {
                debug!("socket inexistente: {:?}", candidate);
                continue;
            }

            let client = match connect(candidate) {
                Ok(client) => client,
                Err(err) => {
                    debug!("falha ao conectar em {:?}: {err}", candidate);
                    continue;
                }
            };

            if client.ping().await.is_ok() {
                info!(" Usando socket de controle {:?}", candidate);
                *self.client.write().expect("client lock poisoned") = client;
                *self.endpoint.write().expect("endpoint lock poisoned") = candidate.clone();
                return Ok(());
            }
        }

        Err(EngineError::Transport(
            "nenhum socket de controle respondeu".to_string(),
        ))
    }
}

#[async_trait]
impl ContainerEngine for DockerEngine {
    async fn ping(&self) -> Result<(), EngineError> {
        if self.handle().ping().await.is_ok() {
            return Ok(());
        }

        warn!("  Socket atual não respondeu, procurando outro endpoint...");
        self.rediscover().await?;
        self.handle().ping().await.map(|_| ()).map_err(map_err)
    }

    fn describe(&self) -> String {
        let endpoint = self.current_endpoint();
        let engine = if endpoint.to_string_lossy().contains("podman") {
            "Podman"
        } else {
            "Docker"
        };
        format!("{engine} ({})", endpoint.display())
    }

    async fn create_network(&self, name: &str) -> Result<(), EngineError> {
        self.handle()
            .create_network(CreateNetworkOptions {
                name,
                driver: "bridge",
                ..Default::default()
            })
            .await
            .map(|_| ())
            .map_err(map_err)
    }

    async fn remove_network(&self, name: &str) -> Result<(), EngineError> {
        self.handle().remove_network(name).await.map_err(map_err)
    }

    async fn image_present(&self, image: &str) -> Result<bool, EngineError> {
        match self.handle().inspect_image(image).await {
            Ok(_) => Ok(true),
            Err(err) => match map_err(err) {
                EngineError::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn pull_image(
        &self,
        image: &str,
        on_progress: &mut (dyn FnMut(String) + Send),
    ) -> Result<(), EngineError> {
        let options = CreateImageOptions {
            from_image: image,
            ..Default::default()
        };

        let mut stream = self.handle().create_image(Some(options), None, None);
        while let Some(item) = stream.next().await {
            match item {
                Ok(progress) => {
                    if let Some(error) = progress.error {
                        return Err(EngineError::Transport(error));
                    }
                    if let Some(status) = progress.status {
                        on_progress(status);
                    }
                }
                // Linha malformada no stream de progresso é descartada
                Err(bollard::errors::Error::JsonDataError { .. }) => continue,
                Err(err) => return Err(map_err(err)),
            }
        }

        Ok(())
    }

    async fn container_state(&self, name: &str) -> Result<ContainerState, EngineError> {
        match self
            .handle()
            .inspect_container(name, None::<InspectContainerOptions>)
            .await
        {
            Ok(details) => {
                let running = details
                    .state
                    .and_then(|state| state.running)
                    .unwrap_or(false);
                Ok(if running {
                    ContainerState::Running
                } else {
                    ContainerState::Stopped
                })
            }
            Err(err) => match map_err(err) {
                EngineError::NotFound(_) => Ok(ContainerState::NotCreated),
                other => Err(other),
            },
        }
    }

    async fn create_container(&self, spec: &ContainerSpec<'_>) -> Result<(), EngineError> {
        let internal = format!("{}/tcp", spec.internal_port);

        let mut exposed_ports = HashMap::new();
        exposed_ports.insert(internal.clone(), HashMap::new());

        let mut port_bindings = HashMap::new();
        port_bindings.insert(
            internal,
            Some(vec![PortBinding {
                host_ip: None,
                host_port: Some(spec.host_port.to_string()),
            }]),
        );

        let config = Config {
            image: Some(spec.image.to_string()),
            env: Some(spec.env.to_vec()),
            exposed_ports: Some(exposed_ports),
            host_config: Some(HostConfig {
                port_bindings: Some(port_bindings),
                binds: Some(spec.binds.clone()),
                network_mode: Some(spec.network.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        self.handle()
            .create_container(
                Some(CreateContainerOptions {
                    name: spec.name,
                    platform: None,
                }),
                config,
            )
            .await
            .map(|_| ())
            .map_err(map_err)
    }

    async fn start_container(&self, name: &str) -> Result<(), EngineError> {
        self.handle()
            .start_container(name, None::<StartContainerOptions<String>>)
            .await
            .map_err(map_err)
    }

    async fn stop_container(&self, name: &str) -> Result<(), EngineError> {
        self.handle()
            .stop_container(name, Some(StopContainerOptions { t: 10 }))
            .await
            .map_err(map_err)
    }

    async fn remove_container(&self, name: &str) -> Result<(), EngineError> {
        self.handle()
            .remove_container(
                name,
                Some(RemoveContainerOptions {
                    force: true,
                    ..Default::default()
                }),
            )
            .await
            .map_err(map_err)
    }

    async fn container_logs(&self, name: &str, tail: usize) -> Result<String, EngineError> {
        let options = LogsOptions::<String> {
            stdout: true,
            stderr: true,
            tail: tail.to_string(),
            ..Default::default()
        };

        let mut stream = self.handle().logs(name, Some(options));
        let mut collected = String::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(chunk) => collected.push_str(&chunk.to_string()),
                Err(err) => return Err(map_err(err)),
            }
        }

        Ok(collected)
    }
}

fn connect(path: &Path) -> Result<Docker, EngineError> {
    Docker::connect_with_socket(
        &path.to_string_lossy(),
        CONNECT_TIMEOUT_SECS,
        API_DEFAULT_VERSION,
    )
    .map_err(map_err)
}

fn map_err(err: bollard::errors::Error) -> EngineError {
    match err {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message,
        } => EngineError::NotFound(message),
        bollard::errors::Error::DockerResponseServerError {
            status_code: 409,
            message,
        } => EngineError::Conflict(message),
        other => EngineError::Transport(other.to_string()),
    }
}
