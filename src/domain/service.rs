use std::path::{Path, PathBuf};

use super::ContainerSpec;

/// Shared bridge network every managed container joins.
pub const NETWORK_NAME: &str = "orquestra_net";

pub const BACKEND_KEY: &str = "backend";
pub const AUTOMATION_KEY: &str = "automation";
pub const SANDBOX_KEY: &str = "sandbox";
pub const MODELS_KEY: &str = "models";

/// How a service proves it is ready beyond "process started".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthProbe {
    /// HTTP 200 and a JSON body whose `status` field is one of the
    /// accepted values.
    JsonStatus {
        path: &'static str,
        accepted: &'static [&'static str],
    },
    /// HTTP 200 is enough; the body is ignored.
    StatusOnly { path: &'static str },
}

impl HealthProbe {
    pub fn path(&self) -> &'static str {
        match self {
            HealthProbe::JsonStatus { path, .. } => path,
            HealthProbe::StatusOnly { path } => path,
        }
    }
}

/// Static description of one managed service. Built once when the
/// orchestrator is constructed and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ServiceDefinition {
    pub key: &'static str,
    pub container_name: &'static str,
    pub image: String,
    pub host_port: u16,
    pub internal_port: u16,
    /// Ordered (host path, container path) pairs.
    pub volumes: Vec<(PathBuf, String)>,
    pub env: Vec<String>,
    pub probe: HealthProbe,
}

impl ServiceDefinition {
    pub fn to_spec<'a>(&'a self, network: &'a str) -> ContainerSpec<'a> {
        ContainerSpec {
            name: self.container_name,
            image: &self.image,
            host_port: self.host_port,
            internal_port: self.internal_port,
            binds: self
                .volumes
                .iter()
                .map(|(host, container)| format!("{}:{}", host.display(), container))
                .collect(),
            env: &self.env,
            network,
        }
    }
}

/// Full service registry. Lean mode only changes the backend image tag
/// here; the active subset is decided by the orchestrator.
pub fn registry(data_root: &Path, lean_mode: bool) -> Vec<ServiceDefinition> {
    let backend_image = if lean_mode {
        "orquestra/backend:lean"
    } else {
        "orquestra/backend:latest"
    };

    vec![
        ServiceDefinition {
            key: BACKEND_KEY,
            container_name: "orquestra_backend",
            image: backend_image.to_string(),
            host_port: 5001,
            internal_port: 5000,
            volumes: vec![(data_root.to_path_buf(), "/root/.orquestra".to_string())],
            env: vec![
                "PYTHONUNBUFFERED=1".to_string(),
                "MODELS_BASE_URL=http://orquestra_models:11434".to_string(),
            ],
            probe: HealthProbe::JsonStatus {
                path: "/health",
                accepted: &["healthy", "ok"],
            },
        },
        ServiceDefinition {
            key: AUTOMATION_KEY,
            container_name: "orquestra_automation",
            image: "n8nio/n8n".to_string(),
            host_port: 5678,
            internal_port: 5678,
            volumes: vec![(
                data_root.join(AUTOMATION_KEY),
                "/home/node/.n8n".to_string(),
            )],
            env: Vec::new(),
            // O engine de automação só expõe /healthz com corpo vazio
            probe: HealthProbe::StatusOnly { path: "/healthz" },
        },
        ServiceDefinition {
            key: SANDBOX_KEY,
            container_name: "orquestra_sandbox",
            image: "orquestra/sandbox:latest".to_string(),
            host_port: 8000,
            internal_port: 8000,
            volumes: vec![(data_root.join(SANDBOX_KEY), "/app/data".to_string())],
            env: Vec::new(),
            probe: HealthProbe::JsonStatus {
                path: "/health",
                accepted: &["healthy"],
            },
        },
        ServiceDefinition {
            key: MODELS_KEY,
            container_name: "orquestra_models",
            image: "ollama/ollama".to_string(),
            host_port: 11434,
            internal_port: 11434,
            volumes: vec![(data_root.join(MODELS_KEY), "/root/.ollama".to_string())],
            env: Vec::new(),
            probe: HealthProbe::StatusOnly { path: "/api/tags" },
        },
    ]
}
