use thiserror::Error;

/// Errors surfaced by the container engine seam.
///
/// `NotFound` and `Conflict` are the recoverable conditions: the
/// orchestrator converts them into normal control flow at the point of
/// detection. Everything else bubbles up unchanged.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("recurso não encontrado: {0}")]
    NotFound(String),

    #[error("conflito ao criar recurso: {0}")]
    Conflict(String),

    #[error("falha na comunicação com o motor de containers: {0}")]
    Transport(String),
}

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, EngineError::Conflict(_))
    }
}

/// Fatal setup failures, as presented to the caller of `setup`.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("motor de containers indisponível. {guidance}")]
    EngineUnavailable { guidance: String },

    #[error("falha ao criar a rede {network}: {source}")]
    Network {
        network: String,
        #[source]
        source: EngineError,
    },

    #[error("falha ao baixar a imagem {image}: {source}")]
    ImagePull {
        image: String,
        #[source]
        source: EngineError,
    },

    #[error("falha ao inspecionar {resource}: {source}")]
    Inspect {
        resource: String,
        #[source]
        source: EngineError,
    },

    #[error("falha ao gerenciar o container {container}: {source}")]
    Container {
        container: String,
        #[source]
        source: EngineError,
    },

    #[error(
        "serviço '{service}' não passou no healthcheck após {attempts} tentativa(s)\n--- últimos logs ---\n{logs}"
    )]
    HealthCheckTimeout {
        service: String,
        attempts: u32,
        logs: String,
    },
}
