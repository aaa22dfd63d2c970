use crate::domain::{
    ContainerEngine, ContainerState, MODELS_KEY, NETWORK_NAME, ServiceDefinition, ServiceHealth,
    registry,
};
use crate::errors::SetupError;
use crate::infra::config::{LauncherConfig, ensure_data_dirs};
use crate::infra::endpoint::install_guidance;
use crate::infra::ledger::PullLedger;
use crate::services::status::StatusSink;
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Lines of container output captured when a healthcheck times out.
const LOG_TAIL: usize = 50;

const LEDGER_FILE: &str = "pull_timestamps.json";

/// Snapshot of one service for the status listing. Always re-queried,
/// never cached.
#[derive(Debug, Clone)]
pub struct ServiceStatus {
    pub key: &'static str,
    pub container_name: &'static str,
    pub state: ContainerState,
    pub healthy: bool,
}

/// Drives the registry of backend services from unknown state to
/// confirmed healthy, with idempotent and safely repeatable steps.
pub struct Orchestrator {
    engine: Arc<dyn ContainerEngine>,
    health: Arc<dyn ServiceHealth>,
    config: LauncherConfig,
    registry: Vec<ServiceDefinition>,
    ledger: PullLedger,
}

impl Orchestrator {
    /// Builds the registry for the configured mode and prepares the
    /// per-service data directories. Switching lean mode means building
    /// a new orchestrator.
    pub fn new(
        engine: Arc<dyn ContainerEngine>,
        health: Arc<dyn ServiceHealth>,
        config: LauncherConfig,
    ) -> Result<Self> {
        let registry = registry(&config.data_root, config.lean_mode);
        ensure_data_dirs(&config.data_root, &registry)?;
        let ledger = PullLedger::new(config.data_root.join(LEDGER_FILE));

        Ok(Self {
            engine,
            health,
            config,
            registry,
            ledger,
        })
    }

    /// Active subset for the configured mode: the full registry, or only
    /// the core backend in lean mode.
    pub fn active_services(&self) -> Vec<&ServiceDefinition> {
        if self.config.lean_mode {
            self.registry
                .iter()
                .filter(|definition| definition.key == crate::domain::BACKEND_KEY)
                .collect()
        } else {
            self.registry.iter().collect()
        }
    }

    pub async fn is_engine_reachable(&self) -> bool {
        self.engine.ping().await.is_ok()
    }

    /// Brings every active service to confirmed healthy. Returns
    /// `Ok(true)` only when all of them pass their healthcheck; the
    /// first fatal error is published to the sink and returned.
    pub async fn setup(
        &self,
        sink: &dyn StatusSink,
        force_image_refresh: bool,
    ) -> Result<bool, SetupError> {
        if let Err(err) = self.engine.ping().await {
            debug!("ping falhou: {err}");
            return Err(self.fail(
                sink,
                SetupError::EngineUnavailable {
                    guidance: install_guidance(),
                },
            ));
        }
        sink.info(&format!("Usando {}", self.engine.describe()));

        sink.info(&format!("Garantindo a rede {NETWORK_NAME}..."));
        match self.engine.create_network(NETWORK_NAME).await {
            Ok(()) => info!(" Rede {NETWORK_NAME} criada"),
            // Rede já existente (inclusive por corrida) é sucesso
            Err(err) if err.is_conflict() => debug!("rede {NETWORK_NAME} já existia"),
            Err(source) => {
                return Err(self.fail(
                    sink,
                    SetupError::Network {
                        network: NETWORK_NAME.to_string(),
                        source,
                    },
                ));
            }
        }

        let active = self.active_services();
        if self.config.lean_mode {
            sink.info(&format!(
                "Modo lean: subindo apenas {} serviço(s) essencial(is)",
                active.len()
            ));
        } else {
            sink.info(&format!("Modo completo: subindo {} serviços", active.len()));
        }

        // O servidor de modelos é pesado; uma instância já ativa no host
        // tem prioridade sobre o container
        let mut skipped: HashSet<&str> = HashSet::new();
        if let Some(models) = active.iter().find(|d| d.key == MODELS_KEY) {
            if self.health.probe(models).await {
                sink.info("Servidor de modelos já ativo no host, pulando imagem e container");
                skipped.insert(models.key);
            }
        }

        for definition in active.iter().filter(|d| !skipped.contains(d.key)) {
            if let Err(err) = self
                .ensure_image(definition, sink, force_image_refresh)
                .await
            {
                return Err(self.fail(sink, err));
            }
        }

        // Sequencial de propósito: serviços posteriores assumem que a
        // rede e o backend já estão de pé
        for definition in active.iter().filter(|d| !skipped.contains(d.key)) {
            sink.info(&format!("Subindo serviço {}...", definition.key));
            if let Err(err) = self.ensure_running(definition, sink).await {
                return Err(self.fail(sink, err));
            }
        }

        sink.success("Todos os serviços ativos e saudáveis");
        Ok(true)
    }

    /// Brings one service to running-and-healthy. Safe to call again on
    /// an already healthy service: that is a no-op.
    pub async fn ensure_running(
        &self,
        definition: &ServiceDefinition,
        sink: &dyn StatusSink,
    ) -> Result<(), SetupError> {
        let name = definition.container_name;

        match self.engine.container_state(name).await {
            Ok(ContainerState::Running) => {
                if self.health.probe(definition).await {
                    info!(" {} já está rodando e saudável", definition.key);
                    return Ok(());
                }

                // Nunca deixar um container sabidamente ruim no ar
                sink.warning(&format!(
                    "{} está rodando mas não responde, recriando...",
                    definition.key
                ));
                if let Err(err) = self.engine.stop_container(name).await {
                    if !err.is_not_found() {
                        warn!("  Falha ao parar {name}: {err}");
                    }
                }
                self.remove_for_recreate(name).await?;
            }
            Ok(ContainerState::Stopped) => {
                info!(" {} existe mas está parado, recriando", definition.key);
                self.remove_for_recreate(name).await?;
            }
            Ok(ContainerState::NotCreated) => {
                debug!("{name} ainda não existe, criando");
            }
            Err(source) => {
                return Err(SetupError::Container {
                    container: name.to_string(),
                    source,
                });
            }
        }

        match self.engine.image_present(&definition.image).await {
            Ok(true) => {}
            Ok(false) => self.pull_with_progress(&definition.image, sink).await?,
            Err(source) => {
                return Err(SetupError::Inspect {
                    resource: definition.image.clone(),
                    source,
                });
            }
        }

        let spec = definition.to_spec(NETWORK_NAME);
        self.engine
            .create_container(&spec)
            .await
            .map_err(|source| SetupError::Container {
                container: name.to_string(),
                source,
            })?;
        self.engine
            .start_container(name)
            .await
            .map_err(|source| SetupError::Container {
                container: name.to_string(),
                source,
            })?;

        // Pausa para o processo subir antes do primeiro probe
        tokio::time::sleep(Duration::from_millis(self.config.settle_delay_ms)).await;

        let max_attempts = self.config.retry.max_attempts;
        for attempt in 1..=max_attempts {
            debug!("healthcheck {attempt}/{max_attempts} para {}", definition.key);
            if self.health.probe(definition).await {
                sink.info(&format!("Serviço {} saudável", definition.key));
                return Ok(());
            }
            if attempt < max_attempts {
                tokio::time::sleep(Duration::from_millis(self.config.retry.delay_ms)).await;
            }
        }

        let logs = self
            .engine
            .container_logs(name, LOG_TAIL)
            .await
            .unwrap_or_else(|err| format!("logs indisponíveis: {err}"));

        Err(SetupError::HealthCheckTimeout {
            service: definition.key.to_string(),
            attempts: max_attempts,
            logs,
        })
    }

    /// Stops and removes every known container plus the shared network,
    /// best-effort. Runs over the FULL registry so a lean-mode shutdown
    /// still cleans leftovers from a previous full-mode run. Never
    /// fails: shutdown must not block application exit.
    pub async fn stop(&self) {
        info!(" Encerrando todos os serviços...");

        for definition in &self.registry {
            let name = definition.container_name;

            if let Err(err) = self.engine.stop_container(name).await {
                if !err.is_not_found() {
                    debug!("falha ao parar {name}: {err}");
                }
            }
            if let Err(err) = self.engine.remove_container(name).await {
                if !err.is_not_found() {
                    debug!("falha ao remover {name}: {err}");
                }
            }
        }

        // Outros processos podem depender da rede; falha aqui é ignorada
        if let Err(err) = self.engine.remove_network(NETWORK_NAME).await {
            debug!("rede {NETWORK_NAME} mantida: {err}");
        }

        info!(" Serviços encerrados");
    }

    /// State plus readiness of every service in the full registry.
    pub async fn statuses(&self) -> Result<Vec<ServiceStatus>, SetupError> {
        let mut statuses = Vec::with_capacity(self.registry.len());

        for definition in &self.registry {
            let state = self
                .engine
                .container_state(definition.container_name)
                .await
                .map_err(|source| SetupError::Container {
                    container: definition.container_name.to_string(),
                    source,
                })?;
            // Probe independente do estado do container: o servidor de
            // modelos pode estar respondendo direto do host
            let healthy = self.health.probe(definition).await;

            statuses.push(ServiceStatus {
                key: definition.key,
                container_name: definition.container_name,
                state,
                healthy,
            });
        }

        Ok(statuses)
    }

    /// Active images whose last successful pull is older than the
    /// staleness threshold. Informational only.
    pub fn images_needing_refresh(&self) -> Vec<String> {
        self.active_services()
            .into_iter()
            .filter(|definition| self.ledger.is_stale(&definition.image))
            .map(|definition| definition.image.clone())
            .collect()
    }

    async fn ensure_image(
        &self,
        definition: &ServiceDefinition,
        sink: &dyn StatusSink,
        force_refresh: bool,
    ) -> Result<(), SetupError> {
        match self.engine.image_present(&definition.image).await {
            Ok(true) => {
                if force_refresh {
                    sink.info(&format!("Atualizando a imagem de {}...", definition.key));
                    self.pull_with_progress(&definition.image, sink).await
                } else {
                    sink.info(&format!("Usando imagem local de {}...", definition.key));
                    Ok(())
                }
            }
            Ok(false) => {
                sink.info(&format!("Baixando a imagem de {}...", definition.key));
                self.pull_with_progress(&definition.image, sink).await
            }
            Err(source) => Err(SetupError::Inspect {
                resource: definition.image.clone(),
                source,
            }),
        }
    }

    async fn pull_with_progress(
        &self,
        image: &str,
        sink: &dyn StatusSink,
    ) -> Result<(), SetupError> {
        // Linhas repetidas do stream de progresso são suprimidas para
        // não inundar o sink
        let mut last_status = String::new();
        self.engine
            .pull_image(image, &mut |status| {
                if status != last_status {
                    sink.info(&format!("{image}: {status}"));
                    last_status = status;
                }
            })
            .await
            .map_err(|source| SetupError::ImagePull {
                image: image.to_string(),
                source,
            })?;

        self.ledger.record(image);
        sink.info(&format!("Imagem {image} pronta"));
        Ok(())
    }

    async fn remove_for_recreate(&self, name: &str) -> Result<(), SetupError> {
        self.engine
            .remove_container(name)
            .await
            .map_err(|source| SetupError::Container {
                container: name.to_string(),
                source,
            })
    }

    fn fail(&self, sink: &dyn StatusSink, err: SetupError) -> SetupError {
        sink.error(&err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AUTOMATION_KEY, BACKEND_KEY, SANDBOX_KEY};
    use crate::infra::config::RetryPolicy;
    use crate::test_support::{MemorySink, MockEngine, MockHealth};
    use crate::services::status::StatusLevel;

    fn test_config(temp: &tempfile::TempDir, lean_mode: bool) -> LauncherConfig {
        LauncherConfig {
            lean_mode,
            data_root: temp.path().join("data"),
            retry: RetryPolicy {
                max_attempts: 3,
                delay_ms: 5,
            },
            settle_delay_ms: 1,
        }
    }

    fn build(
        lean_mode: bool,
    ) -> (
        Orchestrator,
        Arc<MockEngine>,
        Arc<MockHealth>,
        tempfile::TempDir,
    ) {
        let temp = tempfile::tempdir().unwrap();
        let engine = Arc::new(MockEngine::new());
        let health = Arc::new(MockHealth::new());
        let orchestrator = Orchestrator::new(
            engine.clone(),
            health.clone(),
            test_config(&temp, lean_mode),
        )
        .unwrap();
        (orchestrator, engine, health, temp)
    }

    fn mark_all_healthy(health: &MockHealth) {
        for key in [BACKEND_KEY, AUTOMATION_KEY, SANDBOX_KEY, MODELS_KEY] {
            health.set_healthy(key, true);
        }
    }

    fn position(commands: &[String], needle: &str) -> usize {
        commands
            .iter()
            .position(|c| c == needle)
            .unwrap_or_else(|| panic!("comando '{needle}' ausente em {commands:?}"))
    }

    #[tokio::test]
    async fn setup_runs_sequence_in_registry_order() {
        let (orchestrator, engine, health, _temp) = build(false);
        mark_all_healthy(&health);
        // probe pré-setup do servidor de modelos deve falhar para que o
        // container seja usado
        health.script(MODELS_KEY, vec![false]);
        let sink = MemorySink::new();

        let result = orchestrator.setup(&sink, false).await.unwrap();
        assert!(result);

        let commands = engine.get_commands();
        assert_eq!(commands[0], "ping");
        assert!(position(&commands, "ping") < position(&commands, "create_network:orquestra_net"));

        // imagens garantidas antes de qualquer container subir
        let last_pull = commands
            .iter()
            .rposition(|c| c.starts_with("pull:"))
            .unwrap();
        let first_create = commands
            .iter()
            .position(|c| c.starts_with("create:"))
            .unwrap();
        assert!(last_pull < first_create);

        // ordem do registro: backend antes da automação, sandbox, modelos
        let backend = position(&commands, "create:orquestra_backend");
        let automation = position(&commands, "create:orquestra_automation");
        let sandbox = position(&commands, "create:orquestra_sandbox");
        let models = position(&commands, "create:orquestra_models");
        assert!(backend < automation && automation < sandbox && sandbox < models);

        // cada create é seguido do start correspondente
        assert!(backend < position(&commands, "start:orquestra_backend"));
    }

    #[tokio::test]
    async fn setup_fails_fast_when_engine_unreachable() {
        let (orchestrator, engine, _health, _temp) = build(false);
        engine.set_ping_ok(false);
        let sink = MemorySink::new();

        let err = orchestrator.setup(&sink, false).await.unwrap_err();
        assert!(matches!(err, SetupError::EngineUnavailable { .. }));
        assert!(err.to_string().contains("Podman"));

        // nenhum efeito colateral além do ping
        assert_eq!(engine.get_commands(), vec!["ping".to_string()]);
        assert!(sink.has_level(StatusLevel::Error));
    }

    #[tokio::test]
    async fn lean_mode_touches_only_the_backend() {
        let (orchestrator, engine, health, _temp) = build(true);
        health.set_healthy(BACKEND_KEY, true);
        let sink = MemorySink::new();

        let result = orchestrator.setup(&sink, false).await.unwrap();
        assert!(result);

        let commands = engine.get_commands();
        assert!(commands.contains(&"create:orquestra_backend".to_string()));
        for name in [
            "orquestra_automation",
            "orquestra_sandbox",
            "orquestra_models",
        ] {
            assert!(
                !commands.iter().any(|c| c.ends_with(name)),
                "serviço fora do modo lean foi tocado: {commands:?}"
            );
        }
    }

    #[tokio::test]
    async fn host_model_server_takes_priority_over_container() {
        let (orchestrator, engine, health, _temp) = build(false);
        mark_all_healthy(&health);
        let sink = MemorySink::new();

        let result = orchestrator.setup(&sink, false).await.unwrap();
        assert!(result);

        let commands = engine.get_commands();
        assert!(!commands.contains(&"pull:ollama/ollama".to_string()));
        assert!(!commands.contains(&"create:orquestra_models".to_string()));
        assert!(!commands.contains(&"start:orquestra_models".to_string()));
    }

    #[tokio::test]
    async fn repeated_setup_tolerates_existing_network() {
        let (orchestrator, _engine, health, _temp) = build(true);
        health.set_healthy(BACKEND_KEY, true);
        let sink = MemorySink::new();

        assert!(orchestrator.setup(&sink, false).await.unwrap());
        // segunda rodada: rede já existe, o mock devolve Conflict
        assert!(orchestrator.setup(&sink, false).await.unwrap());
    }

    #[tokio::test]
    async fn ensure_running_is_noop_on_healthy_service() {
        let (orchestrator, engine, health, _temp) = build(false);
        engine.add_container("orquestra_backend", ContainerState::Running);
        health.set_healthy(BACKEND_KEY, true);
        let backend = orchestrator.registry[0].clone();
        let sink = MemorySink::new();

        orchestrator.ensure_running(&backend, &sink).await.unwrap();

        let commands = engine.get_commands();
        assert_eq!(commands, vec!["state:orquestra_backend".to_string()]);
    }

    #[tokio::test]
    async fn ensure_running_recreates_unhealthy_container_exactly_once() {
        let (orchestrator, engine, health, _temp) = build(false);
        engine.add_container("orquestra_backend", ContainerState::Running);
        engine.add_image("orquestra/backend:latest");
        // ruim no primeiro probe, saudável depois da recriação
        health.script(BACKEND_KEY, vec![false, true]);
        let backend = orchestrator.registry[0].clone();
        let sink = MemorySink::new();

        orchestrator.ensure_running(&backend, &sink).await.unwrap();

        let commands = engine.get_commands();
        let creates = commands.iter().filter(|c| c.starts_with("create:")).count();
        assert_eq!(creates, 1);
        assert!(position(&commands, "stop:orquestra_backend")
            < position(&commands, "remove:orquestra_backend"));
        assert!(position(&commands, "remove:orquestra_backend")
            < position(&commands, "create:orquestra_backend"));
        assert!(sink.has_level(StatusLevel::Warning));
    }

    #[tokio::test]
    async fn ensure_running_replaces_stopped_container() {
        let (orchestrator, engine, health, _temp) = build(false);
        engine.add_container("orquestra_backend", ContainerState::Stopped);
        engine.add_image("orquestra/backend:latest");
        health.set_healthy(BACKEND_KEY, true);
        let backend = orchestrator.registry[0].clone();
        let sink = MemorySink::new();

        orchestrator.ensure_running(&backend, &sink).await.unwrap();

        let commands = engine.get_commands();
        assert!(!commands.contains(&"stop:orquestra_backend".to_string()));
        assert!(position(&commands, "remove:orquestra_backend")
            < position(&commands, "create:orquestra_backend"));
        assert_eq!(
            engine.current_state("orquestra_backend"),
            ContainerState::Running
        );
    }

    #[tokio::test]
    async fn healthcheck_timeout_carries_logs_and_attempts() {
        let (orchestrator, engine, health, _temp) = build(false);
        engine.add_image("orquestra/backend:latest");
        engine.set_logs("orquestra_backend", "Traceback: porta em uso");
        health.set_healthy(BACKEND_KEY, false);
        let backend = orchestrator.registry[0].clone();
        let sink = MemorySink::new();

        let err = orchestrator
            .ensure_running(&backend, &sink)
            .await
            .unwrap_err();

        match err {
            SetupError::HealthCheckTimeout {
                service,
                attempts,
                logs,
            } => {
                assert_eq!(service, BACKEND_KEY);
                assert_eq!(attempts, 3);
                assert!(logs.contains("porta em uso"));
            }
            other => panic!("erro inesperado: {other:?}"),
        }

        // exatamente max_attempts probes no laço de espera
        assert_eq!(health.probe_count(BACKEND_KEY), 3);
        assert!(engine.get_commands().contains(&"logs:orquestra_backend".to_string()));
    }

    #[tokio::test]
    async fn pull_progress_is_deduplicated() {
        let (orchestrator, engine, health, _temp) = build(true);
        engine.set_pull_progress(vec![
            "Pulling fs layer".to_string(),
            "Pulling fs layer".to_string(),
            "Download complete".to_string(),
        ]);
        health.set_healthy(BACKEND_KEY, true);
        let sink = MemorySink::new();

        assert!(orchestrator.setup(&sink, false).await.unwrap());

        let progress: Vec<_> = sink
            .messages()
            .into_iter()
            .filter(|m| m.message.starts_with("orquestra/backend:lean: "))
            .collect();
        assert_eq!(progress.len(), 2, "linhas repetidas deveriam ser suprimidas");
    }

    #[tokio::test]
    async fn force_refresh_repulls_present_image() {
        let (orchestrator, engine, health, _temp) = build(true);
        engine.add_image("orquestra/backend:lean");
        health.set_healthy(BACKEND_KEY, true);
        let sink = MemorySink::new();

        assert!(orchestrator.setup(&sink, true).await.unwrap());
        assert!(engine
            .get_commands()
            .contains(&"pull:orquestra/backend:lean".to_string()));
    }

    #[tokio::test]
    async fn present_image_is_not_pulled_without_force() {
        let (orchestrator, engine, health, _temp) = build(true);
        engine.add_image("orquestra/backend:lean");
        health.set_healthy(BACKEND_KEY, true);
        let sink = MemorySink::new();

        assert!(orchestrator.setup(&sink, false).await.unwrap());
        assert!(!engine
            .get_commands()
            .iter()
            .any(|c| c.starts_with("pull:")));
    }

    #[tokio::test]
    async fn image_pull_failure_aborts_setup() {
        let (orchestrator, engine, health, _temp) = build(true);
        engine.set_fail_on("pull");
        health.set_healthy(BACKEND_KEY, true);
        let sink = MemorySink::new();

        let err = orchestrator.setup(&sink, false).await.unwrap_err();
        assert!(matches!(err, SetupError::ImagePull { .. }));
        assert!(sink.has_level(StatusLevel::Error));
    }

    #[tokio::test]
    async fn inspect_failure_other_than_not_found_is_fatal() {
        let (orchestrator, engine, health, _temp) = build(true);
        engine.set_fail_on("inspect_image");
        health.set_healthy(BACKEND_KEY, true);
        let sink = MemorySink::new();

        let err = orchestrator.setup(&sink, false).await.unwrap_err();
        assert!(matches!(err, SetupError::Inspect { .. }));
    }

    #[tokio::test]
    async fn stop_cleans_full_registry_even_in_lean_mode() {
        let (orchestrator, engine, _health, _temp) = build(true);
        // sobras de uma execução anterior em modo completo
        engine.add_container("orquestra_backend", ContainerState::Running);
        engine.add_container("orquestra_automation", ContainerState::Running);
        engine.add_container("orquestra_sandbox", ContainerState::Stopped);
        engine.add_network(NETWORK_NAME);

        orchestrator.stop().await;

        let commands = engine.get_commands();
        for name in [
            "orquestra_backend",
            "orquestra_automation",
            "orquestra_sandbox",
            "orquestra_models",
        ] {
            assert!(commands.contains(&format!("remove:{name}")));
        }
        assert!(commands.contains(&format!("remove_network:{NETWORK_NAME}")));
    }

    #[tokio::test]
    async fn stop_swallows_engine_failures() {
        let (orchestrator, engine, _health, _temp) = build(false);
        engine.add_container("orquestra_backend", ContainerState::Running);
        engine.set_fail_on("stop");

        // não deve entrar em pânico nem propagar erro
        orchestrator.stop().await;

        assert!(engine
            .get_commands()
            .contains(&"remove:orquestra_backend".to_string()));
    }

    #[tokio::test]
    async fn images_needing_refresh_lists_stale_images_only() {
        let (orchestrator, _engine, _health, _temp) = build(false);

        // nada registrado ainda: tudo é considerado velho
        let stale = orchestrator.images_needing_refresh();
        assert_eq!(stale.len(), orchestrator.active_services().len());

        orchestrator.ledger.record("n8nio/n8n");
        let stale = orchestrator.images_needing_refresh();
        assert!(!stale.contains(&"n8nio/n8n".to_string()));
        assert!(stale.contains(&"ollama/ollama".to_string()));
    }

    #[tokio::test]
    async fn statuses_report_state_and_health() {
        let (orchestrator, engine, health, _temp) = build(false);
        engine.add_container("orquestra_backend", ContainerState::Running);
        health.set_healthy(BACKEND_KEY, true);

        let statuses = orchestrator.statuses().await.unwrap();
        assert_eq!(statuses.len(), 4);

        let backend = statuses.iter().find(|s| s.key == BACKEND_KEY).unwrap();
        assert_eq!(backend.state, ContainerState::Running);
        assert!(backend.healthy);

        let sandbox = statuses.iter().find(|s| s.key == SANDBOX_KEY).unwrap();
        assert_eq!(sandbox.state, ContainerState::NotCreated);
        assert!(!sandbox.healthy);
    }
}
