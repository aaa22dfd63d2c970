//! Test doubles shared by unit and integration tests.
//!
//! `MockEngine` keeps an ordered ledger of every control-plane call so
//! tests can assert exact command sequences, the way a terminal session
//! would be replayed.

use crate::domain::{ContainerEngine, ContainerSpec, ContainerState, ServiceDefinition, ServiceHealth};
use crate::errors::EngineError;
use crate::services::status::{StatusLevel, StatusSink, StatusUpdate};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// In-memory container engine with scripted failures.
#[derive(Debug)]
pub struct MockEngine {
    commands: Mutex<Vec<String>>,
    containers: Mutex<HashMap<String, ContainerState>>,
    images: Mutex<HashSet<String>>,
    networks: Mutex<HashSet<String>>,
    logs: Mutex<HashMap<String, String>>,
    fail_on: Mutex<Option<String>>,
    ping_ok: Mutex<bool>,
    pull_progress: Mutex<Vec<String>>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            commands: Mutex::new(Vec::new()),
            containers: Mutex::new(HashMap::new()),
            images: Mutex::new(HashSet::new()),
            networks: Mutex::new(HashSet::new()),
            logs: Mutex::new(HashMap::new()),
            fail_on: Mutex::new(None),
            ping_ok: Mutex::new(true),
            pull_progress: Mutex::new(vec![
                "Pulling fs layer".to_string(),
                "Download complete".to_string(),
            ]),
        }
    }

    /// Ordered ledger of every call made against the engine.
    pub fn get_commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    /// Makes the named operation fail with a simulated transport error.
    pub fn set_fail_on(&self, operation: &str) {
        *self.fail_on.lock().unwrap() = Some(operation.to_string());
    }

    pub fn set_ping_ok(&self, ok: bool) {
        *self.ping_ok.lock().unwrap() = ok;
    }

    pub fn add_container(&self, name: &str, state: ContainerState) {
        self.containers.lock().unwrap().insert(name.to_string(), state);
    }

    pub fn add_image(&self, image: &str) {
        self.images.lock().unwrap().insert(image.to_string());
    }

    pub fn add_network(&self, name: &str) {
        self.networks.lock().unwrap().insert(name.to_string());
    }

    pub fn set_logs(&self, name: &str, logs: &str) {
        self.logs.lock().unwrap().insert(name.to_string(), logs.to_string());
    }

    /// Status lines emitted by every simulated pull.
    pub fn set_pull_progress(&self, lines: Vec<String>) {
        *self.pull_progress.lock().unwrap() = lines;
    }

    pub fn current_state(&self, name: &str) -> ContainerState {
        self.containers
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or(ContainerState::NotCreated)
    }

    fn record(&self, command: String) {
        self.commands.lock().unwrap().push(command);
    }

    fn check_fail(&self, operation: &str) -> Result<(), EngineError> {
        if self.fail_on.lock().unwrap().as_deref() == Some(operation) {
            return Err(EngineError::Transport(format!(
                "falha simulada em {operation}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ContainerEngine for MockEngine {
    async fn ping(&self) -> Result<(), EngineError> {
        self.record("ping".to_string());
        self.check_fail("ping")?;
        if *self.ping_ok.lock().unwrap() {
            Ok(())
        } else {
            Err(EngineError::Transport("socket indisponível".to_string()))
        }
    }

    fn describe(&self) -> String {
        "Mock Engine (teste)".to_string()
    }

    async fn create_network(&self, name: &str) -> Result<(), EngineError> {
        self.record(format!("create_network:{name}"));
        self.check_fail("create_network")?;
        if !self.networks.lock().unwrap().insert(name.to_string()) {
            return Err(EngineError::Conflict(format!("rede {name} já existe")));
        }
        Ok(())
    }

    async fn remove_network(&self, name: &str) -> Result<(), EngineError> {
        self.record(format!("remove_network:{name}"));
        self.check_fail("remove_network")?;
        if self.networks.lock().unwrap().remove(name) {
            Ok(())
        } else {
            Err(EngineError::NotFound(format!("rede {name} não existe")))
        }
    }

    async fn image_present(&self, image: &str) -> Result<bool, EngineError> {
        self.record(format!("inspect_image:{image}"));
        self.check_fail("inspect_image")?;
        Ok(self.images.lock().unwrap().contains(image))
    }

    async fn pull_image(
        &self,
        image: &str,
        on_progress: &mut (dyn FnMut(String) + Send),
    ) -> Result<(), EngineError> {
        self.record(format!("pull:{image}"));
        self.check_fail("pull")?;
        for line in self.pull_progress.lock().unwrap().iter() {
            on_progress(line.clone());
        }
        self.images.lock().unwrap().insert(image.to_string());
        Ok(())
    }

    async fn container_state(&self, name: &str) -> Result<ContainerState, EngineError> {
        self.record(format!("state:{name}"));
        self.check_fail("state")?;
        Ok(self.current_state(name))
    }

    async fn create_container(&self, spec: &ContainerSpec<'_>) -> Result<(), EngineError> {
        self.record(format!("create:{}", spec.name));
        self.check_fail("create")?;
        self.containers
            .lock()
            .unwrap()
            .insert(spec.name.to_string(), ContainerState::Stopped);
        Ok(())
    }

    async fn start_container(&self, name: &str) -> Result<(), EngineError> {
        self.record(format!("start:{name}"));
        self.check_fail("start")?;
        match self.containers.lock().unwrap().get_mut(name) {
            Some(state) => {
                *state = ContainerState::Running;
                Ok(())
            }
            None => Err(EngineError::NotFound(format!("container {name} não existe"))),
        }
    }

    async fn stop_container(&self, name: &str) -> Result<(), EngineError> {
        self.record(format!("stop:{name}"));
        self.check_fail("stop")?;
        match self.containers.lock().unwrap().get_mut(name) {
            Some(state) => {
                *state = ContainerState::Stopped;
                Ok(())
            }
            None => Err(EngineError::NotFound(format!("container {name} não existe"))),
        }
    }

    async fn remove_container(&self, name: &str) -> Result<(), EngineError> {
        self.record(format!("remove:{name}"));
        self.check_fail("remove")?;
        if self.containers.lock().unwrap().remove(name).is_some() {
            Ok(())
        } else {
            Err(EngineError::NotFound(format!("container {name} não existe")))
        }
    }

    async fn container_logs(&self, name: &str, _tail: usize) -> Result<String, EngineError> {
        self.record(format!("logs:{name}"));
        self.check_fail("logs")?;
        Ok(self
            .logs
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| "sem logs".to_string()))
    }
}

/// Scripted readiness probe. Per-service one-shot scripts run first;
/// once exhausted the persistent per-service answer applies (default
/// "not healthy").
#[derive(Debug, Default)]
pub struct MockHealth {
    scripted: Mutex<HashMap<String, VecDeque<bool>>>,
    defaults: Mutex<HashMap<String, bool>>,
    counts: Mutex<HashMap<String, usize>>,
}

impl MockHealth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persistent probe answer for a service.
    pub fn set_healthy(&self, key: &str, healthy: bool) {
        self.defaults.lock().unwrap().insert(key.to_string(), healthy);
    }

    /// One-shot answers consumed before the persistent one.
    pub fn script(&self, key: &str, answers: Vec<bool>) {
        self.scripted
            .lock()
            .unwrap()
            .insert(key.to_string(), answers.into());
    }

    /// How many times the service was probed.
    pub fn probe_count(&self, key: &str) -> usize {
        self.counts.lock().unwrap().get(key).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ServiceHealth for MockHealth {
    async fn probe(&self, definition: &ServiceDefinition) -> bool {
        *self
            .counts
            .lock()
            .unwrap()
            .entry(definition.key.to_string())
            .or_insert(0) += 1;

        if let Some(script) = self.scripted.lock().unwrap().get_mut(definition.key) {
            if let Some(answer) = script.pop_front() {
                return answer;
            }
        }
        self.defaults
            .lock()
            .unwrap()
            .get(definition.key)
            .copied()
            .unwrap_or(false)
    }
}

/// Sink that collects every update in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    updates: Mutex<Vec<StatusUpdate>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<StatusUpdate> {
        self.updates.lock().unwrap().clone()
    }

    pub fn has_level(&self, level: StatusLevel) -> bool {
        self.updates.lock().unwrap().iter().any(|u| u.level == level)
    }
}

impl StatusSink for MemorySink {
    fn publish(&self, update: StatusUpdate) {
        self.updates.lock().unwrap().push(update);
    }
}
