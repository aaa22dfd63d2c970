use crate::domain::ContainerState;
use crate::infra::{DockerEngine, LauncherConfig};
use crate::services::{HttpHealth, LogSink, Orchestrator};
use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::Path;
use std::sync::Arc;

#[derive(Subcommand)]
pub enum LauncherCommand {
    /// Sobe a rede, as imagens e todos os serviços até ficarem saudáveis
    Up {
        /// Modo lean: apenas o backend essencial
        #[arg(long)]
        lean: bool,
        /// Força o re-download das imagens já presentes
        #[arg(long)]
        refresh_images: bool,
    },
    /// Para e remove todos os serviços conhecidos e a rede
    Down,
    /// Mostra o estado e a saúde de cada serviço
    Status,
    /// Verifica se o engine de containers está acessível
    Doctor,
}

struct Launcher {
    orchestrator: Orchestrator,
}

impl Launcher {
    fn new(config_dir: &Path, lean_override: bool) -> Result<Self> {
        let mut config = LauncherConfig::load(config_dir)?;
        if lean_override {
            config.lean_mode = true;
        }

        let engine = Arc::new(DockerEngine::new().context("nenhum socket de engine encontrado")?);
        let health = Arc::new(HttpHealth::new());
        let orchestrator = Orchestrator::new(engine, health, config)?;

        Ok(Self { orchestrator })
    }

    async fn up(&self, refresh_images: bool) -> Result<()> {
        if !refresh_images {
            let stale = self.orchestrator.images_needing_refresh();
            if !stale.is_empty() {
                println!(
                    "⚠️  {} imagem(ns) sem atualização há mais de 10 dias. Use --refresh-images.",
                    stale.len()
                );
            }
        }

        let sink = LogSink;
        self.orchestrator.setup(&sink, refresh_images).await?;
        Ok(())
    }

    async fn down(&self) -> Result<()> {
        self.orchestrator.stop().await;
        println!("✅ Tudo parado");
        Ok(())
    }

    async fn status(&self) -> Result<()> {
        println!("📦 Status dos serviços:");

        for status in self.orchestrator.statuses().await? {
            let state = match status.state {
                ContainerState::Running => "rodando",
                ContainerState::Stopped => "parado",
                ContainerState::NotCreated => "não criado",
            };
            let health = if status.healthy { "saudável" } else { "sem resposta" };

            println!("- {:<12} | {:<10} | {}", status.key, state, health);
        }

        Ok(())
    }

    async fn doctor(&self) -> Result<()> {
        if self.orchestrator.is_engine_reachable().await {
            println!("✅ Engine de containers acessível");
        } else {
            println!("❌ Engine de containers inacessível");
            println!("{}", crate::infra::endpoint::install_guidance());
        }
        Ok(())
    }
}

pub async fn run(command: LauncherCommand, config_dir: &Path) -> Result<()> {
    match command {
        LauncherCommand::Up {
            lean,
            refresh_images,
        } => {
            let launcher = Launcher::new(config_dir, lean)?;
            launcher.up(refresh_images).await
        }
        LauncherCommand::Down => Launcher::new(config_dir, false)?.down().await,
        LauncherCommand::Status => Launcher::new(config_dir, false)?.status().await,
        LauncherCommand::Doctor => Launcher::new(config_dir, false)?.doctor().await,
    }
}
