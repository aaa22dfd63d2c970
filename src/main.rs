use anyhow::Result;
use clap::Parser;
use orquestra::cli::{self, LauncherCommand};
use orquestra::infra::default_config_dir;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "orquestra",
    about = "Orquestrador dos serviços em containers da plataforma"
)]
struct Cli {
    /// Diretório de configuração (default: ~/.config/orquestra)
    #[arg(long, env = "ORQUESTRA_CONFIG_DIR", default_value_os_t = default_config_dir())]
    config_dir: std::path::PathBuf,

    #[command(subcommand)]
    command: LauncherCommand,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    cli::run(cli.command, &cli.config_dir).await
}
