use std::env;
use std::path::PathBuf;

/// Ordered list of control-socket candidates, Podman first.
///
/// The socket location is not standardized across engines and
/// distributions, so discovery walks this list and keeps the first
/// endpoint that answers a ping. The list is only a default; the
/// adapter accepts an injected list for tests.
pub fn candidate_sockets() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(host) = env::var("DOCKER_HOST") {
        if let Some(path) = host.strip_prefix("unix://") {
            candidates.push(PathBuf::from(path));
        }
    }

    let home = env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/root"));

    // Podman machine and rootless sockets
    candidates.push(home.join(".local/share/containers/podman/machine/podman.sock"));
    candidates.push(
        home.join(".local/share/containers/podman/machine/podman-machine-default/podman.sock"),
    );
    if let Ok(runtime_dir) = env::var("XDG_RUNTIME_DIR") {
        candidates.push(PathBuf::from(runtime_dir).join("podman/podman.sock"));
    }
    candidates.push(home.join(".local/share/containers/podman/machine/qemu/podman.sock"));
    candidates.push(PathBuf::from("/run/podman/podman.sock"));

    // Docker Desktop
    candidates.push(home.join(".docker/desktop/docker.sock"));
    candidates.push(home.join(".docker/docker.sock"));

    // Sockets tradicionais do Linux
    candidates.push(PathBuf::from("/var/run/docker.sock"));
    candidates.push(PathBuf::from("/run/docker.sock"));

    // WSL2
    candidates.push(PathBuf::from("/mnt/wsl/docker-desktop/docker.sock"));

    // Colima e Rancher Desktop
    candidates.push(home.join(".colima/docker.sock"));
    candidates.push(home.join(".rd/docker.sock"));

    candidates
}

/// Para onde apontar o usuário quando nenhum socket responde.
pub fn install_guidance() -> String {
    let (podman_link, docker_link, install) = match env::consts::OS {
        "macos" => (
            "https://podman.io/getting-started/installation",
            "https://desktop.docker.com/mac/main/arm64/Docker.dmg",
            "instale o Podman (recomendado) ou o Docker Desktop",
        ),
        "windows" => (
            "https://podman.io/getting-started/installation",
            "https://desktop.docker.com/win/main/amd64/Docker%20Desktop%20Installer.exe",
            "instale o Podman (recomendado) ou o Docker Desktop",
        ),
        _ => (
            "https://podman.io/getting-started/installation",
            "https://docs.docker.com/engine/install/",
            "instale o Podman (recomendado) ou o Docker Engine",
        ),
    };

    format!(
        "Nenhum motor de containers respondeu. Por favor {install}:\n\n\
         Podman (recomendado): {podman_link}\nDocker: {docker_link}\n\n\
         Depois de instalar e iniciar o motor, rode o orquestra novamente."
    )
}
