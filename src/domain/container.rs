#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    Stopped,
    NotCreated,
}

/// Everything the engine needs to create one service container.
#[derive(Debug, Clone)]
pub struct ContainerSpec<'a> {
    pub name: &'a str,
    pub image: &'a str,
    /// Host-side port the service is reachable on.
    pub host_port: u16,
    /// Port the service listens on inside the container.
    pub internal_port: u16,
    /// Volume binds in `host:container` form.
    pub binds: Vec<String>,
    pub env: &'a [String],
    pub network: &'a str,
}
