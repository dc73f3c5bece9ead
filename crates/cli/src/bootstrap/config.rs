use ferrous_resolve_domain::{CliOverrides, Config};
use tracing::debug;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;

    debug!(
        root_server = %config.resolver.root_server,
        port = config.resolver.dns_port,
        timeout_ms = config.resolver.query_timeout_ms,
        "Configuration loaded"
    );

    Ok(config)
}
