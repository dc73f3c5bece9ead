use clap::Parser;
use ferrous_resolve_domain::CliOverrides;
use std::net::Ipv4Addr;
use tracing::info;

mod bootstrap;
mod di;
mod repl;

#[derive(Parser)]
#[command(name = "ferrous-resolve")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous Resolve - Interactive iterative DNS resolver")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Root server every resolution starts from
    #[arg(short = 'r', long, value_name = "IPV4")]
    root_server: Option<Ipv4Addr>,

    /// Per-query receive timeout in milliseconds
    #[arg(short = 't', long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        root_server: cli.root_server,
        query_timeout_ms: cli.timeout_ms,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous Resolve v{}", env!("CARGO_PKG_VERSION"));

    let services = di::ResolverServices::new(&config).await?;

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut session = repl::Session::new(services.resolve_domain, services.events, std::io::stdout());
    session.run(input).await?;

    info!(cached_names = session.cache().len(), "Session closed");
    Ok(())
}
