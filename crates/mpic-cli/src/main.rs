mod remote_caller;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use mpic_caa::CaaChecker;
use mpic_coordinator::{Coordinator, CoordinatorConfig};
use mpic_dcv::DcvChecker;
use mpic_resolver::{HickoryDnsResolver, ReqwestHttpFetcher};
use mpic_types::MpicRequest;
use remote_caller::InProcessRemoteCaller;
use tracing_subscriber::EnvFilter;

/// Run a single MPIC request end to end against real DNS/HTTP, using the
/// configured perspectives as an in-process fan-out rather than a network
/// hop to distinct workers.
#[derive(Parser, Debug)]
#[command(name = "mpic-cli", version, about)]
struct Cli {
    /// Path to a CoordinatorConfig TOML document. Falls back to the
    /// MPIC_CONFIG environment variable if omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a JSON-encoded MpicRequest. Read from stdin if omitted.
    #[arg(short, long)]
    request: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(|| std::env::var_os("MPIC_CONFIG").map(PathBuf::from))
        .ok_or_else(|| anyhow::anyhow!("no --config given and MPIC_CONFIG is not set"))?;
    let config_toml = std::fs::read_to_string(&config_path)?;
    let config = CoordinatorConfig::from_toml_str(&config_toml)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_filter.clone()))
        .init();

    let request_json = match cli.request {
        Some(path) => std::fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let request: MpicRequest = serde_json::from_str(&request_json)?;

    let dns_resolver = Arc::new(HickoryDnsResolver::from_system_conf()?);
    let http_fetcher = Arc::new(ReqwestHttpFetcher::new(Duration::from_secs(
        config.http_client_timeout_secs,
    ))?);
    let caa_checker = CaaChecker::new(dns_resolver.clone());
    let dcv_checker = DcvChecker::new(dns_resolver, http_fetcher);
    let remote_caller = Arc::new(InProcessRemoteCaller::new(caa_checker, dcv_checker));

    let coordinator = Coordinator::new(config, remote_caller);
    let response = coordinator.coordinate_mpic(request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
