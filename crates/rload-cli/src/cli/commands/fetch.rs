//! `rload fetch <uri>` – fetch and print the body.

use anyhow::{anyhow, Context, Result};
use rload_core::config::LoaderConfig;
use rload_core::fetch::{Connector, Fetcher, TcpConnector};
use rload_core::retry::{run_with_retry, RetryPolicy};
use rload_core::{parse, ResourceDescriptor};
use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FetchArgs {
    pub uri: String,
    pub headers: Vec<String>,
    pub no_default_headers: bool,
    pub deadline: Option<u64>,
    pub resolve: Vec<(String, SocketAddr)>,
}

/// Config defaults first (unless disabled), then the command-line headers, in order.
fn request_headers(cfg: &LoaderConfig, args: &FetchArgs) -> Vec<String> {
    let mut headers = Vec::new();
    if !args.no_default_headers {
        headers.extend(cfg.default_headers.iter().cloned());
    }
    headers.extend(args.headers.iter().cloned());
    headers
}

/// Run the blocking fetch on the blocking pool. With a deadline, the task is
/// abandoned when it expires; the stuck call keeps its thread until its own I/O returns.
pub(crate) async fn fetch_with_deadline<C>(
    fetcher: Fetcher<C>,
    policy: RetryPolicy,
    descriptor: ResourceDescriptor,
    headers: Vec<String>,
    deadline: Option<Duration>,
) -> Result<String>
where
    C: Connector + Send + 'static,
{
    let task = tokio::task::spawn_blocking(move || {
        run_with_retry(&policy, || fetcher.fetch(&descriptor, &headers))
    });
    let joined = match deadline {
        Some(d) => tokio::time::timeout(d, task)
            .await
            .map_err(|_| anyhow!("no result within {:?}; fetch abandoned", d))?,
        None => task.await,
    };
    let body = joined.context("fetch task join")??;
    Ok(body)
}

pub async fn run_fetch(cfg: &LoaderConfig, args: FetchArgs) -> Result<()> {
    let descriptor = parse(&args.uri)?;
    let headers = request_headers(cfg, &args);

    let mut connector = TcpConnector::new(cfg.fetch_options());
    for (host, addr) in &args.resolve {
        connector = connector.resolve_override(host.clone(), *addr);
    }

    tracing::info!("fetch {}", descriptor);
    let body = fetch_with_deadline(
        Fetcher::with_connector(connector),
        cfg.retry_policy(),
        descriptor,
        headers,
        args.deadline.map(Duration::from_secs),
    )
    .await
    .with_context(|| format!("fetch {}", args.uri))?;

    let mut out = std::io::stdout().lock();
    out.write_all(body.as_bytes())?;
    out.flush()?;
    Ok(())
}
