//! CLI for the rload resource loader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rload_core::config;
use std::net::SocketAddr;
use std::path::PathBuf;

use commands::{run_config, run_fetch, run_parse, FetchArgs};

/// Top-level CLI for the rload resource loader.
#[derive(Debug, Parser)]
#[command(name = "rload")]
#[command(about = "rload: fetch http, https, file and data URIs as text", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/rload/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a URI and print its body to stdout.
    Fetch {
        /// http://, https://, file:// or data: URI.
        uri: String,

        /// Extra request header ("Name: value"); repeatable, sent in order.
        #[arg(short = 'H', long = "header", value_name = "HEADER")]
        headers: Vec<String>,

        /// Do not send the default headers from the config file.
        #[arg(long)]
        no_default_headers: bool,

        /// Give up after this many seconds (the blocked request is abandoned).
        #[arg(long, value_name = "SECS")]
        deadline: Option<u64>,

        /// Connect to ADDR for HOST instead of resolving it (HOST=IP:PORT); repeatable.
        #[arg(long, value_name = "HOST=ADDR", value_parser = parse_resolve)]
        resolve: Vec<(String, SocketAddr)>,
    },

    /// Parse a URI and print the resulting descriptor.
    Parse {
        uri: String,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

fn parse_resolve(s: &str) -> Result<(String, SocketAddr), String> {
    let (host, addr) = s
        .split_once('=')
        .ok_or_else(|| format!("expected HOST=IP:PORT, got {:?}", s))?;
    if host.is_empty() {
        return Err("empty host in --resolve".to_string());
    }
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| format!("invalid address {:?}: {}", addr, e))?;
    Ok((host.to_string(), addr))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let (cfg, cfg_path) = match &cli.config {
            Some(path) => (config::load_from(path)?, path.clone()),
            None => (config::load_or_init()?, config::config_path()?),
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                uri,
                headers,
                no_default_headers,
                deadline,
                resolve,
            } => {
                let args = FetchArgs {
                    uri,
                    headers,
                    no_default_headers,
                    deadline,
                    resolve,
                };
                run_fetch(&cfg, args).await?;
            }
            CliCommand::Parse { uri, json } => run_parse(&uri, json)?,
            CliCommand::Config => run_config(&cfg, &cfg_path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
