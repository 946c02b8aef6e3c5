//! `rload config` – show where the config lives and what is in effect.

use anyhow::Result;
use rload_core::config::LoaderConfig;
use std::path::Path;

pub fn run_config(cfg: &LoaderConfig, path: &Path) -> Result<()> {
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
