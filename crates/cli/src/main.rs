mod display;
mod input;
mod shell;

use anyhow::{Context, Result};
use std::{
    env,
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use monoledger_core::{
    config::{self, AppConfig},
    CatalogLoader, Ledger,
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::{input::TokenReader, shell::Shell};

fn main() -> Result<()> {
    config::ensure_default_config()?;
    let mut config = AppConfig::load()?;
    if let Some(path) = env::args_os().nth(1) {
        config.catalog_path = PathBuf::from(path);
    }

    init_logging(&config.log_dir)?;

    let catalog = CatalogLoader::load(&config.catalog_path)?;

    let stdin = io::stdin();
    let mut tokens = TokenReader::new(stdin.lock());
    let mut out = io::stdout().lock();
    let registry = shell::prompt_players(&mut tokens, &mut out, config.rules.starting_cash)?;

    let ledger = Ledger::new(catalog, registry, config.rules.clone());
    info!(
        players = ledger.registry().len(),
        properties = ledger.catalog().len(),
        "Session started"
    );

    let mut shell = Shell::new(ledger, tokens, out);
    shell.run()
}

fn init_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("monoledger.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::from_default_env();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
