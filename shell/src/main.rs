mod config;
mod render;
mod session;

use std::io;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, USAGE};
use session::Session;

fn main() -> Result<()> {
    let config = match Config::from_args(std::env::args().skip(1), |k| std::env::var(k).ok())? {
        Some(config) => config,
        None => {
            print!("{}", USAGE);
            return Ok(());
        }
    };

    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter '{}'", config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!(
        imports = config.imports.len(),
        format = ?config.format,
        save = ?config.save_path,
        "starting shell"
    );

    let stdout = io::stdout();
    let mut session = Session::new(config, stdout.lock());
    session.import_startup()?;

    let stdin = io::stdin();
    session.run(stdin.lock())?;
    session.finish()
}
