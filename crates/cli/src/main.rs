use anyhow::Context;

use warehouse_cli::{Config, Shell};
use warehouse_core::SessionId;
use warehouse_session::Session;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    warehouse_observability::init(&config.log);
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(Session::new(SessionId::new()), stdin.lock(), stdout.lock());

    shell.run().context("terminal session failed")?;
    Ok(())
}
