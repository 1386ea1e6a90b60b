mod run;

use anyhow::{Context, Result};
use credflow::config::Config;
use credflow::store::{LoanStore, SqliteStore};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_env()?;
    credflow::telemetry::init(&config.log_filter)?;

    let db_path = config.ensure_db_path()?;
    let sqlite = SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open store at {}", db_path.display()))?;
    let mut store = LoanStore::new(sqlite);

    run::as_cli(&args, &mut store, &config)
}
