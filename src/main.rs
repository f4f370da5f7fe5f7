use anyhow::{Context, Result};
use clap::Parser;
use pinledger::core::config::Config;
use pinledger::core::startup::open_store;
use pinledger::core::tracing_init::init_tracing;
use pinledger::flow::controller::FormFlow;
use pinledger::ui::browser::SystemBrowser;
use pinledger::ui::secret::HiddenTty;
use pinledger::ui::terminal::Terminal;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_CONFIG: &str = "config.toml";

/// Local account manager: create accounts, log in with a PIN, recover and reset PINs
#[derive(Debug, Parser)]
#[command(name = "pinledger", version)]
struct Cli {
    /// Configuration file (built-in defaults are used when the default file is absent)
    config: Option<PathBuf>,

    /// Override the account database path from the configuration
    #[arg(long)]
    database: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path),
        None => Config::from_file_or_default(&PathBuf::from(DEFAULT_CONFIG)),
    }
    .context(format!(
        "Failed to load configuration. \
        Copy config.example.toml to {} and adjust the values, or pass a config path.",
        DEFAULT_CONFIG
    ))?;

    let config = match cli.database {
        Some(database) => config.with_database(database)?,
        None => config,
    };

    init_tracing(&config.logging)?;

    // Single user: one thread, one operation at a time
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: Config) -> Result<()> {
    info!(
        database = %config.database.path.display(),
        log_level = %config.logging.level,
        log_format = %config.logging.format,
        menu_links = config.menu.links.len(),
        "pinledger starting"
    );

    let store = open_store(&config.database).await?;
    let mut flow = FormFlow::new(store);

    let stdin = std::io::stdin();
    let launcher = SystemBrowser;
    let mut terminal = Terminal::new(
        stdin.lock(),
        std::io::stdout(),
        &config.menu.links,
        &launcher,
    );
    if stdin.is_terminal() {
        terminal = terminal.with_secret_input(Box::new(HiddenTty));
    }

    terminal.run(&mut flow).await?;

    info!("pinledger exiting");

    Ok(())
}
