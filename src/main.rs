use clap::Parser;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

use arbwatch::app::App;
use arbwatch::cli::{print_trades, Cli, Command};
use arbwatch::config::Config;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Init => Config::init_default(&cli.config),
        Command::Trades { ref log } => trades(&cli, log.clone()),
        Command::Run { auto_execute } => run(&cli, auto_execute).await,
    };

    if let Err(e) = result {
        eprintln!("arbwatch: {e}");
        std::process::exit(1);
    }
}

fn trades(cli: &Cli, log: Option<std::path::PathBuf>) -> arbwatch::error::Result<()> {
    let log_path = match log {
        Some(path) => path,
        None => Config::load_or_init(&cli.config)?.trade_log,
    };
    print_trades(&log_path)
}

async fn run(cli: &Cli, auto_execute: bool) -> arbwatch::error::Result<()> {
    let config = Config::load_or_init(&cli.config)?;
    config.init_logging();
    info!("arbwatch starting");

    let app = App::new(config)?;
    if auto_execute {
        app.state().set_auto_execute(true);
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Ctrl-C requests a graceful stop: the loop observes the channel at the
    // next cycle boundary.
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    // SIGUSR1 toggles automatic execution at runtime.
    #[cfg(unix)]
    {
        let state = app.state();
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};
            let Ok(mut toggler) = signal(SignalKind::user_defined1()) else {
                error!("Failed to install SIGUSR1 handler");
                return;
            };
            while toggler.recv().await.is_some() {
                let enabled = state.toggle_auto_execute();
                info!(enabled, "Auto-execution toggled");
            }
        });
    }

    let result = app.run(shutdown_rx).await;
    info!("arbwatch stopped");
    result
}
