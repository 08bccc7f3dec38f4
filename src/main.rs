//! modemd - GSM/PPP modem lifecycle daemon
//!
//! Powers the modem up, brings its PPP session to the configured state and
//! then serves operator commands on the console. The daemon runs until SIGINT
//! or SIGTERM; closing stdin only ends command handling.
//! With `--simulate` no hardware or pppd is touched.

use std::{path::PathBuf, process, sync::Arc};

use clap::Parser;
use modemd::{
    cli::{CliService, serve_console},
    config::Config,
    services::{
        LifecycleController, SessionState,
        gpio::{GpioBus, SimulatedGpioBus, SysfsGpioBus},
        network::{NetworkStack, PppdStack, SimulatedStack},
    },
    tracing_config,
};
use tokio::{
    io::{self, BufReader},
    signal::unix::{SignalKind, signal},
};
use tracing::{error, info, warn};

/// GSM/PPP modem lifecycle daemon.
#[derive(Parser, Debug)]
#[command(name = "modemd", version, about = "GSM/PPP modem lifecycle daemon")]
struct Cli {
    /// Configuration file (defaults to the XDG config location).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use simulated GPIO and PPP backends.
    #[arg(long, default_value_t = false)]
    simulate: bool,

    /// Also write logs to a rolling file.
    #[arg(long, default_value_t = false)]
    log_file: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        error!(error = %e, "modemd failed");
        eprintln!("modemd: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> modemd::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }?;

    let _log_guard = if cli.log_file {
        Some(tracing_config::init_with_file(config.general.log_level)?)
    } else {
        tracing_config::init(config.general.log_level)?;
        None
    };

    let lifecycle = config.validate()?;
    info!(simulate = cli.simulate, "Starting modemd");

    let (gpio, stack): (Arc<dyn GpioBus>, Arc<dyn NetworkStack>) = if cli.simulate {
        (
            Arc::new(SimulatedGpioBus::new()),
            Arc::new(SimulatedStack::new(lifecycle.ppp.interface.clone())),
        )
    } else {
        (
            Arc::new(SysfsGpioBus::new()),
            Arc::new(PppdStack::new(lifecycle.ppp.clone())),
        )
    };

    let controller = Arc::new(LifecycleController::boot(lifecycle, gpio, stack).await?);
    let service = CliService::new(controller.clone(), Arc::new(config));

    let mut terminate = signal(SignalKind::terminate())?;
    let shutdown = async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => info!("Received SIGINT, shutting down"),
                Err(e) => warn!(error = %e, "SIGINT handler failed, shutting down"),
            },
            _ = terminate.recv() => info!("Received SIGTERM, shutting down"),
        }
    };

    serve_console(&service, BufReader::new(io::stdin()), io::stdout(), shutdown).await;

    if controller.session_state() == SessionState::Running {
        if let Err(e) = controller.suspend().await {
            warn!(error = %e, "Could not stop modem session on shutdown");
        }
    }

    Ok(())
}
