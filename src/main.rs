//! House price dashboard
//!
//! Scores a property with two fitted models (price regressor, affordability
//! classifier) and charts uploaded datasets by geopolitical zone or town.
//!
//! Exit codes:
//!   0 - Clean shutdown, or `--check` / `--print-config` succeeded
//!   1 - Startup failed (config, catalog or model artifacts)

use crate::cli::Args;
use crate::config::Config;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::AppState;
use astra::{Request, Server};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;
mod config;
mod dataset;
mod domain;
mod errors;
mod geos;
mod predictor;
mod responses;
mod router;
mod spreadsheets;
mod state;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let args = Args::parse_args();

    if args.print_config {
        print!("{}", Config::default_toml());
        return;
    }

    // 1️⃣ Load configuration
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };
    if let Some(addr) = &args.addr {
        config.server.addr = addr.clone();
    }

    init_logging(&args, &config);
    info!("House price dashboard v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // 2️⃣ Load both models and validate the lookup tables
    let state = match AppState::load(config) {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    if args.check {
        info!("Configuration, catalog and models look good");
        return;
    }

    // 3️⃣ Start the server
    let addr = state.config.server.addr.clone();
    let workers = state.config.server.max_workers.max(1);
    info!("Starting server at http://{addr} ({workers} worker(s))");

    let server = Server::bind(&addr).max_workers(workers);

    // 4️⃣ Serve requests, passing the shared state into the closure
    let result = server.serve(move |req: Request, _info| {
        let method = req.method().clone();
        let path = req.uri().path().to_owned();

        let resp = match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        };

        info!(%method, %path, status = resp.status().as_u16(), "request");
        resp
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
        std::process::exit(1);
    }

    info!("Server shut down cleanly.");
}

/// Explicit `--config` must load; the default file is optional.
fn load_config(args: &Args) -> Result<Config, errors::StartupError> {
    if let Some(path) = &args.config {
        return Config::load(path);
    }
    Ok(Config::load_default()?.unwrap_or_default())
}

/// `RUST_LOG` wins, then `--verbose`, then the configured level.
fn init_logging(args: &Args, config: &Config) {
    let fallback = args
        .log_level()
        .map(|l| l.to_string().to_lowercase())
        .unwrap_or_else(|| config.logging.level.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
