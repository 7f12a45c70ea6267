use std::fmt::Display;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use mimalloc::MiMalloc;
use tokio::signal;

use study_gateway::config::{Config, DEFAULT_MODEL_NAME};
use study_gateway::gateway_util::AppStateData;
use study_gateway::observability;
use study_gateway::routes::build_router;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub const STUDY_GATEWAY_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Socket address to bind the API server to
    #[arg(long, env = "BIND_ADDRESS")]
    bind_address: Option<SocketAddr>,

    /// Gemini model to use for all prompts
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL_NAME)]
    model_name: String,

    /// Socket address for the Prometheus metrics exporter
    #[arg(long, env = "PROMETHEUS_ADDRESS")]
    prometheus_address: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    // Set up logs immediately, so that we can use `tracing`.
    observability::setup_logs();

    tracing::info!("Starting Study Gateway {STUDY_GATEWAY_VERSION}");

    let config = Arc::new(Config {
        bind_address: args.bind_address,
        model_name: args.model_name,
        prometheus_address: args.prometheus_address,
    });

    observability::setup_metrics(&config).expect_pretty("Failed to set up metrics");

    let app_state =
        AppStateData::new(config.clone()).expect_pretty("Failed to initialize AppState");
    let model_configured = app_state.model.is_some();

    let router = build_router(app_state);

    // Bind to the configured socket address, or default to 0.0.0.0:3000
    let bind_address = config
        .bind_address
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

    let listener = match tokio::net::TcpListener::bind(bind_address).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            tracing::error!(
                "Failed to bind to socket address {bind_address}: {e}. Tip: Ensure no other process is using port {} or try a different port.",
                bind_address.port()
            );
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Failed to bind to socket address {bind_address}: {e}");
            std::process::exit(1);
        }
    };

    // This will give us the chosen port if the user specified a port of 0
    let actual_bind_address = listener
        .local_addr()
        .expect_pretty("Failed to get bind address from listener");

    tracing::info!("Study Gateway is listening on {actual_bind_address}");
    tracing::info!("├ Model: {}", config.model_name);
    if model_configured {
        tracing::info!("└ Credentials: configured");
    } else {
        tracing::info!("└ Credentials: missing (model-dependent endpoints will return errors)");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect_pretty("Failed to start server");
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect_pretty("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect_pretty("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM signal");
        }
    };
}

/// We don't allow panic, escape, unwrap, or similar methods in the codebase,
/// except for the private `expect_pretty` method, which is to be used only in
/// main.rs during initialization. After initialization, we expect all code to
/// handle errors gracefully.
///
/// `expect_pretty` will print an error message and exit with a status code of 1.
trait ExpectPretty<T> {
    fn expect_pretty(self, msg: &str) -> T;
}

impl<T, E: Display> ExpectPretty<T> for Result<T, E> {
    fn expect_pretty(self, msg: &str) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("{msg}: {err}");
                std::process::exit(1);
            }
        }
    }
}

impl<T> ExpectPretty<T> for Option<T> {
    fn expect_pretty(self, msg: &str) -> T {
        match self {
            Some(value) => value,
            None => {
                tracing::error!("{msg}");
                std::process::exit(1);
            }
        }
    }
}
