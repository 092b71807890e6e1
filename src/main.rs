//! Memory server binary.
//!
//! Run with `simple-memory --stdio` for MCP, `simple-memory --http 127.0.0.1:5000`
//! for the REST API, or both at once to share one store between them.

use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use simple_memory::{api, Dispatcher, McpServer, MemoryStore};
use tracing_subscriber::EnvFilter;

/// In-memory key/value store served over REST and MCP.
///
/// Both transports share a single store. Nothing is persisted.
#[derive(Parser)]
#[command(name = "simple-memory")]
#[command(version, about, long_about = None)]
struct Args {
    /// Serve the REST API on this address (e.g. 127.0.0.1:5000).
    #[arg(long, value_name = "ADDR", env = "SIMPLE_MEMORY_HTTP")]
    http: Option<SocketAddr>,

    /// Serve MCP (JSON-RPC 2.0) over stdin/stdout.
    #[arg(long)]
    stdio: bool,

    /// Enable debug logging to stderr.
    #[arg(long, short)]
    verbose: bool,
}

/// Log to stderr so stdout stays reserved for MCP responses.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "simple_memory=debug,tower_http=debug"
    } else {
        "simple_memory=info,tower_http=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    // One store for the whole process, shared by every transport.
    let dispatcher = Dispatcher::new(Arc::new(MemoryStore::new()));

    match (args.http, args.stdio) {
        (None, false) => {
            eprintln!("Error: Must specify --http <ADDR>, --stdio, or both");
            ExitCode::FAILURE
        }

        (Some(addr), false) => {
            let listener = match api::bind(addr).await {
                Ok(listener) => listener,
                Err(e) => {
                    eprintln!("Error: Failed to bind API server on {}: {}", addr, e);
                    return ExitCode::FAILURE;
                }
            };
            match api::serve(listener, dispatcher, shutdown_signal()).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: API server error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }

        (http, true) => {
            if let Some(addr) = http {
                let listener = match api::bind(addr).await {
                    Ok(listener) => listener,
                    Err(e) => {
                        eprintln!("Error: Failed to bind API server on {}: {}", addr, e);
                        return ExitCode::FAILURE;
                    }
                };
                let api_dispatcher = dispatcher.clone();
                tokio::spawn(async move {
                    // The MCP loop decides when the process ends.
                    if let Err(e) =
                        api::serve(listener, api_dispatcher, std::future::pending::<()>()).await
                    {
                        tracing::error!(error = %e, "API server stopped");
                    }
                });
            }

            let server = McpServer::new(dispatcher);
            match server.run().await {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: Server error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
