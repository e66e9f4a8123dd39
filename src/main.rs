// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-FigmaMcpRelay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of figma-mcp-relay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! figma-mcp-relay CLI entrypoint.
//!
//! By default this serves MCP over stdio and the plugin endpoints over HTTP at
//! `http://127.0.0.1:<port>/plugin/...`.
//!
//! Use `--mcp-http` to serve MCP over streamable HTTP at `/mcp` on the same listener instead.

use std::error::Error;
use std::sync::Arc;

use figma_mcp_relay::config::RelayConfig;
use figma_mcp_relay::http::build_router;
use figma_mcp_relay::mcp::FigmaRelayMcp;
use figma_mcp_relay::relay::Relay;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--host <addr>] [--port <port>]\n  {program} [--host <addr>] [--port <port>] --mcp-http\n\nDefault mode serves MCP over stdio and the Figma plugin endpoints over HTTP.\n--mcp-http serves MCP over streamable HTTP at `http://<addr>:<port>/mcp` instead of stdio.\n\n--host and --port override the HOST and PORT environment variables (default 127.0.0.1:3000).\nLog verbosity follows RUST_LOG (default `info`); logs go to stderr."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    mcp_http: bool,
    host: Option<String>,
    port: Option<u16>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mcp-http" => {
                if options.mcp_http {
                    return Err(());
                }
                options.mcp_http = true;
            }
            "--host" => {
                if options.host.is_some() {
                    return Err(());
                }
                let host = args.next().ok_or(())?;
                if host.trim().is_empty() {
                    return Err(());
                }
                options.host = Some(host);
            }
            "--port" => {
                if options.port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.port = Some(port);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn init_tracing() {
    // stdout carries the stdio MCP transport, so logs must stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn serve_with_stdio_mcp(
    listener: TcpListener,
    relay: Arc<Relay>,
) -> Result<(), Box<dyn Error>> {
    let router = build_router(relay.clone());
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server_handle = tokio::spawn(async move {
        let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        if let Err(err) = serve.await {
            error!(error = %err, "plugin HTTP server error");
        }
    });

    let mcp = FigmaRelayMcp::new(relay);
    let outcome = tokio::select! {
        result = mcp.serve_stdio() => {
            info!("MCP stdio session ended");
            result.map_err(|err| -> Box<dyn Error> { Box::new(err) })
        }
        signal = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
            signal.map_err(|err| -> Box<dyn Error> { Box::new(err) })
        }
    };

    let _ = shutdown_tx.send(());
    let _ = server_handle.await;
    outcome
}

async fn serve_with_http_mcp(
    listener: TcpListener,
    relay: Arc<Relay>,
) -> Result<(), Box<dyn Error>> {
    let config = StreamableHttpServerConfig {
        stateful_mode: true,
        ..StreamableHttpServerConfig::default()
    };
    let shutdown_token = config.cancellation_token.clone();
    let server_shutdown = shutdown_token.clone();

    let session_manager = Arc::new(LocalSessionManager::default());
    let mcp_service = {
        let mcp = FigmaRelayMcp::new(relay.clone());
        StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config)
    };

    let router = build_router(relay).nest_service("/mcp", mcp_service);
    let server_handle = tokio::spawn(async move {
        let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
            server_shutdown.cancelled().await;
        });
        serve.await
    });

    let signal = tokio::signal::ctrl_c().await;
    info!("shutdown requested");
    shutdown_token.cancel();

    server_handle.await??;
    signal?;
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "figma-mcp-relay".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        let config = RelayConfig::from_env()?
            .with_host(options.host)
            .with_port(options.port);
        let relay = Arc::new(Relay::new());

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let listener = TcpListener::bind(config.bind_addr()).await?;
            let local_addr = listener.local_addr()?;

            if options.mcp_http {
                info!(addr = %local_addr, "serving plugin endpoints and MCP at /mcp");
                serve_with_http_mcp(listener, relay).await
            } else {
                info!(addr = %local_addr, "serving plugin endpoints; MCP on stdio");
                serve_with_stdio_mcp(listener, relay).await
            }
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("figma-mcp-relay: {err}");
        std::process::exit(1);
    }
}
