use anyhow::Context;
use binance_mcp::binance::BinanceClient;
use binance_mcp::config::{Credentials, ExchangeConfig};
use binance_mcp::tools::ToolDispatcher;
use binance_mcp::transport::TransportMode;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first to determine mode
    let args: Vec<String> = std::env::args().collect();
    let (mode, port) = parse_args(&args);

    // stdout is reserved for the MCP protocol in stdio mode
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Binance MCP server in {} mode...", mode);

    let dispatcher = match build_dispatcher() {
        Ok(dispatcher) => dispatcher,
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    };

    match mode {
        TransportMode::Stdio => run_stdio_server(dispatcher).await?,
        TransportMode::Http => run_http_server(dispatcher, port).await?,
    }

    Ok(())
}

/// Loads configuration and builds the dispatcher; fails before any network call
fn build_dispatcher() -> anyhow::Result<ToolDispatcher> {
    let credentials = Credentials::from_env().context("Failed to load Binance credentials")?;
    let config = ExchangeConfig::from_env().context("Failed to load exchange configuration")?;

    tracing::info!(base_url = %config.base_url, "Binance client configured");
    tracing::debug!(api_key = %credentials.api_key, "Using API key");

    let client = BinanceClient::new(config, credentials)?;
    Ok(ToolDispatcher::new(client))
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> (TransportMode, Option<u16>) {
    let mut mode = TransportMode::default();
    let mut port = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                let Some(value) = args.get(i + 1) else {
                    exit_with_usage("--mode requires a value");
                };
                mode = value.parse().unwrap_or_else(|e: String| exit_with_usage(&e));
                i += 1;
            }
            "--http" => mode = TransportMode::Http,
            "--stdio" => mode = TransportMode::Stdio,
            "--port" => {
                let Some(value) = args.get(i + 1) else {
                    exit_with_usage("--port requires a value");
                };
                match value.parse::<u16>() {
                    Ok(p) if p != 0 => port = Some(p),
                    _ => exit_with_usage(&format!("Invalid port: {}", value)),
                }
                i += 1;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => exit_with_usage(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    (mode, port)
}

fn exit_with_usage(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    std::process::exit(1);
}

/// Print usage information
fn print_usage() {
    println!("Binance MCP - Model Context Protocol tools for the Binance spot exchange");
    println!();
    println!("USAGE:");
    println!("    binance-mcp [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --mode <MODE>       Transport mode: stdio or http (default: stdio)");
    println!("    --stdio             Run in stdio MCP mode (shortcut for --mode stdio)");
    println!("    --http              Run in HTTP mode (shortcut for --mode http)");
    println!("    --port <PORT>       HTTP port (overrides HTTP_PORT, default: 3000)");
    println!("    --help, -h          Print this help message");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    BINANCE_API_KEY             Binance API key (required)");
    println!("    BINANCE_SECRET_KEY          Binance secret key (required)");
    println!("    BINANCE_BASE_URL            Binance API base URL");
    println!("                                (default: https://api.binance.com)");
    println!("    BINANCE_HTTP_TIMEOUT_SECS   Request timeout in seconds (default: none)");
    println!("    HTTP_HOST                   HTTP bind address (default: 127.0.0.1)");
    println!("    HTTP_PORT                   HTTP port (default: 3000)");
    println!("    HTTP_MAX_SESSIONS           Max concurrent HTTP sessions (default: 50)");
    println!("    RUST_LOG                    Logging level (default: info)");
    println!();
    println!("EXAMPLES:");
    println!("    # Start in stdio mode");
    println!("    binance-mcp");
    println!();
    println!("    # Start HTTP server on custom port");
    println!("    binance-mcp --mode http --port 8080");
    println!();
    println!("    # Use the spot testnet");
    println!("    BINANCE_BASE_URL=https://testnet.binance.vision binance-mcp --stdio");
}

/// Run the server in stdio MCP mode
#[cfg(feature = "mcp_server")]
async fn run_stdio_server(dispatcher: ToolDispatcher) -> anyhow::Result<()> {
    binance_mcp::transport::stdio::run_stdio_server(dispatcher).await
}

#[cfg(not(feature = "mcp_server"))]
async fn run_stdio_server(_dispatcher: ToolDispatcher) -> anyhow::Result<()> {
    anyhow::bail!("stdio mode not available - compile with 'mcp_server' feature")
}

/// Run the server in HTTP mode
#[cfg(feature = "http_transport")]
async fn run_http_server(dispatcher: ToolDispatcher, port: Option<u16>) -> anyhow::Result<()> {
    let mut config = binance_mcp::config::HttpConfig::from_env()?;
    if let Some(port) = port {
        config = config.with_port(port);
    }

    binance_mcp::transport::http::start_http_server(config, dispatcher).await
}

#[cfg(not(feature = "http_transport"))]
async fn run_http_server(_dispatcher: ToolDispatcher, _port: Option<u16>) -> anyhow::Result<()> {
    anyhow::bail!("HTTP transport not available - compile with 'http_transport' feature")
}
