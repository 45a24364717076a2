//! # mensa-mcp
//!
//! [MCP](https://modelcontextprotocol.io) server to query the canteens of
//! the Studentenwerk Dresden through their
//! [OpenMensa](https://openmensa.org) v2 compatible api.
//!
//! ## Tools
//!
//! - `list_canteens` lists all canteens with id, city, address and
//!   coordinates.
//! - `list_canteen_days` lists the days a canteen has published data for
//!   and whether it is open.
//! - `get_meals` shows the menu of a canteen, today unless a `date` like
//!   `2026-01-13` is given.
//!
//! Problems talking to the upstream service are reported as text
//! starting with `HTTP Error:`, everything else fails the tool call.
//!
//! ## Usage
//!
//! Register the binary as a stdio server with your MCP host:
//!
//! ```json
//! { "mcpServers": { "mensa": { "command": "mensa-mcp" } } }
//! ```
//!
//! See `mensa-mcp --help` for the available options.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use std::sync::Arc;

mod canteen;
mod config;
mod error;
mod meal;
mod registry;
mod report;
mod request;
mod server;
mod tools;

use crate::{
    config::Config,
    error::Result,
    request::{ApiClient, ReqwestApi},
    tools::{LocalClock, Tools},
};

#[tokio::main]
async fn main() -> Result<()> {
    let res = real_main().await;
    match res {
        Ok(_) => {}
        Err(ref why) => error!("{}", why),
    }
    res
}

async fn real_main() -> Result<()> {
    // Initialize logger, stdout belongs to the protocol
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let config = Config::from_args();
    info!("Serving canteens from {}", config.base_url());
    let client = ApiClient::new(ReqwestApi, config.base_url(), config.timeout());
    let tools = Arc::new(Tools::new(client, LocalClock));
    let registry = Arc::new(registry::canteen_tools(tools));
    server::serve(registry, tokio::io::stdin(), tokio::io::stdout()).await
}
