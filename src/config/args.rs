use structopt::StructOpt;

/// MCP server answering questions about canteens, their opening days
/// and menus.
///
/// Requests are read from stdin and answered on stdout, one JSON-RPC
/// message per line. Logs go to stderr, see `RUST_LOG`.
#[derive(Debug, StructOpt)]
#[structopt(name = "mensa-mcp")]
pub struct Args {
    /// Base url of the OpenMensa v2 compatible api.
    #[structopt(
        long,
        env = "MENSA_MCP_BASE_URL",
        default_value = "https://api.studentenwerk-dresden.de/openmensa/v2"
    )]
    pub base_url: String,

    /// Timeout for a single upstream request in seconds.
    #[structopt(long, env = "MENSA_MCP_TIMEOUT", default_value = "30")]
    pub timeout: u64,
}
