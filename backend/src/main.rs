//! DFS gateway CLI
//!
//! ```bash
//! dfs-gateway serve              # Start HTTP server (port 3000)
//! dfs-gateway serve --port 3100  # Custom port
//! dfs-gateway nodes              # Print the configured topology
//! dfs-gateway serve --topology cluster.json
//! ```
//!
//! `DFS_GATEWAY_PORT` (also read from `.env`) overrides the default port.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dfs_gateway::{server::start_server, GatewayResult, Topology, QUORUM_SIZE};

const DEFAULT_PORT: u16 = 3000;
const PORT_ENV: &str = "DFS_GATEWAY_PORT";

#[derive(Parser)]
#[command(name = "dfs-gateway")]
#[command(about = "Development gateway for the distributed file storage console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (default: $DFS_GATEWAY_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON layout file (default: three nodes on localhost)
        #[arg(short, long)]
        topology: Option<PathBuf>,
    },

    /// Print storage nodes and file primaries
    Nodes {
        /// JSON layout file (default: three nodes on localhost)
        #[arg(short, long)]
        topology: Option<PathBuf>,
    },
}

fn resolve_port(flag: Option<u16>) -> u16 {
    flag.or_else(|| std::env::var(PORT_ENV).ok()?.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

fn print_nodes(topology: &Topology) {
    println!("Storage nodes (quorum {}):", QUORUM_SIZE);
    for node in topology.servers() {
        println!("   {:<10} {}:{}", node.name, node.host, node.port);
    }
    println!();
    println!("File primaries:");
    for file in topology.files() {
        let primary = topology.primary_for(&file).map(|n| n.name.as_str()).unwrap_or("?");
        println!("   {:<10} → {}", file, primary);
    }
}

async fn run(command: Commands) -> GatewayResult<()> {
    match command {
        Commands::Serve { port, topology } => {
            let topology = Topology::load(topology.as_deref())?;
            start_server(resolve_port(port), topology).await
        }
        Commands::Nodes { topology } => {
            print_nodes(&Topology::load(topology.as_deref())?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
