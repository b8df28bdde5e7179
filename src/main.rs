//! CirrusNet - Cloud orchestrator wire protocol and node console
//!
//! The binary hosts the interactive node console plus small utilities
//! around the wire codec (packet decoding, configuration management).

mod bootstrap;
mod config;
mod console;
mod protocol;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use console::Console;

/// CirrusNet - Cloud orchestrator wire protocol and node console
#[derive(Parser)]
#[command(name = "cirrusnet")]
#[command(author = "CirrusNet Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Wire protocol tools and node console for Cirrus", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive node console
    Console,

    /// Decode a hex-encoded packet and print its contents
    Decode {
        /// Packet bytes as a hex string
        hex: String,
    },

    /// Show current configuration
    Config {
        /// Generate sample configuration
        #[arg(long)]
        generate: bool,

        /// Output path for generated config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show node and protocol information
    Info,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        Config::load(config_path)?
    } else {
        Config::load_default().unwrap_or_default()
    };

    match cli.command {
        Commands::Console => {
            let mut console = Console::new(config, cli.config);
            console.run()?;
        }

        Commands::Decode { hex } => {
            let dump = console::decode_packet_dump(&hex, &config.protocol.wire_limits())?;
            println!("{dump}");
        }

        Commands::Config { generate, output } => {
            if generate {
                let sample = config::generate_sample_config();
                match output {
                    Some(path) => {
                        std::fs::write(&path, sample)?;
                        println!("Sample configuration written to {}", path.display());
                    }
                    None => println!("{sample}"),
                }
            } else {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }

        Commands::Info => {
            println!("cirrusnet {}", env!("CARGO_PKG_VERSION"));
            println!("protocol version: {}", protocol::PROTOCOL_VERSION);
            println!("node name: {}", config.general.name);
            if let Some(path) = config::default_config_path() {
                println!("default config: {}", path.display());
            }
            println!("launcher artifacts:");
            for artifact in bootstrap::Artifact::all() {
                println!("  {artifact}");
            }
        }
    }

    Ok(())
}
