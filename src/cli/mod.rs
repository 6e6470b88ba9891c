//! CLI module

pub mod serve;

use clap::{Parser, Subcommand};

/// Cost-aware LLM proxy with complexity routing and two-tier response caching
#[derive(Parser)]
#[command(name = "llm-cost-firewall")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the proxy server
    Serve,
}
