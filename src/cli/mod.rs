// CLI module for gemlens
// Author: kelexine (https://github.com/kelexine)

use crate::analysis::Language;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// gemlens - Structured, multi-facet image analysis powered by Gemini
#[derive(Parser, Debug)]
#[command(name = "gemlens", version, about, long_about = None)]
pub struct Args {
    /// Config file (default: ~/.gemlens/config.toml)
    #[arg(long, global = true, env = "GEMLENS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one image file and print the result
    Analyze {
        /// Image to analyze (JPEG, PNG, WebP, GIF, HEIC, HEIF)
        path: PathBuf,

        /// Language for every string in the result, e.g. English or Armenian
        #[arg(short, long)]
        language: Option<Language>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Serve the analysis HTTP API
    Serve {
        /// Bind address (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable sections
    Text,
    /// The raw analysis JSON
    Json,
}
