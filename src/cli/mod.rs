//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "nerkit",
    version,
    about = "Named entity extraction from the command line",
    long_about = "nerkit loads an NER model by name and prints the entities it finds, one \
                  \"<text> <label>\" line per entity. Without a subcommand it runs the built-in \
                  example sentences."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/nerkit/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Model to load, overriding the config
    #[arg(short, long, global = true, value_name = "NAME")]
    pub model: Option<String>,

    /// Directory holding <name>.toml model definitions
    #[arg(long, global = true, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print entities for the built-in example sentences
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Extract entities from text, a file, or standard input
    Extract {
        /// Text to analyze (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Only print entities with this label
        #[arg(short, long)]
        label: Option<String>,

        /// Print the distinct labels found instead of the entities
        #[arg(long, conflicts_with = "label")]
        labels: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List installed models
    Models,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct OutputArgs {
    /// Print JSON instead of text lines
    #[arg(long)]
    pub json: bool,

    /// Append character offsets to each line
    #[arg(long)]
    pub offsets: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
