use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spygen")]
#[command(about = "Generate spy test doubles for Rust traits", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand every `#[spy]` trait in a file into spy source
    Generate {
        /// Rust source file containing the decorated traits
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit only the portable lock declaration for thread-safe spies
        #[arg(long = "force-portable-lock", env = "SPYGEN_FORCE_PORTABLE_LOCK")]
        force_portable_lock: bool,

        /// Configuration file (defaults to the nearest .spygen.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Expand only the item with this name
        #[arg(long)]
        item: Option<String>,
    },

    /// Print the extracted model of each `#[spy]` trait
    Inspect {
        /// Rust source file containing the decorated traits
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: InspectFormat,

        /// Inspect only the item with this name
        #[arg(long)]
        item: Option<String>,

        /// Configuration file (defaults to the nearest .spygen.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Initialize a spygen configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InspectFormat {
    Json,
    Yaml,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
