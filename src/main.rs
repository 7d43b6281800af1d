use anyhow::Result;
use spygen::cli::{Cli, Commands};
use spygen::commands::{GenerateConfig, InspectConfig};
use spygen::observability::{init_logging, install_panic_hook};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = spygen::cli::parse_args();
    init_logging(cli.verbosity);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            file,
            output,
            force_portable_lock,
            config,
            item,
        } => spygen::commands::generate(GenerateConfig {
            file,
            output,
            force_portable_lock,
            config,
            item,
        }),
        Commands::Inspect {
            file,
            format,
            item,
            config,
        } => spygen::commands::inspect(InspectConfig {
            file,
            format,
            item,
            config,
        }),
        Commands::Init { force } => spygen::commands::init_config(force),
    }
}
