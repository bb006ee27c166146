//! saveus-settings CLI entry point.

use clap::Parser;

use saveus_settings::cli::{commands, Cli, Commands};
use saveus_settings::LoggerImpl;

fn main() {
    let cli = Cli::parse();

    let logger = match LoggerImpl::init(&cli.log_config()) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            None
        }
    };

    let ctx = cli.context();
    let result = match cli.command {
        Commands::Show(args) => commands::show::execute(args, &ctx),
        Commands::Check(args) => commands::check::execute(args, &ctx),
        Commands::Secrets(args) => commands::secrets::execute(args, &ctx),
    };

    if let Err(err) = result {
        // flush buffered file output before exiting
        drop(logger);
        saveus_settings::cli::handle_error(err, ctx.json);
    }
}
