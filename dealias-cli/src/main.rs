//! Main entry point for the dealias CLI.
//!
//! `dealias <FOLDER>` walks the folder, converts every Finder alias file
//! in it to a symbolic link, and prints a tally of conversions. Each
//! converted alias is kept as a hidden `.<name>.backup` file next to the
//! new symlink.

mod cli;
mod error;
mod output;

use clap::Parser;
use cli::Cli;
use dealias::{ConvertOptions, Converter};
use error::CliError;

fn main() {
    let cli = Cli::parse();
    let logger = dealias::init_logger(cli.verbose, cli.quiet);

    match run(&cli, logger) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli, logger: dealias::Logger) -> Result<(), CliError> {
    let options = ConvertOptions {
        recursive: !cli.no_recursive,
    };
    let converter = Converter::new(options, logger);

    let tally = converter.convert(&cli.folder)?;
    print!("{}", output::format_tally(cli.format, &tally)?);
    Ok(())
}
