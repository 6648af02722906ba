use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use conjure::cli::{Cli, Commands};
use conjure::vault::Secret;

fn main() {
    let cli = Cli::parse();

    // CONJURE_LOG overrides the verbosity flag.
    let filter = EnvFilter::try_from_env("CONJURE_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("conjure=debug")
        } else {
            EnvFilter::new("conjure=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    let result = match cli.command {
        Commands::List => conjure::cli::commands::list::execute(&cli),
        Commands::Get { ref name } => conjure::cli::commands::get::execute(&cli, name),
        Commands::Set {
            ref name,
            ref username,
            ref password,
            ref url,
            ref email,
            ref notes,
        } => {
            let secret = Secret::new(name, username, password, url, email, notes);
            conjure::cli::commands::set::execute(&cli, secret)
        }
        Commands::Delete { ref name } => conjure::cli::commands::delete::execute(&cli, name),
    };

    if let Err(e) = result {
        conjure::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
