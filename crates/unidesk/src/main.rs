mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use unidesk_core::Controller;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    let cfg = unidesk_config::load_config_or_default();
    cli.global.output = Some(config::output_format(&cli.global, &cfg));

    match cli.command {
        // Config commands never contact the backend
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global, cfg),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "unidesk", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let client_config = if matches!(cmd, Command::Advisor(_)) {
                config::advisor_client_config(&cli.global, &cfg)?
            } else {
                config::client_config(&cli.global, &cfg)?
            };
            let controller = Controller::new(client_config)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &controller, &cli.global).await
        }
    }
}
