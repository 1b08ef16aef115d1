use std::io::Write;

use clap::Parser;
use log::LevelFilter;

use mcmanager::{
    Res,
    args::Cli,
    cli::{self, Outcome},
    config::Config,
    credentials::TerminalPrompter,
    fatal,
    mangacat::ApiClient,
    success,
};

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

// The HTTP session lives exactly as long as this call.
async fn run(cli: &Cli, config: &Config) -> Res<Outcome> {
    let client = ApiClient::new(config)?;
    cli::dispatch(&cli.command, config, &client, &mut TerminalPrompter).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = Config::from_env();

    match run(&cli, &config).await {
        Ok(outcome) => {
            if let Some(message) = &outcome.message {
                success!("{}", message);
            }
            std::process::exit(outcome.code);
        }
        Err(e) => fatal!(e.exit_code(), "{}", e),
    }
}
