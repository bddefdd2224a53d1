use std::process::ExitCode;

use clap::Parser;
use topic_mcq::{
    app_state::AppState,
    cli::{Cli, Command},
    config::Config,
    errors::AppResult,
    handlers::{self, TerminalPrompt},
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Exiting with {}", e.error_code());
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = cli.apply(Config::from_env());
    if cli.needs_generator() {
        config.validate()?;
    }

    let mut state = AppState::new(&config)?;

    match &cli.command {
        Command::Generate(args) => handlers::generate(&mut state, args).await,
        Command::Quiz(args) => {
            let mut prompt = TerminalPrompt::new();
            if handlers::quiz(&mut state, args, &mut prompt).await?.is_none() {
                println!("Test not started.");
            }
            Ok(())
        }
    }
}
