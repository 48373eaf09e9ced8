use clap::Parser;
use std::process::ExitCode;

use depbump::{Result, cli::Args, config, workflow::Outcome};

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("depbump")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

async fn run(args: Args) -> Result<Outcome> {
    color_eyre::install()?;

    initialize_logger(args.debug)?;

    if let Some(path) = config::load_env_file()? {
        log::debug!("loaded environment from {}", path.display());
    }

    depbump::run(&args).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = Args::parse();

    match run(cli_args).await {
        Ok(outcome) => {
            println!("package.json updated successfully.");
            if !outcome.pull_request.link.is_empty() {
                println!("{}", outcome.pull_request.link);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to update package.json, error: \n{}", err.summary());
            ExitCode::FAILURE
        }
    }
}
