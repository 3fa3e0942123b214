use clap::Parser;
use bigmove::config::Cli;
use bigmove::logging::init_logging;
use bigmove::{Config, ExitCode, MoverError};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let code = match run_cli(cli) {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<MoverError>().and_then(MoverError::hint) {
                Some(hint) => log::error!("{:#} ({})", err, hint),
                None => log::error!("{:#}", err),
            }
            ExitCode::Failure
        }
    };

    std::process::exit(code.as_i32());
}

fn run_cli(cli: Cli) -> anyhow::Result<ExitCode> {
    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli)?;
    log::debug!("bigmove v{}", bigmove::VERSION);

    let summary = bigmove::run(&config)?;
    Ok(summary.exit_code())
}
