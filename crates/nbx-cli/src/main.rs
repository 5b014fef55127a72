use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod discover;
mod output;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("nb-crossref error: {error:#}");
            std::process::exit(1);
        }
    }
}

/// Returns whether the command passed; `false` maps to exit status 1.
fn run() -> anyhow::Result<bool> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if let Some(cli::Commands::Hook { action }) = &cli.command {
        if !cli.files.is_empty() {
            anyhow::bail!("files cannot be combined with the hook subcommand");
        }
        return commands::hook::handle(action, &flags);
    }

    let config = bootstrap::load_config(&flags)?;
    commands::rewrite::handle(&cli.files, cli.check, &config, &flags)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("NB_CROSSREF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
