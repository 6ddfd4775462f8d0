use clap::Parser;
use chordsheet::cli::commands::Cli;
use chordsheet::cli::handlers;

fn main() {
    let cli = Cli::parse();

    // -v raises the default level; RUST_LOG still wins
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
