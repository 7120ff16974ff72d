//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = canvass_cli::run() {
        eprintln!("canvass: {err}");
        std::process::exit(err.exit_code());
    }
}
