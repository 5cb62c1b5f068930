//! swc - Swift object storage client
//!
//! A command-line interface for OpenStack Swift. Logs go to stderr so that
//! `swc cat` output on stdout stays byte-exact.

use clap::Parser;
use swc_cli::commands::{self, Cli};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("swc_core=debug,swc_swift=debug,swc_cli=debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
