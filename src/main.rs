use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tower_lsp::{LspService, Server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use bamc_lsp::lsp::catalog;
use bamc_lsp::server::Backend;

#[derive(Debug, Parser)]
#[command(name = "bamc-lsp", about = "Language server for BAMC/BAMM scripts", version)]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Ignored. Accepted because editors pass it; stdin/stdout is the only transport.
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        // stdout carries the protocol; logs go to stderr as plain text.
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    catalog::validate().context("built-in catalogs are inconsistent")?;
    info!(
        commands = catalog::commands().len(),
        version = env!("CARGO_PKG_VERSION"),
        stdio_flag = cli.stdio,
        "bamc-lsp starting on stdio"
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    info!("bamc-lsp exiting");
    Ok(())
}

fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "bamc_lsp=info,tower_lsp=warn",
        1 => "bamc_lsp=debug,tower_lsp=info",
        _ => "bamc_lsp=trace,tower_lsp=debug",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_defaults() {
        assert_eq!(directive_for_verbosity(0), "bamc_lsp=info,tower_lsp=warn");
        assert_eq!(directive_for_verbosity(1), "bamc_lsp=debug,tower_lsp=info");
        assert_eq!(directive_for_verbosity(5), "bamc_lsp=trace,tower_lsp=debug");
    }

    #[test]
    fn cli_accepts_stdio_and_verbosity() {
        let cli = Cli::try_parse_from(["bamc-lsp", "--stdio", "-vv"]).unwrap();
        assert!(cli.stdio);
        assert_eq!(cli.verbose, 2);
    }
}
