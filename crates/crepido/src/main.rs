//! Crepido CLI - Markdown project boards.
//!
//! Provides commands for:
//! - `serve`: Start the board server
//! - `render`: Render a single board to HTML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, ServeArgs};
use output::Output;

/// Crepido - Markdown project boards.
#[derive(Parser)]
#[command(name = "crepido", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the board server.
    Serve(ServeArgs),
    /// Render a board file to HTML.
    Render(RenderArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            rt.block_on(args.execute())
        }
        Commands::Render(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["crepido", "serve", "-p", "8080", "-v"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve(args) if args.verbose));
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["crepido", "render", "sprint.md", "-o", "out.html"]).unwrap();
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_render_requires_file() {
        assert!(Cli::try_parse_from(["crepido", "render"]).is_err());
    }
}
