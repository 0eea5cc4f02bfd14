//! Command-line interface definitions.
//!
//! `serve` runs the HTTP API; `generate` drives one generation against a
//! running server and prints the panels.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::DEFAULT_PANEL_COUNT;
use crate::infrastructure::config::settings::DEFAULT_CONFIG_PATH;

/// Three-panel comic generator
#[derive(Parser, Debug)]
#[command(name = "comicforge")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),

    /// Generate a comic through a running server
    Generate(GenerateArgs),
}

/// Arguments for `comicforge serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Path to the configuration file (defaults apply when it does not exist)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override the listen host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the log filter (e.g. "debug", "comicforge=trace")
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for `comicforge generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Scenario for the comic, e.g. "in outer space"
    pub prompt: String,

    /// Base URL of the comicforge server
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    pub server: String,

    /// Panels the server's stories are expected to have
    #[arg(long, default_value_t = DEFAULT_PANEL_COUNT)]
    pub panels: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["comicforge", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(args.host.is_none());
        assert!(args.port.is_none());
        assert!(!args.json_logs);
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "comicforge",
            "serve",
            "--config",
            "custom.toml",
            "--host",
            "0.0.0.0",
            "-p",
            "8080",
            "--json-logs",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.config, PathBuf::from("custom.toml"));
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(8080));
        assert!(args.json_logs);
    }

    #[test]
    fn test_parse_generate() {
        let cli =
            Cli::try_parse_from(["comicforge", "generate", "in outer space", "-s", "http://x:1"])
                .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.prompt, "in outer space");
        assert_eq!(args.server, "http://x:1");
        assert_eq!(args.panels, DEFAULT_PANEL_COUNT);
    }

    #[test]
    fn test_generate_requires_prompt() {
        assert!(Cli::try_parse_from(["comicforge", "generate"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["comicforge", "generate", "x", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.color, ColorChoice::Auto));
    }

    #[test]
    fn test_parse_color_never() {
        let cli = Cli::try_parse_from(["comicforge", "--color", "never", "serve"]).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
    }
}
