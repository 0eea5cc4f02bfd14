use clap::Parser;

use comicforge::adapter::inbound::cli::command::{Cli, Commands};
use comicforge::adapter::inbound::cli::output::{self, OutputConfig};
use comicforge::adapter::inbound::cli::{generate, serve};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    output::apply_color(cli.color);
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let result = match &cli.command {
        Commands::Serve(args) => serve::execute(args).await,
        Commands::Generate(args) => generate::execute(args).await,
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
