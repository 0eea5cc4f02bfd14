//! Handler for the `serve` command.

use tokio::net::TcpListener;
use tracing::info;

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::http;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_app_state;
use crate::infrastructure::config::settings::Config;

/// Execute the serve command.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let _ = dotenvy::dotenv();

    let mut config = Config::load_or_default(&args.config)?;
    apply_overrides(&mut config, args, output::verbosity());
    config.validate()?;
    config.init_logging();

    let styled_output = !config.logging.is_json();
    if styled_output {
        print_startup(&config);
    }

    let state = build_app_state(&config)?;
    let listener = TcpListener::bind(config.server.address()).await?;
    info!(
        llm = %config.llm.model,
        image = %config.image.model,
        "comicforge starting"
    );

    http::serve(listener, state, shutdown_signal()).await
}

fn apply_overrides(config: &mut Config, args: &ServeArgs, verbosity: u8) {
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    match (&args.log_level, verbosity) {
        (Some(level), _) => config.logging.level.clone_from(level),
        (None, 0) => {}
        (None, 1) => config.logging.level = "debug".to_string(),
        (None, _) => config.logging.level = "trace".to_string(),
    }
    if args.json_logs || output::is_json() {
        config.logging.format = "json".to_string();
    }
}

fn print_startup(config: &Config) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Listen", config.server.address());
    output::field("Story", &config.llm.model);
    output::field("Images", &config.image.model);
    if output::verbosity() > 0 {
        output::field("Panels", config.story.panel_count);
        output::field("Character", &config.story.character_name);
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
