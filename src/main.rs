// Entrypoint for the admin CLI.
// - Keeps `main` small: resolve settings, build the controller and runtime,
//   then hand everything to the menu loop.
// - Returns `anyhow::Result` so startup problems print with context.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use smartrelief_admin::{
    config::{load_settings, Overrides},
    controller::ViewController,
    ui::main_menu,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Terminal dashboard for the SmartRelief API")]
struct Args {
    /// API base URL; overrides `API_BASE` and the config file.
    #[arg(long)]
    api_base: Option<String>,
    /// Config file to read instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Ignore list responses that arrive after a newer refresh was applied.
    #[arg(long)]
    discard_stale_refreshes: bool,
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so they do not break the menu; quiet unless
    // RUST_LOG asks for more.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = load_settings(
        args.config.as_deref(),
        Overrides {
            api_base: args.api_base,
            discard_stale_refreshes: args.discard_stale_refreshes,
        },
    )?;
    tracing::info!(api_base = %settings.api_base, policy = ?settings.refresh_policy, "starting");

    let controller = ViewController::from_settings(&settings)
        .with_context(|| format!("Invalid API base {}", settings.api_base))?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build async runtime")?;

    // Blocks until the operator chooses "Exit".
    main_menu(&runtime, controller)?;
    Ok(())
}
