// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, set up logging, build the API client
//   and dispatch to the chosen front end.
// - Returns `anyhow::Result` so any failed call exits non-zero.

use anyhow::Context;
use clap::Parser;
use lut_cli::config::{Args, Commands};
use lut_cli::ui::{main_menu, print_reply};
use lut_cli::{script, telemetry};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    telemetry::init_tracing(args.verbose);

    let api = args.client()?;
    tracing::debug!(base_url = api.base_url(), "client ready");

    match args.command() {
        Commands::Demo => {
            let lut_name = args.lut_name.as_deref().unwrap_or(script::DEFAULT_LUT_NAME);
            script::run(&api, lut_name)?;
        }
        Commands::Ui => main_menu(&api, args.lut_name.clone())?,
        Commands::Generate { prompt, length } => {
            let reply = api
                .generate(&prompt, length, args.lut_name.as_deref())
                .context("Generate request failed")?;
            print_reply(&reply);
        }
        Commands::Train { label, context } => {
            let reply = api
                .train_lut(&label, args.lut_name.as_deref(), context.as_deref())
                .context("Train request failed")?;
            print_reply(&reply);
        }
    }
    Ok(())
}
