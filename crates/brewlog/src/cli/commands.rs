//! # CLI Layer
//!
//! The only place in the codebase that reads arguments, writes to stdout or
//! stderr, and decides exit codes.
//!
//! 1. **Argument parsing**: shell arguments become typed commands via clap
//! 2. **Context setup**: config, logging, data directory and API
//! 3. **Dispatch**: each command calls one API method
//! 4. **Output**: the `CmdResult` is rendered as text or JSON

use super::render::{self, View};
use super::setup::{Cli, Commands, OutputMode, StageCommands};
use anyhow::Result;
use brewlogapp::api::BrewlogApi;
use brewlogapp::commands::{BatchEdit, CmdResult};
use brewlogapp::config::BrewlogConfig;
use brewlogapp::init::{config_path, initialize};
use clap::Parser;
use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "brewlogapp=debug,brewlog=debug,info";

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = BrewlogConfig::load_from(&config_path()?)?;
    init_tracing(&config, cli.verbose);

    let ctx = initialize(config, cli.data.clone())?;
    ctx.api.activate().await;

    let command = cli.command.clone().unwrap_or(Commands::List);
    tracing::debug!(?command, data_dir = %ctx.data_dir.display(), "dispatching");
    let outcome = dispatch(&ctx.api, command);

    // Writes run in the background; let them land before the process exits
    ctx.api.settle().await;
    let (view, result) = outcome?;

    let unit = ctx.api.preference_store().unit();
    let output = match cli.output {
        OutputMode::Json => serde_json::to_string_pretty(&result)? + "\n",
        OutputMode::Text => render::render(view, &result, unit),
    };
    print!("{}", output);
    Ok(())
}

fn init_tracing(config: &BrewlogConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn dispatch(api: &BrewlogApi, command: Commands) -> brewlogapp::error::Result<(View, CmdResult)> {
    let outcome = match command {
        Commands::List => (View::List, api.list_batches()?),
        Commands::Show { id } => (View::Detail, api.show_batch(&id)?),
        Commands::Create {
            name,
            quantity,
            description,
        } => (
            View::Detail,
            api.create_batch(&name, &quantity, description.as_deref())?,
        ),
        Commands::Edit {
            id,
            name,
            quantity,
            description,
        } => {
            let edit = BatchEdit {
                name,
                quantity,
                description,
            };
            (View::Detail, api.edit_batch(&id, &edit)?)
        }
        Commands::Delete { id } => (View::Messages, api.delete_batch(&id)?),
        Commands::Stage { action } => match action {
            StageCommands::Add {
                batch,
                description,
                date,
            } => (View::Messages, api.add_stage(&batch, &description, &date)?),
            StageCommands::Remove { batch, stage } => {
                (View::Messages, api.remove_stage(&batch, &stage)?)
            }
        },
        Commands::Calendar { date: Some(date) } => (View::Day, api.stages_on(&date)?),
        Commands::Calendar { date: None } => (View::MarkedDates, api.marked_dates()?),
        Commands::Unit { unit: Some(token) } => (View::Messages, api.set_volume_unit(&token)?),
        Commands::Unit { unit: None } => (View::Unit, api.volume_unit()?),
    };
    Ok(outcome)
}
