use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{batch::BatchArgs, route::RouteArgs};

mod batch;
mod file_utils;
mod output;
mod parsers;
mod route;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Routing config file, HERMES_* environment variables take precedence
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Routes from the first point to every other point
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    /// Runs every request of a file or folder
    Batch {
        #[command(flatten)]
        args: BatchArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = hermes_one_to_many::config::RoutingConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Route { args }) => route::run(args, config)?,
        Some(Commands::Batch { args }) => batch::run(args, config)?,
        None => {}
    }

    Ok(())
}
