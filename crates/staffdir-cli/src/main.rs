//! Staff directory console.
//!
//! Provides the `staffdir` binary: a numbered menu for viewing, adding,
//! updating and deleting departments, roles and employees in a SQLite
//! database. Uses the same `Directory` operations as the HTTP server, so
//! both entry points enforce identical integrity rules.

mod menu;
mod prompt;
mod table;

use std::io;

use anyhow::Context;
use clap::Parser;

use staffdir_directory::Directory;
use staffdir_storage::SqliteStore;

use crate::menu::Menu;
use crate::prompt::TerminalPrompt;

/// Interactive staff directory.
#[derive(Debug, Parser)]
#[command(name = "staffdir", about = "Manage departments, roles and employees")]
struct Cli {
    /// Path to the directory database file.
    #[arg(short, long, default_value = "staffdir.db")]
    db: String,

    /// Verbosity (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn setup_logging(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.setup_logging();

    let store = SqliteStore::new(&cli.db)
        .with_context(|| format!("failed to open database '{}'", cli.db))?;
    tracing::info!(db = %cli.db, "database opened");

    let mut menu = Menu::new(Directory::new(store), TerminalPrompt, io::stdout());
    menu.run().context("console session ended unexpectedly")?;
    Ok(())
}
