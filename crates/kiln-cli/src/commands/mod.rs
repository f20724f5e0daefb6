//! Command implementations.

mod check;
mod config;
mod emit;
mod schema;
mod serve;
mod utils;

pub use check::execute as check_execute;
pub use config::execute as config_execute;
pub use emit::execute as emit_execute;
pub use schema::execute as schema_execute;
pub use serve::execute as serve_execute;
pub use utils::{load_layout, resolve_mode};

use crate::cli::{Cli, Command};
use crate::error::Result;

/// Run the command selected on the command line.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        mode: raw_mode,
        root,
        config,
        command,
        ..
    } = cli;

    // Only commands that depend on the mode resolve (and warn about) it.
    let mode = || resolve_mode(raw_mode.as_deref());
    let layout = || load_layout(&root, config.as_deref());

    match command {
        Command::Config(args) => config_execute(args, mode(), &layout()?),
        Command::Check(args) => check_execute(args, &layout()?),
        Command::Emit(args) => emit_execute(args, mode(), &layout()?),
        Command::Serve(args) => serve_execute(args, mode(), &layout()?).await,
        Command::Schema(args) => schema_execute(args),
    }
}
