//! Command dispatch and handler modules.

mod archives;
mod bundle;
mod check;
mod clean;
mod exclude;
mod init;
mod new;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::New { name } => new::exec(&name),
        Command::Init => init::exec(),
        Command::Bundle {
            build_type,
            output,
            quiet,
        } => bundle::exec(build_type.as_deref(), output, quiet, cli.verbose).await,
        Command::Check => check::exec(cli.verbose).await,
        Command::Archives => archives::exec().await,
        Command::Exclude { action } => exclude::exec(action),
        Command::Clean => clean::exec(),
    }
}
