//! Exclude command implementation.

use miette::Result;

use crate::cli::ExcludeAction;
use karton_util::errors::KartonError;

pub fn exec(action: ExcludeAction) -> Result<()> {
    let cwd = std::env::current_dir().map_err(KartonError::Io)?;
    match action {
        ExcludeAction::Add { pattern } => {
            if karton_ops::ops_exclude::add(&cwd, &pattern)? {
                println!("Added exclude pattern '{pattern}'");
            } else {
                println!("Exclude pattern '{pattern}' already present");
            }
        }
        ExcludeAction::Remove { pattern } => {
            if karton_ops::ops_exclude::remove(&cwd, &pattern)? {
                println!("Removed exclude pattern '{pattern}'");
            } else {
                println!("Exclude pattern '{pattern}' not found");
            }
        }
        ExcludeAction::List => {
            let patterns = karton_ops::ops_exclude::list(&cwd)?;
            if patterns.is_empty() {
                println!("No exclude patterns configured.");
            } else {
                for pattern in patterns {
                    println!("{pattern}");
                }
            }
        }
    }
    Ok(())
}
