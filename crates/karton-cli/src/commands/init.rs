use miette::Result;

use karton_util::errors::KartonError;

pub fn exec() -> Result<()> {
    let cwd = std::env::current_dir().map_err(KartonError::Io)?;
    karton_ops::ops_init::init_project(&cwd)
}
