use miette::Result;

use karton_util::errors::KartonError;

pub fn exec(name: &str) -> Result<()> {
    let cwd = std::env::current_dir().map_err(KartonError::Io)?;
    karton_ops::ops_new::new_project(&cwd, name)
}
