use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Output};

use crate::errors::KartonError;

/// Builder for constructing and executing external processes.
///
/// Used for manifest hooks (`pre-bundle`, `post-bundle`). Provides a fluent
/// API for setting program, arguments, environment variables, and working
/// directory.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    cwd: Option<String>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the working directory for the child process.
    pub fn cwd(mut self, dir: impl Into<String>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Execute the command and return its output.
    pub fn exec(&self) -> Result<Output, KartonError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        if let Some(ref dir) = self.cwd {
            cmd.current_dir(Path::new(dir));
        }
        cmd.output().map_err(KartonError::from)
    }
}

/// Run a shell command line (as written in a manifest hook list).
///
/// The line is passed to `sh -c` on Unix and `cmd /C` on Windows so that
/// hooks can use pipes and env var references.
pub fn run_hook_line(line: &str, cwd: &Path, hook: &str) -> Result<(), KartonError> {
    #[cfg(unix)]
    let builder = CommandBuilder::new("sh").arg("-c").arg(line);
    #[cfg(windows)]
    let builder = CommandBuilder::new("cmd").arg("/C").arg(line);

    tracing::debug!(hook, line, cwd = %cwd.display(), "running hook");
    let output = builder
        .cwd(cwd.to_string_lossy().to_string())
        .exec()
        .map_err(|e| KartonError::Hook {
            hook: hook.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(KartonError::Hook {
            hook: hook.to_string(),
            message: format!("'{line}' exited with {}: {}", output.status, stderr.trim()),
        });
    }
    Ok(())
}
