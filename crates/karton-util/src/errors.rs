use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Karton operations.
#[derive(Debug, Error, Diagnostic)]
pub enum KartonError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed manifest (e.g. Karton.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Karton.toml for syntax errors"))]
    Manifest { message: String },

    /// Inconsistent or unsupported project configuration (SDK levels,
    /// missing signing config, etc.).
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A dependency archive could not be found or read.
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// The same resource path survives policy application from more than
    /// one archive.
    #[error("duplicate resource '{path}' contributed by: {}", .archives.join(", "))]
    #[diagnostic(help(
        "Add the path to [packaging] excludes in Karton.toml, or drop one of the archives"
    ))]
    DuplicateResource {
        path: String,
        archives: Vec<String>,
    },

    /// A manifest hook command failed.
    #[error("Hook '{hook}' failed: {message}")]
    Hook { hook: String, message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type KartonResult<T> = miette::Result<T>;
