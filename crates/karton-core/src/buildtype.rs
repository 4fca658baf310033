use serde::{Deserialize, Serialize};

/// A build type from `[build-types.<name>]`, selecting signing and
/// application-id adjustments for one kind of output bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildType {
    /// Name of the `[signing.<name>]` entry this build type uses.
    #[serde(default)]
    pub signing: Option<String>,

    #[serde(default)]
    pub debuggable: Option<bool>,

    #[serde(default, rename = "application-id-suffix")]
    pub application_id_suffix: Option<String>,
}

/// Signing credential configuration from `[signing.<name>]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    pub keystore: String,
    #[serde(rename = "key-alias")]
    pub key_alias: Option<String>,
    #[serde(rename = "store-password-cmd")]
    pub store_password_cmd: Option<String>,
}

impl SigningConfig {
    /// Whether this config looks like debug credentials (debug keystore
    /// file or the conventional Android debug key alias).
    pub fn looks_like_debug(&self) -> bool {
        let keystore_name = std::path::Path::new(&self.keystore)
            .file_name()
            .map(|n| n.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        keystore_name.contains("debug")
            || self
                .key_alias
                .as_deref()
                .is_some_and(|a| a == "androiddebugkey")
    }
}

/// A build type resolved against the manifest: its name, definition, and
/// the signing config it selects (if any).
#[derive(Debug, Clone)]
pub struct ResolvedBuildType {
    pub name: String,
    pub build_type: BuildType,
    pub signing_name: Option<String>,
    pub signing: Option<SigningConfig>,
}

impl ResolvedBuildType {
    /// Whether this build type is debuggable. Defaults to true for the
    /// `debug` build type and false otherwise.
    pub fn is_debuggable(&self) -> bool {
        self.build_type.debuggable.unwrap_or(self.name == "debug")
    }

    /// Whether a non-debuggable build type is wired to debug credentials.
    /// The original project shipped this way; Karton surfaces it loudly.
    pub fn release_signed_with_debug(&self) -> bool {
        if self.is_debuggable() {
            return false;
        }
        self.signing_name.as_deref() == Some("debug")
            || self.signing.as_ref().is_some_and(SigningConfig::looks_like_debug)
    }

    /// The application id for this build type, with any suffix applied.
    pub fn application_id(&self, base: &str) -> String {
        match self.build_type.application_id_suffix.as_deref() {
            Some(suffix) => format!("{base}{suffix}"),
            None => base.to_string(),
        }
    }
}
