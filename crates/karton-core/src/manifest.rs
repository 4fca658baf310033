use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use karton_util::errors::KartonError;

use crate::buildtype::{BuildType, ResolvedBuildType, SigningConfig};

/// The parsed representation of a `Karton.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub package: PackageMetadata,

    pub sdk: SdkConfig,

    #[serde(default)]
    pub compat: Option<CompatConfig>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, ArchiveDependency>,

    #[serde(default)]
    pub packaging: PackagingConfig,

    #[serde(default)]
    pub signing: BTreeMap<String, SigningConfig>,

    #[serde(default, rename = "build-types")]
    pub build_types: BTreeMap<String, BuildType>,

    #[serde(default)]
    pub hooks: BTreeMap<String, Vec<String>>,
}

/// Application identity and version stamps from the `[package]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageMetadata {
    #[serde(rename = "application-id")]
    pub application_id: String,
    #[serde(rename = "version-code")]
    pub version_code: u32,
    #[serde(rename = "version-name")]
    pub version_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub license: Option<String>,
}

/// Platform version constraints from the `[sdk]` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SdkConfig {
    pub min: u32,
    pub target: u32,
    pub compile: u32,
}

/// Language-level compatibility from the `[compat]` section
/// (Java source/target levels as strings, e.g. `"11"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatConfig {
    pub source: String,
    pub target: String,
}

/// A dependency archive declaration, either a bare path string or a
/// detailed specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArchiveDependency {
    /// `stripe = "libs/stripe-android.jar"`
    Path(String),
    /// `libs = { dir = "libs" }` or `bcprov = { path = "...", optional = true }`
    Detailed {
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        dir: Option<String>,
        #[serde(default)]
        optional: bool,
    },
}

/// Packaging policy configuration from the `[packaging]` section.
///
/// `excludes` holds archive-relative paths or glob patterns dropped during
/// bundle merge, matching case-sensitively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackagingConfig {
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl Manifest {
    /// Load and parse a `Karton.toml` file from the given path.
    ///
    /// Before parsing, `${env:VAR}` references in the manifest content are
    /// resolved using `.karton.env` (if present alongside `Karton.toml`)
    /// and process environment variables.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KartonError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let env_vars =
            crate::properties::load_env_file(&dir.join(crate::ENV_FILE)).unwrap_or_default();
        let resolved = crate::properties::interpolate(&content, &env_vars);

        tracing::debug!(path = %path.display(), "loading manifest");
        Self::parse(&resolved)
    }

    /// Parse a `Karton.toml` from a string (no interpolation).
    pub fn parse(content: &str) -> miette::Result<Self> {
        let manifest: Self = toml::from_str(content).map_err(|e| KartonError::Manifest {
            message: format!("Failed to parse Karton.toml: {e}"),
        })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate configuration invariants. All violations are fatal.
    pub fn validate(&self) -> miette::Result<()> {
        if self.package.application_id.is_empty() || !self.package.application_id.contains('.') {
            return Err(KartonError::Config {
                message: format!(
                    "application-id '{}' is not a valid reverse-domain identifier",
                    self.package.application_id
                ),
            }
            .into());
        }
        if self.package.version_code == 0 {
            return Err(KartonError::Config {
                message: "version-code must be at least 1".to_string(),
            }
            .into());
        }
        if self.sdk.min > self.sdk.target {
            return Err(KartonError::Config {
                message: format!(
                    "min-sdk {} exceeds target-sdk {}",
                    self.sdk.min, self.sdk.target
                ),
            }
            .into());
        }
        if self.sdk.target > self.sdk.compile {
            return Err(KartonError::Config {
                message: format!(
                    "target-sdk {} exceeds compile-sdk {}",
                    self.sdk.target, self.sdk.compile
                ),
            }
            .into());
        }
        for (name, bt) in &self.build_types {
            if let Some(ref signing) = bt.signing {
                if !self.signing.contains_key(signing) {
                    return Err(KartonError::Config {
                        message: format!(
                            "build type '{name}' references unknown signing config '{signing}'"
                        ),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Look up a build type by name and resolve its signing config.
    ///
    /// `debug` and `release` exist implicitly (unsigned) when the manifest
    /// declares no `[build-types]`; any other name must be declared.
    pub fn build_type(&self, name: &str) -> miette::Result<ResolvedBuildType> {
        let build_type = match self.build_types.get(name) {
            Some(bt) => bt.clone(),
            None if name == "debug" || name == "release" => BuildType {
                signing: None,
                debuggable: None,
                application_id_suffix: None,
            },
            None => {
                return Err(KartonError::Config {
                    message: format!("unknown build type '{name}'"),
                }
                .into())
            }
        };

        let signing_name = build_type.signing.clone();
        let signing = match signing_name.as_deref() {
            // validate() guarantees the reference resolves for declared
            // build types; re-check for the implicit ones.
            Some(s) => Some(self.signing.get(s).cloned().ok_or_else(|| {
                KartonError::Config {
                    message: format!("build type '{name}' references unknown signing config '{s}'"),
                }
            })?),
            None => None,
        };

        Ok(ResolvedBuildType {
            name: name.to_string(),
            build_type,
            signing_name,
            signing,
        })
    }
}
