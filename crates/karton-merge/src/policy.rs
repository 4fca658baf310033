//! Packaging exclude policy: path and glob rules evaluated against
//! archive-relative paths.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use karton_util::errors::KartonError;

/// A single exclude rule: a case-sensitive exact path or glob pattern.
/// The only effect a rule can have is dropping the matched path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeRule {
    pub pattern: String,
}

impl ExcludeRule {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

/// An ordered set of exclude rules compiled for matching.
///
/// Rules are evaluated independently of candidate order: a path either
/// matches some rule or it does not. `*` does not cross `/` boundaries;
/// `**` does.
#[derive(Debug)]
pub struct PackagingPolicy {
    rules: Vec<ExcludeRule>,
    matcher: GlobSet,
}

impl PackagingPolicy {
    /// Compile a policy from patterns. Fails on malformed glob syntax.
    pub fn new(patterns: &[String]) -> miette::Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut rules = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| KartonError::Config {
                    message: format!("invalid exclude pattern '{pattern}': {e}"),
                })?;
            builder.add(glob);
            rules.push(ExcludeRule::new(pattern.clone()));
        }
        let matcher = builder.build().map_err(|e| KartonError::Config {
            message: format!("failed to compile exclude patterns: {e}"),
        })?;
        Ok(Self { rules, matcher })
    }

    /// An empty policy that drops nothing.
    pub fn empty() -> Self {
        Self::new(&[]).expect("empty policy always compiles")
    }

    /// Whether `path` matches any exclude rule.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    pub fn rules(&self) -> &[ExcludeRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
