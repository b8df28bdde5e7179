//! Launcher artifact coordinates
//!
//! The node launcher fetches a small, fixed set of runtime artifacts
//! from a Maven-layout repository before the managed services start.
//! Each artifact is a group/artifact/version coordinate triple.

use std::fmt;

/// Runtime artifacts the launcher resolves at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Shared runtime injected into every managed service
    Runtime,
    /// Wrapper jar that supervises a single service process
    Wrapper,
}

impl Artifact {
    pub fn group_id(&self) -> &'static str {
        match self {
            Artifact::Runtime | Artifact::Wrapper => "cloud.cirrus",
        }
    }

    pub fn artifact_id(&self) -> &'static str {
        match self {
            Artifact::Runtime => "cirrus-runtime",
            Artifact::Wrapper => "cirrus-wrapper",
        }
    }

    pub fn version(&self) -> &'static str {
        match self {
            Artifact::Runtime => "0.1.0",
            Artifact::Wrapper => "0.1.0",
        }
    }

    /// Relative path in a Maven repository layout:
    /// `group/artifact/version/artifact-version.jar`
    pub fn repository_path(&self) -> String {
        format!(
            "{}/{}/{}/{}-{}.jar",
            self.group_id().replace('.', "/"),
            self.artifact_id(),
            self.version(),
            self.artifact_id(),
            self.version()
        )
    }

    /// All artifacts the launcher needs, in fetch order
    pub fn all() -> &'static [Artifact] {
        &[Artifact::Runtime, Artifact::Wrapper]
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.group_id(),
            self.artifact_id(),
            self.version()
        )
    }
}
