use serde::{Deserialize, Serialize};

/// A single package record as reported by a distribution repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subrepo: Option<String>,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visiblename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srcname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Package {
    /// Human-readable identity: visible name, then source name, then binary name.
    pub fn display_name(&self) -> &str {
        self.visiblename
            .as_deref()
            .or(self.srcname.as_deref())
            .or(self.binname.as_deref())
            .unwrap_or("?")
    }
}

/// A named group of packages that all ship the same upstream software.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub packages: Vec<Package>,
}

/// What `check_freedom` can be asked about.
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    Package(Package),
    Project(Project),
}

impl Subject {
    pub fn name(&self) -> &str {
        match self {
            Subject::Package(package) => package.display_name(),
            Subject::Project(project) => &project.name,
        }
    }

    pub fn packages(&self) -> &[Package] {
        match self {
            Subject::Package(package) => std::slice::from_ref(package),
            Subject::Project(project) => &project.packages,
        }
    }
}

/// Tri-state outcome of a freedom check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Free,
    NonFree,
    Unknown,
}

impl From<bool> for Verdict {
    fn from(free: bool) -> Self {
        if free {
            Verdict::Free
        } else {
            Verdict::NonFree
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Free => write!(f, "free"),
            Verdict::NonFree => write!(f, "non-free"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// One reference repository's contribution to a freedom check.
///
/// `verdict` is [`Verdict::Unknown`] when the repository abstained; such
/// reports are informational and are not counted as votes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteReport {
    pub repository: String,
    pub package: String,
    pub licenses: Vec<String>,
    pub verdict: Verdict,
}
