//! Gentoo `license_groups` parsing and the memoized free-license set.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::{debug, info, warn};

use crate::error::FetchError;

/// Groups whose members are treated as free licenses.
pub const DEFAULT_FREE_GROUPS: &[&str] = &[
    "FSF-APPROVED",
    "OSI-APPROVED-FREE",
    "MISC-FREE",
    "FREE-DOCUMENTS",
];

/// Case-insensitive set of free license identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeLicenses(HashSet<String>);

impl FreeLicenses {
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(&id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for FreeLicenses {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|s| s.as_ref().to_lowercase()).collect())
    }
}

/// Parse a `license_groups` document into `group -> members`.
///
/// `#` starts a comment. Members referencing another group (`@GROUP`) are
/// dropped, not expanded.
pub fn parse_license_groups(text: &str) -> HashMap<String, Vec<String>> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .filter_map(|line| {
            let mut words = line.split_whitespace();
            let group = words.next()?;
            let members = words
                .filter(|w| !w.starts_with('@'))
                .map(str::to_string)
                .collect();
            Some((group.to_string(), members))
        })
        .collect()
}

/// Union of the members of `free_groups` in a `license_groups` document.
pub fn free_licenses_from_groups(
    text: &str,
    free_groups: &[String],
) -> Result<FreeLicenses, FetchError> {
    let groups = parse_license_groups(text);
    let free: FreeLicenses = free_groups
        .iter()
        .filter_map(|name| groups.get(name))
        .flatten()
        .collect();

    if free.is_empty() {
        return Err(FetchError::EmptyFreeSet(free_groups.to_vec()));
    }
    Ok(free)
}

/// Where the free-license set comes from. Implementations may fail; callers
/// treat a failure as "data unavailable".
pub trait FreeLicenseSource: Send + Sync {
    fn fetch(&self) -> Result<FreeLicenses, FetchError>;
}

/// A local copy of `license_groups`.
pub struct LicenseGroupsFile {
    pub path: PathBuf,
    pub free_groups: Vec<String>,
}

impl FreeLicenseSource for LicenseGroupsFile {
    fn fetch(&self) -> Result<FreeLicenses, FetchError> {
        debug!("Reading license groups from {}", self.path.display());
        let text = std::fs::read_to_string(&self.path)?;
        free_licenses_from_groups(&text, &self.free_groups)
    }
}

/// A `license_groups` document that was already retrieved, e.g. over HTTP.
pub struct StaticLicenseGroups {
    pub text: String,
    pub free_groups: Vec<String>,
}

impl FreeLicenseSource for StaticLicenseGroups {
    fn fetch(&self) -> Result<FreeLicenses, FetchError> {
        free_licenses_from_groups(&self.text, &self.free_groups)
    }
}

/// No data at all; every fetch fails with `reason`.
pub struct Unavailable(pub String);

impl FreeLicenseSource for Unavailable {
    fn fetch(&self) -> Result<FreeLicenses, FetchError> {
        Err(FetchError::Unavailable(self.0.clone()))
    }
}

/// Single-assignment cache in front of a [`FreeLicenseSource`].
///
/// The first successful fetch is kept for the lifetime of the cache.
/// Failures are not remembered, so a later call tries the source again.
pub struct FreeLicenseCache {
    source: Box<dyn FreeLicenseSource>,
    cell: OnceLock<FreeLicenses>,
}

impl FreeLicenseCache {
    pub fn new(source: impl FreeLicenseSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cell: OnceLock::new(),
        }
    }

    pub fn preloaded(licenses: FreeLicenses) -> Self {
        let cache = Self::new(Unavailable("preloaded cache".to_string()));
        // A fresh cell is always empty, so this cannot fail.
        let _ = cache.cell.set(licenses);
        cache
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::new(Unavailable(reason.into()))
    }

    pub fn get(&self) -> Option<&FreeLicenses> {
        if let Some(licenses) = self.cell.get() {
            return Some(licenses);
        }

        match self.source.fetch() {
            Ok(licenses) => {
                info!("Loaded {} free license identifiers", licenses.len());
                Some(self.cell.get_or_init(|| licenses))
            }
            Err(e) => {
                warn!("Free license identifiers unavailable: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const LICENSE_GROUPS: &str = "\
# This is a comment
GPL-COMPATIBLE Apache-2.0 GPL-2 GPL-3 LGPL-2.1 MIT  # trailing comment
FSF-APPROVED @GPL-COMPATIBLE Artistic-2 OFL-1.1
OSI-APPROVED-FREE @FSF-APPROVED BSD-2 ZLIB

MISC-FREE public-domain
EULA Oracle-BCLA-JavaSE
";

    fn groups(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_groups_and_strips_references() {
        let parsed = parse_license_groups(LICENSE_GROUPS);
        assert_eq!(parsed.len(), 5);
        assert_eq!(
            parsed["FSF-APPROVED"],
            vec!["Artistic-2".to_string(), "OFL-1.1".to_string()]
        );
        assert_eq!(parsed["GPL-COMPATIBLE"].len(), 5);
        assert_eq!(parsed["MISC-FREE"], vec!["public-domain".to_string()]);
    }

    #[test]
    fn free_set_is_union_of_free_groups() {
        let free = free_licenses_from_groups(
            LICENSE_GROUPS,
            &groups(&["FSF-APPROVED", "OSI-APPROVED-FREE", "MISC-FREE"]),
        )
        .unwrap();

        assert!(free.contains("Artistic-2"));
        assert!(free.contains("zlib"));
        assert!(free.contains("PUBLIC-DOMAIN"));
        // Referenced through @GPL-COMPATIBLE only, which is stripped.
        assert!(!free.contains("MIT"));
        assert!(!free.contains("Oracle-BCLA-JavaSE"));
    }

    #[test]
    fn empty_free_set_is_an_error() {
        let result = free_licenses_from_groups(LICENSE_GROUPS, &groups(&["NOPE"]));
        assert!(matches!(result, Err(FetchError::EmptyFreeSet(_))));
    }

    #[test]
    fn reads_license_groups_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("license_groups");
        std::fs::write(&path, LICENSE_GROUPS).unwrap();

        let cache = FreeLicenseCache::new(LicenseGroupsFile {
            path,
            free_groups: groups(&["MISC-FREE"]),
        });
        assert!(cache.get().unwrap().contains("public-domain"));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let cache = FreeLicenseCache::new(LicenseGroupsFile {
            path: PathBuf::from("/nonexistent/license_groups"),
            free_groups: groups(&["MISC-FREE"]),
        });
        assert!(cache.get().is_none());
    }

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        succeed_after: usize,
    }

    impl FreeLicenseSource for CountingSource {
        fn fetch(&self) -> Result<FreeLicenses, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call > self.succeed_after {
                Ok(["MIT"].into_iter().collect())
            } else {
                Err(FetchError::Unavailable("not yet".to_string()))
            }
        }
    }

    #[test]
    fn cache_fetches_once_after_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = FreeLicenseCache::new(CountingSource {
            calls: Arc::clone(&calls),
            succeed_after: 0,
        });

        assert!(cache.get().is_some());
        assert!(cache.get().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cache_retries_after_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = FreeLicenseCache::new(CountingSource {
            calls: Arc::clone(&calls),
            succeed_after: 1,
        });

        assert!(cache.get().is_none());
        assert!(cache.get().is_some());
        assert!(cache.get().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn preloaded_and_unavailable_caches() {
        let preloaded = FreeLicenseCache::preloaded(["GPL-2"].into_iter().collect());
        assert!(preloaded.get().unwrap().contains("gpl-2"));

        assert!(FreeLicenseCache::unavailable("offline").get().is_none());
    }
}
