//! Freedom voting: one package against its reference repository, or a whole
//! project polled across reference repositories.

use std::collections::HashSet;

use tracing::debug;

use crate::license::groups::FreeLicenseCache;
use crate::models::{Package, Project, Subject, Verdict, VoteReport};
use crate::reference::{ReferenceRegistry, ReferenceRepository, RepositoryRule};

/// A project is free when strictly more than this share of votes say so.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Receives a report for every reference repository consulted.
///
/// Observers are a side channel; they cannot affect the verdict.
pub trait VoteObserver {
    fn on_vote(&mut self, report: VoteReport);
}

impl VoteObserver for () {
    fn on_vote(&mut self, _report: VoteReport) {}
}

impl VoteObserver for Vec<VoteReport> {
    fn on_vote(&mut self, report: VoteReport) {
        self.push(report);
    }
}

/// Definite votes cast for a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub votes: usize,
    pub free_votes: usize,
}

impl Tally {
    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Free => {
                self.votes += 1;
                self.free_votes += 1;
            }
            Verdict::NonFree => self.votes += 1,
            Verdict::Unknown => {}
        }
    }

    pub fn verdict(&self, threshold: f64) -> Verdict {
        if self.votes == 0 {
            return Verdict::Unknown;
        }
        let ratio = self.free_votes as f64 / self.votes as f64;
        Verdict::from(ratio > threshold)
    }
}

pub struct FreedomChecker<'a> {
    registry: &'a ReferenceRegistry,
    free_licenses: &'a FreeLicenseCache,
    threshold: f64,
}

impl<'a> FreedomChecker<'a> {
    pub fn new(registry: &'a ReferenceRegistry, free_licenses: &'a FreeLicenseCache) -> Self {
        Self {
            registry,
            free_licenses,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Dispatch on the shape of `subject`.
    pub fn check_freedom(&self, subject: &Subject, observer: &mut impl VoteObserver) -> Verdict {
        self.verdict(&self.tally(subject, observer))
    }

    /// Votes cast on `subject`. A single package yields at most one vote,
    /// from its own reference repository.
    pub fn tally(&self, subject: &Subject, observer: &mut impl VoteObserver) -> Tally {
        match subject {
            Subject::Package(package) => {
                let mut tally = Tally::default();
                if let Some((_, repository)) = self.find(package) {
                    tally.record(self.poll(repository, package, observer));
                }
                tally
            }
            Subject::Project(project) => self.project_tally(project, observer),
        }
    }

    /// Apply this checker's threshold to a tally.
    pub fn verdict(&self, tally: &Tally) -> Verdict {
        tally.verdict(self.threshold)
    }

    /// Verdict of the package's reference repository, or `Unknown` when
    /// no reference repository covers it.
    pub fn package_verdict(&self, package: &Package) -> Verdict {
        match self.find(package) {
            Some((_, repository)) => self.evaluate(repository, package),
            None => Verdict::Unknown,
        }
    }

    pub fn project_verdict(&self, project: &Project, observer: &mut impl VoteObserver) -> Verdict {
        self.verdict(&self.project_tally(project, observer))
    }

    /// Poll every reference repository covering the project's packages.
    ///
    /// Each repository votes once, through the first of its packages in
    /// project order; later packages from the same repository are ignored.
    pub fn project_tally(&self, project: &Project, observer: &mut impl VoteObserver) -> Tally {
        let mut tally = Tally::default();
        let mut seen = HashSet::new();

        for package in &project.packages {
            let Some((index, repository)) = self.find(package) else {
                continue;
            };
            if !seen.insert(index) {
                debug!(
                    "{} already voted on {}; skipping {}",
                    repository.name,
                    project.name,
                    package.display_name()
                );
                continue;
            }
            tally.record(self.poll(repository, package, observer));
        }

        debug!(
            "{}: {}/{} free votes",
            project.name, tally.free_votes, tally.votes
        );
        tally
    }

    fn find(&self, package: &Package) -> Option<(usize, &'a ReferenceRepository)> {
        self.registry.find(&package.repo, package.subrepo.as_deref())
    }

    fn poll(
        &self,
        repository: &ReferenceRepository,
        package: &Package,
        observer: &mut impl VoteObserver,
    ) -> Verdict {
        let verdict = self.evaluate(repository, package);
        match verdict {
            Verdict::Unknown => debug!(
                "{} abstains on {}",
                repository.name,
                package.display_name()
            ),
            _ => debug!(
                "{} votes {} for {}",
                repository.name,
                verdict,
                package.display_name()
            ),
        }
        observer.on_vote(VoteReport {
            repository: repository.name.to_string(),
            package: package.display_name().to_string(),
            licenses: package.licenses.clone(),
            verdict,
        });
        verdict
    }

    /// Apply a repository's rule to a package. Stops at the first license
    /// string that is not free; no license strings at all counts as free.
    fn evaluate(&self, repository: &ReferenceRepository, package: &Package) -> Verdict {
        match &repository.rule {
            RepositoryRule::Fixed(free) => Verdict::from(*free),
            RepositoryRule::Evaluator(evaluator) => package
                .licenses
                .iter()
                .map(|license| evaluator.evaluate(license, self.free_licenses))
                .find(|verdict| *verdict != Verdict::Free)
                .unwrap_or(Verdict::Free),
        }
    }
}
