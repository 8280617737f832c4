use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::FreedomError;
use crate::models::{Package, Project, Subject};
use crate::version::constraint::VersionConstraint;

/// Load a package or project record from a JSON file.
///
/// A bare array of packages takes its project name from `name`, falling back
/// to the file stem.
pub fn load_subject(path: &Path, name: Option<&str>) -> Result<Subject> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let fallback = name
        .map(str::to_string)
        .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_default();

    Ok(subject_from_json(value, &fallback)?)
}

/// Classify a JSON document as a single package or a project.
///
/// - `[ {package}, ... ]` → project named `fallback_name`
/// - `{ "name": ..., "packages": [...] }` → project
/// - `{ "repo": ..., ... }` → package
pub fn subject_from_json(value: Value, fallback_name: &str) -> Result<Subject, FreedomError> {
    match value {
        Value::Array(items) => Ok(Subject::Project(Project {
            name: fallback_name.to_string(),
            packages: packages_from_json(items)?,
        })),
        Value::Object(mut map) if map.contains_key("packages") => {
            let name = match map.remove("name") {
                Some(Value::String(name)) => name,
                Some(_) => {
                    return Err(FreedomError::InvalidSubject(
                        "project name must be a string".to_string(),
                    ))
                }
                None => fallback_name.to_string(),
            };
            let Some(Value::Array(items)) = map.remove("packages") else {
                return Err(FreedomError::InvalidSubject(
                    "project packages must be an array".to_string(),
                ));
            };
            Ok(Subject::Project(Project {
                name,
                packages: packages_from_json(items)?,
            }))
        }
        Value::Object(map) if map.contains_key("repo") => {
            Ok(Subject::Package(package_from_json(Value::Object(map))?))
        }
        other => Err(FreedomError::InvalidSubject(format!(
            "expected a package or a project, got {}",
            kind(&other)
        ))),
    }
}

/// Keep only packages whose version satisfies `constraint`.
///
/// Packages without a version never match. A single package that does not
/// match becomes an empty project, so nothing gets polled.
pub fn filter_by_version(subject: Subject, constraint: &VersionConstraint) -> Subject {
    let matches = |package: &Package| {
        package
            .version
            .as_deref()
            .is_some_and(|v| constraint.matches(v))
    };

    match subject {
        Subject::Project(mut project) => {
            project.packages.retain(|p| matches(p));
            Subject::Project(project)
        }
        Subject::Package(package) if matches(&package) => Subject::Package(package),
        Subject::Package(package) => Subject::Project(Project {
            name: package.display_name().to_string(),
            packages: Vec::new(),
        }),
    }
}

fn packages_from_json(items: Vec<Value>) -> Result<Vec<Package>, FreedomError> {
    items.into_iter().map(package_from_json).collect()
}

fn package_from_json(value: Value) -> Result<Package, FreedomError> {
    let package: Package = serde_json::from_value(value)?;
    if package.repo.trim().is_empty() {
        return Err(FreedomError::InvalidSubject(format!(
            "package {} has an empty repo",
            package.display_name()
        )));
    }
    Ok(package)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without repo or packages",
    }
}
